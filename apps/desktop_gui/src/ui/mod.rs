//! UI layer for the desktop GUI: the producto window shell.

pub mod app;

pub use app::ProductoApp;
