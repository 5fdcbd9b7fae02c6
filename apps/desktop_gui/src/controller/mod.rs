//! Controller layer: the producto view controller, its DAO seam, and the list/table binding it drives.

pub mod dao;
pub mod observable;
pub mod table;
pub mod view;
