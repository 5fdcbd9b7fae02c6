//! Backend bridge: a worker thread that owns the storage pool and answers UI requests over channels.

pub mod commands;
pub mod dao;
pub mod runtime;
