//! SeaORM entities backing the SQLite store.

pub mod app;
pub mod user;
