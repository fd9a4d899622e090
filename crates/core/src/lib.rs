//! Domain types and pure rules shared by the database, dispatch, and HTTP
//! layers. Nothing in this crate performs I/O.

pub mod alert;
pub mod config;
pub mod deal;
pub mod error;
pub mod pagination;
pub mod payload;
pub mod rule;
pub mod types;
