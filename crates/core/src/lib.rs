//! Domain rules shared by the database, storage and HTTP layers.
//!
//! Nothing in this crate performs I/O.

pub mod csrf;
pub mod environment;
pub mod error;
pub mod jlpt;
pub mod types;
pub mod uploads;
