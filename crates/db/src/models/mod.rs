//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) where rows are mutable

pub mod kanji;
pub mod kanji_creation;
pub mod session;
pub mod temp_creation;
pub mod user;
