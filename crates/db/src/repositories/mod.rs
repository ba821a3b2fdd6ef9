//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod kanji_creation_repo;
pub mod kanji_repo;
pub mod session_repo;
pub mod temp_creation_repo;
pub mod user_repo;

pub use kanji_creation_repo::KanjiCreationRepo;
pub use kanji_repo::KanjiRepo;
pub use session_repo::SessionRepo;
pub use temp_creation_repo::TempCreationRepo;
pub use user_repo::UserRepo;
