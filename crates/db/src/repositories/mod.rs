//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&SqlitePool` as the first argument.

pub mod pipeline_repo;
pub mod user_repo;

pub use pipeline_repo::PipelineRepo;
pub use user_repo::UserRepo;
