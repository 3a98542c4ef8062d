pub mod donation;
pub mod summary;
