pub mod add;
pub mod delete;
pub mod digest;
pub mod due;
pub mod export;
pub mod import;
pub mod list;
pub mod quiz;
pub mod random;
pub mod review;
pub mod stats;
pub mod summary;
