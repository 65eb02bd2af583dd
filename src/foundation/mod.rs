pub mod buffer;
pub mod error;
