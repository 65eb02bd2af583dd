//! Host-facing operations composed from the engine stages.

pub mod crop;
pub mod fill;
pub mod mask;
pub mod registry;
pub mod select;
