pub mod artifacts;
pub mod datasets;
pub mod repositories;
pub mod sqlite;

pub use artifacts::*;
pub use datasets::*;
pub use repositories::*;
