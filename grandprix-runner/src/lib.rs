pub mod error;
pub mod limits;
pub mod runner;

pub use error::*;
pub use limits::*;
pub use runner::*;
