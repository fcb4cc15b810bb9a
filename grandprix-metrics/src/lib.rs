pub mod preprocessing;
pub mod scoring;

pub use preprocessing::*;
pub use scoring::*;
