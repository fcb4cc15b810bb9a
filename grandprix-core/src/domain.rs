pub mod dataset;
pub mod evaluation;
pub mod submission;
pub mod task;
pub mod team;
pub mod user;

pub use dataset::*;
pub use evaluation::*;
pub use submission::*;
pub use task::*;
pub use team::*;
pub use user::*;
