pub mod submission;
pub mod team;
pub mod user;

pub use submission::*;
pub use team::*;
pub use user::*;

use grandprix_core::CoreError;

pub(crate) fn db_err(err: sqlx::Error) -> CoreError {
    CoreError::Database(err.to_string())
}
