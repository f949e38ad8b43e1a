use thiserror::Error;

/// Failure classes of a single menu command.
///
/// Everything except [`AppError::Console`] is recovered by the menu loop;
/// the session keeps running after printing the message.
#[derive(Debug, Error)]
pub enum AppError {
    /// A number was required and the input did not coerce to one.
    #[error("{field} must be {expected} (got {input:?})")]
    InvalidInput {
        field: &'static str,
        expected: &'static str,
        input: String,
    },

    #[error("no record with ID {0}")]
    NotFound(i32),

    #[error("no changes were made")]
    NoChanges,

    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),

    /// Reading the terminal or writing to it failed.
    #[error("console I/O failure: {0}")]
    Console(#[from] std::io::Error),
}

impl AppError {
    pub fn is_storage(&self) -> bool {
        matches!(self, AppError::Storage(_))
    }
}
