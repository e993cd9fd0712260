use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Slot already taken: table {table_id} on {date} at {time}")]
    SlotConflict {
        table_id: i32,
        date: String,
        time: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl BookingError {
    /// Shorthand for building a [`BookingError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        BookingError::Validation(message.into())
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
