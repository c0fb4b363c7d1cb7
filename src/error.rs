use thiserror::Error;

/// A rendering-environment operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("{operation} failed: {message}")]
    Operation {
        operation: &'static str,
        message: String,
    },

    #[error("no document available")]
    NoDocument,

    #[error("element is not styleable")]
    NotStyleable,
}

impl PageError {
    pub fn operation(operation: &'static str, message: impl Into<String>) -> Self {
        PageError::Operation {
            operation,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid class name for {field}: {value:?}")]
    InvalidClass { field: &'static str, value: String },

    #[error("flash hide delay ({hide_ms}ms) precedes show delay ({show_ms}ms)")]
    FlashWindow { show_ms: u32, hide_ms: u32 },

    #[error("hover needs at least one element class")]
    NoHoverClasses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("month out of range: {0}")]
    Month(u8),

    #[error("day {day} out of range for {year}-{month:02}")]
    Day { year: i32, month: u8, day: u8 },

    #[error("time out of range: {hour:02}:{minute:02}:{second:02}")]
    Time { hour: u8, minute: u8, second: u8 },
}
