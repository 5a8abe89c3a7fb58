use thiserror::Error;

pub type Result<T> = std::result::Result<T, LayoutError>;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid segment bounds: start {start} is after end {end}")]
    InvalidSegment { start: i32, end: i32 },

    #[error("Negative segment weight: {0}")]
    NegativeWeight(i32),

    #[error("Invalid rectangle size {width}x{height}: dimensions must be non-negative")]
    InvalidSize { width: i32, height: i32 },

    #[error("Corrupt weighted profile: {message}")]
    CorruptProfile { message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for LayoutError {
    fn from(err: toml::de::Error) -> Self {
        LayoutError::Config(format!("TOML parse error: {}", err))
    }
}
