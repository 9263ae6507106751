use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpikeError {
    #[error("Brain area '{area}' does not exist! Possible values are {available:?}")]
    UnknownBrainArea {
        area: String,
        available: Vec<String>,
    },

    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    #[error("Invalid window: tmin ({tmin}) must be less than tmax ({tmax})")]
    InvalidWindow { tmin: f64, tmax: f64 },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Session '{session}' not found. Available sessions are: {available:?}")]
    SessionNotFound {
        session: String,
        available: Vec<String>,
    },

    #[error("Data file not found: {0}")]
    FileNotFound(String),

    #[error("Missing column '{column}' in {file}")]
    MissingColumn { column: &'static str, file: String },

    #[error("Failed to parse table: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SpikeError>;
