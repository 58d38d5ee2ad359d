use thiserror::Error;

/// The source itself became unusable (disconnect, permission loss). The
/// ingestion worker reports this upward and stops; it is never fatal to the
/// host process.
#[derive(Debug, Error, Clone)]
pub enum FramingError {
    #[error("source read failed: {0}")]
    Read(String),
}

/// A single malformed telemetry line. Expected noise from a continuous
/// sensor stream; dropped at the parse site, never propagated.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("line has fewer than two comma-separated fields")]
    MissingField,
    #[error("field is not a number")]
    BadNumber,
    #[error("field is not finite")]
    NonFinite,
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
