//! Error types for stratum-pattern

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid glob '{glob}': {message}")]
    InvalidGlob { glob: String, message: String },
}
