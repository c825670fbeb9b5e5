//! Error types for stratum-core

/// Result type for stratum-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in stratum-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A scope name outside the precedence table
    #[error(
        "Unknown scope '{scope}': expected one of enterprise, project-local, project-shared, user"
    )]
    UnknownScope { scope: String },

    /// A layer document that does not have the expected shape
    #[error("Invalid layer at {origin}: {message}")]
    InvalidLayer { origin: String, message: String },

    /// Resolver options that failed to parse
    #[error("Invalid resolver options: {message}")]
    InvalidOptions { message: String },

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}
