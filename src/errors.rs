use thiserror::Error;

/// Main error type for the midoctl application
#[derive(Error, Debug)]
pub enum MidoctlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Seed backfill error: {0}")]
    Seed(#[from] SeedError),

    #[error("Pre-commit check error: {0}")]
    Hook(#[from] HookError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error while accessing config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration format: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration file not found at {}", path.display())]
    Missing { path: std::path::PathBuf },
}

/// Seed-backfill errors
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("HTTP error talking to the seed host: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Patch response carried no Content-Disposition header")]
    MissingContentDisposition,

    #[error("Patch response is not an attachment filename: {header}")]
    MalformedContentDisposition { header: String },

    #[error("Seed {seed_id} still reports no spoiler log after unlocking")]
    SpoilerLocked { seed_id: String },

    #[error("Spoiler log is not valid JSON: {0}")]
    SpoilerLog(#[source] serde_json::Error),

    #[error("File hash is not a JSON list of five hash icons: {0}")]
    HashList(#[source] serde_json::Error),

    #[error("Creation timestamp does not match `%m/%d/%Y, %I:%M:%S %p UTC`: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] inquire::InquireError),

    #[error("Regex compilation error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Database error: {0}")]
    Db(#[from] postgres::Error),

    #[error("IO error while writing seed files: {0}")]
    Io(#[from] std::io::Error),
}

/// Pre-commit check errors
#[derive(Error, Debug)]
pub enum HookError {
    #[error("IO error while running a check command: {0}")]
    Io(#[from] std::io::Error),

    #[error("Regex compilation error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Check command failed: {command}")]
    CommandFailed { command: String },

    #[error("Query preparation cache is stale - {fix}")]
    StaleQueryCache { fix: String },

    #[error("Schema snapshot is stale - {fix}")]
    SchemaDrift { fix: String },
}

/// Type alias for Result using `MidoctlError`
pub type Result<T> = std::result::Result<T, MidoctlError>;
