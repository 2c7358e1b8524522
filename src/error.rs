use thiserror::Error;

/// Top-level error type for the wall graph engine.
#[derive(Debug, Error)]
pub enum WallgraphError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised by the floorplan record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("no open transaction to commit: {0}")]
    NoOpenTransaction(String),
}

/// Errors related to engine operations and tool events.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no active gesture for event: {0}")]
    NoActiveGesture(&'static str),

    #[error("a gesture is already in progress: {0}")]
    GestureInProgress(&'static str),
}

/// Errors raised while loading engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for {field}: {value}")]
    InvalidValue { field: &'static str, value: f64 },
}

/// Convenience type alias for results using [`WallgraphError`].
pub type Result<T> = std::result::Result<T, WallgraphError>;
