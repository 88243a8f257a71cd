use thiserror::Error;

/// Core errors for the NVMe plugin
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} did not finish within {secs}s")]
    Timeout { command: String, secs: u64 },

    #[error("Malformed response from {command}: {source}")]
    MalformedResponse {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Tool error: {0}")]
    Tool(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    pub fn tool<S: Into<String>>(msg: S) -> Self {
        Self::Tool(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub fn malformed<S: Into<String>>(command: S, source: serde_json::Error) -> Self {
        Self::MalformedResponse {
            command: command.into(),
            source,
        }
    }
}
