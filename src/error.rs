use thiserror::Error;

#[derive(Error, Debug)]
pub enum CapscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("capture tool failed: {0}")]
    ToolInvocation(String),

    #[error("malformed capture output: {0}")]
    MalformedOutput(#[from] serde_json::Error),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("storage backend error: {0}")]
    Storage(String),

    #[error("dashboard provisioning error: {0}")]
    Dashboard(String),
}

pub type Result<T> = std::result::Result<T, CapscopeError>;
