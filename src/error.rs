use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("source file not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Azure CLI not found on PATH")]
    CredentialHelperMissing,

    #[error("not logged in to Azure CLI")]
    NotAuthenticated,

    #[error("failed to get access token: {0}")]
    TokenAcquisitionFailed(String),

    #[error("variable group request failed with status {status}: {body}")]
    RemoteRequestFailed { status: u16, body: String },

    #[error("variable group not found: {0}")]
    GroupNotFound(String),

    #[error("found {count} variable groups named '{name}'")]
    AmbiguousGroupName { name: String, count: usize },

    #[error("failed to back up {path}: {source}")]
    BackupFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("http error: {0}")]
    Http(#[from] Box<ureq::Error>),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        Error::Http(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
