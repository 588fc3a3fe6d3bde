use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Neither container shape was recognized, or the manifest carried no
    /// version marker.
    #[error("Invalid backup format: {0}")]
    InvalidFormat(String),

    /// Wrong password or tampered ciphertext. Deliberately opaque: the two
    /// cases must stay indistinguishable to the caller.
    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Store error: {0}")]
    Store(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
