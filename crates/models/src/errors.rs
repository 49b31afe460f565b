use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid public key: {0}")]
    InvalidPubkey(String),
}
