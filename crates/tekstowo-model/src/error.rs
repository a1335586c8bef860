use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid letter '{0}': expected a single letter A-Z or 'pozostale'")]
    InvalidLetter(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
