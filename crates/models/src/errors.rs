use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid animal id: {0}")]
    InvalidId(String),
    #[error("database error: {0}")]
    Db(String),
}
