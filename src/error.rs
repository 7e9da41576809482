use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to build block carrying weight {weight}: {source}")]
    HashComputation {
        weight: i64,
        #[source]
        source: Box<ChainError>,
    },

    #[error("Invalid weight {0:?}: expected an integer")]
    WeightParse(String),

    #[error("Corruption: {0}")]
    Corruption(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChainError>;
