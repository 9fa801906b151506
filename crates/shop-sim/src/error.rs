use std::io;

use shop_core::ConfigError;
use shop_stock::StockError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("store configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to spawn thread `{name}`: {source}")]
    Spawn {
        name:   String,
        #[source]
        source: io::Error,
    },

    #[error("stock error: {0}")]
    Stock(#[from] StockError),

    #[error("actor thread `{name}` panicked")]
    ActorPanicked { name: String },
}

pub type SimResult<T> = Result<T, SimError>;
