//! 错误类型

use std::io;
use std::path::PathBuf;

/// 购物车相关的所有错误
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("cart item #{index} ({name}) has no identifier")]
    MissingId { index: usize, name: String },
    #[error("cart item {id} has an invalid price: {price}")]
    InvalidPrice { id: String, price: f64 },
    #[error("invalid image reference: {0}")]
    InvalidImageRef(String),
    #[error("could not determine the user {0} directory")]
    NoDataDir(&'static str),
}
