use thiserror::Error;

/// The uploaded bytes do not decode as a triangulated surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshParseError {
    #[error("mesh upload is empty")]
    Empty,
    #[error("mesh upload is {size} bytes, limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
    #[error("binary STL truncated: header declares {declared} triangles, payload holds {available}")]
    Truncated { declared: u32, available: usize },
    #[error("ASCII STL line {line}: {message}")]
    Syntax { line: usize, message: String },
    #[error("non-finite coordinate in triangle {index}")]
    NonFinite { index: usize },
    #[error("unrecognized mesh encoding: {0}")]
    UnknownFormat(String),
}

impl MeshParseError {
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown material: {name:?}")]
pub struct UnknownMaterialError {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown product: {product_id:?}")]
pub struct UnknownProductError {
    pub product_id: String,
}

/// Failure of one quote request, from upload to price.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    #[error(transparent)]
    MeshParse(#[from] MeshParseError),
    #[error(transparent)]
    UnknownMaterial(#[from] UnknownMaterialError),
}
