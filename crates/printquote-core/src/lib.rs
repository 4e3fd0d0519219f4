pub mod analysis;
pub mod catalog;
pub mod config;
pub mod discount;
pub mod error;
pub mod estimate;
pub mod geom;
pub mod material;
pub mod model;
pub mod pricing;
pub mod quote;
pub mod report;

pub use error::{MeshParseError, QuoteError, UnknownMaterialError, UnknownProductError};
pub use material::{Material, MaterialProfile};
pub use model::{Mesh, Triangle};
pub use quote::{quote, quote_by_name, QuoteResult};
