use crate::geom::BBox3;
use crate::quote::QuoteResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub code: String,
    pub message: String,
}

impl Warning {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MeshStats {
    pub triangles: usize,
    pub degenerate_triangles: usize,
    /// Edges used by exactly one facet.
    pub open_edges: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteReport {
    pub input_format: String,
    pub stats: MeshStats,
    pub extents: Option<BBox3>,
    pub signed_volume_mm3: f64,
    pub quote: QuoteResult,
    pub warnings: Vec<Warning>,
}

impl QuoteReport {
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}
