use crate::estimate::signed_volume_mm3;
use crate::geom::Vec3;
use crate::material::Material;
use crate::model::Mesh;
use crate::quote::quote;
use crate::report::{MeshStats, QuoteReport, Warning};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateConfig {
    /// Facets with an area at or below this (mm^2) count as degenerate.
    pub degenerate_area_epsilon: f64,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            degenerate_area_epsilon: 1e-12,
        }
    }
}

pub struct Estimator {
    cfg: EstimateConfig,
}

impl Estimator {
    pub fn new(cfg: EstimateConfig) -> Self {
        Self { cfg }
    }

    /// Quotes the mesh and attaches diagnostics. Diagnostics never change the
    /// numbers: an open or inverted mesh is priced exactly as `quote` would.
    pub fn report(&self, input_format: &str, mesh: &Mesh, material: Material, code: &str) -> QuoteReport {
        let stats = self.mesh_stats(mesh);
        let signed = signed_volume_mm3(mesh);
        let result = quote(mesh, material, code);

        let mut warnings = Vec::new();
        if mesh.is_empty() {
            warnings.push(Warning::new("empty_mesh", "Mesh contains no triangles."));
        } else if result.volume_cm3 == 0.0 {
            warnings.push(Warning::new(
                "zero_volume",
                "Mesh encloses no volume; facets cancel or are all degenerate.",
            ));
        }
        if signed < 0.0 {
            warnings.push(Warning::new(
                "inverted_orientation",
                "Facets are wound inward; volume was taken as an absolute value.",
            ));
        }
        if stats.open_edges > 0 {
            warnings.push(Warning::new(
                "open_mesh",
                "Mesh has boundary edges; the volume estimate may be unreliable.",
            ));
        }
        for w in &warnings {
            tracing::warn!(code = %w.code, "{}", w.message);
        }

        QuoteReport {
            input_format: input_format.to_string(),
            stats,
            extents: mesh.extents(),
            signed_volume_mm3: signed,
            quote: result,
            warnings,
        }
    }

    pub fn mesh_stats(&self, mesh: &Mesh) -> MeshStats {
        let degenerate_triangles = mesh
            .iter()
            .filter(|t| t.area() <= self.cfg.degenerate_area_epsilon)
            .count();

        // Undirected edge -> number of facets using it. A closed surface uses
        // every edge exactly twice.
        let mut edges: HashMap<(VertexKey, VertexKey), usize> = HashMap::new();
        for tri in mesh {
            let [a, b, c] = tri.vertices().map(VertexKey::from);
            for (p, q) in [(a, b), (b, c), (c, a)] {
                let key = if p <= q { (p, q) } else { (q, p) };
                *edges.entry(key).or_default() += 1;
            }
        }
        let open_edges = edges.values().filter(|&&n| n == 1).count();

        MeshStats {
            triangles: mesh.len(),
            degenerate_triangles,
            open_edges,
        }
    }
}

/// Exact vertex identity; STL repeats shared vertices bit-for-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct VertexKey([u64; 3]);

impl From<Vec3> for VertexKey {
    fn from(v: Vec3) -> Self {
        // -0.0 and 0.0 are the same point.
        let bits = |x: f64| if x == 0.0 { 0u64 } else { x.to_bits() };
        Self([bits(v.x), bits(v.y), bits(v.z)])
    }
}
