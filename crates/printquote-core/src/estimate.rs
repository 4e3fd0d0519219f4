//! Volume and weight of a triangle mesh.
//!
//! Volume uses the divergence theorem: every facet closes a tetrahedron with
//! the origin, and the signed volumes of those tetrahedra sum to the enclosed
//! volume of a closed, consistently wound surface. The absolute value is taken
//! so inverted meshes still produce a usable number. Open or self-intersecting
//! meshes produce a best-effort figure, never an error.

use crate::material::Material;
use crate::model::Mesh;

pub const MM3_PER_CM3: f64 = 1000.0;

/// Raw signed sum in mm^3. Negative for inward-wound meshes.
pub fn signed_volume_mm3(mesh: &Mesh) -> f64 {
    let mut total = 0.0f64;
    for tri in mesh {
        total += tri.signed_volume();
    }
    total
}

pub fn estimate_volume_cm3(mesh: &Mesh) -> f64 {
    signed_volume_mm3(mesh).abs() / MM3_PER_CM3
}

pub fn estimate_weight_g(volume_cm3: f64, material: Material) -> f64 {
    volume_cm3 * material.density()
}
