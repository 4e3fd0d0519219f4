use crate::discount::{apply_discount, DiscountCode};
use crate::error::UnknownMaterialError;
use crate::estimate::{estimate_volume_cm3, estimate_weight_g};
use crate::material::Material;
use crate::model::Mesh;
use crate::pricing::base_price;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub material: Material,
    pub volume_cm3: f64,
    pub weight_g: f64,
    pub base_cost: f64,
    pub discount: f64,
    pub discount_code: Option<DiscountCode>,
    pub final_cost: f64,
}

/// Prices one print of `mesh` in `material`. Holds no state between calls.
pub fn quote(mesh: &Mesh, material: Material, code: &str) -> QuoteResult {
    let volume_cm3 = estimate_volume_cm3(mesh);
    let weight_g = estimate_weight_g(volume_cm3, material);
    let base_cost = base_price(weight_g, material);
    let discount = apply_discount(base_cost, code);
    let discount_code = if discount > 0.0 {
        DiscountCode::lookup(code)
    } else {
        None
    };

    tracing::debug!(
        triangles = mesh.len(),
        %material,
        volume_cm3,
        weight_g,
        base_cost,
        discount,
        "quoted mesh"
    );

    QuoteResult {
        material,
        volume_cm3,
        weight_g,
        base_cost,
        discount,
        discount_code,
        final_cost: base_cost - discount,
    }
}

/// Like [`quote`], with the material given as a free-form identifier.
pub fn quote_by_name(
    mesh: &Mesh,
    material: &str,
    code: &str,
) -> Result<QuoteResult, UnknownMaterialError> {
    let material = material.parse::<Material>()?;
    Ok(quote(mesh, material, code))
}
