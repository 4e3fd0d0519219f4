use crate::catalog::Catalog;
use crate::discount::{apply_discount, DiscountCode};
use crate::error::UnknownProductError;
use crate::material::Material;
use serde::{Deserialize, Serialize};

pub fn base_price(weight_g: f64, material: Material) -> f64 {
    weight_g * material.unit_cost()
}

pub fn final_price(amount: f64, code: &str) -> f64 {
    amount - apply_discount(amount, code)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartPricing {
    /// Subtotals at or above this ship free.
    pub free_shipping_threshold: f64,
    pub shipping_fee: f64,
    pub tax_rate: f64,
}

impl Default for CartPricing {
    fn default() -> Self {
        Self {
            free_shipping_threshold: 100.0,
            shipping_fee: 5.0,
            tax_rate: 0.09,
        }
    }
}

impl CartPricing {
    pub fn shipping_for(&self, subtotal: f64) -> f64 {
        if subtotal >= self.free_shipping_threshold {
            0.0
        } else {
            self.shipping_fee
        }
    }

    pub fn tax_for(&self, subtotal: f64) -> f64 {
        subtotal * self.tax_rate
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedLine {
    pub product_id: String,
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    pub lines: Vec<PricedLine>,
    pub subtotal: f64,
    pub shipping: f64,
    pub tax: f64,
    pub discount: f64,
    /// Set only when the code was recognized.
    pub discount_code: Option<DiscountCode>,
    pub total: f64,
}

/// Prices a filament cart.
///
/// Shipping and tax are both derived from the subtotal, and the discount is
/// taken from the subtotal alone, never from the shipping- or tax-inclusive
/// amount: `total = subtotal + shipping + tax - discount(subtotal)`.
pub fn price_cart(
    lines: &[CartLine],
    catalog: &Catalog,
    code: &str,
    cfg: &CartPricing,
) -> Result<CartTotals, UnknownProductError> {
    let mut priced = Vec::with_capacity(lines.len());
    let mut subtotal = 0.0f64;
    for line in lines {
        let product = catalog
            .find(&line.product_id)
            .ok_or_else(|| UnknownProductError {
                product_id: line.product_id.clone(),
            })?;
        let total = product.price * f64::from(line.quantity);
        subtotal += total;
        priced.push(PricedLine {
            product_id: product.id.clone(),
            description: product.name.clone(),
            quantity: line.quantity,
            unit_price: product.price,
            total,
        });
    }

    let shipping = cfg.shipping_for(subtotal);
    let tax = cfg.tax_for(subtotal);
    let discount = apply_discount(subtotal, code);
    let discount_code = if discount > 0.0 {
        DiscountCode::lookup(code)
    } else {
        None
    };

    tracing::debug!(subtotal, shipping, tax, discount, "priced cart");

    Ok(CartTotals {
        lines: priced,
        subtotal,
        shipping,
        tax,
        discount,
        discount_code,
        total: subtotal + shipping + tax - discount,
    })
}
