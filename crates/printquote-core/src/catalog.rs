use crate::material::Material;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub material: Material,
    /// Price of one 1 kg spool.
    pub price: f64,
    pub color: String,
    pub stock: StockStatus,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The filament shop's spool range.
    pub fn filaments() -> Self {
        let spool = |id: &str, name: &str, material, price, color: &str, stock, rating| Product {
            id: id.to_string(),
            name: name.to_string(),
            material,
            price,
            color: color.to_string(),
            stock,
            rating,
        };
        Self::new(vec![
            spool("pla_white", "PLA Filament - White", Material::Pla, 25.00, "White", StockStatus::InStock, 4.8),
            spool("pla_black", "PLA Filament - Black", Material::Pla, 25.00, "Black", StockStatus::InStock, 4.9),
            spool("abs_red", "ABS Filament - Red", Material::Abs, 28.00, "Red", StockStatus::InStock, 4.7),
            spool("petg_blue", "PETG Filament - Blue", Material::Petg, 30.00, "Blue", StockStatus::InStock, 4.6),
            spool("tpu_clear", "TPU Flexible - Clear", Material::Tpu, 35.00, "Clear", StockStatus::LowStock, 4.5),
            spool("nylon_natural", "Nylon Filament - Natural", Material::Nylon, 40.00, "Natural", StockStatus::InStock, 4.8),
        ])
    }

    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn by_material(&self, material: Material) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |p| p.material == material)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::filaments()
    }
}
