use serde::{Deserialize, Serialize};

/// Registered promotion codes. Anything else is "no discount".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscountCode {
    #[serde(rename = "SAY-NO-TO-POLYMATE")]
    SayNoToPolymate,
    #[serde(rename = "SKEM-FILAMENT-PRICE")]
    SkemFilamentPrice,
    #[serde(rename = "PARCEL-DEEZ-NUTS")]
    ParcelDeezNuts,
}

impl DiscountCode {
    pub const ALL: [DiscountCode; 3] = [
        DiscountCode::SayNoToPolymate,
        DiscountCode::SkemFilamentPrice,
        DiscountCode::ParcelDeezNuts,
    ];

    pub fn code(self) -> &'static str {
        match self {
            DiscountCode::SayNoToPolymate => "SAY-NO-TO-POLYMATE",
            DiscountCode::SkemFilamentPrice => "SKEM-FILAMENT-PRICE",
            DiscountCode::ParcelDeezNuts => "PARCEL-DEEZ-NUTS",
        }
    }

    /// Fraction of the amount taken off, in (0, 1].
    pub fn fraction(self) -> f64 {
        match self {
            DiscountCode::SayNoToPolymate => 0.15,
            DiscountCode::SkemFilamentPrice => 0.20,
            DiscountCode::ParcelDeezNuts => 0.50,
        }
    }

    /// Case-insensitive, surrounding whitespace ignored.
    pub fn lookup(input: &str) -> Option<DiscountCode> {
        let key = input.trim().to_ascii_uppercase();
        if key.is_empty() {
            return None;
        }
        DiscountCode::ALL.into_iter().find(|c| c.code() == key)
    }
}

/// Discount value (not the remainder) for `amount` under `code`.
pub fn apply_discount(amount: f64, code: &str) -> f64 {
    match DiscountCode::lookup(code) {
        Some(c) => amount * c.fraction(),
        None => 0.0,
    }
}
