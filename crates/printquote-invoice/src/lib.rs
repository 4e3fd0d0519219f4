//! Invoice records for checkout. Layout is left to the renderer; this crate
//! only fixes the numbers and identifiers that appear on the document.

use chrono::NaiveDate;
use printquote_core::pricing::CartTotals;
use printquote_core::QuoteResult;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SEQUENCE_MIN: u16 = 1000;
pub const SEQUENCE_MAX: u16 = 9999;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvoiceError {
    #[error("customer {0} is required")]
    MissingField(&'static str),
    #[error("invoice sequence {0} is outside 1000..=9999")]
    SequenceOutOfRange(u16),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl Customer {
    pub fn validate(&self) -> Result<(), InvoiceError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
        ] {
            if value.trim().is_empty() {
                return Err(InvoiceError::MissingField(field));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    #[serde(rename = "Filament Order")]
    Filament,
    #[serde(rename = "3D Printing Order")]
    Printing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub number: String,
    pub date: String,
    pub customer: Customer,
    pub order_type: OrderType,
    pub lines: Vec<InvoiceLine>,
    pub subtotal: f64,
    pub shipping: f64,
    pub tax: f64,
    pub discount: f64,
    /// Upper-cased code, empty unless a discount applied.
    pub discount_code: String,
    pub total: f64,
}

/// `INV-YYYYMMDD-NNNN`.
pub fn invoice_number(date: NaiveDate, sequence: u16) -> Result<String, InvoiceError> {
    if !(SEQUENCE_MIN..=SEQUENCE_MAX).contains(&sequence) {
        return Err(InvoiceError::SequenceOutOfRange(sequence));
    }
    Ok(format!("INV-{}-{sequence}", date.format("%Y%m%d")))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

pub fn from_cart(
    totals: &CartTotals,
    customer: Customer,
    date: NaiveDate,
    sequence: u16,
) -> Result<Invoice, InvoiceError> {
    customer.validate()?;
    let lines = totals
        .lines
        .iter()
        .map(|l| InvoiceLine {
            description: l.description.clone(),
            quantity: l.quantity,
            unit_price: l.unit_price,
            total: l.total,
        })
        .collect();

    Ok(Invoice {
        number: invoice_number(date, sequence)?,
        date: format_date(date),
        customer,
        order_type: OrderType::Filament,
        lines,
        subtotal: totals.subtotal,
        shipping: totals.shipping,
        tax: totals.tax,
        discount: totals.discount,
        discount_code: totals
            .discount_code
            .map(|c| c.code().to_string())
            .unwrap_or_default(),
        total: totals.total,
    })
}

/// A print order is one line: the quoted part. No shipping or tax is added.
pub fn from_quote(
    quote: &QuoteResult,
    customer: Customer,
    date: NaiveDate,
    sequence: u16,
) -> Result<Invoice, InvoiceError> {
    customer.validate()?;
    let line = InvoiceLine {
        description: format!("3D print - {} ({:.2} g)", quote.material, quote.weight_g),
        quantity: 1,
        unit_price: quote.base_cost,
        total: quote.base_cost,
    };
    let discount_code = match quote.discount_code {
        Some(code) if quote.discount > 0.0 => code.code().to_string(),
        _ => String::new(),
    };

    Ok(Invoice {
        number: invoice_number(date, sequence)?,
        date: format_date(date),
        customer,
        order_type: OrderType::Printing,
        lines: vec![line],
        subtotal: quote.base_cost,
        shipping: 0.0,
        tax: 0.0,
        discount: quote.discount,
        discount_code,
        total: quote.final_cost,
    })
}
