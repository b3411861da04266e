//! Stored quotation rows
//!
//! A finalized quotation version is stored flat: one row per quoted
//! product, with the supplying provider's details repeated on every row.

use serde::{Deserialize, Deserializer, Serialize};

/// One quoted product of a quotation version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationRow {
    pub quotation_id: i64,
    pub version_id: i64,

    pub provider_id: i64,
    pub provider_name: String,
    #[serde(default)]
    pub provider_address: Option<String>,
    #[serde(default)]
    pub delivery_terms: Option<String>,
    #[serde(default)]
    pub payment_terms: Option<String>,
    /// Raw currency symbol, e.g. `S/.` or `$`
    #[serde(default)]
    pub currency_symbol: Option<String>,

    /// Id of the quotation line itself
    #[serde(default)]
    pub quotation_product_id: Option<i64>,
    pub product_id: i64,
    /// Missing and `null` both mean one unit
    #[serde(default = "default_quantity", deserialize_with = "quantity_or_default")]
    pub quantity: u32,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub unit_price: Option<f64>,
    /// Stored line total; computed from quantity when absent
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub tax_status: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

fn quantity_or_default<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_else(default_quantity))
}

impl QuotationRow {
    /// Whether this row belongs to the given quotation version
    pub fn belongs_to(&self, quotation_id: i64, version_id: i64) -> bool {
        self.quotation_id == quotation_id && self.version_id == version_id
    }
}

/// On-disk seed document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuotationSeed {
    #[serde(default)]
    pub rows: Vec<QuotationRow>,
}
