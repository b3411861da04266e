//! Provider listing response models
//!
//! This module defines the JSON envelope returned by the listing endpoint:
//! one entry per provider, each carrying the products quoted from it.

use crate::core::constants::currency;
use serde::{Deserialize, Serialize};

/// Currency a provider quotes in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Soles,
    Dolares,
}

impl Currency {
    /// Map a stored currency symbol to its label
    ///
    /// Only the sol symbol maps to `Soles`; anything else, including a
    /// missing symbol, is treated as dollars.
    pub fn from_symbol(symbol: Option<&str>) -> Self {
        match symbol.map(str::trim) {
            Some(currency::SOLES_SYMBOL) => Currency::Soles,
            _ => Currency::Dolares,
        }
    }
}

/// Provider header of a listing entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub currency: Currency,
    pub delivery_terms: String,
    pub payment_terms: String,
}

/// Quoted product line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub unit: String,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub unit_price: f64,
    pub total_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotation_product_id: Option<i64>,
}

/// One provider together with its products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntry {
    pub provider_info: ProviderInfo,
    pub products: Vec<Product>,
}

/// Listing response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingResponse {
    pub success: bool,
    pub message: String,
    pub content: Vec<ContentEntry>,
}

impl ListingResponse {
    pub fn ok(message: impl Into<String>, content: Vec<ContentEntry>) -> Self {
        Self {
            success: true,
            message: message.into(),
            content,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            content: Vec::new(),
        }
    }

    /// Total number of products across all providers
    pub fn product_count(&self) -> usize {
        self.content.iter().map(|entry| entry.products.len()).sum()
    }
}
