//! Provider grouping
//!
//! Stored rows repeat the provider's details on every quoted product. This
//! module folds them into one `ContentEntry` per provider.

use crate::core::constants::{NOT_AVAILABLE, message};
use crate::models::listing::{ContentEntry, Currency, ListingResponse, Product, ProviderInfo};
use crate::models::quotation::QuotationRow;
use std::collections::HashMap;

/// Group rows by provider
///
/// Entries follow the order in which each provider first appears in `rows`,
/// and products keep their row order. Provider details are taken from the
/// provider's first row.
pub fn group_by_provider(rows: &[QuotationRow]) -> Vec<ContentEntry> {
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut entries: Vec<ContentEntry> = Vec::new();

    for row in rows {
        let slot = *index.entry(row.provider_id).or_insert_with(|| {
            entries.push(ContentEntry {
                provider_info: convert_provider(row),
                products: Vec::new(),
            });
            entries.len() - 1
        });
        entries[slot].products.push(convert_product(row));
    }

    entries
}

/// Build the full listing envelope for one quotation version
pub fn build_listing(rows: &[QuotationRow]) -> ListingResponse {
    if rows.is_empty() {
        return ListingResponse::failure(message::NO_DATA);
    }
    ListingResponse::ok(message::LISTING_LOADED, group_by_provider(rows))
}

fn convert_provider(row: &QuotationRow) -> ProviderInfo {
    ProviderInfo {
        id: row.provider_id,
        name: row.provider_name.clone(),
        address: text_or_placeholder(&row.provider_address),
        currency: Currency::from_symbol(row.currency_symbol.as_deref()),
        delivery_terms: text_or_placeholder(&row.delivery_terms),
        payment_terms: text_or_placeholder(&row.payment_terms),
    }
}

fn convert_product(row: &QuotationRow) -> Product {
    let unit_price = row.unit_price.unwrap_or(0.0);
    let total_price = row
        .total_price
        .unwrap_or_else(|| f64::from(row.quantity) * unit_price);

    Product {
        id: row.product_id,
        unit: text_or_placeholder(&row.unit),
        name: text_or_placeholder(&row.product_name),
        brand: text_or_placeholder(&row.brand),
        model: text_or_placeholder(&row.model),
        unit_price,
        total_price,
        quantity: Some(row.quantity),
        tax_status: Some(text_or_placeholder(&row.tax_status)),
        quotation_product_id: row.quotation_product_id,
    }
}

/// Blank and missing values both become the placeholder
fn text_or_placeholder(value: &Option<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}
