use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

/// A seller receiving ranked performance metrics and a bonus.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Seller {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

/// A catalog item identified by its SKU.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Product {
    pub sku: String,
    /// Cost basis of one unit
    pub purchase_price: Decimal,
}

/// One product-quantity entry within a purchase record.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct LineItem {
    pub sku: String,
    pub quantity: u32,
    pub sale_price: Decimal,
    /// Percentage in `0..=100`. Missing, null or non-numeric values count as zero.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub discount: Decimal,
}

/// One completed receipt attributed to a single seller.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct PurchaseRecord {
    pub seller_id: String,
    /// Receipt total. Non-numeric or missing values count as zero.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_amount: Decimal,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

/// The complete input of a single report run.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct SalesData {
    #[serde(default)]
    pub sellers: Vec<Seller>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub purchase_records: Vec<PurchaseRecord>,
}

/// Units of one SKU sold by a seller.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct TopProduct {
    pub sku: String,
    pub quantity: u64,
}

/// Running totals for one seller, alive for the duration of a single run.
#[derive(Clone, Debug)]
pub struct SellerStats {
    pub seller_id: String,
    pub name: String,
    pub sales_count: u32,
    /// Sum of receipt totals
    pub revenue: Decimal,
    /// Sum of line item revenue minus cost, can be negative
    pub profit: Decimal,
    pub bonus: Decimal,
    products_sold: Vec<TopProduct>,
    // sku -> position in `products_sold`
    sku_positions: HashMap<String, usize>,
}

impl SellerStats {
    pub fn new(seller: &Seller) -> Self {
        Self {
            seller_id: seller.id.clone(),
            name: format!("{} {}", seller.first_name, seller.last_name),
            sales_count: 0,
            revenue: Decimal::ZERO,
            profit: Decimal::ZERO,
            bonus: Decimal::ZERO,
            products_sold: Vec::new(),
            sku_positions: HashMap::new(),
        }
    }

    /// Adds `quantity` units to the running count of `sku`.
    pub fn record_units(&mut self, sku: &str, quantity: u32) {
        match self.sku_positions.get(sku) {
            Some(&position) => self.products_sold[position].quantity += u64::from(quantity),
            None => {
                self.sku_positions
                    .insert(sku.to_string(), self.products_sold.len());
                self.products_sold.push(TopProduct {
                    sku: sku.to_string(),
                    quantity: u64::from(quantity),
                });
            }
        }
    }

    /// Units sold per SKU, in first-sale order.
    pub fn products_sold(&self) -> &[TopProduct] {
        &self.products_sold
    }

    /// The `limit` best selling SKUs by quantity. Ties keep first-sale order.
    pub fn top_products(&self, limit: usize) -> Vec<TopProduct> {
        let mut top = self.products_sold.clone();
        top.sort_by(|a, b| b.quantity.cmp(&a.quantity));
        top.truncate(limit);
        top
    }
}

/// One line of the final report.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ReportEntry {
    pub seller_id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub profit: Decimal,
    pub sales_count: u32,
    pub top_products: Vec<TopProduct>,
    #[serde(with = "rust_decimal::serde::float")]
    pub bonus: Decimal,
}

/// A reference in the input that could not be resolved. Never fatal.
#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The whole record was skipped
    UnknownSeller { record: usize, seller_id: String },
    /// Only this line item was skipped
    UnknownProduct {
        record: usize,
        item: usize,
        sku: String,
    },
    /// Money went out of range. The line item, or the receipt total when
    /// `item` is `None`, was left out.
    Overflow { record: usize, item: Option<usize> },
}

/// Receives diagnostics produced while a report is computed.
#[cfg_attr(test, mockall::automock)]
pub trait DiagnosticSink {
    fn report(&self, diagnostic: Diagnostic);
}

impl<T> DiagnosticSink for &T
where
    T: DiagnosticSink + ?Sized,
{
    fn report(&self, diagnostic: Diagnostic) {
        (**self).report(diagnostic)
    }
}

/// Rounds half away from zero and always keeps two decimal places.
pub fn round2(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.rescale(2);
    rounded
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_amount).unwrap_or_default())
}

fn coerce_amount(value: &Value) -> Option<Decimal> {
    let parse = |s: &str| {
        Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .ok()
    };
    match value {
        Value::Number(n) => parse(&n.to_string()),
        Value::String(s) if s.trim().is_empty() => Some(Decimal::ZERO),
        Value::String(s) => parse(s.trim()),
        Value::Bool(b) => Some(Decimal::from(u8::from(*b))),
        _ => None,
    }
}
