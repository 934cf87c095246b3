use super::strategies::Strategies;
use super::Aggregator;
use crate::domain::{
    errors::ReportError,
    models::{round2, Diagnostic, DiagnosticSink, Product, ReportEntry, SalesData, SellerStats},
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use typed_builder::TypedBuilder;

const TOP_PRODUCTS_LIMIT: usize = 10;

#[derive(TypedBuilder)]
pub struct SalesAggregator<'a, N> {
    strategies: &'a Strategies,
    sink: N,
}

impl<'a, N> Aggregator for SalesAggregator<'a, N>
where
    N: DiagnosticSink,
{
    fn run(&self, data: &SalesData) -> Result<Vec<ReportEntry>, ReportError> {
        validate(data)?;
        let revenue_strategy = self
            .strategies
            .revenue
            .as_deref()
            .ok_or(ReportError::MissingRevenueStrategy)?;
        let bonus_strategy = self
            .strategies
            .bonus
            .as_deref()
            .ok_or(ReportError::MissingBonusStrategy)?;

        tracing::info!(
            sellers = data.sellers.len(),
            products = data.products.len(),
            purchase_records = data.purchase_records.len(),
            "Computing sales report ..."
        );

        let mut stats: Vec<SellerStats> = data.sellers.iter().map(SellerStats::new).collect();

        // Later duplicates replace earlier ones
        let seller_index: HashMap<&str, usize> = data
            .sellers
            .iter()
            .enumerate()
            .map(|(position, seller)| (seller.id.as_str(), position))
            .collect();
        let product_index: HashMap<&str, &Product> = data
            .products
            .iter()
            .map(|product| (product.sku.as_str(), product))
            .collect();

        for (record_position, record) in data.purchase_records.iter().enumerate() {
            let Some(&seller_position) = seller_index.get(record.seller_id.as_str()) else {
                self.sink.report(Diagnostic::UnknownSeller {
                    record: record_position,
                    seller_id: record.seller_id.clone(),
                });
                continue;
            };
            let seller = &mut stats[seller_position];
            seller.sales_count += 1;

            for (item_position, item) in record.items.iter().enumerate() {
                let Some(product) = product_index.get(item.sku.as_str()) else {
                    self.sink.report(Diagnostic::UnknownProduct {
                        record: record_position,
                        item: item_position,
                        sku: item.sku.clone(),
                    });
                    continue;
                };
                let Some(profit) = product
                    .purchase_price
                    .checked_mul(Decimal::from(item.quantity))
                    .and_then(|cost| revenue_strategy.revenue(item, product).checked_sub(cost))
                    .and_then(|delta| seller.profit.checked_add(delta))
                else {
                    self.sink.report(Diagnostic::Overflow {
                        record: record_position,
                        item: Some(item_position),
                    });
                    continue;
                };
                seller.profit = profit;
                seller.record_units(&item.sku, item.quantity);
            }

            // Receipt totals are reported as-is, independent of line items
            match seller.revenue.checked_add(record.total_amount) {
                Some(revenue) => seller.revenue = revenue,
                None => self.sink.report(Diagnostic::Overflow {
                    record: record_position,
                    item: None,
                }),
            }
        }

        stats.sort_by(|a, b| b.profit.cmp(&a.profit));

        let total = stats.len();
        let report: Vec<ReportEntry> = stats
            .into_iter()
            .enumerate()
            .map(|(rank, mut seller)| {
                seller.bonus = bonus_strategy.bonus(rank, total, &seller);
                tracing::debug!(
                    rank,
                    seller_id = %seller.seller_id,
                    profit = %seller.profit,
                    bonus = %seller.bonus,
                    "Ranked seller"
                );
                ReportEntry {
                    top_products: seller.top_products(TOP_PRODUCTS_LIMIT),
                    seller_id: seller.seller_id,
                    name: seller.name,
                    revenue: round2(seller.revenue),
                    profit: round2(seller.profit),
                    sales_count: seller.sales_count,
                    bonus: round2(seller.bonus),
                }
            })
            .collect();

        tracing::info!("Sales report ready for {} sellers", report.len());
        Ok(report)
    }
}

/// Checks that every input collection is present and non-empty.
pub(crate) fn validate(data: &SalesData) -> Result<(), ReportError> {
    if data.sellers.is_empty() {
        return Err(ReportError::EmptySellers);
    }
    if data.products.is_empty() {
        return Err(ReportError::EmptyProducts);
    }
    if data.purchase_records.is_empty() {
        return Err(ReportError::EmptyPurchaseRecords);
    }
    Ok(())
}
