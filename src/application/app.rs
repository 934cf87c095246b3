use super::aggregator::{validate, SalesAggregator};
use super::strategies::{StrategyConfig, Strategies};
use super::Aggregator;
use crate::domain::errors::ReportError;
use crate::domain::models::{Diagnostic, ReportEntry, SalesData};
use crate::infrastructure::channel_sink::ChannelSink;
use crate::infrastructure::tracing_sink::TracingSink;
use serde::Serialize;

/// Computes the sales report for `data` with the given strategies.
///
/// Validation happens in a fixed order: the data first, then the strategies.
/// Unresolved sellers and products are logged and skipped.
///
/// # Errors
///
/// Returns a `ReportError` when `data` is missing or any of its collections is
/// empty, or when `strategies` is missing or incomplete.
pub fn produce_sales_report(
    data: Option<&SalesData>,
    strategies: Option<&Strategies>,
) -> Result<Vec<ReportEntry>, ReportError> {
    let data = data.ok_or(ReportError::MissingData)?;
    validate(data)?;
    let strategies = strategies.ok_or(ReportError::MissingStrategies)?;

    SalesAggregator::builder()
        .strategies(strategies)
        .sink(TracingSink)
        .build()
        .run(data)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReportConfig {
    pub strategies: StrategyConfig,
}

/// A finished report together with everything that was skipped on the way.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportOutcome {
    pub entries: Vec<ReportEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

pub trait Application {
    fn report(&self, data: Option<&SalesData>) -> Result<ReportOutcome, ReportError>;
}

pub struct App {
    strategies: Strategies,
}

impl App {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            strategies: Strategies::from_config(&config.strategies),
        }
    }
}

impl Application for App {
    fn report(&self, data: Option<&SalesData>) -> Result<ReportOutcome, ReportError> {
        let data = data.ok_or(ReportError::MissingData)?;
        let (sink, receiver) = ChannelSink::channel();
        let aggregator = SalesAggregator::builder()
            .strategies(&self.strategies)
            .sink(sink)
            .build();
        tracing::info!("Running aggregator ...");
        let entries = aggregator.run(data)?;
        let diagnostics: Vec<Diagnostic> = receiver.try_iter().collect();
        if !diagnostics.is_empty() {
            tracing::warn!("{} inputs skipped", diagnostics.len());
        }
        Ok(ReportOutcome {
            entries,
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::strategies::{BonusKind, DiscountedRevenue, RevenueKind};
    use crate::domain::models::{LineItem, Product, PurchaseRecord, Seller, SellerStats};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn data() -> SalesData {
        SalesData {
            sellers: vec![
                Seller {
                    id: "s1".to_string(),
                    first_name: "Ann".to_string(),
                    last_name: "Lee".to_string(),
                },
                Seller {
                    id: "s2".to_string(),
                    first_name: "Bob".to_string(),
                    last_name: "Ray".to_string(),
                },
            ],
            products: vec![Product {
                sku: "P".to_string(),
                purchase_price: dec!(50),
            }],
            purchase_records: vec![
                PurchaseRecord {
                    seller_id: "s1".to_string(),
                    total_amount: dec!(10),
                    items: vec![LineItem {
                        sku: "P".to_string(),
                        quantity: 1,
                        sale_price: dec!(10),
                        discount: Decimal::ZERO,
                    }],
                },
                PurchaseRecord {
                    seller_id: "nobody".to_string(),
                    total_amount: dec!(10),
                    items: vec![],
                },
            ],
        }
    }

    #[test]
    fn missing_data_is_rejected_first() {
        assert_eq!(
            produce_sales_report(None, None),
            Err(ReportError::MissingData)
        );
    }

    #[test]
    fn empty_sellers_are_rejected_before_strategies() {
        let empty = SalesData::default();
        assert_eq!(
            produce_sales_report(Some(&empty), None),
            Err(ReportError::EmptySellers)
        );
    }

    #[test]
    fn missing_strategies_are_rejected() {
        let data = data();
        assert_eq!(
            produce_sales_report(Some(&data), None),
            Err(ReportError::MissingStrategies)
        );
        assert_eq!(
            produce_sales_report(Some(&data), Some(&Strategies::default())),
            Err(ReportError::MissingRevenueStrategy)
        );
        let revenue_only = Strategies::default().with_revenue(DiscountedRevenue);
        assert_eq!(
            produce_sales_report(Some(&data), Some(&revenue_only)),
            Err(ReportError::MissingBonusStrategy)
        );
    }

    #[test]
    fn error_messages_are_stable() {
        assert_eq!(ReportError::MissingData.to_string(), "missing data");
        assert_eq!(
            ReportError::EmptySellers.to_string(),
            "sellers must be a non-empty collection"
        );
        assert_eq!(
            ReportError::MissingRevenueStrategy.to_string(),
            "computeRevenue must be a function"
        );
    }

    #[test]
    fn custom_closures_drive_the_report() {
        let strategies = Strategies::new(
            |item: &LineItem, _: &Product| item.sale_price * dec!(10),
            |rank: usize, _: usize, _: &SellerStats| Decimal::from(100 - rank as i64),
        );

        let report = produce_sales_report(Some(&data()), Some(&strategies)).unwrap();

        assert_eq!(report[0].seller_id, "s1");
        assert_eq!(report[0].profit, dec!(50));
        assert_eq!(report[0].bonus, dec!(100));
        assert_eq!(report[1].bonus, dec!(99));
    }

    #[test]
    fn app_collects_diagnostics() {
        let app = App::new(&ReportConfig::default());

        let outcome = app.report(Some(&data())).unwrap();

        assert_eq!(outcome.entries.len(), 2);
        assert_eq!(
            outcome.diagnostics,
            vec![Diagnostic::UnknownSeller {
                record: 1,
                seller_id: "nobody".to_string(),
            }]
        );
    }

    #[test]
    fn app_honours_clamped_bonus() {
        let config = ReportConfig {
            strategies: StrategyConfig {
                revenue: RevenueKind::Discounted,
                bonus: BonusKind::ProfitClamped,
            },
        };
        let mut data = data();
        data.sellers.truncate(1);

        let unclamped = App::new(&ReportConfig::default())
            .report(Some(&data))
            .unwrap();
        let clamped = App::new(&config).report(Some(&data)).unwrap();

        // the only seller lost 40 and still ranks first
        assert_eq!(unclamped.entries[0].profit, dec!(-40));
        assert_eq!(unclamped.entries[0].bonus, dec!(-6));
        assert_eq!(clamped.entries[0].bonus, dec!(0));
    }
}
