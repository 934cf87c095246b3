use crate::domain::errors::ReportError;
use crate::domain::models::{ReportEntry, SalesData};

pub mod aggregator;
pub mod app;
pub mod strategies;

/// The `Aggregator` trait defines the core functionality for sales reporting.
///
/// Implementors validate the input, accumulate per-seller statistics in a
/// single pass over the purchase records, rank the sellers and emit one
/// `ReportEntry` per seller, best first.
///
/// # Examples
///
/// ```
/// use seller_report::application::Aggregator;
/// use seller_report::domain::errors::ReportError;
/// use seller_report::domain::models::{ReportEntry, SalesData};
///
/// struct NoSales;
///
/// impl Aggregator for NoSales {
///     fn run(&self, _data: &SalesData) -> Result<Vec<ReportEntry>, ReportError> {
///         Ok(vec![])
///     }
/// }
/// ```
///
/// # Errors
///
/// A `ReportError` is returned before any work is done when the input is
/// incomplete. Unresolved references are never errors.
pub trait Aggregator {
    fn run(&self, data: &SalesData) -> Result<Vec<ReportEntry>, ReportError>;
}
