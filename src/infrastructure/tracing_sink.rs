use crate::domain::models::{Diagnostic, DiagnosticSink};

/// Emits every diagnostic as a `WARN` event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::UnknownSeller { record, seller_id } => {
                tracing::warn!(record, "Seller not found: {}", seller_id);
            }
            Diagnostic::UnknownProduct { record, item, sku } => {
                tracing::warn!(record, item, "Product not found: {}", sku);
            }
            Diagnostic::Overflow {
                record,
                item: Some(item),
            } => {
                tracing::warn!(record, item, "Line item skipped, amount out of range");
            }
            Diagnostic::Overflow { record, item: None } => {
                tracing::warn!(record, "Receipt total skipped, amount out of range");
            }
        }
    }
}
