use thiserror::Error;

/// Fatal input problems detected before any aggregation starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("missing data")]
    MissingData,
    #[error("sellers must be a non-empty collection")]
    EmptySellers,
    #[error("products must be a non-empty collection")]
    EmptyProducts,
    #[error("purchase_records must be a non-empty collection")]
    EmptyPurchaseRecords,
    #[error("strategies must be an object")]
    MissingStrategies,
    #[error("computeRevenue must be a function")]
    MissingRevenueStrategy,
    #[error("computeBonus must be a function")]
    MissingBonusStrategy,
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read sales data")]
    FailedToRead(#[from] std::io::Error),
    #[error("Failed to parse sales data")]
    FailedToParse(#[from] serde_json::Error),
}
