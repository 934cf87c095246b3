//! Per-seller sales performance reports.
//!
//! A report joins sellers, products and purchase records, accumulates revenue,
//! profit and units sold per seller in one pass, ranks sellers by profit and
//! asks a [`BonusStrategy`](application::strategies::BonusStrategy) for each
//! seller's bonus. Revenue per line item comes from a
//! [`RevenueStrategy`](application::strategies::RevenueStrategy).
//!
//! ```
//! use seller_report::application::app::produce_sales_report;
//! use seller_report::application::strategies::Strategies;
//! use seller_report::infrastructure::loader::read_sales_data;
//!
//! let json = r#"{
//!     "sellers": [{"id": "s1", "first_name": "Ann", "last_name": "Lee"}],
//!     "products": [{"sku": "P", "purchase_price": 5}],
//!     "purchase_records": [{"seller_id": "s1", "total_amount": 20,
//!         "items": [{"sku": "P", "quantity": 2, "sale_price": 10}]}]
//! }"#;
//! let data = read_sales_data(json.as_bytes()).unwrap();
//! let report = produce_sales_report(data.as_ref(), Some(&Strategies::reference())).unwrap();
//! assert_eq!(report[0].profit.to_string(), "10.00");
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
