#![doc = include_str!("../README.md")]

pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod money;
pub mod query;
pub mod records;
pub mod report;
pub mod sale;

pub use aggregate::{compute_revenue, rank_books_by_revenue, rank_customers_by_revenue};
pub use catalog::Catalog;
pub use error::Error;
pub use money::Money;
pub use query::{filter_sales_by_date, top_n, TopN};
pub use records::DEFAULT_DELIMITER;
pub use report::{DateTotal, Ranking, RankingKind, Report};
pub use sale::{read_sales, ItemEntry, Sale};
