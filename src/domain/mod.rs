pub mod expander;
pub mod pricing;

pub use expander::{expand, expand_all, ExpandError};
pub use pricing::{DailyRow, DetailId, ExpandedTable, PriceRecord};
