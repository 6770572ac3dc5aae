pub mod types;
pub mod filter;
pub mod filter_where;
pub mod listing;
pub mod pagination;

pub use types::*;
pub use filter::QueryFilter;
pub use listing::ListingConfig;
pub use pagination::Pagination;
