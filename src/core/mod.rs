pub mod catalog;
mod compare;
mod premium;
mod quotes;
mod types;

pub use catalog::{ADDONS, INSURERS, addon_price};
pub use compare::{CompareSet, CompareToggle, MAX_COMPARE};
pub use premium::calculate_premium;
pub use quotes::{SortBy, ViewOptions, assemble_quotes, find_quote, recommended, view};
pub use types::{AddOn, CityTier, InsurerRecord, PremiumBreakdown, Quote, QuoteRequest};
