use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::premium::calculate_premium;
use super::types::{InsurerRecord, Quote, QuoteRequest};

/// Sort orders offered by the quote list. Unrecognized keys deserialize to
/// `Unsorted`, which leaves the incoming order untouched.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    LowPremium,
    #[serde(rename = "highCSR")]
    HighCsr,
    HighCashless,
    #[serde(other)]
    Unsorted,
}

/// User-controlled view state over the assembled quote set. Defaults match
/// the entry state of the quote list: CSR floor of 80, no garage floor,
/// premium cap of 50000, cheapest first.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewOptions {
    pub search: String,
    pub sort_by: SortBy,
    pub min_csr: f64,
    pub min_cashless: u32,
    pub max_premium: i64,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_by: SortBy::LowPremium,
            min_csr: 80.0,
            min_cashless: 0,
            max_premium: 50_000,
        }
    }
}

/// Builds one quote per insurer in catalog order and assigns ranks. Rank is
/// the 1-based position in a stable ascending sort by total premium, so
/// premium ties resolve to catalog order. The returned sequence stays in
/// catalog order.
pub fn assemble_quotes(catalog: &[InsurerRecord], request: &QuoteRequest) -> Vec<Quote> {
    let mut quotes: Vec<Quote> = catalog
        .iter()
        .map(|insurer| Quote {
            quote_id: insurer.id.to_string(),
            insurer_name: insurer.name.to_string(),
            plan_name: insurer.plan_name.to_string(),
            claim_settlement_ratio: insurer.claim_settlement_ratio,
            cashless_garages: insurer.cashless_garages,
            premium: calculate_premium(request),
            rank: 0,
        })
        .collect();
    assign_ranks(&mut quotes);
    quotes
}

fn assign_ranks(quotes: &mut [Quote]) {
    let mut order: Vec<usize> = (0..quotes.len()).collect();
    order.sort_by_key(|&i| quotes[i].premium.total_premium);
    for (position, &i) in order.iter().enumerate() {
        quotes[i].rank = position as u32 + 1;
    }
}

/// Applies search, filters, and sort to an assembled quote set. Each step
/// is a pure, stable transform, so the whole pipeline is idempotent.
pub fn view(quotes: &[Quote], options: &ViewOptions) -> Vec<Quote> {
    let query = options.search.trim().to_lowercase();

    let mut viewed: Vec<Quote> = quotes
        .iter()
        .filter(|quote| {
            let matches_search = query.is_empty()
                || quote.insurer_name.to_lowercase().contains(&query)
                || quote.plan_name.to_lowercase().contains(&query);
            matches_search
                && quote.claim_settlement_ratio >= options.min_csr
                && quote.cashless_garages >= options.min_cashless
                && quote.premium.total_premium <= options.max_premium
        })
        .cloned()
        .collect();

    match options.sort_by {
        SortBy::LowPremium => viewed.sort_by_key(|quote| quote.premium.total_premium),
        SortBy::HighCsr => viewed.sort_by(|a, b| {
            b.claim_settlement_ratio
                .partial_cmp(&a.claim_settlement_ratio)
                .unwrap_or(Ordering::Equal)
        }),
        SortBy::HighCashless => viewed.sort_by(|a, b| b.cashless_garages.cmp(&a.cashless_garages)),
        SortBy::Unsorted => {}
    }

    viewed
}

/// The quote with the highest claim settlement ratio in the viewed set.
/// Ties go to whichever quote comes first in the current view order; empty
/// views have no recommendation.
pub fn recommended(viewed: &[Quote]) -> Option<&Quote> {
    viewed.iter().fold(None, |best, quote| match best {
        Some(current) if current.claim_settlement_ratio >= quote.claim_settlement_ratio => {
            Some(current)
        }
        _ => Some(quote),
    })
}

/// Lookup for the shareable-link flow: resolves a quote id against the
/// currently assembled set, or nothing if the id is unknown.
pub fn find_quote<'a>(quotes: &'a [Quote], quote_id: &str) -> Option<&'a Quote> {
    quotes.iter().find(|quote| quote.quote_id == quote_id)
}
