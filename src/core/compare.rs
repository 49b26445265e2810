use super::types::Quote;

/// Upper bound on side-by-side comparison.
pub const MAX_COMPARE: usize = 3;

/// Outcome of a compare toggle. `Full` means the set was already at
/// capacity and nothing changed; callers surface that as a user notice.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CompareToggle {
    Added,
    Removed,
    Full,
}

/// The quote ids picked for comparison, in toggle order.
#[derive(Debug, Clone, Default)]
pub struct CompareSet {
    ids: Vec<String>,
}

impl CompareSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, quote_id: &str) -> CompareToggle {
        if let Some(position) = self.ids.iter().position(|id| id == quote_id) {
            self.ids.remove(position);
            return CompareToggle::Removed;
        }
        if self.ids.len() >= MAX_COMPARE {
            return CompareToggle::Full;
        }
        self.ids.push(quote_id.to_string());
        CompareToggle::Added
    }

    pub fn contains(&self, quote_id: &str) -> bool {
        self.ids.iter().any(|id| id == quote_id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Resolves the picked ids against a quote set, keeping toggle order
    /// and silently dropping ids that no longer resolve.
    pub fn selected<'a>(&self, quotes: &'a [Quote]) -> Vec<&'a Quote> {
        self.ids
            .iter()
            .filter_map(|id| quotes.iter().find(|quote| &quote.quote_id == id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::INSURERS;
    use crate::core::types::{CityTier, QuoteRequest};
    use crate::core::assemble_quotes;

    fn sample_quotes() -> Vec<Quote> {
        assemble_quotes(
            &INSURERS,
            &QuoteRequest {
                vehicle_value: 600_000.0,
                car_age: 2.0,
                city_tier: CityTier::Tier1,
                ncb_percent: 20.0,
                selected_addons: vec![],
            },
        )
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut compare = CompareSet::new();
        assert_eq!(compare.toggle("acko"), CompareToggle::Added);
        assert!(compare.contains("acko"));
        assert_eq!(compare.toggle("acko"), CompareToggle::Removed);
        assert!(!compare.contains("acko"));
    }

    #[test]
    fn fourth_quote_is_rejected_without_state_change() {
        let mut compare = CompareSet::new();
        compare.toggle("acko");
        compare.toggle("bajaj");
        compare.toggle("digit");

        assert_eq!(compare.toggle("hdfc"), CompareToggle::Full);
        assert_eq!(compare.ids(), ["acko", "bajaj", "digit"]);

        // Removing still works at capacity.
        assert_eq!(compare.toggle("bajaj"), CompareToggle::Removed);
        assert_eq!(compare.toggle("hdfc"), CompareToggle::Added);
    }

    #[test]
    fn selected_keeps_toggle_order_and_drops_unknown_ids() {
        let quotes = sample_quotes();
        let mut compare = CompareSet::new();
        compare.toggle("tata");
        compare.toggle("acko");
        compare.toggle("gone");

        let selected = compare.selected(&quotes);
        let ids: Vec<&str> = selected.iter().map(|q| q.quote_id.as_str()).collect();
        assert_eq!(ids, vec!["tata", "acko"]);
    }
}
