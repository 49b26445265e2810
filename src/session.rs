//! Explicit session context for the quoting flow.
//!
//! The car-detail form and the selected quote survive page transitions as
//! JSON under well-known keys. A missing or malformed value always loads as
//! `None`, which callers treat as "no session" and answer with a redirect
//! to the entry flow. Nothing here outlives the process.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::{Quote, QuoteRequest};

pub const FORM_KEY: &str = "quoteForm";
pub const SELECTED_KEY: &str = "selectedQuote";

#[derive(Debug, Default)]
pub struct Session {
    entries: HashMap<String, String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_form(&mut self, form: &QuoteRequest) {
        self.put(FORM_KEY, form);
    }

    pub fn load_form(&self) -> Option<QuoteRequest> {
        self.get(FORM_KEY)
    }

    pub fn save_selected(&mut self, quote: &Quote) {
        self.put(SELECTED_KEY, quote);
    }

    pub fn load_selected(&self) -> Option<Quote> {
        self.get(SELECTED_KEY)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Stores a raw JSON string under a key, bypassing serialization. Lets
    /// callers seed a session from an untrusted source; loads still go
    /// through the malformed-value handling.
    pub fn put_raw(&mut self, key: &str, json: &str) {
        self.entries.insert(key.to_string(), json.to_string());
    }

    fn put<T: Serialize>(&mut self, key: &str, value: &T) {
        if let Ok(json) = serde_json::to_string(value) {
            self.entries.insert(key.to_string(), json);
        }
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.entries
            .get(key)
            .and_then(|json| serde_json::from_str(json).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::INSURERS;
    use crate::core::{CityTier, assemble_quotes};

    fn sample_form() -> QuoteRequest {
        QuoteRequest {
            vehicle_value: 600_000.0,
            car_age: 2.0,
            city_tier: CityTier::Tier1,
            ncb_percent: 20.0,
            selected_addons: vec!["zeroDep".to_string()],
        }
    }

    #[test]
    fn form_round_trips_through_the_session() {
        let mut session = Session::new();
        session.save_form(&sample_form());
        assert_eq!(session.load_form(), Some(sample_form()));
    }

    #[test]
    fn selected_quote_round_trips_through_the_session() {
        let quotes = assemble_quotes(&INSURERS, &sample_form());
        let mut session = Session::new();
        session.save_selected(&quotes[3]);
        assert_eq!(session.load_selected(), Some(quotes[3].clone()));
    }

    #[test]
    fn absent_keys_load_as_no_session() {
        let session = Session::new();
        assert!(session.load_form().is_none());
        assert!(session.load_selected().is_none());
    }

    #[test]
    fn malformed_json_loads_as_no_session() {
        let mut session = Session::new();
        session.put_raw(FORM_KEY, "{not json");
        session.put_raw(SELECTED_KEY, "[]");
        assert!(session.load_form().is_none());
        assert!(session.load_selected().is_none());
    }

    #[test]
    fn clear_drops_every_key() {
        let mut session = Session::new();
        session.save_form(&sample_form());
        session.clear();
        assert!(session.load_form().is_none());
    }
}
