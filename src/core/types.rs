use serde::{Deserialize, Serialize};

/// City tier for the tier-rate lookup. Anything that is not "1" or "2"
/// (including the documented "3") takes the tier-3 rate, so unknown values
/// deserialize into `Tier3` rather than failing.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub enum CityTier {
    #[serde(rename = "1")]
    Tier1,
    #[serde(rename = "2")]
    Tier2,
    #[default]
    #[serde(rename = "3", other)]
    Tier3,
}

impl CityTier {
    pub fn rate(self) -> f64 {
        match self {
            CityTier::Tier1 => 0.018,
            CityTier::Tier2 => 0.016,
            CityTier::Tier3 => 0.014,
        }
    }
}

/// Car details captured once per quoting session. All fields default so a
/// partially filled form still produces a total (if useless) quote.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteRequest {
    pub vehicle_value: f64,
    pub car_age: f64,
    pub city_tier: CityTier,
    pub ncb_percent: f64,
    pub selected_addons: Vec<String>,
}

/// Fixed-price optional cover.
#[derive(Copy, Clone, Debug)]
pub struct AddOn {
    pub key: &'static str,
    pub label: &'static str,
    pub price: i64,
}

/// One row of the static insurer table.
#[derive(Copy, Clone, Debug)]
pub struct InsurerRecord {
    pub id: &'static str,
    pub name: &'static str,
    pub plan_name: &'static str,
    pub claim_settlement_ratio: f64,
    pub cashless_garages: u32,
}

/// Result of the premium calculation. All money fields are rounded
/// integers; `idv` echoes the vehicle value as given.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumBreakdown {
    pub idv: f64,
    pub base_premium: i64,
    pub addons_total: i64,
    pub discount: i64,
    pub net_premium: i64,
    pub gst: i64,
    pub total_premium: i64,
}

/// An insurer record joined with its premium breakdown. `rank` is the
/// 1-based position by ascending total premium across the full unfiltered
/// quote set.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub quote_id: String,
    pub insurer_name: String,
    pub plan_name: String,
    pub claim_settlement_ratio: f64,
    pub cashless_garages: u32,
    #[serde(flatten)]
    pub premium: PremiumBreakdown,
    pub rank: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_tier_parses_known_values() {
        assert_eq!(
            serde_json::from_str::<CityTier>("\"1\"").unwrap(),
            CityTier::Tier1
        );
        assert_eq!(
            serde_json::from_str::<CityTier>("\"2\"").unwrap(),
            CityTier::Tier2
        );
        assert_eq!(
            serde_json::from_str::<CityTier>("\"3\"").unwrap(),
            CityTier::Tier3
        );
    }

    #[test]
    fn city_tier_falls_back_to_tier3_for_unknown_values() {
        assert_eq!(
            serde_json::from_str::<CityTier>("\"4\"").unwrap(),
            CityTier::Tier3
        );
        assert_eq!(
            serde_json::from_str::<CityTier>("\"metro\"").unwrap(),
            CityTier::Tier3
        );
    }

    #[test]
    fn quote_request_defaults_missing_fields_to_zero() {
        let request: QuoteRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.vehicle_value, 0.0);
        assert_eq!(request.car_age, 0.0);
        assert_eq!(request.city_tier, CityTier::Tier3);
        assert_eq!(request.ncb_percent, 0.0);
        assert!(request.selected_addons.is_empty());
    }

    #[test]
    fn quote_serializes_with_flattened_premium() {
        let quote = Quote {
            quote_id: "acko".to_string(),
            insurer_name: "Acko General".to_string(),
            plan_name: "Platinum Drive".to_string(),
            claim_settlement_ratio: 94.2,
            cashless_garages: 4300,
            premium: PremiumBreakdown {
                idv: 600000.0,
                base_premium: 11880,
                addons_total: 1200,
                discount: 2616,
                net_premium: 10464,
                gst: 1884,
                total_premium: 12348,
            },
            rank: 1,
        };
        let json = serde_json::to_string(&quote).unwrap();
        assert!(json.contains("\"quoteId\":\"acko\""));
        assert!(json.contains("\"totalPremium\":12348"));
        assert!(json.contains("\"claimSettlementRatio\":94.2"));
        assert!(!json.contains("\"premium\""));
    }
}
