use super::types::{AddOn, InsurerRecord};

/// Optional covers offered on every plan. Keys are the wire identifiers
/// used in `QuoteRequest::selected_addons`.
pub const ADDONS: [AddOn; 4] = [
    AddOn {
        key: "zeroDep",
        label: "Zero Depreciation",
        price: 1200,
    },
    AddOn {
        key: "rsa",
        label: "Roadside Assistance (RSA)",
        price: 350,
    },
    AddOn {
        key: "engineProtect",
        label: "Engine Protect",
        price: 650,
    },
    AddOn {
        key: "consumables",
        label: "Consumables Cover",
        price: 400,
    },
];

/// The insurer table. Insertion order is the default iteration order and
/// breaks premium ties when ranking.
pub const INSURERS: [InsurerRecord; 6] = [
    InsurerRecord {
        id: "acko",
        name: "Acko General",
        plan_name: "Platinum Drive",
        claim_settlement_ratio: 94.2,
        cashless_garages: 4300,
    },
    InsurerRecord {
        id: "bajaj",
        name: "Bajaj Allianz",
        plan_name: "DriveAssure Premier",
        claim_settlement_ratio: 96.4,
        cashless_garages: 6500,
    },
    InsurerRecord {
        id: "digit",
        name: "Go Digit",
        plan_name: "Comprehensive Shield",
        claim_settlement_ratio: 93.6,
        cashless_garages: 6000,
    },
    InsurerRecord {
        id: "hdfc",
        name: "HDFC ERGO",
        plan_name: "Motor Secure Plus",
        claim_settlement_ratio: 98.1,
        cashless_garages: 8700,
    },
    InsurerRecord {
        id: "icici",
        name: "ICICI Lombard",
        plan_name: "Smart Drive",
        claim_settlement_ratio: 97.3,
        cashless_garages: 9200,
    },
    InsurerRecord {
        id: "tata",
        name: "Tata AIG",
        plan_name: "Auto Secure Supreme",
        claim_settlement_ratio: 94.8,
        cashless_garages: 7500,
    },
];

/// Catalog price for an add-on key; unknown keys price at 0.
pub fn addon_price(key: &str) -> i64 {
    ADDONS
        .iter()
        .find(|addon| addon.key == key)
        .map(|addon| addon.price)
        .unwrap_or(0)
}
