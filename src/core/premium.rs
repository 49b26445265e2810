use super::catalog::addon_price;
use super::types::{PremiumBreakdown, QuoteRequest};

/// Round-half-away-from-zero. The half-rounding policy moves results by
/// one unit near exact halves, so every money figure goes through this one
/// function.
fn round_money(value: f64) -> i64 {
    value.round() as i64
}

fn coerce(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Age bands are inclusive on the lower bound: ages exactly 1, 3, and 5
/// take the cheaper multiplier.
fn age_multiplier(car_age: f64) -> f64 {
    if car_age <= 1.0 {
        1.0
    } else if car_age <= 3.0 {
        1.1
    } else if car_age <= 5.0 {
        1.2
    } else {
        1.35
    }
}

/// Computes the full premium breakdown for one request. Pure and total:
/// there are no failure conditions, non-finite numerics coerce to 0, and
/// unknown add-on keys price at 0. The net premium is deliberately not
/// clamped, so a pathological NCB above 100 produces a negative result.
pub fn calculate_premium(request: &QuoteRequest) -> PremiumBreakdown {
    let idv = coerce(request.vehicle_value);

    let tier_rate = request.city_tier.rate();
    let base_premium = round_money(idv * tier_rate * age_multiplier(coerce(request.car_age)));

    let addons_total: i64 = request
        .selected_addons
        .iter()
        .map(|key| addon_price(key))
        .sum();

    let discount = round_money((base_premium + addons_total) as f64 * coerce(request.ncb_percent) / 100.0);
    let net_premium = base_premium + addons_total - discount;
    let gst = round_money(net_premium as f64 * 0.18);
    let total_premium = net_premium + gst;

    PremiumBreakdown {
        idv,
        base_premium,
        addons_total,
        discount,
        net_premium,
        gst,
        total_premium,
    }
}
