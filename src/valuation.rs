use serde::{Deserialize, Serialize};

use crate::types::{AdjustmentKind, AppliedAdjustment, RedemptionOption, ValueRating};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValuationSettings {
    #[serde(default = "default_sweet_spot_multiplier")]
    pub sweet_spot_multiplier: f64,
    #[serde(default = "default_round_trip_multiplier")]
    pub round_trip_multiplier: f64,
    #[serde(default = "default_instant_transfer_multiplier")]
    pub instant_transfer_multiplier: f64,
    #[serde(default = "default_seasonal_factor")]
    pub seasonal_factor: f64,
    #[serde(default = "default_round_trip_price_factor")]
    pub round_trip_price_factor: f64,
    #[serde(default = "default_min_value_cents_per_point")]
    pub min_value_cents_per_point: f64,
    #[serde(default = "default_max_fee_share")]
    pub max_fee_share_of_retail: f64,
    #[serde(default = "default_minimum_fee_per_segment")]
    pub minimum_fee_per_segment: f64,
    #[serde(default)]
    pub apply_fifth_night_free: bool,
}

impl Default for ValuationSettings {
    fn default() -> Self {
        Self {
            sweet_spot_multiplier: default_sweet_spot_multiplier(),
            round_trip_multiplier: default_round_trip_multiplier(),
            instant_transfer_multiplier: default_instant_transfer_multiplier(),
            seasonal_factor: default_seasonal_factor(),
            round_trip_price_factor: default_round_trip_price_factor(),
            min_value_cents_per_point: default_min_value_cents_per_point(),
            max_fee_share_of_retail: default_max_fee_share(),
            minimum_fee_per_segment: default_minimum_fee_per_segment(),
            apply_fifth_night_free: false,
        }
    }
}

fn default_sweet_spot_multiplier() -> f64 {
    1.2
}

fn default_round_trip_multiplier() -> f64 {
    1.05
}

fn default_instant_transfer_multiplier() -> f64 {
    1.05
}

fn default_seasonal_factor() -> f64 {
    1.2
}

fn default_round_trip_price_factor() -> f64 {
    1.8
}

fn default_min_value_cents_per_point() -> f64 {
    0.5
}

fn default_max_fee_share() -> f64 {
    0.5
}

fn default_minimum_fee_per_segment() -> f64 {
    25.0
}

pub const ADJUSTMENT_ORDER: [AdjustmentKind; 3] = [
    AdjustmentKind::SweetSpot,
    AdjustmentKind::RoundTrip,
    AdjustmentKind::InstantTransfer,
];

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Cents of value per point, rounded to a tenth. Non-positive net value is worth 0.
pub fn value_per_point(net_value: f64, points: f64) -> f64 {
    if !net_value.is_finite() || !points.is_finite() || points <= 0.0 || net_value <= 0.0 {
        return 0.0;
    }
    let cents = round_to_tenth(net_value / points * 100.0);
    if cents.is_finite() {
        cents
    } else {
        0.0
    }
}

pub fn cents_per_point(cash_value: f64, fees: f64, points: u64) -> Option<f64> {
    if points == 0 || !cash_value.is_finite() || !fees.is_finite() {
        return None;
    }
    Some(value_per_point(cash_value - fees, points as f64))
}

pub fn rate_value(cents_per_point: Option<f64>) -> ValueRating {
    match cents_per_point {
        Some(cpp) if cpp.is_finite() && cpp >= 2.5 => ValueRating::Excellent,
        Some(cpp) if cpp.is_finite() && cpp >= 1.5 => ValueRating::Great,
        Some(cpp) if cpp.is_finite() && cpp >= 1.0 => ValueRating::Good,
        Some(cpp) if cpp.is_finite() && cpp >= 0.6 => ValueRating::Average,
        Some(cpp) if cpp.is_finite() && cpp >= 0.0 => ValueRating::Poor,
        _ => ValueRating::Unknown,
    }
}

pub fn apply_valuation(option: &mut RedemptionOption, round_trip: bool, settings: &ValuationSettings) {
    let base = cents_per_point(option.cash_value, option.fees, option.points_spent());
    option.base_cents_per_point = base;
    option.adjustments.clear();

    let Some(mut value) = base else {
        option.cents_per_point = None;
        option.value_rating = ValueRating::Unknown;
        return;
    };

    for kind in ADJUSTMENT_ORDER {
        let multiplier = match kind {
            AdjustmentKind::SweetSpot if option.is_sweet_spot => settings.sweet_spot_multiplier,
            AdjustmentKind::RoundTrip if round_trip => settings.round_trip_multiplier,
            AdjustmentKind::InstantTransfer if option.is_instant_transfer() => {
                settings.instant_transfer_multiplier
            }
            _ => continue,
        };
        value *= multiplier;
        option
            .adjustments
            .push(AppliedAdjustment { kind, multiplier });
    }

    let adjusted = round_to_tenth(value);
    let adjusted = if adjusted.is_finite() && adjusted > 0.0 {
        adjusted
    } else {
        0.0
    };
    option.cents_per_point = Some(adjusted);
    option.value_rating = rate_value(Some(adjusted));
}

#[cfg(test)]
mod tests {
    use crate::types::{AdjustmentKind, ProgramKind, RedemptionOption, ValueRating};
    use crate::valuation::{
        apply_valuation, cents_per_point, rate_value, value_per_point, ValuationSettings,
    };

    #[test]
    fn value_is_never_negative() {
        assert_eq!(value_per_point(-250.0, 10_000.0), 0.0);
        assert_eq!(value_per_point(0.0, 10_000.0), 0.0);
        assert_eq!(cents_per_point(100.0, 400.0, 20_000), Some(0.0));
        assert!((value_per_point(1_000.0, 50_000.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn zero_points_carry_no_value() {
        assert_eq!(cents_per_point(1_000.0, 0.0, 0), None);
        assert_eq!(cents_per_point(f64::NAN, 0.0, 10), None);
        assert_eq!(value_per_point(100.0, f64::INFINITY), 0.0);
    }

    #[test]
    fn rating_buckets_have_inclusive_lower_bounds() {
        assert_eq!(rate_value(Some(0.0)), ValueRating::Poor);
        assert_eq!(rate_value(Some(0.59)), ValueRating::Poor);
        assert_eq!(rate_value(Some(0.6)), ValueRating::Average);
        assert_eq!(rate_value(Some(1.0)), ValueRating::Good);
        assert_eq!(rate_value(Some(1.5)), ValueRating::Great);
        assert_eq!(rate_value(Some(2.5)), ValueRating::Excellent);
        assert_eq!(rate_value(None), ValueRating::Unknown);
        assert_eq!(rate_value(Some(f64::NAN)), ValueRating::Unknown);
    }

    #[test]
    fn adjustments_stack_in_fixed_order() {
        let mut option = RedemptionOption::new("Virgin Atlantic Flying Club", ProgramKind::Airline)
            .with_cost(90_000, 600.0, 11_160.0)
            .with_transfer("Chase Ultimate Rewards", 1.0, "Instant");
        option.is_sweet_spot = true;
        apply_valuation(&mut option, true, &ValuationSettings::default());

        assert_eq!(option.base_cents_per_point, Some(11.7));
        let kinds: Vec<_> = option.adjustments.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AdjustmentKind::SweetSpot,
                AdjustmentKind::RoundTrip,
                AdjustmentKind::InstantTransfer
            ]
        );
        let expected = ((11.7_f64 * 1.2 * 1.05 * 1.05) * 10.0).round() / 10.0;
        assert_eq!(option.cents_per_point, Some(expected));
        assert_eq!(option.value_rating, ValueRating::Excellent);
    }

    #[test]
    fn transfers_are_valued_per_source_point() {
        let mut option = RedemptionOption::new("Alaska Airlines Mileage Plan", ProgramKind::Airline)
            .with_cost(50_000, 100.0, 3_100.0)
            .with_transfer("Marriott Bonvoy", 1.0 / 3.0, "2 days")
            .with_source_points(150_000);
        apply_valuation(&mut option, false, &ValuationSettings::default());
        assert_eq!(option.base_cents_per_point, Some(2.0));
        assert_eq!(option.cents_per_point, Some(2.0));
    }

    #[test]
    fn plain_one_way_direct_option_is_unadjusted() {
        let mut option = RedemptionOption::new("American Airlines AAdvantage", ProgramKind::Airline)
            .with_cost(30_000, 100.0, 800.0);
        apply_valuation(&mut option, false, &ValuationSettings::default());
        assert!(option.adjustments.is_empty());
        assert_eq!(option.cents_per_point, Some(2.3));
        assert_eq!(option.value_rating, ValueRating::Great);
    }
}
