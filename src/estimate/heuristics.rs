use tracing::debug;

use crate::estimate::Estimator;
use crate::reference::DistanceBand;
use crate::types::{Cabin, ProgramKind, SearchType, TripRequest};

pub fn base_cents_per_point(kind: ProgramKind, cabin: Cabin) -> f64 {
    match kind {
        ProgramKind::Airline => match cabin {
            Cabin::Economy => 1.2,
            Cabin::Premium => 1.5,
            Cabin::Business => 1.8,
            Cabin::First => 2.2,
            Cabin::Standard | Cabin::Luxury => 1.2,
        },
        ProgramKind::Hotel => match cabin.hotel_tier() {
            Cabin::Luxury => 1.1,
            Cabin::Premium => 0.9,
            _ => 0.7,
        },
        ProgramKind::Card => 1.7,
    }
}

fn base_fee_per_segment(band: DistanceBand) -> f64 {
    match band {
        DistanceBand::Short | DistanceBand::Medium => 20.0,
        DistanceBand::Long => 40.0,
        DistanceBand::UltraLong => 60.0,
    }
}

impl<'a> Estimator<'a> {
    pub fn heuristic_points(&self, program: &str, trip: &TripRequest, cash_value: f64) -> u64 {
        if !cash_value.is_finite() || cash_value <= 0.0 {
            return 0;
        }
        let profile = self.reference().profile(program);
        let mut cpp = base_cents_per_point(profile.kind, trip.effective_cabin()) * profile.value_multiplier;
        if !cpp.is_finite() || cpp <= 0.0 {
            cpp = 1.0;
        }
        let mut points = (cash_value * 100.0 / cpp).round();

        let floor_cpp = self.settings().min_value_cents_per_point;
        if floor_cpp > 0.0 {
            points = points.min((cash_value * 100.0 / floor_cpp).round());
        }
        debug!(program, cash_value, cpp, points, "estimated points from cash value");
        points.max(0.0) as u64
    }

    pub fn heuristic_fees(&self, program: &str, trip: &TripRequest, cash_value: f64) -> f64 {
        let travelers = f64::from(trip.passengers);
        let profile = self.reference().profile(program);
        let total = match trip.search_type {
            SearchType::Hotel => profile.hotel_fee_per_night * travelers * f64::from(trip.nights()),
            SearchType::Flight => {
                let band = self.distance_band(&trip.origin, &trip.destination);
                let surcharge = self
                    .reference()
                    .airport_surcharge(&trip.origin)
                    .max(self.reference().airport_surcharge(&trip.destination));
                (base_fee_per_segment(band) + surcharge)
                    * profile.fee_multiplier
                    * travelers
                    * f64::from(trip.segments())
            }
        };
        let cap = cash_value * self.settings().max_fee_share_of_retail;
        let capped = if cap.is_finite() && cap > 0.0 {
            total.min(cap)
        } else {
            total
        };
        if capped.is_finite() {
            capped.max(0.0).round()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::estimate::heuristics::base_cents_per_point;
    use crate::estimate::Estimator;
    use crate::reference::ReferenceData;
    use crate::types::{Cabin, ProgramKind, TripRequest};
    use crate::valuation::ValuationSettings;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).expect("valid date")
    }

    #[test]
    fn points_follow_program_multiplier() {
        let data = ReferenceData::builtin();
        let settings = ValuationSettings::default();
        let estimator = Estimator::new(&data, &settings);
        let trip = TripRequest::flight("JFK", "CDG", date(1), Cabin::Economy);
        // 1.2 base cpp x 0.9 for Delta.
        assert_eq!(estimator.heuristic_points("Delta SkyMiles", &trip, 1_080.0), 100_000);
        assert_eq!(estimator.heuristic_points("Delta SkyMiles", &trip, 0.0), 0);
    }

    #[test]
    fn points_never_imply_less_than_the_value_floor() {
        let data = ReferenceData::builtin();
        let settings = ValuationSettings::default();
        let estimator = Estimator::new(&data, &settings);
        let trip = TripRequest::hotel("Paris", date(1), date(2), Cabin::Standard);
        // Hilton standard is 0.7 x 0.5 = 0.35 cpp, so the 0.5 cpp ceiling applies.
        assert_eq!(estimator.heuristic_points("Hilton Honors", &trip, 400.0), 80_000);
    }

    #[test]
    fn fees_include_airport_surcharge_and_cap_at_half_retail() {
        let data = ReferenceData::builtin();
        let settings = ValuationSettings::default();
        let estimator = Estimator::new(&data, &settings);
        let trip = TripRequest::flight("LHR", "FRA", date(1), Cabin::Economy)
            .with_return(date(8));
        // (20 + 150) x 4.0 x 1 x 2 = 1360, capped at 50% of 1000.
        assert!((estimator.heuristic_fees("British Airways Executive Club", &trip, 1_000.0) - 500.0).abs() < 1e-9);
        assert!((estimator.heuristic_fees("British Airways Executive Club", &trip, 10_000.0) - 1_360.0).abs() < 1e-9);
    }

    #[test]
    fn base_value_depends_on_kind_and_cabin() {
        assert!((base_cents_per_point(ProgramKind::Airline, Cabin::First) - 2.2).abs() < 1e-9);
        assert!((base_cents_per_point(ProgramKind::Hotel, Cabin::Business) - 0.9).abs() < 1e-9);
        assert!((base_cents_per_point(ProgramKind::Card, Cabin::Economy) - 1.7).abs() < 1e-9);
    }
}
