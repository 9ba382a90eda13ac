pub mod heuristics;

use tracing::debug;

use crate::reference::geo::{inter_region_miles, intra_region_miles};
use crate::reference::{default_category, DistanceBand, ReferenceData, RouteKey};
use crate::types::{SearchType, TripRequest};
use crate::valuation::ValuationSettings;

#[derive(Debug, Clone, Copy)]
pub struct Estimator<'a> {
    reference: &'a ReferenceData,
    settings: &'a ValuationSettings,
}

impl<'a> Estimator<'a> {
    pub fn new(reference: &'a ReferenceData, settings: &'a ValuationSettings) -> Self {
        Self {
            reference,
            settings,
        }
    }

    pub fn reference(&self) -> &'a ReferenceData {
        self.reference
    }

    pub fn settings(&self) -> &'a ValuationSettings {
        self.settings
    }

    pub fn distance_miles(&self, origin: &str, destination: &str) -> u32 {
        let route = RouteKey::new(origin, destination);
        if let Some(miles) = self.reference.known_distance(&route) {
            return miles;
        }
        let from = self.reference.region_of(origin);
        let to = self.reference.region_of(destination);
        if from == to {
            intra_region_miles(from)
        } else {
            inter_region_miles(from, to)
        }
    }

    pub fn distance_band(&self, origin: &str, destination: &str) -> DistanceBand {
        DistanceBand::classify(self.distance_miles(origin, destination))
    }

    pub fn retail_value(&self, trip: &TripRequest) -> f64 {
        let travelers = f64::from(trip.passengers);
        match trip.search_type {
            SearchType::Hotel => {
                let category = trip
                    .hotel_category
                    .as_deref()
                    .unwrap_or_else(|| default_category(trip.cabin));
                let nightly = self.reference.hotel_retail(category).unwrap_or(0);
                (f64::from(nightly) * travelers * f64::from(trip.nights())).round()
            }
            SearchType::Flight => {
                let route = RouteKey::new(&trip.origin, &trip.destination);
                let per_traveler = match self.reference.flight_retail(&route, trip.cabin) {
                    Some(fare) => f64::from(fare),
                    None => {
                        let band = self.distance_band(&trip.origin, &trip.destination);
                        let base = self.reference.base_fare(trip.cabin, band).unwrap_or(0);
                        debug!(%route, cabin = %trip.cabin, ?band, "no retail fare on file; using distance estimate");
                        f64::from(base) * self.settings.seasonal_factor
                    }
                };
                let direction_factor = if trip.is_round_trip() {
                    self.settings.round_trip_price_factor
                } else {
                    1.0
                };
                (per_traveler * direction_factor * travelers).round()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::estimate::Estimator;
    use crate::reference::geo::Region;
    use crate::reference::{DistanceBand, ReferenceData};
    use crate::types::{Cabin, TripRequest};
    use crate::valuation::ValuationSettings;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).expect("valid date")
    }

    #[test]
    fn distance_prefers_known_pairs_then_regions() {
        let data = ReferenceData::builtin();
        let settings = ValuationSettings::default();
        let estimator = Estimator::new(&data, &settings);
        assert_eq!(estimator.distance_miles("LHR", "JFK"), 3451);
        assert_eq!(estimator.distance_miles("BOS", "MUC"), 4500);
        assert_eq!(estimator.distance_miles("SIN", "HKG"), 1500);
        assert_eq!(estimator.distance_miles("SYD", "MEL"), 500);
        assert_eq!(estimator.distance_miles("XXX", "YYY"), 500);
        assert_eq!(estimator.distance_band("JFK", "SIN"), DistanceBand::UltraLong);
    }

    #[test]
    fn retail_uses_table_fare_and_round_trip_factor() {
        let data = ReferenceData::builtin();
        let settings = ValuationSettings::default();
        let estimator = Estimator::new(&data, &settings);
        let trip = TripRequest::flight("LHR", "HND", date(4, 1), Cabin::Business)
            .with_return(date(4, 10));
        assert!((estimator.retail_value(&trip) - 11_160.0).abs() < 1e-9);
        let one_way = TripRequest::flight("HND", "LHR", date(4, 1), Cabin::Business)
            .with_passengers(2);
        assert!((estimator.retail_value(&one_way) - 12_400.0).abs() < 1e-9);
    }

    #[test]
    fn retail_falls_back_to_distance_band_with_seasonal_factor() {
        let data = ReferenceData::builtin().with_airport("AKL", Region::Oceania);
        let settings = ValuationSettings::default();
        let estimator = Estimator::new(&data, &settings);
        // LAX-AKL is North America to Oceania: 7500 miles, ultra-long.
        let trip = TripRequest::flight("LAX", "AKL", date(6, 1), Cabin::Economy);
        assert!((estimator.retail_value(&trip) - 1_800.0).abs() < 1e-9);
    }

    #[test]
    fn hotel_retail_scales_by_rooms_and_nights() {
        let data = ReferenceData::builtin();
        let settings = ValuationSettings::default();
        let estimator = Estimator::new(&data, &settings);
        let trip = TripRequest::hotel("Kyoto", date(5, 1), date(5, 8), Cabin::Luxury);
        assert!((estimator.retail_value(&trip) - 4_900.0).abs() < 1e-9);
        let named = trip.with_hotel_category("Category 2").with_passengers(2);
        assert!((estimator.retail_value(&named) - 2_100.0).abs() < 1e-9);
    }
}
