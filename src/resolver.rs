use serde::Serialize;
use tracing::debug;

use crate::estimate::Estimator;
use crate::reference::{default_category, ReferenceData, RouteKey};
use crate::types::{EstimateSource, SearchType, TripRequest};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AwardQuote {
    pub points: Option<u64>,
    pub fees: f64,
    pub source: EstimateSource,
    pub notes: Vec<String>,
}

impl AwardQuote {
    fn chart(points: u64, fees: f64) -> Self {
        Self {
            points: Some(points),
            fees,
            source: EstimateSource::AwardChart,
            notes: Vec::new(),
        }
    }

    fn heuristic(points: u64, fees: f64, note: String) -> Self {
        Self {
            points: (points > 0).then_some(points),
            fees,
            source: EstimateSource::Heuristic,
            notes: vec![note],
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AwardResolver<'a> {
    estimator: Estimator<'a>,
}

impl<'a> AwardResolver<'a> {
    pub fn new(estimator: Estimator<'a>) -> Self {
        Self { estimator }
    }

    pub fn estimator(&self) -> Estimator<'a> {
        self.estimator
    }

    pub fn reference(&self) -> &'a ReferenceData {
        self.estimator.reference()
    }

    pub fn resolve(&self, program: &str, trip: &TripRequest) -> AwardQuote {
        match trip.search_type {
            SearchType::Flight => self.resolve_flight(program, trip),
            SearchType::Hotel => self.resolve_hotel(program, trip),
        }
    }

    fn resolve_flight(&self, program: &str, trip: &TripRequest) -> AwardQuote {
        let reference = self.estimator.reference();
        let travelers = u64::from(trip.passengers);
        let outbound = RouteKey::new(&trip.origin, &trip.destination);
        let mut legs = vec![outbound.clone()];
        if trip.is_round_trip() {
            legs.push(outbound.reversed());
        }

        let mut points = 0_u64;
        for leg in &legs {
            let per_traveler = reference
                .flight_award(program, leg, trip.cabin)
                .or_else(|| reference.flight_award(program, &leg.reversed(), trip.cabin));
            let Some(per_traveler) = per_traveler else {
                let cash = self.estimator.retail_value(trip);
                debug!(program, route = %leg, cabin = %trip.cabin, "award chart miss; estimating");
                return AwardQuote::heuristic(
                    self.estimator.heuristic_points(program, trip, cash),
                    self.estimator.heuristic_fees(program, trip, cash),
                    format!(
                        "Estimated: no published {} award price for {outbound}",
                        trip.cabin
                    ),
                );
            };
            points = points.saturating_add(u64::from(per_traveler).saturating_mul(travelers));
        }

        let mut fees = 0.0;
        let mut estimated = false;
        for leg in &legs {
            let charted = reference
                .flight_fee(program, leg, trip.cabin)
                .or_else(|| reference.flight_fee(program, &leg.reversed(), trip.cabin))
                .filter(|fee| *fee > 0);
            match charted {
                Some(per_traveler) => fees += f64::from(per_traveler) * travelers as f64,
                None => {
                    debug!(program, route = %leg, "no fee on file for leg; estimating");
                    fees += self.estimated_leg_fee(program, trip);
                    estimated = true;
                }
            }
        }

        let mut quote = AwardQuote::chart(points, fees.round());
        if estimated {
            quote.notes.push("Taxes and fees estimated".to_string());
        }
        quote
    }

    // Per-segment share of the fee heuristic, floored at the configured minimum.
    fn estimated_leg_fee(&self, program: &str, trip: &TripRequest) -> f64 {
        let cash = self.estimator.retail_value(trip);
        let per_leg = self.estimator.heuristic_fees(program, trip, cash) / f64::from(trip.segments());
        if per_leg > 0.0 {
            per_leg
        } else if cash > 0.0 {
            self.estimator.settings().minimum_fee_per_segment * f64::from(trip.passengers)
        } else {
            0.0
        }
    }

    fn resolve_hotel(&self, program: &str, trip: &TripRequest) -> AwardQuote {
        let reference = self.estimator.reference();
        let settings = self.estimator.settings();
        let rooms = u64::from(trip.passengers);
        let nights = trip.nights();
        let category = trip
            .hotel_category
            .as_deref()
            .unwrap_or_else(|| default_category(trip.cabin));
        let profile = reference.profile(program);

        let Some(per_night) = reference.hotel_award(program, category) else {
            let cash = self.estimator.retail_value(trip);
            debug!(program, category, "hotel chart miss; estimating");
            return AwardQuote::heuristic(
                self.estimator.heuristic_points(program, trip, cash),
                self.estimator.heuristic_fees(program, trip, cash),
                format!("Estimated: no published {category} award rate"),
            );
        };

        let free_nights = if profile.fifth_night_free { nights / 5 } else { 0 };
        let payable_nights = if settings.apply_fifth_night_free {
            nights - free_nights
        } else {
            nights
        };
        let points = u64::from(per_night)
            .saturating_mul(rooms)
            .saturating_mul(u64::from(payable_nights));
        let fees = (profile.hotel_fee_per_night * rooms as f64 * f64::from(nights)).round();

        let mut quote = AwardQuote::chart(points, fees);
        if free_nights > 0 {
            let note = if settings.apply_fifth_night_free {
                format!("Every 5th award night free: {payable_nights} of {nights} nights charged")
            } else {
                format!("Eligible for {free_nights} free night(s) on award stays of 5+ nights")
            };
            quote.notes.push(note);
        }
        quote
    }
}
