use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::estimate::Estimator;
use crate::ranking::commentary::describe;
use crate::ranking::steps::booking_steps;
use crate::ranking::rank;
use crate::reference::ReferenceData;
use crate::resolver::AwardResolver;
use crate::sweet_spot::{annotate, matching_sweet_spots};
use crate::transfer::expand_transfers;
use crate::types::{Program, RedemptionOption, SearchOutcome, SearchType, TripRequest};
use crate::valuation::{apply_valuation, ValuationSettings};

pub const NO_PROGRAMS_MESSAGE: &str =
    "Please add your loyalty program accounts to see redemption options.";
pub const NO_BALANCE_MESSAGE: &str =
    "All of your loyalty accounts have a zero balance. Update your balances to see redemption options.";
pub const NO_OPTIONS_MESSAGE: &str =
    "No redemption options found. Add more programs or adjust your trip parameters.";
pub const SHORTFALL_MESSAGE: &str =
    "None of your balances cover this trip yet. The options below show how far off each one is.";

/// Stable digest of a search input. Identical trips and wallets hash equally.
pub fn fingerprint(trip: &TripRequest, programs: &[Program]) -> String {
    let canonical = serde_json::to_string(&(trip, programs)).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Clone)]
pub struct RedemptionEngine {
    reference: Arc<ReferenceData>,
    settings: ValuationSettings,
}

impl RedemptionEngine {
    pub fn new(reference: Arc<ReferenceData>, settings: ValuationSettings) -> Self {
        Self {
            reference,
            settings,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ReferenceData::shared(), ValuationSettings::default())
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn settings(&self) -> &ValuationSettings {
        &self.settings
    }

    pub fn estimator(&self) -> Estimator<'_> {
        Estimator::new(&self.reference, &self.settings)
    }

    pub fn search(&self, trip: &TripRequest, programs: &[Program]) -> SearchOutcome {
        let fingerprint = fingerprint(trip, programs);
        if programs.is_empty() {
            return SearchOutcome::empty(NO_PROGRAMS_MESSAGE, fingerprint);
        }
        if let Err(err) = trip.validate() {
            return SearchOutcome::empty(err.to_string(), fingerprint);
        }
        let funded: Vec<&Program> = programs.iter().filter(|p| p.balance > 0).collect();
        if funded.is_empty() {
            return SearchOutcome::empty(NO_BALANCE_MESSAGE, fingerprint);
        }

        let estimator = self.estimator();
        let resolver = AwardResolver::new(estimator);
        let cash_value = estimator.retail_value(trip);

        let mut candidates = Vec::new();
        for program in funded {
            if let Some(option) = self.direct_option(&resolver, program, trip, cash_value) {
                candidates.push(option);
            }
            candidates.extend(expand_transfers(&resolver, program, trip, cash_value));
        }

        let spots = matching_sweet_spots(&self.reference, trip);
        for spot in &spots {
            let flagged = annotate(&mut candidates, spot);
            debug!(spot = %spot.id, flagged, "sweet spot matched");
        }
        let round_trip = trip.search_type == SearchType::Flight && trip.is_round_trip();
        for option in &mut candidates {
            apply_valuation(option, round_trip, &self.settings);
        }

        let mut ranking = rank(candidates);
        describe(&mut ranking, &trip.preferences);
        if let Some(best) = ranking.best.as_mut() {
            let steps = booking_steps(best, trip);
            best.booking_steps = steps;
        }

        let message = match &ranking.best {
            None => Some(NO_OPTIONS_MESSAGE.to_string()),
            Some(best) if !best.has_enough_points => Some(SHORTFALL_MESSAGE.to_string()),
            Some(_) => None,
        };
        SearchOutcome {
            best: ranking.best,
            alternatives: ranking.alternatives,
            message,
            sweet_spots: spots.iter().map(|spot| spot.id.clone()).collect(),
            retail_value: Some(cash_value).filter(|v| v.is_finite() && *v > 0.0),
            fingerprint,
        }
    }

    fn direct_option(
        &self,
        resolver: &AwardResolver<'_>,
        program: &Program,
        trip: &TripRequest,
        cash_value: f64,
    ) -> Option<RedemptionOption> {
        if !program.kind.serves(trip.search_type) {
            return None;
        }
        let quote = resolver.resolve(&program.name, trip);
        let Some(points) = quote.points else {
            debug!(program = %program.name, "no direct price; skipping");
            return None;
        };
        let mut option = RedemptionOption::new(&program.name, program.kind)
            .with_cost(points, quote.fees, cash_value)
            .with_balance(program.balance)
            .with_source(quote.source);
        option.notes.extend(quote.notes);
        Some(option)
    }
}
