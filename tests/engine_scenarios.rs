use chrono::NaiveDate;
use redemption_oracle::engine::{RedemptionEngine, NO_PROGRAMS_MESSAGE, SHORTFALL_MESSAGE};
use redemption_oracle::estimate::Estimator;
use redemption_oracle::reference::ReferenceData;
use redemption_oracle::resolver::AwardResolver;
use redemption_oracle::types::{
    AdjustmentKind, Cabin, EstimateSource, Program, ProgramKind, RedemptionOption, TripRequest,
};
use redemption_oracle::valuation::ValuationSettings;

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).expect("valid date")
}

fn ranked(outcome: &redemption_oracle::types::SearchOutcome) -> Vec<&RedemptionOption> {
    outcome.options().collect()
}

#[test]
fn chase_points_reach_the_ana_sweet_spot_through_virgin_atlantic() {
    let engine = RedemptionEngine::with_defaults();
    let trip = TripRequest::flight("LHR", "HND", date(4, 1), Cabin::Business).with_return(date(4, 10));
    let wallet = [Program::new("Chase Ultimate Rewards", ProgramKind::Card, 100_000)];

    let outcome = engine.search(&trip, &wallet);
    let best = outcome.best.as_ref().expect("best option");
    assert_eq!(best.program, "Virgin Atlantic Flying Club");
    assert_eq!(best.transfer_from.as_deref(), Some("Chase Ultimate Rewards"));
    assert_eq!(best.points_required, 90_000);
    assert!(best.is_sweet_spot);
    assert!(best.has_enough_points);
    assert!(outcome.message.is_none());
    assert!(outcome.sweet_spots.contains(&"ANA_PREMIUM_VS".to_string()));
    assert!(!best.booking_steps.is_empty());
}

#[test]
fn unaffordable_direct_option_is_kept_and_explained() {
    let engine = RedemptionEngine::with_defaults();
    let trip = TripRequest::flight("JFK", "LHR", date(3, 1), Cabin::Economy);
    let wallet = [Program::new("American Airlines AAdvantage", ProgramKind::Airline, 10_000)];

    let outcome = engine.search(&trip, &wallet);
    let best = outcome.best.as_ref().expect("sole option is still ranked");
    assert_eq!(best.program, "American Airlines AAdvantage");
    assert_eq!(best.points_required, 30_000);
    assert!(!best.has_enough_points);
    assert!(best
        .cons
        .iter()
        .any(|con| con.starts_with("Not enough points")));
    assert_eq!(outcome.message.as_deref(), Some(SHORTFALL_MESSAGE));
}

#[test]
fn empty_wallet_yields_explained_empty_result() {
    let engine = RedemptionEngine::with_defaults();
    let trip = TripRequest::flight("JFK", "LHR", date(3, 1), Cabin::Economy);

    let outcome = engine.search(&trip, &[]);
    assert!(outcome.best.is_none());
    assert!(outcome.alternatives.is_empty());
    assert_eq!(outcome.message.as_deref(), Some(NO_PROGRAMS_MESSAGE));
}

#[test]
fn unknown_program_and_route_fall_back_to_estimates() {
    let data = ReferenceData::builtin();
    let settings = ValuationSettings::default();
    let resolver = AwardResolver::new(Estimator::new(&data, &settings));
    let trip = TripRequest::flight("BOS", "IST", date(6, 2), Cabin::Business);

    let quote = resolver.resolve("Turkish Miles&Smiles", &trip);
    assert_eq!(quote.source, EstimateSource::Heuristic);
    assert!(quote.points.is_some_and(|points| points > 0));
    assert!(quote.fees.is_finite() && quote.fees >= 0.0);
}

#[test]
fn hyatt_stay_prices_per_night_without_sweet_spot_bonus() {
    let engine = RedemptionEngine::with_defaults();
    let trip = TripRequest::hotel("Tokyo", date(5, 1), date(5, 8), Cabin::Standard);
    let wallet = [Program::new("World of Hyatt", ProgramKind::Hotel, 200_000)];

    let outcome = engine.search(&trip, &wallet);
    let best = outcome.best.as_ref().expect("hyatt option");
    assert_eq!(best.program, "World of Hyatt");
    assert_eq!(best.points_required, 15_000 * 7);
    assert!(best.has_enough_points);
    assert!(!best.is_sweet_spot);
    assert!(best.adjustments.is_empty());
    let cpp = best.cents_per_point.expect("valued");
    assert!((cpp - 1.7).abs() < 1e-9);
}

#[test]
fn hyatt_luxury_via_chase_earns_the_sweet_spot_bonus() {
    let engine = RedemptionEngine::with_defaults();
    let trip = TripRequest::hotel("Paris", date(9, 10), date(9, 13), Cabin::Luxury);
    let wallet = [Program::new("Chase Ultimate Rewards", ProgramKind::Card, 150_000)];

    let outcome = engine.search(&trip, &wallet);
    let hyatt = outcome
        .options()
        .find(|option| option.program == "World of Hyatt")
        .expect("hyatt transfer option");
    assert_eq!(hyatt.points_required, 30_000 * 3);
    assert!(hyatt.is_sweet_spot);
    let kinds: Vec<AdjustmentKind> = hyatt.adjustments.iter().map(|a| a.kind).collect();
    assert!(kinds.contains(&AdjustmentKind::SweetSpot));
    assert!(!kinds.contains(&AdjustmentKind::RoundTrip));
}

#[test]
fn ranking_puts_affordable_options_first_in_value_order() {
    let engine = RedemptionEngine::with_defaults();
    let trip = TripRequest::flight("JFK", "LHR", date(3, 1), Cabin::Economy).with_return(date(3, 9));
    let wallet = [
        Program::new("American Airlines AAdvantage", ProgramKind::Airline, 20_000),
        Program::new("Chase Ultimate Rewards", ProgramKind::Card, 100_000),
    ];

    let outcome = engine.search(&trip, &wallet);
    let options = ranked(&outcome);
    assert!(options.iter().any(|o| o.has_enough_points));
    assert!(options.iter().any(|o| !o.has_enough_points));

    let first_short = options
        .iter()
        .position(|o| !o.has_enough_points)
        .expect("unaffordable option");
    assert!(options[first_short..].iter().all(|o| !o.has_enough_points));

    for group in [&options[..first_short], &options[first_short..]] {
        for pair in group.windows(2) {
            assert!(pair[0].cpp_or_zero() >= pair[1].cpp_or_zero());
        }
    }
}

#[test]
fn transfer_affordability_ignores_partner_balance() {
    let engine = RedemptionEngine::with_defaults();
    let trip = TripRequest::flight("LHR", "HND", date(4, 1), Cabin::Business).with_return(date(4, 10));
    let wallet = [
        Program::new("Chase Ultimate Rewards", ProgramKind::Card, 90_000),
        Program::new("Virgin Atlantic Flying Club", ProgramKind::Airline, 0),
    ];

    let outcome = engine.search(&trip, &wallet);
    let transfer = outcome
        .options()
        .find(|o| o.program == "Virgin Atlantic Flying Club")
        .expect("transfer option");
    assert_eq!(transfer.source_points, Some(90_000));
    assert_eq!(transfer.user_balance, 90_000);
    assert!(transfer.has_enough_points);
}

#[test]
fn uneven_transfer_is_valued_on_the_card_points_spent() {
    let engine = RedemptionEngine::with_defaults();
    let trip = TripRequest::flight("LAX", "HKG", date(6, 1), Cabin::Business);
    let wallet = [
        Program::new("Marriott Bonvoy", ProgramKind::Hotel, 150_000),
        Program::new("Alaska Airlines Mileage Plan", ProgramKind::Airline, 50_000),
    ];

    let outcome = engine.search(&trip, &wallet);
    let best = outcome.best.as_ref().expect("best option");
    assert_eq!(best.program, "Alaska Airlines Mileage Plan");
    assert!(best.transfer_from.is_none());

    let transfer = outcome
        .options()
        .find(|o| o.transfer_from.as_deref() == Some("Marriott Bonvoy"))
        .expect("marriott transfer option");
    assert_eq!(transfer.points_required, 50_000);
    assert_eq!(transfer.points_spent(), 150_000);
    let direct_base = best.base_cents_per_point.expect("direct valued");
    let transfer_base = transfer.base_cents_per_point.expect("transfer valued");
    assert!(transfer_base < direct_base);
    assert!((transfer_base * 3.0 - direct_base).abs() <= 0.3);
    assert!(transfer.cpp_or_zero() < best.cpp_or_zero());
}

#[test]
fn same_day_return_is_one_way() {
    let trip = TripRequest::flight("JFK", "LHR", date(3, 1), Cabin::Economy).with_return(date(3, 1));
    assert!(!trip.is_round_trip());
    assert!(trip.clone().with_return(date(3, 2)).is_round_trip());
}

#[test]
fn identical_searches_produce_identical_output() {
    let engine = RedemptionEngine::with_defaults();
    let trip = TripRequest::flight("JFK", "HND", date(7, 1), Cabin::Business).with_return(date(7, 15));
    let wallet = [
        Program::new("Amex Membership Rewards", ProgramKind::Card, 250_000),
        Program::new("Alaska Airlines Mileage Plan", ProgramKind::Airline, 70_000),
    ];

    let first = engine.search(&trip, &wallet);
    let second = engine.search(&trip, &wallet);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("json"),
        serde_json::to_string(&second).expect("json")
    );
}
