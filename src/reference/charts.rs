//! Built-in award, fee and retail tables.
//!
//! Flight rows are `[economy, premium, business, first]`, per passenger and per
//! one-way segment. `None` means the program publishes no price for that cabin.

use crate::types::ProgramKind::{self, Airline, Card, Hotel};

pub type Row = [Option<u32>; 4];

const fn row(economy: u32, premium: u32, business: u32, first: u32) -> Row {
    [Some(economy), Some(premium), Some(business), Some(first)]
}

const fn premium_only(business: u32, first: u32) -> Row {
    [None, None, Some(business), Some(first)]
}

pub(crate) const VIRGIN_ATLANTIC: &str = "Virgin Atlantic Flying Club";
pub(crate) const AMERICAN: &str = "American Airlines AAdvantage";
pub(crate) const UNITED: &str = "United MileagePlus";
pub(crate) const DELTA: &str = "Delta SkyMiles";
pub(crate) const ALASKA: &str = "Alaska Airlines Mileage Plan";
pub(crate) const BRITISH_AIRWAYS: &str = "British Airways Executive Club";
pub(crate) const AEROPLAN: &str = "Air Canada Aeroplan";
pub(crate) const ANA: &str = "ANA Mileage Club";
pub(crate) const KRISFLYER: &str = "Singapore KrisFlyer";
pub(crate) const FLYING_BLUE: &str = "Air France-KLM Flying Blue";
pub(crate) const EMIRATES: &str = "Emirates Skywards";
pub(crate) const ETIHAD: &str = "Etihad Guest";
pub(crate) const SOUTHWEST: &str = "Southwest Rapid Rewards";
pub(crate) const HYATT: &str = "World of Hyatt";
pub(crate) const MARRIOTT: &str = "Marriott Bonvoy";
pub(crate) const HILTON: &str = "Hilton Honors";
pub(crate) const IHG: &str = "IHG One Rewards";
pub(crate) const AMEX: &str = "American Express Membership Rewards";
pub(crate) const CHASE: &str = "Chase Ultimate Rewards";
pub(crate) const CITI: &str = "Citi ThankYou Rewards";
pub(crate) const CAPITAL_ONE: &str = "Capital One Miles";

pub(crate) const AVERAGE_CATEGORY: &str = "Average";

pub(crate) const FLIGHT_AWARDS: &[(&str, &str, &str, Row)] = &[
    (VIRGIN_ATLANTIC, "LHR", "HND", row(30_000, 55_000, 45_000, 60_000)),
    (VIRGIN_ATLANTIC, "HND", "LHR", row(30_000, 55_000, 45_000, 60_000)),
    (VIRGIN_ATLANTIC, "JFK", "LHR", row(15_000, 27_500, 47_500, 85_000)),
    (VIRGIN_ATLANTIC, "LHR", "JFK", row(20_000, 35_000, 57_500, 95_000)),
    (VIRGIN_ATLANTIC, "JFK", "HND", premium_only(45_000, 60_000)),
    (VIRGIN_ATLANTIC, "HND", "JFK", premium_only(45_000, 60_000)),
    (VIRGIN_ATLANTIC, "ORD", "HND", premium_only(47_500, 62_500)),
    (VIRGIN_ATLANTIC, "HND", "ORD", premium_only(47_500, 62_500)),
    (VIRGIN_ATLANTIC, "LAX", "HND", premium_only(45_000, 60_000)),
    (VIRGIN_ATLANTIC, "HND", "LAX", premium_only(45_000, 60_000)),
    (VIRGIN_ATLANTIC, "SFO", "NRT", premium_only(45_000, 60_000)),
    (VIRGIN_ATLANTIC, "NRT", "SFO", premium_only(45_000, 60_000)),
    (AMERICAN, "JFK", "LHR", row(30_000, 50_000, 57_500, 85_000)),
    (AMERICAN, "LHR", "JFK", row(30_000, 50_000, 57_500, 85_000)),
    (AMERICAN, "DFW", "HND", [Some(35_000), None, Some(60_000), Some(80_000)]),
    (AMERICAN, "HND", "DFW", [Some(35_000), None, Some(60_000), Some(80_000)]),
    (AMERICAN, "LAX", "HKG", [Some(35_000), None, Some(70_000), Some(110_000)]),
    (AMERICAN, "HKG", "LAX", [Some(35_000), None, Some(70_000), Some(110_000)]),
    (UNITED, "JFK", "FRA", row(30_000, 55_000, 70_000, 110_000)),
    (DELTA, "JFK", "CDG", [Some(30_000), Some(55_000), Some(85_000), None]),
    (ALASKA, "LAX", "HKG", [Some(30_000), None, Some(50_000), Some(70_000)]),
    (ALASKA, "HKG", "LAX", [Some(30_000), None, Some(50_000), Some(70_000)]),
    (ALASKA, "SFO", "HKG", [Some(30_000), None, Some(50_000), Some(70_000)]),
    (ALASKA, "HKG", "SFO", [Some(30_000), None, Some(50_000), Some(70_000)]),
    (ALASKA, "JFK", "HKG", [Some(30_000), None, Some(50_000), Some(70_000)]),
    (ALASKA, "HKG", "JFK", [Some(30_000), None, Some(50_000), Some(70_000)]),
    (ALASKA, "ORD", "HKG", [Some(30_000), None, Some(50_000), Some(70_000)]),
    (ALASKA, "HKG", "ORD", [Some(30_000), None, Some(50_000), Some(70_000)]),
];

pub(crate) const HOTEL_AWARDS: &[(&str, &str, u32)] = &[
    (HYATT, "Category 1", 5_000),
    (HYATT, "Category 2", 8_000),
    (HYATT, "Category 3", 12_000),
    (HYATT, "Category 4", 15_000),
    (HYATT, "Category 5", 20_000),
    (HYATT, "Category 6", 25_000),
    (HYATT, "Category 7", 30_000),
    (HYATT, "Category 8", 40_000),
    (MARRIOTT, AVERAGE_CATEGORY, 80_000),
];

pub(crate) const FLIGHT_FEES: &[(&str, &str, &str, Row)] = &[
    (VIRGIN_ATLANTIC, "LHR", "HND", row(200, 250, 300, 350)),
    (VIRGIN_ATLANTIC, "HND", "LHR", row(200, 250, 300, 350)),
    (VIRGIN_ATLANTIC, "JFK", "LHR", row(150, 200, 250, 300)),
    (VIRGIN_ATLANTIC, "LHR", "JFK", row(350, 450, 550, 650)),
    (VIRGIN_ATLANTIC, "JFK", "HND", row(50, 50, 50, 50)),
    (VIRGIN_ATLANTIC, "HND", "JFK", row(50, 50, 50, 50)),
    (AMERICAN, "JFK", "LHR", row(100, 150, 200, 250)),
    (AMERICAN, "LHR", "JFK", row(300, 400, 500, 600)),
    (AMERICAN, "LAX", "HKG", row(50, 50, 50, 50)),
    (AMERICAN, "HKG", "LAX", row(50, 50, 50, 50)),
    (UNITED, "JFK", "FRA", row(50, 100, 150, 800)),
    (ALASKA, "LAX", "HKG", row(50, 50, 50, 50)),
    (ALASKA, "HKG", "LAX", row(50, 50, 50, 50)),
];

pub(crate) const FLIGHT_RETAIL: &[(&str, &str, Row)] = &[
    ("LHR", "HND", row(1_500, 3_000, 6_200, 12_000)),
    ("JFK", "LHR", row(800, 1_500, 3_500, 7_000)),
    ("LHR", "JFK", row(800, 1_500, 3_500, 7_000)),
    ("JFK", "CDG", [Some(700), Some(1_400), Some(3_000), None]),
    ("JFK", "HND", row(1_000, 2_500, 5_000, 10_000)),
    ("LAX", "HKG", row(1_200, 2_800, 6_000, 10_000)),
    ("ORD", "HND", row(1_100, 2_600, 5_500, 11_000)),
];

pub(crate) const HOTEL_RETAIL: &[(&str, u32)] = &[
    ("Category 1", 100),
    ("Category 2", 150),
    ("Category 3", 200),
    ("Category 4", 250),
    ("Category 5", 350),
    ("Category 6", 500),
    ("Category 7", 700),
    ("Category 8", 1_000),
    (AVERAGE_CATEGORY, 400),
];

pub(crate) const BASE_FARES: &[(&str, [u32; 4])] = &[
    ("economy", [200, 500, 1_000, 1_500]),
    ("premium", [400, 900, 1_800, 2_800]),
    ("business", [800, 2_500, 4_500, 7_000]),
    ("first", [1_500, 4_500, 8_000, 12_000]),
];

pub(crate) const PROGRAM_PROFILES: &[(&str, ProgramKind, f64, f64, bool)] = &[
    (UNITED, Airline, 1.0, 1.0, false),
    (AMERICAN, Airline, 1.1, 1.0, false),
    (DELTA, Airline, 0.9, 1.0, false),
    (ALASKA, Airline, 1.3, 1.0, false),
    (BRITISH_AIRWAYS, Airline, 0.7, 4.0, false),
    (AEROPLAN, Airline, 1.2, 1.0, false),
    (ANA, Airline, 1.4, 1.0, false),
    (VIRGIN_ATLANTIC, Airline, 1.3, 3.0, false),
    (KRISFLYER, Airline, 1.2, 1.0, false),
    (FLYING_BLUE, Airline, 1.0, 1.0, false),
    (EMIRATES, Airline, 1.0, 1.0, false),
    (ETIHAD, Airline, 1.0, 1.0, false),
    (SOUTHWEST, Airline, 1.0, 1.0, false),
    (MARRIOTT, Hotel, 0.8, 1.0, true),
    (HILTON, Hotel, 0.5, 1.0, true),
    (HYATT, Hotel, 1.7, 1.0, false),
    (IHG, Hotel, 0.6, 1.0, true),
    (AMEX, Card, 1.1, 1.0, false),
    (CHASE, Card, 1.1, 1.0, false),
    (CITI, Card, 1.0, 1.0, false),
    (CAPITAL_ONE, Card, 1.0, 1.0, false),
];

pub(crate) const AIRPORT_SURCHARGES: &[(&str, f64)] = &[("LHR", 150.0)];
