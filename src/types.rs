use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reference::sweet_spots::SweetSpot;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ProgramKind {
    Airline,
    Hotel,
    Card,
}

const AIRLINE_NAME_HINTS: [&str; 8] = [
    "Airlines", "Airways", "Flying", "Miles", "Mileage", "Sky", "Aeroplan", "KrisFlyer",
];
const HOTEL_NAME_HINTS: [&str; 4] = ["Hyatt", "Marriott", "Hilton", "IHG"];

impl ProgramKind {
    pub const ALL: [ProgramKind; 3] = [ProgramKind::Airline, ProgramKind::Hotel, ProgramKind::Card];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Airline => "airline",
            Self::Hotel => "hotel",
            Self::Card => "card",
        }
    }

    pub fn infer(name: &str) -> Self {
        // "Capital One Miles" is a card currency despite the "Miles" suffix.
        if name.starts_with("Capital One") {
            return Self::Card;
        }
        if HOTEL_NAME_HINTS.iter().any(|hint| name.contains(hint)) {
            return Self::Hotel;
        }
        if AIRLINE_NAME_HINTS.iter().any(|hint| name.contains(hint)) {
            return Self::Airline;
        }
        Self::Card
    }

    pub fn serves(&self, search: SearchType) -> bool {
        matches!(
            (self, search),
            (Self::Airline, SearchType::Flight) | (Self::Hotel, SearchType::Hotel)
        )
    }
}

impl Display for ProgramKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

#[derive(Debug, Error)]
#[error("unknown program type: {0}")]
pub struct ProgramKindParseError(pub String);

impl FromStr for ProgramKind {
    type Err = ProgramKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "airline" | "air" => Ok(Self::Airline),
            "hotel" => Ok(Self::Hotel),
            "card" | "credit_card" | "bank" => Ok(Self::Card),
            _ => Err(ProgramKindParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum Cabin {
    #[default]
    Economy,
    Premium,
    Business,
    First,
    Standard,
    Luxury,
}

impl Cabin {
    pub const FLIGHT: [Cabin; 4] = [Cabin::Economy, Cabin::Premium, Cabin::Business, Cabin::First];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::Premium => "premium",
            Self::Business => "business",
            Self::First => "first",
            Self::Standard => "standard",
            Self::Luxury => "luxury",
        }
    }

    pub fn is_flight_cabin(&self) -> bool {
        Self::FLIGHT.contains(self)
    }

    pub fn hotel_tier(&self) -> Cabin {
        match self {
            Self::Economy | Self::Standard => Self::Standard,
            Self::Premium | Self::Business => Self::Premium,
            Self::First | Self::Luxury => Self::Luxury,
        }
    }

    pub fn rate_index(&self) -> Option<usize> {
        match self {
            Self::Economy => Some(0),
            Self::Premium => Some(1),
            Self::Business => Some(2),
            Self::First => Some(3),
            Self::Standard | Self::Luxury => None,
        }
    }
}

impl Display for Cabin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

#[derive(Debug, Error)]
#[error("unknown cabin: {0}")]
pub struct CabinParseError(pub String);

impl FromStr for Cabin {
    type Err = CabinParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "economy" | "coach" => Ok(Self::Economy),
            "premium" | "premium_economy" | "premium-economy" => Ok(Self::Premium),
            "business" => Ok(Self::Business),
            "first" => Ok(Self::First),
            "standard" => Ok(Self::Standard),
            "luxury" => Ok(Self::Luxury),
            _ => Err(CabinParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    #[default]
    Flight,
    Hotel,
}

impl Display for SearchType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flight => write!(f, "flight"),
            Self::Hotel => write!(f, "hotel"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Program {
    pub name: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: ProgramKind,
    pub balance: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<NaiveDate>,
}

impl Program {
    pub fn new(name: impl Into<String>, kind: ProgramKind, balance: u64) -> Self {
        Self {
            name: name.into(),
            kind,
            balance,
            expiry: None,
        }
    }

    pub fn with_expiry(mut self, expiry: NaiveDate) -> Self {
        self.expiry = Some(expiry);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserPreferences {
    #[serde(default, alias = "directOnly")]
    pub direct_only: bool,
    #[serde(default, alias = "preferredAirlines")]
    pub preferred_airlines: Vec<String>,
    #[serde(default, alias = "avoidedAirlines")]
    pub avoided_airlines: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
}

impl UserPreferences {
    pub fn prefers(&self, program: &str) -> bool {
        name_listed(&self.preferred_airlines, program)
    }

    pub fn avoids(&self, program: &str) -> bool {
        name_listed(&self.avoided_airlines, program)
    }
}

fn name_listed(list: &[String], program: &str) -> bool {
    let program = program.to_ascii_lowercase();
    list.iter()
        .map(|entry| entry.trim().to_ascii_lowercase())
        .any(|entry| !entry.is_empty() && program.contains(&entry))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripRequest {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default, alias = "departDate")]
    pub depart_date: Option<NaiveDate>,
    #[serde(default, alias = "returnDate")]
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub cabin: Cabin,
    #[serde(default, alias = "hotelCategory", skip_serializing_if = "Option::is_none")]
    pub hotel_category: Option<String>,
    #[serde(default = "default_passengers")]
    pub passengers: u32,
    #[serde(default, alias = "searchType")]
    pub search_type: SearchType,
    #[serde(default, alias = "userPreferences")]
    pub preferences: UserPreferences,
}

fn default_passengers() -> u32 {
    1
}

impl TripRequest {
    pub fn flight(origin: &str, destination: &str, depart_date: NaiveDate, cabin: Cabin) -> Self {
        Self {
            origin: origin.to_ascii_uppercase(),
            destination: destination.to_ascii_uppercase(),
            depart_date: Some(depart_date),
            return_date: None,
            cabin,
            hotel_category: None,
            passengers: 1,
            search_type: SearchType::Flight,
            preferences: UserPreferences::default(),
        }
    }

    pub fn hotel(
        destination: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
        tier: Cabin,
    ) -> Self {
        Self {
            origin: String::new(),
            destination: destination.to_string(),
            depart_date: Some(check_in),
            return_date: Some(check_out),
            cabin: tier,
            hotel_category: None,
            passengers: 1,
            search_type: SearchType::Hotel,
            preferences: UserPreferences::default(),
        }
    }

    pub fn with_return(mut self, return_date: NaiveDate) -> Self {
        self.return_date = Some(return_date);
        self
    }

    pub fn with_passengers(mut self, passengers: u32) -> Self {
        self.passengers = passengers;
        self
    }

    pub fn with_hotel_category(mut self, category: impl Into<String>) -> Self {
        self.hotel_category = Some(category.into());
        self
    }

    pub fn with_preferences(mut self, preferences: UserPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// A trip is round-trip only when the return date is strictly after departure.
    pub fn is_round_trip(&self) -> bool {
        match (self.depart_date, self.return_date) {
            (Some(depart), Some(ret)) => ret > depart,
            _ => false,
        }
    }

    pub fn segments(&self) -> u32 {
        if self.is_round_trip() {
            2
        } else {
            1
        }
    }

    pub fn nights(&self) -> u32 {
        match (self.depart_date, self.return_date) {
            (Some(check_in), Some(check_out)) => {
                let days = (check_out - check_in).num_days();
                u32::try_from(days).unwrap_or(0).max(1)
            }
            _ => 1,
        }
    }

    pub fn effective_cabin(&self) -> Cabin {
        match self.search_type {
            SearchType::Flight => self.cabin,
            SearchType::Hotel => self.cabin.hotel_tier(),
        }
    }

    pub fn validate(&self) -> Result<(), TripError> {
        if self.destination.trim().is_empty() {
            return Err(TripError::MissingDestination);
        }
        if self.passengers == 0 {
            return Err(TripError::NoPassengers);
        }
        let Some(depart) = self.depart_date else {
            return Err(TripError::MissingDates);
        };
        match self.search_type {
            SearchType::Flight => {
                if self.origin.trim().is_empty() {
                    return Err(TripError::MissingOrigin);
                }
                if !self.cabin.is_flight_cabin() {
                    return Err(TripError::CabinMismatch(self.cabin));
                }
            }
            SearchType::Hotel => match self.return_date {
                Some(check_out) if check_out >= depart => {}
                Some(_) => return Err(TripError::CheckOutBeforeCheckIn),
                None => return Err(TripError::MissingDates),
            },
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TripError {
    #[error("Enter an origin airport to search for flights.")]
    MissingOrigin,
    #[error("Enter a destination to see redemption options.")]
    MissingDestination,
    #[error("Enter travel dates to see redemption options.")]
    MissingDates,
    #[error("Check-out must not be before check-in.")]
    CheckOutBeforeCheckIn,
    #[error("At least one passenger is required.")]
    NoPassengers,
    #[error("Cabin '{0}' is a hotel tier; choose economy, premium, business or first.")]
    CabinMismatch(Cabin),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ValueRating {
    Unknown,
    Poor,
    Average,
    Good,
    Great,
    Excellent,
}

impl ValueRating {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "N/A",
            Self::Poor => "Poor",
            Self::Average => "Average",
            Self::Good => "Good",
            Self::Great => "Great",
            Self::Excellent => "Excellent",
        }
    }
}

impl Display for ValueRating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EstimateSource {
    AwardChart,
    Heuristic,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    SweetSpot,
    RoundTrip,
    InstantTransfer,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AppliedAdjustment {
    pub kind: AdjustmentKind,
    pub multiplier: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingStep {
    pub title: String,
    pub instructions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RedemptionOption {
    pub program: String,
    pub program_type: ProgramKind,
    pub points_required: u64,
    pub fees: f64,
    pub cash_value: f64,
    pub user_balance: u64,
    pub has_enough_points: bool,
    pub transfer_from: Option<String>,
    pub transfer_ratio: Option<f64>,
    pub transfer_time: Option<String>,
    pub source_points: Option<u64>,
    pub base_cents_per_point: Option<f64>,
    pub cents_per_point: Option<f64>,
    pub adjustments: Vec<AppliedAdjustment>,
    pub value_rating: ValueRating,
    pub is_sweet_spot: bool,
    pub sweet_spot_details: Option<SweetSpot>,
    pub estimate_source: EstimateSource,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub notes: Vec<String>,
    pub booking_steps: Vec<BookingStep>,
}

impl RedemptionOption {
    pub fn new(program: impl Into<String>, program_type: ProgramKind) -> Self {
        Self {
            program: program.into(),
            program_type,
            points_required: 0,
            fees: 0.0,
            cash_value: 0.0,
            user_balance: 0,
            has_enough_points: false,
            transfer_from: None,
            transfer_ratio: None,
            transfer_time: None,
            source_points: None,
            base_cents_per_point: None,
            cents_per_point: None,
            adjustments: Vec::new(),
            value_rating: ValueRating::Unknown,
            is_sweet_spot: false,
            sweet_spot_details: None,
            estimate_source: EstimateSource::AwardChart,
            pros: Vec::new(),
            cons: Vec::new(),
            notes: Vec::new(),
            booking_steps: Vec::new(),
        }
    }

    pub fn with_cost(mut self, points_required: u64, fees: f64, cash_value: f64) -> Self {
        self.points_required = points_required;
        self.fees = fees;
        self.cash_value = cash_value;
        self
    }

    pub fn with_balance(mut self, balance: u64) -> Self {
        self.user_balance = balance;
        self.has_enough_points = balance >= self.points_spent();
        self
    }

    pub fn with_transfer(
        mut self,
        card: impl Into<String>,
        ratio: f64,
        transfer_time: impl Into<String>,
    ) -> Self {
        self.transfer_from = Some(card.into());
        self.transfer_ratio = Some(ratio);
        self.transfer_time = Some(transfer_time.into());
        self
    }

    pub fn with_source_points(mut self, points: u64) -> Self {
        self.source_points = Some(points);
        self
    }

    pub fn with_source(mut self, source: EstimateSource) -> Self {
        self.estimate_source = source;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn points_source(&self) -> &str {
        self.transfer_from.as_deref().unwrap_or(&self.program)
    }

    /// Source points for transfers, not the partner points the award is priced in.
    pub fn points_spent(&self) -> u64 {
        self.source_points.unwrap_or(self.points_required)
    }

    pub fn is_instant_transfer(&self) -> bool {
        self.transfer_time
            .as_deref()
            .map(|t| t.trim().eq_ignore_ascii_case("instant"))
            .unwrap_or(false)
    }

    pub fn cpp_or_zero(&self) -> f64 {
        self.cents_per_point.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchOutcome {
    pub best: Option<RedemptionOption>,
    pub alternatives: Vec<RedemptionOption>,
    pub message: Option<String>,
    pub sweet_spots: Vec<String>,
    pub retail_value: Option<f64>,
    pub fingerprint: String,
}

impl SearchOutcome {
    pub fn empty(message: impl Into<String>, fingerprint: impl Into<String>) -> Self {
        Self {
            best: None,
            alternatives: Vec::new(),
            message: Some(message.into()),
            sweet_spots: Vec::new(),
            retail_value: None,
            fingerprint: fingerprint.into(),
        }
    }

    pub fn options(&self) -> impl Iterator<Item = &RedemptionOption> {
        self.best.iter().chain(self.alternatives.iter())
    }

    pub fn option_count(&self) -> usize {
        self.alternatives.len() + usize::from(self.best.is_some())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::types::{Cabin, Program, ProgramKind, SearchType, TripError, TripRequest};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn round_trip_requires_strictly_later_return() {
        let one_way = TripRequest::flight("JFK", "LHR", date(2025, 3, 1), Cabin::Economy);
        assert!(!one_way.is_round_trip());
        let same_day = one_way.clone().with_return(date(2025, 3, 1));
        assert!(!same_day.is_round_trip());
        let earlier = one_way.clone().with_return(date(2025, 2, 20));
        assert!(!earlier.is_round_trip());
        let round = one_way.with_return(date(2025, 3, 2));
        assert!(round.is_round_trip());
        assert_eq!(round.segments(), 2);
    }

    #[test]
    fn hotel_nights_never_drop_below_one() {
        let trip = TripRequest::hotel("Tokyo", date(2025, 5, 1), date(2025, 5, 1), Cabin::Luxury);
        assert_eq!(trip.nights(), 1);
        let week = TripRequest::hotel("Tokyo", date(2025, 5, 1), date(2025, 5, 8), Cabin::Luxury);
        assert_eq!(week.nights(), 7);
    }

    #[test]
    fn infers_program_kind_from_name() {
        assert_eq!(ProgramKind::infer("Delta SkyMiles"), ProgramKind::Airline);
        assert_eq!(ProgramKind::infer("Air Canada Aeroplan"), ProgramKind::Airline);
        assert_eq!(ProgramKind::infer("World of Hyatt"), ProgramKind::Hotel);
        assert_eq!(ProgramKind::infer("Chase Ultimate Rewards"), ProgramKind::Card);
        assert_eq!(ProgramKind::infer("Capital One Miles"), ProgramKind::Card);
    }

    #[test]
    fn parses_program_records_from_store_shape() {
        let raw = r#"{"name":"Chase Ultimate Rewards","type":"card","balance":100000,"expiry":"2026-01-31"}"#;
        let program: Program = serde_json::from_str(raw).expect("program json");
        assert_eq!(program.kind, ProgramKind::Card);
        assert_eq!(program.balance, 100_000);
        assert_eq!(program.expiry, Some(date(2026, 1, 31)));
    }

    #[test]
    fn accepts_camel_case_trip_fields() {
        let raw = r#"{"origin":"LHR","destination":"HND","departDate":"2025-04-01","returnDate":"2025-04-10","cabin":"business","searchType":"flight"}"#;
        let trip: TripRequest = serde_json::from_str(raw).expect("trip json");
        assert!(trip.is_round_trip());
        assert_eq!(trip.passengers, 1);
        assert_eq!(trip.search_type, SearchType::Flight);
    }

    #[test]
    fn validation_explains_missing_pieces() {
        let mut trip = TripRequest::flight("JFK", "", date(2025, 3, 1), Cabin::Economy);
        assert_eq!(trip.validate(), Err(TripError::MissingDestination));
        trip.destination = "LHR".to_string();
        trip.depart_date = None;
        assert_eq!(trip.validate(), Err(TripError::MissingDates));
        trip.depart_date = Some(date(2025, 3, 1));
        trip.cabin = Cabin::Luxury;
        assert_eq!(trip.validate(), Err(TripError::CabinMismatch(Cabin::Luxury)));
    }

    #[test]
    fn hotel_tiers_map_from_flight_cabins() {
        assert_eq!(Cabin::Economy.hotel_tier(), Cabin::Standard);
        assert_eq!(Cabin::Business.hotel_tier(), Cabin::Premium);
        assert_eq!(Cabin::First.hotel_tier(), Cabin::Luxury);
        assert_eq!("premium-economy".parse::<Cabin>().ok(), Some(Cabin::Premium));
    }
}
