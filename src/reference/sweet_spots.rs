use serde::{Deserialize, Serialize};

use crate::reference::charts::{
    AEROPLAN, ALASKA, AMEX, ANA, CAPITAL_ONE, CHASE, CITI, HYATT, MARRIOTT, VIRGIN_ATLANTIC,
};
use crate::reference::geo::Region;
use crate::types::{Cabin, ProgramKind};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AirportSet {
    Codes(Vec<String>),
    Regions(Vec<Region>),
}

impl AirportSet {
    pub fn codes(codes: &[&str]) -> Self {
        Self::Codes(codes.iter().map(|c| c.to_string()).collect())
    }

    pub fn contains(&self, airport: &str, region: Region) -> bool {
        match self {
            Self::Codes(codes) => codes.iter().any(|c| c.eq_ignore_ascii_case(airport.trim())),
            Self::Regions(regions) => regions.contains(&region),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteMatcher {
    Any,
    MultiCity,
    Between {
        origins: AirportSet,
        destinations: AirportSet,
    },
}

impl RouteMatcher {
    pub fn matches(
        &self,
        origin: &str,
        destination: &str,
        region_of: impl Fn(&str) -> Region,
    ) -> bool {
        match self {
            Self::Any => true,
            Self::MultiCity => false,
            Self::Between {
                origins,
                destinations,
            } => {
                origins.contains(origin, region_of(origin))
                    && destinations.contains(destination, region_of(destination))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PricingBasis {
    RoundTrip,
    OneWay,
    PerNight,
    Distance,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointsTier {
    pub label: String,
    pub points: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteOption {
    pub origin: String,
    pub destination: String,
    pub aircraft: String,
    pub frequency: String,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweetSpot {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: ProgramKind,
    pub cabins: Vec<Cabin>,
    pub route: RouteMatcher,
    pub route_label: Option<String>,
    pub points_required: Vec<PointsTier>,
    pub book_via: String,
    pub transfer_sources: Vec<String>,
    pub value_per_point: String,
    pub search_window: String,
    pub search_tools: Vec<String>,
    pub call_instructions: String,
    pub booking_link: String,
    pub route_options: Vec<RouteOption>,
    pub pro_tips: Vec<String>,
    pub warnings: Vec<String>,
    pub valuation_rationale: Option<String>,
    pub pricing: PricingBasis,
}

impl SweetSpot {
    pub fn accepts_source(&self, source: &str) -> bool {
        self.transfer_sources.iter().any(|s| s == source)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn tiers(items: &[(&str, &str)]) -> Vec<PointsTier> {
    items
        .iter()
        .map(|(label, points)| PointsTier {
            label: label.to_string(),
            points: points.to_string(),
        })
        .collect()
}

fn route(origin: &str, destination: &str, aircraft: &str, notes: &str) -> RouteOption {
    RouteOption {
        origin: origin.to_string(),
        destination: destination.to_string(),
        aircraft: aircraft.to_string(),
        frequency: "Daily".to_string(),
        notes: notes.to_string(),
    }
}

pub(crate) fn builtin_sweet_spots() -> Vec<SweetSpot> {
    vec![
        SweetSpot {
            id: "ANA_RTW".to_string(),
            name: "ANA First/Business Round the World".to_string(),
            description: "Multi-stop award allowing up to 8 stopovers booked directly with ANA."
                .to_string(),
            kind: ProgramKind::Airline,
            cabins: Cabin::FLIGHT.to_vec(),
            route: RouteMatcher::MultiCity,
            route_label: Some("Round the World (Multi-City)".to_string()),
            points_required: tiers(&[
                ("Economy", "75,000 - 120,000 pts"),
                ("Business", "100,000 - 200,000 pts"),
                ("First", "180,000 - 300,000 pts"),
            ]),
            book_via: ANA.to_string(),
            transfer_sources: strings(&[AMEX, MARRIOTT]),
            value_per_point: "4-10¢".to_string(),
            search_window:
                "Search up to 355 days in advance when ANA releases partner space. Requires calling ANA."
                    .to_string(),
            search_tools: strings(&[
                "ANA website (for own flights)",
                "Star Alliance tools (United.com, AirCanada.com)",
                "ExpertFlyer",
            ]),
            call_instructions:
                "Call ANA Mileage Club at 1-800-235-9262 to book complex multi-city or partner awards."
                    .to_string(),
            booking_link: "https://www.ana.co.jp/en/us/amc/partner-flight-awards/".to_string(),
            route_options: Vec::new(),
            pro_tips: strings(&[
                "Maximize value by including multiple long-haul segments",
                "Award space is limited, flexibility is key",
                "Calculated based on total distance, not per segment",
                "Requires phone booking",
            ]),
            warnings: strings(&[
                "Complex booking rules",
                "Availability is highly competitive in premium cabins",
                "Fuel surcharges may apply depending on carrier",
            ]),
            valuation_rationale: None,
            pricing: PricingBasis::Distance,
        },
        SweetSpot {
            id: "ANA_PREMIUM_VS".to_string(),
            name: "ANA Premium Cabins via Virgin Atlantic".to_string(),
            description: "Exceptional value for ANA premium cabins between US/Europe and Japan using Virgin points.".to_string(),
            kind: ProgramKind::Airline,
            cabins: vec![Cabin::Business, Cabin::First],
            route: RouteMatcher::Between {
                origins: AirportSet::codes(&["JFK", "LAX", "SFO", "ORD", "LHR"]),
                destinations: AirportSet::codes(&["HND", "NRT"]),
            },
            route_label: Some("US / Europe to Japan".to_string()),
            points_required: tiers(&[
                ("Business (West US / Europe)", "90,000 round-trip"),
                ("Business (East US)", "95,000 round-trip"),
                ("First (West US / Europe)", "110,000 round-trip"),
                ("First (East US)", "120,000 round-trip"),
            ]),
            book_via: VIRGIN_ATLANTIC.to_string(),
            transfer_sources: strings(&[AMEX, CHASE, CITI]),
            value_per_point: "4-8¢".to_string(),
            search_window: "Search up to 355 days in advance when ANA releases space. Book via phone.".to_string(),
            search_tools: strings(&["United.com (for ANA space)", "ANA website", "ExpertFlyer (paid)"]),
            call_instructions: "Call Virgin Atlantic Flying Club at 1-800-365-9500 to book ANA partner awards.".to_string(),
            booking_link: "https://www.virginatlantic.com/us/en/flying-club/partners/airlines/all-nippon-airways.html".to_string(),
            route_options: vec![
                route("New York (JFK)", "Tokyo (HND/NRT)", "Boeing 777-300ER", "Mix of new ('The Suite' / 'The Room') and classic products."),
                route("Chicago (ORD)", "Tokyo (HND)", "Boeing 777-300ER", "Mix of new ('The Room') and classic products."),
                route("Los Angeles (LAX)", "Tokyo (HND/NRT)", "Boeing 777-300ER / 787-9", "Mix of new and classic products."),
                route("San Francisco (SFO)", "Tokyo (NRT)", "Boeing 777-300ER", "Classic product."),
                route("London (LHR)", "Tokyo (HND)", "Boeing 777-300ER", "Features ANA's newest 'The Room' business class on select aircraft."),
            ],
            pro_tips: strings(&[
                "Round-trip bookings are required when booking ANA through Virgin Atlantic.",
                "No fuel surcharges apply to ANA awards booked with Virgin points.",
                "Transfer times from Amex, Chase, Citi to Virgin are usually instant.",
                "Search for 'Saver' level award space on partner sites like United.com.",
                "Availability is competitive, book as soon as space is released (355 days out).",
            ]),
            warnings: strings(&[
                "Requires phone booking with Virgin Atlantic.",
                "Virgin Atlantic agents may not see all available ANA space, so be polite and persistent.",
                "Award space disappears very quickly, especially First Class.",
            ]),
            valuation_rationale: Some("The cash price for ANA premium cabins is extremely high, while Virgin Atlantic charges far fewer points than most programs for the same flights, with minimal taxes and fees.".to_string()),
            pricing: PricingBasis::RoundTrip,
        },
        SweetSpot {
            id: "CX_PREMIUM_AS".to_string(),
            name: "Cathay Pacific Premium Cabins via Alaska".to_string(),
            description: "Excellent value for Cathay Pacific Business/First Class to Asia using Alaska miles, including a free stopover in Hong Kong.".to_string(),
            kind: ProgramKind::Airline,
            cabins: vec![Cabin::Business, Cabin::First],
            route: RouteMatcher::Between {
                origins: AirportSet::codes(&["JFK", "LAX", "SFO", "ORD", "BOS"]),
                destinations: AirportSet::codes(&["HKG", "SIN", "BKK", "NRT"]),
            },
            route_label: Some("US to Asia via Hong Kong".to_string()),
            points_required: tiers(&[
                ("Business (US to Asia)", "50,000 one-way"),
                ("First (US to Asia)", "70,000 one-way"),
                ("Business (US to Australia/NZ via HKG)", "60,000 one-way"),
                ("First (US to Australia/NZ via HKG)", "80,000 one-way"),
            ]),
            book_via: ALASKA.to_string(),
            transfer_sources: strings(&[MARRIOTT]),
            value_per_point: "3-6¢".to_string(),
            search_window: "Book 10-11 months in advance or 1-2 weeks before departure (last-minute releases). Search partner sites.".to_string(),
            search_tools: strings(&["British Airways website", "Qantas website", "ExpertFlyer (paid)"]),
            call_instructions: "Call Alaska Airlines Mileage Plan at 1-800-252-7522 to book Cathay Pacific partner awards.".to_string(),
            booking_link: "https://www.alaskaair.com/content/mileage-plan/how-to-use/award-charts#partners".to_string(),
            route_options: vec![
                route("New York (JFK)", "Hong Kong (HKG)", "Boeing 777-300ER", "First Class available."),
                route("Los Angeles (LAX)", "Hong Kong (HKG)", "Boeing 777-300ER / Airbus A350", "Mix of aircraft, First Class on 777s."),
                route("San Francisco (SFO)", "Hong Kong (HKG)", "Boeing 777-300ER", "First Class available."),
                route("Boston (BOS)", "Hong Kong (HKG)", "Airbus A350", "Excellent business class, no First Class on A350."),
                route("Chicago (ORD)", "Hong Kong (HKG)", "Boeing 777-300ER", "First Class available."),
            ],
            pro_tips: strings(&[
                "Alaska allows one free stopover in Hong Kong even on a one-way award.",
                "You can continue to Southeast Asia, Australia, or New Zealand on the same award for a slightly higher rate.",
                "Search for Oneworld partner space on BA.com or Qantas.com, then call Alaska to book.",
                "Availability is competitive, especially for First Class.",
            ]),
            warnings: strings(&[
                "Requires phone booking with Alaska Airlines.",
                "Marriott Bonvoy is the only major transferable currency partner for Alaska (3:1 ratio).",
            ]),
            valuation_rationale: Some("Premium cabins price low in points, the Hong Kong stopover is included, and taxes and fees stay small.".to_string()),
            pricing: PricingBasis::OneWay,
        },
        SweetSpot {
            id: "HYATT_LUXURY".to_string(),
            name: "Hyatt Luxury Property Redemptions".to_string(),
            description: "High value redemptions at top-tier Hyatt properties (Category 7 & 8) like Park Hyatt or Alila.".to_string(),
            kind: ProgramKind::Hotel,
            cabins: vec![Cabin::Luxury, Cabin::Standard, Cabin::Premium],
            route: RouteMatcher::Any,
            route_label: None,
            points_required: tiers(&[
                ("Category 1", "5,000 pts / night"),
                ("Category 2", "8,000 pts / night"),
                ("Category 3", "12,000 pts / night"),
                ("Category 4", "15,000 pts / night"),
                ("Category 5", "20,000 pts / night"),
                ("Category 6", "25,000 pts / night"),
                ("Category 7", "30,000 pts / night"),
                ("Category 8", "40,000 pts / night"),
            ]),
            book_via: HYATT.to_string(),
            transfer_sources: strings(&[CHASE]),
            value_per_point: "2-5¢+".to_string(),
            search_window: "Book up to 13 months in advance when the calendar opens. Availability is best outside of peak dates/locations.".to_string(),
            search_tools: strings(&["Hyatt.com"]),
            call_instructions: "Most bookings can be done online. Call Hyatt reservations if you have complex needs or issues.".to_string(),
            booking_link: "https://www.hyatt.com/redeem".to_string(),
            route_options: Vec::new(),
            pro_tips: strings(&[
                "World of Hyatt points are highly valuable, often exceeding 2 cents per point.",
                "Chase Ultimate Rewards is the only major 1:1 transfer partner.",
                "Look for Category 7 and 8 properties for the highest potential value.",
                "Availability for standard rooms at top properties is limited.",
            ]),
            warnings: strings(&[
                "Avoid transferring points to Hyatt unless you have a specific high-value redemption in mind.",
                "Cash & Points redemptions can sometimes offer good value too.",
                "Hotel award nights generally do not include resort fees or destination fees, so check property details.",
            ]),
            valuation_rationale: Some("Higher-category Hyatt properties carry very high cash rates while the points price stays comparatively low.".to_string()),
            pricing: PricingBasis::PerNight,
        },
        SweetSpot {
            id: "JAL_BUSINESS_AS".to_string(),
            name: "Japan Airlines Business Class via Alaska".to_string(),
            description: "Alaska miles for JAL business class between the US and Japan.".to_string(),
            kind: ProgramKind::Airline,
            cabins: vec![Cabin::Business],
            route: RouteMatcher::Between {
                origins: AirportSet::Regions(vec![Region::NorthAmerica]),
                destinations: AirportSet::codes(&["HND", "NRT", "KIX"]),
            },
            route_label: Some("US to Japan".to_string()),
            points_required: tiers(&[("Business (US to Japan)", "60,000 one-way")]),
            book_via: ALASKA.to_string(),
            transfer_sources: strings(&[MARRIOTT]),
            value_per_point: "2-4¢".to_string(),
            search_window: "JAL releases partner space about 360 days out; last-minute space is common.".to_string(),
            search_tools: strings(&["Alaska Airlines website", "British Airways website"]),
            call_instructions: "JAL partner awards can be booked online at alaskaair.com.".to_string(),
            booking_link: "https://www.alaskaair.com/content/mileage-plan/use-miles/partner-award-chart".to_string(),
            route_options: Vec::new(),
            pro_tips: strings(&["No fuel surcharges on JAL awards booked with Alaska miles."]),
            warnings: strings(&["Marriott Bonvoy transfers to Alaska at 3:1."]),
            valuation_rationale: None,
            pricing: PricingBasis::OneWay,
        },
        SweetSpot {
            id: "LH_FIRST_AC".to_string(),
            name: "Lufthansa First Class via Aeroplan".to_string(),
            description: "Aeroplan points for Lufthansa First Class between North America and Germany without fuel surcharges.".to_string(),
            kind: ProgramKind::Airline,
            cabins: vec![Cabin::First],
            route: RouteMatcher::Between {
                origins: AirportSet::Regions(vec![Region::NorthAmerica]),
                destinations: AirportSet::codes(&["FRA", "MUC"]),
            },
            route_label: Some("US to Germany".to_string()),
            points_required: tiers(&[("First (North America to Europe)", "90,000 one-way")]),
            book_via: AEROPLAN.to_string(),
            transfer_sources: strings(&[AMEX, CAPITAL_ONE]),
            value_per_point: "3-6¢".to_string(),
            search_window: "Lufthansa releases First Class to partners about 15 days before departure.".to_string(),
            search_tools: strings(&["Aeroplan website", "United.com"]),
            call_instructions: "Book online at aircanada.com/aeroplan once space shows.".to_string(),
            booking_link: "https://www.aircanada.com/aeroplan".to_string(),
            route_options: Vec::new(),
            pro_tips: strings(&["Search close to departure when Lufthansa opens First Class to partners."]),
            warnings: strings(&["Space appears late; keep a backup plan."]),
            valuation_rationale: None,
            pricing: PricingBasis::OneWay,
        },
    ]
}

#[cfg(test)]
mod tests {
    use crate::reference::geo::Region;
    use crate::reference::sweet_spots::{AirportSet, RouteMatcher};

    fn region_of(code: &str) -> Region {
        match code {
            "JFK" | "BOS" => Region::NorthAmerica,
            "FRA" => Region::Europe,
            _ => Region::Other,
        }
    }

    #[test]
    fn between_matcher_is_directional() {
        let matcher = RouteMatcher::Between {
            origins: AirportSet::Regions(vec![Region::NorthAmerica]),
            destinations: AirportSet::codes(&["FRA"]),
        };
        assert!(matcher.matches("JFK", "FRA", region_of));
        assert!(!matcher.matches("FRA", "JFK", region_of));
    }

    #[test]
    fn multi_city_never_matches_and_any_always_does() {
        assert!(!RouteMatcher::MultiCity.matches("JFK", "FRA", region_of));
        assert!(RouteMatcher::Any.matches("", "Tokyo", region_of));
    }
}
