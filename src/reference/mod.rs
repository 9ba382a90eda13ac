pub mod charts;
pub mod geo;
pub mod partners;
pub mod sweet_spots;

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::reference::charts::{
    Row, AIRPORT_SURCHARGES, AVERAGE_CATEGORY, BASE_FARES, FLIGHT_AWARDS, FLIGHT_FEES,
    FLIGHT_RETAIL, HOTEL_AWARDS, HOTEL_RETAIL, PROGRAM_PROFILES,
};
use crate::reference::geo::{Region, AIRPORT_REGIONS, KNOWN_DISTANCES};
use crate::reference::partners::{builtin_partners, TransferPartner};
use crate::reference::sweet_spots::{builtin_sweet_spots, SweetSpot};
use crate::types::{Cabin, ProgramKind};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RouteKey {
    pub origin: String,
    pub destination: String,
}

impl RouteKey {
    pub fn new(origin: &str, destination: &str) -> Self {
        Self {
            origin: origin.trim().to_ascii_uppercase(),
            destination: destination.trim().to_ascii_uppercase(),
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            origin: self.destination.clone(),
            destination: self.origin.clone(),
        }
    }
}

impl Display for RouteKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.origin, self.destination)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CabinRates(pub [Option<u32>; 4]);

impl CabinRates {
    pub fn get(&self, cabin: Cabin) -> Option<u32> {
        cabin.rate_index().and_then(|idx| self.0[idx])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgramProfile {
    pub kind: ProgramKind,
    pub value_multiplier: f64,
    pub fee_multiplier: f64,
    pub hotel_fee_per_night: f64,
    pub fifth_night_free: bool,
}

impl ProgramProfile {
    pub fn neutral(kind: ProgramKind) -> Self {
        Self {
            kind,
            value_multiplier: 1.0,
            fee_multiplier: 1.0,
            hotel_fee_per_night: 0.0,
            fifth_night_free: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceBand {
    Short,
    Medium,
    Long,
    UltraLong,
}

impl DistanceBand {
    pub fn classify(miles: u32) -> Self {
        match miles {
            0..=999 => Self::Short,
            1000..=2999 => Self::Medium,
            3000..=5999 => Self::Long,
            _ => Self::UltraLong,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Short => 0,
            Self::Medium => 1,
            Self::Long => 2,
            Self::UltraLong => 3,
        }
    }
}

pub fn default_category(tier: Cabin) -> &'static str {
    match tier.hotel_tier() {
        Cabin::Luxury => "Category 7",
        Cabin::Premium => "Category 6",
        _ => "Category 4",
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    flight_awards: BTreeMap<(String, RouteKey), CabinRates>,
    flight_fees: BTreeMap<(String, RouteKey), CabinRates>,
    hotel_awards: BTreeMap<(String, String), u32>,
    flight_retail: BTreeMap<RouteKey, CabinRates>,
    hotel_retail: BTreeMap<String, u32>,
    base_fares: BTreeMap<Cabin, [u32; 4]>,
    profiles: BTreeMap<String, ProgramProfile>,
    airport_regions: BTreeMap<String, Region>,
    known_distances: BTreeMap<RouteKey, u32>,
    airport_surcharges: BTreeMap<String, f64>,
    partners: BTreeMap<String, Vec<TransferPartner>>,
    sweet_spots: Vec<SweetSpot>,
}

static BUILTIN: Lazy<Arc<ReferenceData>> = Lazy::new(|| Arc::new(ReferenceData::builtin()));

impl ReferenceData {
    pub fn shared() -> Arc<ReferenceData> {
        Arc::clone(&BUILTIN)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut data = Self::empty();
        for (program, origin, destination, rates) in FLIGHT_AWARDS {
            data = data.with_flight_award(program, origin, destination, *rates);
        }
        for (program, origin, destination, rates) in FLIGHT_FEES {
            data = data.with_flight_fee(program, origin, destination, *rates);
        }
        for (program, category, points) in HOTEL_AWARDS {
            data = data.with_hotel_award(program, category, *points);
        }
        for (origin, destination, rates) in FLIGHT_RETAIL {
            data = data.with_flight_retail(origin, destination, *rates);
        }
        for (category, nightly) in HOTEL_RETAIL {
            data = data.with_hotel_retail(category, *nightly);
        }
        for (slug, fares) in BASE_FARES {
            if let Ok(cabin) = slug.parse::<Cabin>() {
                data.base_fares.insert(cabin, *fares);
            }
        }
        for (name, kind, value_multiplier, fee_multiplier, fifth_night_free) in PROGRAM_PROFILES {
            let profile = ProgramProfile {
                kind: *kind,
                value_multiplier: *value_multiplier,
                fee_multiplier: *fee_multiplier,
                hotel_fee_per_night: 0.0,
                fifth_night_free: *fifth_night_free,
            };
            data = data.with_profile(name, profile);
        }
        for (code, region) in AIRPORT_REGIONS {
            data.airport_regions.insert(code.to_string(), *region);
        }
        for (origin, destination, miles) in KNOWN_DISTANCES {
            data.known_distances
                .insert(RouteKey::new(origin, destination), *miles);
        }
        for (code, surcharge) in AIRPORT_SURCHARGES {
            data.airport_surcharges.insert(code.to_string(), *surcharge);
        }
        for (card, partners) in builtin_partners() {
            data.partners.insert(card, partners);
        }
        data.sweet_spots = builtin_sweet_spots();
        data
    }

    pub fn with_flight_award(mut self, program: &str, origin: &str, destination: &str, rates: Row) -> Self {
        self.flight_awards.insert(
            (program.to_string(), RouteKey::new(origin, destination)),
            CabinRates(rates),
        );
        self
    }

    pub fn with_flight_fee(mut self, program: &str, origin: &str, destination: &str, rates: Row) -> Self {
        self.flight_fees.insert(
            (program.to_string(), RouteKey::new(origin, destination)),
            CabinRates(rates),
        );
        self
    }

    pub fn with_hotel_award(mut self, program: &str, category: &str, points_per_night: u32) -> Self {
        self.hotel_awards
            .insert((program.to_string(), category.to_string()), points_per_night);
        self
    }

    pub fn with_flight_retail(mut self, origin: &str, destination: &str, rates: Row) -> Self {
        self.flight_retail
            .insert(RouteKey::new(origin, destination), CabinRates(rates));
        self
    }

    pub fn with_hotel_retail(mut self, category: &str, nightly: u32) -> Self {
        self.hotel_retail.insert(category.to_string(), nightly);
        self
    }

    pub fn with_base_fares(mut self, cabin: Cabin, fares: [u32; 4]) -> Self {
        self.base_fares.insert(cabin, fares);
        self
    }

    pub fn with_profile(mut self, program: &str, profile: ProgramProfile) -> Self {
        self.profiles.insert(program.to_string(), profile);
        self
    }

    pub fn with_airport(mut self, code: &str, region: Region) -> Self {
        self.airport_regions.insert(code.to_ascii_uppercase(), region);
        self
    }

    pub fn with_partner(mut self, card: &str, partner: TransferPartner) -> Self {
        self.partners.entry(card.to_string()).or_default().push(partner);
        self
    }

    pub fn with_sweet_spot(mut self, spot: SweetSpot) -> Self {
        self.sweet_spots.push(spot);
        self
    }

    pub fn flight_award(&self, program: &str, route: &RouteKey, cabin: Cabin) -> Option<u32> {
        self.flight_awards
            .get(&(program.to_string(), route.clone()))
            .and_then(|rates| rates.get(cabin))
            .filter(|points| *points > 0)
    }

    pub fn flight_fee(&self, program: &str, route: &RouteKey, cabin: Cabin) -> Option<u32> {
        self.flight_fees
            .get(&(program.to_string(), route.clone()))
            .and_then(|rates| rates.get(cabin))
    }

    pub fn has_flight_fees(&self, program: &str, route: &RouteKey) -> bool {
        self.flight_fees
            .contains_key(&(program.to_string(), route.clone()))
    }

    pub fn hotel_award(&self, program: &str, category: &str) -> Option<u32> {
        self.hotel_awards
            .get(&(program.to_string(), category.to_string()))
            .or_else(|| {
                self.hotel_awards
                    .get(&(program.to_string(), AVERAGE_CATEGORY.to_string()))
            })
            .copied()
            .filter(|points| *points > 0)
    }

    pub fn flight_retail(&self, route: &RouteKey, cabin: Cabin) -> Option<u32> {
        self.flight_retail
            .get(route)
            .and_then(|rates| rates.get(cabin))
            .or_else(|| {
                self.flight_retail
                    .get(&route.reversed())
                    .and_then(|rates| rates.get(cabin))
            })
    }

    pub fn hotel_retail(&self, category: &str) -> Option<u32> {
        self.hotel_retail
            .get(category)
            .or_else(|| self.hotel_retail.get(AVERAGE_CATEGORY))
            .copied()
    }

    pub fn base_fare(&self, cabin: Cabin, band: DistanceBand) -> Option<u32> {
        self.base_fares.get(&cabin).map(|fares| fares[band.index()])
    }

    pub fn profile(&self, program: &str) -> ProgramProfile {
        self.profiles
            .get(program)
            .copied()
            .unwrap_or_else(|| ProgramProfile::neutral(ProgramKind::infer(program)))
    }

    pub fn program_kind(&self, program: &str) -> ProgramKind {
        self.profile(program).kind
    }

    pub fn region_of(&self, airport: &str) -> Region {
        self.airport_regions
            .get(&airport.trim().to_ascii_uppercase())
            .copied()
            .unwrap_or(Region::Other)
    }

    pub fn known_distance(&self, route: &RouteKey) -> Option<u32> {
        self.known_distances
            .get(route)
            .or_else(|| self.known_distances.get(&route.reversed()))
            .copied()
    }

    pub fn airport_surcharge(&self, airport: &str) -> f64 {
        self.airport_surcharges
            .get(&airport.trim().to_ascii_uppercase())
            .copied()
            .unwrap_or(0.0)
    }

    pub fn partners_from(&self, card: &str) -> &[TransferPartner] {
        self.partners.get(card).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn transfer_graph(&self) -> impl Iterator<Item = (&String, &Vec<TransferPartner>)> {
        self.partners.iter()
    }

    pub fn sweet_spots(&self) -> &[SweetSpot] {
        &self.sweet_spots
    }

    pub fn known_programs(&self) -> BTreeMap<String, ProgramKind> {
        let mut programs: BTreeMap<String, ProgramKind> = self
            .profiles
            .iter()
            .map(|(name, profile)| (name.clone(), profile.kind))
            .collect();
        for partners in self.partners.values() {
            for partner in partners {
                programs.entry(partner.program.clone()).or_insert(partner.kind);
            }
        }
        programs
    }
}
