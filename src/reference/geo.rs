use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    NorthAmerica,
    Europe,
    Asia,
    MiddleEast,
    Oceania,
    Africa,
    Other,
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::NorthAmerica => "North America",
            Self::Europe => "Europe",
            Self::Asia => "Asia",
            Self::MiddleEast => "Middle East",
            Self::Oceania => "Oceania",
            Self::Africa => "Africa",
            Self::Other => "Other",
        };
        write!(f, "{display}")
    }
}

pub(crate) const AIRPORT_REGIONS: &[(&str, Region)] = &[
    ("JFK", Region::NorthAmerica),
    ("LAX", Region::NorthAmerica),
    ("ORD", Region::NorthAmerica),
    ("SFO", Region::NorthAmerica),
    ("MIA", Region::NorthAmerica),
    ("ATL", Region::NorthAmerica),
    ("DFW", Region::NorthAmerica),
    ("BOS", Region::NorthAmerica),
    ("SEA", Region::NorthAmerica),
    ("IAD", Region::NorthAmerica),
    ("EWR", Region::NorthAmerica),
    ("YYZ", Region::NorthAmerica),
    ("YVR", Region::NorthAmerica),
    ("YUL", Region::NorthAmerica),
    ("LHR", Region::Europe),
    ("LGW", Region::Europe),
    ("CDG", Region::Europe),
    ("ORY", Region::Europe),
    ("AMS", Region::Europe),
    ("FRA", Region::Europe),
    ("MUC", Region::Europe),
    ("ZRH", Region::Europe),
    ("VIE", Region::Europe),
    ("CPH", Region::Europe),
    ("ARN", Region::Europe),
    ("MAD", Region::Europe),
    ("BCN", Region::Europe),
    ("FCO", Region::Europe),
    ("IST", Region::Europe),
    ("HND", Region::Asia),
    ("NRT", Region::Asia),
    ("KIX", Region::Asia),
    ("SIN", Region::Asia),
    ("HKG", Region::Asia),
    ("BKK", Region::Asia),
    ("ICN", Region::Asia),
    ("PEK", Region::Asia),
    ("PKX", Region::Asia),
    ("DXB", Region::MiddleEast),
    ("DOH", Region::MiddleEast),
    ("AUH", Region::MiddleEast),
    ("SYD", Region::Oceania),
    ("MEL", Region::Oceania),
    ("JNB", Region::Africa),
];

pub(crate) const KNOWN_DISTANCES: &[(&str, &str, u32)] = &[
    ("JFK", "LHR", 3451),
    ("LAX", "NRT", 5451),
    ("SFO", "HKG", 6927),
    ("ORD", "FRA", 4340),
    ("LHR", "HND", 5962),
    ("JFK", "HND", 6745),
    ("LAX", "HND", 5500),
];

pub(crate) fn intra_region_miles(region: Region) -> u32 {
    match region {
        Region::NorthAmerica | Region::Europe | Region::Asia => 1500,
        _ => 500,
    }
}

pub(crate) fn inter_region_miles(a: Region, b: Region) -> u32 {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    match (low, high) {
        (Region::NorthAmerica, Region::Europe) => 4500,
        (Region::NorthAmerica, Region::Asia) => 6500,
        (Region::Europe, Region::Asia) => 5500,
        (Region::NorthAmerica, Region::Oceania) => 7500,
        _ => 3000,
    }
}
