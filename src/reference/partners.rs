use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::reference::charts::{
    AEROPLAN, ALASKA, AMERICAN, AMEX, ANA, BRITISH_AIRWAYS, CAPITAL_ONE, CHASE, CITI, DELTA,
    EMIRATES, ETIHAD, FLYING_BLUE, HILTON, HYATT, IHG, KRISFLYER, MARRIOTT, SOUTHWEST, UNITED,
    VIRGIN_ATLANTIC,
};
use crate::types::ProgramKind;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransferRatio {
    pub card: u32,
    pub partner: u32,
}

impl TransferRatio {
    pub const ONE_TO_ONE: TransferRatio = TransferRatio { card: 1, partner: 1 };

    pub const fn new(card: u32, partner: u32) -> Self {
        Self { card, partner }
    }

    pub fn partner_per_card_point(&self) -> f64 {
        if self.card == 0 {
            return 0.0;
        }
        f64::from(self.partner) / f64::from(self.card)
    }

    /// Source points needed to fund `partner_points`, rounded up.
    pub fn card_points_for(&self, partner_points: u64) -> Option<u64> {
        if self.partner == 0 {
            return None;
        }
        let numerator = partner_points.checked_mul(u64::from(self.card))?;
        Some(numerator.div_ceil(u64::from(self.partner)))
    }
}

impl Display for TransferRatio {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.card, self.partner)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferPartner {
    pub program: String,
    pub kind: ProgramKind,
    pub ratio: TransferRatio,
    pub transfer_time: String,
    pub ratio_note: Option<String>,
    pub bonus_note: Option<String>,
}

impl TransferPartner {
    pub fn new(program: &str, kind: ProgramKind, transfer_time: &str) -> Self {
        Self {
            program: program.to_string(),
            kind,
            ratio: TransferRatio::ONE_TO_ONE,
            transfer_time: transfer_time.to_string(),
            ratio_note: None,
            bonus_note: None,
        }
    }

    pub fn with_ratio(mut self, ratio: TransferRatio) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn with_ratio_note(mut self, note: &str) -> Self {
        self.ratio_note = Some(note.to_string());
        self
    }

    pub fn with_bonus_note(mut self, note: &str) -> Self {
        self.bonus_note = Some(note.to_string());
        self
    }

    pub fn is_instant(&self) -> bool {
        self.transfer_time.trim().eq_ignore_ascii_case("instant")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferSource {
    pub card: String,
    pub ratio: TransferRatio,
    pub transfer_time: String,
    pub bonus_note: Option<String>,
}

const MARRIOTT_AIRLINE_BONUS: &str = "5,000 bonus miles for every 60,000 points transferred";

pub(crate) fn builtin_partners() -> Vec<(String, Vec<TransferPartner>)> {
    use ProgramKind::{Airline, Hotel};

    let amex = vec![
        TransferPartner::new(AEROPLAN, Airline, "Instant"),
        TransferPartner::new(ANA, Airline, "2-3 days"),
        TransferPartner::new(BRITISH_AIRWAYS, Airline, "1-2 days"),
        TransferPartner::new(DELTA, Airline, "Instant"),
        TransferPartner::new(EMIRATES, Airline, "1-2 days"),
        TransferPartner::new(ETIHAD, Airline, "1-3 days"),
        TransferPartner::new(FLYING_BLUE, Airline, "Instant"),
        TransferPartner::new(KRISFLYER, Airline, "1-2 days"),
        TransferPartner::new(VIRGIN_ATLANTIC, Airline, "Instant"),
        TransferPartner::new(MARRIOTT, Hotel, "1-2 days")
            .with_ratio_note("Ratio varies by card (often 3:1 or special rates)"),
        TransferPartner::new(HILTON, Hotel, "1-2 days")
            .with_ratio(TransferRatio::new(1, 2))
            .with_ratio_note("1:2 transfer ratio (1000 Amex -> 2000 Hilton)"),
    ];
    let chase = vec![
        TransferPartner::new(UNITED, Airline, "Instant"),
        TransferPartner::new(SOUTHWEST, Airline, "Instant"),
        TransferPartner::new(BRITISH_AIRWAYS, Airline, "Instant"),
        TransferPartner::new(FLYING_BLUE, Airline, "Instant"),
        TransferPartner::new(KRISFLYER, Airline, "1-2 days"),
        TransferPartner::new(VIRGIN_ATLANTIC, Airline, "Instant"),
        TransferPartner::new(HYATT, Hotel, "Instant"),
        TransferPartner::new(MARRIOTT, Hotel, "1 day"),
        TransferPartner::new(IHG, Hotel, "Instant"),
    ];
    let citi = vec![
        TransferPartner::new(FLYING_BLUE, Airline, "Instant"),
        TransferPartner::new(ETIHAD, Airline, "1-3 days"),
        TransferPartner::new(KRISFLYER, Airline, "1-2 days"),
        TransferPartner::new(VIRGIN_ATLANTIC, Airline, "Instant"),
    ];
    let capital_one = vec![
        TransferPartner::new(AEROPLAN, Airline, "Instant"),
        TransferPartner::new(FLYING_BLUE, Airline, "Instant"),
        TransferPartner::new(BRITISH_AIRWAYS, Airline, "1 day"),
        TransferPartner::new(EMIRATES, Airline, "Instant"),
        TransferPartner::new(KRISFLYER, Airline, "1-2 days"),
        TransferPartner::new(VIRGIN_ATLANTIC, Airline, "Instant"),
    ];
    let marriott = vec![
        TransferPartner::new(ALASKA, Airline, "2 days")
            .with_ratio(TransferRatio::new(3, 1))
            .with_bonus_note(MARRIOTT_AIRLINE_BONUS),
        TransferPartner::new(AMERICAN, Airline, "2 days")
            .with_ratio(TransferRatio::new(3, 1))
            .with_bonus_note(MARRIOTT_AIRLINE_BONUS),
        TransferPartner::new(UNITED, Airline, "3 days")
            .with_ratio(TransferRatio::new(3, 1))
            .with_bonus_note(
                "5,000 bonus miles for every 60,000 points transferred, plus 10k bonus for every 60k to UA",
            ),
    ];

    vec![
        (AMEX.to_string(), amex),
        (CHASE.to_string(), chase),
        (CITI.to_string(), citi),
        (CAPITAL_ONE.to_string(), capital_one),
        (MARRIOTT.to_string(), marriott),
    ]
}
