use tracing::debug;

use crate::reference::partners::{TransferRatio, TransferSource};
use crate::reference::ReferenceData;
use crate::resolver::AwardResolver;
use crate::types::{Program, RedemptionOption, TripRequest};

/// Partner redemptions reachable from one held program's transfer edges.
pub fn expand_transfers(
    resolver: &AwardResolver<'_>,
    source: &Program,
    trip: &TripRequest,
    cash_value: f64,
) -> Vec<RedemptionOption> {
    let mut options = Vec::new();
    for partner in resolver.reference().partners_from(&source.name) {
        if !partner.kind.serves(trip.search_type) {
            continue;
        }
        let quote = resolver.resolve(&partner.program, trip);
        let Some(partner_points) = quote.points else {
            debug!(source = %source.name, partner = %partner.program, "no price for partner; skipping");
            continue;
        };
        let Some(source_points) = partner.ratio.card_points_for(partner_points) else {
            continue;
        };
        if source.balance < source_points {
            debug!(
                source = %source.name,
                partner = %partner.program,
                source_points,
                balance = source.balance,
                "balance cannot fund transfer"
            );
            continue;
        }

        let mut option = RedemptionOption::new(&partner.program, partner.kind)
            .with_cost(partner_points, quote.fees, cash_value)
            .with_transfer(
                &source.name,
                partner.ratio.partner_per_card_point(),
                &partner.transfer_time,
            )
            .with_source_points(source_points)
            .with_balance(source.balance)
            .with_source(quote.source)
            .with_note(format!("Transfer from {} ({} ratio)", source.name, partner.ratio));
        if partner.ratio != TransferRatio::ONE_TO_ONE {
            option.notes.push(format!(
                "Transfer {source_points} {} points for {partner_points} {} points",
                source.name, partner.program
            ));
        }
        option.notes.extend(partner.ratio_note.iter().cloned());
        option.notes.extend(partner.bonus_note.iter().cloned());
        option.notes.extend(quote.notes);
        options.push(option);
    }
    options
}

pub fn transfer_options_for(reference: &ReferenceData, program: &str) -> Vec<TransferSource> {
    reference
        .transfer_graph()
        .flat_map(|(card, partners)| {
            partners
                .iter()
                .filter(|partner| partner.program == program)
                .map(move |partner| TransferSource {
                    card: card.clone(),
                    ratio: partner.ratio,
                    transfer_time: partner.transfer_time.clone(),
                    bonus_note: partner.bonus_note.clone(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::estimate::Estimator;
    use crate::reference::ReferenceData;
    use crate::resolver::AwardResolver;
    use crate::transfer::{expand_transfers, transfer_options_for};
    use crate::types::{Cabin, Program, ProgramKind, TripRequest};
    use crate::valuation::ValuationSettings;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).expect("valid date")
    }

    #[test]
    fn card_points_fund_partner_awards() {
        let data = ReferenceData::builtin();
        let settings = ValuationSettings::default();
        let estimator = Estimator::new(&data, &settings);
        let resolver = AwardResolver::new(estimator);
        let trip = TripRequest::flight("LHR", "HND", date(4, 1), Cabin::Business)
            .with_return(date(4, 10));
        let chase = Program::new("Chase Ultimate Rewards", ProgramKind::Card, 100_000);

        let options = expand_transfers(&resolver, &chase, &trip, estimator.retail_value(&trip));
        assert!(options.iter().all(|o| o.program_type == ProgramKind::Airline));
        let virgin = options
            .iter()
            .find(|o| o.program == "Virgin Atlantic Flying Club")
            .expect("virgin option");
        assert_eq!(virgin.points_required, 90_000);
        assert_eq!(virgin.source_points, Some(90_000));
        assert_eq!(virgin.transfer_from.as_deref(), Some("Chase Ultimate Rewards"));
        assert_eq!(virgin.user_balance, 100_000);
        assert!(virgin.has_enough_points);
        assert!(virgin.is_instant_transfer());
    }

    #[test]
    fn uneven_ratios_are_checked_against_source_balance() {
        let data = ReferenceData::builtin();
        let settings = ValuationSettings::default();
        let estimator = Estimator::new(&data, &settings);
        let resolver = AwardResolver::new(estimator);
        let trip = TripRequest::flight("LAX", "HKG", date(6, 1), Cabin::Business);
        let cash = estimator.retail_value(&trip);

        let short = Program::new("Marriott Bonvoy", ProgramKind::Hotel, 100_000);
        assert!(expand_transfers(&resolver, &short, &trip, cash).is_empty());

        let enough = Program::new("Marriott Bonvoy", ProgramKind::Hotel, 150_000);
        let options = expand_transfers(&resolver, &enough, &trip, cash);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].program, "Alaska Airlines Mileage Plan");
        assert_eq!(options[0].points_required, 50_000);
        assert_eq!(options[0].source_points, Some(150_000));
        assert!(options[0].notes.iter().any(|n| n.contains("bonus miles")));
    }

    #[test]
    fn hotel_searches_only_expand_hotel_partners() {
        let data = ReferenceData::builtin();
        let settings = ValuationSettings::default();
        let estimator = Estimator::new(&data, &settings);
        let resolver = AwardResolver::new(estimator);
        let trip = TripRequest::hotel("Paris", date(7, 1), date(7, 3), Cabin::Standard);
        let amex = Program::new("American Express Membership Rewards", ProgramKind::Card, 50_000);

        let options = expand_transfers(&resolver, &amex, &trip, estimator.retail_value(&trip));
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].program, "Hilton Honors");
        assert_eq!(options[0].points_required, 100_000);
        assert_eq!(options[0].source_points, Some(50_000));
        assert!(options[0].has_enough_points);
    }

    #[test]
    fn reverse_lookup_lists_every_source() {
        let data = ReferenceData::builtin();
        let sources = transfer_options_for(&data, "Virgin Atlantic Flying Club");
        let cards: Vec<_> = sources.iter().map(|s| s.card.as_str()).collect();
        assert_eq!(
            cards,
            vec![
                "American Express Membership Rewards",
                "Capital One Miles",
                "Chase Ultimate Rewards",
                "Citi ThankYou Rewards"
            ]
        );
        assert!(transfer_options_for(&data, "Nowhere Rewards").is_empty());
    }
}
