use anyhow::Result;

use crate::types::{Program, SearchOutcome};
use crate::wallet::SearchRecord;

pub fn outcome_to_csv(outcome: &SearchOutcome) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "rank",
        "program",
        "program_type",
        "transfer_from",
        "points_required",
        "source_points",
        "fees",
        "cash_value",
        "cents_per_point",
        "value_rating",
        "has_enough_points",
        "sweet_spot",
    ])?;
    for (idx, option) in outcome.options().enumerate() {
        writer.write_record([
            (idx + 1).to_string(),
            option.program.clone(),
            option.program_type.to_string(),
            option.transfer_from.clone().unwrap_or_default(),
            option.points_required.to_string(),
            option.source_points.map(|p| p.to_string()).unwrap_or_default(),
            format!("{:.2}", option.fees),
            format!("{:.2}", option.cash_value),
            option
                .cents_per_point
                .map(|c| format!("{c:.1}"))
                .unwrap_or_default(),
            option.value_rating.label().to_string(),
            option.has_enough_points.to_string(),
            option
                .sweet_spot_details
                .as_ref()
                .map(|spot| spot.id.clone())
                .unwrap_or_default(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn history_to_csv(records: &[SearchRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "searched_at",
        "search_type",
        "origin",
        "destination",
        "cabin",
        "best_program",
        "best_cents_per_point",
        "option_count",
        "fingerprint",
    ])?;
    for rec in records {
        writer.write_record([
            rec.searched_at.to_rfc3339(),
            rec.search_type.to_string(),
            rec.origin.clone(),
            rec.destination.clone(),
            rec.cabin.to_string(),
            rec.best_program.clone().unwrap_or_default(),
            rec.best_cents_per_point
                .map(|c| format!("{c:.1}"))
                .unwrap_or_default(),
            rec.option_count.to_string(),
            rec.fingerprint.clone(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn wallet_to_csv(programs: &[Program]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["name", "type", "balance", "expiry"])?;
    for program in programs {
        writer.write_record([
            program.name.clone(),
            program.kind.to_string(),
            program.balance.to_string(),
            program.expiry.map(|d| d.to_string()).unwrap_or_default(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

#[cfg(test)]
mod tests {
    use crate::output::csv::{outcome_to_csv, wallet_to_csv};
    use crate::types::{Program, ProgramKind, RedemptionOption, SearchOutcome};

    #[test]
    fn outcome_rows_follow_rank_order() {
        let mut outcome = SearchOutcome::empty("", "fp");
        outcome.best = Some(
            RedemptionOption::new("World of Hyatt", ProgramKind::Hotel)
                .with_cost(210_000, 0.0, 7_000.0)
                .with_balance(250_000),
        );
        let csv = outcome_to_csv(&outcome).expect("csv");
        let mut lines = csv.lines();
        assert!(lines.next().expect("header").starts_with("rank,program"));
        let row = lines.next().expect("best row");
        assert!(row.starts_with("1,World of Hyatt,hotel,,210000,,0.00,7000.00,"));
        assert!(row.contains(",true,"));
    }

    #[test]
    fn wallet_rows_use_wallet_field_names() {
        let csv = wallet_to_csv(&[Program::new("Delta SkyMiles", ProgramKind::Airline, 42_000)])
            .expect("csv");
        assert_eq!(csv, "name,type,balance,expiry\nDelta SkyMiles,airline,42000,\n");
    }
}
