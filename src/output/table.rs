use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::format::{format_cpp, format_dollars, format_points, NOT_AVAILABLE};
use crate::reference::partners::{TransferPartner, TransferSource};
use crate::reference::sweet_spots::SweetSpot;
use crate::types::{Program, RedemptionOption, SearchOutcome, ValueRating};
use crate::wallet::SearchRecord;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn rating_cell(rating: ValueRating) -> Cell {
    let cell = Cell::new(rating.label());
    match rating {
        ValueRating::Excellent | ValueRating::Great => cell.fg(Color::Green),
        ValueRating::Good => cell.fg(Color::Cyan),
        ValueRating::Average => cell.fg(Color::Yellow),
        ValueRating::Poor => cell.fg(Color::Red),
        ValueRating::Unknown => cell,
    }
}

fn transfer_label(option: &RedemptionOption) -> String {
    match &option.transfer_from {
        Some(source) => format!("{source} ({})", format_points(Some(option.points_spent()))),
        None => "-".to_string(),
    }
}

fn option_row(rank: &str, option: &RedemptionOption) -> Row {
    let enough = if option.has_enough_points {
        Cell::new("YES").fg(Color::Green)
    } else {
        Cell::new("NO").fg(Color::Red)
    };
    Row::from(vec![
        Cell::new(rank),
        Cell::new(&option.program),
        Cell::new(transfer_label(option)),
        Cell::new(format_points(Some(option.points_required))),
        Cell::new(format_dollars(option.fees)),
        Cell::new(format_dollars(option.cash_value)),
        Cell::new(format_cpp(option.cents_per_point)),
        rating_cell(option.value_rating),
        enough,
        Cell::new(if option.is_sweet_spot { "*" } else { "" }),
    ])
}

pub fn render_outcome_table(outcome: &SearchOutcome) -> String {
    let mut out = String::new();
    if let Some(message) = &outcome.message {
        out.push_str(message);
        out.push('\n');
    }
    if outcome.best.is_none() {
        return out;
    }

    let mut table = new_table();
    table.set_header(vec![
        "Rank",
        "Program",
        "Transfer From",
        "Points",
        "Fees",
        "Cash Value",
        "Value",
        "Rating",
        "Enough",
        "Sweet Spot",
    ]);
    if let Some(best) = &outcome.best {
        table.add_row(option_row("Best", best));
    }
    for (idx, option) in outcome.alternatives.iter().enumerate() {
        table.add_row(option_row(&(idx + 2).to_string(), option));
    }
    out.push_str(&table.to_string());

    if let Some(retail) = outcome.retail_value {
        out.push_str(&format!("\nEstimated retail value: {}", format_dollars(retail)));
    }
    if let Some(best) = &outcome.best {
        out.push('\n');
        out.push_str(&render_option_details(best));
    }
    out
}

pub fn render_option_details(option: &RedemptionOption) -> String {
    let mut out = format!("\n{} ({})\n", option.program, option.value_rating);
    let sections: [(&str, &[String]); 3] = [
        ("Pros", &option.pros),
        ("Cons", &option.cons),
        ("Notes", &option.notes),
    ];
    for (title, lines) in sections {
        if lines.is_empty() {
            continue;
        }
        out.push_str(&format!("{title}:\n"));
        for line in lines {
            out.push_str(&format!("  - {line}\n"));
        }
    }
    if !option.booking_steps.is_empty() {
        out.push_str("How to book:\n");
        for (idx, step) in option.booking_steps.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", idx + 1, step.title));
            for instruction in &step.instructions {
                out.push_str(&format!("     {instruction}\n"));
            }
        }
    }
    out
}

pub fn render_sweet_spots_table(spots: &[SweetSpot]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Id", "Name", "Book Via", "Route", "Points", "Value"]);
    for spot in spots {
        let points = spot
            .points_required
            .iter()
            .map(|tier| format!("{}: {}", tier.label, tier.points))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            spot.id.clone(),
            spot.name.clone(),
            spot.book_via.clone(),
            spot.route_label
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            points,
            spot.value_per_point.clone(),
        ]);
    }
    table.to_string()
}

pub fn render_partners_table(card: &str, partners: &[TransferPartner]) -> String {
    if partners.is_empty() {
        return format!("{card} has no transfer partners.");
    }
    let mut table = new_table();
    table.set_header(vec!["Partner", "Type", "Ratio", "Transfer Time", "Notes"]);
    for partner in partners {
        let notes = partner
            .ratio_note
            .iter()
            .chain(partner.bonus_note.iter())
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            partner.program.clone(),
            partner.kind.to_string(),
            partner.ratio.to_string(),
            partner.transfer_time.clone(),
            notes,
        ]);
    }
    table.to_string()
}

pub fn render_sources_table(program: &str, sources: &[TransferSource]) -> String {
    if sources.is_empty() {
        return format!("No transfer partners fund {program}.");
    }
    let mut table = new_table();
    table.set_header(vec!["Source", "Ratio", "Transfer Time", "Bonus"]);
    for source in sources {
        table.add_row(vec![
            source.card.clone(),
            source.ratio.to_string(),
            source.transfer_time.clone(),
            source.bonus_note.clone().unwrap_or_default(),
        ]);
    }
    table.to_string()
}

pub fn render_history_table(records: &[SearchRecord]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Searched At",
        "Type",
        "Route",
        "Cabin",
        "Best Program",
        "Value",
        "Options",
    ]);
    for rec in records {
        table.add_row(vec![
            rec.searched_at.to_rfc3339(),
            rec.search_type.to_string(),
            format!("{}-{}", rec.origin, rec.destination),
            rec.cabin.to_string(),
            rec.best_program.clone().unwrap_or_else(|| "-".to_string()),
            format_cpp(rec.best_cents_per_point),
            rec.option_count.to_string(),
        ]);
    }
    table.to_string()
}

pub fn render_wallet_table(programs: &[Program]) -> String {
    if programs.is_empty() {
        return "Wallet is empty. Add programs with `wallet add`.".to_string();
    }
    let mut table = new_table();
    table.set_header(vec!["Program", "Type", "Balance", "Expiry"]);
    for program in programs {
        table.add_row(vec![
            program.name.clone(),
            program.kind.to_string(),
            format_points(Some(program.balance)),
            program
                .expiry
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    table.to_string()
}
