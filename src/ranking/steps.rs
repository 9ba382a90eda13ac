use crate::format::{format_date, format_dollars, format_points};
use crate::types::{BookingStep, RedemptionOption, SearchType, TripRequest};

pub fn booking_steps(option: &RedemptionOption, trip: &TripRequest) -> Vec<BookingStep> {
    let program = &option.program;
    let mut steps = Vec::new();

    if let Some(source) = &option.transfer_from {
        let moved = option.points_spent();
        steps.push(BookingStep {
            title: format!("Transfer points from {source} to {program}"),
            instructions: vec![
                format!("Sign in to your {source} account"),
                "Open the transfer partners section".to_string(),
                format!("Select {program} as the transfer partner"),
                format!("Transfer {} points", format_points(Some(moved))),
                format!(
                    "Transfers may take up to {} to complete",
                    option.transfer_time.as_deref().unwrap_or("a few days")
                ),
            ],
        });
    }

    let mut search = vec![format!("Sign in to your {program} account")];
    match trip.search_type {
        SearchType::Flight => {
            search.push(format!(
                "Search award flights from {} to {}",
                trip.origin, trip.destination
            ));
            search.push(format!("Departure date: {}", format_date(trip.depart_date)));
            if trip.is_round_trip() {
                search.push(format!("Return date: {}", format_date(trip.return_date)));
            } else {
                search.push("One-way trip".to_string());
            }
            search.push(format!("Passengers: {}", trip.passengers));
            search.push("Look for saver level awards for the best value".to_string());
        }
        SearchType::Hotel => {
            search.push(format!("Search award stays in {}", trip.destination));
            search.push(format!("Check-in: {}", format_date(trip.depart_date)));
            search.push(format!("Check-out: {}", format_date(trip.return_date)));
            search.push(format!("Rooms: {}", trip.passengers));
            search.push("Look for standard room award rates".to_string());
        }
    }
    steps.push(BookingStep {
        title: format!("Search for award availability on {program}"),
        instructions: search,
    });

    steps.push(BookingStep {
        title: format!("Book the {program} award redemption"),
        instructions: vec![
            format!(
                "Confirm the price is about {} points",
                format_points(Some(option.points_required))
            ),
            "Complete traveler details".to_string(),
            format!("Pay taxes and fees of about {}", format_dollars(option.fees)),
            "Save the confirmation and check seat or room options".to_string(),
        ],
    });

    if let Some(spot) = &option.sweet_spot_details {
        if !spot.call_instructions.is_empty() {
            if let Some(last) = steps.last_mut() {
                last.instructions.push(spot.call_instructions.clone());
            }
        }
    }
    steps
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::ranking::steps::booking_steps;
    use crate::types::{Cabin, ProgramKind, RedemptionOption, TripRequest};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).expect("valid date")
    }

    #[test]
    fn transfer_options_start_with_a_transfer_step() {
        let trip = TripRequest::flight("LHR", "HND", date(4, 1), Cabin::Business)
            .with_return(date(4, 10));
        let option = RedemptionOption::new("Virgin Atlantic Flying Club", ProgramKind::Airline)
            .with_cost(90_000, 600.0, 11_160.0)
            .with_transfer("Chase Ultimate Rewards", 1.0, "Instant")
            .with_source_points(90_000);
        let steps = booking_steps(&option, &trip);
        assert_eq!(steps.len(), 3);
        assert_eq!(
            steps[0].title,
            "Transfer points from Chase Ultimate Rewards to Virgin Atlantic Flying Club"
        );
        assert!(steps[0].instructions.contains(&"Transfer 90,000 points".to_string()));
        assert!(steps[1].instructions.contains(&"Return date: Apr 10, 2025".to_string()));
        assert!(steps[2].instructions.contains(&"Pay taxes and fees of about $600".to_string()));
    }

    #[test]
    fn direct_hotel_booking_skips_transfer() {
        let trip = TripRequest::hotel("Tokyo", date(5, 1), date(5, 8), Cabin::Luxury);
        let option = RedemptionOption::new("World of Hyatt", ProgramKind::Hotel)
            .with_cost(210_000, 0.0, 4_900.0);
        let steps = booking_steps(&option, &trip);
        assert_eq!(steps.len(), 2);
        assert!(steps[0].instructions.contains(&"Check-out: May 8, 2025".to_string()));
    }
}
