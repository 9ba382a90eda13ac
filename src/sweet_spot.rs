use crate::reference::sweet_spots::SweetSpot;
use crate::reference::ReferenceData;
use crate::types::{RedemptionOption, TripRequest};

fn qualifies(reference: &ReferenceData, spot: &SweetSpot, trip: &TripRequest) -> bool {
    spot.kind.serves(trip.search_type)
        && spot.cabins.contains(&trip.effective_cabin())
        && spot
            .route
            .matches(&trip.origin, &trip.destination, |code| reference.region_of(code))
}

pub fn matching_sweet_spots<'r>(reference: &'r ReferenceData, trip: &TripRequest) -> Vec<&'r SweetSpot> {
    reference
        .sweet_spots()
        .iter()
        .filter(|spot| qualifies(reference, spot, trip))
        .collect()
}

pub fn match_sweet_spot<'r>(reference: &'r ReferenceData, trip: &TripRequest) -> Option<&'r SweetSpot> {
    reference
        .sweet_spots()
        .iter()
        .find(|spot| qualifies(reference, spot, trip))
}

/// Flags options booked through `spot` with points from one of its sources.
/// Options already flagged by an earlier spot are left alone. Returns the
/// number of options newly flagged.
pub fn annotate(options: &mut [RedemptionOption], spot: &SweetSpot) -> usize {
    let mut flagged = 0;
    for option in options.iter_mut() {
        if option.is_sweet_spot || option.program != spot.book_via {
            continue;
        }
        if !spot.accepts_source(option.points_source()) {
            continue;
        }
        option.is_sweet_spot = true;
        option.sweet_spot_details = Some(spot.clone());
        option.notes.push(format!("Sweet spot: {}", spot.name));
        flagged += 1;
    }
    flagged
}
