pub mod commentary;
pub mod steps;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::RedemptionOption;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Ranking {
    pub best: Option<RedemptionOption>,
    pub alternatives: Vec<RedemptionOption>,
}

pub fn compare_options(a: &RedemptionOption, b: &RedemptionOption) -> Ordering {
    b.has_enough_points
        .cmp(&a.has_enough_points)
        .then_with(|| b.cpp_or_zero().total_cmp(&a.cpp_or_zero()))
}

pub fn rank(mut options: Vec<RedemptionOption>) -> Ranking {
    options.sort_by(compare_options);
    let mut ordered = options.into_iter();
    let best = ordered.next();
    Ranking {
        best,
        alternatives: ordered.collect(),
    }
}
