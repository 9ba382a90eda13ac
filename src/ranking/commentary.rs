use crate::format::{format_cpp, format_dollars, format_points};
use crate::ranking::Ranking;
use crate::types::{RedemptionOption, UserPreferences};

const GOOD_VALUE_CPP: f64 = 1.5;
const BELOW_AVERAGE_SHARE: f64 = 0.9;
const MANY_MORE_POINTS_SHARE: f64 = 1.2;
const HIGH_FEE_SHARE: f64 = 1.5;
const SLOW_TRANSFER_DAYS: u32 = 2;

/// Longest wait named in a transfer time such as "1-3 days". "Instant" is 0.
pub fn transfer_days(transfer_time: &str) -> u32 {
    transfer_time
        .split(|c: char| !c.is_ascii_digit())
        .filter_map(|chunk| chunk.parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

pub fn pros_for(
    option: &RedemptionOption,
    baseline: Option<&RedemptionOption>,
    preferences: &UserPreferences,
) -> Vec<String> {
    let mut pros = Vec::new();
    match baseline {
        None => {
            if option.cpp_or_zero() > GOOD_VALUE_CPP {
                pros.push(format!(
                    "Good value at {} per point",
                    format_cpp(option.cents_per_point)
                ));
            }
        }
        Some(best) => {
            if option.cpp_or_zero() > best.cpp_or_zero() {
                pros.push(format!(
                    "Better value per point ({} vs {})",
                    format_cpp(option.cents_per_point),
                    format_cpp(best.cents_per_point)
                ));
            }
            if option.points_spent() < best.points_spent() {
                pros.push(format!(
                    "Requires fewer points ({} vs {})",
                    format_points(Some(option.points_spent())),
                    format_points(Some(best.points_spent()))
                ));
            }
            if option.fees < best.fees {
                pros.push(format!(
                    "Lower fees ({} vs {})",
                    format_dollars(option.fees),
                    format_dollars(best.fees)
                ));
            }
        }
    }
    if option.is_sweet_spot {
        pros.push(format!("Known sweet spot for {} program", option.program));
    }
    if preferences.prefers(&option.program) {
        pros.push(format!("{} is one of your preferred airlines", option.program));
    }
    pros
}

pub fn cons_for(
    option: &RedemptionOption,
    baseline: Option<&RedemptionOption>,
    preferences: &UserPreferences,
) -> Vec<String> {
    let mut cons = Vec::new();
    if let Some(best) = baseline {
        if option.cpp_or_zero() < best.cpp_or_zero() * BELOW_AVERAGE_SHARE {
            cons.push(format!(
                "Below-average value at {} per point",
                format_cpp(option.cents_per_point)
            ));
        }
        let (spent, best_spent) = (option.points_spent(), best.points_spent());
        if best_spent > 0 && spent as f64 > best_spent as f64 * MANY_MORE_POINTS_SHARE {
            cons.push(format!(
                "Requires {} more points than the best option",
                format_points(Some(spent - best_spent))
            ));
        }
        if best.fees > 0.0 && option.fees > best.fees * HIGH_FEE_SHARE {
            cons.push(format!("High fees ({})", format_dollars(option.fees)));
        }
    }
    if let (Some(_), Some(time)) = (&option.transfer_from, &option.transfer_time) {
        if transfer_days(time) > SLOW_TRANSFER_DAYS {
            cons.push(format!("Slow transfers ({time})"));
        }
    }
    if !option.has_enough_points {
        let needed = option.points_spent();
        cons.push(format!(
            "Not enough points: need {}, have {}",
            format_points(Some(needed)),
            format_points(Some(option.user_balance))
        ));
    }
    if preferences.avoids(&option.program) {
        cons.push(format!("{} is on your avoided airlines list", option.program));
    }
    cons
}

pub fn describe(ranking: &mut Ranking, preferences: &UserPreferences) {
    if let Some(best) = ranking.best.as_mut() {
        best.pros = pros_for(best, None, preferences);
        best.cons = cons_for(best, None, preferences);
    }
    let Some(best) = ranking.best.as_ref() else {
        return;
    };
    for alternative in &mut ranking.alternatives {
        alternative.pros = pros_for(alternative, Some(best), preferences);
        alternative.cons = cons_for(alternative, Some(best), preferences);
    }
}
