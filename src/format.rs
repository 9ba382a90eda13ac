//! Display helpers. Every formatter returns `N/A` for missing or non-finite input.

use chrono::NaiveDate;

pub const NOT_AVAILABLE: &str = "N/A";

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn format_currency(value: Option<f64>, fraction_digits: usize) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return NOT_AVAILABLE.to_string();
    };
    let rendered = format!("{:.*}", fraction_digits, value.abs());
    let (whole, fraction) = match rendered.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (rendered.as_str(), None),
    };
    let sign = if value < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(fraction) => format!("{sign}${}.{fraction}", group_thousands(whole)),
        None => format!("{sign}${}", group_thousands(whole)),
    }
}

pub fn format_dollars(value: f64) -> String {
    format_currency(Some(value), 0)
}

pub fn format_points(points: Option<u64>) -> String {
    match points {
        Some(points) => group_thousands(&points.to_string()),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_cpp(cents: Option<f64>) -> String {
    match cents.filter(|c| c.is_finite()) {
        Some(cents) => format!("{cents:.1}¢"),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_cents_per_point(cents: Option<f64>) -> String {
    match cents.filter(|c| c.is_finite()) {
        Some(cents) => format!("{cents:.1} cents per point"),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::format::{
        format_cents_per_point, format_cpp, format_currency, format_date, format_points,
    };

    #[test]
    fn currency_groups_thousands_and_keeps_sign() {
        assert_eq!(format_currency(Some(11_160.0), 0), "$11,160");
        assert_eq!(format_currency(Some(1_234_567.891), 2), "$1,234,567.89");
        assert_eq!(format_currency(Some(-250.0), 0), "-$250");
        assert_eq!(format_currency(Some(999.0), 0), "$999");
        assert_eq!(format_currency(Some(f64::NAN), 0), "N/A");
        assert_eq!(format_currency(None, 2), "N/A");
    }

    #[test]
    fn points_dates_and_cpp() {
        assert_eq!(format_points(Some(90_000)), "90,000");
        assert_eq!(format_points(Some(500)), "500");
        assert_eq!(format_points(None), "N/A");
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).expect("valid date");
        assert_eq!(format_date(Some(date)), "Apr 1, 2025");
        assert_eq!(format_date(None), "N/A");
        assert_eq!(format_cpp(Some(11.7)), "11.7¢");
        assert_eq!(format_cpp(Some(f64::INFINITY)), "N/A");
        assert_eq!(format_cents_per_point(Some(2.0)), "2.0 cents per point");
    }
}
