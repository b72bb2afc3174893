//! Label text generation and orientation around a circle

use super::polar::normalize_angle;
use super::types::{Em, TextAnchor};

/// Where label text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelValues {
    /// Explicit values, cycled when shorter than the needed count
    Explicit(Vec<String>),
    /// "1", "2", ...
    Numeric,
    /// "A".."Z", then "AA", "AB", ...
    Alpha,
    /// "I", "II", "III", ...
    Roman,
}

/// Generate `count` label strings, assigned in order
pub fn generate_labels(values: &LabelValues, count: usize) -> Vec<String> {
    match values {
        LabelValues::Explicit(list) if list.is_empty() => vec![String::new(); count],
        LabelValues::Explicit(list) => (0..count).map(|i| list[i % list.len()].clone()).collect(),
        LabelValues::Numeric => (1..=count).map(|n| n.to_string()).collect(),
        LabelValues::Alpha => (0..count).map(alpha_label).collect(),
        LabelValues::Roman => (1..=count).map(to_roman).collect(),
    }
}

/// Alphabetic label for a zero-based index: 0 → "A", 25 → "Z", 26 → "AA", 27 → "AB"
pub fn alpha_label(index: usize) -> String {
    let letter = |i: usize| char::from(b'A' + (i % 26) as u8);
    if index < 26 {
        letter(index).to_string()
    } else {
        let mut label = alpha_label(index / 26 - 1);
        label.push(letter(index));
        label
    }
}

const ROMAN_NUMERALS: [(usize, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Subtractive Roman numeral; zero yields an empty string
pub fn to_roman(mut value: usize) -> String {
    let mut out = String::new();
    for &(amount, symbol) in &ROMAN_NUMERALS {
        while value >= amount {
            out.push_str(symbol);
            value -= amount;
        }
    }
    out
}

/// Text anchor and baseline shift for a label at some angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelOrientation {
    pub anchor: TextAnchor,
    pub dy: Em,
}

/// Pick anchor and baseline shift so that a label reads correctly at `angle`.
///
/// Right side `[315, 45)` anchors at the start, left side `[135, 225)` at the
/// end, top and bottom zones in the middle. Labels in the upper half
/// `(180, 360)` sit above their point, the lower half `(0, 180)` below it, and
/// the horizontal axis (exactly 0 or 180) is centered on the baseline.
pub fn resolve_orientation(angle: f64) -> LabelOrientation {
    let a = normalize_angle(angle);

    let anchor = if !(45.0..315.0).contains(&a) {
        TextAnchor::Start
    } else if (135.0..225.0).contains(&a) {
        TextAnchor::End
    } else {
        TextAnchor::Middle
    };

    let dy = if a == 0.0 || a == 180.0 {
        Em(0.35)
    } else if a > 180.0 {
        Em(-0.3)
    } else {
        Em(0.8)
    };

    LabelOrientation { anchor, dy }
}
