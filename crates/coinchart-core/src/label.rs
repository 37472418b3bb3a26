// File: crates/coinchart-core/src/label.rs
// Summary: Value label formatting for axis ticks and the selected-point readout.

/// A numeric value with a unit suffix, e.g. `1,234$`.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueLabel<'a> {
    pub value: f64,
    pub unit: &'a str,
}

impl<'a> ValueLabel<'a> {
    pub fn new(value: f64, unit: &'a str) -> Self {
        Self { value, unit }
    }

    /// Fraction digits shown for this magnitude. Large values drop decimals,
    /// small ones keep three so sub-dollar coins still read.
    pub fn fraction_digits(&self) -> usize {
        let v = self.value;
        if v > 1000.0 {
            0
        } else if (2.0..=999.0).contains(&v) {
            2
        } else {
            3
        }
    }

    pub fn format(&self) -> String {
        format!("{}{}", format_grouped(self.value, 0, self.fraction_digits()), self.unit)
    }
}

/// Format with `,` thousands separators and between `min_frac` and `max_frac`
/// fraction digits (trailing zeros beyond `min_frac` trimmed).
pub fn format_grouped(value: f64, min_frac: usize, max_frac: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let max_frac = max_frac.max(min_frac);
    let fixed = format!("{:.*}", max_frac, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (fixed.as_str(), ""),
    };

    let mut frac = frac_part.to_string();
    while frac.len() > min_frac && frac.ends_with('0') {
        frac.pop();
    }

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*d as char);
    }

    let is_zero = grouped.chars().all(|c| c == '0' || c == ',') && frac.chars().all(|c| c == '0');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}
