use std::fmt;

use crate::error::Result;
use crate::metricdata::{Point, PointSet};
use crate::reduce::FinalResult;

const SIGNIFICANT_DIGITS: usize = 5;

/// Formats `value` with the given number of significant digits the way Java's
/// `%g` does: the shortest decimal representation is rounded half up, trailing
/// zeros are kept, and scientific notation is used when the rounded magnitude
/// is below `1e-4` or at least `10^digits`.
pub fn format_significant(value: f64, digits: usize) -> String {
    assert!(digits >= 1);
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return format!("{:.*}", digits - 1, value);
    }
    let (mut mantissa, mut exponent) = shortest_digits(value.abs());
    if mantissa.len() > digits {
        let round_up = mantissa[digits] >= b'5';
        mantissa.truncate(digits);
        if round_up && increment(&mut mantissa) {
            exponent += 1;
        }
    }
    mantissa.resize(digits, b'0');

    let sign = if value < 0.0 { "-" } else { "" };
    let mantissa: String = mantissa.into_iter().map(char::from).collect();
    if (-4..digits as i32).contains(&exponent) {
        if exponent >= 0 {
            let (int, frac) = mantissa.split_at(exponent as usize + 1);
            if frac.is_empty() {
                format!("{}{}", sign, int)
            } else {
                format!("{}{}.{}", sign, int, frac)
            }
        } else {
            let zeros = "0".repeat((-exponent - 1) as usize);
            format!("{}0.{}{}", sign, zeros, mantissa)
        }
    } else {
        let (first, rest) = mantissa.split_at(1);
        let point = if rest.is_empty() { "" } else { "." };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}{}{}{}e{}{:02}",
            sign,
            first,
            point,
            rest,
            exp_sign,
            exponent.abs()
        )
    }
}

// digits and exponent of the shortest representation, `d.ddd * 10^exponent`
fn shortest_digits(value: f64) -> (Vec<u8>, i32) {
    let repr = format!("{:e}", value);
    let (mantissa, exponent) = repr.split_once('e').unwrap_or((repr.as_str(), "0"));
    let digits = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    (digits, exponent.parse().unwrap_or(0))
}

/// Adds one unit in the last place; returns true when the carry overflows,
/// in which case the digits become `100...0`.
fn increment(digits: &mut [u8]) -> bool {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return false;
        }
    }
    digits[0] = b'1';
    true
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Report {
    pub index: usize,
    pub point: Point,
    pub radius: f64,
}

impl Report {
    pub fn new(points: &PointSet, result: &FinalResult) -> Result<Self> {
        Ok(Self {
            index: result.index,
            point: points.get(result.index)?,
            radius: result.radius,
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({},{})",
            self.index,
            format_significant(self.point.x, SIGNIFICANT_DIGITS),
            format_significant(self.point.y, SIGNIFICANT_DIGITS)
        )?;
        write!(f, "{}", format_significant(self.radius, SIGNIFICANT_DIGITS))
    }
}
