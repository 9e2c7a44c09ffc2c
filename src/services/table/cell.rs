use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// A single untyped table cell as it arrives from the source file.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn num(value: f64) -> Self {
        Cell::Number(value)
    }

    pub fn text<S: Into<String>>(value: S) -> Self {
        Cell::Text(value.into())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Number(v) => {
                if v.fract() == 0.0 && v.abs() < 1e15 {
                    write!(f, "{}", *v as i64)
                } else {
                    write!(f, "{}", v)
                }
            }
            Cell::Text(s) => f.write_str(s),
        }
    }
}

/// Outcome of best-effort numeric coercion. `Missing` covers empty cells and
/// NA tokens; `Malformed` marks text that is not a number at all. Callers in
/// the aggregation path decide whether `Malformed` counts as zero or is
/// dropped, but it never raises.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Finite(f64),
    Missing,
    Malformed,
}

impl Numeric {
    pub fn finite(self) -> Option<f64> {
        match self {
            Numeric::Finite(v) => Some(v),
            Numeric::Missing | Numeric::Malformed => None,
        }
    }
}

// Digits grouped with thousands separators, e.g. "1,234.5"
static GROUPED_DIGITS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?\d{1,3}(,\d{3})+(\.\d+)?$").expect("valid grouped-digits pattern")
});

const NA_TOKENS: [&str; 5] = ["na", "n/a", "nan", "null", "none"];

pub fn coerce(cell: &Cell) -> Numeric {
    match cell {
        Cell::Empty => Numeric::Missing,
        Cell::Number(v) => {
            if v.is_finite() {
                Numeric::Finite(*v)
            } else {
                Numeric::Missing
            }
        }
        Cell::Text(s) => coerce_text(s),
    }
}

fn coerce_text(raw: &str) -> Numeric {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Numeric::Missing;
    }
    let lower = trimmed.to_ascii_lowercase();
    if NA_TOKENS.contains(&lower.as_str()) {
        return Numeric::Missing;
    }

    let candidate = if GROUPED_DIGITS.is_match(trimmed) {
        trimmed.replace(',', "")
    } else {
        trimmed.to_string()
    };

    match candidate.parse::<f64>() {
        Ok(v) if v.is_finite() => Numeric::Finite(v),
        // "inf" and friends parse but carry no usable magnitude
        Ok(_) => Numeric::Missing,
        Err(_) => Numeric::Malformed,
    }
}
