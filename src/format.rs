//! Separator label formatting.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::utils::date_formatter::{determine_date_format, format_timestamp, to_seconds};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

/// Turns a separator value into display text.
#[derive(Clone, Default)]
pub enum LabelFormatter {
    /// Plain numbers with a precision that follows their magnitude.
    #[default]
    Numeric,
    /// Values are timestamps in the given unit; precision follows the visible span.
    Time(TimeUnit),
    Custom(Arc<dyn Fn(f64) -> String + Send + Sync>),
}

impl fmt::Debug for LabelFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "Numeric"),
            Self::Time(unit) => f.debug_tuple("Time").field(unit).finish(),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl LabelFormatter {
    pub fn custom(f: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    pub fn format(&self, value: f64, span: f64) -> String {
        match self {
            Self::Numeric => format_numeric(value),
            Self::Time(unit) => {
                let fmt = determine_date_format(to_seconds(span.abs(), *unit));
                format_timestamp(value, fmt, *unit)
            }
            Self::Custom(f) => f(value),
        }
    }
}

/// Category label for `value`: the entry at its rounded absolute value, or an
/// empty string when that index falls outside the list.
pub fn format_from_labels(labels: &[String], value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let index = value.abs().round();
    if index >= labels.len() as f64 {
        return String::new();
    }
    labels[index as usize].clone()
}

pub fn format_numeric(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let raw = if value.abs() < 0.001 && value.abs() > 0.0 {
        format!("{:.4}", value)
    } else if value.abs() > 1000.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    };
    let trimmed = if raw.contains('.') {
        raw.trim_end_matches('0').trim_end_matches('.')
    } else {
        raw.as_str()
    };
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}
