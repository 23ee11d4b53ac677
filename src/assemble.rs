use std::fmt::Write as _;

use crate::{NEUTRAL_WEIGHT, NormalizedValue};

/// One validated property ready to be rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandPart<'a> {
    pub property: &'a str,
    pub value: &'a NormalizedValue,
    pub weight: f64,
}

impl<'a> CommandPart<'a> {
    #[must_use]
    pub fn new(property: &'a str, value: &'a NormalizedValue, weight: f64) -> Self {
        Self {
            property,
            value,
            weight,
        }
    }
}

/// Render `style version prop1 prop2 ...`.
///
/// Parts are emitted in the order given. Formatting cannot fail; every
/// check has already happened in the validator.
#[must_use]
pub fn assemble(style: &str, version: &str, parts: &[CommandPart<'_>]) -> String {
    let mut out = String::with_capacity(style.len() + version.len() + parts.len() * 16);
    out.push_str(style);
    out.push(' ');
    out.push_str(version);
    for part in parts {
        out.push(' ');
        out.push_str(part.property);
        out.push(' ');
        out.push_str(part.value.as_str());
        if let Some(weight) = format_weight(part.weight) {
            let _ = write!(out, "::{weight}");
        }
    }
    out
}

/// The `::weight` suffix text, or `None` for neutral and zero weights.
///
/// Uses the shortest decimal that round-trips: `2.0` is `"2"`, `0.75` is
/// `"0.75"`, `-0.5` is `"-0.5"`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn format_weight(weight: f64) -> Option<String> {
    if weight == NEUTRAL_WEIGHT || weight == 0.0 || !weight.is_finite() {
        return None;
    }
    Some(format!("{weight}"))
}
