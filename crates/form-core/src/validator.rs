use thiserror::Error;

use crate::{
    field::{FieldName, FieldValues},
    rules::rule_for,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("This field is required.")]
    Required,
    #[error("{0}")]
    OutOfRange(&'static str),
}

pub type FieldCheck = Result<f64, ValidationError>;

/// Checks one raw input against its rule: empty or non-numeric input is
/// `Required`, a number outside the inclusive bounds is `OutOfRange`.
pub fn validate_field(name: FieldName, raw: &str) -> FieldCheck {
    let value = parse_leading_number(raw).ok_or(ValidationError::Required)?;
    let rule = rule_for(name);
    if !rule.contains(value) {
        return Err(ValidationError::OutOfRange(rule.message));
    }
    Ok(value)
}

/// Parses the longest decimal prefix of `raw` after trimming, so `"12abc"`
/// reads as 12 while `"abc"` and `"."` have no value at all. A leading
/// `Infinity` or an overflowing exponent yields an infinite value, which the
/// range check then rejects.
pub fn parse_leading_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if trimmed[end..].starts_with("Infinity") {
        let sign = if bytes.first() == Some(&b'-') { -1.0 } else { 1.0 };
        return Some(sign * f64::INFINITY);
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    trimmed[..end].parse::<f64>().ok()
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldEntry {
    pub raw: String,
    pub check: FieldCheck,
    pub touched: bool,
}

impl Default for FieldEntry {
    fn default() -> Self {
        Self {
            raw: String::new(),
            check: Err(ValidationError::Required),
            touched: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    entries: [FieldEntry; 7],
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the new raw input and re-validates that field.
    pub fn set(&mut self, name: FieldName, raw: impl Into<String>) -> &FieldCheck {
        let entry = &mut self.entries[name.index()];
        entry.raw = raw.into();
        entry.check = validate_field(name, &entry.raw);
        entry.touched = true;
        &entry.check
    }

    pub fn entry(&self, name: FieldName) -> &FieldEntry {
        &self.entries[name.index()]
    }

    pub fn raw(&self, name: FieldName) -> &str {
        &self.entry(name).raw
    }

    pub fn clear(&mut self) {
        self.entries = Default::default();
    }

    /// Inline errors to show: only fields the user has already edited.
    pub fn visible_errors(&self) -> impl Iterator<Item = (FieldName, &ValidationError)> + '_ {
        FieldName::ALL.into_iter().filter_map(|name| {
            let entry = self.entry(name);
            match &entry.check {
                Err(err) if entry.touched => Some((name, err)),
                _ => None,
            }
        })
    }

    pub fn values(&self) -> FieldValues {
        let mut values = FieldValues::default();
        for name in FieldName::ALL {
            values.set(name, self.raw(name));
        }
        values
    }
}

pub fn check_form_validity(form: &FormState) -> bool {
    FieldName::ALL
        .into_iter()
        .all(|name| form.entry(name).check.is_ok())
}
