use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::entity::{DraftField, ValidationError};

// Parse a whole number typed into a numeric form field, e.g. "1,000,000"
pub fn parse_numeric_input(field: DraftField, input: &str) -> Result<i64, ValidationError> {
    lazy_static! {
        static ref LEADING_INT: Regex = Regex::new(r"^\s*([+-]?\d+)").unwrap();
    }

    let invalid = || ValidationError::InvalidNumber {
        field,
        input: input.to_string(),
    };

    let stripped = input.replace(',', "");
    let digits = LEADING_INT
        .captures(&stripped)
        .and_then(|cap| cap.get(1))
        .ok_or_else(invalid)?;

    digits.as_str().parse::<i64>().map_err(|_| invalid())
}

// Whether an API payload counts as an acknowledgement
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// Thousands separators for display, e.g. 1000000 -> "1,000,000"
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
