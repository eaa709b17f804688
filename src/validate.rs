// Copyright (c) 2025 Ledgerline.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};

use crate::models::{Category, RecordInput};

/// Non-negative integer or decimal with at most two fractional digits.
pub static AMOUNT_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0|[1-9]\d*)(\.\d{1,2})?$").expect("amount pattern"));

/// YYYY-MM-DD with month 01-12 and day 01-31.
pub static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("date pattern"));

const MARKUP_CHARS: [char; 4] = ['<', '>', '{', '}'];

/// Result of validating the whole form. `errors` is keyed by field name and
/// holds one message per failing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValidation {
    pub is_valid: bool,
    pub errors: BTreeMap<&'static str, &'static str>,
}

/// `None` means the description passes; `Some` carries the user-facing reason.
pub fn check_description(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        return Some("Description is required.");
    }
    let len = value.trim().chars().count();
    if len < 3 {
        return Some("Description must be at least 3 characters.");
    }
    if len > 50 {
        return Some("Description must be 50 characters or fewer.");
    }
    if value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace)
        || value.contains("  ")
    {
        return Some("Description cannot start or end with a space, or contain consecutive spaces.");
    }
    if value.contains(MARKUP_CHARS) {
        return Some("Description cannot contain the characters <, >, { or }.");
    }
    if has_repeated_word(value) {
        return Some("Description contains a repeated word. Try being more specific.");
    }
    None
}

// Same significant word (4+ letters, case-insensitive) appearing twice.
fn has_repeated_word(value: &str) -> bool {
    let mut seen = HashSet::new();
    value
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|w| w.chars().count() >= 4)
        .any(|w| !seen.insert(w.to_lowercase()))
}

pub fn check_amount(value: &str) -> Option<&'static str> {
    let raw = value.trim();
    if raw.is_empty() {
        return Some("Amount is required.");
    }
    if !AMOUNT_SHAPE.is_match(raw) {
        return Some("Amount must be a positive number with up to 2 decimal places.");
    }
    let amount = match raw.parse::<Decimal>() {
        Ok(d) => d,
        Err(_) => return Some("Amount must be a positive number with up to 2 decimal places."),
    };
    if amount <= Decimal::ZERO {
        return Some("Amount must be greater than 0.");
    }
    if amount > Decimal::from(1_000_000) {
        return Some("Amount cannot exceed 1,000,000.");
    }
    None
}

pub fn check_date(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        return Some("Date is required.");
    }
    if !DATE_SHAPE.is_match(value) {
        return Some("Date must be in YYYY-MM-DD format.");
    }
    let date = match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => return Some("Date must be a real calendar date."),
    };
    if date.year() < 2000 {
        return Some("Date must be from the year 2000 or later.");
    }
    if date > Local::now().date_naive() {
        return Some("Date cannot be in the future.");
    }
    None
}

pub fn check_category(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        return Some("Please select a category.");
    }
    if Category::parse(value).is_none() {
        return Some("Please select a valid category.");
    }
    None
}

/// Runs all four field checks independently (no short-circuit) and collects
/// the failures. Pure: no state is read or written beyond the clock.
pub fn validate_form(input: &RecordInput) -> FormValidation {
    let checks: [(&'static str, Option<&'static str>); 4] = [
        ("description", check_description(&input.description)),
        ("amount", check_amount(&input.amount)),
        ("date", check_date(&input.date)),
        ("category", check_category(&input.category)),
    ];

    let mut errors = BTreeMap::new();
    for (field, failure) in checks {
        if let Some(message) = failure {
            errors.insert(field, message);
        }
    }
    FormValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}
