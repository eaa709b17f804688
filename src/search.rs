// Copyright (c) 2025 Ledgerline.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Regex search over records. Patterns come straight from user input, so an
//! uncompilable pattern is an expected case: search yields no matches and
//! highlighting yields plain text, never an error.

use regex::{Regex, RegexBuilder};

use crate::models::Record;

const HIGHLIGHT_ON: &str = "\x1b[7m";
const HIGHLIGHT_OFF: &str = "\x1b[27m";

fn compile(term: &str, case_insensitive: bool) -> Option<Regex> {
    RegexBuilder::new(term.trim())
        .case_insensitive(case_insensitive)
        .build()
        .ok()
}

/// An empty or whitespace-only term is always valid.
pub fn is_valid_pattern(term: &str) -> bool {
    term.trim().is_empty() || Regex::new(term.trim()).is_ok()
}

/// Records whose description, category, amount, or date matches the pattern.
/// An empty term returns every record in its original order; an invalid
/// pattern returns no records.
pub fn search_records(records: &[Record], term: &str, case_insensitive: bool) -> Vec<Record> {
    if term.trim().is_empty() {
        return records.to_vec();
    }
    let Some(re) = compile(term, case_insensitive) else {
        return Vec::new();
    };
    records
        .iter()
        .filter(|r| {
            re.is_match(&r.description)
                || re.is_match(r.category.as_str())
                || re.is_match(&r.amount.to_string())
                || re.is_match(&r.date.to_string())
        })
        .cloned()
        .collect()
}

// Record text is arbitrary user input; strip control characters so it cannot
// smuggle escape sequences past the highlight markers.
fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

/// Wraps every match in terminal inverse-video markers. The literal text is
/// sanitized first; an invalid pattern returns the sanitized text unmarked.
pub fn highlight_text(text: &str, term: &str, case_insensitive: bool) -> String {
    let clean = sanitize(text);
    if term.trim().is_empty() {
        return clean;
    }
    let Some(re) = compile(term, case_insensitive) else {
        return clean;
    };
    re.replace_all(&clean, |caps: &regex::Captures| {
        format!("{HIGHLIGHT_ON}{}{HIGHLIGHT_OFF}", &caps[0])
    })
    .into_owned()
}
