//! Parsing and normalization of free-text molecular formula input.
//!
//! Input like "C16O2Cl4" or "c16 o2" is standardized to an upper-case,
//! space-separated form ("C16 O2 CL4") and an element-to-count table.

use std::collections::HashMap;

use log::{debug, info};

use crate::data::ElementCounts;

pub const HYDROGEN_ISOTOPES: [&str; 3] = ["H", "D", "T"];

pub fn is_hydrogen_isotope(symbol: &str) -> bool {
    HYDROGEN_ISOTOPES.contains(&symbol)
}

/// Upper-case the element symbols of a count table, dropping hydrogen
/// isotopes when `exclude_h` is set.
pub fn normalize_counts(counts: &ElementCounts, exclude_h: bool) -> ElementCounts {
    let mut normalized: ElementCounts = HashMap::new();
    for (symbol, count) in counts {
        let symbol = symbol.to_uppercase();
        if exclude_h && is_hydrogen_isotope(&symbol) {
            continue;
        }
        normalized.insert(symbol, *count);
    }
    normalized
}

/// Standardize a formula query and derive its element count table.
///
/// A token with no trailing count implies a unit count, so "CO" is one
/// cobalt atom, not carbon plus oxygen. Tokens shorter than two characters
/// after standardization are skipped. A hard parse failure returns the
/// input unchanged with an empty table; this never fails to the caller.
pub fn parse_formula_input(input: &str) -> (String, ElementCounts) {
    match parse_inner(input) {
        Ok(result) => result,
        Err(reason) => {
            info!("formula input {:?} unusable: {}", input, reason);
            (input.to_string(), HashMap::new())
        }
    }
}

fn parse_inner(input: &str) -> Result<(String, ElementCounts), String> {
    if !input.is_ascii() {
        return Err("non-ascii formula".to_string());
    }

    // Add implicit unit counts before re-splitting on element boundaries.
    let mut padded: Vec<String> = Vec::new();
    for token in input.to_uppercase().split_whitespace() {
        let mut token = token.to_string();
        if !token.ends_with(|c: char| c.is_ascii_digit()) {
            token.push('1');
        }
        padded.push(token);
    }

    let joined = padded.join("");
    let chars: Vec<char> = joined.chars().collect();

    let mut normalized = String::new();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && chars[i - 1].is_ascii_digit() && c.is_alphabetic() {
            normalized.push(' ');
        }
        normalized.push(*c);
    }

    if normalized.is_empty() {
        return Ok((input.to_string(), HashMap::new()));
    }

    let mut counts: ElementCounts = HashMap::new();
    for token in normalized.split(' ') {
        if token.len() < 2 {
            debug!("formula token {:?} skipped in {:?}", token, normalized);
            continue;
        }
        let second_is_alpha = token.chars().nth(1).map(|c| c.is_alphabetic()).unwrap_or(false);
        let split_at = if second_is_alpha { 2 } else { 1 };

        let symbol = token[..split_at].to_string();
        let count = token[split_at..]
            .parse::<u32>()
            .map_err(|e| format!("bad count in token {:?}: {}", token, e))?;

        counts.insert(symbol, count);
    }

    Ok((normalized, counts))
}
