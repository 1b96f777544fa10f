//! # Manas Evidence
//!
//! Validation of quoted evidence spans against their source text.
//!
//! The extraction boundary produces spans claiming "this quote appears at
//! these character offsets". This crate verifies the claim and repairs
//! recoverable mistakes: a quote that exists verbatim at the wrong
//! offsets gets its offsets recomputed, while a quote that does not
//! appear at all is an error for the caller to act on.
//!
//! The validator knows nothing about retry policy. How many repair
//! cycles to attempt, and when to drop evidence for a field, is the
//! extraction boundary's product decision; keeping the
//! `valid/repaired/errors` contract separate lets that policy move
//! without touching validation logic.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// A quoted span with its claimed character offsets in the source text.
///
/// Offsets count Unicode scalar values (chars), not bytes, and `end_char`
/// is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceSpan {
    pub quote: String,
    pub start_char: usize,
    pub end_char: usize,
}

/// Outcome of validating a set of spans against one source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True when every quote was found verbatim (offsets possibly
    /// repaired). False when any quote is unverifiable.
    pub valid: bool,
    /// The full span list with corrected offsets, present only when
    /// validation succeeded and at least one span needed repair. `None`
    /// means the caller's original spans are already correct, or
    /// validation failed.
    pub repaired: Option<Vec<EvidenceSpan>>,
    /// One message per unverifiable span.
    pub errors: Vec<String>,
}

/// Check every span's quote is an exact substring of `source_text` at its
/// claimed offsets, recomputing offsets (first occurrence) when the quote
/// exists elsewhere.
pub fn validate(spans: &[EvidenceSpan], source_text: &str) -> ValidationReport {
    let mut errors = Vec::new();
    let mut corrected = Vec::with_capacity(spans.len());
    let mut any_repaired = false;

    for (i, span) in spans.iter().enumerate() {
        if span_matches(span, source_text) {
            corrected.push(span.clone());
            continue;
        }
        match find_char_offsets(&span.quote, source_text) {
            Some((start_char, end_char)) => {
                warn!(
                    span = i,
                    claimed_start = span.start_char,
                    actual_start = start_char,
                    "evidence span offsets repaired"
                );
                any_repaired = true;
                corrected.push(EvidenceSpan {
                    quote: span.quote.clone(),
                    start_char,
                    end_char,
                });
            }
            None => {
                errors.push(format!(
                    "span {}: quote not found verbatim in source: {:?}",
                    i,
                    truncate(&span.quote, 60)
                ));
            }
        }
    }

    let valid = errors.is_empty();
    ValidationReport {
        valid,
        repaired: if valid && any_repaired {
            Some(corrected)
        } else {
            None
        },
        errors,
    }
}

/// Whether the claimed offsets select exactly the quote.
fn span_matches(span: &EvidenceSpan, source_text: &str) -> bool {
    if span.end_char < span.start_char {
        return false;
    }
    let selected: String = source_text
        .chars()
        .skip(span.start_char)
        .take(span.end_char - span.start_char)
        .collect();
    !span.quote.is_empty() && selected == span.quote
}

/// Char offsets of the first verbatim occurrence of `quote`.
fn find_char_offsets(quote: &str, source_text: &str) -> Option<(usize, usize)> {
    if quote.is_empty() {
        return None;
    }
    let byte_idx = source_text.find(quote)?;
    let start_char = source_text[..byte_idx].chars().count();
    Some((start_char, start_char + quote.chars().count()))
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}
