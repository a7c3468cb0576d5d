//! Case identifier shape checks.
//!
//! Two identifier formats are accepted:
//!
//! - Citation: a letter followed by 7 to 16 letters or digits (8 to 17 total).
//! - Case number: a digit 1-4 followed by exactly 13 letters, digits or
//!   hyphens (14 total).

const CITATION_MIN_LEN: usize = 8;
const CITATION_MAX_LEN: usize = 17;
const CASE_NUMBER_LEN: usize = 14;

/// Kind of identifier a text looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Citation,
    CaseNumber,
}

/// Classify text as a citation or case number, if it has either shape.
pub fn classify(text: &str) -> Option<IdentifierKind> {
    if is_case_number(text) {
        Some(IdentifierKind::CaseNumber)
    } else if is_citation(text) {
        Some(IdentifierKind::Citation)
    } else {
        None
    }
}

/// True if the text could be a case id or citation.
pub fn possible_case_id(text: &str) -> bool {
    classify(text).is_some()
}

fn is_citation(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_alphabetic()
        && (CITATION_MIN_LEN..=CITATION_MAX_LEN).contains(&text.len())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

fn is_case_number(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    matches!(first, '1'..='4')
        && text.len() == CASE_NUMBER_LEN
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}
