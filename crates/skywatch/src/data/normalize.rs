//! City name canonicalization
//!
//! Both stores compare cities by their normalized form, so "new york",
//! "New York" and " NEW YORK " are the same entry.
//!
//! Casing is naive: every run of letters becomes one capitalized word, so
//! "mcallen" turns into "Mcallen" and "winston-salem" into "Winston-Salem".
//! Names with internal capitals are not preserved.

/// Trim and title-case a city name
///
/// Returns `None` for empty or whitespace-only input.
pub fn normalize_city(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(title_case(trimmed))
}

fn is_cased(c: char) -> bool {
    c.is_uppercase() || c.is_lowercase()
}

/// Uppercase the first cased letter of each word, lowercase the rest.
/// Any uncased character ends the current word.
///
/// Only the first char of a multi-char uppercase expansion stays capital
/// ("ß" opens a word as "Ss"), and a capital sigma that ends a word
/// lowercases to the final form "ς".
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if !is_cased(c) {
            out.push(c);
            in_word = false;
            continue;
        }

        if !in_word {
            let mut upper = c.to_uppercase();
            out.extend(upper.next());
            out.extend(upper.flat_map(char::to_lowercase));
        } else if c == 'Σ' && !chars.peek().is_some_and(|&next| is_cased(next)) {
            out.push('ς');
        } else {
            out.extend(c.to_lowercase());
        }
        in_word = true;
    }

    out
}

/// Normalize a list read from disk, dropping blanks and later duplicates
///
/// Keeps the first occurrence of each city so a most-recent-first list
/// stays in recency order.
pub fn dedupe_normalized<I, S>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for city in entries.into_iter().filter_map(|e| normalize_city(e.as_ref())) {
        if !out.contains(&city) {
            out.push(city);
        }
    }
    out
}
