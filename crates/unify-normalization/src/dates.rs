//! Date canonicalization for the `date` column.
//!
//! Input values are tried against [`DATE_INPUT_FORMATS`] in order and the
//! first successful parse is rewritten as [`CANONICAL_DATE_FORMAT`]. Values
//! matching no format are dropped, not replaced, so the `date` column may end
//! up shorter than its siblings.

use chrono::NaiveDate;
use unify_model::{ColumnStore, DATE};

/// Accepted input formats, in the order they are tried.
///
/// - `%b %d %Y`: `Jan 05 2020`
/// - `%d %b %Y`: `05 Jan 2020`
/// - `%d-%m-%Y`: `05-01-2020`
pub const DATE_INPUT_FORMATS: [&str; 3] = ["%b %d %Y", "%d %b %Y", "%d-%m-%Y"];

/// Output format: zero-padded day-month-year.
pub const CANONICAL_DATE_FORMAT: &str = "%d-%m-%Y";

/// Parse a date using the first matching input format.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_INPUT_FORMATS
        .iter()
        .filter(|fmt| has_date_shape(trimmed, fmt))
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Three separated fields with a four-digit year last.
///
/// chrono's `%Y` takes a year of any width and a space in the format may
/// match no whitespace, so the layout is checked before parsing.
fn has_date_shape(value: &str, format: &str) -> bool {
    let fields: Vec<&str> = if format.contains('-') {
        value.split('-').collect()
    } else {
        value.split_whitespace().collect()
    };
    matches!(
        fields.as_slice(),
        [_, _, year] if year.len() == 4 && year.bytes().all(|byte| byte.is_ascii_digit())
    )
}

/// Rewrite a single value as a canonical date, or `None` if no format matches.
pub fn canonicalize_date(value: &str) -> Option<String> {
    parse_date(value).map(|date| date.format(CANONICAL_DATE_FORMAT).to_string())
}

/// Outcome of canonicalizing one `date` column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateCanonicalization {
    /// Values rewritten into the canonical format.
    pub kept: usize,
    /// Values that matched no format and were removed.
    pub dropped: usize,
}

/// Canonicalize a sequence of dates, dropping unparseable values.
pub fn canonicalize_dates<'a, I>(values: I) -> (Vec<String>, DateCanonicalization)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut stats = DateCanonicalization::default();
    let mut canonical = Vec::new();
    for value in values {
        match canonicalize_date(value) {
            Some(date) => {
                stats.kept += 1;
                canonical.push(date);
            }
            None => {
                stats.dropped += 1;
                tracing::trace!(value, "dropped unparseable date");
            }
        }
    }
    (canonical, stats)
}

/// Canonicalize the `date` column of `store` in place.
///
/// Stores without a `date` column are left untouched and report zero counts.
pub fn canonicalize_date_column(store: &mut ColumnStore) -> DateCanonicalization {
    let Some(values) = store.remove(DATE) else {
        return DateCanonicalization::default();
    };
    let (canonical, stats) = canonicalize_dates(values.iter().map(String::as_str));
    store.insert(DATE, canonical);
    stats
}
