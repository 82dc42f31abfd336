use chrono::NaiveDate;
use caselaw_api::types::CourtCategory;

use crate::error::CaseLawError;

pub const MAX_TEXT_LENGTH: usize = 200;
pub const MAX_CITATION_LENGTH: usize = 60;

/// Date format used by the search form.
pub const FORM_DATE_FORMAT: &str = "%d/%m/%Y";

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, CaseLawError> {
    if input.len() > max_len {
        return Err(CaseLawError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(CaseLawError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a free-text search criterion: enforce length, strip control chars, trim.
pub fn validate_text(input: &str) -> Result<String, CaseLawError> {
    sanitize_text(input, MAX_TEXT_LENGTH)
}

/// Validate a medium neutral citation such as `[2020] NSWSC 312`.
pub fn validate_citation(input: &str) -> Result<String, CaseLawError> {
    let citation = sanitize_text(input, MAX_CITATION_LENGTH)?;
    if !citation.starts_with('[') {
        return Err(CaseLawError::InvalidInput(format!(
            "invalid citation '{}'. Expected a medium neutral citation (e.g., [2020] NSWSC 312)",
            citation
        )));
    }
    Ok(citation)
}

/// Validate a search date. Accepts `DD/MM/YYYY` or `YYYY-MM-DD` and returns
/// the `DD/MM/YYYY` form the search form expects.
pub fn validate_date(input: &str) -> Result<String, CaseLawError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, FORM_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .map(|d| d.format(FORM_DATE_FORMAT).to_string())
        .map_err(|_| {
            CaseLawError::InvalidInput(format!(
                "invalid date '{}'. Expected format: DD/MM/YYYY or YYYY-MM-DD (e.g., 01/06/2020)",
                trimmed
            ))
        })
}

/// Validate that a start date does not fall after an end date. Both must
/// already be in form format.
pub fn validate_date_range(start: &str, end: &str) -> Result<(), CaseLawError> {
    let parse = |s: &str| NaiveDate::parse_from_str(s, FORM_DATE_FORMAT).ok();
    if let (Some(start_date), Some(end_date)) = (parse(start), parse(end)) {
        if start_date > end_date {
            return Err(CaseLawError::InvalidInput(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }
    }
    Ok(())
}

/// Validate 1-based directory ordinals for one category, dropping duplicates
/// while keeping the first-seen order.
pub fn validate_ordinals(
    category: CourtCategory,
    ordinals: &[i64],
) -> Result<Vec<i64>, CaseLawError> {
    let mut out = Vec::with_capacity(ordinals.len());
    for &ordinal in ordinals {
        category.resolve(ordinal)?;
        if !out.contains(&ordinal) {
            out.push(ordinal);
        }
    }
    Ok(out)
}

/// Validate a result limit (must be >= 1).
pub fn validate_limit(limit: usize) -> Result<usize, CaseLawError> {
    if limit < 1 {
        return Err(CaseLawError::InvalidInput(
            "limit must be >= 1".to_string(),
        ));
    }
    Ok(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Text --

    #[test]
    fn text_strips_control_chars() {
        assert_eq!(validate_text("  negli\u{7}gence\t ").unwrap(), "negligence");
    }

    #[test]
    fn text_empty_after_sanitize() {
        assert!(validate_text(" \n\t ").is_err());
    }

    #[test]
    fn text_too_long() {
        let input = "a".repeat(MAX_TEXT_LENGTH + 1);
        assert!(validate_text(&input).is_err());
    }

    #[test]
    fn citation_requires_bracketed_year() {
        assert_eq!(
            validate_citation(" [2020] NSWSC 312 ").unwrap(),
            "[2020] NSWSC 312"
        );
        assert!(validate_citation("2020 NSWSC 312").is_err());
    }

    // -- Dates --

    #[test]
    fn date_form_format_passes_through() {
        assert_eq!(validate_date("01/06/2020").unwrap(), "01/06/2020");
    }

    #[test]
    fn date_iso_is_normalized() {
        assert_eq!(validate_date("2020-06-01").unwrap(), "01/06/2020");
    }

    #[test]
    fn date_invalid() {
        assert!(validate_date("31/02/2020").is_err());
        assert!(validate_date("June 2020").is_err());
    }

    #[test]
    fn date_range_order() {
        assert!(validate_date_range("01/01/2020", "31/12/2020").is_ok());
        assert!(validate_date_range("31/12/2020", "01/01/2020").is_err());
    }

    // -- Ordinals --

    #[test]
    fn ordinals_deduplicated_in_order() {
        assert_eq!(
            validate_ordinals(CourtCategory::Courts, &[13, 1, 13]).unwrap(),
            vec![13, 1]
        );
    }

    #[test]
    fn ordinals_out_of_range() {
        let err = validate_ordinals(CourtCategory::Tribunals, &[15]).unwrap_err();
        assert!(matches!(err, CaseLawError::Api(_)));
        assert!(validate_ordinals(CourtCategory::Courts, &[0]).is_err());
    }

    #[test]
    fn limit_zero_rejected() {
        assert!(validate_limit(0).is_err());
        assert_eq!(validate_limit(5).unwrap(), 5);
    }
}
