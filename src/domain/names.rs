//! Display names for table views.

/// "first last".
pub fn patient_display_name(first: &str, last: &str) -> String {
    format!("{} {}", first, last)
}

/// "first last (specialization)"; the suffix is omitted when the
/// specialization is absent or blank.
pub fn doctor_display_name(first: &str, last: &str, specialization: Option<&str>) -> String {
    match specialization.map(str::trim).filter(|s| !s.is_empty()) {
        Some(spec) => format!("{} {} ({})", first, last, spec),
        None => format!("{} {}", first, last),
    }
}

/// Blank notes are stored as NULL, never as an empty string.
pub fn normalize_notes(notes: Option<&str>) -> Option<String> {
    notes
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}
