//! Input validation utilities

use uuid::Uuid;

/// Parse a record or user identifier
///
/// Identifiers are UUIDs in any of the textual forms the `uuid` crate
/// accepts (hyphenated, simple, braced or URN).
pub fn parse_identifier(value: &str) -> Result<Uuid, String> {
    if value.is_empty() {
        return Err("Identifier is required".to_string());
    }

    Uuid::parse_str(value).map_err(|e| format!("Invalid identifier format: {}", e))
}

/// Parse a list of identifiers, failing on the first malformed entry
pub fn parse_identifiers<S: AsRef<str>>(values: &[S]) -> Result<Vec<Uuid>, String> {
    values
        .iter()
        .map(|value| parse_identifier(value.as_ref()))
        .collect()
}
