//! Manual Recovery Input
//!
//! When the details endpoint is down or the seed is not yet indexed, the
//! backfill still has to finish; the generation metadata is then supplied by
//! hand. [`RecoveryProvider`] is the injectable seam, [`InteractivePrompt`]
//! the terminal implementation used in production.

use chrono::{DateTime, NaiveDateTime, Utc};
use inquire::Text;

#[cfg(test)]
use mockall::automock;

use crate::errors::{Result, SeedError};

/// Timestamp format shown on ootrandomizer.com seed pages, which is where the
/// operator copies the value from.
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y, %I:%M:%S %p UTC";

/// Capability supplying seed metadata when the details endpoint fails.
#[cfg_attr(test, automock)]
pub trait RecoveryProvider {
    /// The seed's generation time.
    ///
    /// # Errors
    /// * If the value cannot be obtained or parsed
    fn creation_timestamp(&self) -> Result<DateTime<Utc>>;

    /// The seed's five hash icons.
    ///
    /// # Errors
    /// * If the value cannot be obtained or parsed
    fn file_hash(&self) -> Result<[String; 5]>;
}

/// Terminal prompts matching what the seed page displays.
pub struct InteractivePrompt;

impl RecoveryProvider for InteractivePrompt {
    fn creation_timestamp(&self) -> Result<DateTime<Utc>> {
        let input = Text::new("creation timestamp:")
            .prompt()
            .map_err(SeedError::Prompt)?;

        parse_creation_timestamp(&input)
    }

    fn file_hash(&self) -> Result<[String; 5]> {
        let input = Text::new("file hash:").prompt().map_err(SeedError::Prompt)?;

        parse_file_hash(&input)
    }
}

/// Parses a timestamp in the seed page's display format into UTC.
///
/// # Errors
/// * If the input does not match [`TIMESTAMP_FORMAT`]
pub(crate) fn parse_creation_timestamp(input: &str) -> Result<DateTime<Utc>> {
    let parsed = NaiveDateTime::parse_from_str(input.trim(), TIMESTAMP_FORMAT)
        .map_err(SeedError::Timestamp)?;

    Ok(parsed.and_utc())
}

/// Parses a JSON-encoded list of exactly five hash icon names.
///
/// # Errors
/// * If the input is not a JSON list of five strings
pub(crate) fn parse_file_hash(input: &str) -> Result<[String; 5]> {
    let hash = serde_json::from_str(input.trim()).map_err(SeedError::HashList)?;

    Ok(hash)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use crate::errors::MidoctlError;

    use super::*;

    #[test]
    fn test_parse_creation_timestamp() {
        let parsed = parse_creation_timestamp("01/31/2024, 11:59:01 PM UTC").unwrap();

        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 1).unwrap());
    }

    #[test]
    fn test_parse_creation_timestamp_trims_input() {
        let parsed = parse_creation_timestamp("  07/04/2023, 12:00:00 AM UTC \n").unwrap();

        assert_eq!(parsed, Utc.with_ymd_and_hms(2023, 7, 4, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_creation_timestamp_rejects_iso() {
        assert!(matches!(
            parse_creation_timestamp("2024-01-31T23:59:01Z"),
            Err(MidoctlError::Seed(SeedError::Timestamp(_)))
        ));
    }

    #[test]
    fn test_parse_file_hash() {
        let hash =
            parse_file_hash(r#"["Deku Stick", "Bow", "Frog", "Master Sword", "Saw"]"#).unwrap();

        assert_eq!(hash[0], "Deku Stick");
        assert_eq!(hash[4], "Saw");
    }

    #[test]
    fn test_parse_file_hash_rejects_wrong_length() {
        assert!(matches!(
            parse_file_hash(r#"["Deku Stick", "Bow"]"#),
            Err(MidoctlError::Seed(SeedError::HashList(_)))
        ));
        assert!(parse_file_hash(r#"["a", "b", "c", "d", "e", "f"]"#).is_err());
    }

    #[test]
    fn test_parse_file_hash_rejects_non_json() {
        assert!(parse_file_hash("Deku Stick, Bow, Frog, Master Sword, Saw").is_err());
    }
}
