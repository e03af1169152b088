//! ootrandomizer.com API Client
//!
//! Thin wrapper over the three endpoints the backfill needs: the patch
//! download, the authenticated seed-details call, and the spoiler-log unlock.
//! The [`SeedHost`] trait is the seam tests mock; [`OotrApi`] is the real
//! thing.

use chrono::{DateTime, Utc};
use regex::Regex;
use reqwest::{blocking::Client, header::CONTENT_DISPOSITION};
use serde::Deserialize;

#[cfg(test)]
use mockall::automock;

use crate::errors::{Result, SeedError};

/// Base URL of the randomizer web service.
pub const BASE_URL: &str = "https://ootrandomizer.com";

/// A downloaded patch file with its names parsed from the attachment header.
#[derive(Clone, Debug)]
pub struct Patch {
    /// Full filename including the `.zpf`/`.zpfz` extension.
    pub file_name: String,
    /// Filename without the extension, shared with the spoiler log.
    pub file_stem: String,
    /// Raw patch bytes.
    pub bytes: Vec<u8>,
}

/// Body of the `/api/v2/seed/details` endpoint.
///
/// `spoiler_log` is itself a JSON-encoded string; it stays unparsed here
/// because it is written to disk verbatim.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedDetails {
    pub spoiler_log: Option<String>,
    pub creation_timestamp: DateTime<Utc>,
}

/// The part of the spoiler log the backfill reads.
#[derive(Clone, Debug, Deserialize)]
pub struct SpoilerLog {
    /// The five hash icons players use to verify patch identity.
    pub file_hash: [String; 5],
}

/// Capability for talking to the seed-hosting web service.
#[cfg_attr(test, automock)]
pub trait SeedHost {
    /// Downloads the patch file for a seed.
    ///
    /// # Errors
    /// * If the HTTP status indicates failure
    /// * If the `Content-Disposition` header is missing or malformed
    fn patch(&self, seed_id: &str) -> Result<Patch>;

    /// Fetches generation metadata for a seed.
    ///
    /// # Errors
    /// * If the HTTP status indicates failure or the body does not parse
    fn details(&self, seed_id: &str) -> Result<SeedDetails>;

    /// Asks the service to unlock a seed's spoiler log.
    ///
    /// # Errors
    /// * If the HTTP status indicates failure
    fn unlock(&self, seed_id: &str) -> Result<()>;
}

/// Real client for ootrandomizer.com.
pub struct OotrApi {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OotrApi {
    /// Creates a client using the production base URL.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: BASE_URL.to_owned(),
            api_key: api_key.into(),
        }
    }
}

impl SeedHost for OotrApi {
    fn patch(&self, seed_id: &str) -> Result<Patch> {
        let response = self
            .client
            .get(format!("{}/patch/get", self.base_url))
            .query(&[("id", seed_id)])
            .send()
            .map_err(SeedError::Http)?
            .error_for_status()
            .map_err(SeedError::Http)?;

        let header = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .ok_or(SeedError::MissingContentDisposition)?;
        let header = header
            .to_str()
            .map_err(|_| SeedError::MalformedContentDisposition {
                header: String::from_utf8_lossy(header.as_bytes()).into_owned(),
            })?
            .to_owned();

        // Parse the filename before touching the body so a contract violation
        // fails with no side effects.
        let (file_name, file_stem) = parse_attachment(&header)?;
        let bytes = response.bytes().map_err(SeedError::Http)?.to_vec();

        Ok(Patch {
            file_name,
            file_stem,
            bytes,
        })
    }

    fn details(&self, seed_id: &str) -> Result<SeedDetails> {
        let details = self
            .client
            .get(format!("{}/api/v2/seed/details", self.base_url))
            .query(&[("id", seed_id), ("key", self.api_key.as_str())])
            .send()
            .map_err(SeedError::Http)?
            .error_for_status()
            .map_err(SeedError::Http)?
            .json()
            .map_err(SeedError::Http)?;

        Ok(details)
    }

    fn unlock(&self, seed_id: &str) -> Result<()> {
        self.client
            .post(format!("{}/api/v2/seed/unlock", self.base_url))
            .query(&[("key", self.api_key.as_str()), ("id", seed_id)])
            .send()
            .map_err(SeedError::Http)?
            .error_for_status()
            .map_err(SeedError::Http)?;

        Ok(())
    }
}

/// Returns the regex matching the patch endpoint's attachment header.
///
/// # Errors
/// * If the regex cannot be compiled
fn attachment_regex() -> Result<Regex> {
    Regex::new(r"^attachment; filename=(.*)\.zpf(z?)$").map_err(|e| SeedError::Regex(e).into())
}

/// Splits a `Content-Disposition` header into the full filename and its stem.
///
/// The pattern is a hard contract on the upstream API's response shape: the
/// header must be an attachment with a `.zpf` or `.zpfz` filename.
///
/// # Errors
/// * If the header does not match the attachment pattern
pub(crate) fn parse_attachment(header: &str) -> Result<(String, String)> {
    let regex = attachment_regex()?;

    let captures = regex
        .captures(header)
        .ok_or_else(|| SeedError::MalformedContentDisposition {
            header: header.to_owned(),
        })?;

    let file_stem = captures[1].to_owned();
    let file_name = format!("{file_stem}.zpf{}", &captures[2]);

    Ok((file_name, file_stem))
}

#[cfg(test)]
mod tests {
    use crate::errors::MidoctlError;

    use super::*;

    #[test]
    fn test_parse_attachment_compressed() {
        let (file_name, file_stem) =
            parse_attachment("attachment; filename=OoTR_1234567_ABCDEFGHIJ.zpfz").unwrap();

        assert_eq!(file_name, "OoTR_1234567_ABCDEFGHIJ.zpfz");
        assert_eq!(file_stem, "OoTR_1234567_ABCDEFGHIJ");
    }

    #[test]
    fn test_parse_attachment_uncompressed() {
        let (file_name, file_stem) =
            parse_attachment("attachment; filename=OoT_5ADE7_1S6GBQNP8R.zpf").unwrap();

        assert_eq!(file_name, "OoT_5ADE7_1S6GBQNP8R.zpf");
        assert_eq!(file_stem, "OoT_5ADE7_1S6GBQNP8R");
    }

    #[test]
    fn test_parse_attachment_rejects_inline() {
        assert!(matches!(
            parse_attachment("inline; filename=OoTR_1234567_ABCDEFGHIJ.zpfz"),
            Err(MidoctlError::Seed(
                SeedError::MalformedContentDisposition { .. }
            ))
        ));
    }

    #[test]
    fn test_parse_attachment_rejects_other_extensions() {
        assert!(parse_attachment("attachment; filename=spoiler.json").is_err());
        assert!(parse_attachment("attachment; filename=OoTR_1.zpfz.bak").is_err());
    }

    #[test]
    fn test_parse_attachment_rejects_empty_header() {
        assert!(parse_attachment("").is_err());
    }
}
