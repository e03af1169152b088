//! Race-Record Updates
//!
//! Writes seed generation metadata back onto `races` rows. Rows are addressed
//! by whichever lookup keys the caller supplied; each key gets its own
//! parameterized UPDATE, and all of them share one transaction.

use chrono::{DateTime, Utc};
use postgres::Transaction;

use crate::errors::{Result, SeedError};

/// Connection string for the production database, matching the service
/// account the web server itself runs as.
pub const DATABASE_URL: &str = "host=/var/run/postgresql user=mido dbname=midos_house";

/// Seed generation metadata written onto matching race rows.
#[derive(Clone, Debug)]
pub struct SeedMetadata {
    pub gen_time: DateTime<Utc>,
    pub file_stem: String,
    pub file_hash: [String; 5],
}

/// The four independent ways of addressing race rows.
///
/// Usually exactly one is supplied. Supplying several updates each matching
/// row set; supplying none performs no SQL at all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RaceKeys {
    /// racetime.gg room URL.
    pub room: Option<String>,
    /// start.gg set id.
    pub startgg_set: Option<String>,
    /// First async room URL.
    pub async_room1: Option<String>,
    /// Second async room URL.
    pub async_room2: Option<String>,
}

impl RaceKeys {
    /// Column/value pairs for each supplied key, in column order.
    #[must_use]
    pub fn filters(&self) -> Vec<(&'static str, &str)> {
        [
            ("room", &self.room),
            ("startgg_set", &self.startgg_set),
            ("async_room1", &self.async_room1),
            ("async_room2", &self.async_room2),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.as_deref().map(|value| (column, value)))
        .collect()
    }

    /// Whether no lookup key was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters().is_empty()
    }
}

/// The UPDATE statement for one lookup column.
///
/// `key_column` comes from the fixed set in [`RaceKeys::filters`], never from
/// user input; all values are bound parameters.
fn update_statement(key_column: &str) -> String {
    format!(
        "UPDATE races SET \
            web_id = $1, \
            web_gen_time = $2, \
            file_stem = $3, \
            hash1 = $4, \
            hash2 = $5, \
            hash3 = $6, \
            hash4 = $7, \
            hash5 = $8 \
        WHERE {key_column} = $9"
    )
}

/// Runs one UPDATE per supplied lookup key inside the given transaction.
///
/// The caller owns the transaction boundary: nothing here commits, so an
/// error on any statement leaves the rows untouched once the transaction
/// drops.
///
/// # Errors
/// * If any UPDATE fails
pub fn update_races(
    transaction: &mut Transaction<'_>,
    seed_id: &str,
    metadata: &SeedMetadata,
    keys: &RaceKeys,
) -> Result<()> {
    let [hash1, hash2, hash3, hash4, hash5] = &metadata.file_hash;

    for (column, value) in keys.filters() {
        transaction
            .execute(
                update_statement(column).as_str(),
                &[
                    &seed_id,
                    &metadata.gen_time,
                    &metadata.file_stem,
                    hash1,
                    hash2,
                    hash3,
                    hash4,
                    hash5,
                    &value,
                ],
            )
            .map_err(SeedError::Db)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_empty_by_default() {
        let keys = RaceKeys::default();

        assert!(keys.is_empty());
        assert!(keys.filters().is_empty());
    }

    #[test]
    fn test_filters_single_key() {
        let keys = RaceKeys {
            room: Some("https://racetime.gg/ootr/clever-midna-1234".to_owned()),
            ..RaceKeys::default()
        };

        assert_eq!(
            keys.filters(),
            vec![("room", "https://racetime.gg/ootr/clever-midna-1234")]
        );
    }

    #[test]
    fn test_filters_each_key_maps_to_its_column() {
        let startgg = RaceKeys {
            startgg_set: Some("48943408".to_owned()),
            ..RaceKeys::default()
        };
        let async1 = RaceKeys {
            async_room1: Some("room-a".to_owned()),
            ..RaceKeys::default()
        };
        let async2 = RaceKeys {
            async_room2: Some("room-b".to_owned()),
            ..RaceKeys::default()
        };

        assert_eq!(startgg.filters(), vec![("startgg_set", "48943408")]);
        assert_eq!(async1.filters(), vec![("async_room1", "room-a")]);
        assert_eq!(async2.filters(), vec![("async_room2", "room-b")]);
    }

    #[test]
    fn test_filters_multiple_keys_in_column_order() {
        let keys = RaceKeys {
            room: Some("r".to_owned()),
            startgg_set: None,
            async_room1: Some("a1".to_owned()),
            async_room2: Some("a2".to_owned()),
        };

        assert_eq!(
            keys.filters(),
            vec![("room", "r"), ("async_room1", "a1"), ("async_room2", "a2")]
        );
    }

    #[test]
    fn test_update_statement_filters_by_key_column() {
        let statement = update_statement("startgg_set");

        assert!(statement.starts_with("UPDATE races SET"));
        assert!(statement.ends_with("WHERE startgg_set = $9"));
        assert!(statement.contains("hash5 = $8"));
    }
}
