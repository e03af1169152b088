//! Seed Backfill
//!
//! Repairs race rows whose seed was rolled on ootrandomizer.com directly:
//! downloads the patch file and spoiler log into the web server's seed
//! directory and writes the generation metadata onto the matching `races`
//! rows. One invocation handles one seed.

pub mod api;
pub mod db;
pub mod recovery;

use std::{fs, path::Path};

use postgres::{Client, NoTls};

use crate::{
    errors::{Result, SeedError},
    utils::print_warning,
};

use self::{
    api::{SeedHost, SpoilerLog},
    db::{RaceKeys, SeedMetadata, update_races},
    recovery::RecoveryProvider,
};

/// Directory the web server serves seed artifacts from.
pub const SEED_DIR: &str = "/var/www/midos.house/seed";

/// Backfills one seed: patch file, spoiler log, and race-row metadata.
///
/// Side effects, in order: one file write for the patch, up to three more
/// HTTP calls and one file write for the spoiler log, then a single database
/// transaction covering every supplied lookup key. A failure at any point
/// stops the sequence; the transaction either commits completely or rolls
/// back on drop.
///
/// # Arguments
/// * `host` - The seed-hosting API
/// * `recovery` - Metadata source when the details endpoint fails
/// * `seed_dir` - Directory patch and spoiler files are written to
/// * `database_url` - Postgres connection string
/// * `seed_id` - The seed's id on the host
/// * `keys` - Which race rows to update
///
/// # Errors
/// * If any HTTP call, file write, parse step, or UPDATE fails
pub fn backfill(
    host: &dyn SeedHost,
    recovery: &dyn RecoveryProvider,
    seed_dir: &Path,
    database_url: &str,
    seed_id: &str,
    keys: &RaceKeys,
) -> Result<()> {
    let patch = host.patch(seed_id)?;
    fs::write(seed_dir.join(&patch.file_name), &patch.bytes).map_err(SeedError::Io)?;

    let metadata = resolve_metadata(host, recovery, seed_dir, seed_id, &patch.file_stem)?;

    if keys.is_empty() {
        print_warning(
            "No race keys supplied",
            "Seed files were saved but no rows were updated.",
        );

        return Ok(());
    }

    let mut client = Client::connect(database_url, NoTls).map_err(SeedError::Db)?;
    let mut transaction = client.transaction().map_err(SeedError::Db)?;

    update_races(&mut transaction, seed_id, &metadata, keys)?;
    transaction.commit().map_err(SeedError::Db)?;

    Ok(())
}

/// Obtains the seed's generation metadata, writing the spoiler log alongside
/// the patch file when the details endpoint provides one.
///
/// A locked spoiler log gets exactly one unlock-and-refetch cycle. If the
/// FIRST details fetch fails the metadata comes from the recovery provider
/// instead and no spoiler file is written; errors after the unlock refetch
/// propagate.
fn resolve_metadata(
    host: &dyn SeedHost,
    recovery: &dyn RecoveryProvider,
    seed_dir: &Path,
    seed_id: &str,
    file_stem: &str,
) -> Result<SeedMetadata> {
    match host.details(seed_id) {
        Ok(details) => {
            let details = if details.spoiler_log.is_none() {
                host.unlock(seed_id)?;
                host.details(seed_id)?
            } else {
                details
            };

            let spoiler_log = details
                .spoiler_log
                .ok_or_else(|| SeedError::SpoilerLocked {
                    seed_id: seed_id.to_owned(),
                })?;
            fs::write(
                seed_dir.join(format!("{file_stem}_Spoiler.json")),
                &spoiler_log,
            )
            .map_err(SeedError::Io)?;

            let log: SpoilerLog =
                serde_json::from_str(&spoiler_log).map_err(SeedError::SpoilerLog)?;

            Ok(SeedMetadata {
                gen_time: details.creation_timestamp,
                file_stem: file_stem.to_owned(),
                file_hash: log.file_hash,
            })
        }
        Err(_) => Ok(SeedMetadata {
            gen_time: recovery.creation_timestamp()?,
            file_stem: file_stem.to_owned(),
            file_hash: recovery.file_hash()?,
        }),
    }
}
