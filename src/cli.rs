use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    config::Config,
    errors::Result,
    exec::SystemRunner,
    precommit::{self, PreCommitOptions, RemoteBuild},
    seed::{
        self,
        api::OotrApi,
        db::{self, RaceKeys},
        recovery::InteractivePrompt,
    },
    utils::print_success,
};

#[derive(Subcommand)]
enum Commands {
    /// Backfill subcommand
    /// Fetch a seed's patch file and spoiler log from ootrandomizer.com and
    /// write its generation metadata onto the matching race rows.
    #[command(short_flag = 'b', name = "backfill-seed")]
    BackfillSeed {
        /// Seed id on ootrandomizer.com
        #[arg(value_name = "SEED_ID")]
        seed_id: String,

        /// racetime.gg room URL of the race to update
        #[arg(long)]
        room: Option<String>,

        /// start.gg set id of the race to update
        #[arg(long)]
        startgg_set: Option<String>,

        /// First async room URL of the race to update
        #[arg(long)]
        async_room1: Option<String>,

        /// Second async room URL of the race to update
        #[arg(long)]
        async_room2: Option<String>,

        /// Directory seed artifacts are written to
        #[arg(long, default_value = seed::SEED_DIR)]
        seed_dir: PathBuf,

        /// Postgres connection string
        #[arg(long, default_value = db::DATABASE_URL)]
        database_url: String,
    },

    /// Pre-commit subcommand
    /// Run the repository's pre-commit checks: local build, remote rebuild,
    /// query-cache freshness, and schema snapshot drift.
    #[command(short_flag = 'p', name = "pre-commit")]
    PreCommit {
        /// Skip the remote bootstrap/mirror/rebuild group entirely
        #[arg(long, default_value_t = false)]
        local_only: bool,

        /// Skip the remote package and toolchain bootstrap
        #[arg(long, default_value_t = false)]
        no_bootstrap: bool,

        /// Skip `cargo sqlx prepare --check`
        #[arg(long, default_value_t = false)]
        skip_cache_check: bool,

        /// Skip the production schema comparison
        #[arg(long, default_value_t = false)]
        skip_schema_check: bool,

        /// WSL distribution hosting the remote build tree
        #[arg(long, default_value = "ubuntu-m2")]
        distro: String,
    },
}

#[derive(Parser)]
#[command(about = "Maintenance commands for Mido's House:\n\
\t- Backfill race rows with seed metadata from ootrandomizer.com.\n\
\t- Run the repository's pre-commit checks.")]
#[command(help_template = "{about}\n\nUSAGE:\n{usage}\n\n{all-args}\n")]
#[command(name = "midoctl")]
pub struct Cli {
    /// Commands
    #[command(subcommand)]
    command: Commands,
}

/// # `run`
/// Runs the program.
///
/// ## Errors
/// Returns an error if the command fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::BackfillSeed {
            seed_id,
            room,
            startgg_set,
            async_room1,
            async_room2,
            seed_dir,
            database_url,
        } => {
            let config = Config::load()?;
            let api = OotrApi::new(config.ootr_api_key);
            let keys = RaceKeys {
                room,
                startgg_set,
                async_room1,
                async_room2,
            };

            seed::backfill(
                &api,
                &InteractivePrompt,
                &seed_dir,
                &database_url,
                &seed_id,
                &keys,
            )?;

            print_success(
                "Seed backfilled",
                &format!("Seed {seed_id} metadata and files are saved."),
            );
        }
        Commands::PreCommit {
            local_only,
            no_bootstrap,
            skip_cache_check,
            skip_schema_check,
            distro,
        } => {
            let options = PreCommitOptions {
                remote: (!local_only).then(|| RemoteBuild {
                    distro,
                    ..RemoteBuild::default()
                }),
                bootstrap: !no_bootstrap,
                cache_check: !skip_cache_check,
                schema_check: !skip_schema_check,
            };

            precommit::run_checks(&SystemRunner, &options)?;

            print_success("All checks passed", "Commit may proceed.");
        }
    }

    Ok(())
}
