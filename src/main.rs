use midoctl::{
    cli::run,
    errors::{HookError, MidoctlError},
    utils::print_error,
};

fn main() {
    if let Err(error) = run() {
        match &error {
            MidoctlError::Hook(HookError::StaleQueryCache { fix }) => print_error(
                "Query preparation cache is stale",
                "The .sqlx directory no longer matches the queries in the tree.",
                fix,
            ),
            MidoctlError::Hook(HookError::SchemaDrift { fix }) => print_error(
                "Schema snapshot is stale",
                "assets/schema.sql no longer matches the production schema.",
                fix,
            ),
            _ => print_error(
                "midoctl failed",
                &error.to_string(),
                "Fix the reported problem and re-run.",
            ),
        }

        std::process::exit(1);
    }
}
