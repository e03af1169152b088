//! Schema Snapshot Drift Check
//!
//! Compares the checked-in `assets/schema.sql` against a fresh schema-only
//! dump of the production database. Newer pg_dump versions embed a random
//! identifier in `\restrict`/`\unrestrict` lines, so both texts are
//! normalized to a fixed token before the byte-for-byte comparison.

use regex::Regex;

use crate::{
    errors::{HookError, Result},
    exec::{CommandLine, CommandRunner},
};

use super::capture;

/// Fixed token substituted for the random identifiers in
/// `\restrict`/`\unrestrict` lines.
pub const RESTRICT_TOKEN: &str = "NSkHPci93sAFqHtSzSNGsBd7dCxhH7NpHe4WhC8jFzIipftC7A6hpgap0hCfbqM";

/// Compares the staged schema snapshot against the production schema.
///
/// Reads the snapshot from the git index (so unstaged edits do not mask
/// drift) and the production schema over ssh. On mismatch the error carries
/// the exact command that regenerates the snapshot; the file itself is never
/// touched.
///
/// # Errors
/// * If either dump command fails
/// * If the normalized texts differ
pub fn check_schema(runner: &dyn CommandRunner) -> Result<()> {
    let snapshot = capture(
        runner,
        &CommandLine::new("git", ["show", ":assets/schema.sql"]),
    )?;
    let production = capture(
        runner,
        &CommandLine::new(
            "ssh",
            ["midos.house", "sudo -u mido pg_dump --schema-only midos_house"],
        ),
    )?;

    if normalize_restrict_markers(&snapshot)? != normalize_restrict_markers(&production)? {
        return Err(HookError::SchemaDrift {
            fix: schema_fix_command(),
        }
        .into());
    }

    Ok(())
}

/// Replaces the random identifier in `\restrict`/`\unrestrict` lines with
/// [`RESTRICT_TOKEN`]. Text without such markers passes through unchanged.
///
/// # Errors
/// * If the regex cannot be compiled
pub(crate) fn normalize_restrict_markers(schema: &str) -> Result<String> {
    let regex = Regex::new(r"\\(un)?restrict \w*").map_err(HookError::Regex)?;

    Ok(regex
        .replace_all(schema, format!(r"\${{1}}restrict {RESTRICT_TOKEN}"))
        .into_owned())
}

/// The operator command that regenerates `assets/schema.sql`, normalization
/// included.
fn schema_fix_command() -> String {
    format!(
        r#"update assets/schema.sql (ssh midos.house 'sudo -u mido pg_dump --schema-only midos_house | sed -e "s/\\\\restrict [[:alnum:]]*/\\\\restrict {token}/g" | sed -e "s/\\\\unrestrict [[:alnum:]]*/\\\\unrestrict {token}/g"' > assets/schema.sql)"#,
        token = RESTRICT_TOKEN
    )
}

#[cfg(test)]
mod tests {
    use crate::{
        errors::MidoctlError,
        exec::{CommandOutput, MockCommandRunner},
    };

    use super::*;

    const SNAPSHOT: &str = "\\restrict Aq3jJ9\n\nCREATE TABLE races (room text);\n\n\\unrestrict Aq3jJ9\n";

    fn runner_returning(snapshot: &'static str, production: &'static str) -> MockCommandRunner {
        let mut runner = MockCommandRunner::new();
        runner.expect_output().times(2).returning(move |cmd| {
            Ok(CommandOutput {
                success: true,
                stdout: if cmd.program == "git" {
                    snapshot.to_owned()
                } else {
                    production.to_owned()
                },
            })
        });
        runner
    }

    #[test]
    fn test_normalize_substitutes_both_marker_kinds() {
        let normalized = normalize_restrict_markers(SNAPSHOT).unwrap();

        assert_eq!(
            normalized,
            format!(
                "\\restrict {RESTRICT_TOKEN}\n\nCREATE TABLE races (room text);\n\n\\unrestrict {RESTRICT_TOKEN}\n"
            )
        );
    }

    #[test]
    fn test_normalize_is_identity_without_markers() {
        let schema = "CREATE TABLE races (room text);\n";

        assert_eq!(normalize_restrict_markers(schema).unwrap(), schema);
    }

    #[test]
    fn test_check_schema_is_reflexive() {
        let runner = runner_returning(SNAPSHOT, SNAPSHOT);

        check_schema(&runner).unwrap();
    }

    #[test]
    fn test_check_schema_ignores_differing_restrict_identifiers() {
        let runner = runner_returning(
            SNAPSHOT,
            "\\restrict Zz81kPq\n\nCREATE TABLE races (room text);\n\n\\unrestrict Zz81kPq\n",
        );

        check_schema(&runner).unwrap();
    }

    #[test]
    fn test_check_schema_reports_drift_with_fix_command() {
        let runner = runner_returning(
            SNAPSHOT,
            "\\restrict Aq3jJ9\n\nCREATE TABLE races (room text, web_id bigint);\n\n\\unrestrict Aq3jJ9\n",
        );

        let Err(MidoctlError::Hook(HookError::SchemaDrift { fix })) = check_schema(&runner) else {
            panic!("expected schema drift");
        };

        assert!(fix.starts_with("update assets/schema.sql"));
        assert!(fix.contains("pg_dump --schema-only midos_house"));
        assert!(fix.contains(RESTRICT_TOKEN));
    }

    #[test]
    fn test_check_schema_fails_when_dump_command_fails() {
        let mut runner = MockCommandRunner::new();
        runner.expect_output().times(1).returning(|_| {
            Ok(CommandOutput {
                success: false,
                stdout: String::new(),
            })
        });

        assert!(matches!(
            check_schema(&runner),
            Err(MidoctlError::Hook(HookError::CommandFailed { .. }))
        ));
    }
}
