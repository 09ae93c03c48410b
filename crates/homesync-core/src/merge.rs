//! Policy-driven merge of a source file into its target
//!
//! [`merge`] only computes what the target should contain. The caller writes
//! that content to a staging path with [`stage`]; the live target is replaced
//! later, in one promotion pass over the whole batch.

use std::path::Path;

use homesync_fs::io;

use crate::policy::{Policy, has_source_directive, source_statement};
use crate::prompt::Prompter;
use crate::Result;

/// Separator placed between existing content and appended/prepended content
pub const SEPARATOR: &str = "\n\n";

/// Result of merging one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Content to stage in place of the target
    Staged(String),
    /// The target already satisfies the policy; nothing to stage
    Unchanged,
    /// The operator declined; the file is skipped
    Declined,
}

/// Confirmation question asked before touching `target`.
pub fn confirmation_message(target: &Path, policy: Policy, target_exists: bool) -> String {
    if target_exists {
        format!("{} to existing file: {}? (y/n): ", policy.label(), target.display())
    } else {
        format!(
            "Target file does not exist. Create {} and copy content? (y/n): ",
            target.display()
        )
    }
}

/// Compute the merged content for `target` under `policy`.
///
/// Unless `force` is set, `prompter` is asked first; a refusal yields
/// [`MergeOutcome::Declined`] without reading the target.
///
/// # Errors
///
/// Fails if the source or an existing target cannot be read, or if the
/// prompter itself fails.
pub fn merge(
    source: &Path,
    target: &Path,
    policy: Policy,
    force: bool,
    prompter: &mut dyn Prompter,
) -> Result<MergeOutcome> {
    let source_text = io::read_text(source)?;
    let target_exists = target.exists();

    if !force && !prompter.confirm(&confirmation_message(target, policy, target_exists))? {
        tracing::info!(path = %target.display(), %policy, "Operator declined");
        return Ok(MergeOutcome::Declined);
    }

    if !target_exists {
        let content = match policy {
            Policy::Append | Policy::Overwrite => source_text,
            Policy::PrependSourceStatement => source_statement(source),
        };
        return Ok(MergeOutcome::Staged(content));
    }

    let outcome = match policy {
        Policy::Append => {
            let existing = io::read_text(target)?;
            MergeOutcome::Staged(format!("{existing}{SEPARATOR}{source_text}"))
        }
        Policy::Overwrite => MergeOutcome::Staged(source_text),
        Policy::PrependSourceStatement => {
            let existing = io::read_text(target)?;
            if has_source_directive(&existing, source) {
                MergeOutcome::Unchanged
            } else {
                MergeOutcome::Staged(format!(
                    "{}{SEPARATOR}{existing}",
                    source_statement(source)
                ))
            }
        }
    };

    Ok(outcome)
}

/// Write staged content to `staging`, creating parent directories as needed.
pub fn stage(staging: &Path, content: &str) -> Result<()> {
    io::write_staged(staging, content)?;
    tracing::debug!(staging = %staging.display(), bytes = content.len(), "Staged merged content");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{AlwaysNo, AlwaysYes};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    struct Files {
        _dir: TempDir,
        source: std::path::PathBuf,
        target: std::path::PathBuf,
    }

    fn files(source: &str, target: Option<&str>) -> Files {
        let dir = TempDir::new().unwrap();
        let source_path = dir.path().join("configs").join(".rc");
        let target_path = dir.path().join("home").join(".rc");
        fs::create_dir_all(source_path.parent().unwrap()).unwrap();
        fs::write(&source_path, source).unwrap();
        if let Some(existing) = target {
            fs::create_dir_all(target_path.parent().unwrap()).unwrap();
            fs::write(&target_path, existing).unwrap();
        }
        Files {
            _dir: dir,
            source: source_path,
            target: target_path,
        }
    }

    fn run(f: &Files, policy: Policy) -> MergeOutcome {
        merge(&f.source, &f.target, policy, true, &mut AlwaysYes).unwrap()
    }

    #[test]
    fn append_to_existing_separates_with_blank_line() {
        let f = files("B", Some("A"));
        assert_eq!(run(&f, Policy::Append), MergeOutcome::Staged("A\n\nB".into()));
    }

    #[test]
    fn overwrite_existing_uses_source_verbatim() {
        let f = files("new", Some("old"));
        assert_eq!(run(&f, Policy::Overwrite), MergeOutcome::Staged("new".into()));
    }

    #[test]
    fn missing_target_copies_source_for_append_and_overwrite() {
        let f = files("body", None);
        assert_eq!(run(&f, Policy::Append), MergeOutcome::Staged("body".into()));
        assert_eq!(run(&f, Policy::Overwrite), MergeOutcome::Staged("body".into()));
    }

    #[test]
    fn missing_target_gets_only_source_statement() {
        let f = files("alias x=y", None);
        let expected = format!("# Source personal configs\nsource \"{}\"", f.source.display());
        assert_eq!(run(&f, Policy::PrependSourceStatement), MergeOutcome::Staged(expected));
    }

    #[test]
    fn prepend_keeps_existing_content() {
        let f = files("alias x=y", Some("export PATH=$PATH:~/bin\n"));
        let expected = format!(
            "# Source personal configs\nsource \"{}\"\n\nexport PATH=$PATH:~/bin\n",
            f.source.display()
        );
        assert_eq!(run(&f, Policy::PrependSourceStatement), MergeOutcome::Staged(expected));
    }

    #[test]
    fn prepend_is_noop_when_directive_present() {
        let f = files("alias x=y", None);
        fs::create_dir_all(f.target.parent().unwrap()).unwrap();
        fs::write(&f.target, source_statement(&f.source)).unwrap();

        assert_eq!(run(&f, Policy::PrependSourceStatement), MergeOutcome::Unchanged);
    }

    #[test]
    fn merge_never_writes_target() {
        let f = files("new", Some("old"));
        run(&f, Policy::Overwrite);
        assert_eq!(fs::read_to_string(&f.target).unwrap(), "old");
    }

    #[test]
    fn declined_prompt_skips_file() {
        let f = files("new", Some("old"));
        let outcome = merge(&f.source, &f.target, Policy::Overwrite, false, &mut AlwaysNo).unwrap();
        assert_eq!(outcome, MergeOutcome::Declined);
    }

    #[test]
    fn force_skips_prompt() {
        let f = files("new", None);
        let mut prompter = |_: &str| -> Result<bool> { panic!("prompt must not be shown") };
        let outcome = merge(&f.source, &f.target, Policy::Overwrite, true, &mut prompter).unwrap();
        assert_eq!(outcome, MergeOutcome::Staged("new".into()));
    }

    #[test]
    fn prompt_wording_depends_on_target_existence() {
        let existing = confirmation_message(Path::new("/h/.vimrc"), Policy::Append, true);
        assert_eq!(existing, "Append to existing file: /h/.vimrc? (y/n): ");

        let missing = confirmation_message(Path::new("/h/.vimrc"), Policy::Append, false);
        assert!(missing.starts_with("Target file does not exist. Create /h/.vimrc"));
    }

    #[test]
    fn unreadable_source_is_error() {
        let dir = TempDir::new().unwrap();
        let result = merge(
            &dir.path().join("missing"),
            &dir.path().join("target"),
            Policy::Overwrite,
            true,
            &mut AlwaysYes,
        );
        assert!(result.is_err());
    }
}
