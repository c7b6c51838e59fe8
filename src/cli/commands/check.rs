use anyhow::Context;
use clap::Parser;
use config::{Severity, CONFIG};
use requirement::lint::{self, Rule};
use requirement::manifest::{Manifest, ManifestError};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(arg_required_else_help = true)]
pub struct Args {
    /// Path(s) to the manifest(s) to check
    #[arg(required = true)]
    path: Vec<PathBuf>,
}

pub(super) fn run(args: Args) -> anyhow::Result<()> {
    let mut problems = 0;
    for path in &args.path {
        problems += check_one(path)?;
    }

    if problems > 0 {
        anyhow::bail!("{problems} problem(s) found");
    }
    Ok(())
}

/// Returns the number of problems that should fail the run.
fn check_one(path: &Path) -> anyhow::Result<usize> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let manifest = match Manifest::parse(&input) {
        Ok(manifest) => manifest,
        Err(ManifestError::Syntax(errors)) => {
            for error in &errors {
                tracing::error!(path = %path.display(), "{error}");
            }
            return Ok(errors.len());
        }
    };

    let mut denied = 0;
    let report = lint::check(&manifest);
    for diagnostic in report.iter() {
        match severity(diagnostic.rule) {
            Severity::Allow => (),
            Severity::Warn => tracing::warn!(
                path = %path.display(),
                line = diagnostic.line,
                rule = %diagnostic.rule,
                "{}",
                diagnostic.message
            ),
            Severity::Deny => {
                denied += 1;
                tracing::error!(
                    path = %path.display(),
                    line = diagnostic.line,
                    rule = %diagnostic.rule,
                    "{}",
                    diagnostic.message
                );
            }
        }
    }

    if denied == 0 {
        tracing::info!(path = %path.display(), "manifest is clean");
    }
    Ok(denied)
}

fn severity(rule: Rule) -> Severity {
    let lint = CONFIG.lint();
    match rule {
        Rule::EditableFirst => lint.editable_first,
        Rule::DuplicateName => lint.duplicate_name,
        Rule::Unsatisfiable => lint.unsatisfiable,
    }
}
