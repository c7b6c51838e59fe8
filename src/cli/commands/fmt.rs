use anyhow::Context;
use clap::Parser;
use requirement::Manifest;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(arg_required_else_help = true)]
pub struct Args {
    /// Verify formatting without rewriting anything
    #[arg(long)]
    check: bool,

    /// Path(s) to the manifest(s) to format
    #[arg(required = true)]
    path: Vec<PathBuf>,
}

pub(super) fn run(args: Args) -> anyhow::Result<()> {
    let mut dirty = 0;
    for path in &args.path {
        let input = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let manifest: Manifest = input
            .parse()
            .with_context(|| format!("failed to parse {}", path.display()))?;

        let canonical = manifest.to_string();
        if canonical == input {
            continue;
        }

        if args.check {
            tracing::warn!(path = %path.display(), "manifest is not in canonical form");
            dirty += 1;
        } else {
            fs::write(path, canonical)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "manifest rewritten");
        }
    }

    if dirty > 0 {
        anyhow::bail!("{dirty} manifest(s) not in canonical form");
    }
    Ok(())
}
