use anyhow::Context;
use clap::Parser;
use requirement::{Manifest, Requirement};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(arg_required_else_help = true)]
pub struct Args {
    /// Path to the manifest to print
    path: PathBuf,

    /// Emit the declarations as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Entry<'a> {
    line: usize,
    #[serde(flatten)]
    requirement: &'a Requirement,
}

pub(super) fn run(args: Args) -> anyhow::Result<()> {
    let input = std::fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let manifest: Manifest = input
        .parse()
        .with_context(|| format!("failed to parse {}", args.path.display()))?;

    if args.json {
        let entries: Vec<Entry> = manifest
            .requirements()
            .map(|(line, requirement)| Entry { line, requirement })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for (line, requirement) in manifest.requirements() {
            println!("{line:>4}  {requirement}");
        }
    }

    Ok(())
}
