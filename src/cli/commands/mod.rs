mod check;
mod fmt;
mod show;

use super::Args;

use clap::Subcommand;

#[derive(Subcommand)]
pub(super) enum Commands {
    /// Parse manifests and report lint violations.
    ///
    /// Every line must parse as a declaration, editable entries must
    /// precede registry entries, no two declarations may name the same
    /// package, and every constraint set must be satisfiable. Rule
    /// severities come from the configuration file.
    #[command(verbatim_doc_comment)]
    Check(check::Args),

    /// Rewrite manifests in canonical form.
    Fmt(fmt::Args),

    /// Print the declarations parsed from a manifest.
    Show(show::Args),
}

pub fn run(args: Args) -> anyhow::Result<()> {
    if let Some(dir) = &args.working_directory {
        std::env::set_current_dir(dir)?;
    }
    match args.command {
        Commands::Check(args) => check::run(args),
        Commands::Fmt(args) => fmt::run(args),
        Commands::Show(args) => show::run(args),
    }
}
