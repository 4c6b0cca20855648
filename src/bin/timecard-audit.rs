#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use timecard_audit::{AuditOptions, Pipeline, DEFAULT_INPUT, DEFAULT_OUTPUT};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Audit de pointages : jours consécutifs, repos insuffisant, shifts trop longs
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Fichier CSV de pointage
    #[arg(long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Rapport texte (remplacé à chaque run)
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    #[arg(long, default_value_t = 1)]
    min_gap_hours: u32,
    #[arg(long, default_value_t = 10)]
    max_gap_hours: u32,
    #[arg(long, default_value_t = 14)]
    max_shift_hours: u32,

    /// Code de sortie 2 si au moins une violation est trouvée
    #[arg(long)]
    fail_on_violations: bool,

    /// Export JSON du résumé du run (feature `serde`)
    #[arg(long)]
    summary: Option<PathBuf>,

    /// N'affiche que les avertissements
    #[arg(long, short)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    {
        let default = if cli.quiet { "warn" } else { "info" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        let _ = Subscriber::builder().with_env_filter(filter).try_init();
    }

    let opts = AuditOptions {
        min_gap_hours: cli.min_gap_hours,
        max_gap_hours: cli.max_gap_hours,
        max_shift_hours: cli.max_shift_hours,
    };

    let summary = Pipeline::new(opts)
        .run_paths(&cli.input, &cli.output)
        .with_context(|| format!("auditing {}", cli.input.display()))?;

    if let Some(path) = &cli.summary {
        #[cfg(feature = "serde")]
        timecard_audit::pipeline::export_summary_json(path, &summary)?;
        #[cfg(not(feature = "serde"))]
        anyhow::bail!("--summary {} requires the `serde` feature", path.display());
    }

    // Code 2 = violations trouvées (uniquement sur demande)
    let code = if cli.fail_on_violations && summary.violations() > 0 {
        2
    } else {
        0
    };
    std::process::exit(code);
}
