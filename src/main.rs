//! Bonsai CLI - binding-theoretic anaphora resolution over scenario files

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "bonsai")]
#[command(version)]
#[command(about = "Binding-theoretic anaphora resolution over constituency trees")]
#[command(long_about = r#"
Bonsai reads a scenario (a bracketed tree plus referents, movements and
VP content) and answers binding questions about it:
  • Antecedent candidates for reflexives and pronouns
  • Strict and sloppy readings of VP ellipsis
  • Dominance, c-command and local domains between nodes

Example usage:
  bonsai show --scenario demos/wh_reconstruction.toml
  bonsai resolve --scenario demos/wh_reconstruction.toml --referent himself
  bonsai ellipsis --scenario demos/wallet.json --node vp2 --reading sloppy --subject Mary
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to ./bonsai.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Emit machine-readable JSON instead of human output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List antecedent candidates for a referent
    Resolve {
        /// Scenario file (JSON or TOML)
        #[arg(short, long)]
        scenario: PathBuf,

        /// Name of the anaphor to resolve
        #[arg(short, long)]
        referent: String,

        /// Evaluate binding at the surface position only
        #[arg(long)]
        no_reconstruction: bool,
    },

    /// Resolve a VP-ellipsis site
    Ellipsis {
        /// Scenario file (JSON or TOML)
        #[arg(short, long)]
        scenario: PathBuf,

        /// Alias of the ellipsis node
        #[arg(short, long)]
        node: String,

        /// Reading to apply (strict, sloppy)
        #[arg(short, long, default_value = "strict")]
        reading: String,

        /// Subject of the elliptical clause, used by the sloppy reading
        #[arg(long)]
        subject: Option<String>,
    },

    /// Show structural relations between two nodes
    Relations {
        /// Scenario file (JSON or TOML)
        #[arg(short, long)]
        scenario: PathBuf,

        /// Alias of the first node
        #[arg(long)]
        from: String,

        /// Alias of the second node
        #[arg(long)]
        to: String,
    },

    /// Print the scenario tree with its referents and traces
    Show {
        /// Scenario file (JSON or TOML)
        #[arg(short, long)]
        scenario: PathBuf,
    },

    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(&self) -> bool {
        matches!(self, OutputMode::Human)
    }
}

/// Print a JSON success envelope for `command`
pub fn emit_success(
    output_mode: OutputMode,
    command: &str,
    data: serde_json::Value,
) -> anyhow::Result<()> {
    if output_mode.is_human() {
        return Ok(());
    }
    let envelope = serde_json::json!({
        "ok": true,
        "command": command,
        "data": data,
    });
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = if cli.json { OutputMode::Json } else { OutputMode::Human };
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Commands::Resolve { scenario, referent, no_reconstruction } => {
            commands::run_resolve(output_mode, config_path, &scenario, &referent, !no_reconstruction)
        }
        Commands::Ellipsis { scenario, node, reading, subject } => commands::run_ellipsis(
            output_mode,
            config_path,
            &scenario,
            &node,
            &reading,
            subject.as_deref(),
        ),
        Commands::Relations { scenario, from, to } => {
            commands::run_relations(output_mode, config_path, &scenario, &from, &to)
        }
        Commands::Show { scenario } => commands::run_show(output_mode, config_path, &scenario),
        Commands::Init { force } => commands::run_init(output_mode, config_path, force),
    };

    if let Err(e) = &result {
        if output_mode.is_human() {
            bonsai::ui::error(&e.to_string());
        } else {
            let envelope = serde_json::json!({ "ok": false, "error": e.to_string() });
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        std::process::exit(1);
    }
    Ok(())
}
