//! # quill CLI
//!
//! Command-line interface for the quill blog generator.

mod commands;
mod manifest;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "quill.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new quill project
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,
    },

    /// Plan every page and write the page manifest
    Build,

    /// Print the planned pages without writing anything
    Plan {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Wrap a rendered page body in the HTML document shell
    Shell {
        /// File holding the page body (defaults to stdin)
        #[arg(long)]
        body: Option<PathBuf>,

        /// Files whose contents are appended to <head>
        #[arg(long)]
        head: Vec<PathBuf>,

        /// Attribute for the <html> element (name=value)
        #[arg(long = "html-attr", value_parser = commands::parse_attribute)]
        html_attrs: Vec<(String, String)>,

        /// Attribute for the <body> element (name=value)
        #[arg(long = "body-attr", value_parser = commands::parse_attribute)]
        body_attrs: Vec<(String, String)>,

        /// Output file (defaults to stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Init { path } => commands::init_project(path.as_deref()),
        Commands::Build => commands::build_site(&cli.config),
        Commands::Plan { json } => commands::show_plan(&cli.config, json),
        Commands::Shell {
            body,
            head,
            html_attrs,
            body_attrs,
            output,
        } => {
            let opts = commands::ShellOptions {
                body,
                head,
                html_attrs,
                body_attrs,
                output,
            };
            commands::render_shell_page(&cli.config, opts)
        }
    }
}
