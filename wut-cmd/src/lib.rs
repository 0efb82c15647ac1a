//! Command implementations for the water usage CLI.
//!
//! Provides subcommands for rendering a single chart frame headlessly and for
//! replaying scripted interaction sessions against a fresh tracker.

use anyhow::Context;
use clap::{Subcommand, ValueEnum};
use wut_core::ChartConfig;

pub mod frame;
pub mod render;
pub mod replay;
pub mod svg;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    Svg,
    Json,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReplayFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render one frame of a chart view
    Render {
        /// View to render (breakdown, weekly, daily)
        #[arg(short = 'v', long, default_value = "breakdown")]
        view: String,

        /// Turn on breakdown edit mode before rendering
        #[arg(long)]
        edit: bool,

        /// Tap the category at this index before rendering
        #[arg(long)]
        highlight: Option<usize>,

        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: RenderFormat,

        /// JSON chart configuration (defaults when omitted)
        #[arg(short = 'c', long)]
        config: Option<String>,
    },

    /// Replay a scripted interaction session, one command per line
    Replay {
        /// Path to the script file
        #[arg(short = 's', long)]
        script: String,

        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: ReplayFormat,

        /// JSON chart configuration (defaults when omitted)
        #[arg(short = 'c', long)]
        config: Option<String>,
    },
}

/// Read and validate a chart configuration, or fall back to the defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<ChartConfig> {
    let Some(path) = path else {
        return Ok(ChartConfig::default());
    };
    let json = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
    let config = ChartConfig::from_json_str(&json).with_context(|| format!("parsing config {}", path))?;
    log::info!("Loaded config from {}", path);
    Ok(config)
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Render {
            view,
            edit,
            highlight,
            format,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let output = render::render_view(config, &view, edit, highlight, format)?;
            println!("{}", output);
            Ok(())
        }
        Command::Replay {
            script,
            format,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let text = std::fs::read_to_string(&script).with_context(|| format!("reading script {}", script))?;
            let output = replay::run_script(config, &text, format)?;
            println!("{}", output);
            Ok(())
        }
    }
}
