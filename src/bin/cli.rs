//! Vetchart CLI
//!
//! Command-line interface for Vetchart operations:
//! - Render weight charts to SVG
//! - Resolve push payloads into notifications
//! - Run the API server
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use vetchart::api::{serve, AppState};
use vetchart::chart::{
    to_svg, AxisDirection, ChartOptions, ChartVariant, Selection, Theme, WeightChart,
};
use vetchart::config::{generate_default_config, Config};
use vetchart::import::load_history;
use vetchart::notification::{BackgroundMessageHandler, NotificationSink, StdoutSink, TracingSink};
use vetchart::weight::{SortOrder, WeightHistory};

#[derive(Parser)]
#[command(name = "vetchart")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Weight-history charts and push notifications for pet medical records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations, then environment)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a weight chart
    Render {
        /// History file (.json or .csv)
        #[arg(required_unless_present = "sample")]
        input: Option<PathBuf>,
        /// Use the built-in sample history instead of a file
        #[arg(long, conflicts_with = "input")]
        sample: bool,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Order the list is displayed in (asc, desc)
        #[arg(short, long)]
        sort: Option<SortOrder>,
        /// Presentation mode (light, dark)
        #[arg(short, long)]
        theme: Option<Theme>,
        /// Chart variant (basic, detailed)
        #[arg(short, long)]
        variant: Option<ChartVariant>,
        /// Horizontal axis policy (chronological, follow-sort-order)
        #[arg(long)]
        axis_direction: Option<AxisDirection>,
        /// Open the tooltip on this point (chronological index)
        #[arg(long)]
        select: Option<usize>,
        /// Write the positioned scene as JSON instead of SVG
        #[arg(long)]
        scene: bool,
    },

    /// Resolve a push payload and show the notification
    Notify {
        /// Payload file (default: stdin)
        payload: Option<PathBuf>,
        /// Where to show the notification
        #[arg(long, value_enum, default_value = "stdout")]
        sink: SinkKind,
    },

    /// Run the API server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SinkKind {
    /// One JSON line per notification on stdout
    Stdout,
    /// Structured log event
    Log,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    config.logging.init();

    match cli.command {
        Commands::Render {
            input,
            sample,
            output,
            sort,
            theme,
            variant,
            axis_direction,
            select,
            scene,
        } => {
            let history = if sample {
                WeightHistory::sample()
            } else {
                let path = input.context("an input file or --sample is required")?;
                load_history(&path).with_context(|| format!("Failed to load {:?}", path))?
            };

            let chart = WeightChart::new(
                ChartOptions {
                    variant: variant.unwrap_or(config.chart.variant),
                    axis_direction: axis_direction.unwrap_or(config.chart.axis_direction),
                },
                theme.unwrap_or(config.chart.theme),
            );
            let sort_order = sort.unwrap_or(config.chart.sort_order);

            let Some(rendered) = chart.render(history.entries(), sort_order) else {
                eprintln!(
                    "Nothing to draw: {} entries (at least 2 are needed)",
                    history.len()
                );
                return Ok(());
            };

            let text = if scene {
                serde_json::to_string_pretty(&rendered)?
            } else {
                let selection = select
                    .map(|index| Selection::at(&rendered, index))
                    .unwrap_or_default();
                if select.is_some() && !selection.is_open() {
                    eprintln!("No tooltip: point not found or chart is not interactive");
                }
                to_svg(&rendered, selection.active())
            };

            write_output(output.as_deref(), &text)?;
        }

        Commands::Notify { payload, sink } => {
            let body = match payload {
                Some(path) => {
                    std::fs::read(&path).with_context(|| format!("Failed to read {:?}", path))?
                }
                None => {
                    let mut buf = Vec::new();
                    std::io::stdin().read_to_end(&mut buf)?;
                    buf
                }
            };

            let sink: Arc<dyn NotificationSink> = match sink {
                SinkKind::Stdout => Arc::new(StdoutSink),
                SinkKind::Log => Arc::new(TracingSink),
            };
            let handler = BackgroundMessageHandler::new(sink, config.notifications.defaults());
            handler.on_raw_message(&body).await?;
        }

        Commands::Serve { host, port } => {
            let mut config = config;
            if let Some(host) = host {
                config.api.host = host;
            }
            if let Some(port) = port {
                config.api.port = port;
            }

            tracing::info!("Starting Vetchart API server v{}", env!("CARGO_PKG_VERSION"));
            let state = AppState::from_config(&config);
            let api_config = state.config.as_ref().clone();
            serve(state, &api_config).await?;
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn write_output(output: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("Failed to write {:?}", path))?;
            eprintln!("Chart written to {:?}", path);
        }
        None => println!("{}", text),
    }
    Ok(())
}
