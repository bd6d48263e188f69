use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod adapter;
mod app;
mod error;
mod export;
mod fetch;
mod models;
mod prompt;
mod render;
mod store;

use app::App;
use fetch::{CovidClient, DataSource, DEFAULT_BASE_URL};
use models::{Metric, RegionSelection, TimeScale};

#[derive(Parser)]
#[command(name = "covid-spark")]
#[command(about = "Daily COVID-19 case sparklines for the US and each state", long_about = None)]
struct Cli {
    /// Base URL of the tracking API
    #[arg(long, global = true, env = "COVID_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Read saved `us_daily.json` and `states_daily.json` from this directory instead
    #[arg(long, global = true)]
    from_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ViewArgs {
    /// State code, or `all` for nationwide
    #[arg(long, default_value = "all")]
    region: RegionSelection,
    #[arg(long, value_enum, default_value_t = Metric::Positive)]
    metric: Metric,
    #[arg(long, value_enum, default_value_t = TimeScale::Max)]
    scale: TimeScale,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw the sparkline and latest reading for a region
    Show {
        #[command(flatten)]
        view: ViewArgs,
        #[arg(long, default_value_t = render::DEFAULT_WIDTH)]
        width: usize,
    },
    /// List selectable regions
    Regions,
    /// Print the reading at a day index (0 is the earliest day)
    Scrub {
        #[command(flatten)]
        view: ViewArgs,
        #[arg(long)]
        index: usize,
    },
    /// Write the visible window as CSV
    Export {
        #[command(flatten)]
        view: ViewArgs,
        #[arg(long, default_value = "covid.csv")]
        out: PathBuf,
    },
    /// Browse regions, metrics and time scales from a prompt
    Interactive {
        #[arg(long, default_value_t = render::DEFAULT_WIDTH)]
        width: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let source = match cli.from_dir {
        Some(dir) => DataSource::Dir(dir),
        None => DataSource::Api(CovidClient::new(cli.base_url)),
    };

    let mut app = App::new();
    let summary = app.apply_fetch(source.fetch_all().await);
    if !summary.nationwide_loaded && !summary.per_region_loaded {
        anyhow::bail!("no data could be loaded; run with RUST_LOG=warn for details");
    }

    match cli.command {
        Commands::Show { view, width } => {
            select(&mut app, &view);
            print!("{}", prompt::redraw(&app, width));
        }
        Commands::Regions => {
            print!("{}", render::build_region_list(&app.region_options()));
        }
        Commands::Scrub { view, index } => {
            select(&mut app, &view);
            let info = app
                .scrub(index)
                .with_context(|| format!("cannot scrub to day {index}"))?;
            println!("{}", render::info_line(&info));
        }
        Commands::Export { view, out } => {
            select(&mut app, &view);
            let adapter = app.adapter().context("no data to export")?;
            let label = app.shown_region().to_string();
            let written = export::export_csv(adapter, &label, &out)?;
            println!("Wrote {written} days to {}.", out.display());
        }
        Commands::Interactive { width } => {
            print!("{}", prompt::redraw(&app, width));
            println!("{}", prompt::HELP);

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                if line.trim().is_empty() {
                    continue;
                }
                match prompt::parse_command(&line) {
                    Ok(prompt::Command::Quit) => break,
                    Ok(command) => print!("{}", prompt::apply(&mut app, command, width)),
                    Err(message) => println!("{message}"),
                }
            }
        }
    }

    Ok(())
}

fn select(app: &mut App, view: &ViewArgs) {
    app.select_region(view.region.clone());
    app.select_metric(view.metric);
    app.select_time_scale(view.scale);
}
