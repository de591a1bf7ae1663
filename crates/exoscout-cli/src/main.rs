use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use exoscout_core::{
    ArchiveSource, Config, Exporter, FileSource, PlotSpec, RecordSource, Session,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod display;
mod interactive;

#[derive(Parser)]
#[command(name = "exoscout")]
#[command(version, about = "Fetch, filter, search and plot NASA Exoplanet Archive data", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/exoscout/config.toml)
    #[arg(long, global = true, env = "EXOSCOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Read a saved archive JSON response instead of querying the archive
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Fetch raw records and report how many arrived
    Fetch,
    /// Fetch and filter to planets with orbital period and radius
    Process,
    /// Search processed planets by name
    Search {
        /// Case-insensitive name fragment
        keyword: String,
        /// How many matches to print
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show details for one planet
    Show {
        /// Exact planet name, any case
        name: String,
    },
    /// Produce the orbital period vs radius series
    Plot {
        /// Write the series to a .csv or .json file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Export processed planets to .json, .csv or .md
    Export {
        path: PathBuf,
    },
    /// Menu-driven session (the default)
    Interactive {
        /// Where the visualize option writes the plot series
        #[arg(long, default_value = "orbital_plot.csv")]
        plot_path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for series and exports
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "exoscout=info,exoscout_core=info,exoscout_api=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(timeout) = cli.timeout {
        config.archive.timeout_secs = Some(timeout);
    }

    let source = build_source(&cli, &config)?;
    let mut session = Session::new();

    let command = cli.command.unwrap_or(Commands::Interactive {
        plot_path: PathBuf::from("orbital_plot.csv"),
    });

    match command {
        Commands::Fetch => {
            let count = session.fetch(source.as_ref()).await?;
            println!("Fetched {} records.", count);
        }
        Commands::Process => {
            let processed = prepare(&mut session, source.as_ref()).await?;
            println!("Processed {} records.", processed);
        }
        Commands::Search { keyword, limit } => {
            prepare(&mut session, source.as_ref()).await?;
            tracing::info!("Searching for: {}", keyword);

            let matches = session.search(&keyword)?;
            let limit = limit.unwrap_or(config.display.result_limit);
            display::write_matches(&mut io::stdout().lock(), &matches, limit)?;
        }
        Commands::Show { name } => {
            prepare(&mut session, source.as_ref()).await?;
            match session.find(&name)? {
                Some(planet) => println!("{}", display::details(planet)),
                None => println!("No planet named {:?}.", name),
            }
        }
        Commands::Plot { output } => {
            prepare(&mut session, source.as_ref()).await?;
            let projection = session.project()?;
            let spec = PlotSpec::default();

            eprintln!("{} ({} points)", spec.title, projection.len());
            eprintln!("x: {} [log], y: {} [log]", spec.x_label, spec.y_label);
            if let Some(bounds) = projection.log_bounds() {
                eprintln!(
                    "x range {}..{}, y range {}..{}",
                    bounds.x.min, bounds.x.max, bounds.y.min, bounds.y.max
                );
            }

            match output {
                Some(path) => {
                    Exporter::export_projection(&projection, &path)?;
                    println!("Plot series saved as {}", path.display());
                }
                None => {
                    let mut stdout = io::stdout().lock();
                    stdout.write_all(Exporter::projection_to_csv(&projection).as_bytes())?;
                }
            }
        }
        Commands::Export { path } => {
            prepare(&mut session, source.as_ref()).await?;
            Exporter::export_to_file(session.processed()?, &path)?;
            println!(
                "Exported {} planets to {}",
                session.processed()?.len(),
                path.display()
            );
        }
        Commands::Interactive { plot_path } => {
            let settings = interactive::MenuSettings {
                result_limit: config.display.result_limit,
                plot_path,
            };
            let stdin = io::stdin();
            interactive::run_menu(
                &mut session,
                source.as_ref(),
                &settings,
                stdin.lock(),
                &mut io::stdout(),
            )
            .await?;
        }
    }

    Ok(())
}

fn build_source(cli: &Cli, config: &Config) -> anyhow::Result<Box<dyn RecordSource>> {
    match &cli.input {
        Some(path) => Ok(Box::new(FileSource::new(path))),
        None => {
            let source = ArchiveSource::from_config(&config.archive)
                .context("Failed to set up the archive client")?;
            Ok(Box::new(source))
        }
    }
}

/// One-shot commands run fetch and process back to back
async fn prepare(session: &mut Session, source: &dyn RecordSource) -> anyhow::Result<usize> {
    let fetched = session.fetch(source).await?;
    let processed = session.process()?;
    tracing::info!("{} of {} records usable", processed, fetched);
    Ok(processed)
}
