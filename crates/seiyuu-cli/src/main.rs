mod format;
mod observer;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Datelike;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use seiyuu_api::anilist::client::SeasonVariables;
use seiyuu_api::anilist::types::MediaSeason;
use seiyuu_api::AniListClient;
use seiyuu_core::config::AppConfig;
use seiyuu_core::models::SummaryOrder;
use seiyuu_core::{run_query, QueryOptions, SeiyuuError};

/// Count voice actor roles across an anime season on AniList.
#[derive(Debug, Parser)]
#[command(name = "seiyuu", version)]
struct Cli {
    /// Season to list (winter, spring, summer, fall). Omit with --year for the whole year.
    #[arg(long)]
    season: Option<MediaSeason>,

    /// Season year. Defaults to the current year.
    #[arg(long)]
    year: Option<u32>,

    /// Read only the first page of shows and of each cast.
    #[arg(long)]
    quick: bool,

    /// Config file to use instead of the user config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Summary order; overrides the config file.
    #[arg(long, value_enum)]
    order: Option<OrderArg>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Rows printed by `--format table`.
    #[arg(long, default_value_t = 30)]
    limit: usize,

    /// Write the effective configuration to the user config file and exit.
    #[arg(long)]
    init_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrderArg {
    Roles,
    Encounter,
}

impl From<OrderArg> for SummaryOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Roles => SummaryOrder::TotalRolesDesc,
            OrderArg::Encounter => SummaryOrder::Encounter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

impl Cli {
    /// With no year, the current season of the current year; with only a
    /// year, the whole year.
    fn season_variables(&self) -> SeasonVariables {
        match self.year {
            Some(season_year) => SeasonVariables {
                season_year,
                season: self.season,
            },
            None => SeasonVariables {
                season_year: chrono::Utc::now().year() as u32,
                season: Some(self.season.unwrap_or_else(MediaSeason::current)),
            },
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("seiyuu=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), SeiyuuError> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    if cli.init_config {
        config.save()?;
        tracing::info!(path = %AppConfig::config_path().display(), "Config written");
        return Ok(());
    }

    let client = AniListClient::with_transport(config.transport()?, config.client_settings());
    let options = QueryOptions {
        quick: cli.quick,
        variables: cli.season_variables(),
        order: cli.order.map(Into::into).unwrap_or(config.output.order),
    };
    tracing::info!(
        season = ?options.variables.season,
        year = options.variables.season_year,
        quick = options.quick,
        endpoint = client.transport().endpoint(),
        per_page = client.settings().media_per_page,
        "Querying AniList"
    );

    let result = run_query(&client, &options, &observer::LogObserver).await?;

    match cli.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result).map_err(std::io::Error::from)?;
            println!("{json}");
        }
        OutputFormat::Table => print!("{}", format::table(&result, cli.limit)),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Query failed");
            ExitCode::FAILURE
        }
    }
}
