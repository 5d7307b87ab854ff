//! CLI for running the vacancy pipeline without the HTTP server
//!
//! Every command prints a single JSON document to stdout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use server_core::config::Config;
use server_core::domains::vacancies::{
    export_search, parse_vacancies, search_vacancies, ExportOutcome, Vacancy, VacancyFilter,
};
use server_core::kernel::ServerDeps;
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vacancy_cli")]
#[command(about = "Fetch, query and export hh.ru vacancies")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,

    /// Reload the vacancies table from hh.ru
    Parse,

    /// Print stored vacancies matching the filters
    Search {
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        specialization: Option<String>,
        #[arg(long)]
        limit: Option<i64>,
        #[arg(long)]
        offset: Option<i64>,
    },

    /// Search, then export the result to the report spreadsheet
    Export {
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        specialization: Option<String>,
    },
}

#[derive(Serialize)]
struct Response<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

fn output<T: Serialize>(resp: Response<T>) -> Result<()> {
    println!("{}", serde_json::to_string(&resp)?);
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn,server_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Migrate => cmd_migrate(&config).await,
        Commands::Parse => cmd_parse(&config).await,
        Commands::Search {
            city,
            specialization,
            limit,
            offset,
        } => {
            let filter = VacancyFilter {
                city,
                specialization,
                limit,
                offset,
            };
            cmd_search(&config, filter).await
        }
        Commands::Export {
            city,
            specialization,
        } => {
            let filter = VacancyFilter {
                city,
                specialization,
                ..Default::default()
            };
            cmd_export(&config, filter).await
        }
    }
}

async fn get_pool(config: &Config) -> Result<PgPool> {
    PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

// ============================================================================
// Commands
// ============================================================================

async fn cmd_migrate(config: &Config) -> Result<()> {
    let pool = get_pool(config).await?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    output::<()>(Response {
        success: true,
        message: Some("Migrations applied".to_string()),
        data: None,
    })
}

async fn cmd_parse(config: &Config) -> Result<()> {
    let pool = get_pool(config).await?;
    let deps = ServerDeps::from_config(config, pool)?;

    let summary = parse_vacancies(&deps).await?;

    output(Response {
        success: true,
        message: None,
        data: Some(summary),
    })
}

async fn cmd_search(config: &Config, filter: VacancyFilter) -> Result<()> {
    let pool = get_pool(config).await?;
    let filter = filter.bounded(config.vacancy_list_max_limit);

    let vacancies = Vacancy::search(&filter, &pool).await?;

    output(Response {
        success: true,
        message: None,
        data: Some(vacancies),
    })
}

async fn cmd_export(config: &Config, filter: VacancyFilter) -> Result<()> {
    let pool = get_pool(config).await?;
    let deps = ServerDeps::from_config(config, pool)?;

    let search = search_vacancies(filter, &deps).await?;

    match export_search(Some(search.search_id), &deps).await? {
        ExportOutcome::Exported { rows, .. } => output(Response {
            success: true,
            message: Some(format!(
                "Exported {} vacancies to '{}'",
                rows, deps.export.spreadsheet_name
            )),
            data: Some(rows),
        }),
        ExportOutcome::NothingToExport => output::<()>(Response {
            success: false,
            message: Some("No vacancies match the filters; nothing exported".to_string()),
            data: None,
        }),
    }
}
