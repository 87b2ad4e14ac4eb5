use crate::commands::Commands;
use crate::error::CliError;
use clap::Parser;
use connectors::sql::metadata::SchemaIntrospector;
use connectors::sql::mysql::adapter::MySqlAdapter;
use engine::copy::{CopyEngine, CopyPlan};
use engine::job::CopyJob;
use engine::notify::{LogNotifier, Notifier, WebhookNotifier};
use model::transform::mapping::TranslationRegistry;
use std::sync::Arc;
use tracing::Level;

mod commands;
mod error;

#[derive(Parser)]
#[command(
    name = "rowboat",
    version = "0.1.0",
    about = "Chunked table copy tool for MySQL"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Initialize logger
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Copy {
            source_table,
            destination_table,
            url,
            chunk_size,
            starting_id,
            id_column,
            data_translation,
            translations,
            notify_url,
            dry_run,
        } => {
            let mut job = CopyJob::new(&source_table, &destination_table)
                .with_id_column(&id_column)
                .with_chunk_size(chunk_size)
                .with_starting_id(starting_id);
            if let Some(key) = &data_translation {
                job = job.with_translation(key);
            }

            let registry =
                load_translations(translations.as_deref(), job.translation.is_some()).await?;

            let db = Arc::new(MySqlAdapter::connect(&url).await?);
            let notifier = build_notifier(notify_url.as_deref());
            let engine = CopyEngine::new(db, notifier, registry);

            if dry_run {
                let plan = engine.plan(&job).await?;
                print_plan(&job, &plan);
            } else {
                engine.run(&job).await?;
            }
        }
        Commands::Columns { table, url } => {
            let db = Arc::new(MySqlAdapter::connect(&url).await?);
            let introspector = SchemaIntrospector::new(db);
            for column in introspector.columns(&table).await? {
                println!("{column}");
            }
        }
    }

    Ok(())
}

async fn load_translations(
    path: Option<&str>,
    required: bool,
) -> Result<TranslationRegistry, CliError> {
    match path {
        Some(path) => {
            let doc = tokio::fs::read_to_string(path).await?;
            Ok(TranslationRegistry::from_json(&doc)?)
        }
        None if required => Err(CliError::MissingTranslationsFile),
        None => Ok(TranslationRegistry::new()),
    }
}

fn build_notifier(url: Option<&str>) -> Arc<dyn Notifier> {
    match url {
        Some(url) => Arc::new(WebhookNotifier::new(url)),
        None => Arc::new(LogNotifier),
    }
}

fn print_plan(job: &CopyJob, plan: &CopyPlan) {
    let mode = if plan.translated {
        "read, translate, bulk-load"
    } else if plan.destination_columns == plan.source_columns {
        "INSERT ... SELECT *"
    } else {
        "INSERT ... SELECT shared columns"
    };

    println!(
        "Copy plan for '{}' -> '{}':",
        job.source_table, job.destination_table
    );
    println!("-----------------------------");
    println!("{:<16} {}", "Max id", plan.max_id);
    println!("{:<16} {}", "Chunk size", job.chunk_size);
    println!("{:<16} {}", "Mode", mode);
    println!("{:<16} {}", "Shared columns", plan.shared_columns.join(", "));
    println!("{:<16} {}", "Windows", plan.windows.len());
    for window in &plan.windows {
        println!("  {window}");
    }
}
