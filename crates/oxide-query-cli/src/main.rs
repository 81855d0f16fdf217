//! oxide-query CLI
//!
//! Compiles a declarative JSON statement description for one dialect.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_query::{Client, ClientConfig, Dialect};

/// Render JSON statement descriptions as dialect SQL.
#[derive(Parser)]
#[command(name = "oxide-query")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Target dialect (generic, mysql, postgres, sqlite, mssql, oracle).
    #[arg(short, long, env = "OXIDE_QUERY_DIALECT", default_value = "generic")]
    dialect: Dialect,

    /// Render undefined insert values as NULL instead of the grammar marker.
    #[arg(long)]
    null_as_default: bool,

    /// Print the SQL with every binding inlined instead of `{sql, bindings}`.
    #[arg(short, long)]
    literal: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Description file (stdin if not specified).
    file: Option<PathBuf>,
}

fn read_description(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let input = read_description(cli.file.as_ref())?;
    let description: serde_json::Value =
        serde_json::from_str(&input).context("description is not valid JSON")?;

    let client = Client::with_config(ClientConfig {
        dialect: cli.dialect,
        use_null_as_default: cli.null_as_default,
    });
    debug!(dialect = %cli.dialect, "compiling description");
    let builder = client.query_builder().from_json(&description);

    if cli.literal {
        println!("{}", builder.to_query()?);
    } else {
        let compiled = builder.to_sql()?;
        println!("{}", serde_json::to_string_pretty(&compiled)?);
    }
    Ok(())
}
