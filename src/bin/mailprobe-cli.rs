use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::CommandFactory;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mailprobe::{CheckOptions, ValidationResult, validate_batch};

#[derive(Parser)]
#[command(name = "mailprobe-cli")]
#[command(about = "Email deliverability checks: format, MX records, SMTP probe")]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check one or more addresses.
    Validate {
        /// addresses to check
        emails: Vec<String>,

        /// read addresses from a file (one per line)
        #[arg(long)]
        file: Option<PathBuf>,

        /// worker pool size
        #[arg(long, default_value_t = 5)]
        concurrency: usize,

        /// SMTP timeout per mail server (ms)
        #[arg(long = "timeout", default_value_t = 10_000)]
        timeout_ms: u64,

        /// output format (human|json)
        #[arg(long, default_value = "human")]
        format: String,
    },
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let Some(Commands::Validate {
        emails,
        file,
        concurrency,
        timeout_ms,
        format,
    }) = cli.cmd
    else {
        Cli::command().print_help()?;
        println!();
        std::process::exit(1);
    };

    run_validate(emails, file, concurrency, timeout_ms, &format)
}

fn run_validate(
    mut emails: Vec<String>,
    file: Option<PathBuf>,
    concurrency: usize,
    timeout_ms: u64,
    format: &str,
) -> Result<()> {
    if let Some(path) = file {
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        emails.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from),
        );
    }
    if emails.is_empty() {
        bail!("no email addresses given; pass them as arguments or via --file");
    }

    let mut options = CheckOptions {
        concurrency,
        ..CheckOptions::default()
    };
    options.probe.timeout_ms = timeout_ms;

    match format {
        "human" => {
            println!("Checking {} email addresses...\n", emails.len());
            let results = validate_batch(&emails, &options);
            print_human(&results);
        }
        "json" => {
            let results = validate_batch(&emails, &options);
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        other => bail!("unknown --format '{other}', use: human|json"),
    }

    // Per-address outcomes never change the exit code.
    Ok(())
}

fn print_human(results: &[ValidationResult]) {
    for result in results {
        println!("Email: {}", result.email);
        println!("Status: {}", result.status);
        println!("Details: {}", result.details);
        println!("{}", "-".repeat(50));
    }
    let passed = results
        .iter()
        .filter(|result| result.status.passes_basic_checks())
        .count();
    println!();
    println!(
        "Summary: {passed}/{} addresses passed basic checks",
        results.len()
    );
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
