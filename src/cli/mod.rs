//! CLI argument parsing and command handling

mod progress;

use crate::output::{render_summary, JsonExporter};
use anyhow::{Context, Result};
use clap::Parser;
use http_bench_core::{BenchmarkConfig, HttpMethod};
use std::path::PathBuf;
use std::time::Duration;

use progress::ProgressDisplay;

/// http-bench - Duration-bound HTTP load generator
#[derive(Parser, Debug)]
#[command(name = "http-bench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Target URL (http or https)
    #[arg(env = "HTTP_BENCH_URL")]
    pub url: String,

    /// HTTP method (GET, POST, PUT, DELETE, PATCH)
    #[arg(short = 'X', long, default_value = "GET", env = "HTTP_BENCH_METHOD")]
    pub method: HttpMethod,

    /// Run duration in seconds
    #[arg(
        short,
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..=3600),
        env = "HTTP_BENCH_DURATION"
    )]
    pub duration: u64,

    /// Number of concurrent connections
    #[arg(
        short,
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..=10_000),
        env = "HTTP_BENCH_CONNECTIONS"
    )]
    pub connections: u64,

    /// Request header as 'Name: value' (repeatable)
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request body
    #[arg(long, conflicts_with = "body_file")]
    pub body: Option<String>,

    /// Read the request body from a file
    #[arg(long)]
    pub body_file: Option<PathBuf>,

    /// Write the result as JSON to this path
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Hide the banner and the progress bar
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Run the benchmark described by the arguments
    pub async fn run(&self) -> Result<()> {
        let config = self.to_config()?;

        tracing::info!(
            target_url = %config.target,
            method = %config.method,
            duration_secs = self.duration,
            connections = self.connections,
            "Starting http-bench"
        );

        if !self.quiet {
            print_banner(&config);
        }

        let display = if self.quiet {
            ProgressDisplay::hidden()
        } else {
            ProgressDisplay::new()?
        };
        let on_progress = display.clone();

        let result = http_bench_core::run(config, move |percent| on_progress.update(percent))
            .await
            .context("benchmark could not start")?;

        display.finish();
        print!("{}", render_summary(&result));

        if let Some(path) = &self.json {
            JsonExporter::export(&result, path)
                .with_context(|| format!("Failed to export JSON to: {}", path.display()))?;
            println!("✓ JSON exported to: {}", path.display());
        }

        Ok(())
    }

    /// Build the engine config from the arguments
    pub fn to_config(&self) -> Result<BenchmarkConfig> {
        let mut config = BenchmarkConfig::new(self.url.clone(), self.method)
            .with_duration(Duration::from_secs(self.duration))
            .with_connections(self.connections as usize);

        for (name, value) in &self.headers {
            config = config.with_header(name.clone(), value.clone());
        }

        if let Some(body) = &self.body {
            config = config.with_body(body.clone());
        } else if let Some(path) = &self.body_file {
            let body = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read body from: {}", path.display()))?;
            config = config.with_body(body);
        }

        Ok(config)
    }
}

/// Parse a header given as `Name: value`
fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected 'Name: value', got '{raw}'"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing header name in '{raw}'"));
    }

    Ok((name.to_string(), value.trim().to_string()))
}

fn print_banner(config: &BenchmarkConfig) {
    println!("\n{}", "=".repeat(70));
    println!("   http-bench");
    println!("{}", "=".repeat(70));
    println!();
    println!("Configuration:");
    println!("  Target:       {}", config.target);
    println!("  Method:       {}", config.method);
    println!("  Duration:     {} s", config.duration.as_secs());
    println!("  Connections:  {}", config.connections);
    if !config.headers.is_empty() {
        println!("  Headers:      {}", config.headers.len());
    }
    if let Some(body) = &config.body {
        println!("  Body:         {} bytes", body.len());
    }
    println!("{}", "=".repeat(70));
    println!();
}
