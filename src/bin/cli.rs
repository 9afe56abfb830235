//! Sysdash CLI
//!
//! Command-line client for a running Sysdash server:
//! - Render the dashboard view
//! - Submit a system prompt
//! - Read back the stored prompt
//! - Check server status

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use sysdash::api::dto::{PromptResponse, SubmitPromptResponse, ViewResponse};
use sysdash::dashboard::{PageView, Trace};
use sysdash::SESSION_HEADER;

#[derive(Parser)]
#[command(name = "sysdash-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Command-line client for the Sysdash dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Dashboard server URL
    #[arg(long, default_value = "http://127.0.0.1:8501", global = true)]
    pub api_url: String,

    /// Session id returned by a previous submit
    #[arg(long, env = "SYSDASH_SESSION", global = true)]
    pub session: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the dashboard once
    View {
        /// Selected version (v0-v3)
        #[arg(short, long, default_value = "v0")]
        version: String,
    },

    /// Submit a system prompt
    Submit {
        /// Prompt text (use --file to read from a file)
        text: Option<String>,
        /// Read the prompt from a file
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// Show the prompt stored for the session
    Prompt,

    /// Show server status
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::View { version } => {
            let mut request = client
                .get(format!("{}/api/v1/view", cli.api_url))
                .query(&[("version", version.as_str()), ("event", "select_version")]);
            if let Some(id) = &cli.session {
                request = request.header(SESSION_HEADER, id);
            }

            let response = request.send().await?;
            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("View failed ({}): {}", status, text);
                std::process::exit(1);
            }

            let body: ViewResponse = response.json().await?;
            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&body)?),
                _ => print_view(&body.view),
            }
        }

        Commands::Submit { text, file } => {
            let prompt = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)?,
                (None, None) => {
                    eprintln!("Provide the prompt text or --file");
                    std::process::exit(1);
                }
            };

            let mut request = client
                .post(format!("{}/api/v1/prompt", cli.api_url))
                .json(&serde_json::json!({ "prompt": prompt }));
            if let Some(id) = &cli.session {
                request = request.header(SESSION_HEADER, id);
            }

            let response = request.send().await?;
            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Submit failed ({}): {}", status, text);
                std::process::exit(1);
            }

            let body: SubmitPromptResponse = response.json().await?;
            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&body)?),
                _ => {
                    if let Some(message) = &body.view.prompt.success_message {
                        println!("{}", message);
                    }
                    println!("{}", body.view.prompt.caption);
                    println!();
                    println!("Session: {}", body.session_id);
                    println!("Reuse it with --session {} or SYSDASH_SESSION", body.session_id);
                }
            }
        }

        Commands::Prompt => {
            let Some(id) = &cli.session else {
                eprintln!("No session given. Submit a prompt first, then pass --session.");
                std::process::exit(1);
            };

            let response = client
                .get(format!("{}/api/v1/prompt", cli.api_url))
                .header(SESSION_HEADER, id)
                .send()
                .await?;

            if !response.status().is_success() {
                eprintln!("Failed to fetch prompt: {}", response.status());
                std::process::exit(1);
            }

            let body: PromptResponse = response.json().await?;
            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&body)?),
                _ => match &body.last_prompt {
                    Some(prompt) if prompt.is_empty() => println!("(empty prompt)"),
                    Some(prompt) => println!("{}", prompt),
                    None => println!("No prompt stored yet."),
                },
            }
        }

        Commands::Status => {
            let response = client.get(format!("{}/health", cli.api_url)).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!("Sysdash v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "Server Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    if let Some(sessions) = health["sessions"].as_u64() {
                        println!("Live sessions: {}", sessions);
                    }
                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("Server returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to Sysdash at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the server is running:");
                    eprintln!("  cargo run --bin sysdash");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn print_view(view: &PageView) {
    println!("{}  [{}]", view.title, view.version);
    println!();

    println!("{}", view.statistics.header);
    println!("{:<15} {:<10} {}", "Metric", "Value", "Status");
    println!("{}", "-".repeat(40));
    for row in &view.statistics.rows {
        println!("{:<15} {:<10} {}", row.metric, row.value, row.status);
    }
    println!();

    println!("{}", view.statistics.key_metrics_header);
    for metric in &view.statistics.key_metrics {
        println!("  {:<10} {:>8} ({})", metric.label, metric.value, metric.delta);
    }
    println!();

    println!("{}", view.metrics.header);
    let charts = &view.metrics.charts;
    for figure in [&charts.requests, &charts.errors, &charts.traffic] {
        println!("  {}", figure.layout.title.text);
        for trace in &figure.data {
            match trace {
                Trace::Scatter(series) => {
                    let last = series.y.last().copied().unwrap_or_default();
                    let (min, max) = series
                        .y
                        .iter()
                        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                            (lo.min(*v), hi.max(*v))
                        });
                    println!(
                        "    {}: {} points, min={:.0}, max={:.0}, last={:.0}",
                        series.name,
                        series.y.len(),
                        min,
                        max,
                        last
                    );
                }
                Trace::Pie(pie) => {
                    for (label, value) in pie.labels.iter().zip(&pie.values) {
                        println!("    {:<10} {:>3}%", label, value);
                    }
                }
            }
        }
    }
    println!();

    println!("{}", view.prompt.header);
    println!("{}", view.prompt.caption);
    println!();
    println!("{}", view.footer);
}

fn format_duration(seconds: u64) -> String {
    let days = seconds / 86400;
    let hours = (seconds % 86400) / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(5), "5s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(3 * 3600 + 60), "3h 1m");
        assert_eq!(format_duration(2 * 86400 + 3600), "2d 1h 0m");
    }

    #[test]
    fn test_cli_parses_submit() {
        let cli = Cli::parse_from(["sysdash-cli", "submit", "hello", "--session", "abc"]);
        assert_eq!(cli.session.as_deref(), Some("abc"));
        assert!(matches!(cli.command, Commands::Submit { text: Some(ref t), .. } if t == "hello"));
    }
}
