//! Interactive CLI for the in-memory URL registry.
//!
//! Drives one registry instance that lives for the session: shorten URLs,
//! list and remove links, resolve codes, and inspect statistics and the
//! audit log.
//!
//! # Usage
//!
//! ```bash
//! # Start an interactive session
//! cargo run
//!
//! # With simulated API latency and a custom base URL
//! cargo run -- --delay-ms 300 --base-url https://sho.rt
//! ```
//!
//! # Environment Variables
//!
//! See [`url_registry::Config`] for the full list; command-line flags take
//! precedence over the environment.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::*;
use dialoguer::{Confirm, Input, Select};
use tracing_subscriber::EnvFilter;

use url_registry::prelude::*;

/// Interactive URL-shortening registry session.
#[derive(Parser)]
#[command(name = "url-registry")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Display prefix for short URLs (overrides BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Concurrent active-link quota (overrides MAX_ACTIVE_LINKS)
    #[arg(long)]
    max_active: Option<usize>,

    /// Simulated per-operation latency in milliseconds (overrides OP_DELAY_MS)
    #[arg(long)]
    delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }
    if let Some(max_active) = cli.max_active {
        config.max_active_links = max_active.max(1);
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.op_delay_ms = delay_ms;
    }

    init_tracing(&config);

    let audit = Arc::new(AuditLog::new(config.audit_capacity));
    let repository = Arc::new(MemoryLinkRepository::new(config.max_active_links));
    let registry = RegistryService::new(repository, &config.base_url, config.max_active_links)
        .with_audit_log(audit.clone())
        .with_op_delay(Duration::from_millis(config.op_delay_ms));

    println!("{}", "URL Registry".bold());
    println!(
        "base url {} | quota {} active links | links live in memory for this session\n",
        config.base_url.cyan(),
        config.max_active_links
    );

    loop {
        let choice = Select::new()
            .with_prompt("Action")
            .items(&[
                "Shorten a URL",
                "List links",
                "Resolve a code",
                "Remove a link",
                "Statistics",
                "Audit log",
                "Quit",
            ])
            .default(0)
            .interact()?;

        let outcome = match choice {
            0 => shorten(&registry).await,
            1 => list(&registry).await,
            2 => resolve(&registry).await,
            3 => remove(&registry).await,
            4 => statistics(&registry).await,
            5 => show_audit(&audit),
            _ => break,
        };

        if let Err(e) = outcome {
            println!("{} {e}", "error:".red().bold());
        }
        println!();
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.log_format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shorten(registry: &RegistryService<MemoryLinkRepository>) -> Result<()> {
    let url: String = Input::new()
        .with_prompt("Destination URL")
        .interact_text()?;

    let validity: u32 = Input::new()
        .with_prompt("Validity in minutes (1-1440)")
        .default(30)
        .interact_text()?;

    let custom: String = Input::new()
        .with_prompt("Custom code (leave empty to generate)")
        .allow_empty(true)
        .interact_text()?;

    let mut request = ShortenRequest::new(url, validity);
    if !custom.trim().is_empty() {
        request = request.with_custom_code(custom);
    }

    match registry.create(request).await {
        Ok(link) => {
            println!("{} {}", "created".green().bold(), link.short_url.bold());
            println!(
                "  expires {} | id {}",
                link.expires_at.format("%Y-%m-%d %H:%M:%S UTC"),
                link.id.to_string().dimmed()
            );
        }
        Err(RegistryError::Validation { errors }) => {
            println!("{}", "invalid request:".red().bold());
            for e in errors {
                println!("  {} {}", format!("{}:", e.field).yellow(), e.message);
            }
        }
        Err(e) => println!("{} {e}", "failed:".red().bold()),
    }

    Ok(())
}

async fn list(registry: &RegistryService<MemoryLinkRepository>) -> Result<()> {
    let links = registry.list().await?;

    if links.is_empty() {
        println!("{}", "no links yet".dimmed());
        return Ok(());
    }

    for link in links {
        let state = if link.is_active {
            "active ".green()
        } else {
            "expired".dimmed()
        };
        println!(
            "{} {} {} {:>4} clicks  {}",
            state,
            link.short_code.bold(),
            link.expires_at.format("%H:%M:%S"),
            link.click_count,
            truncate(&link.original_url, 48).dimmed()
        );
    }

    Ok(())
}

async fn resolve(registry: &RegistryService<MemoryLinkRepository>) -> Result<()> {
    let code: String = Input::new().with_prompt("Short code").interact_text()?;

    match registry.resolve(code.trim()).await {
        Ok(link) => println!(
            "{} {} ({} clicks)",
            "->".green().bold(),
            link.original_url,
            link.click_count
        ),
        Err(e) => println!("{} {e}", "failed:".red().bold()),
    }

    Ok(())
}

async fn remove(registry: &RegistryService<MemoryLinkRepository>) -> Result<()> {
    let links = registry.list().await?;
    if links.is_empty() {
        println!("{}", "nothing to remove".dimmed());
        return Ok(());
    }

    let labels: Vec<String> = links
        .iter()
        .map(|l| {
            format!(
                "{} -> {}{}",
                l.short_code,
                truncate(&l.original_url, 40),
                if l.is_active { "" } else { " (inactive)" }
            )
        })
        .collect();

    let idx = Select::new()
        .with_prompt("Link to remove")
        .items(&labels)
        .default(0)
        .interact()?;

    let confirmed = Confirm::new()
        .with_prompt(format!("Remove '{}'?", links[idx].short_code))
        .default(false)
        .interact()?;
    if !confirmed {
        println!("{}", "kept".dimmed());
        return Ok(());
    }

    registry.remove(links[idx].id).await?;
    println!("{} {}", "removed".green().bold(), links[idx].short_code);

    Ok(())
}

async fn statistics(registry: &RegistryService<MemoryLinkRepository>) -> Result<()> {
    let summary = registry.statistics().await?;

    println!("{}", "Statistics".bold());
    println!("  total links   {}", summary.total_links);
    println!("  active        {}", summary.active_links.to_string().green());
    println!("  inactive      {}", summary.inactive_links.to_string().dimmed());
    println!("  total clicks  {}", summary.total_clicks.to_string().cyan());

    Ok(())
}

fn show_audit(audit: &AuditLog) -> Result<()> {
    let stats = audit.stats();
    println!(
        "{} {} entries (info {}, warn {}, error {}, debug {})",
        "Audit log".bold(),
        stats.total,
        stats.info,
        stats.warn,
        stats.error,
        stats.debug
    );

    for entry in audit.entries(None, None).into_iter().take(15) {
        let level = match entry.level {
            AuditLevel::Error => "error".red(),
            AuditLevel::Warn => "warn ".yellow(),
            AuditLevel::Info => "info ".green(),
            AuditLevel::Debug => "debug".dimmed(),
        };
        println!(
            "  {} {} [{}/{}] {}",
            entry.timestamp.format("%H:%M:%S"),
            level,
            entry.component,
            entry.action,
            entry.message
        );
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
