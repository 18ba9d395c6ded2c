//! Teletype-Backup main entry point
//!
//! This is the command-line interface for the Teletype blog exporter.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use teletype_backup::config::{load_config_or_default, validate, Config};
use teletype_backup::crawler::{run_backup, HttpAssetFetcher, RunContext, ScrollPolicy};
use teletype_backup::output::{format_elapsed, RunLayout};
use teletype_backup::renderer::ChromiumRenderer;
use teletype_backup::BlogRoot;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Teletype-Backup: a full-fidelity exporter for Teletype blogs
///
/// Teletype-Backup renders every post of a blog in a headless browser,
/// including posts only reachable through sections, and saves the pages,
/// extracted metadata and images to a local directory.
#[derive(Parser, Debug)]
#[command(name = "teletype-backup")]
#[command(version = "1.0.0")]
#[command(about = "Back up a Teletype blog to local files", long_about = None)]
struct Cli {
    /// Blog URL, e.g. https://titanida.com (prompted for when omitted)
    #[arg(value_name = "BLOG_URL")]
    blog_url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory in which the backup directory is created
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Collect posts from the home feed only, without visiting sections
    #[arg(long)]
    skip_sections: bool,

    /// Validate config and show what would be backed up without launching a browser
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let started = Instant::now();

    let mut config = load_config_or_default(cli.config.as_deref())?;
    if let Some(dir) = &cli.output_dir {
        config.backup.output_root = dir.clone();
        validate(&config)?;
    }

    let blog_url = match &cli.blog_url {
        Some(url) => url.clone(),
        None => prompt_blog_url()?,
    };
    let root = BlogRoot::parse(&blog_url)?;

    if cli.dry_run {
        setup_logging(cli.verbose, cli.quiet, None);
        handle_dry_run(&config, &root, cli.skip_sections);
        return Ok(());
    }

    let layout = RunLayout::create(
        &config.backup.output_root,
        &root.domain(),
        chrono::Local::now(),
    )?;
    let log_file = File::create(layout.log_path())?;
    setup_logging(cli.verbose, cli.quiet, Some(log_file));

    tracing::info!("Backup directory: {}", layout.root().display());

    let result = handle_backup(config, root, layout, cli.skip_sections).await;

    println!("Total elapsed time: {}", format_elapsed(started.elapsed()));
    result
}

/// Asks for the blog URL on stdin
fn prompt_blog_url() -> io::Result<String> {
    print!("Enter your blog URL (e.g., https://titanida.com): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Events go to stderr and, once a run directory exists, to its log file.
fn setup_logging(verbose: u8, quiet: bool, log_file: Option<File>) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("teletype_backup=info,warn"),
            1 => EnvFilter::new("teletype_backup=debug,info"),
            2 => EnvFilter::new("teletype_backup=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false);

    let file_layer = log_file.map(|file| {
        fmt::layer()
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be backed up
fn handle_dry_run(config: &Config, root: &BlogRoot, skip_sections: bool) {
    println!("=== Teletype-Backup Dry Run ===\n");

    println!("Blog:");
    println!("  URL: {}", root);
    println!("  Domain: {}", root.domain());
    println!(
        "  Listings: {}",
        if skip_sections {
            "home feed only"
        } else {
            "home feed and sections"
        }
    );

    println!("\nRenderer:");
    println!("  Headless: {}", config.renderer.headless);
    println!(
        "  Window: {}x{}",
        config.renderer.window_width, config.renderer.window_height
    );
    println!(
        "  Settle delays: {}ms after load, {}ms after scroll",
        config.renderer.page_load_delay_ms, config.renderer.scroll_delay_ms
    );
    match &config.renderer.chrome_executable {
        Some(path) => println!("  Executable: {}", path.display()),
        None => println!("  Executable: auto-detect"),
    }

    println!("\nDiscovery:");
    if skip_sections {
        println!(
            "  Home feed: {}, target the advertised post count",
            ScrollPolicy::blog(&config.discovery, None)
        );
    } else {
        let policy = ScrollPolicy::section(&config.discovery);
        println!("  Home feed: {}", policy);
        println!("  Sections: {}", policy);
    }

    println!("\nOutput:");
    println!("  Root: {}", config.backup.output_root.display());
    println!("  Delay between posts: {}ms", config.backup.politeness_delay_ms);
}

/// Launches the browser and runs the backup
async fn handle_backup(
    config: Config,
    root: BlogRoot,
    layout: RunLayout,
    skip_sections: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let fetcher = HttpAssetFetcher::new(&config.fetcher)?;

    let mut renderer = match ChromiumRenderer::launch(&config.renderer).await {
        Ok(renderer) => renderer,
        Err(e) => {
            tracing::error!("Failed to start browser: {}", e);
            return Err(e.into());
        }
    };

    let ctx = RunContext::new(root, layout, config);
    match run_backup(ctx, &mut renderer, &fetcher, skip_sections).await {
        Ok(summary) => {
            println!(
                "Backup completed: {}/{} posts saved ({} failed)",
                summary.successful_downloads, summary.total_posts, summary.failed_downloads
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
