use clap::Parser;
use matchmate::config::Settings;
use matchmate::shell::Shell;
use std::io;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "matchmate")]
#[command(about = "Register profiles, browse interest matches and chat from the console")]
struct Args {
    /// Configuration file (defaults to config/default.toml and config/local.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level or filter directive, overrides the configured one
    #[arg(short, long)]
    log_level: Option<String>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .map_err(|e| {
        eprintln!("Configuration error: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    if args.print_config {
        let rendered = settings
            .to_toml()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        println!("{}", rendered);
        return Ok(());
    }

    init_logging(&settings, args.log_level.as_deref());

    info!("Starting matchmate console...");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock(), settings);

    shell.run().map_err(|e| {
        error!("Shell terminated: {}", e);
        io::Error::new(io::ErrorKind::Other, e)
    })
}

/// Logs go to stderr so they never interleave with the menus on stdout
fn init_logging(settings: &Settings, cli_level: Option<&str>) {
    let log_level = cli_level
        .map(str::to_string)
        .or_else(|| std::env::var("LOG_LEVEL").ok())
        .unwrap_or_else(|| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}
