use std::path::PathBuf;
use std::time::Duration;

use cdn_scanner::{run_cdn_scan, Config, Outcome};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "cdn-scanner")]
#[command(about = "A tool to find the CDN provider in front of a hostname")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a hostname for a CDN provider
    #[command(after_help = "Example: cdn-scanner scan --hostname <host name>")]
    Scan {
        /// Hostname to scan for CDN
        #[arg(long)]
        hostname: String,

        /// Nameserver signature table (JSON)
        #[arg(long, default_value = cdn_scanner::config::DEFAULT_NS_RECORDS)]
        ns_records: PathBuf,

        /// Header key signature table (JSON)
        #[arg(long, default_value = cdn_scanner::config::DEFAULT_HEADER_KEYS)]
        header_keys: PathBuf,

        /// Timeout in seconds for each DNS query and HTTP request
        #[arg(long, default_value_t = cdn_scanner::config::DEFAULT_TIMEOUT_SECS)]
        timeout: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Scan {
            hostname,
            ns_records,
            header_keys,
            timeout,
        } => {
            let config = Config {
                ns_records,
                header_keys,
                timeout: Duration::from_secs(timeout),
            };

            match run_cdn_scan(&config, &hostname)? {
                Outcome::Found(provider) => println!("CDN FOUND: {}", provider),
                Outcome::NotFound => println!("CDN NOT FOUND!"),
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
