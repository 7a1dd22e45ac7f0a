use std::net::Ipv4Addr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// httpfs - read HTTP resources as files
#[derive(Parser, Debug)]
#[command(name = "httpfs")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// TCP port to contact hosts on
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Timeout in seconds for resolving, connecting and each send or receive
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// User-Agent header value
    #[arg(long, global = true)]
    user_agent: Option<String>,

    /// Response size cap in bytes, headers included
    #[arg(long, global = true)]
    max_size: Option<usize>,

    /// Connect to this address instead of resolving the host
    #[arg(long, global = true)]
    connect_to: Option<Ipv4Addr>,

    /// More logging (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the body behind a path to stdout
    Cat {
        /// Namespace path, e.g. example.com/index.html
        path: String,
    },
    /// Print the status line and headers of the response behind a path
    Head { path: String },
    /// Show the request a path turns into, without sending it
    Resolve { path: String },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let overrides = commands::Overrides {
        port: args.port,
        timeout_secs: args.timeout,
        user_agent: args.user_agent,
        max_response_size: args.max_size,
    };

    let result = commands::load_config(args.config.as_deref(), overrides).and_then(|config| {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        match args.command {
            Command::Cat { path } => commands::cat(&config, args.connect_to, &path, &mut out),
            Command::Head { path } => commands::head(&config, args.connect_to, &path, &mut out),
            Command::Resolve { path } => commands::resolve(&config, &path, &mut out),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
