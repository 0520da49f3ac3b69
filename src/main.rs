use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tracing::{error, info};

use vibration_watch::common::logging::{init_logger, LogLevel};
use vibration_watch::state::AppState;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long = "data-dir", default_value = ".")]
    data_dir: std::path::PathBuf,
    #[arg(long = "port", default_value = "8501")]
    port: u16,
    #[arg(long = "bind", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    bind: IpAddr,
    #[arg(long = "log-level", value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
    #[arg(long = "log-file", default_value = "")]
    log_file: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    //We have to keep the worker_guard alive
    let _worker_guard = init_logger(args.log_level, &args.log_file);

    std::fs::create_dir_all(&args.data_dir).unwrap_or_else(|e| {
        error!("Couldn't create data dir {}: {}", args.data_dir.to_string_lossy(), e);
        std::process::exit(1);
    });

    info!("Serving vibration data from {}", args.data_dir.to_string_lossy());

    let state = AppState::new(args.data_dir);
    let addr = SocketAddr::new(args.bind, args.port);

    tokio::select! {
        result = vibration_watch::serve(state, addr) => {
            if let Err(err) = result {
                error!("{:#}", err);
                std::process::exit(1);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted by user, stopping dashboard");
        }
    }
}
