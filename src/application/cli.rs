use anyhow::Result;
use clap::Arg;
use clap::Command;

use crate::configuration::Config;

pub fn build() -> Command {
    return Command::new("mosart-bridge")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Bridges control surfaces to a Viz Mosart server over its REST API, polling live status and tracking overlay graphics by story.")
        .arg(
            Arg::new("config-file")
                .short('c')
                .long("config-file")
                .env("MOSART_CONFIG_FILE")
                .num_args(1)
                .help("Path to a TOML configuration file"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .env("MOSART_HOST")
                .num_args(1)
                .help("Target IP or hostname of the Mosart server"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .env("MOSART_PORT")
                .num_args(1)
                .help("Target port. The web API listens on 55142, the bare REST API on 55167. [default: 55142]"),
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .env("MOSART_API_KEY")
                .num_args(1)
                .help("API key sent with every request"),
        )
        .arg(
            Arg::new("poll-interval")
                .long("poll-interval")
                .env("MOSART_POLL_INTERVAL")
                .num_args(1)
                .help("Status poll interval in milliseconds [default: 1000]"),
        )
        .arg(
            Arg::new("request-timeout")
                .long("request-timeout")
                .env("MOSART_REQUEST_TIMEOUT")
                .num_args(1)
                .help("Per-request timeout in milliseconds [default: 1000]"),
        )
        .arg(
            Arg::new("use-web-api")
                .long("use-web-api")
                .env("MOSART_USE_WEB_API")
                .num_args(1)
                .value_parser(["true", "false"])
                .help("Use the web API root instead of the bare REST root [default: true]"),
        )
        .arg(
            Arg::new("enable-overlay-list")
                .long("enable-overlay-list")
                .env("MOSART_ENABLE_OVERLAY_LIST")
                .num_args(1)
                .value_parser(["true", "false"])
                .help("Fetch and track overlay graphics per story. Requires Mosart 5.13 or newer. [default: false]"),
        );
}

pub async fn parse() -> Result<()> {
    let matches = build().get_matches();
    Config::load(build(), vec![&matches]).await?;

    return Ok(());
}
