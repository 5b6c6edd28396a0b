// src/main.rs
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use log::{debug, info, warn};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::error::ProbeError;
use crate::api::payload::RequestPayload;
use crate::config::ProbeConfig;
use crate::probe::ProbeOutcome;

mod api;
mod config;
mod probe;
mod sample;

#[derive(Parser)]
#[command(name = "visionprobe")]
#[command(about = "Send a sample image to a vision API endpoint and print the reply", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    target: Target,
}

#[derive(Args)]
struct Target {
    /// Vision endpoint (default: $VISION_API_URL or http://localhost:3000/api/vision)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Image to send (default: $VISION_SAMPLE_IMAGE or ./sample.jpg)
    #[arg(long, global = true)]
    image: Option<PathBuf>,

    /// Sniff the image type instead of always labelling it image/jpeg
    #[arg(long, global = true)]
    detect_mime: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// POST the sample image to the endpoint (the default)
    Send {
        /// Request timeout in seconds (default: the HTTP client's own)
        #[arg(long)]
        timeout: Option<u64>,

        /// Exit with a non-zero status when the probe fails
        #[arg(long)]
        strict: bool,
    },
    /// Print the request payload without sending it
    Encode {
        /// Print only the data URI instead of the JSON body
        #[arg(long)]
        data_uri: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init_from_env(
        env_logger::Env::default().filter_or("RUST_LOG", "info")
    );

    let cli = Cli::parse();
    let config = ProbeConfig::resolve(cli.target.url, cli.target.image)
        .with_detect_mime(cli.target.detect_mime);

    match cli.command.unwrap_or(Commands::Send { timeout: None, strict: false }) {
        Commands::Send { timeout, strict } => {
            let config = config.with_timeout(timeout.map(Duration::from_secs));
            run_send(config, strict)
        }
        Commands::Encode { data_uri } => {
            run_encode(config, data_uri)
        }
    }
}

fn run_send(config: ProbeConfig, strict: bool) -> Result<()> {
    info!("Starting vision probe");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let outcome = probe::probe_endpoint(&config, &mut out)?;
    out.flush()?;

    info!("Vision probe finished (success: {})", outcome.is_success());
    if let Some(value) = outcome.response() {
        debug!("Raw response: {}", value);
    }
    match outcome {
        ProbeOutcome::Failed(e) if strict => anyhow::bail!("vision probe failed: {}", e),
        _ => Ok(()),
    }
}

fn run_encode(config: ProbeConfig, data_uri: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match probe::load_payload(&config) {
        Ok(payload) => print_payload(&payload, data_uri, &mut out)?,
        Err(e) => {
            warn!("Could not build payload: {}", e);
            probe::render_failure(&e, &mut out)?;
        }
    }

    Ok(())
}

fn print_payload(payload: &RequestPayload, data_uri: bool, out: &mut dyn Write) -> Result<()> {
    if data_uri {
        writeln!(out, "{}", payload.image)?;
    } else {
        let json = payload
            .to_json()
            .map_err(|e| ProbeError::Unexpected(format!("failed to serialize payload: {}", e)))?;
        writeln!(out, "{}", json)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::payload::build_payload;

    #[test]
    fn no_subcommand_means_send() {
        let cli = Cli::parse_from(["visionprobe"]);
        assert!(cli.command.is_none());
        assert!(cli.target.url.is_none());
        assert!(!cli.target.detect_mime);
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::parse_from([
            "visionprobe", "send", "--timeout", "5", "--strict",
            "--url", "http://example.test/api/vision", "--image", "cat.png",
        ]);
        assert_eq!(cli.target.url.as_deref(), Some("http://example.test/api/vision"));
        assert_eq!(cli.target.image, Some(PathBuf::from("cat.png")));
        match cli.command {
            Some(Commands::Send { timeout, strict }) => {
                assert_eq!(timeout, Some(5));
                assert!(strict);
            }
            _ => panic!("expected send"),
        }
    }

    #[test]
    fn encode_prints_json_or_uri() {
        let payload = build_payload("AAAA");

        let mut out = Vec::new();
        print_payload(&payload, false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"image\":\"data:image/jpeg;base64,AAAA\"}\n");

        let mut out = Vec::new();
        print_payload(&payload, true, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "data:image/jpeg;base64,AAAA\n");
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
