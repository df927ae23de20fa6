//! Tile Link runner (default binary).
//!
//! - `tile-link` / `tile-link serve`: JSON-lines session on stdin/stdout
//! - `tile-link autoplay [--seed N]`: play one round headlessly and print the report
//!
//! Logs go to stderr; stdout carries protocol lines only.

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tile_link::adapter::{run_stdio, SessionConfig};
use tile_link::core::{Round, SimpleRng};
use tile_link::engine::Autoplayer;

enum Mode {
    Serve,
    Autoplay { seed: Option<u64> },
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Mode> {
    let mode = match args.next().as_deref() {
        None | Some("serve") => Mode::Serve,
        Some("autoplay") => {
            let mut seed = None;
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--seed" => {
                        let value = args.next().context("--seed needs a value")?;
                        seed = Some(value.parse().context("--seed must be an integer")?);
                    }
                    other => bail!("unknown argument: {}", other),
                }
            }
            Mode::Autoplay { seed }
        }
        Some(other) => bail!("unknown command: {} (expected serve or autoplay)", other),
    };
    Ok(mode)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = SessionConfig::from_env();
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("{} ({})", e.message(), e.code()))?;

    match parse_args(std::env::args().skip(1))? {
        Mode::Serve => {
            info!("serving on stdin/stdout");
            let round = run_stdio(config).await?;
            info!(round_id = round.round_id(), score = round.score(), "session finished");
        }
        Mode::Autoplay { seed } => {
            let mut rng = match seed {
                Some(seed) => SimpleRng::new(seed),
                None => SimpleRng::from_entropy(),
            };
            let mut round = Round::new(config.round);
            round.start(&mut rng);
            let report = Autoplayer::new().play(&mut round);
            let result = report.result.map(|r| r.as_str()).unwrap_or("unfinished");
            println!(
                "seed={} matches={} score={} result={} remaining={}s",
                rng.seed(),
                report.matches,
                report.score,
                result,
                report.remaining_secs
            );
        }
    }
    Ok(())
}
