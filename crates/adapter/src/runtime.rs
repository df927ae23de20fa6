//! Line transport for a session
//!
//! Bridges a line reader and writer (stdin/stdout in the binary) to a
//! [`Session`] running on its own task.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use tile_link_core::{Round, SimpleRng};

use crate::config::SessionConfig;
use crate::protocol::{parse_command, Command};
use crate::session::{Inbound, Session, COMMAND_QUEUE};

/// Run a session over line-delimited JSON
///
/// Reads commands from `reader` until `quit` or end of input, writes one JSON
/// line per event to `writer`, and returns the final round once every event
/// has been written.
pub async fn run_lines<R, W>(
    config: SessionConfig,
    rng: SimpleRng,
    mut reader: R,
    mut writer: W,
) -> anyhow::Result<Round>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (inbound_tx, inbound_rx) = mpsc::channel::<Inbound>(COMMAND_QUEUE);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let session = Session::new(config, event_tx).with_rng(rng);
    let session_task = tokio::spawn(session.run(inbound_rx));

    let read_side = async move {
        let mut raw: Vec<u8> = Vec::with_capacity(256);
        loop {
            raw.clear();
            if reader.read_until(b'\n', &mut raw).await? == 0 {
                break;
            }
            let inbound = match decode_line(&raw) {
                Ok(None) => continue,
                Ok(Some(cmd)) => Inbound::Command(cmd),
                Err(reason) => {
                    warn!(error = %reason, "unparsable command");
                    Inbound::Malformed(reason)
                }
            };
            let quit = inbound == Inbound::Command(Command::Quit);
            if inbound_tx.send(inbound).await.is_err() || quit {
                break;
            }
        }
        debug!("input closed");
        anyhow::Ok(())
    };

    let write_side = async {
        let mut buf: Vec<u8> = Vec::with_capacity(1024);
        while let Some(msg) = event_rx.recv().await {
            buf.clear();
            serde_json::to_writer(&mut buf, &msg)?;
            buf.push(b'\n');
            writer.write_all(&buf).await?;
            writer.flush().await?;
        }
        anyhow::Ok(())
    };

    let (read_res, write_res) = tokio::join!(read_side, write_side);
    let round = session_task.await?;
    read_res?;
    write_res?;
    Ok(round)
}

/// Decode one raw input line; `Ok(None)` for a blank line
fn decode_line(raw: &[u8]) -> Result<Option<Command>, String> {
    let line = std::str::from_utf8(raw).map_err(|e| e.to_string())?;
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    parse_command(line).map(Some).map_err(|e| e.to_string())
}

/// Run a session on the process's stdin and stdout
pub async fn run_stdio(config: SessionConfig) -> anyhow::Result<Round> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    run_lines(config, SimpleRng::from_entropy(), stdin, stdout).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_link_core::RoundConfig;
    use tile_link_types::Phase;

    #[tokio::test(start_paused = true)]
    async fn test_lines_in_events_out() {
        let input = concat!(
            "{\"type\":\"newRound\",\"seed\":3}\n",
            "\n",
            "garbage\n",
            "{\"type\":\"snapshot\"}\n",
            "{\"type\":\"quit\"}\n",
            "{\"type\":\"hint\"}\n",
        );
        let config = SessionConfig {
            round: RoundConfig {
                board_size: 4,
                kinds: 2,
                reserve: 0,
                ..RoundConfig::default()
            },
            ..SessionConfig::default()
        };
        let mut out: Vec<u8> = Vec::new();
        let round = run_lines(config, SimpleRng::new(1), input.as_bytes(), &mut out)
            .await
            .unwrap();
        assert_eq!(round.phase(), Phase::Playing);

        let text = String::from_utf8(out).unwrap();
        let types: Vec<String> = text
            .lines()
            .map(|l| {
                let v: serde_json::Value = serde_json::from_str(l).unwrap();
                v["type"].as_str().unwrap().to_string()
            })
            .collect();
        // Nothing after quit is read.
        assert_eq!(types, vec!["roundStarted", "error", "snapshot"]);
    }

    #[test]
    fn test_decode_line() {
        assert_eq!(decode_line(b"  \r\n"), Ok(None));
        assert_eq!(decode_line(b"{\"type\":\"hint\"}\r\n"), Ok(Some(Command::Hint)));
        assert!(decode_line(b"{\"type\":\"jump\"}\n").is_err());
        assert!(decode_line(&[0xff, 0xfe, b'\n']).is_err());
    }
}
