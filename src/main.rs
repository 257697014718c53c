use anyhow::{bail, Context, Result};
use std::fs;
use std::io::Read;
use tokio_util::sync::CancellationToken;

use ossense::audio::CueEngineHandle;
use ossense::{overlay, render_report, theme_for, CapabilityReport, Detector};

const USAGE: &str = "usage: ossense <report.json | -> [--json] [--audio] [--demo]";

fn read_report(path: &str) -> Result<CapabilityReport> {
    let raw = if path == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read report from stdin")?;
        buffer
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read report from {path}"))?
    };
    serde_json::from_str(&raw).context("invalid capability report")
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let mut path: Option<String> = None;
    let mut as_json = false;
    let mut audio = false;
    let mut demo = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => as_json = true,
            "--audio" => audio = true,
            "--demo" => demo = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                return Ok(());
            }
            other if path.is_none() => path = Some(other.to_string()),
            other => bail!("unexpected argument {other}\n{USAGE}"),
        }
    }
    let Some(path) = path else {
        bail!("missing capability report\n{USAGE}");
    };

    let report = read_report(&path)?;
    let detector = Detector::new();

    // A failed run is one log entry, never a crash.
    let result = match detector.run(&report).await {
        Ok(result) => result,
        Err(err) => {
            log::error!("detection failed: {err:#}");
            return Ok(());
        }
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_report(&result));
    }

    if audio || demo {
        let engine = CueEngineHandle::new();
        if let Err(err) = engine.play_for_os(result.top_category) {
            log::warn!("audio cue unavailable: {err:#}");
        }

        if demo {
            let cancel = CancellationToken::new();
            let cycle = tokio::spawn(overlay::run_cycle(
                theme_for(result.top_category),
                |line: &str| println!("  ~ {line}"),
                cancel.clone(),
            ));
            println!("\n(demo running, Ctrl-C to stop)");
            tokio::signal::ctrl_c().await?;
            cancel.cancel();
            let _ = cycle.await;
        } else {
            println!("\n(cue playing, Ctrl-C to stop)");
            tokio::signal::ctrl_c().await?;
        }
        engine.stop()?;
    }

    Ok(())
}
