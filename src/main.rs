// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use atomflow::backends::local::LocalAtomFactory;
use atomflow::config::{load_and_validate_config, EngineOptions};
use atomflow::engine::{Engine, Graph, RunReport};

const USAGE: &str = "Usage: atomflow <graph.(yaml|toml)> [--realtime] [--json]";

struct Args {
    config: String,
    realtime: bool,
    json: bool,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Args> {
    let mut config = None;
    let mut realtime = false;
    let mut json = false;

    for arg in args {
        match arg.as_str() {
            "--realtime" => realtime = true,
            "--json" => json = true,
            flag if flag.starts_with("--") => bail!("unknown option '{}'\n{}", flag, USAGE),
            _ if config.is_some() => bail!("only one graph config may be given\n{}", USAGE),
            _ => config = Some(arg),
        }
    }

    let Some(config) = config else {
        bail!("{}", USAGE);
    };
    Ok(Args {
        config,
        realtime,
        json,
    })
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run(env::args().skip(1)).await {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: impl Iterator<Item = String>) -> Result<RunReport> {
    let args = parse_args(args)?;

    let config = load_and_validate_config(&args.config)
        .with_context(|| format!("failed to load graph config {}", args.config))?;
    let registry = LocalAtomFactory::builtin_registry()?;
    let graph = Graph::build(&config, &registry).context("failed to wire graph")?;
    let mut engine = Engine::new(graph);

    let report = if args.realtime {
        run_realtime(&mut engine, &config.engine).await?
    } else {
        engine.run()?
    };

    print_report(&report, args.json)?;
    Ok(report)
}

/// Paces ticks at the configured rate until the graph finishes, `max_ticks`
/// runs out or Ctrl-C arrives.
async fn run_realtime(engine: &mut Engine, options: &EngineOptions) -> Result<RunReport> {
    let cancellation_token = CancellationToken::new();
    let ctrl_c_token = cancellation_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_token.cancel();
        }
    });

    engine.start()?;
    let dt = options.tick_dt();
    let mut interval = tokio::time::interval(Duration::from_secs_f64(dt));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    while engine.ticks() < options.max_ticks {
        tokio::select! {
            _ = cancellation_token.cancelled() => {
                tracing::info!(ticks = engine.ticks(), "interrupted, stopping engine");
                break;
            }
            _ = interval.tick() => {
                if !engine.tick(dt)? {
                    break;
                }
            }
        }
    }

    engine.stop();
    Ok(engine.report())
}

fn print_report(report: &RunReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let outcome = match &report.failure {
        Some(failure) => format!("❌ {}", failure),
        None if report.finished => "✅ finished".to_string(),
        None => "⏹️ stopped at tick limit".to_string(),
    };
    println!("{}", outcome);
    println!(
        "   {} ticks, {:.3}s transport time",
        report.ticks, report.transport_secs
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_args() {
        let parsed = parse_args(args(&["graph.yaml", "--json"])).unwrap();
        assert_eq!(parsed.config, "graph.yaml");
        assert!(parsed.json);
        assert!(!parsed.realtime);

        let parsed = parse_args(args(&["--realtime", "graph.toml"])).unwrap();
        assert!(parsed.realtime);
        assert_eq!(parsed.config, "graph.toml");
    }

    #[test]
    fn test_parse_args_rejects_bad_input() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["a.yaml", "b.yaml"])).is_err());
        assert!(parse_args(args(&["a.yaml", "--fast"])).is_err());
    }
}
