//! Run one research turn against JSON fixture backends and print the
//! result as JSON.
//!
//! Tracing output goes to stderr so stdout stays clean JSON.

use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let Some(args) = parse_args(std::env::args().skip(1))? else {
        print_usage();
        return Ok(());
    };

    let config = args.config.or_else(|| {
        let path = scout::settings::default_config_path();
        path.exists().then_some(path)
    });
    let output = scout::run_fixture_turn(&args.query, &args.fixtures, config.as_deref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "research turn failed");
            anyhow::anyhow!("scout-turn failed: {e}")
        })?;

    tracing::info!(
        request_id = %output.request_id,
        results = output.metrics.result_count,
        "research turn complete"
    );
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

struct Args {
    fixtures: PathBuf,
    config: Option<PathBuf>,
    query: String,
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> anyhow::Result<Option<Args>> {
    let mut fixtures = None;
    let mut config = None;
    let mut words: Vec<String> = Vec::new();

    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--fixtures" => {
                fixtures = Some(PathBuf::from(
                    raw.next()
                        .ok_or_else(|| anyhow::anyhow!("--fixtures requires a path"))?,
                ));
            }
            "--config" => {
                config = Some(PathBuf::from(
                    raw.next()
                        .ok_or_else(|| anyhow::anyhow!("--config requires a path"))?,
                ));
            }
            "help" | "--help" | "-h" => return Ok(None),
            _ => words.push(arg),
        }
    }

    let Some(fixtures) = fixtures else {
        return Ok(None);
    };
    Ok(Some(Args {
        fixtures,
        config,
        query: words.join(" "),
    }))
}

fn print_usage() {
    println!("usage: scout-turn --fixtures <file.json> [--config <file.toml>] <query...>");
}
