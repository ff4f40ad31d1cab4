use std::{env, fmt::Display, path::PathBuf, process};

use anyhow::{Context, Result};
use interop_metrics_parser::{
    ErrorMetricsReader, MetricsCollection, TileMetricsReader, metadata::AdapterSequence,
};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "<interop-dir> [error|tile]";

fn print_summary<T: Display>(name: &str, metrics: &MetricsCollection<T>) {
    println!("{}", metrics.header());
    if !metrics.adapters().is_empty() {
        let adapters: Vec<String> = metrics
            .adapters()
            .iter()
            .map(AdapterSequence::to_string)
            .collect();
        println!("adapters: {}", adapters.join(", "));
    }
    for (i, m) in metrics.iter().take(3).enumerate() {
        println!("record {i}: {m}");
    }
    println!("total {name} records = {}", metrics.len());
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args_os();
    let prog = args.next().unwrap_or_default(); // program name

    let dir: PathBuf = match args.next() {
        Some(p) => p.into(),
        None => {
            eprintln!("usage: {} {USAGE}", prog.to_string_lossy());
            process::exit(2);
        }
    };
    let kind = args
        .next()
        .map(|k| k.to_string_lossy().into_owned())
        .unwrap_or_else(|| "error".to_string());

    if args.next().is_some() {
        eprintln!(
            "error: too many arguments\nusage: {} {USAGE}",
            prog.to_string_lossy()
        );
        process::exit(2);
    }

    match kind.as_str() {
        "error" => {
            let reader = ErrorMetricsReader::open(&dir)?;
            let metrics = reader
                .read()
                .with_context(|| format!("{} metrics are unusable", reader.name()))?;
            print_summary(reader.name(), &metrics);
        }
        "tile" => {
            let reader = TileMetricsReader::open(&dir)?;
            let metrics = reader
                .read()
                .with_context(|| format!("{} metrics are unusable", reader.name()))?;
            print_summary(reader.name(), &metrics);
        }
        other => {
            eprintln!(
                "error: unknown metrics kind {other:?}\nusage: {} {USAGE}",
                prog.to_string_lossy()
            );
            process::exit(2);
        }
    }

    Ok(())
}
