//! RecordIO CLI
//!
//! `recordio <pack|cat|stat|scan> [--json] ...`
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

mod commands;
mod format;
mod ops;

use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::{format_error, format_pack, format_scan, format_stats, OutputMode};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let matches = build_cli().get_matches();
    let mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    if let Err(e) = run(&matches, mode) {
        eprintln!("{}", format_error(&e, mode));
        process::exit(1);
    }
}

fn run(matches: &clap::ArgMatches, mode: OutputMode) -> Result<()> {
    match matches.subcommand() {
        Some(("pack", sub)) => {
            let out = PathBuf::from(required(sub, "out")?);
            let inputs: Vec<PathBuf> = sub
                .get_many::<String>("inputs")
                .map(|values| values.map(PathBuf::from).collect())
                .unwrap_or_default();
            let summary = ops::pack(
                &out,
                &inputs,
                sub.get_flag("lines"),
                sub.get_flag("append"),
            )?;
            println!("{}", format_pack(&summary, mode));
        }
        Some(("cat", sub)) => {
            let path = required(sub, "file")?;
            let separator = sub
                .get_one::<String>("separator")
                .map(|raw| ops::unescape_separator(raw))
                .unwrap_or_else(|| b"\n".to_vec());
            let file =
                std::fs::File::open(path).with_context(|| format!("failed to open {}", path))?;
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            ops::cat_records(BufReader::new(file), &mut out, &separator, sub.get_flag("hex"))
                .with_context(|| format!("failed to read {}", path))?;
        }
        Some(("stat", sub)) => {
            let stats = ops::stat(Path::new(required(sub, "file")?))?;
            println!("{}", format_stats(&stats, mode));
        }
        Some(("scan", sub)) => {
            let report = ops::scan(Path::new(required(sub, "file")?))?;
            println!("{}", format_scan(&report, mode));
        }
        Some((name, _)) => bail!("unknown command: {}", name),
        None => bail!("no command given"),
    }
    Ok(())
}

fn required<'a>(matches: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing argument: {}", name))
}
