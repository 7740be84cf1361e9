use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use logfan::line::Level;
use logfan::merge::Broker;

/// Merge chronologically ordered log files into one filtered stream.
#[derive(Parser)]
#[command(name = "logfan")]
#[command(about = "Chronological fan-in merge for severity-filtered log files", long_about = None)]
struct Cli {
    /// Minimum severity; lines below it are dropped.
    #[arg(short, long, value_enum, default_value_t = Level::Debug)]
    level: Level,

    /// Log files to merge. Each must itself be chronologically ordered.
    #[arg(required = true, value_name = "FILE")]
    infile: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Open everything up front: an unopenable input is a startup error,
    // before any merge work happens.
    let mut broker = Broker::new().threshold(cli.level);
    for path in &cli.infile {
        let file =
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        broker = broker.add_input(path.display().to_string(), BufReader::new(file));
    }

    // Records carry their own trailing newline; emit them verbatim with no
    // separators of our own.
    let mut out = io::stdout().lock();
    for record in broker.run()? {
        out.write_all(record?.text.as_bytes())?;
    }

    Ok(())
}
