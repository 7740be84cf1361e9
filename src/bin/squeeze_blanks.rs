//! Collapse runs of blank lines in a text stream down to one separator.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use logfan::blank::squeeze_blanks_with;

#[derive(Parser)]
#[command(name = "squeeze-blanks")]
#[command(about = "Collapse runs of blank lines down to a single separator", long_about = None)]
struct Cli {
    /// Input file; reads stdin when omitted.
    infile: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let reader: Box<dyn BufRead> = match &cli.infile {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let lines = reader.lines().collect::<io::Result<Vec<_>>>()?;

    let trim = |line: String| line.trim_matches(['\r', '\n', '"', '\'']).to_string();
    for line in squeeze_blanks_with(lines, trim) {
        println!("{line}");
    }

    Ok(())
}
