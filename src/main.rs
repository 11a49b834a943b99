//! findmark: mark every match of a pattern in markdown documents.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use findmark::document::ElementTemplate;
use findmark::pattern::{PatternOptions, RegexPattern};
use findmark::report::{FileReport, Report};
use findmark::{config, find_and_mark, find_and_mark_in_selection, formats, input, Marker};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "findmark")]
#[command(about = "Find and mark text across fragmented documents", long_about = None)]
struct Args {
    /// Text (or regular expression with --regex) to search for
    pattern: String,

    /// Files or directories to search
    #[arg(value_name = "PATH", default_value = ".")]
    paths: Vec<PathBuf>,

    /// Treat the pattern as a regular expression
    #[arg(long, short = 'r')]
    regex: bool,

    /// Ignore letter case
    #[arg(long, short = 'i')]
    ignore_case: bool,

    /// Match whole words only
    #[arg(long, short = 'w')]
    word: bool,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Only mark matches inside this range of text offsets
    #[arg(long, value_name = "START..END", value_parser = parse_within)]
    within: Option<(usize, usize)>,

    /// Print a JSON report instead of the marked documents
    #[arg(long)]
    json: bool,
}

fn parse_within(value: &str) -> Result<(usize, usize), String> {
    let (start, end) = value
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got {value:?}"))?;
    let start = start.trim().parse().map_err(|e| format!("bad start: {e}"))?;
    let end = end.trim().parse().map_err(|e| format!("bad end: {e}"))?;
    Ok((start, end))
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut cfg = config::Config::load();

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }
    let options = PatternOptions {
        regex: args.regex || cfg.regex,
        case_insensitive: args.ignore_case || cfg.case_insensitive,
        whole_word: args.word || cfg.whole_word,
    };
    let pattern = RegexPattern::build(&args.pattern, options)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let marker = Marker::new(ElementTemplate::new(cfg.marker_tag.as_str()))
        .with_index_key(cfg.index_attribute.as_str());

    let documents = input::find_documents(args.paths, &cfg.file_extensions)?;

    if documents.is_empty() {
        eprintln!("No matching files found");
        return Ok(());
    }

    let format = formats::markdown::MarkdownFormat;
    let mut report = Report::default();

    for path in &documents {
        let mut document = input::load_document(path, &format)?;
        let outcome = if let Some((start, end)) = args.within {
            document
                .select_offsets(start, end)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
            find_and_mark_in_selection(&mut document, &pattern, &marker)
        } else {
            let root = document.root();
            find_and_mark(&mut document, root, &pattern, &marker)
        };
        let matches = outcome.map_err(io::Error::other)?;

        report.files.push(FileReport {
            path: path.display().to_string(),
            matches,
            html: document.to_html(),
        });
    }

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(io::Error::other)?;
        println!("{json}");
    } else {
        for file in &report.files {
            println!("<!-- {}: {} match(es) -->", file.path, file.matches);
            print!("{}", file.html);
        }
        eprintln!(
            "{} match(es) in {} file(s)",
            report.total(),
            report.files.len()
        );
    }

    Ok(())
}
