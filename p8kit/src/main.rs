//! # p8kit
//!
//! Command-line tools for PICO-8 cartridge sources.
//!
//! ## Usage
//!
//! ```bash
//! # Token count for every .lua file in a directory, against the 8192 budget
//! p8kit mygame/
//! p8kit count mygame/ --sort tokens --exclude "*_debug.lua"
//!
//! # Count the code section of a cartridge directly
//! p8kit count mygame.p8
//!
//! # Split a cartridge into one .lua file per tab, and rebuild it
//! p8kit split mygame.p8
//! p8kit join mygame/ rebuilt.p8
//!
//! # First differing line between two cartridges
//! p8kit compare mygame.p8 rebuilt.p8
//!
//! # JSON output, verbose logging
//! p8kit count mygame/ --output json -vv
//! ```

mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use p8kitlib::{
    compare_files, count_directory, count_path, join_to_file, split_file, CountOptions,
    CountResult, FileTokens, FilterConfig, OrderBy, Ordering, TokenBudget, TokenReport,
    TOKEN_LIMIT,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use render::OutputMode;

/// Arguments shared by the root command and `count`
fn count_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("include")
            .short('i')
            .long("include")
            .action(ArgAction::Append)
            .help("Only count files whose name matches this glob pattern"),
    )
    .arg(
        Arg::new("exclude")
            .short('e')
            .long("exclude")
            .action(ArgAction::Append)
            .help("Skip files whose name matches this glob pattern"),
    )
    .arg(
        Arg::new("limit")
            .short('l')
            .long("limit")
            .value_parser(clap::value_parser!(u64).range(1..=i64::MAX as u64))
            .help("Token budget to measure against [default: 8192]"),
    )
    .arg(
        Arg::new("sort")
            .short('s')
            .long("sort")
            .value_parser(["name", "tokens"])
            .default_value("name")
            .help("Order of the per-file breakdown"),
    )
}

/// Build the clap Command structure
fn build_command() -> Command {
    let root = Command::new("p8kit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("PICO-8 cartridge tools: token counting, tab splitting, rebuilding, comparison")
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .global(true)
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Log progress to stderr (-v debug, -vv every lexeme)"),
        )
        .arg(Arg::new("path").help("Directory or file to count (runs `count`)"));

    count_args(root)
        .subcommand(count_args(
            Command::new("count")
                .about("Count PICO-8 tokens (default command)")
                .arg(
                    Arg::new("path")
                        .help("Directory of .lua files, a .lua file, or a .p8 cartridge")
                        .default_value("."),
                ),
        ))
        .subcommand(
            Command::new("split")
                .about("Split a .p8 cartridge into one .lua file per tab")
                .arg(Arg::new("file").required(true).help("The .p8 file to split")),
        )
        .subcommand(
            Command::new("join")
                .about("Rebuild a .p8 cartridge from a split directory")
                .arg(
                    Arg::new("directory")
                        .required(true)
                        .help("Directory containing the .lua files and mappings.txt"),
                )
                .arg(
                    Arg::new("output_file")
                        .required(true)
                        .help("Path of the rebuilt .p8 file"),
                ),
        )
        .subcommand(
            Command::new("compare")
                .about("Find the first difference between two .p8 files")
                .arg(Arg::new("file1").required(true).help("First file"))
                .arg(Arg::new("file2").required(true).help("Second file")),
        )
}

/// Install the stderr log subscriber. `RUST_LOG` overrides `-v`.
fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbosity {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Build filter config from matches
fn build_filter(matches: &ArgMatches) -> anyhow::Result<FilterConfig> {
    let mut filter = FilterConfig::new();

    if let Some(includes) = matches.get_many::<String>("include") {
        for pattern in includes {
            filter = filter.include(pattern)?;
        }
    }

    if let Some(excludes) = matches.get_many::<String>("exclude") {
        let patterns: Vec<&str> = excludes.map(|s| s.as_str()).collect();
        filter = filter.exclude_many(&patterns)?;
    }

    Ok(filter)
}

fn build_options(matches: &ArgMatches) -> anyhow::Result<CountOptions> {
    let limit = matches
        .get_one::<u64>("limit")
        .copied()
        .unwrap_or(TOKEN_LIMIT);

    let ordering = match matches.get_one::<String>("sort") {
        Some(sort) => match sort.parse::<OrderBy>().map_err(anyhow::Error::msg)? {
            OrderBy::Name => Ordering::by_name(),
            OrderBy::Tokens => Ordering::by_tokens(),
        },
        None => Ordering::default(),
    };

    Ok(CountOptions::new()
        .filter(build_filter(matches)?)
        .limit(limit)
        .ordering(ordering))
}

/// Count a directory, or a single file as a one-row result.
fn count(path: &Path, options: &CountOptions) -> anyhow::Result<CountResult> {
    if path.is_file() {
        let tokens = count_path(path)?;
        return Ok(CountResult {
            total: tokens,
            files: vec![FileTokens::new(path.to_path_buf(), tokens)],
            budget: TokenBudget::with_limit(tokens, options.limit),
        });
    }
    Ok(count_directory(path, options)?)
}

fn count_handler(matches: &ArgMatches, path: &str, mode: OutputMode) -> anyhow::Result<String> {
    let options = build_options(matches)?;
    let result = count(Path::new(path), &options)?;
    debug!(path, total = result.total, files = result.files.len(), "count finished");

    let report = TokenReport::from_count(&result, path);
    render::render_report(&report, mode)
}

fn split_handler(matches: &ArgMatches, mode: OutputMode) -> anyhow::Result<String> {
    let file = required(matches, "file")?;
    let output = split_file(file)?;
    render::render_split(&output, mode)
}

fn join_handler(matches: &ArgMatches, mode: OutputMode) -> anyhow::Result<String> {
    let directory = required(matches, "directory")?;
    let output = PathBuf::from(required(matches, "output_file")?);
    join_to_file(directory, &output)?;
    render::render_join(&output, mode)
}

fn compare_handler(matches: &ArgMatches, mode: OutputMode) -> anyhow::Result<String> {
    let comparison = compare_files(required(matches, "file1")?, required(matches, "file2")?)?;
    debug!(identical = comparison.is_identical(), "compare finished");
    render::render_comparison(&comparison, mode)
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> anyhow::Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .ok_or_else(|| anyhow::anyhow!("missing argument: {name}"))
}

/// Matches of the subcommand that ran, or the root. Global flags propagate
/// down, so this is where their values end up.
fn leaf(matches: &ArgMatches) -> &ArgMatches {
    matches.subcommand().map(|(_, sub)| sub).unwrap_or(matches)
}

fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    let mode = OutputMode::from_arg(
        leaf(matches)
            .get_one::<String>("output")
            .map(|s| s.as_str()),
    );

    match matches.subcommand() {
        Some(("count", sub)) => count_handler(sub, required(sub, "path")?, mode),
        Some(("split", sub)) => split_handler(sub, mode),
        Some(("join", sub)) => join_handler(sub, mode),
        Some(("compare", sub)) => compare_handler(sub, mode),
        // No subcommand: treat as count
        _ => {
            let path = matches
                .get_one::<String>("path")
                .map(|s| s.as_str())
                .unwrap_or(".");
            count_handler(matches, path, mode)
        }
    }
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_tracing(leaf(&matches).get_count("verbose"));

    match run(&matches) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
