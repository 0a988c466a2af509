//! Cutoffs CLI entry point.

use cutoffs_debug::{Tracer, TracerConfig};
use cutoffs_engine::{PageSize, SortKey, SortSpec, ViewConfig};
use cutoffs_runtime::command::{parse_event_types, parse_sort_key};
use cutoffs_runtime::{Command, DatasetLoader, Reply, Repl, Session};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    files: Vec<PathBuf>,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
    page_size: Option<PageSize>,
    sort_primary: Option<SortKey>,
    // `Some(None)` empties the secondary role
    sort_secondary: Option<Option<SortKey>>,
    exec: Vec<String>,
    // Debug flags
    trace: bool,
    trace_json: bool,
    trace_buffer: Option<usize>,
    trace_only: Vec<String>,
}

impl CliConfig {
    fn view_config(&self) -> ViewConfig {
        let defaults = ViewConfig::default();
        let mut sort = SortSpec::new();
        if let Some(primary) = self.sort_primary.or(defaults.sort.primary()) {
            sort = sort.with_primary(primary);
        }
        match self.sort_secondary {
            Some(Some(key)) => sort = sort.with_secondary(key),
            Some(None) => {}
            // the default secondary yields to a primary on the same category
            None => {
                if let Some(key) = defaults
                    .sort
                    .secondary()
                    .filter(|k| sort.role_of(k.category).is_none())
                {
                    sort = sort.with_secondary(key);
                }
            }
        }
        ViewConfig::new()
            .with_page_size(self.page_size.unwrap_or(defaults.page_size))
            .with_sort(sort)
    }

    fn tracer_config(&self) -> TracerConfig {
        let mut config = TracerConfig::new().filter_events(self.trace_only.clone());
        if let Some(size) = self.trace_buffer {
            config = config.with_buffer_size(size);
        }
        if self.trace || self.trace_json {
            config = config.enabled().to_stderr();
        }
        if self.trace_json {
            config = config.json();
        }
        config
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn value_of<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--trace" => config.trace = true,
            "--trace-json" => config.trace_json = true,
            "--trace-buffer" => {
                i += 1;
                let value = value_of(&args, i, "--trace-buffer")?;
                match value.parse::<usize>() {
                    Ok(size) if size > 0 => config.trace_buffer = Some(size),
                    _ => return Err(format!("invalid trace buffer size: {value}").into()),
                }
            }
            "--trace-only" => {
                i += 1;
                let value = value_of(&args, i, "--trace-only")?;
                let words: Vec<String> = value.split(',').map(|w| w.trim().to_string()).collect();
                config.trace_only = parse_event_types(&words)?;
            }
            "--rows" => {
                i += 1;
                let value = value_of(&args, i, "--rows")?;
                config.page_size = Some(value.parse()?);
            }
            "--sort-primary" => {
                i += 1;
                let value = value_of(&args, i, "--sort-primary")?;
                config.sort_primary = Some(parse_sort_key(value)?);
            }
            "--sort-secondary" => {
                i += 1;
                let value = value_of(&args, i, "--sort-secondary")?;
                config.sort_secondary = Some(if value.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(parse_sort_key(value)?)
                });
            }
            "-e" | "--exec" => {
                i += 1;
                config.exec.push(value_of(&args, i, "--exec")?.to_string());
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
        i += 1;
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("cutoffs {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if config.files.is_empty() {
        return Err("no dataset files given (see --help)".into());
    }

    let mut loader = DatasetLoader::new();
    for file in &config.files {
        loader.add_file(file)?;
    }
    let dataset = loader.finish()?;
    for ignored in &dataset.ignored_columns {
        eprintln!(
            "\x1b[33mIgnoring unknown column {:?} in {}\x1b[0m",
            ignored.column, ignored.source
        );
    }

    let tracer = Tracer::new(config.tracer_config());
    let mut session = Session::new(dataset, &config.view_config(), tracer);

    for line in &config.exec {
        let command: Command = line.parse()?;
        match session.execute(&command)? {
            Reply::Output(text) => print!("{text}"),
            Reply::Quit => return Ok(()),
        }
    }

    if config.batch_mode {
        if config.exec.is_empty() {
            print!("{}", session.render());
        }
        return Ok(());
    }

    let mut repl = Repl::new(session)?;
    if !config.exec.is_empty() {
        repl = repl.without_banner();
    }
    repl.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mcutoffs\x1b[0m - Filter, sort and page admission cutoff tables

\x1b[1mUSAGE:\x1b[0m
    cutoffs [OPTIONS] FILES...

\x1b[1mARGUMENTS:\x1b[0m
    FILES...    JSON datasets to load (records from all files are combined)

\x1b[1mOPTIONS:\x1b[0m
    -h, --help                   Print help information
    -V, --version                Print version information
    -b, --batch                  Run --exec commands (or show page 1) and exit
    -e, --exec CMD               Run a shell command after loading (repeatable)
    --rows N                     Page size: 10, 20, 50 or 100 (default 20)
    --sort-primary CAT[:DIR]     Primary sort (default OC:desc)
    --sort-secondary CAT[:DIR]   Secondary sort, or `none` (default BC:desc)

\x1b[1mDEBUG OPTIONS:\x1b[0m
    --trace                      Trace view actions to stderr
    --trace-json                 Trace as JSON lines
    --trace-buffer N             Trace records to keep (default 10000)
    --trace-only EVENT[,EVENT]   Record only these event types

\x1b[1mEXAMPLES:\x1b[0m
    cutoffs cutoffs.json                         Load and start the shell
    cutoffs -b cutoffs.json                      Print the first page and exit
    cutoffs -b -e \"filter branch-code CS\" -e show cutoffs.json
    cutoffs --sort-primary MBC:asc --sort-secondary none cutoffs.json

\x1b[1mSHELL COMMANDS:\x1b[0m
    show, filter, unfilter, clear, search, values, filters,
    sort, flip, dir, page, next, prev, rows, trace, help, quit
    Ctrl+D               Exit
    Ctrl+C               Cancel current input"
    );
}
