//! Command-line front end for dirrank.
//!
//! A thin layer over [`dirrank::Database`]: it parses arguments, loads the
//! configuration, and prints results. Ranked paths go to stdout, one per line, so
//! the output can be fed straight to `cd`; diagnostics go to stderr.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dirrank::infrastructure::expand_tilde;
use dirrank::observability::init_tracing;
use dirrank::storage::calculate_score;
use dirrank::{Config, Database, Populator, Result};

#[derive(Parser)]
#[command(name = "dirrank")]
#[command(about = "Jump to frequently and recently used directories")]
#[command(version)]
struct Cli {
    #[clap(long, short = 'c', global = true, env = "DIRRANK_CONFIG", help = "Path to config file")]
    config: Option<PathBuf>,

    #[clap(long, global = true, env = "DIRRANK_DATA_FILE", help = "Path to the database file")]
    data_file: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[clap(about = "Record visits to one or more directories")]
    Add {
        #[clap(required = true)]
        paths: Vec<String>,
    },

    #[clap(about = "List matching directories, best first")]
    Query {
        terms: Vec<String>,

        #[clap(long, short, help = "Show the frecency of each result")]
        score: bool,

        #[clap(long, short, help = "Print only the best match")]
        first: bool,
    },

    #[clap(about = "Reinforce a directory chosen from query results")]
    Select { path: String },

    #[clap(about = "Add every directory below a root")]
    Populate {
        root: String,

        #[clap(long, help = "Only add paths matching this regex")]
        keep: Option<String>,

        #[clap(long, help = "Skip paths matching this regex")]
        discard: Option<String>,

        #[clap(long, help = "Maximum depth below the root")]
        max_depth: Option<usize>,
    },

    #[clap(about = "Search and select interactively")]
    Interactive,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(data_file) = cli.data_file {
        config.data_file = data_file;
    }
    init_tracing(&config);

    let mut db = Database::open(&config)?;

    match cli.command {
        Command::Add { paths } => {
            for path in paths {
                db.add(expand_tilde(&path))?;
            }
        }
        Command::Query { terms, score, first } => {
            let results = db.search(&terms.join(" "))?;
            if results.is_empty() {
                return Ok(ExitCode::FAILURE);
            }

            let shown = if first { &results[..1] } else { &results[..] };
            let now = db.now();
            let mut out = io::stdout().lock();
            for entry in shown {
                if score {
                    writeln!(out, "{:>8.1} {}", calculate_score(entry, now), entry.path)?;
                } else {
                    writeln!(out, "{}", entry.path)?;
                }
            }
        }
        Command::Select { path } => {
            if !db.select(expand_tilde(&path))? {
                eprintln!("not tracked: {path}");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Populate {
            root,
            keep,
            discard,
            max_depth,
        } => {
            let mut populator = Populator::new();
            if let Some(pattern) = keep {
                populator = populator.keep(&pattern)?;
            }
            if let Some(pattern) = discard {
                populator = populator.discard(&pattern)?;
            }
            if let Some(depth) = max_depth {
                populator = populator.max_depth(depth);
            }

            let added = populator.populate(&mut db, expand_tilde(&root))?;
            eprintln!("added {added} directories");
        }
        Command::Interactive => interactive(&mut db)?,
    }

    Ok(ExitCode::SUCCESS)
}

/// Query/select loop on stdin. `exit` or end of input quits.
fn interactive(db: &mut Database) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        prompt("\nquery (or 'exit'): ")?;
        let Some(query) = lines.next().transpose()? else {
            return Ok(());
        };
        let query = query.trim();
        if query.eq_ignore_ascii_case("exit") {
            return Ok(());
        }

        let results = db.search(query)?;
        if results.is_empty() {
            println!("No matches found.");
            continue;
        }

        let now = db.now();
        for (i, entry) in results.iter().enumerate() {
            println!(
                "{:>3}. {} (frecency {:.1}, {})",
                i + 1,
                entry.path,
                calculate_score(entry, now),
                entry.time_ago(now)
            );
        }

        prompt("select a number (Enter to skip): ")?;
        let Some(choice) = lines.next().transpose()? else {
            return Ok(());
        };

        match choice.trim().parse::<usize>() {
            Ok(n) if (1..=results.len()).contains(&n) => {
                let path = &results[n - 1].path;
                db.select(path)?;
                println!("selected {path}");
            }
            Ok(_) => println!("Invalid selection."),
            Err(_) => println!("No selection made."),
        }
    }
}

fn prompt(text: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write!(out, "{text}")?;
    out.flush()
}
