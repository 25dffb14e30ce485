use anyhow::Result;
use boolsearch_core::corpus::index_directory;
use boolsearch_core::{InvertedIndex, QueryResult};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod spamfilter;

const NO_RESULTS: &str = "The query yielded zero results.";

#[derive(Parser)]
#[command(name = "boolsearch")]
#[command(about = "Boolean search with TF-IDF ranking over a directory of text files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a directory and answer boolean queries (AND, OR, ANDNOT, parentheses)
    Query {
        /// Directory whose files are indexed
        #[arg(long)]
        corpus: PathBuf,
        /// Query to run; repeatable. Reads queries from stdin when absent
        #[arg(long, short)]
        query: Vec<String>,
        /// Maximum results printed per query
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Print results as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Flag mails containing words common to all spam and absent from all non-spam
    Spamfilter {
        spam_dir: PathBuf,
        nonspam_dir: PathBuf,
        mail_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Query { corpus, query, limit, json } => {
            let index = index_directory(&corpus)?;
            let out = io::stdout();
            if query.is_empty() {
                interactive(&index, limit, json)
            } else {
                for q in &query {
                    run_query(&index, q, limit, json, &mut out.lock())?;
                }
                Ok(())
            }
        }
        Commands::Spamfilter { spam_dir, nonspam_dir, mail_dir } => {
            let verdicts = spamfilter::run(&spam_dir, &nonspam_dir, &mail_dir)?;
            let mut out = io::stdout().lock();
            for v in verdicts {
                writeln!(out, "{v}")?;
            }
            Ok(())
        }
    }
}

fn interactive(index: &InvertedIndex, limit: usize, json: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    write!(out, "> ")?;
    out.flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            run_query(index, &line, limit, json, &mut out)?;
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

fn run_query<W: Write>(index: &InvertedIndex, query: &str, limit: usize, json: bool, out: &mut W) -> Result<()> {
    match index.query_str(query) {
        Ok(results) => write_results(&results, limit, json, out),
        Err(err) => {
            tracing::debug!(query, kind = err.kind(), "query rejected");
            writeln!(out, "error: {err}")?;
            Ok(())
        }
    }
}

fn write_results<W: Write>(results: &[QueryResult], limit: usize, json: bool, out: &mut W) -> Result<()> {
    let shown = &results[..results.len().min(limit)];
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(shown)?)?;
        return Ok(());
    }
    if results.is_empty() {
        writeln!(out, "{NO_RESULTS}")?;
        return Ok(());
    }
    for r in shown {
        writeln!(out, "{:.6}  {}", r.score, r.path)?;
    }
    if results.len() > shown.len() {
        writeln!(out, "... {} more", results.len() - shown.len())?;
    }
    Ok(())
}
