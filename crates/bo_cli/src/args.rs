// crates/bo_cli/src/args.rs
//
// Offline CLI argument surface (types + post-parse validation).
//
// Rules:
// - No networked paths (reject any scheme:// like http/https/file)
// - --data must be a local directory holding the three feeds
// - --out is created on demand; --render picks json and/or html
// - Day codes are parsed up front; unknown-but-well-formed codes pass through

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use clap::{Args as ClapArgs, Parser, Subcommand};

use bo_core::{DayCode, HeroCode, MovieCode, TerritoryKey, TownName};
use bo_io::loader::{COLLECTIONS_FILE, HEROES_FILE, TOWNS_FILE};

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "bo",
    version,
    disable_help_subcommand = true,
    about = "Box-office collections: compare movies across towns, rank top movies per town"
)]
pub struct Args {
    /// Directory holding heroes.json, towns_by_territory.json and collections.json.
    #[arg(long, global = true, env = "BO_DATA_DIR", default_value = "data")]
    pub data: PathBuf,

    /// Only print errors.
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Debug-level diagnostics on stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Compare movies town by town for one day.
    Compare(CompareArgs),
    /// Top movies per town for one day.
    Top(TopArgs),
    /// List heroes, movies, territories and day codes.
    Catalog,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct Output {
    /// Write canonical artifacts and rendered reports here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Renderer(s) to emit (json, html). Default: json.
    #[arg(long, value_parser = ["json", "html"], num_args = 1..=2)]
    pub render: Vec<String>,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct CompareArgs {
    /// Movie code to compare (repeatable).
    #[arg(long = "movie", short = 'm')]
    pub movies: Vec<MovieCode>,

    /// Toggle every movie of a hero (repeatable).
    #[arg(long = "hero")]
    pub heroes: Vec<HeroCode>,

    /// Restrict to one territory (default: all).
    #[arg(long)]
    pub territory: Option<TerritoryKey>,

    /// Town to include (repeatable). Default: every town in scope.
    #[arg(long = "town")]
    pub towns: Vec<TownName>,

    /// Select every town in scope (toggle).
    #[arg(long)]
    pub all_towns: bool,

    #[arg(long, default_value = "DAY1", value_parser = parse_day)]
    pub day: DayCode,

    #[command(flatten)]
    pub output: Output,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct TopArgs {
    #[arg(long, value_parser = parse_day)]
    pub day: Option<DayCode>,

    /// Movies per town (default 10).
    #[arg(long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Only show towns whose name contains this text.
    #[arg(long, default_value = "")]
    pub search: String,

    #[command(flatten)]
    pub output: Output,
}

/// Errors surfaced by argument validation.
/// Keep messages short/stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
    NotADirectory(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            NonLocalPath(p) => write!(f, "path must be local (no scheme): {p}"),
            NotFound(p) => write!(f, "file not found: {p}"),
            NotADirectory(p) => write!(f, "not a directory: {p}"),
        }
    }
}
impl std::error::Error for CliError {}

pub fn parse_day(s: &str) -> Result<DayCode, String> {
    s.parse::<DayCode>().map_err(|e| e.to_string())
}

impl Args {
    pub fn output(&self) -> Option<&Output> {
        match &self.command {
            Command::Compare(c) => Some(&c.output),
            Command::Top(t) => Some(&t.output),
            Command::Catalog => None,
        }
    }
}

impl Output {
    /// Requested renderers, `json` when none were named.
    pub fn renderers(&self) -> Vec<&str> {
        if self.render.is_empty() {
            vec!["json"]
        } else {
            self.render.iter().map(String::as_str).collect()
        }
    }
}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    validate(Args::parse())
}

pub fn validate(mut args: Args) -> Result<Args, CliError> {
    ensure_local_path(&args.data)?;
    if let Some(out) = args.output().and_then(|o| o.out.as_deref()) {
        ensure_local_path(out)?;
    }

    let meta = fs::metadata(&args.data)
        .map_err(|_| CliError::NotFound(format!("--data {}", args.data.display())))?;
    if !meta.is_dir() {
        return Err(CliError::NotADirectory(format!("--data {}", args.data.display())));
    }
    for name in [HEROES_FILE, TOWNS_FILE, COLLECTIONS_FILE] {
        ensure_local_file(&args.data.join(name), "--data")?;
    }

    args.data = normalize_path(&args.data);
    match &mut args.command {
        Command::Compare(c) => c.output.out = c.output.out.take().map(|p| normalize_path(&p)),
        Command::Top(t) => t.output.out = t.output.out.take().map(|p| normalize_path(&p)),
        Command::Catalog => {}
    }
    Ok(args)
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

fn ensure_local_file(p: &Path, label: &'static str) -> Result<(), CliError> {
    let meta = fs::metadata(p).map_err(|_| CliError::NotFound(format!("{label} {}", p.display())))?;
    if !meta.is_file() {
        return Err(CliError::NotFound(format!("{label} {}", p.display())));
    }
    Ok(())
}

/// Absolute path; falls back to CWD-relative when the path does not exist yet.
fn normalize_path(p: &Path) -> PathBuf {
    fs::canonicalize(p).unwrap_or_else(|_| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(p)
        }
    })
}
