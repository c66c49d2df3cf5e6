// crates/bo_cli/src/main.rs
//
// Exit codes, error mapping, and the three run paths:
//   compare → selection → comparison document → (artifacts | stdout)
//   top     → ranking document → (artifacts | stdout)
//   catalog → heroes, territories, day vocabularies as JSON on stdout

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    /// Bad arguments or a request the engine refuses (no movies, bad limit, ...)
    pub const VALIDATION: i32 = 2;
    /// Data source unavailable, malformed feeds, artifact write failures
    pub const IO: i32 = 4;
    pub const RENDER: i32 = 5;
}

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use serde_json::json;

use args::{parse_and_validate as parse_cli, Args, Command, CompareArgs, Output, TopArgs};

use bo_core::day::{COMPARISON_DAYS, RANKING_DAYS};
use bo_core::format::territory_label;
use bo_core::{Catalog, TerritoryScope, ValidationError};
use bo_io::{canonical_json, loader, FileSource, IoError};
use bo_pipeline::top::OFFERED_LIMITS;
use bo_pipeline::{
    build_run_record, load_catalog, run_compare, run_top_movies, Action, ArtifactRef, ComparisonDoc,
    EngineMeta, PipelineError, RankingDoc, SelectionState, TopMoviesRequest,
};
use bo_report::{build_comparison_report, build_ranking_report, ReportError};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    Validation(String),
    /// Feed fetch failed or the catalog is empty. Retryable.
    DataUnavailable(String),
    Io(String),
    Render(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "{m}"),
            MainError::DataUnavailable(m) => write!(f, "{m}"),
            MainError::Io(m) => write!(f, "{m}"),
            MainError::Render(m) => write!(f, "render: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("bo: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };
    init_logging(&args);

    let rc = match run(&args) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("bo: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

fn init_logging(args: &Args) {
    let level = if args.quiet {
        "error"
    } else if args.verbose {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("BO_LOG", level))
        .format_timestamp(None)
        .init();
}

fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::DataUnavailable(_) | MainError::Io(_) => IO,
        MainError::Render(_) => RENDER,
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::Validation(v) => MainError::Validation(v.to_string()),
        PipelineError::DataUnavailable(m) => MainError::DataUnavailable(format!("data unavailable: {m}")),
        PipelineError::Io(m) => MainError::Io(m),
        PipelineError::Build(m) => MainError::Io(format!("build: {m}")),
    }
}

fn map_io_err(e: IoError) -> MainError {
    MainError::Io(e.to_string())
}

fn map_report_err(e: ReportError) -> MainError {
    match e {
        ReportError::Template(m) => MainError::Render(format!("template: {m}")),
        ReportError::Serialize(m) => MainError::Render(format!("serialize: {m}")),
    }
}

fn run(args: &Args) -> Result<(), MainError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| MainError::Io(format!("runtime: {e}")))?;
    rt.block_on(run_async(args))
}

async fn run_async(args: &Args) -> Result<(), MainError> {
    let source = FileSource::new(&args.data);
    let catalog = load_catalog(&source).await.map_err(map_pipeline_err)?;

    match &args.command {
        Command::Catalog => print_catalog(&catalog),
        Command::Compare(c) => {
            let doc = compare(&source, &catalog, c).await?;
            match &c.output.out {
                Some(dir) => {
                    let bytes = canonical_json::to_canonical_bytes(&doc).map_err(map_io_err)?;
                    write_run(args, dir, "compare", "comparison.json", &doc.id, &bytes).await?;
                    render_comparison(&doc, &c.output, Some(dir))?;
                    status(args, dir);
                    Ok(())
                }
                None => render_comparison(&doc, &c.output, None),
            }
        }
        Command::Top(t) => {
            let doc = top(&source, &catalog, t).await?;
            match &t.output.out {
                Some(dir) => {
                    let bytes = canonical_json::to_canonical_bytes(&doc).map_err(map_io_err)?;
                    write_run(args, dir, "top", "ranking.json", &doc.id, &bytes).await?;
                    render_ranking(&doc, t, Some(dir))?;
                    status(args, dir);
                    Ok(())
                }
                None => render_ranking(&doc, t, None),
            }
        }
    }
}

fn status(args: &Args, dir: &Path) {
    if !args.quiet {
        eprintln!("bo: artifacts written to {}", dir.to_string_lossy());
    }
}

/// Replays the flags as selection actions, the same way the form would.
async fn compare(source: &FileSource, catalog: &Catalog, c: &CompareArgs) -> Result<ComparisonDoc, MainError> {
    let mut state = SelectionState::new().apply(catalog, Action::SetDayCode(c.day.clone()));

    if let Some(key) = &c.territory {
        if catalog.territories.towns_of(key).is_empty() {
            return Err(MainError::Validation(format!("unknown territory: {key}")));
        }
        state = state.apply(catalog, Action::SetTerritory(TerritoryScope::Territory(key.clone())));
    }
    for hero in &c.heroes {
        if catalog.hero(hero).is_none() {
            return Err(MainError::Validation(format!("unknown hero: {hero}")));
        }
        state = state.apply(catalog, Action::ToggleHeroGroup(hero.clone()));
    }
    for movie in &c.movies {
        if !catalog.knows_movie(movie) {
            return Err(map_pipeline_err(ValidationError::UnknownMovie(movie.clone()).into()));
        }
        state = state.apply(catalog, Action::ToggleMovie(movie.clone()));
    }
    if c.all_towns {
        state = state.apply(catalog, Action::SelectAllTowns);
    }
    for town in &c.towns {
        state = state.apply(catalog, Action::ToggleTown(town.clone()));
    }

    let req = state
        .build_request()
        .map_err(|e| map_pipeline_err(e.into()))?;
    log::debug!("compare request: {} movies, towns {:?}", req.movie_codes.len(), req.towns);
    run_compare(source, catalog, &req).await.map_err(map_pipeline_err)
}

async fn top(source: &FileSource, catalog: &Catalog, t: &TopArgs) -> Result<RankingDoc, MainError> {
    let req = TopMoviesRequest::new(t.day.clone(), t.limit).map_err(map_pipeline_err)?;
    if !OFFERED_LIMITS.contains(&req.limit) {
        log::info!("limit {} is outside the offered set {:?}", req.limit, OFFERED_LIMITS);
    }
    run_top_movies(source, catalog, &req).await.map_err(map_pipeline_err)
}

fn print_catalog(catalog: &Catalog) -> Result<(), MainError> {
    let territories: Vec<_> = catalog
        .territories
        .iter()
        .map(|(key, towns)| json!({ "key": key, "label": territory_label(key), "towns": towns }))
        .collect();
    let days = |ds: &[bo_core::DayCode]| ds.iter().map(|d| json!({ "code": d, "label": d.label() })).collect::<Vec<_>>();

    let v = json!({
        "heroes": catalog.heroes,
        "territories": territories,
        "comparison_days": days(&COMPARISON_DAYS[..]),
        "ranking_days": days(&RANKING_DAYS[..]),
        "offered_limits": OFFERED_LIMITS,
    });
    let s = serde_json::to_string_pretty(&v).map_err(|e| MainError::Render(e.to_string()))?;
    println!("{s}");
    Ok(())
}

/* -------------------------------- Artifacts ------------------------------- */

fn engine_meta() -> EngineMeta {
    EngineMeta {
        vendor: option_env!("BO_ENGINE_VENDOR").unwrap_or("bo").to_string(),
        name: option_env!("BO_ENGINE_NAME")
            .unwrap_or(env!("CARGO_PKG_NAME"))
            .to_string(),
        version: option_env!("BO_ENGINE_VERSION")
            .unwrap_or(env!("CARGO_PKG_VERSION"))
            .to_string(),
        build: option_env!("BO_ENGINE_BUILD").unwrap_or("dev").to_string(),
    }
}

/// Writes the result document and its run record into `out_dir`.
async fn write_run(
    args: &Args,
    out_dir: &Path,
    command: &str,
    file_name: &str,
    id: &str,
    canonical: &[u8],
) -> Result<(), MainError> {
    fs::create_dir_all(out_dir)
        .map_err(|e| MainError::Io(format!("mkdir {}: {e}", out_dir.to_string_lossy())))?;

    let res_path = out_dir.join(file_name);
    write_bytes(&res_path, canonical)?;

    let mut inputs = Vec::new();
    for path in FileSource::new(&args.data).feed_paths() {
        let bytes = loader::read_feed_bytes(&path).await.map_err(map_io_err)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        inputs.push(ArtifactRef::input(name, &bytes));
    }
    let outputs = vec![ArtifactRef::output(file_name, id, canonical)];

    let record = build_run_record(engine_meta(), command, inputs, outputs).map_err(map_pipeline_err)?;
    canonical_json::write_canonical_file(&out_dir.join("run_record.json"), &record)
        .map_err(|e| MainError::Io(format!("write run_record.json: {e}")))?;
    log::info!("run record {}", record.id);
    Ok(())
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), MainError> {
    fs::write(path, bytes).map_err(|e| MainError::Io(format!("write {}: {e}", path.to_string_lossy())))
}

/// Prints to stdout when `out_dir` is `None`, else writes `report.<fmt>`.
fn emit(fmt: &str, text: String, out_dir: Option<&Path>) -> Result<(), MainError> {
    match out_dir {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(dir) => write_bytes(&dir.join(format!("report.{fmt}")), text.as_bytes()),
    }
}

/* -------------------------------- Rendering ------------------------------- */

fn render_comparison(doc: &ComparisonDoc, output: &Output, out_dir: Option<&Path>) -> Result<(), MainError> {
    let model = build_comparison_report(doc);
    for fmt in output.renderers() {
        let text = match fmt {
            "json" => render_json_report(&model)?,
            "html" => comparison_html(&model)?,
            other => return Err(MainError::Render(format!("unknown renderer: {other}"))),
        };
        emit(fmt, text, out_dir)?;
    }
    Ok(())
}

fn render_ranking(doc: &RankingDoc, t: &TopArgs, out_dir: Option<&Path>) -> Result<(), MainError> {
    let model = build_ranking_report(doc, &t.search);
    for fmt in t.output.renderers() {
        let text = match fmt {
            "json" => render_json_report(&model)?,
            "html" => ranking_html(&model)?,
            other => return Err(MainError::Render(format!("unknown renderer: {other}"))),
        };
        emit(fmt, text, out_dir)?;
    }
    Ok(())
}

#[cfg(feature = "report-json")]
fn render_json_report<M: serde::Serialize>(model: &M) -> Result<String, MainError> {
    bo_report::render_json(model).map_err(map_report_err)
}

#[cfg(not(feature = "report-json"))]
fn render_json_report<M>(_model: &M) -> Result<String, MainError> {
    Err(MainError::Render(
        "json renderer not enabled (build with feature `report-json`)".into(),
    ))
}

#[cfg(feature = "report-html")]
fn comparison_html(model: &bo_report::ComparisonReport) -> Result<String, MainError> {
    bo_report::render_comparison_html(model).map_err(map_report_err)
}

#[cfg(feature = "report-html")]
fn ranking_html(model: &bo_report::RankingReport) -> Result<String, MainError> {
    bo_report::render_ranking_html(model).map_err(map_report_err)
}

#[cfg(not(feature = "report-html"))]
fn comparison_html(_model: &bo_report::ComparisonReport) -> Result<String, MainError> {
    Err(MainError::Render(
        "html renderer not enabled (build with feature `report-html`)".into(),
    ))
}

#[cfg(not(feature = "report-html"))]
fn ranking_html(_model: &bo_report::RankingReport) -> Result<String, MainError> {
    Err(MainError::Render(
        "html renderer not enabled (build with feature `report-html`)".into(),
    ))
}
