use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::args::{CliArgs, Command};
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::detail;
use crate::loader::DatasetSource;
use crate::output::{self, OutputFormat, Report};
use crate::query::{Query, SortKey, DEFAULT_LIMIT};
use crate::recommender;
use crate::runner::{self, Options, Runner};

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

fn print_error(message: &str) {
    eprintln!(
        "{}{}{} {}",
        "[".bold().white(),
        "ERR".bold().red(),
        "]".bold().white(),
        message
    );
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("factorsphere={default_level}")));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .try_init();
}

#[derive(Clone, Debug)]
enum Action {
    Browse(View),
    Recommend(AbstractSource),
}

/// Commands answered from the loaded dataset.
#[derive(Clone, Debug)]
enum View {
    Search(Query),
    Top,
    Cited,
    List,
    Details(String),
}

#[derive(Clone, Debug)]
enum AbstractSource {
    Inline(String),
    File(String),
}

#[derive(Clone, Debug)]
struct RunConfig {
    action: Action,
    options: Options,
    output: Option<String>,
    output_format: Option<OutputFormat>,
    verbose: u8,
    no_color: bool,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let dataset = args
        .dataset
        .or(cfg.dataset)
        .unwrap_or_else(|| crate::loader::resolve_dataset_path("/index.html"));
    let dictionary = args.dictionary.or(cfg.dictionary);
    let endpoint = args
        .endpoint
        .or(cfg.endpoint)
        .unwrap_or_else(|| recommender::DEFAULT_ENDPOINT.to_string());
    let timeout = args.timeout.or(cfg.timeout).unwrap_or(10);
    if timeout == 0 {
        return Err("invalid timeout, expected positive integer".to_string());
    }
    let proxy = args.proxy.or(cfg.proxy).filter(|p| !p.trim().is_empty());

    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => Some(
            OutputFormat::parse(&raw)
                .ok_or_else(|| format!("invalid output format '{raw}', expected text or json"))?,
        ),
        None => None,
    };

    let action = match args.command {
        Command::Search(search) => {
            let sort_raw = search.sort.or(cfg.sort).unwrap_or_default();
            let sort = SortKey::parse(&sort_raw).ok_or_else(|| {
                format!("invalid sort '{sort_raw}', expected impact, name, recent or none")
            })?;
            let limit = search.limit.or(cfg.limit).unwrap_or(DEFAULT_LIMIT);
            if limit == 0 {
                return Err("invalid limit, expected positive integer".to_string());
            }
            Action::Browse(View::Search(Query {
                search: search.term.unwrap_or_default(),
                category: search.category.unwrap_or_default(),
                sort,
                limit,
            }))
        }
        Command::Top => Action::Browse(View::Top),
        Command::Cited => Action::Browse(View::Cited),
        Command::List => Action::Browse(View::List),
        Command::Details(details) => {
            let issn = match (details.issn, details.query) {
                (Some(issn), _) => Some(issn.trim().to_string()).filter(|s| !s.is_empty()),
                (None, Some(query)) => detail::issn_from_query(&query),
                (None, None) => None,
            };
            let issn = issn.ok_or_else(|| "no journal ID provided".to_string())?;
            Action::Browse(View::Details(issn))
        }
        Command::Recommend(rec) => match (rec.text, rec.file) {
            (_, Some(file)) => Action::Recommend(AbstractSource::File(config::expand_tilde_string(&file))),
            (text, None) => Action::Recommend(AbstractSource::Inline(text.unwrap_or_default())),
        },
    };

    Ok(RunConfig {
        action,
        options: Options {
            dataset: DatasetSource::parse(&dataset),
            dictionary: dictionary.as_deref().map(DatasetSource::parse),
            endpoint,
            timeout_seconds: timeout,
            proxy,
        },
        output,
        output_format,
        verbose: args.verbose,
        no_color,
    })
}

// stderr draw target stays hidden when stderr is not a terminal
fn loading_spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

async fn recommend_report(runner: &Runner, source: &AbstractSource) -> Result<Report, String> {
    let text = match source {
        AbstractSource::Inline(text) => text.clone(),
        AbstractSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("failed to read abstract file '{path}': {e}"))?,
    };
    let pb = loading_spinner(format!("asking {}", runner.options().endpoint));
    let report = runner.recommend(&text).await;
    pb.finish_and_clear();
    report.map_err(|e| e.to_string())
}

async fn browse_report(runner: &Runner, view: &View) -> Result<Report, String> {
    let pb = loading_spinner(format!("loading {}", runner.options().dataset));
    let loaded = runner.load_dataset().await;
    pb.finish_and_clear();
    let dataset = loaded.map_err(|e| format!("Error loading journal data: {e}"))?;
    debug!(entries = dataset.len(), "dataset ready");

    let report = match view {
        View::Search(query) => runner::search_report(&dataset, query),
        View::Top => runner::top_ranked_report(&dataset, &runner.load_dictionary().await),
        View::Cited => runner::most_cited_report(&dataset, &runner.load_dictionary().await),
        View::List => runner::impact_list_report(&dataset),
        View::Details(issn) => {
            if !validation::looks_like_issn(issn) {
                warn!(%issn, "identifier does not look like an ISSN");
            }
            runner::details_report(&dataset, issn).map_err(|e| e.to_string())?
        }
    };
    Ok(report)
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }

    if run.verbose > 0 {
        format_kv_line("Dataset", &run.options.dataset.describe());
        if let Some(dict) = run.options.dictionary.as_ref() {
            format_kv_line("Dictionary", &dict.describe());
        }
        format_kv_line("Endpoint", &run.options.endpoint);
        format_kv_line("Timeout", &format!("{}s", run.options.timeout_seconds));
        if let Action::Browse(View::Search(q)) = &run.action {
            format_kv_line("Sort", q.sort.label());
            format_kv_line("Limit", &q.limit.to_string());
        }
        println!();
    }

    let runner = Runner::new(run.options.clone()).map_err(|e| e.to_string())?;
    let report = match &run.action {
        Action::Browse(view) => browse_report(&runner, view).await?,
        Action::Recommend(source) => recommend_report(&runner, source).await?,
    };

    match run.output.as_ref() {
        Some(outfile_path) => {
            let format = run
                .output_format
                .or_else(|| output::infer_format_from_path(outfile_path))
                .unwrap_or(OutputFormat::Text);
            let rendered = output::render(&report, format);
            let mut outfile = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(outfile_path)
                .await
                .map_err(|e| format!("failed to open output file: {e}"))?;
            outfile
                .write_all(&rendered)
                .await
                .map_err(|_| "failed to write output file".to_string())?;
        }
        None => match run.output_format {
            Some(OutputFormat::Json) => {
                println!("{}", String::from_utf8_lossy(&output::render_json(&report)));
            }
            _ => output::print_report(&report),
        },
    }

    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => return Err(e.to_string()),
        Err(e) => {
            // --help and --version
            let _ = e.print();
            return Ok(());
        }
    };

    init_logging(args.verbose);

    let cfg = match args.config.clone() {
        Some(path) => config::load_config(&config::expand_tilde(&path), false)?,
        None => match config::default_config_path() {
            Some(path) => {
                if let Err(e) = config::ensure_default_config_file(&path) {
                    warn!(error = %e, "could not create default config");
                }
                config::load_config(&path, true)?
            }
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}

pub fn main_exit_code() -> i32 {
    match run_cli() {
        Ok(()) => 0,
        Err(message) => {
            print_error(message.trim_end());
            1
        }
    }
}
