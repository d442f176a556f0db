//! Scribe entrypoint.
//!
//! Headless harness over the editing engine: loads configuration, opens one
//! document into a registered model, optionally types text at its end through
//! the dispatcher, runs one background lex pass and prints a summary.
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::{Command, dispatch};
use core_config::{Config, RowEndingSetting, load_from};
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_lexer::LexService;
use core_model::{
    LexApplyOutcome, ModelId, ModelOptions, ModelRegistry, ResourceMetadata, TextModel, View,
    ViewId,
};
use core_text::RowEndingKind;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::SystemTime;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

const DOCUMENT_ID: ModelId = ModelId(1);

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "scribe", version, about = "Scribe text engine")]
struct Args {
    /// Optional path to open (UTF-8 text). If omitted an empty untitled document is used.
    pub path: Option<PathBuf>,
    /// Optional configuration file path (overrides discovery of `scribe.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Text typed at the end of the document before lexing.
    #[arg(long = "append")]
    pub append: Option<String>,
}

struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self { log_guard: None }
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join("scribe.log");
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, "scribe.log");
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global tracing subscriber already installed; drop guard so writer shuts down.
            }
        }

        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

fn row_ending_kind(setting: RowEndingSetting) -> RowEndingKind {
    match setting {
        RowEndingSetting::Lf => RowEndingKind::LineFeed,
        RowEndingSetting::Crlf => RowEndingKind::CarriageReturnLineFeed,
        RowEndingSetting::Cr => RowEndingKind::CarriageReturn,
    }
}

fn model_options(config: &Config) -> ModelOptions {
    ModelOptions {
        max_edit_blocks: config.max_edit_blocks(),
        default_row_ending: row_ending_kind(config.row_ending()),
    }
}

fn open_document(path: Option<&Path>, options: ModelOptions) -> Result<TextModel> {
    let Some(path) = path else {
        return Ok(TextModel::with_options(
            DOCUMENT_ID,
            ResourceMetadata::new("untitled", SystemTime::now()),
            "",
            options,
        ));
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let modified = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or_else(|e| {
            warn!(target: "io", ?e, "modified_time_unavailable");
            SystemTime::now()
        });
    debug!(target: "io", file = %path.display(), size_bytes = content.len(), "file_read_ok");
    Ok(TextModel::with_options(
        DOCUMENT_ID,
        ResourceMetadata::new(path.display().to_string(), modified),
        &content,
        options,
    ))
}

/// Type `text` at the end of the document through the dispatcher.
fn append_text(model: &mut TextModel, text: &str) -> Result<()> {
    let mut view = View::new(ViewId(0), model.id());
    let end = KeyEvent::new(KeyCode::End, KeyModifiers::CTRL);
    dispatch(Command::Key(end), model, &mut view)?;
    let result = dispatch(Command::InsertText(text.to_string()), model, &mut view)?;
    debug!(target: "runtime", cells = text.chars().count(), changed = result.content_changed, "append");
    Ok(())
}

async fn lex_once(registry: &mut ModelRegistry, id: ModelId) -> Result<LexApplyOutcome> {
    let mut service = LexService::new(Handle::current());
    service.submit(registry.get(id)?.lex_request());
    let completion = service
        .next_completion()
        .await
        .context("lex service closed before completing")?;
    Ok(registry.apply_lex_completion(completion)?)
}

/// What the harness prints after the lex pass.
#[derive(Debug)]
struct Summary {
    uri: String,
    rows: usize,
    cells: usize,
    widest_row_columns: usize,
    row_ending: RowEndingKind,
    lexer: &'static str,
    outcome: String,
    classes: BTreeMap<&'static str, usize>,
    diagnostics: Vec<String>,
}

fn summarize(model: &TextModel, outcome: &LexApplyOutcome, tab_width: usize) -> Result<Summary> {
    let buf = model.buffer();
    let mut widest = 0;
    for row in 0..buf.row_count() {
        let len = buf.row_length(row, false)?;
        widest = widest.max(buf.display_column(row, len, tab_width)?);
    }
    let mut classes = BTreeMap::new();
    for cell in buf.cells() {
        *classes.entry(model.semantic_class(cell.decoration)).or_insert(0) += 1;
    }
    let outcome = match outcome {
        LexApplyOutcome::Applied { spans } => format!("applied {spans} spans"),
        LexApplyOutcome::Stale { completed, current } => {
            format!("stale (computed at {completed}, now {current})")
        }
        LexApplyOutcome::Failed(e) => format!("failed: {e}"),
        LexApplyOutcome::Rejected(e) => format!("rejected: {e}"),
    };
    Ok(Summary {
        uri: model.resource().uri.clone(),
        rows: buf.row_count(),
        cells: buf.len(),
        widest_row_columns: widest,
        row_ending: model.using_row_ending_kind(),
        lexer: model.lexer().name(),
        outcome,
        classes,
        diagnostics: model
            .diagnostics()
            .iter()
            .map(|d| format!("{:?} at {}..{}: {}", d.level, d.span.start, d.span.end, d.message))
            .collect(),
    })
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.uri)?;
        writeln!(
            f,
            "  rows: {}  cells: {}  widest row: {} columns  row ending: {:?}",
            self.rows, self.cells, self.widest_row_columns, self.row_ending
        )?;
        writeln!(f, "  lexer: {} ({})", self.lexer, self.outcome)?;
        for (class, count) in &self.classes {
            writeln!(f, "  {class}: {count}")?;
        }
        for d in &self.diagnostics {
            writeln!(f, "  {d}")?;
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut startup = AppStartup::new();
    startup.configure_logging()?;
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let args = Args::parse();
    let config = load_from(args.config.clone())?;
    let mut model = open_document(args.path.as_deref(), model_options(&config))?;
    if let Some(text) = args.append.as_deref() {
        append_text(&mut model, text)?;
    }

    let mut registry = ModelRegistry::new();
    let id = registry.register(model)?;
    let outcome = lex_once(&mut registry, id).await?;
    let summary = summarize(registry.get(id)?, &outcome, config.tab_width())?;
    print!("{summary}");

    info!(
        target: "runtime",
        config_override = args.config.is_some(),
        config_source = config.source.as_ref().map(|p| p.display().to_string()),
        revision = registry.get(id)?.revision(),
        "shutdown"
    );
    registry.dispose(id)?;
    Ok(())
}
