use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use env_flags::env_flags;
use once_cell::sync::OnceCell;
use pipegen::PipelineEngine;
use pipegen::config::{Settings, expand_home, load_settings, resolve_home};
use pipegen::export::{ExportFormat, build_bundle, render};
use pipegen::progress::TracingProgress;
use pipegen::source::{ConfigSource, FileConfigSource};
use tracing_subscriber::{Layer, Registry};

#[derive(Debug, Clone, Copy)]
enum LogFormat {
    Json,
    Compact,
    Pretty,
    Full,
}

fn fmt_layer<W>(writer: W, ansi: bool, format: LogFormat) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'w> tracing_subscriber::fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    let base = tracing_subscriber::fmt::layer()
        .with_file(false)
        .with_line_number(false)
        .with_target(true)
        .with_ansi(ansi)
        .with_writer(writer);
    match format {
        LogFormat::Json => base.json().boxed(),
        LogFormat::Compact => base.compact().boxed(),
        LogFormat::Pretty => base.pretty().boxed(),
        LogFormat::Full => base.boxed(),
    }
}

fn init_tracing(home: &Path, settings: Option<&Settings>) {
    env_flags! {
        /// Tracing filter, e.g. "info", "debug", or targets format.
        RUST_LOG: &str = "warn";
        /// Preferred filter env (alias). If set, overrides RUST_LOG.
        TRACING_FILTER: &str = "";
        /// Pretty formatting for logs (ignored if TRACING_JSON=true).
        TRACING_PRETTY: bool = false;
        /// Compact single-line formatting for logs (ignored if TRACING_JSON=true)
        TRACING_COMPACT: bool = true;
        /// JSON formatting for logs
        TRACING_JSON: bool = false;
        /// If true, also log to file under <PIPEGEN_HOME>/logs or LOG_DIR
        LOG_TO_FILE: bool = false;
        /// Optional explicit log directory (absolute). Defaults to <PIPEGEN_HOME>/logs
        LOG_DIR: &str = "";
    }

    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let env_set = |k: &str| std::env::var_os(k).is_some();

    // Env wins, then the settings file, then defaults.
    let mut rust_log = if !(*TRACING_FILTER).is_empty() {
        (*TRACING_FILTER).to_string()
    } else {
        (*RUST_LOG).to_string()
    };
    let mut tracing_json = *TRACING_JSON;
    let mut tracing_compact = *TRACING_COMPACT;
    let mut tracing_pretty = *TRACING_PRETTY;
    let mut log_to_file = *LOG_TO_FILE;
    let mut log_dir: Option<PathBuf> = if !(*LOG_DIR).is_empty() {
        Some(PathBuf::from((*LOG_DIR).to_string()))
    } else {
        None
    };

    if let Some(cfg) = settings.and_then(|s| s.logging.as_ref()) {
        if !(env_set("TRACING_FILTER") || env_set("RUST_LOG"))
            && let Some(level) = cfg.level.as_ref()
        {
            rust_log = level.clone();
        }
        if !env_set("TRACING_JSON")
            && let Some(v) = cfg.json
        {
            tracing_json = v;
        }
        if !env_set("TRACING_COMPACT")
            && let Some(v) = cfg.compact
        {
            tracing_compact = v;
        }
        if !env_set("TRACING_PRETTY")
            && let Some(v) = cfg.pretty
        {
            tracing_pretty = v;
        }
        if !env_set("LOG_TO_FILE")
            && let Some(v) = cfg.to_file
        {
            log_to_file = v;
        }
        if !env_set("LOG_DIR")
            && let Some(dir) = cfg.dir.as_ref()
        {
            log_dir = Some(expand_home(dir));
        }
    }

    let format = if tracing_json {
        LogFormat::Json
    } else if tracing_compact {
        LogFormat::Compact
    } else if tracing_pretty {
        LogFormat::Pretty
    } else {
        LogFormat::Full
    };
    let filter = EnvFilter::try_new(rust_log).unwrap_or_else(|_| EnvFilter::new("warn"));

    // Logs always go to stderr; stdout carries the rendered result.
    let mut layers = vec![fmt_layer(std::io::stderr, true, format)];

    static FILE_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();
    let mut file_error = None;
    if log_to_file {
        let dir = log_dir.unwrap_or_else(|| home.join("logs"));
        match std::fs::create_dir_all(&dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(dir, "pipegen.log");
                let (nb, guard) = tracing_appender::non_blocking(appender);
                let _ = FILE_GUARD.set(guard);
                layers.push(fmt_layer(nb, false, format));
            }
            Err(e) => file_error = Some((dir, e)),
        }
    }

    if let Err(e) = tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
    {
        tracing::debug!("tracing already set: {:?}", e);
    }
    if let Some((dir, e)) = file_error {
        tracing::warn!("failed to create log dir {}: {}", dir.display(), e);
    }
}

fn write_output(path: Option<&Path>, rendered: &str) -> anyhow::Result<()> {
    match path {
        Some(p) => std::fs::write(p, rendered)
            .with_context(|| format!("failed to write {}", p.display())),
        None => {
            let mut out = std::io::stdout().lock();
            out.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                out.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_flags! {
        /// Pipegen home directory (absolute). Defaults to $HOME/.pipegen
        PIPEGEN_HOME: &str = "";
    }
    let home = resolve_home(*PIPEGEN_HOME);
    // Unreadable settings fall back to defaults.
    let settings = load_settings(&home).ok().flatten();
    init_tracing(&home, settings.as_ref());

    env_flags! {
        /// Input config path (.json, .toml, .yaml, .yml). The first CLI argument overrides it.
        PIPEGEN_CONFIG: &str = "";
        /// Merge pipelines sharing a provider and model before output.
        PIPEGEN_MERGE: bool = false;
        /// "none" prints the ParseResult as JSON; "json", "yaml" or "csv" print a deployment bundle.
        PIPEGEN_EXPORT: &str = "none";
        /// Output file. Empty writes to stdout.
        PIPEGEN_OUTPUT: &str = "";
    }

    let env_set = |k: &str| std::env::var_os(k).is_some();
    let output_cfg = settings.as_ref().and_then(|s| s.output.as_ref());

    let merge = if env_set("PIPEGEN_MERGE") {
        *PIPEGEN_MERGE
    } else {
        output_cfg
            .and_then(|o| o.merge)
            .unwrap_or(*PIPEGEN_MERGE)
    };
    let export = if env_set("PIPEGEN_EXPORT") {
        (*PIPEGEN_EXPORT).to_string()
    } else {
        output_cfg
            .and_then(|o| o.export_format.clone())
            .unwrap_or_else(|| (*PIPEGEN_EXPORT).to_string())
    };
    let export_format: Option<ExportFormat> = if export.trim().eq_ignore_ascii_case("none") {
        None
    } else {
        Some(export.parse()?)
    };
    let output_path: Option<PathBuf> = if !(*PIPEGEN_OUTPUT).is_empty() {
        Some(expand_home(*PIPEGEN_OUTPUT))
    } else {
        output_cfg
            .and_then(|o| o.path.as_deref())
            .map(expand_home)
    };

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| {
            let p = (*PIPEGEN_CONFIG).trim();
            (!p.is_empty()).then(|| p.to_string())
        })
        .context("no config file given (pass a path or set PIPEGEN_CONFIG)")?;

    tracing::info!(
        "pipegen starting (home={}, merge={}, export={})",
        home.display(),
        merge,
        export
    );

    let source = FileConfigSource::new(expand_home(&config_path));
    let engine = PipelineEngine::new();
    let result = engine
        .load_and_parse(&source, &mut TracingProgress)
        .with_context(|| format!("failed to load {}", source.describe()))?;

    if !result.success {
        for e in result.errors() {
            eprintln!("error: {}", e);
        }
        anyhow::bail!("configuration {} is invalid", source.describe());
    }
    for w in result.warnings() {
        tracing::warn!("{}", w);
    }

    let result = if merge { result.optimized() } else { result };
    let rendered = match export_format {
        None => serde_json::to_string_pretty(&result)?,
        Some(format) => render(&build_bundle(&result.pipelines), format)?,
    };
    write_output(output_path.as_deref(), &rendered)
}
