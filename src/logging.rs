use crate::config::settings::DebugLogRotation;
use crate::config::Config;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::EnvFilter;

#[allow(dead_code)]
pub struct LogGuard(tracing_appender::non_blocking::WorkerGuard);

const DEFAULT_FILTER: &str = "qa=info,warn";

/// Initialize logging.
///
/// Logs go to stderr unless `debug` is enabled, in which case they are written to
/// `debug_log_path` (default `~/.config/qa/qa-debug.log`) with the configured rotation.
/// `RUST_LOG` overrides the default filter in both modes.
pub fn init(config: &Config) -> Result<Option<LogGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if !config.debug {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .try_init()
            .ok(); // If already initialized (e.g., in tests), don't crash.
        return Ok(None);
    }

    let rotation = config
        .debug_log_rotation
        .unwrap_or(DebugLogRotation::Session);

    let (writer, log_path_for_display, guard) =
        open_writer(rotation, config.debug_log_path.as_deref(), config.debug_log_keep)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer)
        .try_init()
        .ok();

    tracing::info!(
        log_file = %log_path_for_display.display(),
        rotation = ?rotation,
        "writing logs to file"
    );

    Ok(Some(LogGuard(guard)))
}

fn open_writer(
    rotation: DebugLogRotation,
    path: Option<&str>,
    keep: Option<usize>,
) -> Result<(NonBlocking, PathBuf, tracing_appender::non_blocking::WorkerGuard)> {
    let base = resolve_base_log_path(path)?;

    match rotation {
        DebugLogRotation::None => {
            ensure_parent_dir(&base)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&base)
                .with_context(|| format!("Failed to open log file: {}", base.display()))?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            Ok((non_blocking, base, guard))
        }
        DebugLogRotation::Daily => {
            let (dir, base_name) = split_dir_and_name(&base)?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

            let kind = RotationKind::Daily {
                base_name: base_name.clone(),
            };
            cleanup_rotated_logs(&dir, &kind, keep)?;

            let appender = tracing_appender::rolling::daily(&dir, &base_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            Ok((non_blocking, base, guard))
        }
        DebugLogRotation::Session => {
            let (dir, base_name) = split_dir_and_name(&base)?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

            cleanup_rotated_logs(
                &dir,
                &RotationKind::Session {
                    base_name: base_name.clone(),
                },
                keep,
            )?;

            let session_path = build_session_log_path(&dir, &base_name);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&session_path)
                .with_context(|| format!("Failed to open log file: {}", session_path.display()))?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            Ok((non_blocking, session_path, guard))
        }
    }
}

fn default_log_path() -> Result<PathBuf> {
    let config_path = crate::config::config_path()?;
    Ok(config_path.with_file_name("qa-debug.log"))
}

fn resolve_base_log_path(config_value: Option<&str>) -> Result<PathBuf> {
    let Some(raw) = config_value else {
        return default_log_path();
    };

    let path = PathBuf::from(expand_tilde(raw));

    // Trailing separator or an existing directory: use the default file name inside it.
    if raw.ends_with(std::path::MAIN_SEPARATOR) || path.is_dir() {
        return Ok(path.join("qa-debug.log"));
    }

    Ok(path)
}

fn expand_tilde(raw: &str) -> String {
    if raw == "~" || raw.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            let suffix = raw.strip_prefix('~').unwrap_or("");
            return format!("{}{}", home.display(), suffix);
        }
    }
    raw.to_string()
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    Ok(())
}

fn split_dir_and_name(path: &Path) -> Result<(PathBuf, String)> {
    let dir = path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .context("Invalid debug_log_path: not valid UTF-8")?
        .to_string();
    Ok((dir, name))
}

fn build_session_log_path(dir: &Path, base_name: &str) -> PathBuf {
    let ts = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
    dir.join(format!("{base_name}.session-{ts}"))
}

enum RotationKind {
    Daily { base_name: String },
    Session { base_name: String },
}

fn cleanup_rotated_logs(dir: &Path, kind: &RotationKind, keep: Option<usize>) -> Result<()> {
    let keep = keep.unwrap_or(match kind {
        RotationKind::Daily { .. } => 7,
        RotationKind::Session { .. } => 20,
    });

    if keep == 0 {
        return Ok(());
    }

    let prefix = match kind {
        // tracing_appender::rolling::daily uses: `{base_name}.{YYYY-MM-DD}`
        RotationKind::Daily { base_name } => format!("{base_name}."),
        RotationKind::Session { base_name } => format!("{base_name}.session-"),
    };

    let mut candidates: Vec<String> = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read log directory: {}", dir.display()))?
    {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else { continue };
        if name.starts_with(&prefix) {
            candidates.push(name.to_string());
        }
    }

    candidates.sort();
    candidates.reverse(); // newest first

    for name in candidates.iter().skip(keep) {
        let path = dir.join(name);
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::debug!(error = %e, file = %path.display(), "failed to remove old log file");
        }
    }

    Ok(())
}

/// Best-effort redaction of Yandex credentials before text reaches the logs.
///
/// Masks `Api-Key <token>` header values and `apikey=<token>` query parameters.
pub fn redact_secrets(input: &str) -> String {
    let redacted = redact_after(input, "Api-Key ", |c| c.is_whitespace() || c == '"');
    redact_after(&redacted, "apikey=", |c| c == '&' || c == '"' || c.is_whitespace())
}

fn redact_after(input: &str, marker: &str, is_end: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(marker) {
        let value_start = pos + marker.len();
        out.push_str(&rest[..value_start]);

        let tail = &rest[value_start..];
        let value_len = tail.find(|c: char| is_end(c)).unwrap_or(tail.len());
        if value_len > 0 {
            out.push_str("***REDACTED***");
        }
        rest = &tail[value_len..];
    }

    out.push_str(rest);
    out
}
