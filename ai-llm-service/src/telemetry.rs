//! Log formatting shared by the workspace binaries.

use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Targets emitted by the review workspace crates.
pub const WORKSPACE_TARGETS: &[&str] = &[
    "ai_llm_service",
    "issue_matcher",
    "paper_reviewer",
    "api",
    "paper_review_backend",
];

/// RFC3339 UTC timer implemented via `chrono`.
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        let s = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

/// Compact formatting layer that renders only events whose target starts with
/// one of `targets`.
///
/// - RFC3339 UTC timestamps
/// - `file:line` and target (module path)
/// - Span close events (duration of instrumented functions)
/// - ANSI colors only when stdout is a terminal
pub fn layer<S>(targets: &'static [&'static str]) -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let use_ansi = io::stdout().is_terminal();

    let only_ours = filter::filter_fn(move |meta| {
        let target = meta.target();
        targets.iter().any(|p| target.starts_with(p))
    });

    fmt::layer()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(use_ansi)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(fmt::format().compact().with_source_location(true))
        .with_filter(only_ours)
}

/// Builds an `EnvFilter` from `RUST_LOG` (or `default`), then raises every
/// workspace crate to `level`.
///
/// Invalid directives are skipped.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    WORKSPACE_TARGETS
        .iter()
        .filter_map(|t| level_directive(t, level))
        .fold(base, EnvFilter::add_directive)
}

fn level_directive(target: &str, level: Level) -> Option<Directive> {
    let s = format!("{target}={}", level.as_str().to_lowercase());
    Directive::from_str(&s).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_per_target() {
        let d = level_directive("issue_matcher", Level::DEBUG).unwrap();
        assert_eq!(d.to_string(), "issue_matcher=debug");
    }
}
