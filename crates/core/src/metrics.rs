//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Genre suggestions (outcomes and latency per backend)
//! - External services (TMDB, LLM providers)
//! - Library operations (scans, moves)

use std::time::Duration;

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

use crate::suggester::GenreSuggestion;

// =============================================================================
// Suggestion Metrics
// =============================================================================

/// Suggestions produced, by backend and status.
pub static SUGGESTIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("cinesort_suggestions_total", "Total genre suggestions"),
        &["backend", "status"], // status: "success", "undetermined", "error"
    )
    .unwrap()
});

/// End-to-end suggestion latency in seconds.
pub static SUGGESTION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "cinesort_suggestion_duration_seconds",
            "Duration of a genre suggestion call",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 90.0]),
        &["backend"],
    )
    .unwrap()
});

/// Fallback delegations from the primary suggester.
pub static FALLBACK_ATTEMPTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "cinesort_fallback_attempts_total",
            "Times the primary suggester delegated to its fallback",
        ),
        &["result"], // "used", "inconclusive"
    )
    .unwrap()
});

// =============================================================================
// External Service Metrics
// =============================================================================

/// External service request duration.
pub static EXTERNAL_SERVICE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "cinesort_external_request_duration_seconds",
            "Duration of external service requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["service", "operation"],
    )
    .unwrap()
});

/// External service requests by result.
pub static EXTERNAL_SERVICE_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "cinesort_external_requests_total",
            "Total external service requests",
        ),
        &["service", "operation", "result"], // result: "success", "error"
    )
    .unwrap()
});

/// LLM token usage.
pub static LLM_TOKENS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("cinesort_llm_tokens_total", "Total LLM tokens used"),
        &["provider", "direction"], // direction: "input", "output"
    )
    .unwrap()
});

// =============================================================================
// Library Metrics
// =============================================================================

/// Movies relocated into genre folders.
pub static MOVIES_MOVED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("cinesort_movies_moved_total", "Movies moved into genre folders").unwrap()
});

/// Movie files seen by library scans.
pub static MOVIES_SCANNED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("cinesort_movies_scanned_total", "Movie files found by scans").unwrap()
});

/// Record one external call.
pub fn record_external_call(service: &str, operation: &str, success: bool, elapsed: Duration) {
    let result = if success { "success" } else { "error" };
    EXTERNAL_SERVICE_REQUESTS
        .with_label_values(&[service, operation, result])
        .inc();
    EXTERNAL_SERVICE_DURATION
        .with_label_values(&[service, operation])
        .observe(elapsed.as_secs_f64());
}

/// Record one finished suggestion.
pub fn record_suggestion(backend: &str, suggestion: &GenreSuggestion, elapsed: Duration) {
    SUGGESTIONS_TOTAL
        .with_label_values(&[backend, suggestion.status().as_str()])
        .inc();
    SUGGESTION_DURATION
        .with_label_values(&[backend])
        .observe(elapsed.as_secs_f64());
}

/// Get all core metrics for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Suggestions
        Box::new(SUGGESTIONS_TOTAL.clone()),
        Box::new(SUGGESTION_DURATION.clone()),
        Box::new(FALLBACK_ATTEMPTS.clone()),
        // External services
        Box::new(EXTERNAL_SERVICE_DURATION.clone()),
        Box::new(EXTERNAL_SERVICE_REQUESTS.clone()),
        Box::new(LLM_TOKENS.clone()),
        // Library
        Box::new(MOVIES_MOVED.clone()),
        Box::new(MOVIES_SCANNED.clone()),
    ]
}
