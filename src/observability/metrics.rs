//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): requests by method, path, status
//! - `relay_request_duration_seconds` (histogram): latency distribution
//! - `relay_chat_sessions` (counter): WebSocket sessions opened/closed
//! - `relay_chat_messages_total` (counter): chat lines relayed per room
//! - `relay_registrations_total` (counter): accounts created
//! - `relay_rate_limited_total` (counter): requests rejected by the limiter
//!
//! # Design Decisions
//! - `metrics` facade with a Prometheus exporter on its own listener
//! - Low-cardinality labels only (fixed route set, room names)
//! - Recording is fire-and-forget; the exporter failing never blocks requests

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on the given address.
///
/// Failure is logged and otherwise ignored; the relay runs without
/// metrics rather than refusing to start.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_counter!("relay_requests_total", "Requests by method, path, and status");
            describe_histogram!(
                "relay_request_duration_seconds",
                "Request latency in seconds"
            );
            describe_counter!("relay_chat_sessions", "WebSocket chat sessions by event");
            describe_counter!("relay_chat_messages_total", "Chat lines relayed by room");
            describe_counter!("relay_registrations_total", "Accounts created");
            describe_counter!("relay_rate_limited_total", "Requests rejected by the limiter");
            tracing::info!(address = %addr, "Metrics exporter started");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to start metrics exporter");
        }
    }
}

/// Record one handled HTTP request.
pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    counter!(
        "relay_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);
    histogram!(
        "relay_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string(),
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a WebSocket session opening.
pub fn record_session_opened(room: &str) {
    counter!("relay_chat_sessions", "event" => "opened", "room" => room.to_string()).increment(1);
}

/// Record a WebSocket session closing.
pub fn record_session_closed(room: &str) {
    counter!("relay_chat_sessions", "event" => "closed", "room" => room.to_string()).increment(1);
}

/// Record one relayed chat line.
pub fn record_chat_message(room: &str) {
    counter!("relay_chat_messages_total", "room" => room.to_string()).increment(1);
}

/// Record a successful registration.
pub fn record_registration() {
    counter!("relay_registrations_total").increment(1);
}

/// Record a request rejected by the rate limiter.
pub fn record_rate_limited(reason: &'static str) {
    counter!("relay_rate_limited_total", "reason" => reason).increment(1);
}
