//! Diagnostic probe endpoints.
//!
//! # Responsibilities
//! - Answer `/test` and `/chatting` with an empty 200 on any method
//! - Emit exactly one informational record per request on the
//!   `diagnostics` log channel
//!
//! # Design Decisions
//! - Handlers are stateless and independent; nothing is shared between them
//! - Unmatched paths never reach these handlers, so they emit nothing
//! - An empty handler body gives axum's default: 200 with an empty body

/// Probe handler for `/test`.
pub async fn test_probe() {
    tracing::info!(target: "diagnostics", "test succeeded");
}

/// Probe handler for `/chatting`.
pub async fn chatting_probe() {
    tracing::info!(target: "diagnostics", "chatting succeeded");
}
