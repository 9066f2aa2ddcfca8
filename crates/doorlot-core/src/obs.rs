//! Structured observability hooks for Doorlot lifecycle events.
//!
//! This module provides:
//! - Draw-scoped tracing spans via the `DrawSpan` RAII guard
//! - Emission functions for key events: draw, history append, account changes
//!
//! Events are emitted at `info!` level unless noted (filter with `RUST_LOG`).

use tracing::info;

/// RAII guard that enters an actor-scoped tracing span for one draw.
///
/// # Example
///
/// ```ignore
/// let _span = DrawSpan::enter("alice");
/// // Every event until the guard drops carries actor = "alice"
/// ```
pub struct DrawSpan {
    _span: tracing::span::EnteredSpan,
}

impl DrawSpan {
    pub fn enter(actor: &str) -> Self {
        let span = tracing::info_span!("doorlot.draw", actor = %actor);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: a batch was assigned.
pub fn emit_draw_completed(actor: &str, participants: usize, min: i64, max: i64) {
    info!(
        event = "draw.completed",
        actor = %actor,
        participants = participants,
        min = min,
        max = max,
    );
}

/// Emit event: the engine rejected a draw (warning level).
pub fn emit_draw_rejected(actor: &str, error: &dyn std::fmt::Display) {
    tracing::warn!(event = "draw.rejected", actor = %actor, error = %error);
}

/// Emit event: a history entry was appended to both logs.
pub fn emit_history_recorded(actor: &str, actor_len: usize, global_len: usize) {
    info!(
        event = "history.recorded",
        actor = %actor,
        actor_log_len = actor_len,
        global_log_len = global_len,
    );
}

/// Emit event: appending to history failed (warning level).
pub fn emit_history_record_failed(actor: &str, error: &dyn std::fmt::Display) {
    tracing::warn!(event = "history.record_failed", actor = %actor, error = %error);
}

/// Emit event: an account changed (`action` is e.g. "created", "password_changed").
pub fn emit_account_changed(username: &str, action: &str) {
    info!(event = "account.changed", username = %username, action = %action);
}

/// Emit event: a login attempt finished.
pub fn emit_login(username: &str, success: bool) {
    info!(event = "account.login", username = %username, success = success);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_span_create() {
        let _span = DrawSpan::enter("test-actor");
        emit_draw_completed("test-actor", 3, 1, 3);
    }
}
