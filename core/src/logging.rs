//! Log channel for the toolchain wrappers
//!
//! The library never installs a subscriber. Events go to the `fast_ctd`
//! target, inside a span the caller can replace, and key/value context is
//! attached as structured fields.

/// Target every event of this crate is emitted on.
pub const LOG_TARGET: &str = "fast_ctd";

/// Default span for a [`crate::ToolRunner`] or [`crate::GeometryAdapter`].
pub fn channel_span() -> tracing::Span {
    tracing::info_span!(target: LOG_TARGET, "fast_ctd")
}
