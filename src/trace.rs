//! Stage logging for the digest pipeline.
//!
//! Spans are named after the stage functions (`compute_digest`,
//! `radon_projections`, `feature_vector`, `dct_digest` and so on). Numeric
//! fallbacks such as empty projection lines or a flat feature set are
//! reported at warn level.
//! Building without the `tracing` feature erases every call site.

#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
    ($name:expr) => {
        tracing::info!(name: $name)
    };
}

/// Warns that a stage substituted zeros for a degenerate intermediate.
#[cfg(feature = "tracing")]
macro_rules! trace_degenerate {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::warn!(name: $name, $($key = $value),+)
    };
}

// Without the feature the field expressions are still evaluated once so the
// call sites compile identically.

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
    ($name:expr) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_degenerate {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
}

pub(crate) use trace_degenerate;
pub(crate) use trace_event;
pub(crate) use trace_span;

/// Guard returned by `trace_span!` when logging is compiled out.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
