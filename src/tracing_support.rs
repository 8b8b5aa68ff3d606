//! Tracing support for graph operations.
//!
//! When the `tracing` feature is enabled, graph operations open `tracing`
//! spans and emit events for mutations and rejected requests.  When it is
//! disabled, the same macros expand to no-ops.

#[cfg(feature = "tracing")]
mod enabled {
    use std::sync::Once;

    /// Installs a formatting subscriber that writes through the test harness.
    /// Only the first call has any effect, and an already installed global
    /// subscriber is left in place.
    pub fn init_tracing() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_max_level(tracing::Level::TRACE)
                .with_test_writer()
                .try_init();
        });
    }

    pub(crate) use tracing::{debug, info_span, trace};
}

#[cfg(not(feature = "tracing"))]
mod disabled {
    pub fn init_tracing() {
        // No-op when tracing is disabled
    }

    macro_rules! noop_span {
        ($name:expr) => {{ $crate::tracing_support::NoOpSpan }};
        ($name:expr, $($fields:tt)*) => {{ $crate::tracing_support::NoOpSpan }};
    }

    macro_rules! noop_event {
        ($($args:tt)*) => {{}};
    }

    pub(crate) use {noop_event as debug, noop_event as trace, noop_span as info_span};

    pub struct NoOpSpan;

    impl NoOpSpan {
        pub fn entered(self) -> NoOpSpanGuard {
            NoOpSpanGuard
        }
    }

    pub struct NoOpSpanGuard;
}

#[cfg(feature = "tracing")]
pub use enabled::*;

#[cfg(not(feature = "tracing"))]
pub use disabled::*;
