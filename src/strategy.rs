//! Build-time trace-strategy selection and the capture backends.
//!
//! Three backends exist in the source; exactly one compiles into any given
//! build, chosen by a decision tree evaluated once at compile time:
//!
//! 1. `full-trace` feature on a platform with unwinder support (unix,
//!    windows) -> [`FullTrace`], an eager native backtrace.
//! 2. otherwise, unless `minimal-trace` -> [`HybridTrace`], a snapshot of the
//!    calling thread's [`FrameLog`](crate::FrameLog).
//! 3. otherwise -> [`MinimalTrace`], the creation origin and nothing else.
//!
//! The unchosen backends do not exist in the binary. There is no runtime
//! branch anywhere on the capture path.

use core::fmt;

use crate::origin::SourceOrigin;

/// The trace backend compiled into this build. See [`STRATEGY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceStrategy {
    /// Native platform backtrace captured at raise time. Highest fidelity,
    /// highest cost.
    Full,
    /// Snapshot of the guard-maintained frame log. Only instrumented call
    /// sites appear; cost is bounded by the number of active guards.
    Hybrid,
    /// Creation origin only. No call-chain reconstruction at all.
    Minimal,
}

cfg_if::cfg_if! {
    if #[cfg(all(feature = "full-trace", any(unix, windows)))] {
        /// The strategy active in this build.
        pub const STRATEGY: TraceStrategy = TraceStrategy::Full;

        /// The trace type captured by [`StructuredError`](crate::StructuredError)
        /// in this build.
        pub type Trace = FullTrace;
    } else if #[cfg(not(feature = "minimal-trace"))] {
        /// The strategy active in this build.
        pub const STRATEGY: TraceStrategy = TraceStrategy::Hybrid;

        /// The trace type captured by [`StructuredError`](crate::StructuredError)
        /// in this build.
        pub type Trace = HybridTrace;
    } else {
        /// The strategy active in this build.
        pub const STRATEGY: TraceStrategy = TraceStrategy::Minimal;

        /// The trace type captured by [`StructuredError`](crate::StructuredError)
        /// in this build.
        pub type Trace = MinimalTrace;
    }
}

// ============================================================================
// FullTrace - eager native backtrace
// ============================================================================

/// A native call stack captured eagerly at the raise point.
///
/// Every live native frame is recorded, instrumented or not. Symbol
/// resolution happens at capture via the `backtrace` crate, so the value is
/// a self-contained snapshot that can cross threads.
#[cfg(all(feature = "full-trace", any(unix, windows)))]
#[derive(Debug)]
pub struct FullTrace {
    backtrace: backtrace::Backtrace,
}

#[cfg(all(feature = "full-trace", any(unix, windows)))]
impl FullTrace {
    pub(crate) fn capture(_origin: SourceOrigin) -> Self {
        Self {
            backtrace: backtrace::Backtrace::new(),
        }
    }

    /// The raw captured backtrace.
    pub fn backtrace(&self) -> &backtrace::Backtrace {
        &self.backtrace
    }

    pub(crate) fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\nstack trace:\n{:?}", self.backtrace)
    }
}

// ============================================================================
// HybridTrace - frame-log snapshot
// ============================================================================

/// The instrumented call chain at the raise point, outermost first.
///
/// A value copy of the calling thread's [`FrameLog`](crate::FrameLog) taken
/// at construction time: frames pushed or popped afterwards never alter it,
/// and the trace stays valid after moving to another thread.
#[cfg(not(any(
    all(feature = "full-trace", any(unix, windows)),
    feature = "minimal-trace"
)))]
#[derive(Debug, Clone)]
pub struct HybridTrace {
    frames: Vec<SourceOrigin>,
}

#[cfg(not(any(
    all(feature = "full-trace", any(unix, windows)),
    feature = "minimal-trace"
)))]
impl HybridTrace {
    pub(crate) fn capture(_origin: SourceOrigin) -> Self {
        Self {
            frames: crate::frames::with_thread_log(|log| log.frames()),
        }
    }

    /// Captured frames, outermost first.
    pub fn frames(&self) -> &[SourceOrigin] {
        &self.frames
    }

    pub(crate) fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\nstack trace:")?;
        for frame in &self.frames {
            write!(f, "\n    {frame}")?;
        }
        Ok(())
    }
}

// ============================================================================
// MinimalTrace - origin only
// ============================================================================

/// The creation origin and nothing else.
///
/// The fallback for targets with severe memory constraints: no call-chain
/// reconstruction, no allocation beyond the error itself.
#[cfg(all(
    feature = "minimal-trace",
    not(all(feature = "full-trace", any(unix, windows)))
))]
#[derive(Debug, Clone, Copy)]
pub struct MinimalTrace {
    origin: SourceOrigin,
}

#[cfg(all(
    feature = "minimal-trace",
    not(all(feature = "full-trace", any(unix, windows)))
))]
impl MinimalTrace {
    pub(crate) fn capture(origin: SourceOrigin) -> Self {
        Self { origin }
    }

    /// The origin the error was created at - all a minimal build records.
    pub fn origin(&self) -> SourceOrigin {
        self.origin
    }

    pub(crate) fn render(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The error's own location line already shows the origin.
        Ok(())
    }
}
