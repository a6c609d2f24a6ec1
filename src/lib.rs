//! # errtrail - structured errors with build-time-selected stack traces
//!
//! Attach diagnostic context to a failure value - a message, an arbitrary
//! typed payload, the originating source location, and a call-stack trace -
//! and reconstruct an approximate call stack **without an operating-system
//! unwinder**.
//!
//! ```text
//! error: update error:
//! location: src/orders.rs(42:17) `orders::update`
//! stack trace:
//!     src/main.rs(10:5) `main`
//!     src/orders.rs(30:9) `orders::handle_request`
//! ```
//!
//! ## Try It Now
//!
//! Raise with [`raise!`], instrument functions with [`frame!`]:
//!
//! ```rust
//! use errtrail::{frame, StructuredError};
//!
//! fn update_order(id: u32) -> Result<(), StructuredError<u32>> {
//!     let _frame = frame!();  // push this call onto the thread's frame log
//!     Err(errtrail::raise!("update error: ", id))
//! }
//!
//! let err = update_order(10).unwrap_err();
//! assert_eq!(err.message(), "update error: ");
//! assert_eq!(*err.payload(), 10);
//! println!("{err}");  // message + origin + captured trace
//! ```
//!
//! ## Three Trace Strategies
//!
//! Which trace a [`StructuredError`] captures is decided once, at build time,
//! never at runtime:
//!
//! | Strategy | Selected when | Captures |
//! |----------|---------------|----------|
//! | **Full** | `full-trace` feature on unix/windows | Native backtrace via the `backtrace` crate |
//! | **Hybrid** | default | Snapshot of the thread's [`FrameLog`] |
//! | **Minimal** | `minimal-trace` feature | The creation [`SourceOrigin`] only |
//!
//! [`STRATEGY`] reports the active choice; the unchosen backends do not
//! exist in the binary. Hybrid needs no platform support at all: it rebuilds
//! the call chain from [`ScopedFrame`] guards that push a frame when an
//! instrumented function is entered and pop it on every exit path, including
//! error propagation. The captured trace is a value snapshot taken at the
//! raise point, so it survives the unwinding that follows.
//!
//! ## Which Entry Point?
//!
//! | Situation | Use |
//! |-----------|-----|
//! | Raising inside a named function | [`raise!`] - records the function name |
//! | Raising where a plain call suffices | [`raise()`] - file:line:column only |
//! | Origin captured earlier, raised later | [`raise_at()`] |
//! | Instrumenting a function for hybrid traces | `let _frame = frame!();` |
//! | A standalone synthetic stack (tests, simulations) | [`FrameLog`] + [`ScopedFrame::create`] |
//!
//! ## Threads
//!
//! Every thread owns an independent [`FrameLog`], created lazily and dropped
//! with the thread - no locks, no cross-thread interference. Guards are
//! `!Send` and stay on the thread that owns their log. Errors, once raised,
//! are free to cross threads: their trace is a snapshot, not a live
//! reference.
//!
//! ## Design Goals
//!
//! - **Zero-cost capture**: origins come from `#[track_caller]` and closure
//!   type names, resolved at compile time; no heap allocation, no unwinding.
//! - **Near-zero cost when disabled**: under full/minimal builds, [`frame!`]
//!   produces an inert guard the optimizer removes.
//! - **Thread-safe by construction**: per-thread logs instead of shared
//!   mutable state.

mod error;
mod frames;
mod origin;
mod strategy;

pub use error::{StructuredError, raise, raise_at};
#[cfg(not(any(
    all(feature = "full-trace", any(unix, windows)),
    feature = "minimal-trace"
)))]
pub use frames::with_thread_log;
pub use frames::{FrameLog, ScopedFrame};
pub use origin::SourceOrigin;
#[cfg(all(feature = "full-trace", any(unix, windows)))]
pub use strategy::FullTrace;
#[cfg(not(any(
    all(feature = "full-trace", any(unix, windows)),
    feature = "minimal-trace"
)))]
pub use strategy::HybridTrace;
#[cfg(all(
    feature = "minimal-trace",
    not(all(feature = "full-trace", any(unix, windows)))
))]
pub use strategy::MinimalTrace;
pub use strategy::{STRATEGY, Trace, TraceStrategy};

/// Capture a [`SourceOrigin`] at the invocation site, function name included.
///
/// Expands to [`SourceOrigin::from_marker`] with an empty closure whose type
/// name encodes the enclosing function - both the location and the name are
/// resolved at compile time.
///
/// ## Example
///
/// ```rust
/// use errtrail::origin;
///
/// fn here() -> errtrail::SourceOrigin {
///     origin!()
/// }
///
/// assert!(here().function().ends_with("here"));
/// ```
#[macro_export]
macro_rules! origin {
    () => {
        $crate::SourceOrigin::from_marker(|| {})
    };
}

/// Raise a [`StructuredError`] at the invocation site, function name included.
///
/// Equivalent to [`raise_at`]`(message, payload, `[`origin!`]`())`.
///
/// ## Example
///
/// ```rust
/// use errtrail::StructuredError;
///
/// #[derive(Debug)]
/// enum Fault { Missing }
///
/// fn lookup() -> Result<(), StructuredError<Fault>> {
///     Err(errtrail::raise!("no such entry", Fault::Missing))
/// }
///
/// let err = lookup().unwrap_err();
/// assert!(err.origin().function().ends_with("lookup"));
/// ```
#[macro_export]
macro_rules! raise {
    ($message:expr, $payload:expr $(,)?) => {
        $crate::raise_at($message, $payload, $crate::origin!())
    };
}

/// Instrument the enclosing scope: push a frame onto the calling thread's
/// [`FrameLog`], popped again when the guard drops.
///
/// Bind the result, or the frame pops immediately:
///
/// ```rust
/// use errtrail::frame;
///
/// fn handle_request() {
///     let _frame = frame!();
///     // every error raised below this point sees this frame
/// }
/// # handle_request();
/// ```
///
/// Under full-trace and minimal-trace builds this expands to an inert guard
/// and costs nothing.
#[macro_export]
macro_rules! frame {
    () => {
        $crate::ScopedFrame::enter($crate::origin!())
    };
}
