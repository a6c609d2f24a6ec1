//! The synthetic call stack: frame log, scope guards, and the per-thread
//! registry that keeps them isolated.
//!
//! A [`FrameLog`] holds one [`SourceOrigin`] per currently-active
//! [`ScopedFrame`] guard, outermost first. Guards push on construction and
//! pop on drop, on every exit path, so the log always mirrors the live
//! instrumented call chain without any stack walking.
//!
//! Each thread owns its own log (see [`with_thread_log`]), created lazily on
//! first use and dropped with the thread. Nothing here takes a lock.

use core::cell::RefCell;
use core::fmt;
use core::marker::PhantomData;

use crate::origin::SourceOrigin;

// ============================================================================
// FrameLog
// ============================================================================

/// An append/remove sequence of [`SourceOrigin`]s forming a synthetic stack.
///
/// Interior mutability lets any number of nested [`ScopedFrame`] guards share
/// one log through `&` references. A log belongs to a single thread; it is
/// deliberately not `Sync`.
///
/// ## Example
///
/// ```rust
/// use errtrail::{FrameLog, ScopedFrame};
///
/// let log = FrameLog::new();
/// {
///     let _outer = ScopedFrame::create(&log);
///     let _inner = ScopedFrame::create(&log);
///     assert_eq!(log.depth(), 2);
/// }
/// assert_eq!(log.depth(), 0);
/// ```
pub struct FrameLog {
    frames: RefCell<Vec<SourceOrigin>>,
}

impl FrameLog {
    /// Create an empty log. Allocates nothing until the first push.
    #[inline]
    pub const fn new() -> Self {
        Self {
            frames: RefCell::new(Vec::new()),
        }
    }

    /// Append a frame.
    #[inline]
    pub fn push(&self, origin: SourceOrigin) {
        self.frames.borrow_mut().push(origin);
    }

    /// Remove the most recent frame.
    ///
    /// A no-op on an empty log, so a defensive double-pop during unwinding
    /// never panics.
    #[inline]
    pub fn pop(&self) {
        let _ = self.frames.borrow_mut().pop();
    }

    /// Snapshot of the current frames, outermost first.
    ///
    /// The returned vector is a value copy; later pushes and pops do not
    /// affect it.
    pub fn frames(&self) -> Vec<SourceOrigin> {
        self.frames.borrow().clone()
    }

    /// Number of live frames.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Whether no frames are live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.borrow().is_empty()
    }
}

impl Default for FrameLog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FrameLog {
    /// One frame per line, in push order (outermost first).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in self.frames.borrow().iter() {
            writeln!(f, "{frame}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for FrameLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.frames.borrow().iter()).finish()
    }
}

// ============================================================================
// Thread-local registry
// ============================================================================
//
// One FrameLog per thread, so concurrent threads never observe or corrupt
// each other's synthetic stack and no locks are needed. Only compiled when
// the hybrid strategy is active - the other strategies never read it.

#[cfg(not(any(
    all(feature = "full-trace", any(unix, windows)),
    feature = "minimal-trace"
)))]
std::thread_local! {
    static THREAD_LOG: FrameLog = const { FrameLog::new() };
}

/// Run `f` against the calling thread's [`FrameLog`].
///
/// The log is created on this thread's first use and dropped when the thread
/// exits. Available only in hybrid-strategy builds.
///
/// ## Example
///
/// ```rust
/// let depth = errtrail::with_thread_log(|log| log.depth());
/// assert_eq!(depth, 0);
/// ```
#[cfg(not(any(
    all(feature = "full-trace", any(unix, windows)),
    feature = "minimal-trace"
)))]
pub fn with_thread_log<R>(f: impl FnOnce(&FrameLog) -> R) -> R {
    THREAD_LOG.with(f)
}

// ============================================================================
// ScopedFrame
// ============================================================================

/// RAII guard that keeps a [`FrameLog`] synchronized with the call chain.
///
/// Construction pushes exactly one frame; drop pops exactly one, whether the
/// scope exits normally, via early return, or by `?`-propagated error. One
/// guard per instrumented call frame is the intended pattern - nested calls
/// nest guards naturally.
///
/// Guards are `!Send`: they must be dropped on the thread that owns the log
/// they pushed to.
///
/// ## Example
///
/// ```rust
/// use errtrail::{FrameLog, ScopedFrame};
///
/// fn step(log: &FrameLog) -> Result<(), ()> {
///     let _frame = ScopedFrame::create(log);
///     Err(())  // the frame still pops on the error path
/// }
///
/// let log = FrameLog::new();
/// let _ = step(&log);
/// assert!(log.is_empty());
/// ```
pub struct ScopedFrame<'a> {
    binding: Binding<'a>,
    // Pin the guard to the thread owning its log.
    _not_send: PhantomData<*const ()>,
}

enum Binding<'a> {
    Log(&'a FrameLog),
    #[cfg(not(any(
        all(feature = "full-trace", any(unix, windows)),
        feature = "minimal-trace"
    )))]
    Thread,
    #[cfg(any(
        all(feature = "full-trace", any(unix, windows)),
        feature = "minimal-trace"
    ))]
    Inert,
}

impl<'a> ScopedFrame<'a> {
    /// Push the caller's location onto `log`; the guard pops it on drop.
    #[track_caller]
    pub fn create(log: &'a FrameLog) -> Self {
        Self::create_at(log, SourceOrigin::caller())
    }

    /// Push an explicit origin onto `log`; the guard pops it on drop.
    pub fn create_at(log: &'a FrameLog, origin: SourceOrigin) -> Self {
        log.push(origin);
        Self {
            binding: Binding::Log(log),
            _not_send: PhantomData,
        }
    }
}

impl ScopedFrame<'static> {
    /// Push `origin` onto the calling thread's log; the guard pops it on drop.
    ///
    /// Prefer the [`frame!`](crate::frame!) macro, which also captures the
    /// enclosing function's name.
    ///
    /// When the hybrid strategy is not compiled in, this returns an inert
    /// guard and no push ever happens - instrumented functions cost nothing
    /// in full-trace and minimal-trace builds.
    #[cfg(not(any(
        all(feature = "full-trace", any(unix, windows)),
        feature = "minimal-trace"
    )))]
    pub fn enter(origin: SourceOrigin) -> Self {
        THREAD_LOG.with(|log| log.push(origin));
        Self {
            binding: Binding::Thread,
            _not_send: PhantomData,
        }
    }

    /// Inert stand-in compiled when the hybrid strategy is inactive.
    #[cfg(any(
        all(feature = "full-trace", any(unix, windows)),
        feature = "minimal-trace"
    ))]
    #[inline]
    pub fn enter(_origin: SourceOrigin) -> Self {
        Self {
            binding: Binding::Inert,
            _not_send: PhantomData,
        }
    }
}

impl Drop for ScopedFrame<'_> {
    fn drop(&mut self) {
        match &self.binding {
            Binding::Log(log) => log.pop(),
            #[cfg(not(any(
                all(feature = "full-trace", any(unix, windows)),
                feature = "minimal-trace"
            )))]
            Binding::Thread => {
                // try_with: popping during thread teardown is a silent no-op.
                let _ = THREAD_LOG.try_with(|log| log.pop());
            }
            #[cfg(any(
                all(feature = "full-trace", any(unix, windows)),
                feature = "minimal-trace"
            ))]
            Binding::Inert => {}
        }
    }
}

impl fmt::Debug for ScopedFrame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.binding {
            Binding::Log(log) => write!(f, "ScopedFrame(depth: {})", log.depth()),
            #[cfg(not(any(
                all(feature = "full-trace", any(unix, windows)),
                feature = "minimal-trace"
            )))]
            Binding::Thread => write!(f, "ScopedFrame(thread-local)"),
            #[cfg(any(
                all(feature = "full-trace", any(unix, windows)),
                feature = "minimal-trace"
            ))]
            Binding::Inert => write!(f, "ScopedFrame(inert)"),
        }
    }
}
