//! The payload-carrying error value.

use std::borrow::Cow;
use std::fmt;

use crate::origin::SourceOrigin;
use crate::strategy::Trace;

/// An error carrying a message, a typed payload, its creation origin, and a
/// trace captured at construction time.
///
/// What the trace holds depends on the strategy compiled into the build (see
/// [`STRATEGY`](crate::STRATEGY)): a native backtrace, a snapshot of the
/// thread's frame log, or nothing beyond the origin. The error itself looks
/// the same in every build.
///
/// Construction never fails and the value is immutable afterwards. The trace
/// is a value snapshot, never a live reference, so the error can move freely
/// across threads (given `T: Send`) - for example out of a worker thread to
/// whatever monitors it.
///
/// ## Example
///
/// ```rust
/// use errtrail::{raise, StructuredError};
///
/// #[derive(Debug, PartialEq)]
/// struct OrderId(u32);
///
/// fn find(id: u32) -> Result<(), StructuredError<OrderId>> {
///     Err(raise("update error: ", OrderId(id)))
/// }
///
/// let err = find(10).unwrap_err();
/// assert_eq!(err.message(), "update error: ");
/// assert_eq!(err.payload(), &OrderId(10));
/// assert!(err.origin().file().ends_with(".rs"));
/// ```
pub struct StructuredError<T> {
    message: Cow<'static, str>,
    payload: T,
    origin: SourceOrigin,
    trace: Trace,
}

impl<T> StructuredError<T> {
    /// Build an error at an explicit origin, capturing the active strategy's
    /// trace at this exact instant.
    ///
    /// Usually reached through [`raise()`](crate::raise) or the
    /// [`raise!`](crate::raise!) macro rather than called directly.
    pub fn with_origin(
        message: impl Into<Cow<'static, str>>,
        payload: T,
        origin: SourceOrigin,
    ) -> Self {
        Self {
            message: message.into(),
            payload,
            origin,
            trace: Trace::capture(origin),
        }
    }

    /// The human-readable message. A pure read; repeated calls return the
    /// same value.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The typed payload attached at the raise point. A pure read.
    #[inline]
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Consume the error and recover the payload, for handlers that want to
    /// act on it.
    #[inline]
    pub fn into_payload(self) -> T {
        self.payload
    }

    /// Where the error was created.
    #[inline]
    pub fn origin(&self) -> SourceOrigin {
        self.origin
    }

    /// The trace captured at construction time. Its concrete type is the
    /// build's [`Trace`] alias.
    #[inline]
    pub fn trace(&self) -> &Trace {
        &self.trace
    }
}

/// Build a [`StructuredError`] at the caller's location.
///
/// The origin's function name is empty on this path (plain calls cannot
/// recover it); use [`raise!`](crate::raise!) to record the enclosing
/// function as well.
///
/// ## Example
///
/// ```rust
/// use errtrail::{raise, StructuredError};
///
/// fn fail() -> Result<(), StructuredError<u32>> {
///     Err(raise("lookup miss", 42))
/// }
///
/// let err = fail().unwrap_err();
/// assert_eq!(*err.payload(), 42);
/// ```
#[track_caller]
#[inline]
pub fn raise<T>(message: impl Into<Cow<'static, str>>, payload: T) -> StructuredError<T> {
    StructuredError::with_origin(message, payload, SourceOrigin::caller())
}

/// Build a [`StructuredError`] at an explicit origin.
///
/// For call sites that captured an origin earlier (e.g. via
/// [`origin!`](crate::origin!)) and raise later.
#[inline]
pub fn raise_at<T>(
    message: impl Into<Cow<'static, str>>,
    payload: T,
    origin: SourceOrigin,
) -> StructuredError<T> {
    StructuredError::with_origin(message, payload, origin)
}

impl<T: fmt::Debug> fmt::Debug for StructuredError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredError")
            .field("message", &self.message)
            .field("payload", &self.payload)
            .field("origin", &self.origin)
            .field("trace", &self.trace)
            .finish()
    }
}

impl<T> fmt::Display for StructuredError<T> {
    /// A human-readable multi-line block: the message, the creation origin,
    /// then the active strategy's trace rendering.
    ///
    /// ```text
    /// error: update error:
    /// location: src/orders.rs(42:17) `orders::update`
    /// stack trace:
    ///     src/main.rs(10:5) `main`
    ///     src/orders.rs(30:9) `orders::handle`
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {}\nlocation: {}", self.message, self.origin)?;
        self.trace.render(f)
    }
}

impl<T: fmt::Debug> std::error::Error for StructuredError<T> {}
