//! Source locations captured at the call site.
//!
//! [`SourceOrigin`] records where something happened: function, file, line,
//! column. Capture is zero-cost - locations come from `#[track_caller]` and
//! function names from the type name of a marker closure, both resolved at
//! compile time. No heap allocation, no unwinding.

use core::fmt;
use core::panic::Location;

/// An immutable record of a source position: function path, file, line, column.
///
/// All string data is `&'static` (borrowed from the binary's debug strings),
/// so the type is `Copy` and cheap to move around.
///
/// Capture reflects the *caller's* position, not the helper doing the
/// capturing - `#[track_caller]` propagates the location through the
/// constructor, the way a defaulted `source_location` argument would.
///
/// ## Example
///
/// ```rust
/// use errtrail::origin;
///
/// fn checkpoint() -> errtrail::SourceOrigin {
///     origin!()
/// }
///
/// let here = checkpoint();
/// assert!(here.file().ends_with(".rs"));
/// assert!(here.function().ends_with("checkpoint"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceOrigin {
    function: &'static str,
    file: &'static str,
    line: u32,
    column: u32,
}

impl SourceOrigin {
    /// Capture the caller's file, line, and column.
    ///
    /// Plain function calls cannot recover the enclosing function's name, so
    /// [`function()`](Self::function) is empty on this path. Use
    /// [`origin!`](crate::origin!) when the name matters.
    #[track_caller]
    #[inline]
    pub fn caller() -> Self {
        Self::from_location("", Location::caller())
    }

    /// Capture the caller's location plus the enclosing function's path.
    ///
    /// Pass an empty closure `|| {}` - its type name encodes the parent
    /// function at zero runtime cost. The [`origin!`](crate::origin!) macro
    /// does exactly this.
    #[track_caller]
    #[inline]
    pub fn from_marker<F: Fn()>(_marker: F) -> Self {
        let full_name = core::any::type_name::<F>();
        // Closure types render as "crate::module::function::{{closure}}"
        let name = full_name.strip_suffix("::{{closure}}").unwrap_or(full_name);
        Self::from_location(name, Location::caller())
    }

    /// Build an origin from an explicit function name and a std location.
    #[inline]
    pub(crate) fn from_location(function: &'static str, loc: &'static Location<'static>) -> Self {
        Self {
            function,
            file: loc.file(),
            line: loc.line(),
            column: loc.column(),
        }
    }

    /// Enclosing function path, or `""` when captured via
    /// [`caller()`](Self::caller).
    #[inline]
    pub fn function(&self) -> &'static str {
        self.function
    }

    /// Source file path, as the compiler saw it.
    #[inline]
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// 1-based line number.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// 1-based column number.
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Display for SourceOrigin {
    /// Renders as `` file(line:column) `function` ``, dropping the backticked
    /// segment when no function name was captured.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}:{})", self.file, self.line, self.column)?;
        if !self.function.is_empty() {
            write!(f, " `{}`", self.function)?;
        }
        Ok(())
    }
}
