use std::error::Error;
use std::fmt;
use std::io;

use crate::{ErrorKind, Kind, KindId};

/// A signaled error on its way up the call stack.
///
/// Owns the error instance (boxed, any declared kind) plus where it was
/// raised. Every declared kind converts into `Raised`, so `?` lifts a
/// concrete kind into it; handlers then test it against any ancestor with
/// [`is`](Raised::is) or borrow it as a concrete kind with
/// [`downcast_ref`](Raised::downcast_ref).
///
/// `Display` is exactly the error's `what()` text.
///
/// # Features
///
/// - `production`: raise location is not recorded.
/// - `backtrace`: a backtrace is captured on every construction.
pub struct Raised {
    error: Box<dyn ErrorKind>,

    #[cfg(not(feature = "production"))]
    file: &'static str,
    #[cfg(not(feature = "production"))]
    line: u32,

    #[cfg(feature = "backtrace")]
    backtrace: String,
}

// ── Constructors ──────────────────────────────────────────────────

impl Raised {
    /// Wrap an error without location.
    pub fn new<E: ErrorKind>(error: E) -> Self {
        Self::at(error, "", 0)
    }

    /// Wrap an error raised at `file:line`.
    ///
    /// Prefer the `raise!` macro, which fills the location in.
    pub fn at<E: ErrorKind>(error: E, file: &'static str, line: u32) -> Self {
        ltrace!("raise {:?} at {}:{}: {}", error.kind_id(), file, line, error.what());

        Self {
            error: Box::new(error),

            #[cfg(not(feature = "production"))]
            file,
            #[cfg(not(feature = "production"))]
            line,

            #[cfg(feature = "backtrace")]
            backtrace: std::backtrace::Backtrace::capture().to_string(),
        }
    }
}

// ── Accessors ─────────────────────────────────────────────────────

impl Raised {
    /// Descriptor of the concrete kind that was raised.
    #[inline]
    pub fn kind_id(&self) -> &'static KindId {
        self.error.kind_id()
    }

    /// Fully rendered message.
    #[inline]
    pub fn what(&self) -> &str {
        self.error.what()
    }

    /// OS error code, if a system kind (or an extension of one) was raised.
    #[inline]
    pub fn error_code(&self) -> Option<i32> {
        self.error.error_code()
    }

    /// True if the raised error is catchable as `K`.
    ///
    /// `K` may be any ancestor: the concrete kind, a kind it extends, its
    /// layer's `Exception`, a parent layer's `Exception`, or
    /// `errlayer::root::Exception`.
    #[inline]
    pub fn is<K: Kind>(&self) -> bool {
        self.error.is_a(K::ID)
    }

    /// Borrow the raised error as `K`, if it is a `K` or extends one.
    ///
    /// Extensions hold their parent instance, so catching an extension as
    /// its parent yields the parent's own value, with the parent's API.
    pub fn downcast_ref<K: ErrorKind>(&self) -> Option<&K> {
        let mut cur: Option<&dyn ErrorKind> = Some(self.error.as_ref());
        while let Some(e) = cur {
            if let Some(k) = e.as_any().downcast_ref::<K>() {
                return Some(k);
            }
            cur = e.base();
        }
        None
    }

    /// Borrow the raised error.
    #[inline]
    pub fn get_ref(&self) -> &dyn ErrorKind {
        self.error.as_ref()
    }

    /// Source location of the raise, when recorded.
    pub fn location(&self) -> Option<(&'static str, u32)> {
        #[cfg(not(feature = "production"))]
        if !self.file.is_empty() {
            return Some((self.file, self.line));
        }
        None
    }

    #[cfg(feature = "backtrace")]
    pub fn backtrace(&self) -> &str {
        &self.backtrace
    }

    /// Consume and return the boxed error.
    pub fn into_inner(self) -> Box<dyn ErrorKind> {
        self.error
    }

    /// Fall-through of `catch!` when no arm matched.
    #[doc(hidden)]
    pub fn unhandled<T>(self) -> Result<T, Raised> {
        ldebug!("propagating unhandled {:?}: {}", self.kind_id(), self.what());
        Err(self)
    }
}

impl<E: ErrorKind> From<E> for Raised {
    fn from(error: E) -> Self {
        Raised::new(error)
    }
}

impl From<Raised> for io::Error {
    /// Wraps the raised error as a custom `io::Error` of kind `Other`.
    fn from(err: Raised) -> Self {
        io::Error::new(io::ErrorKind::Other, err)
    }
}

// ── std::error::Error ─────────────────────────────────────────────

impl Error for Raised {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.error.base().map(|b| b.as_error())
    }
}

impl fmt::Display for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.what())
    }
}

impl fmt::Debug for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Raised");
        d.field("kind", self.kind_id());
        d.field("what", &self.what());
        if let Some(code) = self.error_code() {
            d.field("code", &code);
        }
        if let Some((file, line)) = self.location() {
            d.field("location", &format_args!("{}:{}", file, line));
        }
        d.finish()
    }
}
