//! # errlayer: layered error taxonomies
//!
//! Declare, per module, a family of distinct error kinds mirroring the
//! standard categories (logic, invalid argument, domain, length, out of
//! range, runtime, range, overflow, underflow) plus an OS system error
//! carrying an errno. Extend any of them with domain-specific kinds that
//! stay catchable as their parent.
//!
//! ## Design
//!
//! Every declared kind is a plain struct with a static [`KindId`] linked to
//! its parent's. Catching walks that chain, so a handler can name the exact
//! kind, any kind it extends, the layer's `Exception`, a parent layer's
//! `Exception`, or [`root::Exception`].
//!
//! Messages nest deterministically: a kind's own name is always the
//! outermost wrapper, and each extension adds one level inside its parent's.
//!
//! ## Quick Start
//!
//! ```rust
//! use errlayer::{catch, define_layer, raise, Result};
//!
//! define_layer!(pub mod db: errlayer::root {
//!     errlayer::extend_system_kind!(pub CustomSystemError = "custom_system_error": SystemError);
//! });
//!
//! fn lookup(x: i32) -> Result<i32> {
//!     if x > 10 {
//!         raise!(db::DomainError::new("x out of bounds"));
//!     }
//!     Ok(x)
//! }
//!
//! let err = lookup(11).unwrap_err();
//! assert!(err.is::<db::Exception>());
//! assert_eq!(err.to_string(), "domain_error { x out of bounds }");
//!
//! let code = catch!(db::CustomSystemError::new(2), {
//!     db::SystemError as e => e.error_code(),
//! });
//! assert_eq!(code.ok(), Some(2));
//! ```
//!
//! ## Feature Flags
//!
//! | Flag         | Effect |
//! |--------------|--------|
//! | `production` | `Raised` does not record the raise location |
//! | `backtrace`  | Captures `std::backtrace::Backtrace` on every raise |
//!
//! ## Environment
//!
//! | Variable                | Effect |
//! |-------------------------|--------|
//! | `ERRLAYER_LOG_LEVEL`    | off, error, warn (default), info, debug, trace |
//! | `ERRLAYER_FLUSH_EPRINT` | flush stderr after each log line |

#[macro_use]
mod log;

mod env;
mod id;
mod kind;
mod raised;
#[macro_use]
mod macros;

pub mod os;
pub mod root;

// ── Public API ────────────────────────────────────────────────────

pub use id::{Ancestors, KindId};
pub use kind::{
    Describe, ErrorKind, Kind, MessageKind, SystemKind, DEFAULT_SYSTEM_MESSAGE, SYSTEM_ERROR_NAME,
};
pub use log::{log_level, set_flush_enabled, set_log_level, LogLevel};
pub use raised::Raised;

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Raised>;

#[doc(hidden)]
pub mod __private {
    pub use crate::kind::{render_system, wrap};
}
