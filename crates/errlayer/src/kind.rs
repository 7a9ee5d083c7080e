use std::any::Any;
use std::error::Error;

use crate::KindId;

/// Message used by system kinds when the caller gives none.
pub const DEFAULT_SYSTEM_MESSAGE: &str = "system error occurred";

/// Rendered name of every layer's system kind.
pub const SYSTEM_ERROR_NAME: &str = "system_error";

/// Signature of an errno description function.
///
/// Must be reentrant: system kinds call it at construction time, possibly
/// from many threads at once.
pub type Describe = fn(i32) -> String;

/// A declared kind, at the type level.
///
/// Implemented by every generated error type and by the uninhabited
/// `Exception` marker of each layer, which is how a handler can name a
/// layer-wide capability that has no instances of its own.
pub trait Kind: 'static {
    const ID: &'static KindId;
}

/// A constructed error, at the value level.
///
/// Object safe; [`Raised`](crate::Raised) stores `Box<dyn ErrorKind>`.
pub trait ErrorKind: Error + Send + Sync + 'static {
    /// Descriptor of the concrete kind.
    fn kind_id(&self) -> &'static KindId;

    /// Fully rendered message.
    fn what(&self) -> &str;

    /// The parent instance this kind wraps, for extensions.
    fn base(&self) -> Option<&dyn ErrorKind> {
        None
    }

    /// Numeric OS error code, for system kinds and their extensions.
    fn error_code(&self) -> Option<i32> {
        self.base().and_then(|b| b.error_code())
    }

    fn as_any(&self) -> &dyn Any;

    fn as_error(&self) -> &(dyn Error + 'static);

    /// True if this error is catchable as `ancestor`.
    fn is_a(&self, ancestor: &KindId) -> bool {
        self.kind_id().is_a(ancestor)
    }
}

/// Kinds constructed from a message alone.
pub trait MessageKind: Kind + ErrorKind + Sized {
    fn from_message(msg: String) -> Self;
}

/// Kinds constructed from an OS error code and a message.
pub trait SystemKind: Kind + ErrorKind + Sized {
    fn from_code(code: i32, msg: String) -> Self;

    /// The code given at construction, unchanged.
    fn code(&self) -> i32;
}

/// `"<name> { <msg> }"`
#[doc(hidden)]
pub fn wrap(name: &str, msg: &str) -> String {
    let mut out = String::with_capacity(name.len() + msg.len() + 5);
    out.push_str(name);
    out.push_str(" { ");
    out.push_str(msg);
    out.push_str(" }");
    out
}

/// `"system_error { <msg> } : <description>"`
#[doc(hidden)]
pub fn render_system(msg: &str, description: &str) -> String {
    let mut out = wrap(SYSTEM_ERROR_NAME, msg);
    out.push_str(" : ");
    out.push_str(description);
    out
}
