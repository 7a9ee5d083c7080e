//! The root taxonomy.
//!
//! Layers need a parent. `errlayer::root` is the one every taxonomy
//! ultimately hangs from: a single `Exception` capability with no parent.
//!
//! ```
//! errlayer::define_layer!(mod db: errlayer::root);
//!
//! let err = errlayer::Raised::new(db::LogicError::new("bad state"));
//! assert!(err.is::<db::Exception>());
//! assert!(err.is::<errlayer::root::Exception>());
//! ```

use crate::{Kind, KindId};

/// Catch-all capability shared by every declared kind.
pub enum Exception {}

impl Kind for Exception {
    const ID: &'static KindId = &KindId::new("exception", module_path!(), "Exception", None);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_has_no_parent() {
        assert!(Exception::ID.parent().is_none());
        assert_eq!(Exception::ID.depth(), 0);
        assert_eq!(Exception::ID.name(), "exception");
    }
}
