// ── Layer Generator ───────────────────────────────────────────────

/// Declare a layer: a module holding one error kind per standard category.
///
/// # Forms
///
/// ```ignore
/// // Layer `db` under the root taxonomy
/// define_layer!(pub mod db: errlayer::root);
///
/// // Stacked on another layer: every `net` kind is also a `db::Exception`
/// define_layer!(pub mod net: db);
///
/// // Custom errno description (must be reentrant)
/// define_layer!(pub mod sim: errlayer::root, describe = sim_strerror);
///
/// // Extra items declared inside the layer module
/// define_layer!(pub mod db: errlayer::root {
///     errlayer::extend_kind!(pub Corrupt = "corrupt": RuntimeError);
/// });
/// ```
///
/// # Generated items
///
/// | Item              | Rendered text                                  |
/// |-------------------|------------------------------------------------|
/// | `Exception`       | root capability, never instantiated            |
/// | `LogicError`      | `logic_error { m }`                            |
/// | `InvalidArgument` | `invalid_argument { m }`                       |
/// | `DomainError`     | `domain_error { m }`                           |
/// | `LengthError`     | `length_error { m }`                           |
/// | `OutOfRangeError` | `out_of_range_error { m }`                     |
/// | `RuntimeError`    | `runtime_error { m }`                          |
/// | `RangeError`      | `range_error { m }`                            |
/// | `OverflowError`   | `overflow_error { m }`                         |
/// | `UnderflowError`  | `underflow_error { m }`                        |
/// | `SystemError`     | `system_error { m } : <describe(code)>`        |
/// | `NAME`            | the layer identifier as a `&str`               |
///
/// The parent path is resolved as written at the invocation site, so layers
/// must be declared at module level, not inside a function body.
#[macro_export]
macro_rules! define_layer {
    ($vis:vis mod $layer:ident : $($parent:ident)::+ , describe = $describe:path
     $({ $($body:tt)* })?) => {
        $crate::__define_layer! {
            [$vis] $layer [$($parent)::+] [$describe] [$($($body)*)?]
        }
    };

    ($vis:vis mod $layer:ident : $($parent:ident)::+ $({ $($body:tt)* })?) => {
        $crate::__define_layer! {
            [$vis] $layer [$($parent)::+] [$crate::os::describe] [$($($body)*)?]
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __define_layer {
    ([$vis:vis] $layer:ident [$($parent:ident)::+] [$describe:path] [$($body:tt)*]) => {
        #[allow(dead_code)]
        $vis mod $layer {
            #[allow(unused_imports)]
            use super::*;

            /// Name of this layer.
            pub const NAME: &str = stringify!($layer);

            /// Root capability of the layer. Has no values; name it in a
            /// handler to catch every kind declared here.
            pub enum Exception {}

            impl $crate::Kind for Exception {
                const ID: &'static $crate::KindId = &$crate::KindId::new(
                    "exception",
                    module_path!(),
                    "Exception",
                    ::core::option::Option::Some(<$($parent)::+::Exception as $crate::Kind>::ID),
                );
            }

            $crate::__layer_kind!(LogicError = "logic_error");
            $crate::__layer_kind!(InvalidArgument = "invalid_argument");
            $crate::__layer_kind!(DomainError = "domain_error");
            $crate::__layer_kind!(LengthError = "length_error");
            $crate::__layer_kind!(OutOfRangeError = "out_of_range_error");

            $crate::__layer_kind!(RuntimeError = "runtime_error");
            $crate::__layer_kind!(RangeError = "range_error");
            $crate::__layer_kind!(OverflowError = "overflow_error");
            $crate::__layer_kind!(UnderflowError = "underflow_error");

            $crate::__layer_system_kind!($describe);

            $($body)*
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __layer_kind {
    ($ty:ident = $name:literal) => {
        #[doc = concat!("`", $name, "`, is-a this layer's [`Exception`].")]
        #[derive(Clone, PartialEq, Eq)]
        pub struct $ty {
            what: ::std::string::String,
        }

        impl $ty {
            #[doc = concat!("Renders `\"", $name, " { <msg> }\"`.")]
            pub fn new(msg: impl ::core::convert::Into<::std::string::String>) -> Self {
                let msg: ::std::string::String = msg.into();
                Self { what: $crate::__private::wrap($name, &msg) }
            }

            #[inline]
            pub fn what(&self) -> &str {
                &self.what
            }
        }

        impl $crate::Kind for $ty {
            const ID: &'static $crate::KindId = &$crate::KindId::new(
                $name,
                module_path!(),
                stringify!($ty),
                ::core::option::Option::Some(<Exception as $crate::Kind>::ID),
            );
        }

        impl $crate::MessageKind for $ty {
            fn from_message(msg: ::std::string::String) -> Self {
                Self::new(msg)
            }
        }

        impl $crate::ErrorKind for $ty {
            fn kind_id(&self) -> &'static $crate::KindId {
                <Self as $crate::Kind>::ID
            }

            fn what(&self) -> &str {
                &self.what
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            fn as_error(&self) -> &(dyn ::std::error::Error + 'static) {
                self
            }
        }

        impl ::std::error::Error for $ty {}

        $crate::__kind_fmt!($ty);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __layer_system_kind {
    ($describe:path) => {
        /// `system_error`, is-a this layer's [`Exception`]. Carries an OS
        /// error code and renders its platform description.
        #[derive(Clone, PartialEq, Eq)]
        pub struct SystemError {
            what: ::std::string::String,
            code: i32,
        }

        impl SystemError {
            pub const DEFAULT_MESSAGE: &'static str = $crate::DEFAULT_SYSTEM_MESSAGE;

            /// `code` with the default message.
            pub fn new(code: i32) -> Self {
                Self::with_message(code, Self::DEFAULT_MESSAGE)
            }

            /// Renders `"system_error { <msg> } : <description of code>"`.
            pub fn with_message(code: i32, msg: impl ::core::convert::Into<::std::string::String>) -> Self {
                let describe: $crate::Describe = $describe;
                let msg: ::std::string::String = msg.into();
                Self {
                    what: $crate::__private::render_system(&msg, &describe(code)),
                    code,
                }
            }

            /// Built from the calling thread's current errno.
            pub fn last_os_error() -> Self {
                Self::new($crate::os::last_os_error_code())
            }

            /// Built from an I/O error, if it carries a raw OS code.
            pub fn from_io(err: &::std::io::Error) -> ::core::option::Option<Self> {
                err.raw_os_error().map(Self::new)
            }

            #[inline]
            pub fn what(&self) -> &str {
                &self.what
            }

            /// The code given at construction.
            #[inline]
            pub fn error_code(&self) -> i32 {
                self.code
            }

            #[cfg(unix)]
            pub fn errno(&self) -> $crate::os::Errno {
                $crate::os::errno(self.code)
            }
        }

        impl $crate::Kind for SystemError {
            const ID: &'static $crate::KindId = &$crate::KindId::new(
                $crate::SYSTEM_ERROR_NAME,
                module_path!(),
                "SystemError",
                ::core::option::Option::Some(<Exception as $crate::Kind>::ID),
            );
        }

        impl $crate::SystemKind for SystemError {
            fn from_code(code: i32, msg: ::std::string::String) -> Self {
                Self::with_message(code, msg)
            }

            fn code(&self) -> i32 {
                self.code
            }
        }

        impl $crate::ErrorKind for SystemError {
            fn kind_id(&self) -> &'static $crate::KindId {
                <Self as $crate::Kind>::ID
            }

            fn what(&self) -> &str {
                &self.what
            }

            fn error_code(&self) -> ::core::option::Option<i32> {
                ::core::option::Option::Some(self.code)
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            fn as_error(&self) -> &(dyn ::std::error::Error + 'static) {
                self
            }
        }

        impl ::std::error::Error for SystemError {}

        $crate::__kind_fmt!(SystemError);
    };
}

// ── Kind Extender ─────────────────────────────────────────────────

/// Declare a new kind that is-a an existing message kind.
///
/// `Type::new(m)` builds the parent from `"<name> { m }"`, so each extension
/// nests the message one level deeper:
///
/// ```ignore
/// extend_kind!(pub Corrupt = "corrupt": db::RuntimeError);
/// extend_kind!(pub BadPage: Corrupt); // rendered name "BadPage"
///
/// assert_eq!(BadPage::new("p7").what(),
///            "runtime_error { corrupt { BadPage { p7 } } }");
/// ```
///
/// The rendered name defaults to the type identifier.
#[macro_export]
macro_rules! extend_kind {
    ($(#[$meta:meta])* $vis:vis $ty:ident = $name:literal : $parent:path) => {
        $crate::__extend_kind! { [$(#[$meta])*] [$vis] $ty [$name] [$parent] }
    };

    ($(#[$meta:meta])* $vis:vis $ty:ident : $parent:path) => {
        $crate::__extend_kind! { [$(#[$meta])*] [$vis] $ty [stringify!($ty)] [$parent] }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __extend_kind {
    ([$(#[$meta:meta])*] [$vis:vis] $ty:ident [$name:expr] [$parent:path]) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq)]
        $vis struct $ty {
            base: $parent,
        }

        #[allow(dead_code)]
        impl $ty {
            pub fn new(msg: impl ::core::convert::Into<::std::string::String>) -> Self {
                let msg: ::std::string::String = msg.into();
                Self {
                    base: <$parent as $crate::MessageKind>::from_message(
                        $crate::__private::wrap($name, &msg),
                    ),
                }
            }

            #[inline]
            pub fn what(&self) -> &str {
                $crate::ErrorKind::what(&self.base)
            }

            /// This error seen as its parent kind.
            #[inline]
            pub fn base(&self) -> &$parent {
                &self.base
            }

            pub fn into_base(self) -> $parent {
                self.base
            }
        }

        $crate::__extension_common!($ty, $name, $parent);

        impl $crate::MessageKind for $ty {
            fn from_message(msg: ::std::string::String) -> Self {
                Self::new(msg)
            }
        }
    };
}

/// Declare a new kind that is-a an existing system kind.
///
/// `Type::new(code)` and `Type::with_message(code, msg)` forward
/// `(code, "<name> { msg }")` to the parent; the code is kept unchanged:
///
/// ```ignore
/// extend_system_kind!(pub OpenFailed = "open_failed": db::SystemError);
///
/// let e = OpenFailed::new(2);
/// assert_eq!(e.error_code(), 2);
/// // "system_error { open_failed { system error occurred } } : No such file or directory"
/// ```
#[macro_export]
macro_rules! extend_system_kind {
    ($(#[$meta:meta])* $vis:vis $ty:ident = $name:literal : $parent:path) => {
        $crate::__extend_system_kind! { [$(#[$meta])*] [$vis] $ty [$name] [$parent] }
    };

    ($(#[$meta:meta])* $vis:vis $ty:ident : $parent:path) => {
        $crate::__extend_system_kind! { [$(#[$meta])*] [$vis] $ty [stringify!($ty)] [$parent] }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __extend_system_kind {
    ([$(#[$meta:meta])*] [$vis:vis] $ty:ident [$name:expr] [$parent:path]) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq)]
        $vis struct $ty {
            base: $parent,
        }

        #[allow(dead_code)]
        impl $ty {
            /// `code` with the default message.
            pub fn new(code: i32) -> Self {
                Self::with_message(code, $crate::DEFAULT_SYSTEM_MESSAGE)
            }

            pub fn with_message(code: i32, msg: impl ::core::convert::Into<::std::string::String>) -> Self {
                let msg: ::std::string::String = msg.into();
                Self {
                    base: <$parent as $crate::SystemKind>::from_code(
                        code,
                        $crate::__private::wrap($name, &msg),
                    ),
                }
            }

            /// Built from the calling thread's current errno.
            pub fn last_os_error() -> Self {
                Self::new($crate::os::last_os_error_code())
            }

            /// Built from an I/O error, if it carries a raw OS code.
            pub fn from_io(err: &::std::io::Error) -> ::core::option::Option<Self> {
                err.raw_os_error().map(Self::new)
            }

            #[inline]
            pub fn what(&self) -> &str {
                $crate::ErrorKind::what(&self.base)
            }

            #[inline]
            pub fn error_code(&self) -> i32 {
                $crate::SystemKind::code(&self.base)
            }

            #[cfg(unix)]
            pub fn errno(&self) -> $crate::os::Errno {
                $crate::os::errno(self.error_code())
            }

            /// This error seen as its parent kind.
            #[inline]
            pub fn base(&self) -> &$parent {
                &self.base
            }

            pub fn into_base(self) -> $parent {
                self.base
            }
        }

        $crate::__extension_common!($ty, $name, $parent);

        impl $crate::SystemKind for $ty {
            fn from_code(code: i32, msg: ::std::string::String) -> Self {
                Self::with_message(code, msg)
            }

            fn code(&self) -> i32 {
                self.error_code()
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __extension_common {
    ($ty:ident, $name:expr, $parent:path) => {
        impl $crate::Kind for $ty {
            const ID: &'static $crate::KindId = &$crate::KindId::new(
                $name,
                module_path!(),
                stringify!($ty),
                ::core::option::Option::Some(<$parent as $crate::Kind>::ID),
            );
        }

        impl $crate::ErrorKind for $ty {
            fn kind_id(&self) -> &'static $crate::KindId {
                <Self as $crate::Kind>::ID
            }

            fn what(&self) -> &str {
                $crate::ErrorKind::what(&self.base)
            }

            fn base(&self) -> ::core::option::Option<&dyn $crate::ErrorKind> {
                ::core::option::Option::Some(&self.base)
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            fn as_error(&self) -> &(dyn ::std::error::Error + 'static) {
                self
            }
        }

        impl ::std::error::Error for $ty {
            fn source(&self) -> ::core::option::Option<&(dyn ::std::error::Error + 'static)> {
                ::core::option::Option::Some(&self.base)
            }
        }

        $crate::__kind_fmt!($ty);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __kind_fmt {
    ($ty:ident) => {
        impl ::core::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str($crate::ErrorKind::what(self))
            }
        }

        impl ::core::fmt::Debug for $ty {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_tuple(stringify!($ty))
                    .field(&$crate::ErrorKind::what(self))
                    .finish()
            }
        }
    };
}

// ── Use sites ─────────────────────────────────────────────────────

/// Return early with a declared kind, recording where it was raised.
///
/// # Forms
///
/// ```ignore
/// // Any constructed kind
/// raise!(db::SystemError::new(libc::ENOENT));
///
/// // Message kind + format arguments
/// raise!(db::DomainError, "x = {} out of bounds", x);
/// ```
///
/// The enclosing function must return `Result<_, E>` with
/// `E: From<Raised>` (usually `errlayer::Result<_>`).
#[macro_export]
macro_rules! raise {
    ($error:expr) => {
        return ::core::result::Result::Err(::core::convert::From::from(
            $crate::Raised::at($error, file!(), line!()),
        ))
    };

    ($kind:path, $($arg:tt)+) => {
        $crate::raise!(<$kind as $crate::MessageKind>::from_message(
            ::std::format!($($arg)+)
        ))
    };
}

/// Raise unless a condition holds.
///
/// ```ignore
/// ensure!(len <= MAX, db::LengthError, "len {} > {}", len, MAX);
/// ensure!(fd >= 0, db::SystemError::last_os_error());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($rest:tt)+) => {
        if !$cond {
            $crate::raise!($($rest)+);
        }
    };
}

/// Handle a raised error by naming its kind or any ancestor.
///
/// Arms are tried in order:
///
/// - `K as e => ..` binds `e: &K` when the error is a `K` (or extends one).
/// - `K => ..` matches any `Kind`, including a layer's `Exception`.
/// - `_ => ..` matches everything.
///
/// Evaluates to `Result<T, Raised>`: `Ok` with the arm's value, or `Err` with
/// the untouched error when nothing matched, ready to propagate with `?`.
///
/// ```ignore
/// let n = catch!(err, {
///     db::CustomSystemError as e => e.error_code(),
///     db::Exception => -1,
/// })?;
/// ```
#[macro_export]
macro_rules! catch {
    ($raised:expr, { $($arms:tt)* }) => {{
        let __raised: $crate::Raised = ::core::convert::Into::into($raised);
        $crate::__catch_arms!(__raised; $($arms)*)
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __catch_arms {
    ($r:ident; ) => {
        $r.unhandled()
    };

    ($r:ident; _ => $handler:expr $(, $($rest:tt)*)?) => {
        ::core::result::Result::Ok::<_, $crate::Raised>($handler)
    };

    ($r:ident; $kind:path as $bind:ident => $handler:expr $(, $($rest:tt)*)?) => {
        if let ::core::option::Option::Some($bind) = $r.downcast_ref::<$kind>() {
            ::core::result::Result::Ok::<_, $crate::Raised>($handler)
        } else {
            $crate::__catch_arms!($r; $($($rest)*)?)
        }
    };

    ($r:ident; $kind:path => $handler:expr $(, $($rest:tt)*)?) => {
        if $r.is::<$kind>() {
            ::core::result::Result::Ok::<_, $crate::Raised>($handler)
        } else {
            $crate::__catch_arms!($r; $($($rest)*)?)
        }
    };
}
