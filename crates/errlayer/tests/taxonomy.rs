//! Layer declaration, extension and catch behaviour, exercised from outside
//! the crate the way a consumer would.

use errlayer::os::describe;
use errlayer::{catch, define_layer, ensure, raise, Kind, MessageKind, Raised, Result};

const REPEAT_NUM: usize = 100;

define_layer!(pub mod db: errlayer::root {
    errlayer::extend_kind!(pub CustomLogicError = "custom_logic_error": LogicError);
    errlayer::extend_kind!(pub CustomInvalidArgument = "custom_invalid_argument": InvalidArgument);
    errlayer::extend_kind!(pub CustomDomainError = "custom_domain_error": DomainError);
    errlayer::extend_kind!(pub CustomLengthError = "custom_length_error": LengthError);
    errlayer::extend_kind!(pub CustomOutOfRangeError = "custom_out_of_range_error": OutOfRangeError);

    errlayer::extend_kind!(pub CustomRuntimeError = "custom_runtime_error": RuntimeError);
    errlayer::extend_kind!(pub CustomRangeError = "custom_range_error": RangeError);
    errlayer::extend_kind!(pub CustomOverflowError = "custom_overflow_error": OverflowError);
    errlayer::extend_kind!(pub CustomUnderflowError = "custom_underflow_error": UnderflowError);

    errlayer::extend_system_kind!(pub CustomSystemError = "custom_system_error": SystemError);
    errlayer::extend_system_kind!(pub ShortRead = "short_read": CustomSystemError);
});

define_layer!(pub mod net: crate::db);

/// Deterministic pseudo-random codes in the same range the platform table covers.
fn codes() -> impl Iterator<Item = i32> {
    let mut x: u32 = 0x2545_f491;
    (0..REPEAT_NUM).map(move |_| {
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        (x % 133) as i32
    })
}

fn check_layer_kind<K: MessageKind>(name: &str) {
    let msg = format!("{} occurred", name);
    let e = K::from_message(msg.clone());
    assert_eq!(e.what(), format!("{} {{ {} }}", name, msg));

    let r = Raised::new(e);
    assert!(r.is::<K>());
    assert!(r.is::<db::Exception>());
    assert!(r.is::<errlayer::root::Exception>());
    assert!(r.downcast_ref::<K>().is_some());
}

fn check_extension<K: MessageKind, P: MessageKind>(name: &str) {
    let msg = format!("{} occurred", name);
    let e = K::from_message(msg.clone());
    let parent = P::from_message(format!("{} {{ {} }}", name, msg));
    assert_eq!(e.what(), parent.what());
    assert!(e.what().contains(&format!("{} {{ {} }}", name, msg)));

    let r = Raised::new(e);
    assert!(r.is::<K>());
    assert!(r.is::<P>());
    assert!(r.is::<db::Exception>());
    assert_eq!(r.downcast_ref::<P>().map(|p| p.what()), Some(parent.what()));
}

#[test]
fn layer_kinds_render_their_name_outermost() {
    for _ in 0..REPEAT_NUM {
        check_layer_kind::<db::LogicError>("logic_error");
        check_layer_kind::<db::InvalidArgument>("invalid_argument");
        check_layer_kind::<db::DomainError>("domain_error");
        check_layer_kind::<db::LengthError>("length_error");
        check_layer_kind::<db::OutOfRangeError>("out_of_range_error");

        check_layer_kind::<db::RuntimeError>("runtime_error");
        check_layer_kind::<db::RangeError>("range_error");
        check_layer_kind::<db::OverflowError>("overflow_error");
        check_layer_kind::<db::UnderflowError>("underflow_error");
    }
}

#[test]
fn extensions_nest_inside_parent() {
    check_extension::<db::CustomLogicError, db::LogicError>("custom_logic_error");
    check_extension::<db::CustomInvalidArgument, db::InvalidArgument>("custom_invalid_argument");
    check_extension::<db::CustomDomainError, db::DomainError>("custom_domain_error");
    check_extension::<db::CustomLengthError, db::LengthError>("custom_length_error");
    check_extension::<db::CustomOutOfRangeError, db::OutOfRangeError>("custom_out_of_range_error");

    check_extension::<db::CustomRuntimeError, db::RuntimeError>("custom_runtime_error");
    check_extension::<db::CustomRangeError, db::RangeError>("custom_range_error");
    check_extension::<db::CustomOverflowError, db::OverflowError>("custom_overflow_error");
    check_extension::<db::CustomUnderflowError, db::UnderflowError>("custom_underflow_error");
}

#[test]
fn system_error_default_and_custom_message() {
    for code in codes() {
        let e = db::SystemError::new(code);
        assert_eq!(
            e.what(),
            format!("system_error {{ system error occurred }} : {}", describe(code))
        );
        assert_eq!(e.error_code(), code);

        let e = db::SystemError::with_message(code, "custom system error text");
        assert_eq!(
            e.what(),
            format!("system_error {{ custom system error text }} : {}", describe(code))
        );
        assert_eq!(e.error_code(), code);
    }
}

#[test]
fn extended_system_error_default_and_custom_message() {
    for code in codes() {
        let e = db::CustomSystemError::new(code);
        assert_eq!(
            e.what(),
            format!(
                "system_error {{ custom_system_error {{ system error occurred }} }} : {}",
                describe(code)
            )
        );
        assert_eq!(e.error_code(), code);

        let e = db::CustomSystemError::with_message(code, "custom system error text");
        assert_eq!(
            e.what(),
            format!(
                "system_error {{ custom_system_error {{ custom system error text }} }} : {}",
                describe(code)
            )
        );
        assert_eq!(e.error_code(), code);
    }
}

#[test]
fn system_extension_of_extension() {
    for code in codes() {
        let e = db::ShortRead::with_message(code, "m");
        assert_eq!(
            e.what(),
            format!(
                "system_error {{ custom_system_error {{ short_read {{ m }} }} }} : {}",
                describe(code)
            )
        );
        assert_eq!(e.error_code(), code);
        assert_eq!(e.base().error_code(), code);

        let r = Raised::new(e);
        assert_eq!(r.error_code(), Some(code));
        assert!(r.is::<db::CustomSystemError>());
        assert!(r.is::<db::SystemError>());
        assert_eq!(r.downcast_ref::<db::SystemError>().map(|s| s.error_code()), Some(code));
    }
}

#[test]
fn domain_error_caught_as_layer_exception() {
    fn check(x: i32) -> Result<i32> {
        ensure!(x < 10, db::DomainError::new("x out of bounds"));
        Ok(x)
    }

    let handled = catch!(check(11).unwrap_err(), {
        db::Exception => "caught",
    });
    assert_eq!(handled.ok(), Some("caught"));
    assert_eq!(check(11).unwrap_err().to_string(), "domain_error { x out of bounds }");
    assert_eq!(check(3).ok(), Some(3));
}

#[test]
fn custom_system_error_code_two() {
    fn open() -> Result<()> {
        raise!(db::CustomSystemError::new(2));
    }

    let r = open().unwrap_err();
    assert_eq!(
        r.what(),
        format!(
            "system_error {{ custom_system_error {{ system error occurred }} }} : {}",
            describe(2)
        )
    );
    let code = catch!(r, {
        db::CustomSystemError as e => e.error_code(),
    });
    assert_eq!(code.ok(), Some(2));
}

#[cfg(target_os = "linux")]
#[test]
fn custom_system_error_linux_text() {
    assert_eq!(
        db::CustomSystemError::new(2).what(),
        "system_error { custom_system_error { system error occurred } } : No such file or directory"
    );
}

#[cfg(unix)]
#[test]
fn errno_accessor() {
    use errlayer::os::Errno;

    let e = db::CustomSystemError::new(Errno::ENOENT as i32);
    assert_eq!(e.errno(), Errno::ENOENT);
    assert_eq!(e.base().errno(), Errno::ENOENT);
}

#[test]
fn from_io_error() {
    let io = std::io::Error::from_raw_os_error(13);
    let e = db::SystemError::from_io(&io).map(|e| e.error_code());
    assert_eq!(e, Some(13));

    let custom = std::io::Error::new(std::io::ErrorKind::Other, "not an os error");
    assert!(db::CustomSystemError::from_io(&custom).is_none());
}

#[test]
fn stacked_layer_catchable_as_parent_layer() {
    let r = Raised::new(net::UnderflowError::new("u"));
    assert!(r.is::<net::Exception>());
    assert!(r.is::<db::Exception>());
    assert!(r.is::<errlayer::root::Exception>());
    assert!(!r.is::<db::UnderflowError>());
    assert_eq!(net::UnderflowError::ID.depth(), 3);
}

#[test]
fn siblings_do_not_catch_each_other() {
    let r = Raised::new(db::CustomRangeError::new("r"));
    assert!(!r.is::<db::RuntimeError>());
    assert!(!r.is::<db::OverflowError>());
    assert!(!r.is::<db::CustomRuntimeError>());
    assert!(r.downcast_ref::<db::LogicError>().is_none());
}

#[test]
fn repeated_construction_is_identical() {
    let first = db::CustomOverflowError::new("carry").what().to_string();
    for _ in 0..REPEAT_NUM {
        assert_eq!(db::CustomOverflowError::new("carry").what(), first);
        assert_eq!(db::SystemError::new(5).what(), db::SystemError::new(5).what());
    }
}

#[test]
fn concurrent_raise_and_catch() {
    std::thread::scope(|s| {
        for t in 0..8 {
            s.spawn(move || {
                for code in codes() {
                    let code = (code + t) % 133;
                    let r: Raised = db::CustomSystemError::with_message(code, format!("t{}", t)).into();
                    let expected = format!(
                        "system_error {{ custom_system_error {{ t{} }} }} : {}",
                        t,
                        describe(code)
                    );
                    assert_eq!(r.what(), expected);
                    assert_eq!(r.error_code(), Some(code));
                }
            });
        }
    });
}

#[test]
fn unmatched_catch_hands_error_back() {
    fn layer() -> Result<&'static str> {
        let v = catch!(db::CustomLengthError::new("long"), {
            db::RuntimeError => "runtime",
            db::SystemError => "system",
        })?;
        Ok(v)
    }

    let r = layer().unwrap_err();
    assert!(r.is::<db::CustomLengthError>());
    assert_eq!(r.what(), "length_error { custom_length_error { long } }");
    assert_eq!(r.get_ref().kind_id(), db::CustomLengthError::ID);
}
