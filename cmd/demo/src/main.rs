//! errlayer walkthrough
//!
//! Declares a `db` layer, a `net` layer on top of it, a few extensions, then
//! raises and catches them.
//!
//! # Environment Variables
//!
//! - `ERRLAYER_LOG_LEVEL=trace` - Log every raise to stderr
//! - `ERRLAYER_FLUSH_EPRINT=1` - Flush log output immediately

use errlayer::{catch, define_layer, ensure, raise, Raised, Result};

define_layer!(pub mod db: errlayer::root {
    errlayer::extend_kind!(pub CorruptPage = "corrupt_page": RuntimeError);
    errlayer::extend_kind!(pub BadChecksum = "bad_checksum": CorruptPage);
    errlayer::extend_system_kind!(pub OpenFailed = "open_failed": SystemError);
});

define_layer!(pub mod net: crate::db {
    errlayer::extend_system_kind!(pub ConnectFailed = "connect_failed": SystemError);
});

const PAGE_COUNT: u32 = 16;

fn read_page(n: u32) -> Result<u32> {
    ensure!(n < PAGE_COUNT, db::OutOfRangeError, "page {} of {}", n, PAGE_COUNT);
    if n == 7 {
        raise!(db::BadChecksum::new(format!("page {}", n)));
    }
    Ok(n * 4096)
}

fn open_table(path: &str) -> Result<std::fs::File> {
    match std::fs::File::open(path) {
        Ok(f) => Ok(f),
        Err(e) => match db::OpenFailed::from_io(&e) {
            Some(err) => raise!(err),
            None => raise!(db::RuntimeError::new(e.to_string())),
        },
    }
}

fn connect() -> Result<()> {
    raise!(net::ConnectFailed::with_message(111, "replica 2"));
}

fn report(label: &str, r: Result<impl std::fmt::Debug>) -> Result<()> {
    let err = match r {
        Ok(v) => {
            println!("{:<10} ok: {:?}", label, v);
            return Ok(());
        }
        Err(err) => err,
    };

    let how = catch!(err, {
        db::CorruptPage as e => format!("corrupt page, rebuild index ({})", e.what()),
        db::SystemError as e => format!("os error {} ({})", e.error_code(), e.what()),
        db::LogicError => "caller bug".to_string(),
    })?;
    println!("{:<10} {}", label, how);
    Ok(())
}

fn main() {
    println!("=== errlayer demo ===\n");

    let outcomes = [
        report("page 3", read_page(3)),
        report("page 7", read_page(7)),
        report("open", open_table("/nonexistent/table.db")),
        report("connect", connect()),
        report("page 99", read_page(99)),
    ];

    for r in outcomes.into_iter().filter_map(|r| r.err()) {
        print_unhandled(&r);
    }
}

fn print_unhandled(err: &Raised) {
    println!("\nunhandled: {}", err);
    println!("  kind chain:");
    for k in err.kind_id().ancestors() {
        println!("    {:?}", k);
    }
    if let Some((file, line)) = err.location() {
        println!("  raised at {}:{}", file, line);
    }
    println!("  is db::Exception: {}", err.is::<db::Exception>());
    println!("  concrete: {:?}", err.get_ref().kind_id());
}
