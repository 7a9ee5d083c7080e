//! Platform errno descriptions.
//!
//! [`describe`] is the default description function of every layer's
//! `SystemError`. It renders a code exactly the way the C library does
//! (`strerror`), but through `strerror_r` into a buffer owned by the caller,
//! so concurrent calls never share state.

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        pub use nix::errno::Errno;

        use std::ffi::CStr;
        use std::os::raw::c_char;

        const INITIAL_BUF: usize = 128;
        const MAX_BUF: usize = 4096;

        /// Standard platform text for an errno value.
        ///
        /// Unknown codes produce the C library's own fallback text
        /// (glibc: `"Unknown error N"`). Reentrant and thread-safe.
        pub fn describe(code: i32) -> String {
            let mut buf: Vec<c_char> = vec![0; INITIAL_BUF];
            loop {
                // libc binds the XSI-compliant variant, which fills `buf`
                // and returns 0 or an error number.
                let rc = unsafe { libc::strerror_r(code, buf.as_mut_ptr(), buf.len()) };
                let rc = if rc < 0 { Errno::last_raw() } else { rc };

                if rc == libc::ERANGE && buf.len() < MAX_BUF {
                    buf.resize(buf.len() * 2, 0);
                    continue;
                }

                // EINVAL (unknown code) still leaves the fallback text in `buf`.
                let text = unsafe { CStr::from_ptr(buf.as_ptr()) };
                if text.to_bytes().is_empty() {
                    lwarn!("strerror_r({}) returned {} with no text", code, rc);
                    return format!("Unknown error {}", code);
                }
                return text.to_string_lossy().into_owned();
            }
        }

        /// Symbolic errno for a raw code.
        #[inline]
        pub fn errno(code: i32) -> Errno {
            Errno::from_raw(code)
        }

        /// The calling thread's current errno value.
        #[inline]
        pub fn last_os_error_code() -> i32 {
            Errno::last_raw()
        }
    } else {
        /// Standard platform text for an OS error code.
        pub fn describe(code: i32) -> String {
            let text = std::io::Error::from_raw_os_error(code).to_string();
            let suffix = format!(" (os error {})", code);
            match text.strip_suffix(suffix.as_str()) {
                Some(stripped) => stripped.to_string(),
                None => text,
            }
        }

        /// The calling thread's last OS error code.
        #[inline]
        pub fn last_os_error_code() -> i32 {
            std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn known_codes_match_libc_table() {
        assert_eq!(describe(libc::ENOENT), Errno::ENOENT.desc());
        assert_eq!(describe(libc::EACCES), Errno::EACCES.desc());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_texts() {
        assert_eq!(describe(0), "Success");
        assert_eq!(describe(2), "No such file or directory");
        assert_eq!(describe(104), "Connection reset by peer");
    }

    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    #[test]
    fn unknown_code_gets_platform_fallback() {
        assert_eq!(describe(4242), "Unknown error 4242");
        assert_eq!(describe(-1), "Unknown error -1");
    }

    #[test]
    fn never_empty() {
        for code in -5..200 {
            assert!(!describe(code).is_empty(), "empty description for {}", code);
        }
    }

    #[test]
    fn errno_symbolic() {
        assert_eq!(errno(libc::ENOENT), Errno::ENOENT);
        assert_eq!(errno(libc::ECONNRESET), Errno::ECONNRESET);
    }

    #[test]
    fn last_error_follows_errno() {
        Errno::set_raw(libc::EINTR);
        assert_eq!(last_os_error_code(), libc::EINTR);
    }

    #[test]
    fn concurrent_describe_is_consistent() {
        let expected: Vec<String> = (0..64).map(describe).collect();
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..50 {
                        for (code, want) in expected.iter().enumerate() {
                            assert_eq!(&describe(code as i32), want);
                        }
                    }
                });
            }
        });
    }
}
