//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest, plus a way to
//! capture log output.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a registry version key (`major.minor.patch`)
    pub fn version_key() -> impl Strategy<Value = String> {
        (0u32..20, 0u32..100, 0u32..1000)
            .prop_map(|(major, minor, patch)| format!("{major}.{minor}.{patch}"))
    }

    /// Generate a registry subkey that is not a version key
    pub fn non_version_key() -> impl Strategy<Value = String> {
        prop_oneof![
            "[A-Za-z][A-Za-z ]{0,15}",
            (0u32..20, 0u32..100).prop_map(|(a, b)| format!("{a}.{b}")),
            (0u32..20, 0u32..100, 0u32..100, 0u32..10)
                .prop_map(|(a, b, c, d)| format!("{a}.{b}.{c}.{d}")),
        ]
    }

    /// Generate a command-line argument, sometimes containing whitespace,
    /// quotes or backslashes
    pub fn argument() -> impl Strategy<Value = String> {
        prop_oneof![
            "[A-Za-z0-9_=./:-]{1,12}",
            "[A-Za-z0-9]{1,6} [A-Za-z0-9]{1,6}",
            r#"[A-Za-z0-9"\\]{1,8}"#,
        ]
    }
}

#[cfg(test)]
pub mod logging {
    use std::io;
    use std::sync::{Arc, Mutex, PoisonError};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` and return what it logged at warning level or above
    pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .without_time()
            .finish();

        let result = tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.0.lock().unwrap_or_else(PoisonError::into_inner).clone();
        (result, String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use crate::core::version::is_version_key;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_version_key_generator(key in version_key()) {
            prop_assert!(is_version_key(&key));
        }

        #[test]
        fn test_non_version_key_generator(key in non_version_key()) {
            prop_assert!(!is_version_key(&key));
        }

        #[test]
        fn test_argument_generator(arg in argument()) {
            prop_assert!(!arg.is_empty());
        }
    }
}
