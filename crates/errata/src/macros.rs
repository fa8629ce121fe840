// Error handling macros
// Provides macros for raising errors with formatted messages

/// Return early with an error of the given kind
///
/// ```ignore
/// bail!(ErrorKind::InvalidOperation, "cannot close {} twice", name);
/// ```
#[macro_export]
macro_rules! bail {
    ($kind:expr, $($arg:tt)+) => {
        return ::core::result::Result::Err(
            $crate::SystemError::new($kind, ::core::option::Option::Some(::std::format!($($arg)+).as_str()))
                .raised()
                .into(),
        )
    };
}

/// Return early with an error if a condition is not satisfied
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $kind:expr, $($arg:tt)+) => {
        if !($cond) {
            $crate::bail!($kind, $($arg)+);
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{ErrorKind, Result};

    fn close(open: bool, name: &str) -> Result<()> {
        crate::ensure!(open, ErrorKind::ObjectDisposed, "{name} is already closed");
        Ok(())
    }

    fn lookup(index: usize) -> Result<&'static str> {
        if index > 1 {
            crate::bail!(ErrorKind::ArgumentRange, "index {index} is past the end");
        }
        Ok(["a", "b"][index])
    }

    #[test]
    fn test_ensure() {
        assert!(close(true, "socket").is_ok());
        let error = close(false, "socket").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ObjectDisposed);
        assert_eq!(error.message(), "socket is already closed");
    }

    #[test]
    fn test_bail() {
        assert_eq!(lookup(1).unwrap(), "b");
        let error = lookup(4).unwrap_err();
        assert_eq!(error.name(), "ArgumentRangeError");
        assert!(error.stack_trace()[0].contains(file!()));
    }

    #[test]
    fn test_bail_win32_keeps_docs_link() {
        fn open() -> Result<()> {
            crate::bail!(ErrorKind::Win32, "open failed");
        }
        let error = open().unwrap_err();
        assert_eq!(error.link(), Some(crate::WIN32_DOCS));
    }

    #[test]
    fn test_bail_into_anyhow() {
        fn run() -> anyhow::Result<()> {
            crate::bail!(ErrorKind::NotImplemented, "run");
        }
        let error = run().unwrap_err();
        assert_eq!(error.downcast_ref::<crate::SystemError>().unwrap().kind(), ErrorKind::NotImplemented);
    }
}
