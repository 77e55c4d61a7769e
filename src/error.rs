use std::{fmt, result};

/// Error variants produced by this crate.
///
/// Each variant carries a `"{file}:{line}"` location string (filled in
/// by the [err_at] macro) and a human message. `NotFound` is
/// deliberately absent here: per-record lookups signal absence with
/// `Option`, not an `Err`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Error {
    FileOpenError(String, String),
    IOError(String, String),
    InvalidFile(String, String),
    ParseError(String, String),
    EmptyInput(String, String),
    Fatal(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::FileOpenError(p, msg) => write!(f, "{} FileOpenError: {}", p, msg),
            Error::IOError(p, msg) => write!(f, "{} IOError: {}", p, msg),
            Error::InvalidFile(p, msg) => write!(f, "{} InvalidFile: {}", p, msg),
            Error::ParseError(p, msg) => write!(f, "{} ParseError: {}", p, msg),
            Error::EmptyInput(p, msg) => write!(f, "{} EmptyInput: {}", p, msg),
            Error::Fatal(p, msg) => write!(f, "{} Fatal: {}", p, msg),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

/// Construct or translate an `Error` with a `"{file}:{line}"` prefix.
///
/// Two shapes:
/// * `err_at!(Variant, result_expr)` — maps `Err(e)` of `result_expr`
///   into `Error::Variant(prefix, format!("{}", e))`, passes `Ok` through.
/// * `err_at!(Variant, msg: "fmt", args...)` — builds an `Err` directly.
#[macro_export]
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err($crate::Error::$v(prefix, format!($($arg),+)))
    }};
    ($v:ident, $e:expr) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err($crate::Error::$v(prefix, format!("{}", err)))
            }
        }
    }};
    ($v:ident, $e:expr, $($arg:expr),+) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                let msg = format!($($arg),+);
                Err($crate::Error::$v(prefix, format!("{}: {}", msg, err)))
            }
        }
    }};
}
