//! Diagnostics for registration, inference and header generation.
//!
//! `ASCIR_TRACE=1` shows warnings and errors, `ASCIR_TRACE=full` adds
//! lookup misses and per-operator tracing. Critical lines always print.
use std::env;
use std::fmt::Arguments;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Verbosity {
    Off,
    Basic,
    Full,
}

impl Verbosity {
    fn from_env() -> Self {
        let value = env::var("ASCIR_TRACE").map(|value| value.trim().to_ascii_lowercase());
        match value.as_deref() {
            Ok("1") => Verbosity::Basic,
            Ok("full") => Verbosity::Full,
            _ => Verbosity::Off,
        }
    }
}

#[derive(Clone, Copy)]
enum Severity {
    Critical,
    Error,
    Warning,
    Trace,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Trace => "TRACE",
        }
    }

    /// ANSI color code of the label.
    fn color(self) -> &'static str {
        match self {
            Severity::Critical => "31",
            Severity::Error => "91",
            Severity::Warning => "33",
            Severity::Trace => "34",
        }
    }

    fn shown_at(self) -> Verbosity {
        match self {
            Severity::Critical => Verbosity::Off,
            Severity::Error | Severity::Warning => Verbosity::Basic,
            Severity::Trace => Verbosity::Full,
        }
    }
}

static VERBOSITY: OnceLock<Verbosity> = OnceLock::new();

fn verbosity() -> Verbosity {
    *VERBOSITY.get_or_init(Verbosity::from_env)
}

/// UTC wall clock as `hh:mm:ss`.
fn clock() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() % 86_400)
        .unwrap_or_default();
    format!("{:02}:{:02}:{:02}", secs / 3_600, secs / 60 % 60, secs % 60)
}

fn log(severity: Severity, args: Arguments) {
    if verbosity() < severity.shown_at() {
        return;
    }
    println!(
        "{} [\u{001b}[{}m{}\u{001b}[0m] -- {args}",
        clock(),
        severity.color(),
        severity.label()
    );
}

/// Value-domain and ambiguity diagnostics.
pub fn emit_warning(args: Arguments) {
    log(Severity::Warning, args);
}

/// Operators dropped from generation and arity contract violations.
pub fn emit_error(args: Arguments) {
    log(Severity::Error, args);
}

pub fn emit_critical(args: Arguments) {
    log(Severity::Critical, args);
}

/// Registry lookup misses and per-operator strategy selection.
pub fn emit_trace(args: Arguments) {
    log(Severity::Trace, args);
}

#[macro_export]
macro_rules! warning {
    ($($arg:tt)*) => {
        $crate::logging::emit_warning(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::logging::emit_error(format_args!($($arg)*))
    };
}

/// Always printed, regardless of `ASCIR_TRACE`.
#[macro_export]
macro_rules! critical {
    ($($arg:tt)*) => {
        $crate::logging::emit_critical(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        $crate::logging::emit_trace(format_args!($($arg)*))
    };
}
