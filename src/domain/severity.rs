use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a log line, as embedded in the log text itself.
///
/// This is distinct from tracing levels used to configure our own logging
/// infrastructure; `Severity` is the semantic level parsed out of the served
/// files. The declaration order is the filtering order: requesting `Warning`
/// passes `Warning` and `Error` lines. `Audit` and `Trace` sit between
/// `Info` and `Warning` because that is where the served log format puts
/// them; filtering counts depend on this exact placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    None,
    Debug,
    Info,
    Audit,
    Trace,
    Warning,
    Error,
}

impl Severity {
    /// Every severity, in ascending filter order.
    pub const ALL: [Severity; 7] = [
        Severity::None,
        Severity::Debug,
        Severity::Info,
        Severity::Audit,
        Severity::Trace,
        Severity::Warning,
        Severity::Error,
    ];

    /// The label as written in log lines and query strings.
    pub fn label(self) -> &'static str {
        match self {
            Severity::None => "NONE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Audit => "AUDIT",
            Severity::Trace => "TRACE",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }

    /// The label as a standalone token: space-bounded on both sides, so
    /// `WARNING:` or a label at the very start of a line does not count.
    pub(crate) fn token(self) -> &'static str {
        match self {
            Severity::None => " NONE ",
            Severity::Debug => " DEBUG ",
            Severity::Info => " INFO ",
            Severity::Audit => " AUDIT ",
            Severity::Trace => " TRACE ",
            Severity::Warning => " WARNING ",
            Severity::Error => " ERROR ",
        }
    }

    /// Parse a label, case-sensitively. Callers building filter requests
    /// treat anything unrecognized as "pass everything".
    pub fn from_label(label: &str) -> Option<Severity> {
        Severity::ALL.into_iter().find(|sev| sev.label() == label)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
