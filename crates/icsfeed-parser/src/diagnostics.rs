//! Non-fatal findings reported while parsing.
//!
//! The parser never logs on its own behalf. Anything worth surfacing that
//! does not abort the parse goes to the [`Diagnostics`] sink passed in by the
//! caller.

use std::cell::RefCell;
use std::fmt;

use tracing::warn;

/// A non-fatal finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A date-time value parsed to the zero timestamp, which is
    /// indistinguishable from an unset field.
    ZeroTimestamp {
        /// Property the value belonged to.
        property: String,
        /// The value text.
        value: String,
    },
    /// A date-time property carried a parameter form the parser does not
    /// interpret. The field was set to the zero timestamp.
    UnsupportedParameter {
        /// Property the parameter belonged to.
        property: String,
        /// The parameter as written, e.g. `VALUE=PERIOD`.
        parameter: String,
        /// The value text that was skipped.
        value: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroTimestamp { property, value } => {
                write!(f, "{} value {:?} parsed to the zero timestamp", property, value)
            }
            Self::UnsupportedParameter {
                property,
                parameter,
                value,
            } => write!(
                f,
                "{} parameter {} is not supported, value {:?} ignored",
                property, parameter, value
            ),
        }
    }
}

/// Receives non-fatal findings during a parse.
pub trait Diagnostics {
    /// Reports one finding.
    fn report(&self, diagnostic: Diagnostic);
}

/// Discards every finding.
impl Diagnostics for () {
    fn report(&self, _diagnostic: Diagnostic) {}
}

impl<D: Diagnostics + ?Sized> Diagnostics for &D {
    fn report(&self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Emits each finding as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::ZeroTimestamp { property, value } => {
                warn!(property = %property, value = %value, "Date-time parsed to zero timestamp");
            }
            Diagnostic::UnsupportedParameter {
                property,
                parameter,
                value,
            } => {
                warn!(
                    property = %property,
                    parameter = %parameter,
                    value = %value,
                    "Unsupported date-time parameter"
                );
            }
        }
    }
}

/// Records findings for later inspection.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    seen: RefCell<Vec<Diagnostic>>,
}

impl CollectingDiagnostics {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of findings recorded so far.
    pub fn len(&self) -> usize {
        self.seen.borrow().len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.seen.borrow().is_empty()
    }

    /// Removes and returns every recorded finding.
    pub fn take(&self) -> Vec<Diagnostic> {
        self.seen.take()
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        self.seen.borrow_mut().push(diagnostic);
    }
}
