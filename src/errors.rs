use std::error::Error;
use std::fmt;

/// Failure modes of the host/CLI layer. The Tomasulo engine itself has no
/// recoverable runtime fault path (§7): structural invariant violations are
/// simulator bugs and are asserted, not returned as errors.
#[derive(Debug)]
pub enum SimError {
    /// A synthetic or loaded trace exceeded an internal capacity.
    TraceTooLarge(usize),

    /// A register number fell outside the configured register file.
    InvalidRegister(u32),

    /// A configuration value was rejected (e.g. an unknown synthetic
    /// scenario name).
    ConfigError(String),

    /// An I/O failure while loading a trace file.
    Io(std::io::Error),

    /// A trace file failed to parse as JSON.
    Parse(serde_json::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::TraceTooLarge(n) => {
                write!(f, "trace has {} instructions, exceeding the configured limit", n)
            },
            SimError::InvalidRegister(r) => {
                write!(f, "register r{} is outside the configured register file", r)
            },
            SimError::ConfigError(msg) => write!(f, "invalid configuration: {}", msg),
            SimError::Io(err) => write!(f, "I/O error: {}", err),
            SimError::Parse(err) => write!(f, "failed to parse trace: {}", err),
        }
    }
}

impl Error for SimError {}

impl From<std::io::Error> for SimError {
    fn from(error: std::io::Error) -> Self {
        SimError::Io(error)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(error: serde_json::Error) -> Self {
        SimError::Parse(error)
    }
}
