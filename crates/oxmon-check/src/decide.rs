use std::fmt;

/// Exit code for invocations missing required inputs.
pub const USAGE_EXIT_CODE: i32 = 1;

/// Nagios plugin status.
///
/// # Examples
///
/// ```rust
/// use oxmon_check::decide::Status;
///
/// assert_eq!(Status::Critical.to_string(), "CRITICAL");
/// assert_eq!(Status::Unknown.exit_code(), 3);
/// assert!(Status::Critical > Status::Warning);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Status {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Critical => 2,
            Self::Unknown => 3,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Warning => write!(f, "WARNING"),
            Self::Critical => write!(f, "CRITICAL"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub warning: f64,
    pub critical: f64,
}

/// Terminal outcome of one check invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub status: Status,
    pub message: String,
    /// The evaluated value; `None` when evaluation failed.
    pub value: Option<f64>,
}

impl CheckResult {
    /// Evaluation failed for any reason.
    pub fn unknown(error: impl fmt::Display) -> Self {
        Self {
            status: Status::Unknown,
            message: error.to_string(),
            value: None,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }

    /// The line printed on stdout: `"{STATUS}: {message}"`.
    pub fn line(&self) -> String {
        format!("{}: {}", self.status, self.message)
    }
}

/// Classify `value` against the thresholds.
///
/// Only "greater than" is checked, critical first. A value equal to a
/// threshold does not alert, and there is no low-is-bad mode.
pub fn decide(value: f64, thresholds: &Thresholds, label: &str) -> CheckResult {
    let status = if value > thresholds.critical {
        Status::Critical
    } else if value > thresholds.warning {
        Status::Warning
    } else {
        Status::Ok
    };

    CheckResult {
        status,
        message: format!("{label}: (value: {value})"),
        value: Some(value),
    }
}
