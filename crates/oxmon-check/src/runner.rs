use crate::config::CheckConfig;
use crate::decide::{decide, CheckResult, USAGE_EXIT_CODE};
use crate::env::Environment;
use crate::error::CheckError;
use crate::expr::{reader, Evaluator};
use oxmon_graphite::MetricFetcher;
use std::fmt;
use std::sync::Arc;

/// Lifecycle of one check invocation. `Reported` is reached by the binary
/// once it prints the result and exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    EnvironmentBuilt,
    Evaluating,
    Decided,
    Reported,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::EnvironmentBuilt => "environment_built",
            Self::Evaluating => "evaluating",
            Self::Decided => "decided",
            Self::Reported => "reported",
        };
        f.write_str(name)
    }
}

/// Builds the environment, evaluates the configured method once, and
/// classifies the result.
pub struct CheckRunner<E> {
    evaluator: E,
    fetcher: Arc<dyn MetricFetcher>,
}

impl<E: Evaluator> CheckRunner<E> {
    pub fn new(evaluator: E, fetcher: Arc<dyn MetricFetcher>) -> Self {
        Self { evaluator, fetcher }
    }

    /// Run one check.
    ///
    /// Returns [`CheckError::Usage`] without evaluating anything when the
    /// method or a threshold is missing. Every failure after that point,
    /// whatever its origin, becomes an UNKNOWN result.
    pub fn run(&self, config: &CheckConfig) -> Result<CheckResult, CheckError> {
        let request = config.check_request()?;
        tracing::debug!(phase = %Phase::Idle, "Check inputs validated");

        let env = Environment::for_check(config, Arc::clone(&self.fetcher));
        tracing::debug!(phase = %Phase::EnvironmentBuilt, bindings = env.len(), "Environment built");

        let source = call_form(&request.method);
        tracing::debug!(phase = %Phase::Evaluating, source = %source, "Evaluating check expression");

        let value = match self
            .evaluator
            .evaluate(&source, &env)
            .and_then(|value| value.as_number("check expression"))
        {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, method = %request.method, "Check evaluation failed");
                return Ok(CheckResult::unknown(e));
            }
        };

        if !value.is_finite() {
            tracing::warn!(value, method = %request.method, "Check produced a non-finite value");
            return Ok(CheckResult::unknown(format!(
                "check expression produced a non-finite value: {value}"
            )));
        }

        let result = decide(value, &request.thresholds, &request.method);
        tracing::info!(
            phase = %Phase::Decided,
            status = %result.status,
            value,
            warning = request.thresholds.warning,
            critical = request.thresholds.critical,
            "Check decided"
        );
        Ok(result)
    }
}

/// Make `method` a single call form.
///
/// Text that already reads as exactly one form is used unchanged; anything
/// else (e.g. `sum (get-metrics "x")`) is wrapped in one pair of parentheses.
/// Unreadable text is passed through so the evaluator reports the parse error.
pub fn call_form(method: &str) -> String {
    match reader::read_all(method) {
        Ok(forms) if forms.len() > 1 => format!("({method})"),
        _ => method.to_string(),
    }
}

/// Stdout line and process exit code for the outcome of a run.
///
/// Usage errors print `Error: ...` and exit 1; any other error is UNKNOWN.
pub fn report(outcome: Result<CheckResult, CheckError>) -> (String, i32) {
    match outcome {
        Ok(result) => (result.line(), result.exit_code()),
        Err(CheckError::Usage(message)) => (format!("Error: {message}"), USAGE_EXIT_CODE),
        Err(e) => {
            let result = CheckResult::unknown(e);
            (result.line(), result.exit_code())
        }
    }
}
