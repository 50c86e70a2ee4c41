//! The namespace a check expression runs in.
//!
//! An [`Environment`] maps names to values: native functions, the
//! `get-metrics` capability and configuration scalars. Configuration is
//! bound under `*key*` names and only when present, so an unset option is
//! simply unbound. Building an environment performs no I/O.

use crate::builtins;
use crate::config::{CheckConfig, OptionValue};
use crate::expr::{Function, Value};
use oxmon_graphite::MetricFetcher;
use std::collections::HashMap;
use std::sync::Arc;

pub const ENDPOINT: &str = "*endpoint*";
pub const USERNAME: &str = "*username*";
pub const PASSWORD: &str = "*password*";
pub const INTERVAL: &str = "*interval*";
pub const WARNING: &str = "*warning*";
pub const CRITICAL: &str = "*critical*";
pub const METHOD: &str = "*method*";
pub const TIMEOUT_SECS: &str = "*timeout-secs*";

/// Name under which the metric fetch capability is bound.
pub const GET_METRICS: &str = "get-metrics";

/// Reserved name for a configuration key.
pub fn scalar_name(key: &str) -> String {
    format!("*{key}*")
}

#[derive(Clone, Default)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    /// Arithmetic, comparison and list helpers only.
    pub fn standard() -> Self {
        let mut env = Self::default();
        for builtin in builtins::STANDARD {
            env.define(builtin.name, Value::Function(Function::Builtin(*builtin)));
        }
        env
    }

    /// Full check namespace: standard helpers, series reducers,
    /// `get-metrics` backed by `fetcher`, and every configured scalar.
    pub fn for_check(config: &CheckConfig, fetcher: Arc<dyn MetricFetcher>) -> Self {
        let mut env = Self::standard();

        for builtin in builtins::SERIES {
            env.define(builtin.name, Value::Function(Function::Builtin(*builtin)));
        }
        env.define(GET_METRICS, Value::Function(Function::Fetch(fetcher)));

        // Extra options first so the reserved keys below always win.
        for (key, value) in &config.options {
            env.define(&scalar_name(key), value.into());
        }

        let strings = [
            (ENDPOINT, &config.endpoint),
            (USERNAME, &config.username),
            (PASSWORD, &config.password),
            (METHOD, &config.method),
        ];
        for (name, value) in strings {
            if let Some(value) = value {
                env.define(name, Value::Str(value.clone()));
            }
        }
        env.define(INTERVAL, Value::Str(config.interval.clone()));
        env.define(TIMEOUT_SECS, Value::Number(config.timeout_secs as f64));

        let numbers = [(WARNING, config.warning), (CRITICAL, config.critical)];
        for (name, value) in numbers {
            if let Some(value) = value {
                env.define(name, Value::Number(value));
            }
        }

        env
    }

    /// Bind `name`, replacing any previous binding.
    pub fn define(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// String scalar bound under `name`, if any.
    pub fn string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl From<&OptionValue> for Value {
    fn from(value: &OptionValue) -> Self {
        match value {
            OptionValue::Bool(b) => Value::Bool(*b),
            OptionValue::Number(n) => Value::Number(*n),
            OptionValue::Text(s) => Value::Str(s.clone()),
        }
    }
}
