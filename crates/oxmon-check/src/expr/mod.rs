//! Check-expression values and the evaluator seam.
//!
//! The runner only needs "evaluate this text in this namespace and hand back
//! a value", expressed by [`Evaluator`]. [`SexprEvaluator`] is the built-in
//! implementation; another scripting engine can be plugged in by
//! implementing the trait against the same [`Environment`].

pub mod eval;
pub mod reader;

use crate::env::Environment;
use crate::error::EvalError;
use oxmon_graphite::{MetricData, MetricFetcher};
use oxmon_series::error::SeriesShapeError;
use oxmon_series::{MultiSeries, TimeSeries};
use std::fmt;
use std::sync::Arc;

/// Evaluates one check expression inside an [`Environment`].
pub trait Evaluator {
    fn evaluate(&self, source: &str, env: &Environment) -> Result<Value, EvalError>;
}

/// Evaluator for the built-in s-expression language.
#[derive(Debug, Clone, Copy, Default)]
pub struct SexprEvaluator;

impl Evaluator for SexprEvaluator {
    fn evaluate(&self, source: &str, env: &Environment) -> Result<Value, EvalError> {
        let expr = reader::read_one(source)?;
        eval::eval(&expr, env)
    }
}

pub type BuiltinFn = fn(&[Value]) -> Result<Value, EvalError>;

/// A native function bound under a check-language name.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

/// Something that can sit in call position.
#[derive(Clone)]
pub enum Function {
    Builtin(Builtin),
    /// The `get-metrics` capability. Connection settings are read from the
    /// calling environment when invoked.
    Fetch(Arc<dyn MetricFetcher>),
}

impl Function {
    pub fn name(&self) -> &str {
        match self {
            Self::Builtin(builtin) => builtin.name,
            Self::Fetch(_) => "get-metrics",
        }
    }
}

/// A check-language value.
///
/// Lists double as series: a time series is a list of numbers and `nil`s, a
/// multi series is a list of such lists.
#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    Str(String),
    List(Vec<Value>),
    Function(Function),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Function(_) => "function",
        }
    }

    pub fn is_truthy(&self) -> bool {
        !matches!(self, Self::Nil | Self::Bool(false))
    }

    pub fn as_number(&self, context: &str) -> Result<f64, EvalError> {
        match self {
            Self::Number(n) => Ok(*n),
            other => Err(EvalError::Type {
                name: context.to_string(),
                expected: "number",
                found: other.type_name(),
            }),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Shape gate for reducers that take one series.
    pub fn to_time_series(&self) -> Result<TimeSeries, SeriesShapeError> {
        let Self::List(items) = self else {
            return Err(SeriesShapeError::ExpectingTimeSeries);
        };
        items
            .iter()
            .map(|item| match item {
                Self::Number(n) => Ok(Some(*n)),
                Self::Nil => Ok(None),
                _ => Err(SeriesShapeError::ExpectingTimeSeries),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(TimeSeries::new)
    }

    /// Shape gate for reducers that take a collection of series.
    pub fn to_multi_series(&self) -> Result<MultiSeries, SeriesShapeError> {
        let Self::List(items) = self else {
            return Err(SeriesShapeError::ExpectingMultiSeries);
        };
        let members = items
            .iter()
            .map(|item| {
                item.to_time_series()
                    .map_err(|_| SeriesShapeError::ExpectingMultiSeries)
            })
            .collect::<Result<Vec<_>, _>>()?;
        MultiSeries::new(members)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<Option<f64>> for Value {
    fn from(n: Option<f64>) -> Self {
        n.map_or(Self::Nil, Self::Number)
    }
}

impl From<TimeSeries> for Value {
    fn from(series: TimeSeries) -> Self {
        Self::List(series.into_inner().into_iter().map(Value::from).collect())
    }
}

impl From<MetricData> for Value {
    fn from(data: MetricData) -> Self {
        match data {
            MetricData::Single(series) => series.into(),
            MetricData::Multi(series) => Self::List(series.into_iter().map(Value::from).collect()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(true) => write!(f, "true"),
            Self::Bool(false) => write!(f, "false"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            Self::Function(func) => write!(f, "#<function {}>", func.name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
