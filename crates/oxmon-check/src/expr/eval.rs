use super::reader::Expr;
use super::{Function, Value};
use crate::env::{Environment, ENDPOINT, INTERVAL, PASSWORD, USERNAME};
use crate::error::EvalError;
use oxmon_graphite::error::FetchError;
use oxmon_graphite::{Credentials, MetricFetcher, MetricQuery};

/// Evaluate `expr` in `env`.
///
/// Special forms: `(quote x)` and `(if test then [else])`. Everything else
/// in call position is evaluated and applied to its evaluated arguments,
/// left to right.
pub fn eval(expr: &Expr, env: &Environment) -> Result<Value, EvalError> {
    match expr {
        Expr::Nil => Ok(Value::Nil),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::Str(s) => Ok(Value::Str(s.clone())),
        Expr::Symbol(name) => env
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::UnboundSymbol(name.clone())),
        Expr::List(items) => {
            let Some((head, rest)) = items.split_first() else {
                return Ok(Value::Nil);
            };

            if let Expr::Symbol(name) = head {
                match name.as_str() {
                    "quote" => return eval_quote(rest),
                    "if" => return eval_if(rest, env),
                    _ => {}
                }
            }

            let callee = eval(head, env)?;
            let args = rest
                .iter()
                .map(|arg| eval(arg, env))
                .collect::<Result<Vec<_>, _>>()?;
            apply(&callee, &args, env)
        }
    }
}

/// Invoke a function value with positional arguments.
pub fn apply(callee: &Value, args: &[Value], env: &Environment) -> Result<Value, EvalError> {
    match callee {
        Value::Function(Function::Builtin(builtin)) => (builtin.func)(args),
        Value::Function(Function::Fetch(fetcher)) => fetch_metric(fetcher.as_ref(), args, env),
        other => Err(EvalError::NotCallable(other.to_string())),
    }
}

fn eval_quote(rest: &[Expr]) -> Result<Value, EvalError> {
    match rest {
        [quoted] => Ok(quote(quoted)),
        _ => Err(EvalError::Arity {
            name: "quote".to_string(),
            expected: "1",
            found: rest.len(),
        }),
    }
}

/// Quoted symbols become strings; there is no separate symbol value.
fn quote(expr: &Expr) -> Value {
    match expr {
        Expr::Nil => Value::Nil,
        Expr::Bool(b) => Value::Bool(*b),
        Expr::Number(n) => Value::Number(*n),
        Expr::Str(s) | Expr::Symbol(s) => Value::Str(s.clone()),
        Expr::List(items) => Value::List(items.iter().map(quote).collect()),
    }
}

fn eval_if(rest: &[Expr], env: &Environment) -> Result<Value, EvalError> {
    match rest {
        [test, then] => {
            if eval(test, env)?.is_truthy() {
                eval(then, env)
            } else {
                Ok(Value::Nil)
            }
        }
        [test, then, otherwise] => {
            if eval(test, env)?.is_truthy() {
                eval(then, env)
            } else {
                eval(otherwise, env)
            }
        }
        _ => Err(EvalError::Arity {
            name: "if".to_string(),
            expected: "2 or 3",
            found: rest.len(),
        }),
    }
}

/// `(get-metrics "name")`: build a render query from the scalars bound in
/// `env` and resolve it through `fetcher`.
fn fetch_metric(
    fetcher: &dyn MetricFetcher,
    args: &[Value],
    env: &Environment,
) -> Result<Value, EvalError> {
    let metric = match args {
        [Value::Str(metric)] => metric.clone(),
        [other] => {
            return Err(EvalError::Type {
                name: "get-metrics".to_string(),
                expected: "string",
                found: other.type_name(),
            })
        }
        _ => {
            return Err(EvalError::Arity {
                name: "get-metrics".to_string(),
                expected: "1",
                found: args.len(),
            })
        }
    };

    let endpoint = env
        .string(ENDPOINT)
        .ok_or(FetchError::MissingConfig("endpoint"))?;
    let interval = env
        .string(INTERVAL)
        .ok_or(FetchError::MissingConfig("interval"))?;
    let credentials = env
        .string(USERNAME)
        .filter(|username| !username.is_empty())
        .map(|username| Credentials {
            username: username.to_string(),
            password: env.string(PASSWORD).map(str::to_string),
        });

    let query = MetricQuery {
        metric,
        endpoint: endpoint.to_string(),
        interval: interval.to_string(),
        credentials,
    };

    let data = fetcher.fetch(&query)?;
    tracing::debug!(metric = %query.metric, series = data.series_count(), "Metric fetched");
    Ok(data.into())
}
