//! Native functions bound into every check environment.

use crate::error::EvalError;
use crate::expr::{Builtin, Value};
use oxmon_series::{ops, DEFAULT_ALPHA};

/// Series reducers, under their check-language names.
pub const SERIES: &[Builtin] = &[
    Builtin { name: "sum", func: sum },
    Builtin { name: "max", func: max },
    Builtin { name: "min", func: min },
    Builtin { name: "multi-sum", func: multi_sum },
    Builtin { name: "multi-max", func: multi_max },
    Builtin { name: "multi-min", func: multi_min },
    Builtin { name: "last", func: last },
    Builtin { name: "weighted-average", func: weighted_average },
];

/// Arithmetic, comparison and list helpers.
pub const STANDARD: &[Builtin] = &[
    Builtin { name: "+", func: add },
    Builtin { name: "-", func: subtract },
    Builtin { name: "*", func: multiply },
    Builtin { name: "/", func: divide },
    Builtin { name: "<", func: less },
    Builtin { name: ">", func: greater },
    Builtin { name: "<=", func: less_equal },
    Builtin { name: ">=", func: greater_equal },
    Builtin { name: "=", func: equal },
    Builtin { name: "abs", func: abs },
    Builtin { name: "list", func: list },
    Builtin { name: "len", func: len },
];

fn one<'a>(name: &str, args: &'a [Value]) -> Result<&'a Value, EvalError> {
    match args {
        [arg] => Ok(arg),
        _ => Err(EvalError::Arity {
            name: name.to_string(),
            expected: "1",
            found: args.len(),
        }),
    }
}

fn two<'a>(name: &str, args: &'a [Value]) -> Result<(&'a Value, &'a Value), EvalError> {
    match args {
        [a, b] => Ok((a, b)),
        _ => Err(EvalError::Arity {
            name: name.to_string(),
            expected: "2",
            found: args.len(),
        }),
    }
}

fn numbers(name: &str, args: &[Value]) -> Result<Vec<f64>, EvalError> {
    args.iter().map(|arg| arg.as_number(name)).collect()
}

fn sum(args: &[Value]) -> Result<Value, EvalError> {
    let series = one("sum", args)?.to_time_series()?;
    Ok(ops::sum(&series)?.into())
}

fn max(args: &[Value]) -> Result<Value, EvalError> {
    let series = one("max", args)?.to_time_series()?;
    Ok(ops::max(&series)?.into())
}

fn min(args: &[Value]) -> Result<Value, EvalError> {
    let series = one("min", args)?.to_time_series()?;
    Ok(ops::min(&series)?.into())
}

fn multi_sum(args: &[Value]) -> Result<Value, EvalError> {
    let series = one("multi-sum", args)?.to_multi_series()?;
    Ok(ops::multi_sum(&series).into())
}

fn multi_max(args: &[Value]) -> Result<Value, EvalError> {
    let series = one("multi-max", args)?.to_multi_series()?;
    Ok(ops::multi_max(&series).into())
}

fn multi_min(args: &[Value]) -> Result<Value, EvalError> {
    let series = one("multi-min", args)?.to_multi_series()?;
    Ok(ops::multi_min(&series).into())
}

fn last(args: &[Value]) -> Result<Value, EvalError> {
    let series = one("last", args)?.to_time_series()?;
    Ok(ops::last(&series)?.into())
}

fn weighted_average(args: &[Value]) -> Result<Value, EvalError> {
    let (series, alpha) = match args {
        [series] => (series, DEFAULT_ALPHA),
        [series, alpha] => (series, alpha.as_number("weighted-average")?),
        _ => {
            return Err(EvalError::Arity {
                name: "weighted-average".to_string(),
                expected: "1 or 2",
                found: args.len(),
            })
        }
    };
    Ok(ops::ewma(&series.to_time_series()?, alpha)?.into())
}

fn add(args: &[Value]) -> Result<Value, EvalError> {
    Ok(numbers("+", args)?.into_iter().sum::<f64>().into())
}

fn multiply(args: &[Value]) -> Result<Value, EvalError> {
    Ok(numbers("*", args)?.into_iter().product::<f64>().into())
}

fn subtract(args: &[Value]) -> Result<Value, EvalError> {
    match numbers("-", args)?.as_slice() {
        [] => Err(EvalError::Arity {
            name: "-".to_string(),
            expected: "at least 1",
            found: 0,
        }),
        [only] => Ok((-only).into()),
        [first, rest @ ..] => Ok(rest.iter().fold(*first, |acc, n| acc - n).into()),
    }
}

fn divide(args: &[Value]) -> Result<Value, EvalError> {
    let nums = numbers("/", args)?;
    let Some((&first, rest)) = nums.split_first() else {
        return Err(EvalError::Arity {
            name: "/".to_string(),
            expected: "at least 1",
            found: 0,
        });
    };
    if rest.is_empty() {
        return divide_pair(1.0, first).map(Value::from);
    }
    rest.iter()
        .try_fold(first, |acc, &n| divide_pair(acc, n))
        .map(Value::from)
}

fn divide_pair(numerator: f64, denominator: f64) -> Result<f64, EvalError> {
    if denominator == 0.0 {
        Err(EvalError::Arithmetic("division by zero".to_string()))
    } else {
        Ok(numerator / denominator)
    }
}

fn compare(name: &str, args: &[Value], test: fn(f64, f64) -> bool) -> Result<Value, EvalError> {
    let (a, b) = two(name, args)?;
    Ok(Value::Bool(test(a.as_number(name)?, b.as_number(name)?)))
}

fn less(args: &[Value]) -> Result<Value, EvalError> {
    compare("<", args, |a, b| a < b)
}

fn greater(args: &[Value]) -> Result<Value, EvalError> {
    compare(">", args, |a, b| a > b)
}

fn less_equal(args: &[Value]) -> Result<Value, EvalError> {
    compare("<=", args, |a, b| a <= b)
}

fn greater_equal(args: &[Value]) -> Result<Value, EvalError> {
    compare(">=", args, |a, b| a >= b)
}

fn equal(args: &[Value]) -> Result<Value, EvalError> {
    let (a, b) = two("=", args)?;
    Ok(Value::Bool(a == b))
}

fn abs(args: &[Value]) -> Result<Value, EvalError> {
    Ok(one("abs", args)?.as_number("abs")?.abs().into())
}

fn list(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::List(args.to_vec()))
}

fn len(args: &[Value]) -> Result<Value, EvalError> {
    match one("len", args)? {
        Value::List(items) => Ok((items.len() as f64).into()),
        Value::Str(s) => Ok((s.chars().count() as f64).into()),
        other => Err(EvalError::Type {
            name: "len".to_string(),
            expected: "list or string",
            found: other.type_name(),
        }),
    }
}
