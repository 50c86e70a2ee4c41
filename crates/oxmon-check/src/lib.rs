//! Nagios check over Graphite metrics.
//!
//! A check is one expression in a small s-expression language, evaluated in
//! an [`env::Environment`] that exposes the series reducers, a
//! `get-metrics` capability and the configuration scalars. The resulting
//! number is compared against warning/critical thresholds to produce a
//! Nagios status and exit code.

pub mod builtins;
pub mod config;
pub mod decide;
pub mod env;
pub mod error;
pub mod expr;
pub mod runner;
