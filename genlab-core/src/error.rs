//! Error and outcome types.

use crate::property::TestStatistics;
use std::fmt;
use thiserror::Error;

/// Main error type for genlab.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenlabError {
    /// Run settings that cannot produce a meaningful run.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Generator built from contradictory bounds or an empty choice list.
    #[error("Invalid generator: {message}")]
    InvalidGenerator { message: String },

    /// Argument outside the domain of a helper such as a bucketizer.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A key expected to be present after insertion was not found.
    #[error("Missing key: {key}")]
    MissingKey { key: String },
}

/// Result type for genlab operations.
pub type Result<T> = std::result::Result<T, GenlabError>;

/// One step of the shrinking progression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShrinkStep {
    pub counterexample: String,
    /// 0 is the original failure, 1+ are successful shrinks.
    pub step: usize,
    pub variable_name: Option<String>,
}

/// Outcome of a property run.
#[derive(Debug, Clone, PartialEq)]
pub enum TestResult {
    Pass {
        tests_run: usize,
        property_name: Option<String>,
        module_path: Option<String>,
    },

    /// Passed, with classification, collection or event statistics.
    PassWithStatistics {
        tests_run: usize,
        property_name: Option<String>,
        module_path: Option<String>,
        statistics: TestStatistics,
    },

    Fail {
        counterexample: String,
        tests_run: usize,
        shrinks_performed: usize,
        property_name: Option<String>,
        module_path: Option<String>,
        assertion_type: Option<String>,
        shrink_steps: Vec<ShrinkStep>,
    },

    /// The run never started because its configuration was rejected.
    Invalid {
        message: String,
        property_name: Option<String>,
        module_path: Option<String>,
    },
}

impl TestResult {
    pub fn is_pass(&self) -> bool {
        matches!(
            self,
            TestResult::Pass { .. } | TestResult::PassWithStatistics { .. }
        )
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, TestResult::Fail { .. })
    }

    pub fn statistics(&self) -> Option<&TestStatistics> {
        match self {
            TestResult::PassWithStatistics { statistics, .. } => Some(statistics),
            _ => None,
        }
    }

    pub(crate) fn pass() -> Self {
        TestResult::Pass {
            tests_run: 1,
            property_name: None,
            module_path: None,
        }
    }

    pub(crate) fn fail(counterexample: String, assertion_type: String) -> Self {
        TestResult::Fail {
            counterexample,
            tests_run: 0,
            shrinks_performed: 0,
            property_name: None,
            module_path: None,
            assertion_type: Some(assertion_type),
            shrink_steps: Vec::new(),
        }
    }
}

fn write_header(f: &mut fmt::Formatter<'_>, module_path: &Option<String>) -> fmt::Result {
    if let Some(module) = module_path {
        writeln!(f, "━━━ {} ━━━", module)?;
    }
    Ok(())
}

fn write_counts(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    counts: &std::collections::HashMap<String, usize>,
    total: usize,
) -> fmt::Result {
    if counts.is_empty() {
        return Ok(());
    }
    writeln!(f)?;
    writeln!(f, "  {title}:")?;
    let mut rows: Vec<_> = counts.iter().collect();
    // Most frequent first, ties by name.
    rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (name, &count) in rows {
        let percentage = (count as f64 / total.max(1) as f64) * 100.0;
        writeln!(f, "    {:>3.0}% {}", percentage, name)?;
    }
    Ok(())
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestResult::Pass {
                tests_run,
                property_name,
                module_path,
            } => {
                write_header(f, module_path)?;
                let prop_name = property_name.as_deref().unwrap_or("property");
                write!(f, "  ✓ {} passed {} tests.", prop_name, tests_run)
            }
            TestResult::PassWithStatistics {
                tests_run,
                property_name,
                module_path,
                statistics,
            } => {
                write_header(f, module_path)?;
                let prop_name = property_name.as_deref().unwrap_or("property");
                writeln!(f, "  ✓ {} passed {} tests.", prop_name, tests_run)?;

                write_counts(
                    f,
                    "Test data distribution",
                    &statistics.classifications,
                    statistics.total_tests,
                )?;
                write_counts(f, "Events", &statistics.events, statistics.total_tests)?;

                if !statistics.collections.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "  Test data statistics:")?;
                    let mut collection_names: Vec<_> = statistics.collections.keys().collect();
                    collection_names.sort();
                    for name in collection_names {
                        let finite: Vec<f64> = statistics.collections[name]
                            .iter()
                            .copied()
                            .filter(|v| v.is_finite())
                            .collect();
                        if finite.is_empty() {
                            continue;
                        }

                        let min = finite.iter().fold(f64::INFINITY, |a, &b| a.min(b));
                        let max = finite.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
                        let avg = finite.iter().sum::<f64>() / finite.len() as f64;

                        let mut sorted = finite.clone();
                        sorted.sort_by(|a, b| a.total_cmp(b));
                        let median = if sorted.len() % 2 == 0 {
                            (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) / 2.0
                        } else {
                            sorted[sorted.len() / 2]
                        };

                        writeln!(
                            f,
                            "    {}: min={:.1}, max={:.1}, avg={:.1}, median={:.1}",
                            name, min, max, avg, median
                        )?;
                    }
                }

                Ok(())
            }
            TestResult::Fail {
                counterexample,
                tests_run,
                shrinks_performed,
                property_name,
                module_path,
                assertion_type,
                shrink_steps,
            } => {
                write_header(f, module_path)?;
                let prop_name = property_name.as_deref().unwrap_or("property");
                writeln!(
                    f,
                    "  ✗ {} failed after {} tests and {} shrinks.",
                    prop_name, tests_run, shrinks_performed
                )?;

                if !shrink_steps.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "    Shrinking progression:")?;
                    for step in shrink_steps {
                        match (&step.variable_name, step.step) {
                            (Some(var_name), n) => writeln!(
                                f,
                                "      │ forAll {} = {} -- {}",
                                n, step.counterexample, var_name
                            )?,
                            (None, 0) => writeln!(f, "      │ Original: {}", step.counterexample)?,
                            (None, n) => {
                                writeln!(f, "      │ Step {}: {}", n, step.counterexample)?
                            }
                        }
                    }
                    writeln!(f)?;
                }

                if let Some(assertion) = assertion_type {
                    writeln!(f, "    === {} ===", assertion)?;
                }

                write!(f, "    Minimal counterexample: {}", counterexample)
            }
            TestResult::Invalid {
                message,
                property_name,
                module_path,
            } => {
                write_header(f, module_path)?;
                let prop_name = property_name.as_deref().unwrap_or("property");
                write!(f, "  ⚠ {} was not run: {}", prop_name, message)
            }
        }
    }
}

impl From<GenlabError> for TestResult {
    fn from(error: GenlabError) -> Self {
        TestResult::Invalid {
            message: error.to_string(),
            property_name: None,
            module_path: None,
        }
    }
}
