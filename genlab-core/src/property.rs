//! Property definitions and the driver that checks them.

use crate::{data::*, error::*, gen::*, tree::*};
use log::{debug, trace};
use std::collections::HashMap;
use std::fmt;

/// Statistics gathered during a property run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TestStatistics {
    pub classifications: HashMap<String, usize>,
    pub collections: HashMap<String, Vec<f64>>,
    /// Free-form labels reported per trial, e.g. `"dupes: 0-5"`.
    pub events: HashMap<String, usize>,
    pub total_tests: usize,
}

impl TestStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_classification(&mut self, name: &str) {
        *self.classifications.entry(name.to_string()).or_insert(0) += 1;
    }

    pub fn record_collection(&mut self, name: &str, value: f64) {
        self.collections
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    pub fn record_event(&mut self, label: &str) {
        *self.events.entry(label.to_string()).or_insert(0) += 1;
    }

    pub fn event_count(&self, label: &str) -> usize {
        self.events.get(label).copied().unwrap_or(0)
    }
}

type ClassificationFn<T> = Box<dyn Fn(&T) -> bool>;
type CollectionFn<T> = Box<dyn Fn(&T) -> f64>;
type LabelFn<T> = Box<dyn Fn(&T) -> String>;

/// A property that can be tested with generated inputs.
pub struct Property<T> {
    generator: Gen<T>,
    test_function: Box<dyn Fn(&T) -> TestResult>,
    variable_name: Option<String>,
    classifications: Vec<(String, ClassificationFn<T>)>,
    collections: Vec<(String, CollectionFn<T>)>,
    labels: Vec<LabelFn<T>>,
    examples: Vec<T>,
}

impl<T> Property<T>
where
    T: 'static + fmt::Debug + Clone,
{
    /// Create a new property from a generator and test function.
    pub fn new<F>(generator: Gen<T>, test_function: F) -> Self
    where
        F: Fn(&T) -> TestResult + 'static,
    {
        Property {
            generator,
            test_function: Box::new(test_function),
            variable_name: None,
            classifications: Vec::new(),
            collections: Vec::new(),
            labels: Vec::new(),
            examples: Vec::new(),
        }
    }

    /// Create a property that checks a boolean condition.
    pub fn for_all<F>(generator: Gen<T>, condition: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        Property::new(generator, move |input| {
            if condition(input) {
                TestResult::pass()
            } else {
                TestResult::fail(format!("{input:?}"), "Boolean Condition".to_string())
            }
        })
    }

    /// Create a property that checks a boolean condition with a named variable.
    pub fn for_all_named<F>(generator: Gen<T>, variable_name: &str, condition: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        Property::for_all(generator, condition).named(variable_name)
    }

    /// Create a property whose body reports failure through `Err`.
    ///
    /// The error text becomes the assertion line of the report, so lookups
    /// and conversions can use `?` inside the body.
    pub fn for_all_fallible<F, E>(generator: Gen<T>, body: F) -> Self
    where
        F: Fn(&T) -> std::result::Result<(), E> + 'static,
        E: fmt::Display,
    {
        Property::new(generator, move |input| match body(input) {
            Ok(()) => TestResult::pass(),
            Err(error) => TestResult::fail(format!("{input:?}"), format!("Error: {error}")),
        })
    }

    /// Name the generated variable in shrink reports.
    pub fn named(mut self, variable_name: &str) -> Self {
        self.variable_name = Some(variable_name.to_string());
        self
    }

    /// Add a classification to categorize test inputs.
    pub fn classify<F>(mut self, name: &str, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.classifications
            .push((name.to_string(), Box::new(predicate)));
        self
    }

    /// Add a collection to gather numerical statistics from test inputs.
    pub fn collect<F>(mut self, name: &str, extractor: F) -> Self
    where
        F: Fn(&T) -> f64 + 'static,
    {
        self.collections
            .push((name.to_string(), Box::new(extractor)));
        self
    }

    /// Report a label per trial; labels are counted into a histogram.
    pub fn label<F>(mut self, labeller: F) -> Self
    where
        F: Fn(&T) -> String + 'static,
    {
        self.labels.push(Box::new(labeller));
        self
    }

    /// Check these inputs before any generated ones.
    pub fn with_examples(mut self, examples: Vec<T>) -> Self {
        self.examples = examples;
        self
    }

    /// Run this property with the given configuration.
    pub fn run(&self, config: &Config) -> TestResult {
        self.run_with_context(config, None, None)
    }

    /// Run this property with the given configuration and context information.
    pub fn run_with_context(
        &self,
        config: &Config,
        property_name: Option<&str>,
        module_path: Option<&str>,
    ) -> TestResult {
        let property_name = property_name.map(|s| s.to_string());
        let module_path = module_path.map(|s| s.to_string());

        if let Err(error) = config.validate() {
            debug!("refusing to run property: {error}");
            return TestResult::Invalid {
                message: error.to_string(),
                property_name,
                module_path,
            };
        }

        let mut seed = config.initial_seed();
        debug!(
            "running {} for {} tests from {seed}",
            property_name.as_deref().unwrap_or("property"),
            config.test_limit
        );
        let mut statistics = TestStatistics::new();

        for test_num in 0..config.test_limit {
            let size = config.size_for(test_num);
            let (test_seed, next_seed) = seed.split();
            seed = next_seed;

            let tree = match self.examples.get(test_num) {
                Some(example) => Tree::singleton(example.clone()),
                None => self.generator.generate(size, test_seed),
            };
            trace!("test {} at {size}: {:?}", test_num + 1, tree.value);

            self.collect_statistics(&tree.value, &mut statistics);

            if let TestResult::Fail {
                counterexample,
                shrinks_performed,
                assertion_type,
                shrink_steps,
                ..
            } = self.check_tree(tree, config)
            {
                debug!(
                    "falsified after {} tests and {shrinks_performed} shrinks: {counterexample}",
                    test_num + 1
                );
                return TestResult::Fail {
                    counterexample,
                    tests_run: test_num + 1,
                    shrinks_performed,
                    property_name,
                    module_path,
                    assertion_type,
                    shrink_steps,
                };
            }
        }

        statistics.total_tests = config.test_limit;

        if self.classifications.is_empty() && self.collections.is_empty() && self.labels.is_empty()
        {
            TestResult::Pass {
                tests_run: config.test_limit,
                property_name,
                module_path,
            }
        } else {
            TestResult::PassWithStatistics {
                tests_run: config.test_limit,
                property_name,
                module_path,
                statistics,
            }
        }
    }

    fn collect_statistics(&self, value: &T, statistics: &mut TestStatistics) {
        for (name, predicate) in &self.classifications {
            if predicate(value) {
                statistics.record_classification(name);
            }
        }

        for (name, extractor) in &self.collections {
            statistics.record_collection(name, extractor(value));
        }

        for labeller in &self.labels {
            statistics.record_event(&labeller(value));
        }
    }

    /// Check a single tree, shrinking on failure.
    fn check_tree(&self, tree: Tree<T>, config: &Config) -> TestResult {
        match (self.test_function)(&tree.value) {
            TestResult::Fail {
                counterexample,
                assertion_type,
                ..
            } => self.shrink_failure(tree, counterexample, assertion_type, config),
            _ => TestResult::pass(),
        }
    }

    /// Walk the shrink tree, always moving to the first child that still
    /// fails, until no child fails or the shrink limit is reached.
    fn shrink_failure(
        &self,
        tree: Tree<T>,
        counterexample: String,
        assertion_type: Option<String>,
        config: &Config,
    ) -> TestResult {
        let mut shrink_steps = vec![ShrinkStep {
            counterexample: counterexample.clone(),
            step: 0,
            variable_name: self.variable_name.clone(),
        }];
        let mut current = tree;
        let mut counterexample = counterexample;
        let mut assertion_type = assertion_type;
        let mut shrinks = 0;

        'descend: while shrinks < config.shrink_limit {
            for child in current.children() {
                if let TestResult::Fail {
                    counterexample: smaller,
                    assertion_type: reason,
                    ..
                } = (self.test_function)(&child.value)
                {
                    shrinks += 1;
                    trace!("shrink {shrinks}: {smaller}");
                    shrink_steps.push(ShrinkStep {
                        counterexample: smaller.clone(),
                        step: shrinks,
                        variable_name: self.variable_name.clone(),
                    });
                    counterexample = smaller;
                    assertion_type = reason;
                    current = child;
                    continue 'descend;
                }
            }
            break;
        }

        TestResult::Fail {
            counterexample,
            tests_run: 1,
            shrinks_performed: shrinks,
            property_name: None,
            module_path: None,
            assertion_type,
            shrink_steps,
        }
    }
}

/// Create a property for a generator and test function.
pub fn property<T, F>(generator: Gen<T>, test_function: F) -> Property<T>
where
    T: 'static + fmt::Debug + Clone,
    F: Fn(&T) -> TestResult + 'static,
{
    Property::new(generator, test_function)
}

/// Create a property that checks a boolean condition.
pub fn for_all<T, F>(generator: Gen<T>, condition: F) -> Property<T>
where
    T: 'static + fmt::Debug + Clone,
    F: Fn(&T) -> bool + 'static,
{
    Property::for_all(generator, condition)
}

/// Create a property that checks a boolean condition with a named variable.
pub fn for_all_named<T, F>(generator: Gen<T>, variable_name: &str, condition: F) -> Property<T>
where
    T: 'static + fmt::Debug + Clone,
    F: Fn(&T) -> bool + 'static,
{
    Property::for_all_named(generator, variable_name, condition)
}

/// Create a property whose body reports failure through `Err`.
pub fn for_all_fallible<T, F, E>(generator: Gen<T>, body: F) -> Property<T>
where
    T: 'static + fmt::Debug + Clone,
    F: Fn(&T) -> std::result::Result<(), E> + 'static,
    E: fmt::Display,
{
    Property::for_all_fallible(generator, body)
}
