//! Predicate sources and the ordered registry that dispatches rule names to
//! them.

use crate::error::{Result, ValidationError};
use crate::rules::{BaseRules, FileRules, RuleCall, UploadedFiles};
use indexmap::{IndexMap, IndexSet};
use std::fmt;
use std::sync::Arc;

/// Rule names handled by the engine itself before predicate dispatch.
pub const PSEUDO_RULES: [&str; 4] = ["blank", "empty", "null", "optional"];

/// A named set of predicates.
///
/// Implementors map rule names to checks. [`call`](RuleSource::call) returns
/// `None` when the source does not know the rule so the registry can move on
/// to the next source.
pub trait RuleSource: Send + Sync {
    /// Source name, used in logs and `Debug` output.
    fn name(&self) -> &str;

    /// Every rule this source provides.
    fn rule_names(&self) -> Vec<&str>;

    /// Whether this source provides `rule`.
    fn has_rule(&self, rule: &str) -> bool {
        self.rule_names().contains(&rule)
    }

    /// Evaluate `call.rule`, or `None` if the rule is not provided here.
    fn call(&self, call: &RuleCall<'_>) -> Option<Result<bool>>;
}

/// Boxed predicate stored in a [`PredicateTable`].
pub type PredicateFn = Box<dyn Fn(&RuleCall<'_>) -> Result<bool> + Send + Sync>;

/// A [`RuleSource`] assembled from closures.
///
/// ```rust
/// use rulekit_validate::{PredicateTable, Validation, Validators};
/// use serde_json::json;
///
/// let custom = PredicateTable::new("app")
///     .check("even", |call| {
///         call.scalar()
///             .and_then(|v| v.parse::<i64>().ok())
///             .is_some_and(|n| n % 2 == 0)
///     });
///
/// let mut validation = Validation::with_validators(Validators::new([custom]));
/// validation.set_rule("count", "required|even");
/// assert!(validation.validate(&json!({ "count": 4 })).unwrap());
/// ```
pub struct PredicateTable {
    name: String,
    rules: IndexMap<String, PredicateFn>,
}

impl PredicateTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: IndexMap::new(),
        }
    }

    /// Register a fallible predicate. A later registration of the same name
    /// replaces the earlier one.
    pub fn rule<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&RuleCall<'_>) -> Result<bool> + Send + Sync + 'static,
    {
        self.rules.insert(name.into(), Box::new(predicate));
        self
    }

    /// Register a predicate that cannot fail.
    pub fn check<F>(self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&RuleCall<'_>) -> bool + Send + Sync + 'static,
    {
        self.rule(name, move |call| Ok(predicate(call)))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl RuleSource for PredicateTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn rule_names(&self) -> Vec<&str> {
        self.rules.keys().map(String::as_str).collect()
    }

    fn has_rule(&self, rule: &str) -> bool {
        self.rules.contains_key(rule)
    }

    fn call(&self, call: &RuleCall<'_>) -> Option<Result<bool>> {
        self.rules.get(call.rule).map(|predicate| predicate(call))
    }
}

impl fmt::Debug for PredicateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateTable")
            .field("name", &self.name)
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Ordered registry of predicate sources.
///
/// Sources are searched in order and the first one providing a rule wins.
/// [`Validators::default`] holds the built-in [`BaseRules`] followed by an
/// empty [`FileRules`]; [`Validators::new`] puts custom sources in front of
/// those defaults.
#[derive(Clone)]
pub struct Validators {
    sources: Vec<Arc<dyn RuleSource>>,
}

impl Validators {
    /// Custom sources searched before the built-in defaults.
    pub fn new<S, I>(custom: I) -> Self
    where
        S: RuleSource + 'static,
        I: IntoIterator<Item = S>,
    {
        custom
            .into_iter()
            .fold(Self::builder(), |builder, source| builder.source(source))
            .build()
    }

    /// Built-in defaults with upload metadata for the file rules.
    pub fn with_files(files: UploadedFiles) -> Self {
        Self::builder().files(files).build()
    }

    /// Exactly these sources, without the built-in defaults.
    pub fn only(sources: Vec<Arc<dyn RuleSource>>) -> Self {
        Self { sources }
    }

    pub fn builder() -> ValidatorsBuilder {
        ValidatorsBuilder::new()
    }

    /// Sources in search order.
    pub fn sources(&self) -> &[Arc<dyn RuleSource>] {
        &self.sources
    }

    /// Source names in search order.
    pub fn names(&self) -> Vec<&str> {
        self.sources.iter().map(|source| source.name()).collect()
    }

    /// Every resolvable rule name, deduplicated, in search order.
    pub fn rule_names(&self) -> Vec<&str> {
        let names: IndexSet<&str> = self
            .sources
            .iter()
            .flat_map(|source| source.rule_names())
            .collect();
        names.into_iter().collect()
    }

    /// The source that would evaluate `rule`.
    pub fn resolve(&self, rule: &str) -> Option<&Arc<dyn RuleSource>> {
        self.sources.iter().find(|source| source.has_rule(rule))
    }

    /// Whether `rule` is a pseudo-rule or provided by some source.
    pub fn is_rule_available(&self, rule: &str) -> bool {
        PSEUDO_RULES.contains(&rule) || self.resolve(rule).is_some()
    }

    /// Evaluate a rule with the first source that provides it.
    ///
    /// # Errors
    ///
    /// [`ValidationError::UnknownRule`] when no source provides the rule, or
    /// whatever configuration error the predicate raises.
    pub fn evaluate(&self, call: &RuleCall<'_>) -> Result<bool> {
        for source in &self.sources {
            if let Some(result) = source.call(call) {
                tracing::trace!(
                    rule = call.rule,
                    field = call.field,
                    source = source.name(),
                    passed = ?result.as_ref().ok(),
                    "Evaluated rule"
                );
                return result;
            }
        }

        tracing::warn!(
            rule = call.rule,
            field = call.field,
            "Validation rule not found"
        );
        Err(ValidationError::unknown_rule(call.rule, call.field))
    }
}

impl Default for Validators {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for Validators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validators")
            .field("sources", &self.names())
            .finish()
    }
}

/// Builder for a [`Validators`] registry.
pub struct ValidatorsBuilder {
    custom: Vec<Arc<dyn RuleSource>>,
    files: UploadedFiles,
    defaults: bool,
}

impl ValidatorsBuilder {
    pub fn new() -> Self {
        Self {
            custom: Vec::new(),
            files: UploadedFiles::new(),
            defaults: true,
        }
    }

    /// Append a custom source. Custom sources are searched in the order they
    /// are added, before the defaults.
    pub fn source(self, source: impl RuleSource + 'static) -> Self {
        self.source_arc(Arc::new(source))
    }

    /// Append a shared custom source.
    pub fn source_arc(mut self, source: Arc<dyn RuleSource>) -> Self {
        self.custom.push(source);
        self
    }

    /// Upload metadata for the built-in file rules.
    pub fn files(mut self, files: UploadedFiles) -> Self {
        self.files = files;
        self
    }

    /// Leave out [`BaseRules`] and [`FileRules`].
    pub fn without_defaults(mut self) -> Self {
        self.defaults = false;
        self
    }

    pub fn build(self) -> Validators {
        let mut sources = self.custom;
        if self.defaults {
            sources.push(Arc::new(BaseRules));
            sources.push(Arc::new(FileRules::new(self.files)));
        }
        Validators { sources }
    }
}

impl Default for ValidatorsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
