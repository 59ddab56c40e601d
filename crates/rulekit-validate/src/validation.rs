//! The validation engine.
//!
//! [`Validation`] stores per-field rule specs, labels and custom messages and
//! evaluates them against input data. Each field runs its rules in order and
//! stops at the first failure, so a field carries at most one error per run.
//!
//! Before ordinary rules run, the pseudo-rules are checked anywhere in the
//! field's spec:
//!
//! | rule       | field passes immediately when            |
//! |------------|-------------------------------------------|
//! | `optional` | the field is absent                       |
//! | `blank`    | the field is the empty string             |
//! | `null`     | the field is `null`                       |
//! | `empty`    | the field is present and empty            |
//!
//! ## Example
//!
//! ```rust
//! use rulekit_validate::Validation;
//! use serde_json::json;
//!
//! let mut validation = Validation::new();
//! validation
//!     .set_rule("password", "minLength:5")
//!     .set_rule("confirmPassword", "equals:password")
//!     .set_label("password", "Password")
//!     .set_label("confirmPassword", "Confirm Password");
//!
//! let data = json!({ "password": "123", "confirmPassword": "" });
//! assert!(!validation.validate(&data).unwrap());
//! assert_eq!(
//!     validation.error("confirmPassword").unwrap(),
//!     "The Confirm Password field must be equals the Password field."
//! );
//! ```

use crate::access;
use crate::config::ValidationConfig;
use crate::error::Result;
use crate::grammar::{escape_arg, extract_rules, parse_rule, ParsedRule};
use crate::registry::Validators;
use crate::report::{ErrorRecord, Report};
use crate::rules::RuleCall;
use indexmap::IndexMap;
use regex::Regex;
use rulekit_i18n::{Language, MessageArgs, MessageRenderer, VALIDATION_DOMAIN};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

/// Rules handled by the engine instead of a predicate source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PseudoRule {
    Optional,
    Blank,
    Null,
    Empty,
}

impl PseudoRule {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "optional" => Some(Self::Optional),
            "blank" => Some(Self::Blank),
            "null" => Some(Self::Null),
            "empty" => Some(Self::Empty),
            _ => None,
        }
    }

    /// Whether the field passes without running its other rules.
    fn short_circuits(self, value: Option<&Value>) -> bool {
        match self {
            Self::Optional => value.is_none(),
            Self::Blank => matches!(value, Some(Value::String(s)) if s.is_empty()),
            Self::Null => matches!(value, Some(Value::Null)),
            Self::Empty => value.is_some_and(access::is_empty_value),
        }
    }
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"^\{([A-Za-z0-9_]+)\}$").unwrap())
}

/// A configured field as listed by [`Validation::ruleset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRuleset {
    pub field: String,
    pub label: Option<String>,
    pub rules: Vec<RuleDescription>,
}

/// One rule of a [`FieldRuleset`] with the message it would produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDescription {
    /// Rule in spec syntax, commas in arguments escaped
    pub rule: String,
    pub message: String,
}

/// String rule-spec validation engine.
#[derive(Clone)]
pub struct Validation {
    rules: IndexMap<String, Vec<ParsedRule>>,
    labels: IndexMap<String, String>,
    messages: IndexMap<String, IndexMap<String, String>>,
    validators: Validators,
    renderer: Arc<dyn MessageRenderer>,
    errors: Report,
}

impl Validation {
    /// Engine with the default validators and English messages.
    pub fn new() -> Self {
        Self::with_validators(Validators::default())
    }

    pub fn with_validators(validators: Validators) -> Self {
        Self {
            rules: IndexMap::new(),
            labels: IndexMap::new(),
            messages: IndexMap::new(),
            validators,
            renderer: Arc::new(Language::default()),
            errors: Report::new(),
        }
    }

    /// Engine whose messages use the configured locales.
    pub fn with_config(config: &ValidationConfig, validators: Validators) -> Self {
        let language =
            Language::new(config.locale.as_str()).with_fallback(config.fallback_locale.as_str());
        Self::with_validators(validators).with_renderer(language)
    }

    /// Replace the message renderer.
    pub fn with_renderer(mut self, renderer: impl MessageRenderer + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    pub fn set_renderer(&mut self, renderer: Arc<dyn MessageRenderer>) -> &mut Self {
        self.renderer = renderer;
        self
    }

    pub fn renderer(&self) -> &dyn MessageRenderer {
        self.renderer.as_ref()
    }

    pub fn validators(&self) -> &Validators {
        &self.validators
    }

    /// Clear rules, labels, messages and errors.
    pub fn reset(&mut self) -> &mut Self {
        self.rules.clear();
        self.labels.clear();
        self.messages.clear();
        self.errors = Report::new();
        self
    }

    // Rules

    /// Parse `spec` and make it the field's rule list.
    pub fn set_rule(&mut self, field: impl Into<String>, spec: impl Into<String>) -> &mut Self {
        let field = field.into();
        let rules = extract_rules(&spec.into());
        tracing::debug!(field = %field, rules = rules.len(), "Set validation rules");
        self.rules.insert(field, rules);
        self
    }

    /// Make each element a single rule of the field. Elements are not split
    /// on `|`.
    pub fn set_rule_list<I, S>(&mut self, field: impl Into<String>, rules: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let field = field.into();
        let rules: Vec<ParsedRule> = rules.into_iter().map(|r| parse_rule(r.as_ref())).collect();
        tracing::debug!(field = %field, rules = rules.len(), "Set validation rules");
        self.rules.insert(field, rules);
        self
    }

    /// Replace every configured rule.
    pub fn set_rules<I, F, S>(&mut self, rules: I) -> &mut Self
    where
        I: IntoIterator<Item = (F, S)>,
        F: Into<String>,
        S: Into<String>,
    {
        self.rules.clear();
        for (field, spec) in rules {
            self.set_rule(field, spec);
        }
        self
    }

    pub fn rules(&self) -> &IndexMap<String, Vec<ParsedRule>> {
        &self.rules
    }

    // Labels

    pub fn set_label(&mut self, field: impl Into<String>, label: impl Into<String>) -> &mut Self {
        self.labels.insert(field.into(), label.into());
        self
    }

    /// Replace every label.
    pub fn set_labels<I, F, L>(&mut self, labels: I) -> &mut Self
    where
        I: IntoIterator<Item = (F, L)>,
        F: Into<String>,
        L: Into<String>,
    {
        self.labels.clear();
        for (field, label) in labels {
            self.set_label(field, label);
        }
        self
    }

    pub fn label(&self, field: &str) -> Option<&str> {
        self.labels.get(field).map(String::as_str)
    }

    pub fn labels(&self) -> &IndexMap<String, String> {
        &self.labels
    }

    // Custom messages

    /// Custom message template for a field rule.
    pub fn set_message(
        &mut self,
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> &mut Self {
        self.messages
            .entry(field.into())
            .or_default()
            .insert(rule.into(), message.into());
        self
    }

    /// Replace every custom message. Takes `field -> (rule -> template)`.
    pub fn set_messages<I, F, M, R, S>(&mut self, messages: I) -> &mut Self
    where
        I: IntoIterator<Item = (F, M)>,
        F: Into<String>,
        M: IntoIterator<Item = (R, S)>,
        R: Into<String>,
        S: Into<String>,
    {
        self.messages.clear();
        for (field, rules) in messages {
            let field = field.into();
            for (rule, message) in rules {
                self.set_message(field.clone(), rule, message);
            }
        }
        self
    }

    pub fn message(&self, field: &str, rule: &str) -> Option<&str> {
        self.messages
            .get(field)
            .and_then(|rules| rules.get(rule))
            .map(String::as_str)
    }

    pub fn messages(&self) -> &IndexMap<String, IndexMap<String, String>> {
        &self.messages
    }

    // Running

    /// Validate every configured field and store the errors.
    ///
    /// # Errors
    ///
    /// A configuration error (unknown rule, bad argument) aborts the run and
    /// leaves no stored errors.
    pub fn validate(&mut self, data: &Value) -> Result<bool> {
        self.errors = Report::new();
        let report = self.check(data)?;
        let passed = report.passed();
        self.errors = report;
        Ok(passed)
    }

    /// Validate only the configured fields present in `data` and store the
    /// errors. Absent fields are skipped entirely.
    pub fn validate_only(&mut self, data: &Value) -> Result<bool> {
        self.errors = Report::new();
        let report = self.check_only(data)?;
        let passed = report.passed();
        self.errors = report;
        Ok(passed)
    }

    /// Validate every configured field without touching stored errors.
    pub fn check(&self, data: &Value) -> Result<Report> {
        self.run(self.rules.iter(), data)
    }

    /// Validate the present fields without touching stored errors.
    pub fn check_only(&self, data: &Value) -> Result<Report> {
        self.run(
            self.rules
                .iter()
                .filter(|(field, _)| access::is_present(field, data)),
            data,
        )
    }

    /// Whether `rule` can be used in a spec.
    pub fn is_rule_available(&self, rule: &str) -> bool {
        self.validators.is_rule_available(rule)
    }

    fn run<'a>(
        &self,
        fields: impl Iterator<Item = (&'a String, &'a Vec<ParsedRule>)>,
        data: &Value,
    ) -> Result<Report> {
        let started = Instant::now();
        let mut report = Report::new();
        let mut evaluated = 0usize;

        for (field, rules) in fields {
            evaluated += 1;
            if let Some(record) = self.validate_field(field, rules, data)? {
                report.insert(field.as_str(), record);
            }
        }

        tracing::debug!(
            fields = evaluated,
            passed = report.passed(),
            duration_us = started.elapsed().as_micros() as u64,
            "Validation finished"
        );
        Ok(report)
    }

    fn validate_field(
        &self,
        field: &str,
        rules: &[ParsedRule],
        data: &Value,
    ) -> Result<Option<ErrorRecord>> {
        let value = access::value(field, data);
        let mut remaining = Vec::with_capacity(rules.len());

        for rule in rules {
            match PseudoRule::parse(&rule.name) {
                Some(pseudo) if pseudo.short_circuits(value) => {
                    tracing::trace!(field, rule = %rule.name, "Field passed by pseudo-rule");
                    return Ok(None);
                }
                Some(_) => {}
                None => remaining.push(rule),
            }
        }

        for rule in remaining {
            let args = self.replace_args(&rule.args, data);
            let call = RuleCall::new(&rule.name, field, data, &args);
            if !self.validators.evaluate(&call)? {
                return Ok(Some(self.error_record(&rule.name, args)));
            }
        }

        Ok(None)
    }

    /// Substitute `{key}` arguments with the scalar value of top-level
    /// `data[key]`. Anything else stays literal.
    fn replace_args(&self, args: &[String], data: &Value) -> Vec<String> {
        args.iter()
            .map(|arg| {
                placeholder_regex()
                    .captures(arg)
                    .and_then(|captures| data.get(&captures[1]))
                    .and_then(access::scalar_string)
                    .unwrap_or_else(|| arg.clone())
            })
            .collect()
    }

    /// Failure record, with the compared field of `equals`/`notEquals`
    /// replaced by its label.
    fn error_record(&self, rule: &str, mut args: Vec<String>) -> ErrorRecord {
        if rule == "equals" || rule == "notEquals" {
            if let Some(other) = args.first_mut() {
                if let Some(label) = self.label(other) {
                    *other = label.to_string();
                }
            }
        }
        ErrorRecord::new(rule, args)
    }

    // Errors and messages

    /// Record an error for `field` directly.
    pub fn set_error<I, S>(
        &mut self,
        field: impl Into<String>,
        rule: impl Into<String>,
        args: I,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.errors.insert(field, ErrorRecord::new(rule, args));
        self
    }

    /// Rendered message of the stored error for `field`.
    pub fn error(&self, field: &str) -> Option<String> {
        self.errors
            .error(field)
            .map(|record| self.render_error(field, record))
    }

    /// Rendered messages of every stored error.
    pub fn errors(&self) -> IndexMap<String, String> {
        self.messages_for(&self.errors)
    }

    /// Stored errors of the last run.
    pub fn report(&self) -> &Report {
        &self.errors
    }

    /// Rendered messages of a report returned by [`check`](Self::check).
    pub fn messages_for(&self, report: &Report) -> IndexMap<String, String> {
        report
            .errors()
            .iter()
            .map(|(field, record)| (field.clone(), self.render_error(field, record)))
            .collect()
    }

    /// Format the custom message for `(field, rule)` if one is set, otherwise
    /// render the localized default.
    pub fn filled_message(&self, field: &str, rule: &str, args: &MessageArgs) -> String {
        match self.message(field, rule) {
            Some(template) => self.renderer.format_message(template, args),
            None => self.renderer.render(VALIDATION_DOMAIN, rule, args),
        }
    }

    /// Every configured field with its rules and their messages.
    pub fn ruleset(&self) -> Vec<FieldRuleset> {
        self.rules
            .iter()
            .map(|(field, rules)| {
                let label = self.label(field);
                let rules = rules
                    .iter()
                    .map(|rule| {
                        let escaped: Vec<String> =
                            rule.args.iter().map(|arg| escape_arg(arg)).collect();
                        let args = message_args(label.unwrap_or(field), &escaped);
                        RuleDescription {
                            rule: rule.to_string(),
                            message: self.filled_message(field, &rule.name, &args),
                        }
                    })
                    .collect();
                FieldRuleset {
                    field: field.clone(),
                    label: label.map(str::to_string),
                    rules,
                }
            })
            .collect()
    }

    fn render_error(&self, field: &str, record: &ErrorRecord) -> String {
        let args = message_args(self.label(field).unwrap_or(field), &record.args);
        self.filled_message(field, &record.rule, &args)
    }
}

/// Message placeholders: positional `{0}`, `{1}`, ..., `{args}` for all
/// arguments joined by `", "`, and `{field}`.
fn message_args(field: &str, args: &[String]) -> MessageArgs {
    let mut result: MessageArgs = args
        .iter()
        .enumerate()
        .map(|(i, arg)| (i.to_string(), arg.clone()))
        .collect();
    result.insert("args".to_string(), args.join(", "));
    result.insert("field".to_string(), field.to_string());
    result
}

impl Default for Validation {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validation")
            .field("rules", &self.rules)
            .field("labels", &self.labels)
            .field("messages", &self.messages)
            .field("validators", &self.validators)
            .field("errors", &self.errors)
            .finish()
    }
}
