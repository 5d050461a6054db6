use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A rule as written in configuration: a regex and its replacement template.
///
/// Replacement templates use `$1` / `${name}` to reference capture groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub pattern: String,
    pub replacement: String,
}

impl RuleSpec {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// A compiled rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pub(super) regex: Regex,
    pub(super) replacement: String,
}

impl Rule {
    fn compile(index: usize, pattern: &str, replacement: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| Error::rule_invalid_pattern(index, pattern, e.to_string()))?;

        Ok(Self {
            regex,
            replacement: replacement.to_string(),
        })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn spec(&self) -> RuleSpec {
        RuleSpec::new(self.pattern(), self.replacement())
    }
}

/// Ordered list of compiled rules. Declaration order is application order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Compile every spec, failing on the first invalid pattern.
    pub fn compile(specs: &[RuleSpec]) -> Result<Self> {
        let rules = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| Rule::compile(i, &spec.pattern, &spec.replacement))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    pub fn builtin() -> Result<Self> {
        Self::compile(&builtin_rules())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn specs(&self) -> Vec<RuleSpec> {
        self.rules.iter().map(Rule::spec).collect()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// The built-in dark-mode table for Tailwind `className` attributes.
pub fn builtin_rules() -> Vec<RuleSpec> {
    vec![
        // Headers and titles
        RuleSpec::new(
            r#"className="text-3xl font-bold text-gray-900""#,
            r#"className="text-3xl font-bold text-gray-900 dark:text-white""#,
        ),
        RuleSpec::new(
            r#"className="text-2xl font-bold text-gray-900""#,
            r#"className="text-2xl font-bold text-gray-900 dark:text-white""#,
        ),
        RuleSpec::new(
            r#"className="text-xl font-bold text-gray-900""#,
            r#"className="text-xl font-bold text-gray-900 dark:text-white""#,
        ),
        RuleSpec::new(
            r#"className="text-lg font-semibold text-gray-900""#,
            r#"className="text-lg font-semibold text-gray-900 dark:text-white""#,
        ),
        RuleSpec::new(
            r#"className="font-semibold text-gray-900""#,
            r#"className="font-semibold text-gray-900 dark:text-white""#,
        ),
        // Icons
        RuleSpec::new(
            r#"<ArrowLeft className="w-6 h-6 text-gray-900" />"#,
            r#"<ArrowLeft className="w-6 h-6 text-gray-900 dark:text-white" />"#,
        ),
        RuleSpec::new(
            r#"<ArrowLeft className="w-5 h-5 text-gray-900" />"#,
            r#"<ArrowLeft className="w-5 h-5 text-gray-900 dark:text-white" />"#,
        ),
        // Body text
        RuleSpec::new(
            r#"className="text-gray-600"([^>]*?)>"#,
            r#"className="text-gray-600 dark:text-gray-400"${1}>"#,
        ),
        RuleSpec::new(
            r#"className="text-sm text-gray-500""#,
            r#"className="text-sm text-gray-500 dark:text-gray-400""#,
        ),
        // Buttons
        RuleSpec::new(
            r#"className="p-2 hover:bg-gray-100 rounded-lg transition""#,
            r#"className="p-2 hover:bg-gray-100 dark:hover:bg-gray-800 rounded-lg transition""#,
        ),
        // Cards
        RuleSpec::new(
            r#"className="bg-white rounded-xl border border-gray-200 p-6 shadow-sm""#,
            r#"className="bg-white dark:bg-gray-800 rounded-xl border border-gray-200 dark:border-gray-700 p-6 shadow-sm""#,
        ),
        RuleSpec::new(
            r#"className="bg-white rounded-xl border border-gray-200 p-4""#,
            r#"className="bg-white dark:bg-gray-800 rounded-xl border border-gray-200 dark:border-gray-700 p-4""#,
        ),
    ]
}
