//! # Template Interpolation
//!
//! Substitutes dashboard variables into query fields. Recognized forms are
//! `$name`, `${name}`, `${name:format}` and `[[name]]`. The format suffix is
//! accepted and ignored. Tokens naming an unknown variable are left as-is so
//! a half-configured dashboard still shows what was typed.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

fn variable_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$(\w+)|\[\[(\w+)\]\]|\$\{(\w+)(?::[^}]+)?\}")
            .expect("variable pattern is a valid regex")
    })
}

/// Current values of the dashboard's template variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVariables {
    values: HashMap<String, String>,
}

impl TemplateVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Replace every known variable token in `template`
    pub fn replace(&self, template: &str) -> String {
        if !template.contains('$') && !template.contains("[[") {
            return template.to_string();
        }

        variable_pattern()
            .replace_all(template, |caps: &Captures<'_>| {
                let name = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .or_else(|| caps.get(3))
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                match self.get(name) {
                    Some(value) => value.to_string(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

impl<K, V> FromIterator<(K, V)> for TemplateVariables
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}
