//! User-defined rules registered through `Validator::extend`.

use crate::case::pascal_case;
use crate::value::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A custom predicate: `(field, value, params) -> passes`.
pub type CustomRule = Arc<dyn Fn(&str, &Value, &[String]) -> bool + Send + Sync>;

/// Custom predicates keyed by PascalCase rule name.
///
/// Consulted only for names that are not built-in rules.
#[derive(Clone, Default)]
pub struct CustomRules {
    rules: HashMap<String, CustomRule>,
}

impl CustomRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `predicate` under the PascalCase form of `name`, returning
    /// the key it was stored under.
    pub fn register<F>(&mut self, name: &str, predicate: F) -> String
    where
        F: Fn(&str, &Value, &[String]) -> bool + Send + Sync + 'static,
    {
        let key = pascal_case(name);
        self.rules.insert(key.clone(), Arc::new(predicate));
        key
    }

    pub fn get(&self, name: &str) -> Option<&CustomRule> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for CustomRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.rules.keys()).finish()
    }
}
