//! Dotted-path configuration overrides
//!
//! Overrides are applied to the raw YAML value tree before it is
//! deserialized into [`LaunchConfig`](super::LaunchConfig). A key like
//! `system.data_root` traverses (creating if needed) the intermediate
//! mappings `system`, then sets the leaf `data_root`. Keys without a dot set
//! top-level entries. Keys are independent of one another and application is
//! idempotent.

use serde_yaml::{Mapping, Value};

/// An ordered set of dotted-path overrides
///
/// Built once per invocation from the command-line options that were
/// explicitly provided, consumed once by the loader.
#[derive(Debug, Clone, Default)]
pub struct OverrideSet {
    entries: Vec<(String, Value)>,
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of overrides in the set
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add an override with an arbitrary YAML value
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.entries.push((key.into(), value));
    }

    /// Add a string-valued override
    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.set(key, Value::String(value.into()));
    }

    /// Add an integer-valued override
    pub fn set_int(&mut self, key: impl Into<String>, value: i64) {
        self.set(key, Value::Number(value.into()));
    }

    /// Add a float-valued override
    pub fn set_float(&mut self, key: impl Into<String>, value: f64) {
        self.set(key, Value::Number(serde_yaml::Number::from(value)));
    }

    /// Iterate over the overrides in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Apply every override in the set to a YAML value tree
///
/// A non-mapping document root (e.g. an empty file parsed as null) is
/// replaced by an empty mapping first.
pub fn apply_overrides(doc: &mut Value, overrides: &OverrideSet) {
    for (key, value) in overrides.iter() {
        set_dotted(doc, key, value.clone());
    }
}

/// Set a single dotted-path key on a YAML value tree
pub fn set_dotted(doc: &mut Value, key: &str, value: Value) {
    if !doc.is_mapping() {
        *doc = Value::Mapping(Mapping::new());
    }

    let mut current = doc;
    let mut segments = key.split('.').peekable();
    while let Some(segment) = segments.next() {
        let map = match current {
            Value::Mapping(map) => map,
            // Coerced to a mapping above and on every descent
            _ => return,
        };
        let segment_key = Value::String(segment.to_string());

        if segments.peek().is_none() {
            map.insert(segment_key, value);
            return;
        }

        let slot = map
            .entry(segment_key)
            .or_insert_with(|| Value::Mapping(Mapping::new()));
        if !slot.is_mapping() {
            // A scalar in the way of a nested key is replaced, matching the
            // unconditional nesting of the reference loader.
            *slot = Value::Mapping(Mapping::new());
        }
        current = slot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn lookup<'a>(doc: &'a Value, path: &str) -> &'a Value {
        let mut current = doc;
        for segment in path.split('.') {
            current = current.get(segment).unwrap();
        }
        current
    }

    #[test]
    fn test_top_level_key() {
        let mut value = doc("epochs: 3");
        set_dotted(&mut value, "epochs", Value::Number(7.into()));
        assert_eq!(lookup(&value, "epochs"), &Value::Number(7.into()));
    }

    #[test]
    fn test_nested_key_existing_sections() {
        let mut value = doc("system:\n  data_root: /old\n  log_dir_system: runs");
        set_dotted(&mut value, "system.data_root", Value::String("/new".into()));
        assert_eq!(lookup(&value, "system.data_root"), &Value::String("/new".into()));
        // Sibling keys are untouched
        assert_eq!(
            lookup(&value, "system.log_dir_system"),
            &Value::String("runs".into())
        );
    }

    #[test]
    fn test_intermediate_mappings_are_created() {
        let mut value = doc("{}");
        set_dotted(&mut value, "a.b.c", Value::Number(1.into()));
        assert_eq!(lookup(&value, "a.b.c"), &Value::Number(1.into()));
    }

    #[test]
    fn test_scalar_intermediate_is_replaced() {
        let mut value = doc("a: 5");
        set_dotted(&mut value, "a.b", Value::Number(1.into()));
        assert_eq!(lookup(&value, "a.b"), &Value::Number(1.into()));
    }

    #[test]
    fn test_null_document_becomes_mapping() {
        let mut value = Value::Null;
        set_dotted(&mut value, "system.data_root", Value::String("/d".into()));
        assert_eq!(lookup(&value, "system.data_root"), &Value::String("/d".into()));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut overrides = OverrideSet::new();
        overrides.set_string("system.data_root", "/data");
        overrides.set_int("train.epochs", 12);

        let mut once = doc("system:\n  data_root: /old");
        apply_overrides(&mut once, &overrides);
        let mut twice = once.clone();
        apply_overrides(&mut twice, &overrides);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_set_is_noop() {
        let mut value = doc("train:\n  epochs: 9");
        let before = value.clone();
        apply_overrides(&mut value, &OverrideSet::new());
        assert_eq!(value, before);
    }
}
