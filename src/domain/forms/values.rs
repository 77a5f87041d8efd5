//! Submitted field values.

use std::collections::HashSet;

use serde::Serialize;

/// Field name to submitted value mapping.
///
/// Keys are unique; when a body repeats a key the first occurrence wins.
/// Submission order is preserved for iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormValues(Vec<(String, String)>);

impl FormValues {
    /// An empty submission, used when a form is first displayed.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the mapping from (field, value) pairs in submission order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut values = Vec::new();
        for (key, value) in pairs {
            let key: String = key.into();
            if seen.insert(key.clone()) {
                values.push((key, value.into()));
            }
        }
        Self(values)
    }

    /// Value of a field, or the empty string when it was not submitted.
    pub fn get(&self, field: &str) -> &str {
        self.0
            .iter()
            .find(|(key, _)| key == field)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// Sets or replaces a value, keeping the original position of the key.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| *key == field) {
            Some(entry) => entry.1 = value,
            None => self.0.push((field, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<(String, String)>> for FormValues {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::from_pairs(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_reads_as_empty_string() {
        let values = FormValues::from_pairs([("a", "1")]);
        assert_eq!(values.get("b"), "");
    }

    #[test]
    fn first_duplicate_wins_and_order_is_kept() {
        let values = FormValues::from_pairs([("b", "1"), ("a", "2"), ("b", "3")]);
        assert_eq!(values.get("b"), "1");
        let keys: Vec<&str> = values.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn large_bodies_are_deduplicated_in_one_pass() {
        let count = 200_000;
        let pairs: Vec<(String, String)> = (0..count)
            .map(|i| (format!("field_{i}"), i.to_string()))
            .chain(std::iter::once(("field_0".to_string(), "late".to_string())))
            .collect();

        let started = std::time::Instant::now();
        let values = FormValues::from(pairs);
        let elapsed = started.elapsed();

        assert_eq!(values.len(), count);
        assert_eq!(values.get("field_0"), "0");
        assert_eq!(values.get("field_199999"), "199999");
        assert!(
            elapsed < std::time::Duration::from_secs(5),
            "deduplicating {count} keys took {elapsed:?}"
        );
    }

    #[test]
    fn set_replaces_in_place() {
        let mut values = FormValues::from_pairs([("a", "1"), ("b", "2")]);
        values.set("a", "9");
        values.set("c", "3");
        let pairs: Vec<(&str, &str)> = values.iter().collect();
        assert_eq!(pairs, vec![("a", "9"), ("b", "2"), ("c", "3")]);
    }
}
