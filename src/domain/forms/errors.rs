//! Field-level validation errors.

use serde::Serialize;

/// One recorded rule failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered sequence of rule failures.
///
/// A field may carry several errors; lookups return the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// First error recorded for the field, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// All errors recorded for the field, oldest first.
    pub fn all_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_first_error_for_field() {
        let mut errors = FormErrors::default();
        errors.add("name", "first");
        errors.add("email", "other");
        errors.add("name", "second");

        assert_eq!(errors.get("name"), Some("first"));
        assert_eq!(errors.all_for("name").collect::<Vec<_>>(), vec!["first", "second"]);
        assert_eq!(errors.get("phone"), None);
        assert_eq!(errors.len(), 3);
    }
}
