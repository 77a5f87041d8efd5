//! The validation result and its rules.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::{FieldError, FormErrors, FormValues};

pub const BLANK_FIELD: &str = "This field cannot be blank";
pub const INVALID_EMAIL: &str = "Invalid email address";
pub const INVALID_DATE: &str = "Invalid date";

/// Local part per RFC 5322 atoms, domain as dot-separated DNS labels.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is a valid regex")
});

/// Submitted values plus the errors recorded against them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    values: FormValues,
    errors: FormErrors,
}

impl Form {
    pub fn new(values: FormValues) -> Self {
        Self {
            values,
            errors: FormErrors::default(),
        }
    }

    /// A form with nothing submitted yet.
    pub fn empty() -> Self {
        Self::new(FormValues::empty())
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Raw submitted value; absent fields read as "".
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field)
    }

    /// Whether the field carries a non-blank value.
    pub fn has(&self, field: &str) -> bool {
        !self.get(field).trim().is_empty()
    }

    /// Records an error produced by a rule that lives outside this engine.
    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.add(field, message);
    }

    /// Flags each field whose trimmed value is empty.
    pub fn required(&mut self, fields: &[&str]) {
        for field in fields {
            if !self.has(field) {
                self.errors.add(*field, BLANK_FIELD);
            }
        }
    }

    /// Flags the field when its trimmed value has fewer than `min` characters.
    pub fn min_length(&mut self, field: &str, min: usize) {
        if self.get(field).trim().chars().count() < min {
            self.errors.add(
                field,
                format!("This field must be at least {} characters long", min),
            );
        }
    }

    /// Flags the field when its value is not a syntactically valid address.
    pub fn is_email(&mut self, field: &str) {
        if !EMAIL_PATTERN.is_match(self.get(field)) {
            self.errors.add(field, INVALID_EMAIL);
        }
    }

    /// Flags the field unless it holds a `YYYY-MM-DD` calendar date.
    pub fn is_date(&mut self, field: &str) {
        if NaiveDate::parse_from_str(self.get(field).trim(), "%Y-%m-%d").is_err() {
            self.errors.add(field, INVALID_DATE);
        }
    }

    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Template-facing snapshot of the form.
    pub fn view(&self) -> FormView {
        let mut errors = BTreeMap::new();
        for error in self.errors.iter() {
            errors
                .entry(error.field.clone())
                .or_insert_with(|| error.message.clone());
        }

        FormView {
            values: self
                .values
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            errors,
            error_list: self.errors.iter().cloned().collect(),
            valid: self.valid(),
        }
    }
}

/// Serializable form state handed to templates.
///
/// `errors` holds the first message per field; `error_list` keeps every
/// message in the order the rules produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub values: BTreeMap<String, String>,
    pub errors: BTreeMap<String, String>,
    pub error_list: Vec<FieldError>,
    pub valid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn form(pairs: &[(&str, &str)]) -> Form {
        Form::new(FormValues::from_pairs(pairs.iter().copied()))
    }

    #[test]
    fn no_rules_means_valid() {
        assert!(form(&[("a", "")]).valid());
        assert!(Form::empty().valid());
    }

    #[test]
    fn required_table() {
        let cases = [
            ("", false),
            ("   ", false),
            ("\t\n", false),
            ("x", true),
            ("  John ", true),
        ];
        for (value, ok) in cases {
            let mut f = form(&[("first_name", value)]);
            f.required(&["first_name"]);
            assert_eq!(f.valid(), ok, "value {:?}", value);
            if !ok {
                assert_eq!(f.errors().get("first_name"), Some(BLANK_FIELD));
            }
        }
    }

    #[test]
    fn required_checks_every_named_field() {
        let mut f = form(&[("first_name", "Ann"), ("last_name", " ")]);
        f.required(&["first_name", "last_name", "email"]);
        assert_eq!(f.errors().len(), 2);
        assert_eq!(f.errors().get("first_name"), None);
        assert_eq!(f.errors().get("last_name"), Some(BLANK_FIELD));
        assert_eq!(f.errors().get("email"), Some(BLANK_FIELD));
    }

    #[test]
    fn min_length_table() {
        let cases = [
            ("", false),
            ("ab", false),
            ("  ab  ", false),
            ("abc", true),
            (" abc ", true),
            ("Éva", true),
        ];
        for (value, ok) in cases {
            let mut f = form(&[("first_name", value)]);
            f.min_length("first_name", 3);
            assert_eq!(f.valid(), ok, "value {:?}", value);
        }
        let mut f = form(&[("first_name", "St")]);
        f.min_length("first_name", 3);
        assert_eq!(
            f.errors().get("first_name"),
            Some("This field must be at least 3 characters long")
        );
    }

    #[test]
    fn is_email_table() {
        let cases = [
            ("hello@gmail.com", true),
            ("first.last+tag@sub.example.co.uk", true),
            ("o'brien@example.ie", true),
            ("", false),
            ("   ", false),
            ("not-an-email", false),
            ("@example.com", false),
            ("user@", false),
            ("user@localhost", false),
            ("user@@example.com", false),
            ("user name@example.com", false),
            ("user@-example.com", false),
        ];
        for (value, ok) in cases {
            let mut f = form(&[("email", value)]);
            f.is_email("email");
            assert_eq!(f.valid(), ok, "value {:?}", value);
        }
    }

    #[test]
    fn is_date_accepts_only_iso_calendar_dates() {
        for (value, ok) in [
            ("2024-02-29", true),
            (" 2024-01-01 ", true),
            ("2023-02-29", false),
            ("01/02/2024", false),
            ("", false),
        ] {
            let mut f = form(&[("start", value)]);
            f.is_date("start");
            assert_eq!(f.valid(), ok, "value {:?}", value);
        }
    }

    #[test]
    fn rules_on_absent_fields_fail_without_panicking() {
        let mut f = Form::empty();
        f.required(&["first_name"]);
        f.min_length("first_name", 3);
        f.is_email("email");
        f.is_date("start");
        assert_eq!(f.errors().len(), 4);
        assert_eq!(f.errors().get("email"), Some(INVALID_EMAIL));
    }

    #[test]
    fn rules_do_not_short_circuit() {
        let mut f = form(&[("first_name", "")]);
        f.required(&["first_name"]);
        f.min_length("first_name", 3);
        let all: Vec<&str> = f.errors().all_for("first_name").collect();
        assert_eq!(all.len(), 2);
        assert_eq!(f.errors().get("first_name"), Some(BLANK_FIELD));
    }

    #[test]
    fn view_exposes_first_error_and_full_list() {
        let mut f = form(&[("first_name", ""), ("email", "x")]);
        f.required(&["first_name"]);
        f.min_length("first_name", 3);
        f.is_email("email");

        let view = f.view();
        assert!(!view.valid);
        assert_eq!(view.errors.get("first_name").map(String::as_str), Some(BLANK_FIELD));
        assert_eq!(view.error_list.len(), 3);
        assert_eq!(view.error_list[2].field, "email");
        assert_eq!(view.values.get("email").map(String::as_str), Some("x"));
    }

    fn apply_booking_rules(values: &FormValues) -> Form {
        let mut f = Form::new(values.clone());
        f.required(&["first_name", "last_name", "email"]);
        f.min_length("first_name", 3);
        f.is_email("email");
        f
    }

    proptest! {
        #[test]
        fn required_flags_iff_trimmed_value_is_empty(value in "\\PC{0,12}") {
            let mut f = form(&[("field", value.as_str())]);
            f.required(&["field"]);
            prop_assert_eq!(f.valid(), !value.trim().is_empty());
        }

        #[test]
        fn min_length_flags_iff_trimmed_length_is_short(value in "\\PC{0,10}", n in 0usize..8) {
            let mut f = form(&[("field", value.as_str())]);
            f.min_length("field", n);
            prop_assert_eq!(f.valid(), value.trim().chars().count() >= n);
        }

        #[test]
        fn revalidation_is_idempotent(
            first in "[a-zA-Z ]{0,6}",
            last in "[a-zA-Z ]{0,6}",
            email in "[a-z@.]{0,12}",
        ) {
            let values = FormValues::from_pairs([
                ("first_name", first),
                ("last_name", last),
                ("email", email),
            ]);
            prop_assert_eq!(apply_booking_rules(&values), apply_booking_rules(&values));
        }
    }
}
