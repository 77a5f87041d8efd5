//! Form validation engine.
//!
//! A [`Form`] wraps the values a visitor submitted and collects field-level
//! errors as the caller applies rules to it. Rules never short-circuit each
//! other; the form is valid exactly when no rule recorded an error.
//!
//! ```
//! use bookings::domain::forms::{Form, FormValues};
//!
//! let mut form = Form::new(FormValues::from_pairs([
//!     ("first_name", "St"),
//!     ("email", "hello@example.com"),
//! ]));
//! form.required(&["first_name", "email"]);
//! form.min_length("first_name", 3);
//! form.is_email("email");
//!
//! assert!(!form.valid());
//! assert_eq!(
//!     form.errors().get("first_name"),
//!     Some("This field must be at least 3 characters long")
//! );
//! ```

mod errors;
mod form;
mod values;

pub use errors::{FieldError, FormErrors};
pub use form::{Form, FormView, BLANK_FIELD, INVALID_DATE, INVALID_EMAIL};
pub use values::FormValues;
