//! Declarative field validation.
//!
//! A form is checked against a table of [`FieldRule`]s by [`validate`]. Each
//! field reports at most one message: the message of its first failing rule.

use std::fmt::{Display, Formatter, Result as FmtResult};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// A compiled pattern. Compilation errors make every value fail the rule.
pub type Pattern = Lazy<Result<Regex, regex::Error>>;

/// Bangladeshi mobile numbers: `01`, an operator digit from 3 to 9, eight more digits.
/// ASCII digits only.
pub static PHONE_PATTERN: Pattern = Lazy::new(|| Regex::new(r"^01[3-9][0-9]{8}$"));

/// Dot-separated atoms on both sides of the `@`, ending in a top-level domain
/// of two or more letters.
pub static EMAIL_PATTERN: Pattern = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@([A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
    )
});

#[derive(Debug)]
pub enum Rule {
    /// At least this many characters.
    MinChars(usize),
    Matches(&'static Pattern),
    OneOf(&'static [&'static str]),
}

impl Rule {
    fn accepts(&self, value: &str) -> bool {
        match self {
            Self::MinChars(min) => value.chars().count() >= *min,
            Self::Matches(pattern) => pattern
                .as_ref()
                .is_ok_and(|pattern| pattern.is_match(value)),
            Self::OneOf(allowed) => allowed.contains(&value),
        }
    }
}

#[derive(Debug)]
pub struct FieldRule {
    pub field: &'static str,
    pub rule: Rule,
    /// Absent and empty values pass.
    pub optional: bool,
    pub message: &'static str,
}

impl FieldRule {
    #[must_use]
    pub const fn required(field: &'static str, rule: Rule, message: &'static str) -> Self {
        Self {
            field,
            rule,
            optional: false,
            message,
        }
    }

    #[must_use]
    pub const fn optional(field: &'static str, rule: Rule, message: &'static str) -> Self {
        Self {
            field,
            rule,
            optional: true,
            message,
        }
    }

    fn check(&self, value: Option<&str>) -> bool {
        match value {
            None | Some("") if self.optional => true,
            None => false,
            Some(value) => self.rule.accepts(value),
        }
    }
}

/// Access to named string fields of a form.
pub trait Fields {
    fn field(&self, name: &str) -> Option<&str>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Every field that failed validation, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let fields: Vec<&str> = self.0.iter().map(|error| error.field).collect();

        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Check `form` against `rules`.
///
/// # Errors
///
/// Returns the first failing message of every invalid field.
pub fn validate<F: Fields + ?Sized>(form: &F, rules: &[FieldRule]) -> Result<(), ValidationErrors> {
    let mut errors: Vec<FieldError> = Vec::new();

    for rule in rules {
        if errors.iter().any(|error| error.field == rule.field) {
            continue;
        }

        if !rule.check(form.field(rule.field)) {
            errors.push(FieldError {
                field: rule.field,
                message: rule.message,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashMap;

    use super::*;

    struct Form(FxHashMap<&'static str, &'static str>);

    impl Fields for Form {
        fn field(&self, name: &str) -> Option<&str> {
            self.0.get(name).copied()
        }
    }

    static RULES: [FieldRule; 3] = [
        FieldRule::required("name", Rule::MinChars(2), "too short"),
        FieldRule::required("name", Rule::OneOf(&["Al", "Bo"]), "unknown"),
        FieldRule::optional("email", Rule::Matches(&EMAIL_PATTERN), "bad email"),
    ];

    fn form(pairs: &[(&'static str, &'static str)]) -> Form {
        Form(pairs.iter().copied().collect())
    }

    #[test]
    fn patterns_compile() {
        assert!(PHONE_PATTERN.is_ok());
        assert!(EMAIL_PATTERN.is_ok());
    }

    fn email_matches(value: &str) -> bool {
        Rule::Matches(&EMAIL_PATTERN).accepts(value)
    }

    #[test]
    fn emails_need_a_real_domain() {
        for email in ["rahim@example.com", "r.uddin+shop@mail.example.co"] {
            assert!(email_matches(email), "{email} should be accepted");
        }

        for email in [
            "a@b.c",
            "a..b@x.yz",
            ".a@x.yz",
            "a.@x.yz",
            "a@x..yz",
            "a@-x.yz",
            "a b@x.yz",
            "a@x",
        ] {
            assert!(!email_matches(email), "{email} should be rejected");
        }
    }

    #[test]
    fn each_field_reports_its_first_failure() {
        let result = validate(&form(&[("name", "A"), ("email", "nope")]), &RULES);

        assert_eq!(
            result,
            Err(ValidationErrors(vec![
                FieldError {
                    field: "name",
                    message: "too short",
                },
                FieldError {
                    field: "email",
                    message: "bad email",
                },
            ]))
        );
    }

    #[test]
    fn optional_fields_accept_absent_and_empty_values() {
        assert!(validate(&form(&[("name", "Al")]), &RULES).is_ok());
        assert!(validate(&form(&[("name", "Bo"), ("email", "")]), &RULES).is_ok());
    }

    #[test]
    fn required_fields_fail_when_absent() {
        let result = validate(&form(&[]), &RULES);

        assert_eq!(
            result.map_err(|errors| errors.message_for("name")),
            Err(Some("too short"))
        );
    }

    #[test]
    fn min_chars_counts_characters_not_bytes() {
        assert!(Rule::MinChars(2).accepts("ঢা"));
        assert!(!Rule::MinChars(3).accepts("ঢা"));
    }
}
