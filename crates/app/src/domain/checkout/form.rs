//! Checkout form.

use crate::domain::{
    checkout::validation::{
        EMAIL_PATTERN, FieldError, FieldRule, Fields, PHONE_PATTERN, Rule, ValidationErrors,
        validate,
    },
    orders::records::PaymentMethod,
};

pub static CHECKOUT_RULES: [FieldRule; 7] = [
    FieldRule::required("name", Rule::MinChars(2), "Name must be at least 2 characters"),
    FieldRule::required("address", Rule::MinChars(5), "Address is required"),
    FieldRule::required("city", Rule::MinChars(2), "City is required"),
    FieldRule::required("zip", Rule::MinChars(4), "Zip code is required"),
    FieldRule::required(
        "phone",
        Rule::Matches(&PHONE_PATTERN),
        "Invalid phone number (must be 11 digits, starting with 01)",
    ),
    FieldRule::optional("email", Rule::Matches(&EMAIL_PATTERN), "Invalid email address"),
    FieldRule::required(
        "payment_method",
        Rule::OneOf(&["cod", "online"]),
        "You need to select a payment method.",
    ),
];

/// Shipping and payment input as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub payment_method: String,
}

impl Fields for CheckoutForm {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "phone" => Some(&self.phone),
            "email" => self.email.as_deref(),
            "address" => Some(&self.address),
            "city" => Some(&self.city),
            "zip" => Some(&self.zip),
            "payment_method" => Some(&self.payment_method),
            _ => None,
        }
    }
}

/// A form that passed [`CHECKOUT_RULES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutDetails {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    /// Validate the form. An empty email is dropped.
    ///
    /// # Errors
    ///
    /// Returns the message of every invalid field.
    pub fn validate(self) -> Result<CheckoutDetails, ValidationErrors> {
        validate(&self, &CHECKOUT_RULES)?;

        let payment_method = PaymentMethod::parse(&self.payment_method).ok_or_else(|| {
            ValidationErrors(vec![FieldError {
                field: "payment_method",
                message: "You need to select a payment method.",
            }])
        })?;

        Ok(CheckoutDetails {
            name: self.name,
            phone: self.phone,
            email: self.email.filter(|email| !email.is_empty()),
            address: self.address,
            city: self.city,
            zip: self.zip,
            payment_method,
        })
    }
}
