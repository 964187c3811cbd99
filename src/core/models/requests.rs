//! Inbound payloads and the rules they are validated against.
//!
//! Every field is an `Option` so that a missing required field surfaces as a
//! field error instead of a body deserialization failure. Bodies are read as a
//! JSON object first: strings are trimmed (passwords excepted), blank strings
//! count as null, and a value of the wrong type is recorded against its field.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use super::user::Role;
use crate::core::errors::FieldErrors;

const INVALID_ROLE: &str = "The selected role is invalid.";

fn validate_role(role: &str) -> Result<(), ValidationError> {
    role.parse::<Role>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("in").with_message(Cow::Borrowed(INVALID_ROLE)))
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

enum Text {
    Missing,
    Null,
    Given(String),
    NotText,
}

/// A request body split into its fields, plus the type errors found while
/// reading them.
struct Input {
    fields: Map<String, Value>,
    errors: FieldErrors,
}

impl Input {
    fn new(fields: Map<String, Value>) -> Self {
        Input {
            fields,
            errors: FieldErrors::default(),
        }
    }

    fn take(&mut self, field: &str, trim: bool) -> Text {
        match self.fields.remove(field) {
            None => Text::Missing,
            Some(Value::Null) => Text::Null,
            Some(Value::String(s)) => {
                let s = if trim { s.trim().to_string() } else { s };
                if s.is_empty() { Text::Null } else { Text::Given(s) }
            }
            Some(_) => Text::NotText,
        }
    }

    /// For fields under a `required` rule: null is left to that rule.
    fn required(&mut self, field: &str, trim: bool) -> Option<String> {
        match self.take(field, trim) {
            Text::Given(s) => Some(s),
            Text::NotText => {
                self.errors.add(field, format!("The {} field must be a string.", field));
                None
            }
            Text::Missing | Text::Null => None,
        }
    }

    /// For fields that may be left out: only a missing key means "unchanged".
    fn optional(&mut self, field: &str, trim: bool) -> Option<String> {
        match self.take(field, trim) {
            Text::Given(s) => Some(s),
            Text::Missing => None,
            Text::Null | Text::NotText => {
                self.errors.add(field, format!("The {} field must be a string.", field));
                None
            }
        }
    }

    fn role(&mut self) -> Option<String> {
        match self.take("role", true) {
            Text::Given(s) => Some(s),
            Text::Missing => None,
            Text::Null | Text::NotText => {
                self.errors.add("role", INVALID_ROLE);
                None
            }
        }
    }

    /// Only ever compared against `password`.
    fn confirmation(&mut self) -> Option<String> {
        match self.take("password_confirmation", false) {
            Text::Given(s) => Some(s),
            _ => None,
        }
    }
}

/// Runs the derived rules and the confirmation rule, then lets type errors
/// replace whatever the rules said about the same field.
fn check_all(
    validated: Result<(), ValidationErrors>,
    input_errors: &FieldErrors,
    password: Option<&str>,
    confirmation: Option<&str>,
) -> Result<(), FieldErrors> {
    let mut errors = match validated {
        Ok(()) => FieldErrors::default(),
        Err(e) => FieldErrors::from(e),
    };
    if let Some(password) = password {
        if confirmation != Some(password) {
            errors.add("password", "The password field confirmation does not match.");
        }
    }
    errors.merge(input_errors.clone());

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(from = "Map<String, Value>")]
pub struct CreateUserRequest {
    #[validate(
        required(message = "The name field is required."),
        custom(function = "not_blank", message = "The name field is required."),
        length(max = 255, message = "The name field must not be greater than 255 characters.")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "The email field is required."),
        email(message = "The email field must be a valid email address."),
        length(max = 255, message = "The email field must not be greater than 255 characters.")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "The password field is required."),
        length(min = 8, message = "The password field must be at least 8 characters.")
    )]
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    #[validate(custom(function = "validate_role"))]
    #[schema(example = "user")]
    pub role: Option<String>,
    #[serde(skip)]
    pub input_errors: FieldErrors,
}

impl From<Map<String, Value>> for CreateUserRequest {
    fn from(fields: Map<String, Value>) -> Self {
        let mut input = Input::new(fields);
        CreateUserRequest {
            name: input.required("name", true),
            email: input.required("email", true),
            password: input.required("password", false),
            password_confirmation: input.confirmation(),
            role: input.role(),
            input_errors: input.errors,
        }
    }
}

impl CreateUserRequest {
    /// Field rules plus the password confirmation rule.
    pub fn check(&self) -> Result<(), FieldErrors> {
        check_all(
            self.validate(),
            &self.input_errors,
            self.password.as_deref(),
            self.password_confirmation.as_deref(),
        )
    }

    /// Role after defaulting; only meaningful once `check` has passed.
    pub fn role(&self) -> Role {
        self.role
            .as_deref()
            .and_then(|r| r.parse().ok())
            .unwrap_or_default()
    }
}

/// Admin update; each present field is validated and applied, absent ones are
/// left alone.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(from = "Map<String, Value>")]
pub struct UpdateUserRequest {
    #[validate(
        custom(function = "not_blank", message = "The name field must be a string."),
        length(max = 255, message = "The name field must not be greater than 255 characters.")
    )]
    pub name: Option<String>,
    #[validate(
        email(message = "The email field must be a valid email address."),
        length(max = 255, message = "The email field must not be greater than 255 characters.")
    )]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "The password field must be at least 8 characters."))]
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    #[validate(custom(function = "validate_role"))]
    pub role: Option<String>,
    #[serde(skip)]
    pub input_errors: FieldErrors,
}

impl From<Map<String, Value>> for UpdateUserRequest {
    fn from(fields: Map<String, Value>) -> Self {
        let mut input = Input::new(fields);
        UpdateUserRequest {
            name: input.optional("name", true),
            email: input.optional("email", true),
            password: input.optional("password", false),
            password_confirmation: input.confirmation(),
            role: input.role(),
            input_errors: input.errors,
        }
    }
}

impl UpdateUserRequest {
    pub fn check(&self) -> Result<(), FieldErrors> {
        check_all(
            self.validate(),
            &self.input_errors,
            self.password.as_deref(),
            self.password_confirmation.as_deref(),
        )
    }

    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(|r| r.parse().ok())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(from = "Map<String, Value>")]
pub struct RegisterRequest {
    #[validate(
        required(message = "The name field is required."),
        custom(function = "not_blank", message = "The name field is required."),
        length(max = 255, message = "The name field must not be greater than 255 characters.")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "The email field is required."),
        email(message = "The email field must be a valid email address."),
        length(max = 255, message = "The email field must not be greater than 255 characters.")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "The password field is required."),
        length(min = 8, message = "The password field must be at least 8 characters.")
    )]
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    #[serde(skip)]
    pub input_errors: FieldErrors,
}

impl From<Map<String, Value>> for RegisterRequest {
    fn from(fields: Map<String, Value>) -> Self {
        let mut input = Input::new(fields);
        RegisterRequest {
            name: input.required("name", true),
            email: input.required("email", true),
            password: input.required("password", false),
            password_confirmation: input.confirmation(),
            input_errors: input.errors,
        }
    }
}

impl RegisterRequest {
    pub fn check(&self) -> Result<(), FieldErrors> {
        check_all(
            self.validate(),
            &self.input_errors,
            self.password.as_deref(),
            self.password_confirmation.as_deref(),
        )
    }
}

/// Self-service profile update. Has no `role` field, so a caller cannot
/// change their own role.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(from = "Map<String, Value>")]
pub struct UpdateProfileRequest {
    #[validate(
        custom(function = "not_blank", message = "The name field must be a string."),
        length(max = 255, message = "The name field must not be greater than 255 characters.")
    )]
    pub name: Option<String>,
    #[validate(
        email(message = "The email field must be a valid email address."),
        length(max = 255, message = "The email field must not be greater than 255 characters.")
    )]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "The password field must be at least 8 characters."))]
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    #[serde(skip)]
    pub input_errors: FieldErrors,
}

impl From<Map<String, Value>> for UpdateProfileRequest {
    fn from(fields: Map<String, Value>) -> Self {
        let mut input = Input::new(fields);
        UpdateProfileRequest {
            name: input.optional("name", true),
            email: input.optional("email", true),
            password: input.optional("password", false),
            password_confirmation: input.confirmation(),
            input_errors: input.errors,
        }
    }
}

impl UpdateProfileRequest {
    pub fn check(&self) -> Result<(), FieldErrors> {
        check_all(
            self.validate(),
            &self.input_errors,
            self.password.as_deref(),
            self.password_confirmation.as_deref(),
        )
    }
}

impl From<UpdateProfileRequest> for UpdateUserRequest {
    fn from(req: UpdateProfileRequest) -> Self {
        UpdateUserRequest {
            name: req.name,
            email: req.email,
            password: req.password,
            password_confirmation: req.password_confirmation,
            role: None,
            input_errors: req.input_errors,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
