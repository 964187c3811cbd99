use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use validator::ValidationErrors;

/// Field name to the human readable messages raised against it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(pub BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.to_string(), vec![message.into()]);
        FieldErrors(errors)
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    /// Entries of `other` replace this map's entries for the same field.
    pub fn merge(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages = errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("The {} field is invalid.", field))
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        FieldErrors(fields)
    }
}

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("User {0} not found")]
    UserNotFound(String),
    #[error("Email {0} already registered")]
    EmailAlreadyRegistered(String),
    #[error("The given data was invalid")]
    Validation(FieldErrors),
    #[error("User {0} attempted to delete their own account")]
    SelfDeletion(u64),
    #[error("User {0} does not have the admin role")]
    AdminRequired(u64),
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl From<FieldErrors> for AdminError {
    fn from(errors: FieldErrors) -> Self {
        AdminError::Validation(errors)
    }
}
