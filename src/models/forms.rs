use serde::Deserialize;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError, ValidationErrors};

/// Inline error messages keyed by form field.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(custom(function = "required"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "required"))]
    pub password: String,
}

#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(custom(function = "required"), length(max = 250, message = "Name is too long."))]
    pub name: String,
    #[serde(default)]
    #[validate(
        custom(function = "required"),
        email(message = "Invalid email address."),
        length(max = 250, message = "Email is too long.")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "required"))]
    pub password: String,
}

/// Edits an existing task's text.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct EditForm {
    #[serde(default)]
    #[validate(custom(function = "required"), length(max = 250, message = "Task is too long."))]
    pub name: String,
}

/// Single `task` field posted by the home page and the dashboard.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct TaskForm {
    #[serde(default)]
    #[validate(custom(function = "task_required"), length(max = 250, message = "Task is too long."))]
    pub task: String,
}

impl TaskForm {
    pub fn check(&self) -> Result<(), FieldErrors> {
        self.validate().map_err(|e| collect(&e))
    }
}

impl LoginForm {
    pub fn check(&self) -> Result<(), FieldErrors> {
        self.validate().map_err(|e| collect(&e))
    }
}

impl RegisterForm {
    pub fn check(&self) -> Result<(), FieldErrors> {
        self.validate().map_err(|e| collect(&e))
    }
}

impl EditForm {
    pub fn check(&self) -> Result<(), FieldErrors> {
        self.validate().map_err(|e| collect(&e))
    }
}

fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("This field is required.".into());
        return Err(err);
    }
    Ok(())
}

fn task_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("Task cannot be empty.".into());
        return Err(err);
    }
    Ok(())
}

fn collect(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        let messages = errs
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        out.insert(field.to_string(), messages);
    }
    out
}
