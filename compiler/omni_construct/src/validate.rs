//! Post-construction validation.

use omni_ir::Value;

/// Constraint violations found on a constructed value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{subject} failed validation: {}", violations.join("; "))]
pub struct ValidationError {
    pub subject: String,
    pub violations: Vec<String>,
}

/// Checks constructed values before they are stored.
pub trait Validator: Send + Sync {
    fn validate(&self, value: &Value) -> Result<(), ValidationError>;
}

/// Collects [`Object::violations`](omni_ir::Object::violations) from the
/// value and, for arrays, from every element.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstraintValidator;

impl Validator for ConstraintValidator {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        let mut violations = Vec::new();
        collect_violations(value, &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                subject: value.kind().to_string(),
                violations,
            })
        }
    }
}

fn collect_violations(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(obj) => out.extend(obj.get().violations()),
        Value::Array(arr) => {
            for item in arr {
                collect_violations(item, out);
            }
        }
        _ => {}
    }
}

/// Builder for violation lists, used by `Object::violations` impls.
///
/// ```
/// use omni_construct::Constraints;
///
/// let name: Option<String> = None;
/// let violations = Constraints::new()
///     .not_null("name", &name)
///     .min("threads", 0, 1)
///     .finish();
/// assert_eq!(violations.len(), 2);
/// ```
#[derive(Debug, Default)]
#[must_use]
pub struct Constraints {
    violations: Vec<String>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn not_null<T>(mut self, field: &str, value: &Option<T>) -> Self {
        if value.is_none() {
            self.violations.push(format!("{field} may not be null"));
        }
        self
    }

    pub fn not_empty(mut self, field: &str, is_empty: bool) -> Self {
        if is_empty {
            self.violations.push(format!("{field} may not be empty"));
        }
        self
    }

    pub fn min(mut self, field: &str, value: i64, min: i64) -> Self {
        if value < min {
            self.violations
                .push(format!("{field} must be at least {min}, was {value}"));
        }
        self
    }

    pub fn finish(self) -> Vec<String> {
        self.violations
    }
}

#[cfg(test)]
mod tests;
