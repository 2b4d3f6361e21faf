//! Turn `validator` errors into per-field messages for inline form display.

use std::collections::BTreeMap;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Flatten nested validation errors into `path → first message`.
///
/// Nested structs are joined with `.`, list entries with `[i]`, so an invoice
/// line description error comes out as `items[0].description`.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    collect(errors, "", &mut out);
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut BTreeMap<String, String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                if let Some(first) = list.first() {
                    let message = first
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", first.code));
                    out.insert(path, message);
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(entries) => {
                for (index, inner) in entries {
                    collect(inner, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}
