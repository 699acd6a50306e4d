//! Stored record upgrades.
//!
//! Older string and password records may lack fields that later versions
//! added, carry them as `null`, or use the legacy `number` flag. Records are
//! normalized as raw JSON before being parsed into [`StringRecord`].

use chrono::Utc;
use serde_json::{Map, Value};

use super::resource::{ResourceKind, SENSITIVE_ID, StringRecord};

const FLAG_FIELDS: [&str; 3] = ["upper", "lower", "special"];
const MINIMUM_FIELDS: [&str; 4] = ["min_upper", "min_lower", "min_numeric", "min_special"];

/// A record parsed from storage, with a note on whether it changed.
#[derive(Debug, Clone)]
pub struct Upgraded<T> {
    /// The current-shape record.
    pub record: T,

    /// Version the record was stored with.
    pub from_version: u32,

    /// Whether normalization changed the record.
    pub changed: bool,
}

/// Parse a stored string or password record, upgrading older shapes.
///
/// Missing or null fields are filled the way an imported value would be:
/// `length` becomes the character count of `result`, flags become `true`,
/// minimums become `0`. A legacy `number` flag is carried into `numeric`.
/// The bcrypt hash is not touched here.
///
/// # Errors
///
/// Returns a description of the problem if the value is not an object, has
/// no `result`, or still fails to parse after normalization.
pub fn upgrade_string_record(
    kind: ResourceKind,
    name: &str,
    value: Value,
) -> Result<Upgraded<StringRecord>, String> {
    let Value::Object(mut fields) = value else {
        return Err(format!("{kind} record '{name}' is not an object"));
    };

    let current = kind.schema_version();
    let from_version = fields
        .get("schema_version")
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0);

    let mut changed = fold_legacy_number(&mut fields);
    if from_version < current {
        normalize(kind, name, &mut fields)?;
        fields.insert("schema_version".to_string(), Value::from(current));
        changed = true;
    }

    let record = serde_json::from_value(Value::Object(fields))
        .map_err(|e| format!("{kind} record '{name}' is malformed: {e}"))?;

    Ok(Upgraded {
        record,
        from_version,
        changed,
    })
}

fn normalize(kind: ResourceKind, name: &str, fields: &mut Map<String, Value>) -> Result<(), String> {
    let result_chars = match fields.get("result") {
        Some(Value::String(result)) => result.chars().count(),
        _ => return Err(format!("{kind} record '{name}' has no result")),
    };

    if is_absent(fields, "length") {
        fields.insert("length".to_string(), Value::from(result_chars));
    }

    for field in FLAG_FIELDS {
        if is_absent(fields, field) {
            fields.insert(field.to_string(), Value::Bool(true));
        }
    }

    if is_absent(fields, "numeric") {
        fields.insert("numeric".to_string(), Value::Bool(true));
    }

    for field in MINIMUM_FIELDS {
        if is_absent(fields, field) {
            fields.insert(field.to_string(), Value::from(0));
        }
    }

    if matches!(fields.get("override_special"), Some(Value::Null)) {
        fields.remove("override_special");
    }

    if is_absent(fields, "name") {
        fields.insert("name".to_string(), Value::String(name.to_string()));
    }

    if is_absent(fields, "id") {
        let id = if kind == ResourceKind::Password {
            Value::String(SENSITIVE_ID.to_string())
        } else {
            fields.get("result").cloned().unwrap_or(Value::Null)
        };
        fields.insert("id".to_string(), id);
    }

    if is_absent(fields, "created_at") {
        fields.insert(
            "created_at".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
    }

    Ok(())
}

/// Move a legacy `number` flag into `numeric` unless `numeric` is set.
/// Returns whether `number` was present.
fn fold_legacy_number(fields: &mut Map<String, Value>) -> bool {
    let Some(legacy) = fields.remove("number") else {
        return false;
    };
    if is_absent(fields, "numeric") {
        let numeric = legacy.as_bool().unwrap_or(true);
        fields.insert("numeric".to_string(), Value::Bool(numeric));
    }
    true
}

fn is_absent(fields: &Map<String, Value>, key: &str) -> bool {
    fields.get(key).is_none_or(Value::is_null)
}
