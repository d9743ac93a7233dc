//! Crate-private helpers for the `objectType` wire discriminator.

use serde::{Serialize, Serializer};
use serde_json::Value;

pub(crate) const OBJECT_TYPE: &str = "objectType";

/// The discriminator string of a raw value, if it carries one.
pub(crate) fn object_type(value: &Value) -> Option<&str> {
    value.get(OBJECT_TYPE).and_then(Value::as_str)
}

/// Serialize `inner` as a JSON object carrying the given `objectType` tag.
pub(crate) fn tagged<T, S>(inner: &T, tag: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    let mut value = serde_json::to_value(inner).map_err(serde::ser::Error::custom)?;
    if let Value::Object(map) = &mut value {
        map.insert(OBJECT_TYPE.to_owned(), Value::String(tag.to_owned()));
    }
    value.serialize(serializer)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::object_type;

    #[test]
    fn object_type_reads_only_string_tags() {
        assert_eq!(
            object_type(&json!({ "objectType": "Agent" })),
            Some("Agent")
        );
        assert_eq!(object_type(&json!({ "objectType": 3 })), None);
        assert_eq!(object_type(&json!({ "id": "x" })), None);
        assert_eq!(object_type(&json!(null)), None);
    }
}
