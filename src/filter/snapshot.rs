use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Owned snapshot of every [`Filter`](super::Filter) field.
///
/// Serializes with the fixed key set `label`, `type`, `active`, `displayed`,
/// `properties`, `magnitude`, `value`, `nextEncodedFacets`, in that order.
/// Template renderers and fixtures rely on exactly this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSnapshot {
    pub label: String,
    #[serde(rename = "type")]
    pub filter_type: String,
    pub active: bool,
    pub displayed: bool,
    pub properties: IndexMap<String, Value>,
    #[serde(deserialize_with = "super::magnitude::deserialize")]
    pub magnitude: i64,
    /// Absent until set. Rendered as `null`, and may be omitted on input for
    /// formats without a null literal.
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(rename = "nextEncodedFacets")]
    pub next_encoded_facets: Vec<Value>,
}

impl Default for FilterSnapshot {
    fn default() -> Self {
        Self {
            label: String::new(),
            filter_type: String::new(),
            active: false,
            displayed: true,
            properties: IndexMap::new(),
            magnitude: 0,
            value: None,
            next_encoded_facets: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_fixed_keys_in_order() {
        let snapshot = FilterSnapshot::default();
        let value = serde_json::to_value(&snapshot).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            [
                "label",
                "type",
                "active",
                "displayed",
                "properties",
                "magnitude",
                "value",
                "nextEncodedFacets"
            ]
        );
    }

    #[test]
    fn magnitude_is_coerced_on_input() {
        let snapshot: FilterSnapshot = serde_json::from_value(json!({
            "label": "Red",
            "type": "attribute_group",
            "active": false,
            "displayed": true,
            "properties": {},
            "magnitude": "12",
            "value": 3,
            "nextEncodedFacets": []
        }))
        .unwrap();
        assert_eq!(snapshot.magnitude, 12);
    }

    #[test]
    fn value_may_be_omitted() {
        let snapshot: FilterSnapshot = serde_json::from_value(json!({
            "label": "",
            "type": "",
            "active": false,
            "displayed": true,
            "properties": {},
            "magnitude": 0,
            "nextEncodedFacets": []
        }))
        .unwrap();
        assert_eq!(snapshot.value, None);
    }

    #[test]
    fn missing_required_key_is_rejected() {
        let result = serde_json::from_value::<FilterSnapshot>(json!({
            "label": "Red",
            "active": false,
            "displayed": true,
            "properties": {},
            "magnitude": 0,
            "nextEncodedFacets": []
        }));
        assert!(result.is_err());
    }

    #[test]
    fn properties_keep_document_order() {
        let snapshot: FilterSnapshot = serde_json::from_str(
            r#"{"label":"","type":"","active":false,"displayed":true,
                "properties":{"zeta":1,"alpha":2,"mid":3},
                "magnitude":0,"value":null,"nextEncodedFacets":[]}"#,
        )
        .unwrap();
        let keys: Vec<&String> = snapshot.properties.keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }
}
