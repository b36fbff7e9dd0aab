//! The [`Filter`] record: one selectable option within a search facet.

mod magnitude;
mod snapshot;

use indexmap::IndexMap;
use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FilterError;

pub use magnitude::IntoMagnitude;
pub use snapshot::FilterSnapshot;

/// A single facet option, such as one brand or one price range.
///
/// Mutators take `&mut self` and hand the same instance back so calls can be
/// chained. Reads go through the getters or through [`Filter::to_snapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FilterSnapshot", into = "FilterSnapshot")]
pub struct Filter {
    label: String,
    filter_type: String,
    active: bool,
    displayed: bool,
    properties: IndexMap<String, Value>,
    magnitude: i64,
    value: Option<Value>,
    next_encoded_facets: Vec<Value>,
}

impl Default for Filter {
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

impl Filter {
    /// Create a filter with every field at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Set the internal type consumed by query logic.
    pub fn set_type(&mut self, filter_type: impl Into<String>) -> &mut Self {
        self.filter_type = filter_type.into();
        self
    }

    #[must_use]
    pub fn filter_type(&self) -> &str {
        &self.filter_type
    }

    /// Mark whether the filter is applied in the current query.
    pub fn set_active(&mut self, active: bool) -> &mut Self {
        self.active = active;
        self
    }

    /// Shorthand for `set_active(true)`.
    pub fn activate(&mut self) -> &mut Self {
        self.set_active(true)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mark whether the filter is shown in the interface.
    pub fn set_displayed(&mut self, displayed: bool) -> &mut Self {
        self.displayed = displayed;
        self
    }

    /// Shorthand for `set_displayed(true)`.
    pub fn display(&mut self) -> &mut Self {
        self.set_displayed(true)
    }

    #[must_use]
    pub fn is_displayed(&self) -> bool {
        self.displayed
    }

    /// Insert or overwrite the property `name`.
    ///
    /// Overwriting keeps the key at its original position.
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Look up the property `name`.
    ///
    /// Returns `None` when the key is missing, so a stored `null` comes back
    /// as `Some(&Value::Null)`.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    #[must_use]
    pub fn properties(&self) -> &IndexMap<String, Value> {
        &self.properties
    }

    /// Replace every property at once, keeping the iteration order of
    /// `properties`. Not part of the fluent chain.
    pub fn set_properties<I, K, V>(&mut self, properties: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.properties = properties
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
    }

    /// Set the magnitude, coercing integer-like input.
    ///
    /// ```
    /// use facet_filter::Filter;
    ///
    /// let mut filter = Filter::new();
    /// filter.set_magnitude("5");
    /// assert_eq!(filter.magnitude(), 5);
    /// filter.set_magnitude(7.8);
    /// assert_eq!(filter.magnitude(), 7);
    /// ```
    pub fn set_magnitude(&mut self, magnitude: impl IntoMagnitude) -> &mut Self {
        self.magnitude = magnitude.into_magnitude();
        self
    }

    #[must_use]
    pub fn magnitude(&self) -> i64 {
        self.magnitude
    }

    pub fn set_value(&mut self, value: impl Into<Value>) -> &mut Self {
        self.value = Some(value.into());
        self
    }

    /// The selectable value, or `None` if it was never set.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Set the encoded facet states used to build follow-on links.
    pub fn set_next_encoded_facets<I, V>(&mut self, facets: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.next_encoded_facets = facets.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn next_encoded_facets(&self) -> &[Value] {
        &self.next_encoded_facets
    }

    /// Copy every field into a [`FilterSnapshot`].
    ///
    /// The snapshot owns its data; changing it never affects `self`.
    #[must_use]
    pub fn to_snapshot(&self) -> FilterSnapshot {
        FilterSnapshot {
            label: self.label.clone(),
            filter_type: self.filter_type.clone(),
            active: self.active,
            displayed: self.displayed,
            properties: self.properties.clone(),
            magnitude: self.magnitude,
            value: self.value.clone(),
            next_encoded_facets: self.next_encoded_facets.clone(),
        }
    }

    /// Render the snapshot as a generic JSON object with the fixed key order.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let snapshot = self.to_snapshot();
        let mut map = serde_json::Map::with_capacity(8);
        map.insert("label".into(), Value::String(snapshot.label));
        map.insert("type".into(), Value::String(snapshot.filter_type));
        map.insert("active".into(), Value::Bool(snapshot.active));
        map.insert("displayed".into(), Value::Bool(snapshot.displayed));
        map.insert(
            "properties".into(),
            Value::Object(snapshot.properties.into_iter().collect()),
        );
        map.insert("magnitude".into(), Value::from(snapshot.magnitude));
        map.insert("value".into(), snapshot.value.unwrap_or(Value::Null));
        map.insert(
            "nextEncodedFacets".into(),
            Value::Array(snapshot.next_encoded_facets),
        );
        Value::Object(map)
    }

    /// Rebuild a live filter from a snapshot.
    ///
    /// Fields go through their setters, so the magnitude is coerced the same
    /// way as a hand-built filter. The value is carried over as-is and an
    /// unset value stays unset.
    #[must_use]
    pub fn from_snapshot(snapshot: FilterSnapshot) -> Self {
        trace!(
            "rebuilding filter '{}' ({})",
            snapshot.label, snapshot.filter_type
        );

        let mut filter = Self::new();
        filter
            .set_label(snapshot.label)
            .set_displayed(snapshot.displayed)
            .set_type(snapshot.filter_type)
            .set_active(snapshot.active)
            .set_magnitude(snapshot.magnitude)
            .set_next_encoded_facets(snapshot.next_encoded_facets);
        filter.set_properties(snapshot.properties);
        filter.value = snapshot.value;
        filter
    }

    /// Rebuild a live filter from a generic mapping such as [`Filter::to_value`]
    /// produces.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Snapshot`] if a required key is missing or holds
    /// a value of the wrong kind.
    pub fn from_value(value: Value) -> Result<Self, FilterError> {
        let snapshot: FilterSnapshot =
            serde_json::from_value(value).map_err(FilterError::Snapshot)?;
        Ok(Self::from_snapshot(snapshot))
    }
}

impl From<FilterSnapshot> for Filter {
    fn from(snapshot: FilterSnapshot) -> Self {
        Self::from_snapshot(snapshot)
    }
}

impl From<Filter> for FilterSnapshot {
    fn from(filter: Filter) -> Self {
        FilterSnapshot {
            label: filter.label,
            filter_type: filter.filter_type,
            active: filter.active,
            displayed: filter.displayed,
            properties: filter.properties,
            magnitude: filter.magnitude,
            value: filter.value,
            next_encoded_facets: filter.next_encoded_facets,
        }
    }
}
