use crate::schema::{FieldKey, Schema};
use atlas_derive::api_model;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::sync::Arc;

/// One catalog entry: the values of a single data row, keyed by the shared schema.
#[derive(Clone)]
pub struct Destination {
    schema: Arc<Schema>,
    values: Arc<[String]>,
}

impl Destination {
    /// `values` must hold exactly one entry per schema field.
    pub(crate) fn new(schema: Arc<Schema>, values: Vec<String>) -> Self {
        debug_assert_eq!(schema.len(), values.len());
        Self { schema, values: values.into() }
    }

    #[must_use]
    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.values.get(key.position()).map(String::as_str)
    }

    /// Case-insensitive field access.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.schema.find(name).and_then(|key| self.get(key))
    }

    /// `(field name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.schema.fields().iter().map(String::as_str).zip(self.values.iter().map(String::as_str))
    }

    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        let projection = self.schema.projection();
        Coordinates {
            latitude: self.owned(projection.latitude),
            longitude: self.owned(projection.longitude),
        }
    }

    /// The reduced view used by list listings.
    #[must_use]
    pub fn summary(&self) -> DestinationSummary {
        let projection = self.schema.projection();
        DestinationSummary {
            name: self.owned(projection.name),
            region: self.owned(projection.region),
            country: self.owned(projection.country),
            coordinates: self.coordinates(),
            currency: self.owned(projection.currency),
            language: self.owned(projection.language),
        }
    }

    fn owned(&self, key: Option<FieldKey>) -> Option<String> {
        key.and_then(|key| self.get(key)).map(str::to_owned)
    }
}

impl PartialEq for Destination {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.schema, &other.schema)
            || self.schema.fields() == other.schema.fields())
            && self.values == other.values
    }
}

impl Eq for Destination {}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Serialize for Destination {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "server")]
impl utoipa::PartialSchema for Destination {
    fn schema() -> utoipa::openapi::RefOr<utoipa::openapi::schema::Schema> {
        use utoipa::openapi::schema::{ObjectBuilder, Type};

        ObjectBuilder::new()
            .description(Some("Destination record keyed by the catalog's field names"))
            .additional_properties(Some(ObjectBuilder::new().schema_type(Type::String)))
            .into()
    }
}

#[cfg(feature = "server")]
impl utoipa::ToSchema for Destination {}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
/// Geographic position of a destination, as written in the data file
pub struct Coordinates {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
/// Reduced destination view; fields whose column is absent from the catalog are omitted
pub struct DestinationSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub coordinates: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}
