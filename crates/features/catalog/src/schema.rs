//! The explicit field schema of the catalog.
//!
//! Field names are fixed once at ingestion: trimmed, de-duplicated and indexed by their
//! case-folded form so lookups never scan records.

use crate::error::CatalogError;
use fxhash::FxHashMap;

/// Well-known column names of the destination data file.
pub mod fields {
    pub const DESTINATION: &str = "Destination";
    pub const REGION: &str = "Region";
    pub const COUNTRY: &str = "Country";
    pub const LATITUDE: &str = "Latitude";
    pub const LONGITUDE: &str = "Longitude";
    pub const CURRENCY: &str = "Currency";
    pub const LANGUAGE: &str = "Language";
}

/// Position of a field in the schema (and in every record).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldKey(usize);

impl FieldKey {
    #[must_use]
    pub const fn position(self) -> usize {
        self.0
    }
}

/// Fields used by the reduced list view, resolved once.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ProjectionKeys {
    pub(crate) name: Option<FieldKey>,
    pub(crate) region: Option<FieldKey>,
    pub(crate) country: Option<FieldKey>,
    pub(crate) latitude: Option<FieldKey>,
    pub(crate) longitude: Option<FieldKey>,
    pub(crate) currency: Option<FieldKey>,
    pub(crate) language: Option<FieldKey>,
}

#[derive(Debug)]
pub struct Schema {
    fields: Vec<String>,
    lookup: FxHashMap<String, FieldKey>,
    projection: ProjectionKeys,
}

impl Schema {
    /// Builds a schema from raw header names.
    ///
    /// Names are trimmed (including a leading byte-order mark). A name that repeats an earlier
    /// one exactly keeps the earlier position; names differing only by case are both kept, and
    /// lookups resolve to the first.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = normalize(name.as_ref());
            if !unique.contains(&name) {
                unique.push(name);
            }
        }

        let mut lookup = FxHashMap::default();
        for (position, name) in unique.iter().enumerate() {
            lookup.entry(name.to_lowercase()).or_insert(FieldKey(position));
        }

        let mut schema = Self { fields: unique, lookup, projection: ProjectionKeys::default() };
        schema.projection = ProjectionKeys {
            name: schema.find(fields::DESTINATION),
            region: schema.find(fields::REGION),
            country: schema.find(fields::COUNTRY),
            latitude: schema.find(fields::LATITUDE),
            longitude: schema.find(fields::LONGITUDE),
            currency: schema.find(fields::CURRENCY),
            language: schema.find(fields::LANGUAGE),
        };
        schema
    }

    /// Field names in file order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The stored (case-preserved) name of a field.
    #[must_use]
    pub fn name(&self, key: FieldKey) -> &str {
        &self.fields[key.0]
    }

    /// Case-insensitive lookup.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<FieldKey> {
        self.lookup.get(&name.to_lowercase()).copied()
    }

    /// Case-insensitive lookup that reports unknown names.
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownField`] when no field matches.
    pub fn resolve(&self, name: &str) -> Result<FieldKey, CatalogError> {
        self.find(name)
            .ok_or_else(|| CatalogError::UnknownField { field: name.to_owned(), context: None })
    }

    pub(crate) const fn projection(&self) -> &ProjectionKeys {
        &self.projection
    }

    /// Maps each raw header position to the schema field it feeds. Repeated names feed the
    /// same field, so the rightmost present cell wins.
    pub(crate) fn column_map<I, S>(&self, names: I) -> Vec<Option<FieldKey>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| {
                let name = normalize(name.as_ref());
                self.fields.iter().position(|f| *f == name).map(FieldKey)
            })
            .collect()
    }
}

fn normalize(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed_at_ingestion() {
        let schema = Schema::new(["\u{feff}Destination", " Region", "Country ", "  Latitude  "]);
        assert_eq!(schema.fields(), ["Destination", "Region", "Country", "Latitude"]);
    }

    #[test]
    fn resolution_ignores_case() {
        let schema = Schema::new(["Destination", "Country"]);
        let key = schema.resolve("country").expect("resolves");

        assert_eq!(schema.resolve("COUNTRY").ok(), Some(key));
        assert_eq!(schema.resolve("CoUnTrY").ok(), Some(key));
        assert_eq!(schema.name(key), "Country");
    }

    #[test]
    fn unknown_field_is_reported_with_its_name() {
        let schema = Schema::new(["Destination"]);
        let err = schema.resolve("Altitude").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownField { ref field, .. } if field == "Altitude"));
    }

    #[test]
    fn exact_repeats_share_a_field_and_case_variants_resolve_to_first() {
        let schema = Schema::new(["Name", "name", " Name"]);
        assert_eq!(schema.fields(), ["Name", "name"]);
        assert_eq!(schema.resolve("NAME").map(FieldKey::position).ok(), Some(0));

        let map = schema.column_map(["Name", "name", " Name"]);
        assert_eq!(map, vec![Some(FieldKey(0)), Some(FieldKey(1)), Some(FieldKey(0))]);

        assert_eq!(schema.column_map(["Other"]), vec![None]);
    }

    #[test]
    fn projection_resolves_known_columns() {
        let schema = Schema::new(["destination", "Country", "Currency"]);
        let projection = schema.projection();

        assert_eq!(projection.name, Some(FieldKey(0)));
        assert_eq!(projection.country, Some(FieldKey(1)));
        assert_eq!(projection.currency, Some(FieldKey(2)));
        assert!(projection.region.is_none());
        assert!(projection.latitude.is_none());
    }
}
