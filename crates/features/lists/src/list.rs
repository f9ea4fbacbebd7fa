use atlas_catalog::Catalog;
use fxhash::FxHashSet;
use serde::Serialize;
use serde_json::Value;

/// A named, ordered collection of catalog indices.
///
/// The name keeps the caller's casing; identity is the case-folded name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DestinationList {
    name: String,
    destinations: Vec<usize>,
    #[serde(skip)]
    key: String,
}

impl DestinationList {
    pub(crate) fn new(name: &str, destinations: Vec<usize>) -> Self {
        Self { name: name.to_owned(), destinations, key: fold(name) }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member indices in insertion order.
    #[must_use]
    pub fn destinations(&self) -> &[usize] {
        &self.destinations
    }

    pub(crate) fn set_destinations(&mut self, destinations: Vec<usize>) {
        self.destinations = destinations;
    }

    pub(crate) fn is_named(&self, folded: &str) -> bool {
        self.key == folded
    }
}

pub(crate) fn fold(name: &str) -> String {
    name.to_lowercase()
}

/// Keeps the integer values that address a catalog entry, first occurrence wins.
pub(crate) fn valid_members(values: &[Value], catalog: &Catalog) -> Vec<usize> {
    let mut seen = FxHashSet::default();
    values
        .iter()
        .filter_map(as_index)
        .filter(|index| catalog.contains(*index) && seen.insert(*index))
        .collect()
}

/// Integral JSON numbers (`2` or `2.0`) that fit an index; anything else is `None`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::float_cmp)]
fn as_index(value: &Value) -> Option<usize> {
    let number = value.as_number()?;
    if let Some(unsigned) = number.as_u64() {
        return usize::try_from(unsigned).ok();
    }
    if number.is_i64() {
        return None;
    }

    let float = number.as_f64()?;
    (float.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&float)).then_some(float as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_kernel::domain::config::CatalogConfig;
    use serde_json::json;

    fn catalog(size: usize) -> Catalog {
        let mut data = String::from("Destination\n");
        for n in 0..size {
            data.push_str(&format!("Place {n}\n"));
        }
        Catalog::from_reader(data.as_bytes(), &CatalogConfig::default()).expect("catalog")
    }

    #[test]
    fn keeps_only_integers_in_range() {
        let values = json!([0, 2, 5, -1, 1.5, "1", null, true, 2.0, 1]);
        let members = valid_members(values.as_array().expect("array"), &catalog(3));
        assert_eq!(members, [0, 2, 1]);
    }

    #[test]
    fn duplicates_collapse_to_first_occurrence() {
        let values = json!([2, 0, 2, 0, 1]);
        let members = valid_members(values.as_array().expect("array"), &catalog(3));
        assert_eq!(members, [2, 0, 1]);
    }

    #[test]
    fn serializes_name_and_members_only() {
        let list = DestinationList::new("Summer Trip", vec![3, 1]);
        let value = serde_json::to_value(&list).expect("serialize");
        assert_eq!(value, json!({ "name": "Summer Trip", "destinations": [3, 1] }));
    }

    #[test]
    fn identity_is_case_folded() {
        let list = DestinationList::new("Trip", Vec::new());
        assert!(list.is_named(&fold("TRIP")));
        assert!(list.is_named(&fold("trip")));
        assert_eq!(list.name(), "Trip");
    }
}
