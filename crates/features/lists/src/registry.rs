use crate::error::ListsError;
use crate::list::{DestinationList, fold, valid_members};
use atlas_catalog::{Catalog, Destination, DestinationSummary};
use parking_lot::RwLock;
use serde_json::Value;

/// Registry of user lists, in creation order.
///
/// Member indices are validated against the catalog on every write; reads skip indices the
/// catalog no longer holds.
#[atlas_derive::atlas_slice]
pub struct ListRegistry {
    lists: RwLock<Vec<DestinationList>>,
}

/// A list dereferenced against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListContent<T> {
    pub name: String,
    pub destinations: Vec<T>,
}

impl Default for ListRegistry {
    fn default() -> Self {
        Self::new(ListRegistryInner { lists: RwLock::default() })
    }
}

impl ListRegistry {
    #[must_use]
    pub fn list_all(&self) -> Vec<DestinationList> {
        self.lists.read().clone()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.read().is_empty()
    }

    /// Creates a list named `name`. A missing or non-array `members` payload yields an empty
    /// list; invalid entries of an array are dropped.
    ///
    /// # Errors
    /// [`ListsError::DuplicateName`] when a list with the same case-folded name exists.
    pub fn create(
        &self,
        name: &str,
        members: Option<&Value>,
        catalog: &Catalog,
    ) -> Result<DestinationList, ListsError> {
        let members = members
            .and_then(Value::as_array)
            .map_or_else(Vec::new, |values| valid_members(values, catalog));

        let folded = fold(name);
        let mut lists = self.lists.write();
        if lists.iter().any(|list| list.is_named(&folded)) {
            return Err(ListsError::DuplicateName { name: name.to_owned(), context: None });
        }

        let list = DestinationList::new(name, members);
        lists.push(list.clone());
        Ok(list)
    }

    /// Removes the list and returns it.
    ///
    /// # Errors
    /// [`ListsError::NotFound`] when no list matches.
    pub fn delete(&self, name: &str) -> Result<DestinationList, ListsError> {
        let folded = fold(name);
        let mut lists = self.lists.write();
        let position = lists
            .iter()
            .position(|list| list.is_named(&folded))
            .ok_or_else(|| ListsError::not_found(name))?;

        Ok(lists.remove(position))
    }

    /// Replaces every member of the list.
    ///
    /// # Errors
    /// * [`ListsError::InvalidFormat`] when `members` is not an array, checked first.
    /// * [`ListsError::NotFound`] when no list matches.
    pub fn replace_members(
        &self,
        name: &str,
        members: Option<&Value>,
        catalog: &Catalog,
    ) -> Result<DestinationList, ListsError> {
        let values = members
            .and_then(Value::as_array)
            .ok_or(ListsError::InvalidFormat { context: None })?;
        let members = valid_members(values, catalog);

        let folded = fold(name);
        let mut lists = self.lists.write();
        let list = lists
            .iter_mut()
            .find(|list| list.is_named(&folded))
            .ok_or_else(|| ListsError::not_found(name))?;

        list.set_destinations(members);
        Ok(list.clone())
    }

    /// The stored list, members not dereferenced.
    ///
    /// # Errors
    /// [`ListsError::NotFound`] when no list matches.
    pub fn ids(&self, name: &str) -> Result<DestinationList, ListsError> {
        let folded = fold(name);
        self.lists
            .read()
            .iter()
            .find(|list| list.is_named(&folded))
            .cloned()
            .ok_or_else(|| ListsError::not_found(name))
    }

    /// # Errors
    /// [`ListsError::NotFound`] when no list matches.
    pub fn full_content(
        &self,
        name: &str,
        catalog: &Catalog,
    ) -> Result<ListContent<Destination>, ListsError> {
        self.content(name, catalog, Destination::clone)
    }

    /// # Errors
    /// [`ListsError::NotFound`] when no list matches.
    pub fn projected_content(
        &self,
        name: &str,
        catalog: &Catalog,
    ) -> Result<ListContent<DestinationSummary>, ListsError> {
        self.content(name, catalog, Destination::summary)
    }

    fn content<T>(
        &self,
        name: &str,
        catalog: &Catalog,
        view: impl Fn(&Destination) -> T,
    ) -> Result<ListContent<T>, ListsError> {
        let folded = fold(name);
        let lists = self.lists.read();
        let list =
            lists.iter().find(|list| list.is_named(&folded)).ok_or_else(|| ListsError::not_found(name))?;

        Ok(ListContent {
            name: list.name().to_owned(),
            destinations: list
                .destinations()
                .iter()
                .filter_map(|index| catalog.get(*index).ok())
                .map(view)
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_kernel::domain::config::CatalogConfig;
    use proptest::prelude::*;
    use serde_json::json;

    const DATA: &str = "\
Destination,Region,Country,Latitude,Longitude,Currency,Language
Lisbon,Lisbon,Portugal,38.7223,-9.1393,Euro,Portuguese
Porto,Norte,Portugal,41.1579,-8.6291,Euro,Portuguese
Madrid,Madrid,Spain,40.4168,-3.7038,Euro,Spanish
";

    fn catalog() -> Catalog {
        Catalog::from_reader(DATA.as_bytes(), &CatalogConfig::default()).expect("catalog")
    }

    fn names(content: &ListContent<Destination>) -> Vec<&str> {
        content.destinations.iter().filter_map(|d| d.field("Destination")).collect()
    }

    #[test]
    fn trip_scenario() {
        let catalog = catalog();
        let registry = ListRegistry::default();

        let created = registry.create("Trip", Some(&json!([0, 2, 5])), &catalog).expect("create");
        assert_eq!(created.destinations(), [0, 2]);

        let content = registry.full_content("trip", &catalog).expect("content");
        assert_eq!(content.name, "Trip");
        assert_eq!(names(&content), ["Lisbon", "Madrid"]);

        registry.replace_members("Trip", Some(&json!([1])), &catalog).expect("replace");
        let ids = registry.ids("TRIP").expect("ids");
        assert_eq!(ids.name(), "Trip");
        assert_eq!(ids.destinations(), [1]);

        let err = registry.create("tRiP", None, &catalog).unwrap_err();
        assert!(matches!(err, ListsError::DuplicateName { .. }));
        assert_eq!(registry.list_all().len(), 1);
    }

    #[test]
    fn create_without_array_payload_is_empty() {
        let catalog = catalog();
        let registry = ListRegistry::default();

        let list = registry.create("A", None, &catalog).expect("create");
        assert!(list.destinations().is_empty());

        let list = registry.create("B", Some(&json!("0,1")), &catalog).expect("create");
        assert!(list.destinations().is_empty());
    }

    #[test]
    fn replace_checks_format_before_name() {
        let catalog = catalog();
        let registry = ListRegistry::default();

        let err = registry.replace_members("ghost", Some(&json!({"ids": [1]})), &catalog).unwrap_err();
        assert!(matches!(err, ListsError::InvalidFormat { .. }));

        let err = registry.replace_members("ghost", None, &catalog).unwrap_err();
        assert!(matches!(err, ListsError::InvalidFormat { .. }));

        let err = registry.replace_members("ghost", Some(&json!([1])), &catalog).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn emptying_a_list_keeps_it() {
        let catalog = catalog();
        let registry = ListRegistry::default();
        registry.create("Weekend", Some(&json!([0, 1])), &catalog).expect("create");

        registry.replace_members("weekend", Some(&json!([])), &catalog).expect("replace");

        let content = registry.full_content("WEEKEND", &catalog).expect("still there");
        assert!(content.destinations.is_empty());
    }

    #[test]
    fn deleted_name_can_be_reused_from_scratch() {
        let catalog = catalog();
        let registry = ListRegistry::default();
        registry.create("Coast", Some(&json!([0, 1])), &catalog).expect("create");

        let removed = registry.delete("COAST").expect("delete");
        assert_eq!(removed.name(), "Coast");
        assert!(registry.ids("Coast").unwrap_err().is_not_found());
        assert!(registry.delete("Coast").unwrap_err().is_not_found());

        let fresh = registry.create("coast", None, &catalog).expect("re-create");
        assert_eq!(fresh.name(), "coast");
        assert!(fresh.destinations().is_empty());
    }

    #[test]
    fn projected_content_uses_summaries() {
        let catalog = catalog();
        let registry = ListRegistry::default();
        registry.create("Iberia", Some(&json!([2, 0])), &catalog).expect("create");

        let content = registry.projected_content("iberia", &catalog).expect("content");
        let names: Vec<_> = content.destinations.iter().filter_map(|s| s.name.as_deref()).collect();
        assert_eq!(names, ["Madrid", "Lisbon"]);
        assert_eq!(content.destinations[1].coordinates.longitude.as_deref(), Some("-9.1393"));
    }

    #[test]
    fn stale_indices_are_skipped_on_read() {
        let registry = ListRegistry::default();
        registry.create("Big", Some(&json!([0, 1, 2])), &catalog()).expect("create");

        let smaller = Catalog::from_reader(
            "Destination\nLisbon\n".as_bytes(),
            &CatalogConfig::default(),
        )
        .expect("catalog");

        let content = registry.full_content("big", &smaller).expect("content");
        assert_eq!(names(&content), ["Lisbon"]);
        assert_eq!(registry.ids("big").expect("ids").destinations(), [0, 1, 2]);
    }

    #[test]
    fn lists_keep_creation_order() {
        let catalog = catalog();
        let registry = ListRegistry::default();
        assert!(registry.is_empty());

        for name in ["b", "a", "c"] {
            registry.create(name, None, &catalog).expect("create");
        }
        registry.delete("a").expect("delete");

        let names: Vec<_> = registry.list_all().iter().map(|l| l.name().to_owned()).collect();
        assert_eq!(names, ["b", "c"]);
    }

    proptest! {
        #[test]
        fn stored_members_are_always_valid(values in prop::collection::vec(-5i64..10, 0..30)) {
            let catalog = catalog();
            let registry = ListRegistry::default();
            let payload = Value::from(values.clone());

            let list = registry.create("p", Some(&payload), &catalog).expect("create");

            let mut expected = Vec::new();
            for value in values {
                if let Ok(index) = usize::try_from(value) {
                    if index < catalog.len() && !expected.contains(&index) {
                        expected.push(index);
                    }
                }
            }
            prop_assert_eq!(list.destinations(), expected.as_slice());
        }
    }
}
