use crate::error::{CatalogError, CatalogErrorExt};
use crate::ingest::read_destinations;
use crate::record::{Coordinates, Destination};
use crate::schema::{FieldKey, Schema};
use atlas_kernel::domain::config::CatalogConfig;
use fxhash::FxHashSet;
use moka::sync::Cache;
use regex::{Regex, RegexBuilder};
use std::fs::File;
use std::io::{BufReader, Read};
use std::sync::Arc;

/// The destination catalog, immutable once loaded.
///
/// A destination is addressed by its position in the data file; the valid index range is
/// `0..len()`.
#[atlas_derive::atlas_slice]
pub struct Catalog {
    schema: Arc<Schema>,
    destinations: Vec<Destination>,
    patterns: Cache<String, Regex>,
    pattern_size_limit: usize,
}

impl Catalog {
    /// Loads the catalog from `config.data_file`.
    ///
    /// # Errors
    /// [`CatalogError::Io`] if the file cannot be opened, [`CatalogError::Csv`] if it is malformed.
    pub fn load(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let path = &config.data_file;
        let file = File::open(path).context(format!("Opening {}", path.display()))?;
        Self::from_reader(BufReader::new(file), config)
            .context(format!("Loading {}", path.display()))
    }

    /// Builds the catalog from CSV data.
    ///
    /// # Errors
    /// [`CatalogError::Csv`] if the data is malformed.
    pub fn from_reader<R: Read>(reader: R, config: &CatalogConfig) -> Result<Self, CatalogError> {
        let (schema, destinations) = read_destinations(reader)?;

        Ok(Self::new(CatalogInner {
            schema,
            destinations,
            patterns: Cache::new(config.pattern_cache_capacity),
            pattern_size_limit: config.pattern_size_limit,
        }))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Every destination in load order.
    #[must_use]
    pub fn all(&self) -> &[Destination] {
        &self.destinations
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        index < self.destinations.len()
    }

    /// # Errors
    /// [`CatalogError::InvalidIndex`] when `index` is outside `0..len()`.
    pub fn get(&self, index: usize) -> Result<&Destination, CatalogError> {
        self.destinations.get(index).ok_or_else(|| CatalogError::invalid_index(index, self.len()))
    }

    /// Parses a textual index (a path segment, typically) and checks its range. Only the
    /// leading integer counts, so `"1.0"` and `"3abc"` address 1 and 3.
    ///
    /// # Errors
    /// [`CatalogError::InvalidIndex`] when `raw` has no leading integer or it is out of range.
    pub fn resolve_index(&self, raw: &str) -> Result<usize, CatalogError> {
        leading_integer(raw)
            .and_then(|value| usize::try_from(value).ok())
            .filter(|index| self.contains(*index))
            .ok_or_else(|| CatalogError::invalid_index(raw, self.len()))
    }

    /// # Errors
    /// [`CatalogError::UnknownField`] when no field matches `name`, ignoring case.
    pub fn resolve_field(&self, name: &str) -> Result<FieldKey, CatalogError> {
        self.schema.resolve(name)
    }

    /// Destinations whose `field` matches `pattern` (a case-insensitive regular expression),
    /// in catalog order and truncated to `limit` when given.
    ///
    /// # Errors
    /// * [`CatalogError::UnknownField`] when the field does not resolve.
    /// * [`CatalogError::InvalidPattern`] when the pattern does not compile within the size limit.
    pub fn search(
        &self,
        field: &str,
        pattern: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Destination>, CatalogError> {
        let key = self.resolve_field(field)?;
        let regex = self.compile(pattern)?;

        Ok(self
            .destinations
            .iter()
            .filter(|destination| destination.get(key).is_some_and(|value| regex.is_match(value)))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    /// # Errors
    /// [`CatalogError::InvalidIndex`] when `index` is outside `0..len()`.
    pub fn coordinates(&self, index: usize) -> Result<Coordinates, CatalogError> {
        self.get(index).map(Destination::coordinates)
    }

    /// Distinct country values in first-seen order.
    #[must_use]
    pub fn countries(&self) -> Vec<String> {
        let Some(key) = self.schema.projection().country else {
            return Vec::new();
        };

        let mut seen = FxHashSet::default();
        self.destinations
            .iter()
            .filter_map(|destination| destination.get(key))
            .filter(|country| seen.insert(*country))
            .map(str::to_owned)
            .collect()
    }

    fn compile(&self, pattern: &str) -> Result<Regex, CatalogError> {
        if let Some(regex) = self.patterns.get(pattern) {
            return Ok(regex);
        }

        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .size_limit(self.pattern_size_limit)
            .build()?;
        self.patterns.insert(pattern.to_owned(), regex.clone());

        Ok(regex)
    }
}

/// The integer at the start of `raw`: leading whitespace, an optional sign, then digits.
/// Anything after the digits is ignored; values beyond `i64` saturate.
pub(crate) fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let end = rest.bytes().position(|b| !b.is_ascii_digit()).unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let magnitude = rest[..end]
        .bytes()
        .fold(0i64, |acc, digit| acc.saturating_mul(10).saturating_add(i64::from(digit - b'0')));
    Some(if negative { -magnitude } else { magnitude })
}
