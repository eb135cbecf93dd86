use crate::models::country::Country;
use crate::utils::collate::collation_key;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Sorted, in-memory snapshot of every country fetched in one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryCatalog {
    countries: Vec<Country>,
    // Lowercased names, index-aligned with `countries`.
    search_keys: Vec<String>,
}

impl CountryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_countries(countries: Vec<Country>) -> Self {
        let mut catalog = Self::new();
        catalog.load(countries);
        catalog
    }

    /// Replaces the snapshot with `countries`, sorted by name.
    ///
    /// Duplicate codes keep the entry that came last.
    pub fn load(&mut self, countries: Vec<Country>) {
        let fetched = countries.len();
        let mut by_code: HashMap<String, Country> = HashMap::with_capacity(fetched);
        for country in countries {
            by_code.insert(country.code.clone(), country);
        }

        if by_code.len() < fetched {
            warn!(
                "Dropped {} duplicate country codes while loading catalog",
                fetched - by_code.len()
            );
        }

        let mut countries: Vec<Country> = by_code.into_values().collect();
        countries.sort_by_cached_key(|c| (collation_key(&c.name), c.name.clone(), c.code.clone()));

        self.search_keys = countries.iter().map(|c| c.name.to_lowercase()).collect();
        self.countries = countries;

        debug!("Catalog loaded with {} countries", self.countries.len());
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Country> {
        self.countries.iter()
    }

    pub fn get(&self, code: &str) -> Option<&Country> {
        self.countries
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }

    /// Countries whose name contains `query`, ignoring case, in catalog order.
    ///
    /// The query is matched literally; an empty query matches everything.
    pub fn search(&self, query: &str) -> SearchResult<'_> {
        let needle = query.to_lowercase();

        let matches = self
            .countries
            .iter()
            .zip(&self.search_keys)
            .filter(|(_, key)| key.contains(needle.as_str()))
            .map(|(country, _)| country)
            .collect();

        SearchResult { matches }
    }
}

/// Ordered matches of one search over a [`CountryCatalog`].
#[derive(Debug, Clone)]
pub struct SearchResult<'a> {
    matches: Vec<&'a Country>,
}

impl<'a> SearchResult<'a> {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Country> + '_ {
        self.matches.iter().copied()
    }

    /// Up to `limit` matches starting at `offset`.
    ///
    /// Reads past the end, or with a zero limit, yield an empty page.
    pub fn page(&self, offset: usize, limit: usize) -> &[&'a Country] {
        if limit == 0 || offset >= self.matches.len() {
            return &[];
        }

        let end = offset.saturating_add(limit).min(self.matches.len());
        &self.matches[offset..end]
    }
}
