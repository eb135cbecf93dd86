use crate::utils::format::{format_population, NOT_AVAILABLE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Returns `None` unless both values are finite and in range.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        valid.then_some(Self {
            latitude,
            longitude,
        })
    }

    fn from_latlng(latlng: &[f64]) -> Option<Self> {
        match latlng {
            [lat, lng] => Self::new(*lat, *lng),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub name: String,
    pub symbol: Option<String>,
}

impl Currency {
    /// `"Name (symbol)"`, or just the name when the symbol is missing or empty.
    pub fn label(&self) -> String {
        match self.symbol.as_deref() {
            Some(symbol) if !symbol.is_empty() => format!("{} ({})", self.name, symbol),
            _ => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
    pub coordinates: Option<Coordinates>,
    pub flag_url: String,
    pub capital: Vec<String>,
    pub population: u64,
    pub languages: BTreeMap<String, String>,
    pub currencies: BTreeMap<String, Currency>,
}

impl Country {
    /// Minimal entry with only a code and a name, everything else empty.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            coordinates: None,
            flag_url: String::new(),
            capital: Vec::new(),
            population: 0,
            languages: BTreeMap::new(),
            currencies: BTreeMap::new(),
        }
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Coordinates::new(latitude, longitude);
        self
    }

    pub fn primary_capital(&self) -> Option<&str> {
        self.capital.first().map(String::as_str)
    }
}

// Wire format of https://restcountries.com/v3.1

#[derive(Debug, Deserialize)]
pub(crate) struct RestCountry {
    cca3: String,
    name: RestName,
    #[serde(default)]
    latlng: Option<Vec<f64>>,
    #[serde(default)]
    flags: Option<RestFlags>,
    #[serde(default)]
    capital: Option<Vec<String>>,
    #[serde(default)]
    population: Option<u64>,
    #[serde(default)]
    languages: Option<BTreeMap<String, String>>,
    #[serde(default)]
    currencies: Option<BTreeMap<String, RestCurrency>>,
}

#[derive(Debug, Deserialize)]
struct RestName {
    common: String,
}

#[derive(Debug, Deserialize)]
struct RestFlags {
    png: Option<String>,
    svg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RestCurrency {
    name: String,
    #[serde(default)]
    symbol: Option<String>,
}

impl From<RestCountry> for Country {
    fn from(raw: RestCountry) -> Self {
        let coordinates = raw.latlng.as_deref().and_then(Coordinates::from_latlng);
        let flag_url = raw
            .flags
            .and_then(|flags| flags.png.or(flags.svg))
            .unwrap_or_default();

        Self {
            code: raw.cca3,
            name: raw.name.common,
            coordinates,
            flag_url,
            capital: raw.capital.unwrap_or_default(),
            population: raw.population.unwrap_or(0),
            languages: raw.languages.unwrap_or_default(),
            currencies: raw
                .currencies
                .unwrap_or_default()
                .into_iter()
                .map(|(code, c)| {
                    (
                        code,
                        Currency {
                            name: c.name,
                            symbol: c.symbol,
                        },
                    )
                })
                .collect(),
        }
    }
}

/// Row of the country list screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub code: String,
    pub name: String,
    pub flag_url: String,
}

impl From<&Country> for CountrySummary {
    fn from(country: &Country) -> Self {
        Self {
            code: country.code.clone(),
            name: country.name.clone(),
            flag_url: country.flag_url.clone(),
        }
    }
}

/// Everything the detail screen renders for one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryDetail {
    pub code: String,
    pub name: String,
    pub flag_url: String,
    pub capital: String,
    pub population: u64,
    pub population_display: String,
    pub languages: String,
    pub currencies: String,
    pub coordinates: Option<Coordinates>,
}

impl From<&Country> for CountryDetail {
    fn from(country: &Country) -> Self {
        let languages = if country.languages.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            country
                .languages
                .values()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        };

        let currencies = if country.currencies.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            country
                .currencies
                .values()
                .map(Currency::label)
                .collect::<Vec<_>>()
                .join(", ")
        };

        Self {
            code: country.code.clone(),
            name: country.name.clone(),
            flag_url: country.flag_url.clone(),
            capital: country
                .primary_capital()
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
            population: country.population,
            population_display: format_population(country.population),
            languages,
            currencies,
            coordinates: country.coordinates,
        }
    }
}
