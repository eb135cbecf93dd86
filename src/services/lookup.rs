use crate::models::country::Country;
use crate::services::source::{CountryError, CountrySource};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Resolves single countries by code, straight from the source.
///
/// Holds no cache: every call is an independent fetch, so a detail view works
/// whether or not any list was ever loaded.
pub struct CountryLookup<S> {
    source: Arc<S>,
}

impl<S> Clone for CountryLookup<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}

impl<S: CountrySource> CountryLookup<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    pub async fn resolve(&self, code: &str) -> Result<Country, CountryError> {
        if !is_valid_code(code) {
            info!("Rejected malformed country code {:?}", code);
            return Err(CountryError::NotFound(code.to_string()));
        }

        let code = code.to_ascii_uppercase();
        match self.source.fetch_by_code(&code).await {
            Ok(country) => Ok(country),
            Err(CountryError::NotFound(_)) => {
                warn!("Country {} not found upstream", code);
                Err(CountryError::NotFound(code))
            }
            Err(e) => {
                error!("Failed to resolve country {}: {}", code, e);
                Err(e)
            }
        }
    }
}

/// Three ASCII letters, in any case.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic())
}
