use crate::services::source::CountryError;

/// Observable state of a fetch-driven view.
///
/// A fetch moves a view from `Loading` to either `Ready` or `Failed`, and
/// nothing moves it back except a fresh mount.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Failed(CountryError),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CountryError> {
        match self {
            ViewState::Failed(error) => Some(error),
            _ => None,
        }
    }
}

impl<T> From<Result<T, CountryError>> for ViewState<T> {
    fn from(result: Result<T, CountryError>) -> Self {
        match result {
            Ok(data) => ViewState::Ready(data),
            Err(error) => ViewState::Failed(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        let ready: ViewState<u32> = Ok(3).into();
        assert_eq!(ready.ready(), Some(&3));

        let failed: ViewState<u32> = Err(CountryError::NotFound("XYZ".to_string())).into();
        assert!(matches!(failed.error(), Some(CountryError::NotFound(_))));
        assert!(!failed.is_loading());
    }
}
