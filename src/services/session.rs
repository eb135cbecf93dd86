use crate::models::view::ViewState;
use crate::services::catalog::CountryCatalog;
use crate::services::source::CountrySource;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

pub type CatalogState = ViewState<Arc<CountryCatalog>>;

/// Screen-owned catalog: one fetch per mount, discarded on unmount.
///
/// The catalog is only ever swapped in whole, so a reader sees either the
/// previous state or the fully built snapshot.
pub struct CatalogSession<S> {
    name: &'static str,
    source: Arc<S>,
    state: Arc<RwLock<CatalogState>>,
    cancel: Mutex<CancellationToken>,
}

impl<S> CatalogSession<S>
where
    S: CountrySource + 'static,
{
    pub fn new(name: &'static str, source: Arc<S>) -> Self {
        Self {
            name,
            source,
            state: Arc::new(RwLock::new(ViewState::Loading)),
            cancel: Mutex::new(CancellationToken::new()),
        }
    }

    /// Starts the fetch that populates this session.
    ///
    /// Any fetch still in flight from an earlier mount is cancelled and its
    /// result will never be applied.
    pub async fn mount(&self) -> JoinHandle<()> {
        // Token swap and reset happen under the state lock so an older mount
        // can never reset the state after a newer fetch has been applied.
        let mut guard = self.state.write().await;
        let token = self.replace_token();
        *guard = ViewState::Loading;
        drop(guard);
        info!("[{}] loading country list", self.name);

        let name = self.name;
        let source = self.source.clone();
        let state = self.state.clone();

        tokio::spawn(async move {
            let result = tokio::select! {
                _ = token.cancelled() => {
                    info!("[{}] fetch cancelled before completion", name);
                    return;
                }
                result = source.fetch_all() => result,
            };

            let next = CatalogState::from(result.map(|countries| {
                let catalog = CountryCatalog::from_countries(countries);
                info!("[{}] ready with {} countries", name, catalog.len());
                Arc::new(catalog)
            }));
            if let Some(e) = next.error() {
                error!("[{}] failed to load country list: {}", name, e);
            }

            let mut guard = state.write().await;
            if token.is_cancelled() {
                warn!("[{}] discarding result of a cancelled fetch", name);
                return;
            }
            *guard = next;
        })
    }

    /// Cancels any in-flight fetch and drops the snapshot.
    pub async fn unmount(&self) {
        let mut guard = self.state.write().await;
        self.cancel_token().cancel();
        *guard = ViewState::Loading;
        drop(guard);
        info!("[{}] unmounted", self.name);
    }

    pub async fn state(&self) -> CatalogState {
        self.state.read().await.clone()
    }

    fn replace_token(&self) -> CancellationToken {
        let mut guard = self.cancel.lock().unwrap_or_else(|e| e.into_inner());
        guard.cancel();
        *guard = CancellationToken::new();
        guard.clone()
    }

    fn cancel_token(&self) -> CancellationToken {
        self.cancel.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl<S> Drop for CatalogSession<S> {
    fn drop(&mut self) {
        self.cancel
            .get_mut()
            .unwrap_or_else(|e| e.into_inner())
            .cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::country::Country;
    use crate::services::source::CountryError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// Source whose list fetch blocks until released.
    struct GatedSource {
        gate: Notify,
        fetches: AtomicUsize,
        result: Result<Vec<Country>, CountryError>,
    }

    impl GatedSource {
        fn new(result: Result<Vec<Country>, CountryError>) -> Arc<Self> {
            Arc::new(Self {
                gate: Notify::new(),
                fetches: AtomicUsize::new(0),
                result,
            })
        }
    }

    impl CountrySource for GatedSource {
        async fn fetch_all(&self) -> Result<Vec<Country>, CountryError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            self.result.clone()
        }

        async fn fetch_by_code(&self, code: &str) -> Result<Country, CountryError> {
            Err(CountryError::NotFound(code.to_string()))
        }
    }

    fn countries() -> Vec<Country> {
        vec![Country::new("DEU", "Germany"), Country::new("FRA", "France")]
    }

    #[tokio::test]
    async fn test_loading_then_ready() {
        let source = GatedSource::new(Ok(countries()));
        let session = CatalogSession::new("list", source.clone());

        let handle = session.mount().await;
        assert!(session.state().await.is_loading());

        source.gate.notify_one();
        handle.await.unwrap();

        let state = session.state().await;
        let catalog = state.ready().unwrap();
        assert_eq!(catalog.iter().next().unwrap().name, "France");
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_loading_then_failed() {
        let source = GatedSource::new(Err(CountryError::Network("offline".to_string())));
        let session = CatalogSession::new("list", source.clone());

        let handle = session.mount().await;
        source.gate.notify_one();
        handle.await.unwrap();

        assert_eq!(
            session.state().await,
            ViewState::Failed(CountryError::Network("offline".to_string()))
        );
    }

    #[tokio::test]
    async fn test_unmount_discards_in_flight_fetch() {
        let source = GatedSource::new(Ok(countries()));
        let session = CatalogSession::new("list", source.clone());

        let handle = session.mount().await;
        session.unmount().await;
        source.gate.notify_one();
        handle.await.unwrap();

        assert!(session.state().await.is_loading());
    }

    #[tokio::test]
    async fn test_drop_discards_in_flight_fetch() {
        let source = GatedSource::new(Ok(countries()));
        let session = CatalogSession::new("list", source.clone());
        let state = session.state.clone();

        let handle = session.mount().await;
        drop(session);
        source.gate.notify_one();
        handle.await.unwrap();

        assert!(state.read().await.is_loading());
    }

    /// Source that answers immediately.
    struct InstantSource;

    impl CountrySource for InstantSource {
        async fn fetch_all(&self) -> Result<Vec<Country>, CountryError> {
            Ok(countries())
        }

        async fn fetch_by_code(&self, code: &str) -> Result<Country, CountryError> {
            Err(CountryError::NotFound(code.to_string()))
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_mounts_end_ready() {
        for _ in 0..50 {
            let session = Arc::new(CatalogSession::new("list", Arc::new(InstantSource)));

            let (first, second) = tokio::join!(
                {
                    let session = session.clone();
                    tokio::spawn(async move { session.mount().await })
                },
                {
                    let session = session.clone();
                    tokio::spawn(async move { session.mount().await })
                }
            );
            first.unwrap().await.unwrap();
            second.unwrap().await.unwrap();

            assert!(session.state().await.ready().is_some());
        }
    }

    #[tokio::test]
    async fn test_remount_replaces_snapshot() {
        let source = GatedSource::new(Ok(countries()));
        let session = CatalogSession::new("map", source.clone());

        let first = session.mount().await;
        source.gate.notify_one();
        first.await.unwrap();
        let before = session.state().await.ready().cloned().unwrap();

        let second = session.mount().await;
        assert!(session.state().await.is_loading());
        source.gate.notify_one();
        second.await.unwrap();

        let after = session.state().await.ready().cloned().unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.len(), 2);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }
}
