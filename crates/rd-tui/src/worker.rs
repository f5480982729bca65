//! Background execution of [`Effect`]s.
//!
//! Each effect runs in its own tokio task and reports back with exactly one
//! [`Event`] on the TUI channel. Tasks never touch app state; if the app has
//! gone away the send fails and the result is dropped.

use std::sync::Arc;

use rd_api::{CachedClient, EvolutionChainResolver, PokeApi, Upstream};
use rd_core::BranchPolicy;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::effect::Effect;
use crate::event::Event;

/// Runs effects against a [`CachedClient`].
pub struct Worker<U = PokeApi> {
    client: Arc<CachedClient<U>>,
    events: mpsc::Sender<Event>,
    shutdown: CancellationToken,
    policy: BranchPolicy,
}

impl<U: Upstream + 'static> Worker<U> {
    /// Creates a worker sending results to `events`.
    ///
    /// `shutdown` aborts in-flight index listings when the browser exits.
    #[must_use]
    pub const fn new(
        client: Arc<CachedClient<U>>,
        events: mpsc::Sender<Event>,
        shutdown: CancellationToken,
        policy: BranchPolicy,
    ) -> Self {
        Self {
            client,
            events,
            shutdown,
            policy,
        }
    }

    /// Starts `effect` in the background.
    pub fn spawn(&self, effect: Effect) -> JoinHandle<()> {
        trace!(?effect, "spawning effect");
        let client = Arc::clone(&self.client);
        let events = self.events.clone();
        let shutdown = self.shutdown.clone();
        let policy = self.policy;

        tokio::spawn(async move {
            let event = match effect {
                Effect::FetchIndex(kind) => Event::IndexLoaded {
                    kind,
                    result: client.catalog_index(kind, &shutdown).await,
                },
                Effect::FetchDetails { kind, name } => {
                    let result = client.details(kind, &name).await;
                    Event::DetailLoaded { kind, name, result }
                }
                Effect::ResolveEvolution { species } => {
                    let result = EvolutionChainResolver::new(&client, policy)
                        .resolve(&species)
                        .await;
                    Event::EvolutionLoaded { species, result }
                }
                Effect::FetchTypeMembers(type_name) => {
                    let result = client.type_members(&type_name).await;
                    Event::TypeMembersLoaded { type_name, result }
                }
                Effect::FetchGenerationMembers(generation) => Event::GenerationMembersLoaded {
                    generation,
                    result: client.generation_members(generation).await,
                },
                Effect::FetchTypeNames => Event::TypeNamesLoaded(client.type_names().await),
                Effect::LoadMoreAfter { kind, delay } => {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    Event::LoadMoreReady(kind)
                }
            };

            if events.send(event).await.is_err() {
                debug!("event channel closed, dropping result");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use rd_api::{ApiError, DetailsCache};
    use rd_core::{CatalogKind, FxHashMap};
    use serde_json::{Value, json};

    use super::*;

    #[derive(Default)]
    struct FakeUpstream {
        responses: FxHashMap<String, Value>,
    }

    #[async_trait]
    impl Upstream for FakeUpstream {
        async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
            self.responses
                .get(path)
                .cloned()
                .ok_or_else(|| ApiError::status(404, path))
        }
    }

    fn worker(
        responses: impl IntoIterator<Item = (&'static str, Value)>,
    ) -> (Worker<FakeUpstream>, mpsc::Receiver<Event>, CancellationToken) {
        let upstream = FakeUpstream {
            responses: responses
                .into_iter()
                .map(|(path, value)| (path.to_owned(), value))
                .collect(),
        };
        let client = CachedClient::new(upstream, Arc::new(DetailsCache::new(16)), 2000);
        let (tx, rx) = mpsc::channel(8);
        let shutdown = CancellationToken::new();
        let worker = Worker::new(
            Arc::new(client),
            tx,
            shutdown.clone(),
            BranchPolicy::FirstBranch,
        );
        (worker, rx, shutdown)
    }

    #[tokio::test]
    async fn test_fetch_index_reports_entries() {
        let (worker, mut rx, _shutdown) = worker([(
            "item?limit=2000&offset=0",
            json!({
                "count": 2,
                "results": [
                    {"name": "master-ball", "url": "https://pokeapi.co/api/v2/item/1/"},
                    {"name": "ultra-ball", "url": "https://pokeapi.co/api/v2/item/2/"}
                ]
            }),
        )]);

        worker.spawn(Effect::FetchIndex(CatalogKind::Item)).await.unwrap();
        match rx.recv().await {
            Some(Event::IndexLoaded { kind, result }) => {
                assert_eq!(kind, CatalogKind::Item);
                let index = result.unwrap();
                assert_eq!(index.len(), 2);
                assert_eq!(index[1].name, "ultra-ball");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cancelled_index_reports_cancellation() {
        let (worker, mut rx, shutdown) = worker([]);
        shutdown.cancel();

        worker
            .spawn(Effect::FetchIndex(CatalogKind::Pokemon))
            .await
            .unwrap();
        match rx.recv().await {
            Some(Event::IndexLoaded { result, .. }) => {
                assert!(result.unwrap_err().is_cancelled());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_details_carry_name() {
        let (worker, mut rx, _shutdown) = worker([]);

        worker
            .spawn(Effect::FetchDetails {
                kind: CatalogKind::Pokemon,
                name: "missingno".to_owned(),
            })
            .await
            .unwrap();
        match rx.recv().await {
            Some(Event::DetailLoaded { name, result, .. }) => {
                assert_eq!(name, "missingno");
                assert!(result.unwrap_err().is_not_found());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_type_members() {
        let (worker, mut rx, _shutdown) = worker([(
            "type/ice",
            json!({
                "pokemon": [
                    {"pokemon": {"name": "jynx", "url": "https://pokeapi.co/api/v2/pokemon/124/"}},
                    {"pokemon": {"name": "lapras", "url": "https://pokeapi.co/api/v2/pokemon/131/"}}
                ]
            }),
        )]);

        worker
            .spawn(Effect::FetchTypeMembers("ice".to_owned()))
            .await
            .unwrap();
        match rx.recv().await {
            Some(Event::TypeMembersLoaded { type_name, result }) => {
                assert_eq!(type_name, "ice");
                let members = result.unwrap();
                assert!(members.contains("lapras"));
                assert_eq!(members.len(), 2);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_more_waits_for_delay() {
        let (worker, mut rx, _shutdown) = worker([]);

        let handle = worker.spawn(Effect::LoadMoreAfter {
            kind: CatalogKind::Pokemon,
            delay: Duration::from_millis(300),
        });
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());

        tokio::time::advance(Duration::from_millis(300)).await;
        handle.await.unwrap();
        assert!(matches!(
            rx.recv().await,
            Some(Event::LoadMoreReady(CatalogKind::Pokemon))
        ));
    }

    #[tokio::test]
    async fn test_closed_channel_is_not_an_error() {
        let (worker, rx, _shutdown) = worker([]);
        drop(rx);

        worker.spawn(Effect::FetchTypeNames).await.unwrap();
    }
}
