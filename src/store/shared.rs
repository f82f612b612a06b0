//! Shared, non-cancellable access to a `CatalogStore`.

use tokio::sync::{mpsc, oneshot};

use super::CatalogStore;
use crate::errors::Result;
use crate::models::{ShoeDraft, ShoeRecord};
use crate::remote::CatalogRemote;
use crate::search;

/// Reply to one queued operation. Dropping it detaches the caller; the operation still runs.
pub type Pending<T> = oneshot::Receiver<Result<T>>;

enum Command {
    Load(oneshot::Sender<Result<()>>),
    Add(ShoeDraft, oneshot::Sender<Result<ShoeRecord>>),
    Update(String, ShoeDraft, oneshot::Sender<Result<ShoeRecord>>),
    Remove(String, oneshot::Sender<Result<ShoeRecord>>),
    FetchDetail(String, oneshot::Sender<Result<ShoeRecord>>),
    Snapshot(oneshot::Sender<Vec<ShoeRecord>>),
}

/// A cloneable handle to one store, for callers whose lifetime is shorter than a request
/// (a dialog that may be closed while its save is still in flight).
///
/// The store is owned by a single worker task fed through a channel. Every operation is
/// queued when the `spawn_*` call returns, and the worker runs them one at a time in that
/// order, each to completion. Reads queue behind earlier operations the same way, so a
/// `load` never interleaves with a mutation and a later edit is never overtaken by an
/// earlier one.
#[derive(Clone)]
pub struct SharedCatalog {
    commands: mpsc::UnboundedSender<Command>,
}

impl SharedCatalog {
    /// Move `store` onto a worker task. Must be called inside a tokio runtime.
    ///
    /// The worker exits once every handle has been dropped and the queue is drained.
    pub fn new<R: CatalogRemote + 'static>(store: CatalogStore<R>) -> Self {
        let (commands, queue) = mpsc::unbounded_channel();
        tokio::spawn(run(store, queue));
        Self { commands }
    }

    pub fn spawn_load(&self) -> Pending<()> {
        self.submit(Command::Load)
    }

    pub fn spawn_add(&self, draft: ShoeDraft) -> Pending<ShoeRecord> {
        self.submit(|reply| Command::Add(draft, reply))
    }

    pub fn spawn_update(&self, id: String, patch: ShoeDraft) -> Pending<ShoeRecord> {
        self.submit(|reply| Command::Update(id, patch, reply))
    }

    pub fn spawn_remove(&self, id: String) -> Pending<ShoeRecord> {
        self.submit(|reply| Command::Remove(id, reply))
    }

    pub fn spawn_fetch_detail(&self, id: String) -> Pending<ShoeRecord> {
        self.submit(|reply| Command::FetchDetail(id, reply))
    }

    /// Copy of the collection once every operation issued before this call has settled.
    ///
    /// Empty if the worker is gone.
    pub async fn snapshot(&self) -> Vec<ShoeRecord> {
        let (reply, rx) = oneshot::channel();
        if self.commands.send(Command::Snapshot(reply)).is_err() {
            tracing::warn!("Catalog worker has stopped");
            return Vec::new();
        }
        rx.await.unwrap_or_default()
    }

    pub async fn find(&self, id: &str) -> Option<ShoeRecord> {
        self.snapshot().await.into_iter().find(|shoe| shoe.id == id)
    }

    pub async fn search(&self, query: &str) -> Vec<ShoeRecord> {
        let shoes = self.snapshot().await;
        search::filter(&shoes, query).into_iter().cloned().collect()
    }

    fn submit<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<Result<T>>) -> Command,
    ) -> Pending<T> {
        let (reply, rx) = oneshot::channel();
        // A closed queue drops the sender with the command, so the caller sees `RecvError`.
        if self.commands.send(command(reply)).is_err() {
            tracing::warn!("Catalog worker has stopped");
        }
        rx
    }
}

async fn run<R: CatalogRemote>(
    mut store: CatalogStore<R>,
    mut queue: mpsc::UnboundedReceiver<Command>,
) {
    while let Some(command) = queue.recv().await {
        // Send failures mean the caller went away; the result is already applied.
        match command {
            Command::Load(reply) => {
                let _ = reply.send(store.load().await);
            }
            Command::Add(draft, reply) => {
                let _ = reply.send(store.add(&draft).await);
            }
            Command::Update(id, patch, reply) => {
                let _ = reply.send(store.update(&id, &patch).await);
            }
            Command::Remove(id, reply) => {
                let _ = reply.send(store.remove(&id).await);
            }
            Command::FetchDetail(id, reply) => {
                let _ = reply.send(store.fetch_detail(&id).await);
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(store.list().to_vec());
            }
        }
    }
    tracing::debug!("Catalog worker stopped");
}
