use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any entity must implement to be held by a [`ResourceActor`].
///
/// An entity claims one or more unique keys. Inserting it succeeds only if
/// none of its keys is already taken, and then claims all of them at once.
pub trait Entity: Clone + Send + Sync + 'static {
    type Key: Eq + Hash + Ord + Clone + Send + Sync + Display + Debug;

    /// Keys claimed by this entity. Must not be empty.
    fn keys(&self) -> Vec<Self::Key>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameworkError<K: Display + Debug> {
    #[error("Key already taken: {0}")]
    Conflict(K),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

/// Published state of a [`ResourceActor`]. Readers only ever see whole inserts.
#[derive(Debug)]
pub struct Snapshot<T: Entity> {
    by_key: HashMap<T::Key, Arc<T>>,
    entries: Vec<Arc<T>>,
}

impl<T: Entity> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            by_key: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<T: Entity> Snapshot<T> {
    /// Smallest key of `keys` that is already taken.
    fn first_conflict(&self, keys: &[T::Key]) -> Option<T::Key> {
        keys.iter()
            .filter(|key| self.by_key.contains_key(*key))
            .min()
            .cloned()
    }

    fn claim(&mut self, keys: Vec<T::Key>, entity: T) {
        let entity = Arc::new(entity);
        for key in keys {
            self.by_key.insert(key, Arc::clone(&entity));
        }
        self.entries.push(entity);
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, K> = oneshot::Sender<Result<T, FrameworkError<K>>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Insert {
        entity: T,
        respond_to: Response<(), T::Key>,
    },
    Shutdown,
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Single writer for a keyed store.
///
/// All inserts are serialized through the actor's queue. Reads bypass the
/// queue and go straight to the published [`Snapshot`].
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: watch::Sender<Snapshot<T>>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (store, snapshot) = watch::channel(Snapshot::default());
        let actor = Self { receiver, store };
        let client = ResourceClient::new(sender, snapshot);
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self), fields(entity = std::any::type_name::<T>()))]
    pub async fn run(mut self) {
        info!("ResourceActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Insert { entity, respond_to } => {
                    let _ = respond_to.send(self.handle_insert(entity));
                }
                ResourceRequest::Shutdown => {
                    info!("ResourceActor shutting down");
                    break;
                }
            }
        }
        info!("ResourceActor stopped");
    }

    /// Check-then-write for the whole key set under one publication.
    fn handle_insert(&self, entity: T) -> Result<(), FrameworkError<T::Key>> {
        let keys = entity.keys();
        let mut conflict = None;
        self.store.send_if_modified(|snapshot| {
            conflict = snapshot.first_conflict(&keys);
            if conflict.is_some() {
                return false;
            }
            snapshot.claim(keys, entity);
            true
        });
        match conflict {
            Some(key) => {
                warn!(key = %key, "Insert rejected, key already taken");
                Err(FrameworkError::Conflict(key))
            }
            None => {
                debug!("Insert published");
                Ok(())
            }
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    snapshot: watch::Receiver<Snapshot<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(
        sender: mpsc::Sender<ResourceRequest<T>>,
        snapshot: watch::Receiver<Snapshot<T>>,
    ) -> Self {
        Self { sender, snapshot }
    }

    pub async fn insert(&self, entity: T) -> Result<(), FrameworkError<T::Key>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Insert { entity, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub fn get(&self, key: &T::Key) -> Option<Arc<T>> {
        self.snapshot.borrow().by_key.get(key).cloned()
    }

    /// Entities matching `predicate`, in insertion order.
    pub fn entities(&self, predicate: impl Fn(&T) -> bool) -> Vec<Arc<T>> {
        self.snapshot
            .borrow()
            .entries
            .iter()
            .filter(|entity| predicate(entity))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.snapshot.borrow().entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.snapshot.borrow().entries.is_empty()
    }

    pub async fn shutdown(&self) -> Result<(), FrameworkError<T::Key>> {
        self.sender
            .send(ResourceRequest::Shutdown)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
