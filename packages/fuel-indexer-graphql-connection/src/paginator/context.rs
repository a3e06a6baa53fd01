use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use super::self_prelude::*;

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Per-request state handed to paginators. Connection resolvers require it
/// to be present as request data.
///
/// Stores hang their own per-request handles (transactions, caller
/// identity) off the typed data map.
pub struct RequestContext {
    id: u64,
    data: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            id: NEXT_REQUEST_ID.fetch_add(1, AtomicOrdering::Relaxed),
            data: HashMap::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn with_data<D: Any + Send + Sync>(mut self, data: D) -> Self {
        self.insert(data);
        self
    }

    /// Inserts a value, replacing any previous value of the same type.
    pub fn insert<D: Any + Send + Sync>(&mut self, data: D) {
        self.data.insert(TypeId::of::<D>(), Box::new(data));
    }

    pub fn data<D: Any + Send + Sync>(&self) -> Option<&D> {
        self.data
            .get(&TypeId::of::<D>())
            .and_then(|data| data.downcast_ref::<D>())
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("id", &self.id)
            .field("data", &self.data.len())
            .finish()
    }
}
