use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use super::condition::*;
use super::context::*;
use super::ordering::*;
use super::page::*;
use super::self_prelude::*;
use crate::types::Type;

pub type PaginatorResult<T> = Result<T, PaginatorError>;

/// Failures are defined by the store behind the paginator and are
/// propagated to the caller unchanged.
#[derive(thiserror::Error, Debug)]
pub enum PaginatorError {
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// An ordered, cursor-paginated source of values.
///
/// `read_page` must honor `first`/`last` as maximum counts and
/// `before`/`after` as exclusive bounds relative to the requested ordering.
#[async_trait]
pub trait Paginator: Send + Sync {
    fn name(&self) -> &str;
    fn r#type(&self) -> &Type;
    fn orderings(&self) -> &[Ordering];
    fn default_ordering(&self) -> Option<&Ordering>;

    async fn read_page(
        &self,
        ctx: &RequestContext,
        config: &PageConfig,
    ) -> PaginatorResult<Page>;

    async fn count(&self, ctx: &RequestContext, condition: &Condition) -> PaginatorResult<u64>;

    fn ordering(&self, name: &str) -> Option<&Ordering> {
        self.orderings().iter().find(|ordering| ordering.name() == name)
    }
}

static NEXT_PAGINATOR_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a paginator handle, stable for the life of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaginatorId(u64);

impl PaginatorId {
    fn next() -> Self {
        Self(NEXT_PAGINATOR_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

impl fmt::Display for PaginatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A shared paginator together with the identity generated types are
/// memoized under. Clones share the identity; two handles created from
/// equal paginators do not.
#[derive(Clone)]
pub struct PaginatorHandle {
    id: PaginatorId,
    paginator: Arc<dyn Paginator>,
}

impl PaginatorHandle {
    pub fn new(paginator: impl Paginator + 'static) -> Self {
        Self::from_arc(Arc::new(paginator))
    }

    pub fn from_arc(paginator: Arc<dyn Paginator>) -> Self {
        Self {
            id: PaginatorId::next(),
            paginator,
        }
    }

    pub fn id(&self) -> PaginatorId {
        self.id
    }
}

impl Deref for PaginatorHandle {
    type Target = dyn Paginator;

    fn deref(&self) -> &Self::Target {
        self.paginator.as_ref()
    }
}

impl fmt::Debug for PaginatorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginatorHandle")
            .field("id", &self.id)
            .field("name", &self.paginator.name())
            .finish()
    }
}
