use super::condition::*;
use super::ordering::*;
use super::self_prelude::*;

/// A paginator-defined position marker, meaningful only for the paginator
/// and ordering that produced it.
pub type Cursor = Value;

/// Everything a paginator needs to read one page.
#[derive(Clone, Debug, PartialEq)]
pub struct PageConfig {
    pub ordering: Option<Ordering>,
    /// Exclusive upper bound.
    pub before_cursor: Option<Cursor>,
    /// Exclusive lower bound.
    pub after_cursor: Option<Cursor>,
    /// Maximum number of entries, counted from the start of the window.
    pub first: Option<u64>,
    /// Maximum number of entries, counted from the end of the window.
    pub last: Option<u64>,
    pub condition: Condition,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageEntry {
    pub cursor: Cursor,
    pub value: Value,
}

impl PageEntry {
    pub fn new(cursor: impl Into<Cursor>, value: impl Into<Value>) -> Self {
        Self {
            cursor: cursor.into(),
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    values: Vec<PageEntry>,
    has_next_page: bool,
    has_previous_page: bool,
}

impl Page {
    pub fn new(values: Vec<PageEntry>, has_next_page: bool, has_previous_page: bool) -> Self {
        Self {
            values,
            has_next_page,
            has_previous_page,
        }
    }

    pub fn values(&self) -> &[PageEntry] {
        &self.values
    }
    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }
    pub fn has_previous_page(&self) -> bool {
        self.has_previous_page
    }
    pub fn first(&self) -> Option<&PageEntry> {
        self.values.first()
    }
    pub fn last(&self) -> Option<&PageEntry> {
        self.values.last()
    }
}
