//! A course schedule indexed by an ordered map.
//!
//! Items are keyed by `SUBJECT-CATALOG-SECTION` and stored in either tree backend.
//! All queries scan the map in key order.

mod csv;
mod item;

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{AvlTreeMap, BstMap, OrderedMap};

pub use item::ScheduleItem;

/// Errors raised while loading a schedule.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("failed to open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to read schedule: {0}")]
    Io(#[from] io::Error),

    #[error("unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },
}

/// The tree backend holding the schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Unbalanced binary search tree.
    Bst,
    /// AVL tree.
    Avl,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Bst => f.write_str("bst"),
            Backend::Avl => f.write_str("avl"),
        }
    }
}

/// A set of course offerings, one per key.
///
/// ```
/// use schedule_tree::{Backend, Schedule};
///
/// let csv = "Subject,Catalog,Section,Title,Instructor\n\
///            CSC,223,01,Data Structures,Ada Lovelace\n\
///            MAT,101,02,,Alan Turing\n";
/// let mut schedule = Schedule::new(Backend::Avl);
/// assert_eq!(schedule.load_from_reader(csv.as_bytes()).unwrap(), 2);
/// assert_eq!(schedule.tree_height(), 1);
/// assert_eq!(schedule.search_by_subject("mat")[0].title, "MAT 101");
/// ```
pub struct Schedule {
    items: Box<dyn OrderedMap<String, ScheduleItem>>,
    backend: Backend,
}

impl Schedule {
    /// Creates an empty schedule stored in the given backend.
    pub fn new(backend: Backend) -> Self {
        let items: Box<dyn OrderedMap<String, ScheduleItem>> = match backend {
            Backend::Bst => Box::new(BstMap::new()),
            Backend::Avl => Box::new(AvlTreeMap::new()),
        };
        Self { items, backend }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Returns the number of distinct course keys.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds an item, replacing any item with the same key.
    pub fn insert(&mut self, item: ScheduleItem) -> Option<ScheduleItem> {
        self.items.insert(item.key(), item)
    }

    /// Loads comma separated course rows from a file.
    /// Returns the number of rows read.
    pub fn load_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, ScheduleError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), backend = %self.backend, "loading schedule");
        let file = File::open(path).map_err(|source| ScheduleError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_from_reader(BufReader::new(file))
    }

    /// Loads comma separated course rows.
    ///
    /// The first row names the columns `Subject`, `Catalog`, `Section`, `Instructor`
    /// and optionally `Title`. Rows whose key is already present replace the earlier row.
    /// Returns the number of rows read.
    pub fn load_from_reader<R: BufRead>(&mut self, input: R) -> Result<usize, ScheduleError> {
        let mut reader = csv::Reader::new(input)?;
        let mut num_rows = 0;
        while let Some(row) = reader.next_row()? {
            let item = ScheduleItem::new(
                row.get("Subject"),
                row.get("Catalog"),
                row.get("Section"),
                row.get("Title"),
                row.get("Instructor"),
            );
            self.insert(item);
            num_rows += 1;
        }
        tracing::info!(
            rows = num_rows,
            courses = self.len(),
            backend = %self.backend,
            height = self.tree_height(),
            "schedule loaded"
        );
        Ok(num_rows)
    }

    /// Returns the height of the underlying tree.
    pub fn tree_height(&self) -> isize {
        self.items.height()
    }

    /// Returns all items sorted by key.
    pub fn list_all_courses(&self) -> Vec<&ScheduleItem> {
        self.items.in_order().map(|(_, item)| item).collect()
    }

    /// Returns the items of a subject, compared case-insensitively.
    pub fn search_by_subject(&self, subject: &str) -> Vec<&ScheduleItem> {
        let subject = subject.to_uppercase();
        self.filter(|item| item.subject.to_uppercase() == subject)
    }

    /// Returns the items matching both subject and catalog number, compared case-insensitively.
    pub fn search_by_subject_catalog(&self, subject: &str, catalog: &str) -> Vec<&ScheduleItem> {
        let subject = subject.to_uppercase();
        let catalog = catalog.to_uppercase();
        self.filter(|item| {
            item.subject.to_uppercase() == subject && item.catalog.to_uppercase() == catalog
        })
    }

    /// Returns the items whose instructor name contains the given text, ignoring case.
    pub fn search_by_instructor(&self, instructor: &str) -> Vec<&ScheduleItem> {
        let instructor = instructor.to_lowercase();
        self.filter(|item| item.instructor.to_lowercase().contains(&instructor))
    }

    fn filter<F: Fn(&ScheduleItem) -> bool>(&self, predicate: F) -> Vec<&ScheduleItem> {
        self.items
            .in_order()
            .map(|(_, item)| item)
            .filter(|item| predicate(item))
            .collect()
    }
}

impl fmt::Debug for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schedule")
            .field("backend", &self.backend)
            .field("len", &self.len())
            .finish()
    }
}
