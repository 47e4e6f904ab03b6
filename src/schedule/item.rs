//! One scheduled course offering.

use std::fmt;

/// A scheduled course offering, indexed by its [`key`](ScheduleItem::key).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleItem {
    pub subject: String,
    pub catalog: String,
    pub section: String,
    pub title: String,
    pub instructor: String,
}

impl ScheduleItem {
    /// Creates an item from raw field text.
    ///
    /// Every field is trimmed. A missing title falls back to subject and catalog,
    /// e.g. `"CSC 223"`.
    ///
    /// ```
    /// use schedule_tree::ScheduleItem;
    /// let item = ScheduleItem::new(" CSC", "223 ", "01", "", "Ada Lovelace");
    /// assert_eq!(item.title, "CSC 223");
    /// assert_eq!(item.key(), "CSC-223-01");
    /// ```
    pub fn new(subject: &str, catalog: &str, section: &str, title: &str, instructor: &str) -> Self {
        let subject = subject.trim().to_string();
        let catalog = catalog.trim().to_string();
        let title = match title.trim() {
            "" => format!("{subject} {catalog}").trim().to_string(),
            title => title.to_string(),
        };
        Self {
            section: section.trim().to_string(),
            instructor: instructor.trim().to_string(),
            subject,
            catalog,
            title,
        }
    }

    /// Returns the key the item is indexed by: subject, catalog and section joined by dashes.
    pub fn key(&self) -> String {
        format!("{}-{}-{}", self.subject, self.catalog, self.section)
    }
}

impl fmt::Display for ScheduleItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key(), self.title)?;
        if !self.instructor.is_empty() {
            write!(f, " ({})", self.instructor)?;
        }
        Ok(())
    }
}
