//! Per-book positions, aggregated across books.

use std::collections::BTreeMap;

use crate::domain::bond::Bond;

/// Signed quantity per book for one CUSIP. Zero entries are never pruned
/// — a book that nets back to flat still shows up in the breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub product: Bond,
    books: BTreeMap<String, i64>,
}

impl Position {
    pub fn new(product: Bond) -> Self {
        Self {
            product,
            books: BTreeMap::new(),
        }
    }

    pub fn book_position(&self, book: &str) -> i64 {
        self.books.get(book).copied().unwrap_or(0)
    }

    /// Adds `quantity` (negative for a SELL) to `book`'s running position and
    /// returns the new value for that book.
    pub fn add_position(&mut self, book: impl Into<String>, quantity: i64) -> i64 {
        let entry = self.books.entry(book.into()).or_insert(0);
        *entry += quantity;
        *entry
    }

    pub fn aggregate(&self) -> i64 {
        self.books.values().sum()
    }

    pub fn books(&self) -> impl Iterator<Item = (&str, i64)> {
        self.books.iter().map(|(book, qty)| (book.as_str(), *qty))
    }
}
