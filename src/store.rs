use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;
use tracing::debug;

use crate::book::Book;

/// Errors raised by the book store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store lock poisoned")]
    LockPoisoned,
}

/// In-memory book store keyed by ISBN
///
/// Insert-if-absent and update-if-present each run under one write guard,
/// so the check and the write cannot interleave with another writer.
pub struct BookStore {
    books: RwLock<HashMap<String, Book>>,
}

impl BookStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            books: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Book>>, StoreError> {
        self.books.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Book>>, StoreError> {
        self.books.write().map_err(|_| StoreError::LockPoisoned)
    }

    /// All books currently stored, in no particular order
    pub fn find_all(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.read()?.values().cloned().collect())
    }

    /// The book stored under `isbn`, if any
    pub fn find(&self, isbn: &str) -> Result<Option<Book>, StoreError> {
        Ok(self.read()?.get(isbn).cloned())
    }

    /// Insert `book` unless its ISBN is already taken
    ///
    /// Returns `false` and leaves the existing record untouched on collision.
    pub fn save(&self, book: Book) -> Result<bool, StoreError> {
        let mut books = self.write()?;
        match books.entry(book.isbn.clone()) {
            Entry::Occupied(_) => {
                debug!("save rejected, isbn {} already present", book.isbn);
                Ok(false)
            }
            Entry::Vacant(slot) => {
                debug!("saved isbn {}", book.isbn);
                slot.insert(book);
                Ok(true)
            }
        }
    }

    /// Replace the book stored under `isbn`, only if one exists
    ///
    /// The record stays keyed by `isbn` even when `book.isbn` differs, so a
    /// later save of `book.isbn` can leave two records carrying that ISBN.
    pub fn update(&self, isbn: &str, book: Book) -> Result<bool, StoreError> {
        let mut books = self.write()?;
        match books.get_mut(isbn) {
            Some(existing) => {
                *existing = book;
                debug!("updated isbn {}", isbn);
                Ok(true)
            }
            None => {
                debug!("update rejected, isbn {} not found", isbn);
                Ok(false)
            }
        }
    }

    /// Remove the book stored under `isbn`; absent keys are ignored
    ///
    /// Returns whether a record was actually removed.
    pub fn remove(&self, isbn: &str) -> Result<bool, StoreError> {
        let removed = self.write()?.remove(isbn).is_some();
        if removed {
            debug!("removed isbn {}", isbn);
        }
        Ok(removed)
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.read()?.is_empty())
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_save_and_find() {
        let store = BookStore::new();
        let book = Book::new("123").with_title("A").with_author("Someone");

        assert!(store.save(book.clone()).unwrap());
        assert_eq!(store.find("123").unwrap(), Some(book));
    }

    #[test]
    fn test_find_missing() {
        let store = BookStore::new();
        assert_eq!(store.find("nope").unwrap(), None);
    }

    #[test]
    fn test_save_duplicate_keeps_original() {
        let store = BookStore::new();
        let original = Book::new("123").with_title("A");

        assert!(store.save(original.clone()).unwrap());
        assert!(!store.save(Book::new("123").with_title("B")).unwrap());

        assert_eq!(store.find("123").unwrap(), Some(original));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_update_existing() {
        let store = BookStore::new();
        store.save(Book::new("123").with_title("A")).unwrap();

        assert!(store.update("123", Book::new("123").with_title("B")).unwrap());

        let found = store.find("123").unwrap().unwrap();
        assert_eq!(found.title.as_deref(), Some("B"));
    }

    #[test]
    fn test_update_missing_does_not_insert() {
        let store = BookStore::new();

        assert!(!store.update("123", Book::new("123")).unwrap());
        assert_eq!(store.find("123").unwrap(), None);
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_update_keeps_path_key_when_body_isbn_differs() {
        let store = BookStore::new();
        store.save(Book::new("123").with_title("A")).unwrap();

        assert!(store.update("123", Book::new("999").with_title("B")).unwrap());

        // Still keyed by the original ISBN, body stored as sent
        let found = store.find("123").unwrap().unwrap();
        assert_eq!(found.isbn, "999");
        assert_eq!(found.title.as_deref(), Some("B"));
        assert_eq!(store.find("999").unwrap(), None);

        // The body's ISBN is not reserved, so it can be saved again
        assert!(store.save(Book::new("999").with_title("C")).unwrap());
        let mut isbns: Vec<String> = store
            .find_all()
            .unwrap()
            .into_iter()
            .map(|b| b.isbn)
            .collect();
        isbns.sort();
        assert_eq!(isbns, vec!["999", "999"]);
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = BookStore::new();
        store.save(Book::new("123")).unwrap();

        assert!(store.remove("123").unwrap());
        assert!(!store.remove("123").unwrap());
        assert!(!store.remove("never-there").unwrap());

        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_find_all_returns_every_saved_book() {
        let store = BookStore::new();
        for i in 0..5 {
            assert!(store.save(Book::new(format!("isbn-{}", i))).unwrap());
        }
        // Rejected duplicate must not show up
        assert!(!store.save(Book::new("isbn-0")).unwrap());

        let mut isbns: Vec<String> = store
            .find_all()
            .unwrap()
            .into_iter()
            .map(|b| b.isbn)
            .collect();
        isbns.sort();

        assert_eq!(isbns, vec!["isbn-0", "isbn-1", "isbn-2", "isbn-3", "isbn-4"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_save_same_isbn_succeeds_once() {
        let store = Arc::new(BookStore::new());

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .save(Book::new("shared").with_title(format!("writer {}", i)))
                        .unwrap()
                })
            })
            .collect();

        let mut inserted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                inserted += 1;
            }
        }

        assert_eq!(inserted, 1);
        assert_eq!(store.len().unwrap(), 1);
    }
}
