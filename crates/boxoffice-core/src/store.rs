//! Keyed in-memory collection of one record kind mirrored to a line file.

use std::collections::HashMap;
use std::fs;
use std::io;

use boxoffice_model::{DecodeError, Id, RecordFormat};
use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// Failure to mirror a store to or from its file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access {kind} file {path}: {source}")]
    Io {
        kind: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path}:{line}: bad {kind} record: {source}")]
    Decode {
        kind: &'static str,
        path: Utf8PathBuf,
        line: usize,
        #[source]
        source: DecodeError,
    },
}

/// Every identifier above the highest one in use is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no {kind} identifier left above {}", Id::MAX)]
pub struct IdsExhausted {
    pub kind: &'static str,
}

/// Records of one kind, kept in insertion (or load) order and indexed by identifier.
///
/// The store never caches an identifier counter: [`Store::next_id`] is derived
/// from the records currently held, so removing the highest identifier makes
/// it available again.
#[derive(Debug)]
pub struct Store<T> {
    path: Utf8PathBuf,
    format: RecordFormat<T>,
    records: Vec<T>,
    index: HashMap<Id, usize>,
}

impl<T> Store<T> {
    /// Create an empty store backed by `path`. Nothing is read until [`Store::load`].
    pub fn new(path: impl Into<Utf8PathBuf>, format: RecordFormat<T>) -> Self {
        Self {
            path: path.into(),
            format,
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Replace the in-memory records with the contents of the backing file.
    ///
    /// A missing file yields an empty store. Blank lines are skipped. A record
    /// that repeats an earlier identifier replaces it in place.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be read and
    /// [`StoreError::Decode`] for the first malformed line. On error the
    /// store keeps the records it held before the call.
    pub fn load(&mut self) -> Result<(), StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(source) => return Err(self.io_error(source)),
        };

        let mut loaded = Self::new(self.path.clone(), self.format);
        for (n, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record = (self.format.decode)(line).map_err(|source| StoreError::Decode {
                kind: self.format.kind,
                path: self.path.clone(),
                line: n + 1,
                source,
            })?;
            loaded.upsert(record);
        }

        self.records = loaded.records;
        self.index = loaded.index;
        Ok(())
    }

    /// Write every record, one line each and in current order, over the backing file.
    ///
    /// The parent directory is created if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory or the file cannot be written.
    pub fn flush(&self) -> Result<(), StoreError> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;

        let mut out = String::new();
        for record in &self.records {
            out.push_str(&(self.format.encode)(record));
            out.push('\n');
        }
        fs::write(&self.path, out).map_err(|source| self.io_error(source))
    }

    /// All records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: Id) -> bool {
        self.index.contains_key(&id)
    }

    #[must_use]
    pub fn get(&self, id: Id) -> Option<&T> {
        self.index.get(&id).map(|&at| &self.records[at])
    }

    /// Mutable access for in-place edits. Record identifiers cannot be changed
    /// through the model's setters, so the index stays valid.
    pub fn get_mut(&mut self, id: Id) -> Option<&mut T> {
        self.index.get(&id).map(|&at| &mut self.records[at])
    }

    /// Insert `record`, or replace the record with the same identifier in place.
    ///
    /// Returns the replaced record, if any.
    pub fn upsert(&mut self, record: T) -> Option<T> {
        let id = (self.format.id)(&record);
        if let Some(&at) = self.index.get(&id) {
            return Some(std::mem::replace(&mut self.records[at], record));
        }
        self.index.insert(id, self.records.len());
        self.records.push(record);
        None
    }

    /// Remove the record with `id`. Removing an absent identifier does nothing.
    pub fn remove(&mut self, id: Id) -> Option<T> {
        let at = self.index.remove(&id)?;
        let removed = self.records.remove(at);
        for slot in self.index.values_mut() {
            if *slot > at {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    /// One more than the highest identifier held, or 1 when empty.
    ///
    /// `None` once [`Id::MAX`] is in use.
    #[must_use]
    pub fn next_id(&self) -> Option<Id> {
        match self.index.keys().max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    /// Build a record under the next free identifier and insert it.
    ///
    /// # Errors
    ///
    /// Returns [`IdsExhausted`] (converted into `E`) when no identifier is
    /// left, and propagates the builder's error. Either way the store is left
    /// unchanged.
    pub fn create<E>(&mut self, build: impl FnOnce(Id) -> Result<T, E>) -> Result<&T, E>
    where
        E: From<IdsExhausted>,
    {
        let next = self.next_id().ok_or(IdsExhausted {
            kind: self.format.kind,
        })?;
        let record = build(next)?;
        let id = (self.format.id)(&record);
        self.upsert(record);
        Ok(&self.records[self.index[&id]])
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            kind: self.format.kind,
            path: self.path.clone(),
            source,
        }
    }
}

impl<'a, T> IntoIterator for &'a Store<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxoffice_model::{Booking, Customer, EventKind};

    fn customers(ids: &[Id]) -> Store<Customer> {
        let mut store = Store::new("unused/customers.csv", Customer::FORMAT);
        for &id in ids {
            store.upsert(Customer::new(id, format!("c{id}")).unwrap());
        }
        store
    }

    #[test]
    fn next_id_starts_at_one() {
        assert_eq!(customers(&[]).next_id(), Some(1));
    }

    #[test]
    fn next_id_reuses_after_deleting_the_highest() {
        let mut store = customers(&[1, 3, 5]);
        assert_eq!(store.next_id(), Some(6));
        store.remove(5);
        assert_eq!(store.next_id(), Some(4));
        store.remove(1);
        assert_eq!(store.next_id(), Some(4));
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut store = customers(&[1, 2, 3]);
        let old = store.upsert(Customer::new(2, "Bea").unwrap());
        assert_eq!(old.unwrap().name(), "c2");
        let names: Vec<_> = store.iter().map(Customer::name).collect();
        assert_eq!(names, ["c1", "Bea", "c3"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn find_returns_last_saved() {
        let mut store = customers(&[]);
        store.upsert(Customer::new(7, "first").unwrap());
        store.upsert(Customer::new(7, "second").unwrap());
        assert_eq!(store.get(7).unwrap().name(), "second");
        assert!(store.get(8).is_none());
    }

    #[test]
    fn remove_keeps_order_and_index_consistent() {
        let mut store = customers(&[4, 1, 9, 2]);
        assert_eq!(store.remove(1).unwrap().id(), 1);
        let ids: Vec<_> = store.iter().map(Customer::id).collect();
        assert_eq!(ids, [4, 9, 2]);
        assert_eq!(store.get(2).unwrap().id(), 2);
        assert_eq!(store.get(9).unwrap().id(), 9);
        assert!(store.get(1).is_none());
    }

    #[test]
    fn removing_absent_id_is_a_no_op() {
        let mut store = customers(&[1]);
        assert!(store.remove(42).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn create_assigns_next_id() {
        let mut store: Store<Booking> = Store::new("b.csv", Booking::FORMAT);
        let id = store
            .create(|id| Ok::<_, IdsExhausted>(Booking::new(id, 1, EventKind::Music, 2)))
            .unwrap()
            .id();
        assert_eq!(id, 1);
        assert_eq!(store.next_id(), Some(2));
    }

    #[test]
    fn failed_create_leaves_store_unchanged() {
        let mut store = customers(&[1]);
        assert!(
            store
                .create(|id| Customer::new(id, "a|b").map_err(anyhow::Error::from))
                .is_err()
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.next_id(), Some(2));
    }

    #[test]
    fn next_id_stops_at_the_largest_identifier() {
        let mut store = customers(&[1, Id::MAX]);
        assert_eq!(store.next_id(), None);

        let err = store
            .create(|id| Ok::<_, IdsExhausted>(Customer::new(id, "late").unwrap()))
            .unwrap_err();
        assert_eq!(err.kind, "customer");
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(Id::MAX).unwrap().name(), format!("c{}", Id::MAX));

        store.remove(Id::MAX);
        assert_eq!(store.next_id(), Some(2));
    }

    #[test]
    fn edits_through_get_mut_are_visible() {
        let mut store = customers(&[1]);
        store.get_mut(1).unwrap().set_name("Ana").unwrap();
        assert_eq!(store.get(1).unwrap().name(), "Ana");
    }
}
