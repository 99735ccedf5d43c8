use crate::Error;
use pitstop_entities::{comment::*, entry::*, id::*, rating::*};

/// The canonical in-memory collection of entries.
///
/// Entries keep the order in which they arrived.
#[derive(Debug, Default, Clone)]
pub struct EntryStore {
    entries: Vec<Entry>,
}

impl EntryStore {
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &Id) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == *id)
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.get(id).is_some()
    }

    pub fn replace_all(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
    }

    /// Add an entry confirmed by the backend.
    ///
    /// An entry with the same ID is replaced in place.
    pub fn append(&mut self, entry: Entry) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.id == entry.id) {
            log::warn!("Replacing already existing entry {}", entry.id);
            *existing = entry;
        } else {
            self.entries.push(entry);
        }
    }

    pub fn append_comment(
        &mut self,
        id: &Id,
        comment: Comment,
        ratings: RatingTriple,
    ) -> Result<(), Error> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == *id)
            .ok_or(Error::EntryNotFound)?;
        entry.add_comment(comment, ratings);
        Ok(())
    }
}
