//! Upward lookups over an object graph.
//!
//! Records never point back at their owners. When a caller needs to know
//! which object encloses another, it builds a [`ParentIndex`] (an explicit
//! child → parent map) and walks it upward.

use std::collections::HashMap;

use crate::enums::RecordType;
use crate::error::{NrbfError, Result};

/// Whether a failed ancestor search is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lookup {
    /// Missing ancestor is [`NrbfError::AncestorNotFound`].
    #[default]
    Required,
    /// Missing ancestor is `Ok(None)`.
    Optional,
}

/// Object id → parent id map, plus the record kind of each object.
#[derive(Debug, Clone, Default)]
pub struct ParentIndex {
    parents: HashMap<i32, i32>,
    kinds: HashMap<i32, RecordType>,
}

impl ParentIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a top-level object.
    pub fn insert_root(&mut self, object_id: i32, kind: RecordType) {
        self.kinds.insert(object_id, kind);
    }

    /// Register an object owned by `parent_id`.
    pub fn insert_child(&mut self, object_id: i32, kind: RecordType, parent_id: i32) {
        self.kinds.insert(object_id, kind);
        self.parents.insert(object_id, parent_id);
    }

    #[must_use]
    pub fn parent(&self, object_id: i32) -> Option<i32> {
        self.parents.get(&object_id).copied()
    }

    #[must_use]
    pub fn kind(&self, object_id: i32) -> Option<RecordType> {
        self.kinds.get(&object_id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Find the nearest object of `kind`, starting with `object_id` itself
    /// and moving up through its parents.
    ///
    /// The walk takes at most one step per known object, so a malformed map
    /// containing a cycle ends in "not found" instead of looping.
    ///
    /// # Errors
    ///
    /// [`NrbfError::AncestorNotFound`] when nothing matches and `lookup` is
    /// [`Lookup::Required`].
    pub fn find_ancestor(
        &self,
        object_id: i32,
        kind: RecordType,
        lookup: Lookup,
    ) -> Result<Option<i32>> {
        let mut current = Some(object_id);
        for _ in 0..=self.kinds.len() {
            let Some(id) = current else { break };
            if self.kind(id) == Some(kind) {
                return Ok(Some(id));
            }
            current = self.parent(id);
        }

        match lookup {
            Lookup::Required => Err(NrbfError::AncestorNotFound { object_id, kind }),
            Lookup::Optional => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParentIndex {
        let mut index = ParentIndex::new();
        index.insert_root(1, RecordType::ClassWithMembersAndTypes);
        index.insert_child(2, RecordType::SystemClassWithMembersAndTypes, 1);
        index.insert_child(3, RecordType::BinaryObjectString, 2);
        index
    }

    #[test]
    fn test_finds_nearest_ancestor() {
        let index = sample();
        let found = index
            .find_ancestor(3, RecordType::ClassWithMembersAndTypes, Lookup::Required)
            .unwrap();
        assert_eq!(found, Some(1));

        let found = index
            .find_ancestor(3, RecordType::SystemClassWithMembersAndTypes, Lookup::Required)
            .unwrap();
        assert_eq!(found, Some(2));
    }

    #[test]
    fn test_matches_self() {
        let index = sample();
        let found = index
            .find_ancestor(3, RecordType::BinaryObjectString, Lookup::Required)
            .unwrap();
        assert_eq!(found, Some(3));
    }

    #[test]
    fn test_required_missing_is_error() {
        let index = sample();
        let err = index
            .find_ancestor(3, RecordType::ClassWithId, Lookup::Required)
            .unwrap_err();
        assert!(matches!(
            err,
            NrbfError::AncestorNotFound {
                object_id: 3,
                kind: RecordType::ClassWithId
            }
        ));
    }

    #[test]
    fn test_optional_missing_is_none() {
        let index = sample();
        let found = index
            .find_ancestor(3, RecordType::ClassWithId, Lookup::Optional)
            .unwrap();
        assert_eq!(found, None);

        let found = index
            .find_ancestor(99, RecordType::BinaryObjectString, Lookup::Optional)
            .unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn test_cycle_terminates() {
        let mut index = ParentIndex::new();
        index.insert_child(1, RecordType::BinaryObjectString, 2);
        index.insert_child(2, RecordType::BinaryObjectString, 1);
        let found = index
            .find_ancestor(1, RecordType::ClassWithMembersAndTypes, Lookup::Optional)
            .unwrap();
        assert_eq!(found, None);
    }
}
