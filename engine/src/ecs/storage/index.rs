use crate::ecs::entity::Entity;

/// A position in a store's packed value array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Row(u32);

impl Row {
    /// Construct a row from an index into the packed array.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Get the index into the packed array.
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A fixed-size sparse index from entity id to packed row.
///
/// One slot is reserved per possible entity id, so lookups are a single array read with no hashing
/// and the index never reallocates after construction. The reverse direction (row to entity) is
/// kept by the store next to its values, since it has to move with them.
///
/// | Operation | Time |
/// |-----------|------|
/// | `insert()` | O(1) |
/// | `get()` | O(1) |
/// | `remove()` | O(1) |
#[derive(Debug, Clone)]
pub struct SparseIndex {
    rows: Box<[Option<Row>]>,
}

impl SparseIndex {
    /// Create an index covering entity ids `[0, capacity)`.
    pub fn new(capacity: usize) -> Self {
        Self {
            rows: vec![None; capacity].into_boxed_slice(),
        }
    }

    /// The number of entity ids this index covers.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.rows.len()
    }

    /// Point `entity` at `row`, returning the row it previously pointed at.
    ///
    /// # Panics
    /// Panics if `entity` is outside the covered range. The world checks ranges before any store
    /// is touched.
    #[inline]
    pub fn insert(&mut self, entity: Entity, row: Row) -> Option<Row> {
        self.rows[entity.index()].replace(row)
    }

    /// Get the row for `entity`. Out of range ids have no row.
    #[inline]
    pub fn get(&self, entity: Entity) -> Option<Row> {
        self.rows.get(entity.index()).copied().flatten()
    }

    /// Clear the row for `entity`, returning it if there was one.
    #[inline]
    pub fn remove(&mut self, entity: Entity) -> Option<Row> {
        self.rows.get_mut(entity.index())?.take()
    }

    /// Check if `entity` has a row.
    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.get(entity).is_some()
    }
}
