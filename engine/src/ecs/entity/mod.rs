//! Entity handles and the id pool they are drawn from.
//!
//! An [`Entity`] is nothing more than an integer in `[0, capacity)`. It carries no data and is not
//! a pointer into storage; the world uses it as the row key for every component store and as the
//! index into the signature table.
//!
//! # Recycling
//!
//! The [`Pool`] is seeded with every id up front and hands them out in FIFO order. A released id is
//! pushed to the back of the queue, so the id that has been free the longest is reused first:
//!
//! ```rust,ignore
//! let mut pool = Pool::new(3);
//! let a = pool.allocate()?; // 0
//! let b = pool.allocate()?; // 1
//! pool.release(a)?;
//! pool.allocate()?;         // 2, not 0: id 2 was queued before 0 came back
//! pool.allocate()?;         // 0
//! ```
//!
//! Handles are not generational. Once an id is released and handed out again, an old copy of the
//! handle refers to the new entity.

use std::{collections::VecDeque, fmt};

use fixedbitset::FixedBitSet;

use crate::ecs::error::{Error, Result};

/// An entity in the ECS: an opaque integer handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u32);

impl Entity {
    /// Get the index of this entity if it were to live in indexable storage (e.g. Vec)
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Get the raw id value.
    #[inline]
    pub const fn id(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Entity {
    #[inline]
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<usize> for Entity {
    #[inline]
    fn from(value: usize) -> Self {
        Self(value as u32)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fixed-size pool of entity ids.
///
/// All storage is allocated on construction. An id is queued in `free` exactly when its bit in
/// `live` is clear.
#[derive(Debug, Clone)]
pub struct Pool {
    /// Ids available for allocation, oldest-freed first.
    free: VecDeque<Entity>,

    /// One bit per id, set while the id is allocated.
    live: FixedBitSet,

    /// Number of ids currently allocated.
    live_count: usize,
}

impl Pool {
    /// Construct a pool holding the ids `[0, capacity)`.
    pub fn new(capacity: usize) -> Self {
        let mut free = VecDeque::with_capacity(capacity);
        free.extend((0..capacity).map(Entity::from));
        Self {
            free,
            live: FixedBitSet::with_capacity(capacity),
            live_count: 0,
        }
    }

    /// The total number of ids this pool manages.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.live.len()
    }

    /// Number of ids currently allocated.
    #[inline]
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    /// Take the next free id.
    ///
    /// Fails with [`Error::EntityPoolExhausted`] if every id is allocated.
    pub fn allocate(&mut self) -> Result<Entity> {
        let entity = self.free.pop_front().ok_or(Error::EntityPoolExhausted {
            capacity: self.capacity(),
        })?;
        self.live.insert(entity.index());
        self.live_count += 1;
        Ok(entity)
    }

    /// Return an id to the back of the free queue.
    ///
    /// Fails if the id is out of range or not currently allocated.
    pub fn release(&mut self, entity: Entity) -> Result<()> {
        self.check_live(entity)?;
        self.live.set(entity.index(), false);
        self.live_count -= 1;
        self.free.push_back(entity);
        Ok(())
    }

    /// Check whether `entity` is currently allocated. Out of range ids are never live.
    #[inline]
    pub fn is_live(&self, entity: Entity) -> bool {
        self.live.contains(entity.index())
    }

    /// Verify that `entity` is within this pool's range.
    #[inline]
    pub fn check_range(&self, entity: Entity) -> Result<()> {
        if entity.index() < self.capacity() {
            Ok(())
        } else {
            Err(Error::EntityOutOfRange {
                entity,
                capacity: self.capacity(),
            })
        }
    }

    /// Verify that `entity` is in range and currently allocated.
    #[inline]
    pub fn check_live(&self, entity: Entity) -> Result<()> {
        self.check_range(entity)?;
        if self.is_live(entity) {
            Ok(())
        } else {
            Err(Error::EntityNotAlive { entity })
        }
    }

    /// Iterate all allocated ids in ascending order.
    #[inline]
    pub fn iter_live(&self) -> impl Iterator<Item = Entity> + '_ {
        self.live.ones().map(Entity::from)
    }
}

#[test]
fn pool_uniqueness() {
    // Given
    let mut pool = Pool::new(200);

    // When
    let mut entities = Vec::new();
    for _ in 0..200 {
        entities.push(pool.allocate().unwrap());
    }

    // Then - No dupes generated
    let pre_len = entities.len();
    entities.sort();
    entities.dedup();
    assert_eq!(pre_len, entities.len());
    assert_eq!(pool.live_count(), 200);
}

#[test]
fn pool_exhaustion() {
    // Given
    let mut pool = Pool::new(3);
    for _ in 0..3 {
        pool.allocate().unwrap();
    }

    // When
    let result = pool.allocate();

    // Then
    assert_eq!(result, Err(Error::EntityPoolExhausted { capacity: 3 }));
    assert!(result.unwrap_err().is_exhausted());
}

#[test]
fn pool_fifo_reuse() {
    // Given
    let mut pool = Pool::new(3);
    let e0 = pool.allocate().unwrap();
    let e1 = pool.allocate().unwrap();

    // When - Free in the order e1, e0
    pool.release(e1).unwrap();
    pool.release(e0).unwrap();

    // Then - The never-used id comes first, then the freed ids in release order
    assert_eq!(pool.allocate().unwrap(), Entity(2));
    assert_eq!(pool.allocate().unwrap(), e1);
    assert_eq!(pool.allocate().unwrap(), e0);
    assert!(pool.allocate().is_err());
}

#[test]
fn pool_release_after_exhaustion_allows_allocation() {
    // Given
    let mut pool = Pool::new(2);
    let e0 = pool.allocate().unwrap();
    pool.allocate().unwrap();
    assert!(pool.allocate().is_err());

    // When
    pool.release(e0).unwrap();

    // Then
    assert_eq!(pool.allocate().unwrap(), e0);
}

#[test]
fn pool_release_out_of_range() {
    // Given
    let mut pool = Pool::new(4);

    // When
    let result = pool.release(Entity(4));

    // Then
    assert_eq!(
        result,
        Err(Error::EntityOutOfRange {
            entity: Entity(4),
            capacity: 4
        })
    );
}

#[test]
fn pool_double_release_is_rejected() {
    // Given
    let mut pool = Pool::new(4);
    let entity = pool.allocate().unwrap();
    pool.release(entity).unwrap();

    // When
    let result = pool.release(entity);

    // Then - The id must not be queued twice
    assert_eq!(result, Err(Error::EntityNotAlive { entity }));
    assert_eq!(pool.live_count(), 0);
}

#[test]
fn pool_iter_live_is_ascending() {
    // Given
    let mut pool = Pool::new(6);
    let all: Vec<_> = (0..6).map(|_| pool.allocate().unwrap()).collect();

    // When - Free a few in the middle, then reuse one
    pool.release(all[1]).unwrap();
    pool.release(all[4]).unwrap();
    pool.release(all[2]).unwrap();
    let reused = pool.allocate().unwrap();

    // Then
    assert_eq!(reused, all[1]);
    let live: Vec<_> = pool.iter_live().map(|e| e.id()).collect();
    assert_eq!(live, vec![0, 1, 3, 5]);
    assert!(pool.is_live(all[3]));
    assert!(!pool.is_live(all[4]));
    assert!(!pool.is_live(Entity(100)));
}

#[test]
fn entity_index_and_display() {
    // Given
    let e1 = Entity::from(0u32);
    let e2 = Entity::from(42usize);

    // Then
    assert_eq!(e1.index(), 0);
    assert_eq!(e2.index(), 42);
    assert_eq!(e2.to_string(), "42");
    assert!(e1 < e2);
}
