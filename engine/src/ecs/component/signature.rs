use std::fmt;

use fixedbitset::FixedBitSet;

use crate::ecs::component::Slot;

/// A fixed-width set of component slots.
///
/// Each entity has one signature: bit `k` is set exactly when the entity holds a value in the store
/// for slot `k`. Queries build a signature of required slots and match entities whose signature is
/// a superset of it.
///
/// The width is fixed at construction. Slots beyond it are never contained; inserting one is a
/// logic error caught by `FixedBitSet`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    bits: FixedBitSet,
}

impl Signature {
    /// Create an empty signature able to hold `width` slots.
    #[inline]
    pub fn new(width: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(width),
        }
    }

    /// Create a signature holding the given slots.
    pub fn with_slots(width: usize, slots: impl IntoIterator<Item = Slot>) -> Self {
        let mut signature = Self::new(width);
        for slot in slots {
            signature.insert(slot);
        }
        signature
    }

    /// The number of slots this signature can describe.
    #[inline]
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Set the bit for `slot`.
    #[inline]
    pub fn insert(&mut self, slot: Slot) {
        self.bits.insert(slot.index());
    }

    /// Clear the bit for `slot`.
    #[inline]
    pub fn remove(&mut self, slot: Slot) {
        self.bits.set(slot.index(), false);
    }

    /// Check the bit for `slot`.
    #[inline]
    pub fn contains(&self, slot: Slot) -> bool {
        self.bits.contains(slot.index())
    }

    /// Returns true if every slot in `required` is also in `self`.
    #[inline]
    pub fn contains_all(&self, required: &Signature) -> bool {
        self.bits.is_superset(&required.bits)
    }

    /// Clear every bit.
    #[inline]
    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// Returns true if no bit is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// The number of set bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate the set slots in ascending order.
    #[inline]
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.bits.ones().map(Slot::from)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Print as a binary string, lowest slot first.
        write!(f, "Signature(")?;
        for bit in 0..self.width() {
            write!(f, "{}", if self.bits.contains(bit) { '1' } else { '0' })?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_remove_contains() {
        // Given
        let mut signature = Signature::new(8);

        // When
        signature.insert(Slot::new(1));
        signature.insert(Slot::new(5));
        signature.remove(Slot::new(1));

        // Then
        assert!(!signature.contains(Slot::new(1)));
        assert!(signature.contains(Slot::new(5)));
        assert_eq!(signature.len(), 1);
        assert!(!signature.contains(Slot::new(40)));
    }

    #[test]
    fn superset_matching() {
        // Given
        let entity = Signature::with_slots(8, [Slot::new(0), Slot::new(2), Slot::new(3)]);
        let subset = Signature::with_slots(8, [Slot::new(0), Slot::new(3)]);
        let disjoint = Signature::with_slots(8, [Slot::new(0), Slot::new(1)]);

        // Then
        assert!(entity.contains_all(&subset));
        assert!(entity.contains_all(&entity));
        assert!(!entity.contains_all(&disjoint));
        assert!(entity.contains_all(&Signature::new(8)));
        assert!(!Signature::new(8).contains_all(&subset));
    }

    #[test]
    fn clear_empties() {
        // Given
        let mut signature = Signature::with_slots(4, [Slot::new(0), Slot::new(3)]);

        // When
        signature.clear();

        // Then
        assert!(signature.is_empty());
        assert_eq!(signature.width(), 4);
        assert_eq!(signature, Signature::new(4));
    }

    #[test]
    fn slots_ascending_and_debug() {
        // Given
        let signature = Signature::with_slots(4, [Slot::new(3), Slot::new(1)]);

        // Then
        let slots: Vec<_> = signature.slots().collect();
        assert_eq!(slots, vec![Slot::new(1), Slot::new(3)]);
        assert_eq!(format!("{signature:?}"), "Signature(0101)");
    }
}
