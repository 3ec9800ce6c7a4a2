use core::borrow::Borrow;

use smallvec::SmallVec;

/// Number of entries a bucket stores inline before spilling to the heap.
///
/// At the default maximum load most chains hold zero, one or two entries, so
/// two inline slots keep nearly every bucket allocation-free.
pub(crate) const INLINE_SLOTS: usize = 2;

pub(crate) type Slots<K, V> = SmallVec<[Slot<K, V>; INLINE_SLOTS]>;

/// An owned key-value pair together with the cached hash of its key.
///
/// The hash is kept so that a rehash can redistribute entries without
/// hashing any key a second time.
#[derive(Clone)]
pub(crate) struct Slot<K, V> {
    pub(crate) hash: u64,
    pub(crate) key: K,
    pub(crate) value: V,
}

/// A single chain of entries sharing one bucket index.
///
/// Entries stay in insertion order; removal shifts later entries down rather
/// than swapping the tail into the hole.
#[derive(Clone)]
pub(crate) struct Bucket<K, V> {
    slots: Slots<K, V>,
}

impl<K, V> Bucket<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: SmallVec::new_const(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the position of `key` within this chain.
    #[inline]
    pub(crate) fn position<Q>(&self, hash: u64, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.slots
            .iter()
            .position(|slot| slot.hash == hash && slot.key.borrow() == key)
    }

    #[inline]
    pub(crate) fn slot(&self, position: usize) -> &Slot<K, V> {
        &self.slots[position]
    }

    #[inline]
    pub(crate) fn slot_mut(&mut self, position: usize) -> &mut Slot<K, V> {
        &mut self.slots[position]
    }

    /// Appends `slot` to the end of the chain and returns its value.
    ///
    /// The caller is responsible for ensuring the key is not already present.
    pub(crate) fn push(&mut self, slot: Slot<K, V>) -> &mut V {
        let position = self.slots.len();
        self.slots.push(slot);
        &mut self.slots[position].value
    }

    pub(crate) fn remove(&mut self, position: usize) -> Slot<K, V> {
        self.slots.remove(position)
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }

    pub(crate) fn slots(&self) -> &[Slot<K, V>] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Slot<K, V>] {
        &mut self.slots
    }

    pub(crate) fn into_slots(self) -> Slots<K, V> {
        self.slots
    }
}
