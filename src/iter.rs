use alloc::vec;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use smallvec::SmallVec;

use crate::HashTable;
use crate::bucket::Bucket;
use crate::bucket::INLINE_SLOTS;
use crate::bucket::Slot;

/// An iterator over the entries of a [`HashTable`](crate::HashTable).
///
/// Walks the bucket array in index order and each chain in insertion order.
/// Callers must not rely on that order: it changes whenever the table grows.
///
/// Created by [`HashTable::iter`](crate::HashTable::iter).
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Bucket<K, V>>,
    slots: core::slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(buckets: &'a [Bucket<K, V>], remaining: usize) -> Self {
        Self {
            buckets: buckets.iter(),
            slots: Default::default(),
            remaining,
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        loop {
            if let Some(slot) = self.slots.next() {
                self.remaining -= 1;
                return Some((&slot.key, &slot.value));
            }
            self.slots = self.buckets.next()?.slots().iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// A mutable iterator over the entries of a [`HashTable`](crate::HashTable).
///
/// Created by [`HashTable::iter_mut`](crate::HashTable::iter_mut).
pub struct IterMut<'a, K, V> {
    buckets: core::slice::IterMut<'a, Bucket<K, V>>,
    slots: core::slice::IterMut<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(buckets: &'a mut [Bucket<K, V>], remaining: usize) -> Self {
        Self {
            buckets: buckets.iter_mut(),
            slots: Default::default(),
            remaining,
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        loop {
            if let Some(slot) = self.slots.next() {
                self.remaining -= 1;
                return Some((&slot.key, &mut slot.value));
            }
            self.slots = self.buckets.next()?.slots_mut().iter_mut();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An owning iterator over the entries of a [`HashTable`](crate::HashTable).
pub struct IntoIter<K, V> {
    buckets: vec::IntoIter<Bucket<K, V>>,
    slots: smallvec::IntoIter<[Slot<K, V>; INLINE_SLOTS]>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(buckets: alloc::vec::Vec<Bucket<K, V>>, remaining: usize) -> Self {
        Self {
            buckets: buckets.into_iter(),
            slots: SmallVec::new().into_iter(),
            remaining,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        loop {
            if let Some(slot) = self.slots.next() {
                self.remaining -= 1;
                return Some((slot.key, slot.value));
            }
            self.slots = self.buckets.next()?.into_slots().into_iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

/// A draining iterator over the entries of a
/// [`HashTable`](crate::HashTable).
///
/// The table is already empty while this iterator is alive. Any entries left
/// when the iterator is dropped are dropped with it; leaking it leaks them.
///
/// Created by [`HashTable::drain`](crate::HashTable::drain).
pub struct Drain<'a, K, V> {
    inner: IntoIter<K, V>,
    marker: PhantomData<&'a mut HashTable<K, V>>,
}

impl<K, V> Drain<'_, K, V> {
    pub(crate) fn new(buckets: alloc::vec::Vec<Bucket<K, V>>, remaining: usize) -> Self {
        Self {
            inner: IntoIter::new(buckets, remaining),
            marker: PhantomData,
        }
    }
}

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Drain<'_, K, V> {}

impl<K, V> FusedIterator for Drain<'_, K, V> {}

/// An iterator over the keys of a [`HashTable`](crate::HashTable).
pub struct Keys<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of a [`HashTable`](crate::HashTable).
pub struct Values<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of a [`HashTable`](crate::HashTable).
pub struct ValuesMut<'a, K, V> {
    pub(crate) inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

/// An owning iterator over the keys of a [`HashTable`](crate::HashTable).
pub struct IntoKeys<K, V> {
    pub(crate) inner: IntoIter<K, V>,
}

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {}

impl<K, V> FusedIterator for IntoKeys<K, V> {}

/// An owning iterator over the values of a [`HashTable`](crate::HashTable).
pub struct IntoValues<K, V> {
    pub(crate) inner: IntoIter<K, V>,
}

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {}

impl<K, V> FusedIterator for IntoValues<K, V> {}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use crate::HashTable;

    fn sorted<T: Ord>(mut items: Vec<T>) -> Vec<T> {
        items.sort();
        items
    }

    fn filled(n: u64) -> HashTable<u64, u64> {
        let mut table = HashTable::new();
        for k in 0..n {
            table.insert(k, k * 10);
        }
        table
    }

    #[test]
    fn iter_yields_every_pair_once() {
        let table = filled(1024);
        let mut iter = table.iter();
        assert_eq!(iter.len(), 1024);
        iter.next();
        assert_eq!(iter.len(), 1023);

        let pairs = sorted(table.iter().map(|(k, v)| (*k, *v)).collect());
        let expected = (0..1024u64).map(|k| (k, k * 10)).collect::<Vec<_>>();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn iter_empty_table() {
        let table: HashTable<String, i32> = HashTable::new();
        assert_eq!(table.iter().next(), None);
        assert_eq!((&table).into_iter().count(), 0);
    }

    #[test]
    fn iter_after_erase_and_clear() {
        let mut table = filled(100);
        for k in (0..100u64).step_by(2) {
            table.erase(&k);
        }
        let keys = sorted(table.keys().copied().collect());
        assert_eq!(keys, (1..100u64).step_by(2).collect::<Vec<_>>());

        table.clear();
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn iter_mut_updates_values() {
        let mut table = filled(64);
        for (k, v) in &mut table {
            *v += *k;
        }
        for v in table.values_mut() {
            *v += 1;
        }
        for k in 0..64u64 {
            assert_eq!(table.at(&k), Ok(&(k * 11 + 1)));
        }
    }

    #[test]
    fn into_iter_owns_pairs() {
        let mut table: HashTable<String, String> = HashTable::new();
        for k in 0..20 {
            table.insert(k.to_string(), (k * 2).to_string());
        }
        let into = table.clone().into_iter();
        assert_eq!(into.len(), 20);

        let pairs = sorted(into.collect::<Vec<_>>());
        let expected = sorted(
            (0..20)
                .map(|k| (k.to_string(), (k * 2).to_string()))
                .collect::<Vec<_>>(),
        );
        assert_eq!(pairs, expected);

        assert_eq!(table.clone().into_keys().count(), 20);
        assert_eq!(
            sorted(table.into_values().collect::<Vec<_>>()),
            sorted((0..20).map(|k| (k * 2).to_string()).collect::<Vec<_>>())
        );
    }

    #[test]
    fn values_sum() {
        let table = filled(10);
        assert_eq!(table.values().sum::<u64>(), (0..10u64).map(|k| k * 10).sum());
    }

    #[test]
    fn drain_empties_and_keeps_capacity() {
        let mut table = filled(300);
        let capacity = table.capacity();

        let drained = sorted(table.drain().collect::<Vec<_>>());
        assert_eq!(drained.len(), 300);
        assert_eq!(drained[299], (299, 2990));
        assert!(table.is_empty());
        assert_eq!(table.capacity(), capacity);
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn partial_drain_still_empties() {
        let mut table = filled(50);
        let mut drain = table.drain();
        assert_eq!(drain.len(), 50);
        drain.next();
        drain.next();
        drop(drain);

        assert!(table.is_empty());
        assert_eq!(table.iter().count(), 0);
        for k in 0..50u64 {
            assert!(!table.contains_key(&k));
        }

        table.insert(1, 1);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn forgotten_drain_leaves_table_consistent() {
        let mut table = filled(40);
        let capacity = table.capacity();
        core::mem::forget(table.drain());

        assert_eq!(table.len(), 0);
        assert_eq!(table.iter().count(), table.len());
        assert_eq!((0..40u64).filter(|k| table.contains_key(k)).count(), 0);
        assert_eq!(table.capacity(), capacity);

        assert!(!table.erase(&1));
        assert_eq!(table.len(), 0);

        let mut drain = table.drain();
        assert_eq!(drain.next(), None);
        drop(drain);

        table.insert(1, 10);
        table.insert(2, 20);
        let mut drain = table.drain();
        assert!(drain.next().is_some());
        core::mem::forget(drain);

        assert!(table.is_empty());
        assert_eq!(table.iter().count(), 0);
        assert!(table.insert(1, 11));
        assert!(table.erase(&1));
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn adapters_stay_exhausted() {
        let table = filled(3);
        let mut keys = table.keys();
        let snapshot = keys.clone();
        assert_eq!(keys.by_ref().count(), 3);
        assert_eq!(keys.next(), None);
        assert_eq!(keys.next(), None);
        assert_eq!(snapshot.len(), 3);

        let mut values = table.values();
        assert_eq!(values.clone().count(), 3);
        assert_eq!(values.by_ref().count(), 3);
        assert_eq!(values.next(), None);

        let mut into_values = table.into_values();
        assert_eq!(into_values.by_ref().count(), 3);
        assert_eq!(into_values.next(), None);
    }

    #[test]
    fn identical_content_iterates_as_same_multiset() {
        let forward = filled(200);
        let mut backward = HashTable::with_capacity(2);
        for k in (0..200u64).rev() {
            backward.insert(k, k * 10);
        }

        let a = sorted(forward.iter().map(|(k, v)| (*k, *v)).collect());
        let b = sorted(backward.iter().map(|(k, v)| (*k, *v)).collect());
        assert_eq!(a, b);
    }
}
