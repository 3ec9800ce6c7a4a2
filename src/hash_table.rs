use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::ops::Index;

use foldhash::fast::FixedState;

use crate::bucket::Bucket;
use crate::bucket::Slot;
use crate::error::Error;
use crate::iter::Drain;
use crate::iter::IntoIter;
use crate::iter::IntoKeys;
use crate::iter::IntoValues;
use crate::iter::Iter;
use crate::iter::IterMut;
use crate::iter::Keys;
use crate::iter::Values;
use crate::iter::ValuesMut;

/// Bucket count of a table created through [`HashTable::new`].
pub const DEFAULT_CAPACITY: usize = 16;

const GROWTH_FACTOR: usize = 2;

const HASH_SEED: u64 = 0x6c62_272e_07bb_0142;

cfg_if::cfg_if! {
    if #[cfg(feature = "max-load-fifty")] {
        const MAX_LOAD_NUMERATOR: u128 = 1;
        const MAX_LOAD_DENOMINATOR: u128 = 2;
    } else if #[cfg(feature = "max-load-seventy-five")] {
        const MAX_LOAD_NUMERATOR: u128 = 3;
        const MAX_LOAD_DENOMINATOR: u128 = 4;
    } else if #[cfg(feature = "max-load-one")] {
        const MAX_LOAD_NUMERATOR: u128 = 1;
        const MAX_LOAD_DENOMINATOR: u128 = 1;
    } else {
        const MAX_LOAD_NUMERATOR: u128 = 3;
        const MAX_LOAD_DENOMINATOR: u128 = 4;
    }
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Bucket<K, V>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, Bucket::new);
    buckets
}

#[inline(always)]
fn exceeds_max_load(len: usize, capacity: usize) -> bool {
    len as u128 * MAX_LOAD_DENOMINATOR > capacity as u128 * MAX_LOAD_NUMERATOR
}

/// A hash table mapping keys to values, resolving collisions by separate
/// chaining.
///
/// The table owns a power-of-two sized array of buckets. Each bucket is a
/// short chain of entries whose key hashes land on that bucket's index. The
/// bucket array doubles whenever an insertion would push the load factor
/// past the configured maximum (0.75 unless a `max-load-*` feature says
/// otherwise); it never shrinks.
///
/// Keys are hashed with a fixed [`foldhash`] state, so only `Hash + Eq` is
/// required of them.
///
/// ## Example
///
/// ```rust
/// use chain_hash::HashTable;
///
/// let mut table: HashTable<String, i32> = HashTable::new();
/// assert!(table.insert("a".to_string(), 1));
/// assert!(!table.insert("a".to_string(), 2));
///
/// *table.get_or_default("b".to_string()) += 10;
///
/// assert_eq!(table.at("a"), Ok(&1));
/// assert_eq!(table.at("b"), Ok(&10));
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.capacity(), 16);
/// ```
#[derive(Clone)]
pub struct HashTable<K, V> {
    buckets: Vec<Bucket<K, V>>,
    populated: usize,
    hash_builder: FixedState,
}

impl<K, V> Debug for HashTable<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> HashTable<K, V> {
    /// Creates an empty table with [`DEFAULT_CAPACITY`] buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// let table: HashTable<u64, u64> = HashTable::new();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 16);
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty table with at least `buckets` buckets.
    ///
    /// The bucket count is rounded up to the next power of two, with a
    /// minimum of one bucket.
    ///
    /// # Panics
    ///
    /// Panics if the rounded bucket count overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// let table: HashTable<u64, u64> = HashTable::with_capacity(100);
    /// assert_eq!(table.capacity(), 128);
    ///
    /// let table: HashTable<u64, u64> = HashTable::with_capacity(0);
    /// assert_eq!(table.capacity(), 1);
    /// ```
    pub fn with_capacity(buckets: usize) -> Self {
        let capacity = buckets
            .max(1)
            .checked_next_power_of_two()
            .expect("capacity overflow");

        Self {
            buckets: empty_buckets(capacity),
            populated: 0,
            hash_builder: FixedState::with_seed(HASH_SEED),
        }
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of buckets.
    ///
    /// The bucket count only ever grows, and only through insertions.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the ratio of entries to buckets.
    pub fn load_factor(&self) -> f64 {
        self.populated as f64 / self.buckets.len() as f64
    }

    /// Returns the chain length of the bucket at `index`, or `None` if
    /// `index` is not below [`capacity`](Self::capacity).
    pub fn bucket_len(&self, index: usize) -> Option<usize> {
        self.buckets.get(index).map(Bucket::len)
    }

    /// Removes all entries while keeping the current bucket count.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// let mut table: HashTable<u64, u64> = (0..100).map(|i| (i, i)).collect();
    /// let capacity = table.capacity();
    ///
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), capacity);
    /// ```
    pub fn clear(&mut self) {
        let dropped = self.populated;
        for bucket in self.buckets.iter_mut().filter(|b| !b.is_empty()) {
            bucket.clear();
        }
        self.populated = 0;
        tracing::trace!(dropped, capacity = self.buckets.len(), "cleared table");
    }

    /// Returns an iterator over `(&K, &V)` pairs in unspecified order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.buckets, self.populated)
    }

    /// Returns an iterator over `(&K, &mut V)` pairs in unspecified order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// let mut table: HashTable<u64, u64> = (0..10).map(|i| (i, i)).collect();
    /// for (_, value) in table.iter_mut() {
    ///     *value *= 2;
    /// }
    /// assert_eq!(table.at(&4), Ok(&8));
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.buckets, self.populated)
    }

    /// Returns an iterator over the keys of the table.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the table.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable references to the values of the
    /// table.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Consumes the table, yielding its keys.
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys {
            inner: self.into_iter(),
        }
    }

    /// Consumes the table, yielding its values.
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues {
            inner: self.into_iter(),
        }
    }

    /// Removes and yields every entry, keeping the bucket count.
    ///
    /// The table is empty as soon as this returns; entries the iterator does
    /// not yield are dropped with it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// let mut table: HashTable<u64, u64> = (0..10).map(|i| (i, i)).collect();
    /// let drained = table.drain().count();
    /// assert_eq!(drained, 10);
    /// assert!(table.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        let fresh = empty_buckets(self.buckets.len());
        let buckets = core::mem::replace(&mut self.buckets, fresh);
        let remaining = core::mem::take(&mut self.populated);
        Drain::new(buckets, remaining)
    }

    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn buckets(&self) -> &[Bucket<K, V>] {
        &self.buckets
    }

    #[inline(always)]
    fn bucket_for(&self, hash: u64) -> usize {
        hash as usize & (self.buckets.len() - 1)
    }

    #[inline(always)]
    fn hash<Q>(&self, key: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hash_builder.hash_one(key)
    }

    /// Returns `(bucket, position)` of `key`, if present.
    #[inline]
    fn locate<Q>(&self, key: &Q) -> Option<(usize, usize)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hash(key);
        let bucket = self.bucket_for(hash);
        self.buckets[bucket]
            .position(hash, key)
            .map(|position| (bucket, position))
    }

    /// Appends a new entry, growing the bucket array first if the insertion
    /// would exceed the maximum load.
    fn push_new(&mut self, hash: u64, key: K, value: V) -> &mut V {
        if exceeds_max_load(self.populated + 1, self.buckets.len()) {
            self.grow();
        }

        let bucket = self.bucket_for(hash);
        self.populated += 1;
        self.buckets[bucket].push(Slot { hash, key, value })
    }

    /// Doubles the bucket array and redistributes every entry.
    ///
    /// If the larger array cannot be allocated the table is left exactly as
    /// it was.
    fn grow(&mut self) {
        let old_capacity = self.buckets.len();
        let Some(new_capacity) = old_capacity.checked_mul(GROWTH_FACTOR) else {
            tracing::warn!(old_capacity, "bucket count overflow; keeping current capacity");
            return;
        };

        let mut buckets = Vec::new();
        if buckets.try_reserve_exact(new_capacity).is_err() {
            tracing::warn!(
                old_capacity,
                new_capacity,
                "bucket allocation failed; keeping current capacity"
            );
            return;
        }
        buckets.resize_with(new_capacity, Bucket::new);

        let mask = new_capacity - 1;
        let old = core::mem::replace(&mut self.buckets, buckets);
        for bucket in old.into_iter().filter(|b| !b.is_empty()) {
            for slot in bucket.into_slots() {
                self.buckets[slot.hash as usize & mask].push(slot);
            }
        }

        tracing::debug!(
            old_capacity,
            new_capacity,
            len = self.populated,
            "rehashed table"
        );
    }
}

impl<K, V> HashTable<K, V>
where
    K: Hash + Eq,
{
    /// Builds a table from parallel key and value sequences.
    ///
    /// Pairs are assigned left to right, so when a key repeats, its last
    /// occurrence wins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if the sequences differ in length.
    /// Nothing is inserted in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::Error;
    /// # use chain_hash::HashTable;
    /// let table = HashTable::from_parallel(["a", "b", "a"], [1, 2, 3]).unwrap();
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.at("a"), Ok(&3));
    ///
    /// let mismatch = HashTable::from_parallel(["a", "b"], [1]);
    /// assert_eq!(
    ///     mismatch.unwrap_err(),
    ///     Error::LengthMismatch { keys: 2, values: 1 }
    /// );
    /// ```
    pub fn from_parallel<IK, IV>(keys: IK, values: IV) -> Result<Self, Error>
    where
        IK: IntoIterator<Item = K>,
        IK::IntoIter: ExactSizeIterator,
        IV: IntoIterator<Item = V>,
        IV::IntoIter: ExactSizeIterator,
    {
        let keys = keys.into_iter();
        let values = values.into_iter();
        if keys.len() != values.len() {
            return Err(Error::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }

        let mut table = Self::new();
        table.extend(keys.zip(values));
        Ok(table)
    }

    /// Inserts `value` under `key` only if `key` is not already present.
    ///
    /// Returns `true` if the entry was added. If the key already exists the
    /// table is left unchanged, `value` is dropped and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// let mut table = HashTable::new();
    /// assert!(table.insert(1, "one"));
    /// assert!(!table.insert(1, "uno"));
    /// assert_eq!(table.at(&1), Ok(&"one"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        match self.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(value);
                true
            }
        }
    }

    /// Inserts or overwrites the value stored under `key`, returning the
    /// previous value if there was one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// let mut table = HashTable::new();
    /// assert_eq!(table.assign("c", 30), None);
    /// assert_eq!(table.assign("c", 3), Some(30));
    /// assert_eq!(table.at("c"), Ok(&3));
    /// ```
    pub fn assign(&mut self, key: K, value: V) -> Option<V> {
        match self.entry(key) {
            Entry::Occupied(mut entry) => Some(entry.insert(value)),
            Entry::Vacant(entry) => {
                entry.insert(value);
                None
            }
        }
    }

    /// Returns a mutable reference to the value under `key`, inserting
    /// `V::default()` first if the key is absent.
    ///
    /// The returned reference borrows the table mutably, so it cannot be
    /// held across another operation on the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// let mut table: HashTable<&str, u32> = HashTable::new();
    /// *table.get_or_default("hits") += 1;
    /// *table.get_or_default("hits") += 1;
    /// assert_eq!(table.at("hits"), Ok(&2));
    /// ```
    pub fn get_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.entry(key).or_default()
    }

    /// Gets the entry for `key` for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// let mut table = HashTable::new();
    /// table.entry("a").or_insert(1);
    /// table.entry("a").and_modify(|v| *v += 1).or_insert(10);
    /// assert_eq!(table.at("a"), Ok(&2));
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        let hash = self.hash(&key);
        let bucket = self.bucket_for(hash);
        match self.buckets[bucket].position(hash, &key) {
            Some(position) => Entry::Occupied(OccupiedEntry {
                table: self,
                bucket,
                position,
            }),
            None => Entry::Vacant(VacantEntry {
                table: self,
                hash,
                key,
            }),
        }
    }

    /// Returns a reference to the value under `key`, if present.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the stored key and value for `key`, if present.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (bucket, position) = self.locate(key)?;
        let slot = self.buckets[bucket].slot(position);
        Some((&slot.key, &slot.value))
    }

    /// Returns a mutable reference to the value under `key`, if present.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (bucket, position) = self.locate(key)?;
        Some(&mut self.buckets[bucket].slot_mut(position).value)
    }

    /// Returns a reference to the value under an existing `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if `key` is absent. The table is never
    /// modified.
    pub fn at<Q>(&self, key: &Q) -> Result<&V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value under an existing `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if `key` is absent.
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.locate(key).is_some()
    }

    /// Removes `key` from the table, returning `true` if it was present.
    ///
    /// The bucket count is never reduced.
    pub fn erase<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(key).is_some()
    }

    /// Removes `key` from the table, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes `key` from the table, returning the stored key and value if
    /// it was present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (bucket, position) = self.locate(key)?;
        self.populated -= 1;
        let slot = self.buckets[bucket].remove(position);
        Some((slot.key, slot.value))
    }

    /// Returns the index of the bucket holding `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if `key` is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::Error;
    /// # use chain_hash::HashTable;
    /// let mut table = HashTable::new();
    /// table.insert("a", 1);
    /// assert!(table.bucket_index("a").unwrap() < table.capacity());
    /// assert_eq!(table.bucket_index("b"), Err(Error::KeyNotFound));
    /// ```
    pub fn bucket_index<Q>(&self, key: &Q) -> Result<usize, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.locate(key)
            .map(|(bucket, _)| bucket)
            .ok_or(Error::KeyNotFound)
    }

    /// Returns the number of entries chained in the bucket holding `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if `key` is absent.
    pub fn bucket_size<Q>(&self, key: &Q) -> Result<usize, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(key)?;
        Ok(self.buckets[index].len())
    }
}

impl<K, V> PartialEq for HashTable<K, V>
where
    K: Hash + Eq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .all(|(k, v)| other.get(k).is_some_and(|other_v| v == other_v))
    }
}

impl<K, V> Eq for HashTable<K, V>
where
    K: Hash + Eq,
    V: Eq,
{
}

impl<K, Q, V> Index<&Q> for HashTable<K, V>
where
    K: Hash + Eq + Borrow<Q>,
    Q: ?Sized + Hash + Eq,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if `key` is not present. Use [`HashTable::at`] for a fallible
    /// lookup.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not found in table")
    }
}

impl<K, V> FromIterator<(K, V)> for HashTable<K, V>
where
    K: Hash + Eq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<K, V> Extend<(K, V)> for HashTable<K, V>
where
    K: Hash + Eq,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.assign(key, value);
        }
    }
}

impl<K, V> IntoIterator for HashTable<K, V> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.buckets, self.populated)
    }
}

impl<'a, K, V> IntoIterator for &'a HashTable<K, V> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut HashTable<K, V> {
    type IntoIter = IterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// A view into a single entry in the table, which may either be vacant or
/// occupied.
///
/// Created by [`HashTable::entry`].
pub enum Entry<'a, K, V> {
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Ensures a value is present by inserting `default` if the entry is
    /// vacant, and returns a mutable reference to the value.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Like [`or_insert`](Self::or_insert), computing the value only when
    /// the entry is vacant.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Applies `f` to the value if the entry is occupied.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns the key of this entry.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    V: Default,
{
    /// Ensures a value is present by inserting `V::default()` if the entry is
    /// vacant, and returns a mutable reference to the value.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(V::default)
    }
}

/// A view into an occupied entry in a [`HashTable`].
pub struct OccupiedEntry<'a, K, V> {
    table: &'a mut HashTable<K, V>,
    bucket: usize,
    position: usize,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    fn slot(&self) -> &Slot<K, V> {
        self.table.buckets[self.bucket].slot(self.position)
    }

    /// Returns the stored key.
    pub fn key(&self) -> &K {
        &self.slot().key
    }

    /// Returns a reference to the value.
    pub fn get(&self) -> &V {
        &self.slot().value
    }

    /// Returns a mutable reference to the value.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.table.buckets[self.bucket].slot_mut(self.position).value
    }

    /// Converts the entry into a mutable reference to its value, bound to
    /// the table's lifetime.
    pub fn into_mut(self) -> &'a mut V {
        let table = self.table;
        &mut table.buckets[self.bucket].slot_mut(self.position).value
    }

    /// Replaces the value, returning the old one.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(self.get_mut(), value)
    }

    /// Removes the entry, returning its value.
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Removes the entry, returning the stored key and value.
    pub fn remove_entry(self) -> (K, V) {
        self.table.populated -= 1;
        let slot = self.table.buckets[self.bucket].remove(self.position);
        (slot.key, slot.value)
    }
}

/// A view into a vacant entry in a [`HashTable`].
pub struct VacantEntry<'a, K, V> {
    table: &'a mut HashTable<K, V>,
    hash: u64,
    key: K,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// Returns the key that would be inserted.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Takes ownership of the key without inserting anything.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts `value` under the entry's key, growing the table if needed,
    /// and returns a mutable reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        let table = self.table;
        table.push_new(self.hash, self.key, value)
    }
}
