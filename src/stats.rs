use alloc::vec;
use alloc::vec::Vec;

use crate::HashTable;
use crate::bucket::Bucket;

/// A snapshot of how entries are spread across the buckets of a
/// [`HashTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct BucketStats {
    /// Number of entries in the table
    pub populated: usize,
    /// Number of buckets
    pub capacity: usize,
    /// Buckets holding at least one entry
    pub occupied_buckets: usize,
    /// Buckets holding no entries
    pub empty_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Load factor (populated / capacity)
    pub load_factor: f64,
    /// Average chain length over occupied buckets only
    pub mean_chain_length: f64,
}

impl BucketStats {
    /// Pretty-print the statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Bucket Statistics ===");
        println!(
            "Population: {} entries in {} buckets ({:.2}% load factor)",
            self.populated,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Buckets: {} occupied, {} empty ({:.2}% occupied)",
            self.occupied_buckets,
            self.empty_buckets,
            if self.capacity == 0 {
                0.0
            } else {
                (self.occupied_buckets as f64 / self.capacity as f64) * 100.0
            }
        );
        println!(
            "Chains: longest {}, mean {:.02} over occupied buckets",
            self.longest_chain, self.mean_chain_length
        );
    }
}

/// Number of buckets for each chain length; index `n` counts the buckets
/// holding exactly `n` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainHistogram(pub Vec<usize>);

impl ChainHistogram {
    /// Pretty-print the histogram, one row per chain length.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let total: usize = self.0.iter().sum();
        println!("=== Chain Length Histogram ===");
        for (length, count) in self.0.iter().enumerate() {
            let share = if total == 0 {
                0.0
            } else {
                *count as f64 / total as f64
            };
            let bar = "#".repeat((share * 50.0).round() as usize);
            println!("{length:>4}: {count:>8} ({:>6.2}%) {bar}", share * 100.0);
        }
    }
}

impl<K, V> HashTable<K, V> {
    /// Collects bucket distribution statistics.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// let table: HashTable<u64, u64> = (0..10).map(|i| (i, i)).collect();
    /// let stats = table.bucket_stats();
    /// assert_eq!(stats.populated, 10);
    /// assert_eq!(stats.occupied_buckets + stats.empty_buckets, stats.capacity);
    /// ```
    pub fn bucket_stats(&self) -> BucketStats {
        let capacity = self.capacity();
        let occupied_buckets = self.buckets().iter().filter(|b| !b.is_empty()).count();
        let longest_chain = self.buckets().iter().map(Bucket::len).max().unwrap_or(0);

        BucketStats {
            populated: self.len(),
            capacity,
            occupied_buckets,
            empty_buckets: capacity - occupied_buckets,
            longest_chain,
            load_factor: self.load_factor(),
            mean_chain_length: if occupied_buckets == 0 {
                0.0
            } else {
                self.len() as f64 / occupied_buckets as f64
            },
        }
    }

    /// Counts buckets by chain length.
    pub fn chain_histogram(&self) -> ChainHistogram {
        let mut histogram = vec![0; 1];
        for bucket in self.buckets() {
            let length = bucket.len();
            if length >= histogram.len() {
                histogram.resize(length + 1, 0);
            }
            histogram[length] += 1;
        }
        ChainHistogram(histogram)
    }
}
