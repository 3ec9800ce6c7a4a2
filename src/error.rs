use thiserror::Error;

/// Errors returned by the fallible [`HashTable`](crate::HashTable)
/// operations.
///
/// Every other operation on the table is total and reports absence through
/// `bool` or `Option` instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The key and value sequences passed to
    /// [`HashTable::from_parallel`](crate::HashTable::from_parallel) have
    /// different lengths.
    #[error("got {keys} keys but {values} values")]
    LengthMismatch {
        /// Number of keys supplied.
        keys: usize,
        /// Number of values supplied.
        values: usize,
    },
    /// The requested key is not present in the table.
    #[error("key not found in table")]
    KeyNotFound,
}
