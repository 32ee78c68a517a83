//! Asset-backed template source.

use std::io;

/// A byte-addressable template provider used in place of a directory walk.
///
/// Implementations expose a flat list of asset names (slash-separated
/// relative paths, extension included) and fetch raw bytes per name. The
/// store applies the same namespace-prefix filter, extension filter and name
/// normalization to assets as it does to files on disk.
///
/// Typical implementations wrap embedded assets compiled into the binary.
pub trait AssetSource: Send + Sync {
    /// All known asset names.
    fn names(&self) -> Vec<String>;

    /// Raw bytes for one asset.
    fn bytes(&self, name: &str) -> io::Result<Vec<u8>>;
}
