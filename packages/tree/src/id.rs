use crc32fast::Hasher;

/// Stable tree id derived from a namespace string
pub fn tree_id(namespace: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(namespace.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for the nodes of one tree.
///
/// Ids have the form `<seed>-<n>`, where the seed is the CRC32 of a namespace
/// and `n` starts at 1.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(namespace: &str) -> Self {
        Self {
            seed: tree_id(namespace),
            count: 0,
        }
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Number of ids minted so far.
    pub fn count(&self) -> u64 {
        self.count
    }
}
