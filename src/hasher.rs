//! Snapshot digests using Blake3

use crate::error::SerializationError;
use crate::event::BallEvent;
use crate::types::SnapshotHash;
use blake3::Hasher as Blake3Hasher;
use serde::Serialize;

/// SnapshotHasher digests derived snapshots and event logs.
///
/// The digest covers the bincode encoding, so two snapshots hash equal exactly
/// when every field is equal. Stats maps are ordered, which keeps the encoding
/// stable across runs and platforms.
#[derive(Debug, Clone, Default)]
pub struct SnapshotHasher;

impl SnapshotHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash any serializable value, typically a [`crate::MatchStats`]
    ///
    /// # Arguments
    /// * `value` - The snapshot to hash
    ///
    /// # Returns
    /// A SnapshotHash containing the 32-byte Blake3 digest of its bincode encoding
    ///
    /// # Errors
    /// `SerializationFailed` if the value cannot be encoded
    pub fn hash<T: Serialize>(&self, value: &T) -> Result<SnapshotHash, SerializationError> {
        let serialized = bincode::serialize(value).map_err(|e| SerializationError::SerializationFailed {
            reason: format!("Snapshot encoding failed: {}", e),
        })?;

        let mut hasher = Blake3Hasher::new();
        hasher.update(&serialized);
        Ok(SnapshotHash(*hasher.finalize().as_bytes()))
    }

    /// Chain event hashes in log order into a single digest of the log
    pub fn log_digest(&self, events: &[BallEvent]) -> Result<SnapshotHash, SerializationError> {
        let mut hasher = Blake3Hasher::new();
        for event in events {
            hasher.update(&self.hash(event)?.0);
        }
        Ok(SnapshotHash(*hasher.finalize().as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::MatchStats;

    #[test]
    fn test_hash_consistency() {
        let hasher = SnapshotHasher::new();
        let stats = MatchStats::default();

        assert_eq!(hasher.hash(&stats).unwrap(), hasher.hash(&stats).unwrap());
    }

    #[test]
    fn test_hash_different_snapshots() {
        let hasher = SnapshotHasher::new();
        let stats = MatchStats::default();
        let scored = MatchStats {
            score: 1,
            ..MatchStats::default()
        };

        assert_ne!(hasher.hash(&stats).unwrap(), hasher.hash(&scored).unwrap());
    }

    #[test]
    fn test_empty_log_digest() {
        let hasher = SnapshotHasher::new();
        let digest = hasher.log_digest(&[]).unwrap();
        assert_eq!(digest.0.len(), 32);
    }
}
