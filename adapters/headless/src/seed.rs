use sha2::{Digest, Sha256};

/// Label of the stream driving class draws and gamble rolls.
pub(crate) const WORLD_STREAM: &str = "world";
/// Label of the stream driving skill rolls.
pub(crate) const COMBAT_STREAM: &str = "combat";

/// Derives an independent seed for the labelled stream from a run seed.
#[must_use]
pub fn derive_labeled_seed(base: u64, label: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(base.to_le_bytes());
    hasher.update(label.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0_u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
