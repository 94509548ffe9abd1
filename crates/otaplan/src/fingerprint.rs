//! Content fingerprinting
//!
//! Change detection across packages and on-device partitions uses SHA-1:
//! the installer runtime's `sha1_check` builtin and the known wiped-state
//! constant are SHA-1 digests, so the planner must produce the same.

use sha1::{Digest, Sha1};

/// Compute the lowercase-hex content fingerprint of a blob.
pub fn content_fingerprint(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
