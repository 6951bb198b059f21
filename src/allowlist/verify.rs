/// Merkle proof verification against a stored allowlist root
use alloy_primitives::{keccak256, Address, B256, U256};

/// Hash an allowlist leaf: `keccak256(address || uint256 allotment)`.
///
/// The allotment is encoded as a 32-byte big-endian word, matching the
/// packed encoding the tree builder commits to.
pub fn hash_leaf(account: Address, allotment: U256) -> B256 {
    let mut buf = [0u8; 52];
    buf[..20].copy_from_slice(account.as_slice());
    buf[20..].copy_from_slice(&allotment.to_be_bytes::<32>());
    keccak256(buf)
}

/// Combine two nodes with order-independent sorted-pair hashing.
pub fn hash_pair(a: B256, b: B256) -> B256 {
    let mut buf = [0u8; 64];
    if a <= b {
        buf[..32].copy_from_slice(a.as_slice());
        buf[32..].copy_from_slice(b.as_slice());
    } else {
        buf[..32].copy_from_slice(b.as_slice());
        buf[32..].copy_from_slice(a.as_slice());
    }
    keccak256(buf)
}

/// Verify that `(account, allotment)` is committed under `root`.
///
/// Recomputes the leaf, folds the proof nodes with sorted-pair hashing, and
/// accepts iff the result equals the stored root. An all-zero root denotes an
/// open phase: verification is skipped and every address is accepted.
pub fn verify_proof(account: Address, allotment: U256, proof: &[B256], root: B256) -> bool {
    if root == B256::ZERO {
        return true;
    }

    let mut computed = hash_leaf(account, allotment);
    for node in proof {
        computed = hash_pair(computed, *node);
    }
    computed == root
}
