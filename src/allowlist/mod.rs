/// Allowlist commitment and verification
///
/// A claim phase can restrict eligibility to a committed set of
/// (address, allotment) pairs. The commitment is a Merkle root over
/// `keccak256(address || allotment)` leaves combined with sorted-pair
/// hashing, so proofs carry no left/right ordering information. The tree
/// is built off-chain by the administrator and by claimers alike; the
/// engine only ever stores the root and verifies proofs against it.
pub mod tree;
pub mod verify;

pub use tree::{AllowlistEntry, AllowlistTree};
pub use verify::{hash_leaf, hash_pair, verify_proof};
