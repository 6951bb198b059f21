/// Off-chain Merkle tree construction for allowlist commitments
use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::allowlist::verify::{hash_leaf, hash_pair};
use crate::error::Error;

/// One allowlisted address and its committed allotment.
///
/// An allotment of zero means "listed, no per-address cap"; a non-zero
/// allotment caps the address at that many units cumulatively under any
/// condition committing to this tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowlistEntry {
    pub account: Address,
    pub allotment: U256,
}

impl AllowlistEntry {
    pub fn new(account: Address, allotment: U256) -> Self {
        Self { account, allotment }
    }
}

/// Merkle tree over allowlist entries.
///
/// Leaves are sorted before pairing, pairs are combined with sorted-pair
/// hashing, and an odd trailing node is promoted unchanged to the next
/// level. Proofs produced here verify with [`verify_proof`] regardless of
/// sibling order.
///
/// [`verify_proof`]: crate::allowlist::verify_proof
#[derive(Debug, Clone)]
pub struct AllowlistTree {
    entries: Vec<AllowlistEntry>,
    levels: Vec<Vec<B256>>,
}

impl AllowlistTree {
    /// Build a tree over the given entries. Rejects an empty list: an open
    /// phase is expressed with a zero root, not an empty commitment.
    pub fn new(entries: Vec<AllowlistEntry>) -> Result<Self, Error> {
        if entries.is_empty() {
            return Err(Error::Allowlist(
                "cannot build a tree over an empty allowlist".to_string(),
            ));
        }

        let mut leaves: Vec<B256> = entries
            .iter()
            .map(|e| hash_leaf(e.account, e.allotment))
            .collect();
        leaves.sort();

        let mut levels = vec![leaves];
        while levels[levels.len() - 1].len() > 1 {
            let next: Vec<B256> = levels[levels.len() - 1]
                .chunks(2)
                .map(|pair| {
                    if pair.len() == 2 {
                        hash_pair(pair[0], pair[1])
                    } else {
                        pair[0]
                    }
                })
                .collect();
            levels.push(next);
        }

        Ok(Self { entries, levels })
    }

    /// Build a tree from a JSON array of entries, the format allowlists are
    /// exchanged in off-chain:
    /// `[{"account": "0x...", "allotment": "0x0"}, ...]`.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let entries: Vec<AllowlistEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// The committed root.
    pub fn root(&self) -> B256 {
        // Construction guarantees at least one level with exactly one node.
        self.levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or(B256::ZERO)
    }

    /// Number of committed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Produce the inclusion proof for an entry.
    ///
    /// Fails when the (address, allotment) pair was not committed; a proof
    /// for a different allotment than the one in the tree will not exist.
    pub fn proof_for(&self, account: Address, allotment: U256) -> Result<Vec<B256>, Error> {
        let leaf = hash_leaf(account, allotment);
        let mut index = self.levels[0]
            .iter()
            .position(|l| *l == leaf)
            .ok_or_else(|| {
                Error::Allowlist(format!(
                    "{account} with allotment {allotment} is not in the allowlist"
                ))
            })?;

        let mut proof = Vec::new();
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = index ^ 1;
            if sibling < level.len() {
                proof.push(level[sibling]);
            }
            index /= 2;
        }

        tracing::debug!(
            account = %account,
            root = %hex::encode(self.root()),
            proof_len = proof.len(),
            "generated allowlist proof"
        );
        Ok(proof)
    }
}
