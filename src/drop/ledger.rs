/// Token ledger: balances, lazy-mint batches, and metadata resolution
///
/// Holds the ERC-1155 style per-(owner, card) balances and the lazily
/// minted id ranges with their base metadata URIs. Minting and burning are
/// reserved for the claim processor; everything else is read-only.
use std::collections::HashMap;

use alloy_primitives::{Address, U256};
use tracing::debug;

use crate::error::ClaimError;

#[derive(Debug, Clone)]
struct UriBatch {
    /// First id covered by the batch.
    start: U256,
    /// One past the last id covered.
    end: U256,
    base_uri: String,
}

#[derive(Debug, Default)]
pub struct TokenLedger {
    balances: HashMap<(Address, U256), u64>,
    batches: Vec<UriBatch>,
    next_id: U256,
}

impl TokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `count` new card ids under `base_uri`, returning the
    /// half-open id range `[start, end)` that was added.
    pub fn lazy_mint(&mut self, count: u64, base_uri: &str) -> (U256, U256) {
        let start = self.next_id;
        let end = start + U256::from(count);
        self.batches.push(UriBatch {
            start,
            end,
            base_uri: base_uri.to_string(),
        });
        self.next_id = end;
        debug!(%start, %end, base_uri, "lazy minted card batch");
        (start, end)
    }

    /// Whether `card_id` has been covered by some lazy-mint batch.
    pub fn is_lazy_minted(&self, card_id: U256) -> bool {
        card_id < self.next_id
    }

    /// Total number of lazily minted card ids.
    pub fn total_lazy_minted(&self) -> U256 {
        self.next_id
    }

    /// Metadata URI for a card: the covering batch's base URI with the id
    /// appended. Ids never lazy-minted are out of range.
    pub fn token_uri(&self, card_id: U256) -> Result<String, ClaimError> {
        self.batches
            .iter()
            .find(|b| b.start <= card_id && card_id < b.end)
            .map(|b| format!("{}{}", b.base_uri, card_id))
            .ok_or_else(|| ClaimError::IndexOutOfRange(format!("card {card_id}")))
    }

    pub fn balance_of(&self, owner: Address, card_id: U256) -> u64 {
        self.balances.get(&(owner, card_id)).copied().unwrap_or(0)
    }

    pub(crate) fn mint(&mut self, to: Address, card_id: U256, quantity: u64) {
        *self.balances.entry((to, card_id)).or_insert(0) += quantity;
    }

    pub(crate) fn burn(
        &mut self,
        from: Address,
        card_id: U256,
        quantity: u64,
    ) -> Result<(), ClaimError> {
        let balance = self.balances.entry((from, card_id)).or_insert(0);
        if *balance < quantity {
            return Err(ClaimError::InsufficientRedeemBalance { card: card_id });
        }
        *balance -= quantity;
        Ok(())
    }
}
