/// Drop-specific types and structures
use alloy_primitives::{address, Address, B256, U256};
use serde::{Deserialize, Serialize};

/// Reserved sentinel address denoting the chain's native asset in the
/// `currency` field of a claim condition.
pub const NATIVE_CURRENCY: Address = address!("0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

/// Basis-point denominator used for fee and share arithmetic.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// One time-boxed phase of a drop.
///
/// A condition is active for `start_time <= now < end_time`. An all-zero
/// `merkle_root` makes the phase open to anyone; otherwise claimers must
/// prove membership in the committed allowlist. `card_ids_to_redeem` being
/// non-empty makes this an evolution phase: claimers burn one of the listed
/// cards to mint one of `card_ids_to_mint`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimCondition {
    pub start_time: u64,
    pub end_time: u64,
    pub max_claimable_supply: u64,
    pub supply_claimed: u64,
    pub quantity_limit_per_transaction: u64,
    pub wait_time_between_claims: u64,
    pub merkle_root: B256,
    pub price_per_unit: U256,
    pub currency: Address,
    pub card_ids_to_mint: Vec<U256>,
    pub card_ids_to_redeem: Vec<U256>,
}

impl ClaimCondition {
    /// Whether the condition's window contains `now`.
    pub fn is_active_at(&self, now: u64) -> bool {
        self.start_time <= now && now < self.end_time
    }

    /// Whether the phase requires burning a prerequisite card.
    pub fn requires_redemption(&self) -> bool {
        !self.card_ids_to_redeem.is_empty()
    }

    /// Units still claimable under this condition.
    pub fn remaining_supply(&self) -> u64 {
        self.max_claimable_supply.saturating_sub(self.supply_claimed)
    }
}

/// A claim submitted against a condition.
///
/// Built with a fluent API; the defaults describe the simplest case: an
/// open phase, native currency, free mint, no redemption.
///
/// ```
/// use evodrop::{ClaimRequest, NATIVE_CURRENCY};
/// use alloy_primitives::U256;
///
/// let request = ClaimRequest::new(10, U256::ZERO)
///     .price_per_unit(U256::from(100u64))
///     .condition(0);
/// assert_eq!(request.currency, NATIVE_CURRENCY);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    /// Units to mint (and to burn, for an evolution phase).
    pub quantity: u64,
    /// Currency the claimer believes the phase is priced in.
    pub currency: Address,
    /// Price the claimer believes applies per unit.
    pub price_per_unit: U256,
    /// Allowlist inclusion proof; empty for open phases.
    pub proof: Vec<B256>,
    /// The allotment the proof was built against.
    pub proof_allotment: U256,
    /// Explicit condition to claim under, or `None` for the active one.
    pub condition_id: Option<usize>,
    /// Card to burn when the condition requires redemption.
    pub card_id_to_redeem: U256,
    /// Card to mint; must be on the condition's mint menu.
    pub card_id_to_mint: U256,
}

impl ClaimRequest {
    pub fn new(quantity: u64, card_id_to_mint: U256) -> Self {
        Self {
            quantity,
            currency: NATIVE_CURRENCY,
            price_per_unit: U256::ZERO,
            proof: Vec::new(),
            proof_allotment: U256::ZERO,
            condition_id: None,
            card_id_to_redeem: U256::ZERO,
            card_id_to_mint,
        }
    }

    pub fn currency(mut self, currency: Address) -> Self {
        self.currency = currency;
        self
    }

    pub fn price_per_unit(mut self, price: U256) -> Self {
        self.price_per_unit = price;
        self
    }

    /// Attach an allowlist proof and the allotment it commits to.
    pub fn proof(mut self, proof: Vec<B256>, allotment: U256) -> Self {
        self.proof = proof;
        self.proof_allotment = allotment;
        self
    }

    /// Target a specific condition instead of the active one.
    pub fn condition(mut self, id: usize) -> Self {
        self.condition_id = Some(id);
        self
    }

    /// Burn the given card as the redemption prerequisite.
    pub fn redeem(mut self, card_id: U256) -> Self {
        self.card_id_to_redeem = card_id;
        self
    }
}

/// Per-claimer bookkeeping under one condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimerRecord {
    /// Timestamp of the most recent confirmed claim.
    pub last_claim_at: u64,
    /// Cumulative units claimed under the condition.
    pub total_claimed: u64,
}

/// Result of a confirmed claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimOutcome {
    pub condition_id: usize,
    pub card_minted: U256,
    pub quantity: u64,
    pub payment: U256,
    pub payouts: Vec<crate::drop::settlement::Payout>,
}
