/// Claim condition registry
///
/// Ordered, index-addressed list of claim phases together with the
/// per-claimer records that enforce wait-time spacing and allowlisted
/// allotments. The registry is an explicit store handed to the claim
/// processor; it is created at deployment and mutated only by
/// administrative replacement and confirmed claims.
use std::collections::HashMap;

use alloy_primitives::Address;
use tracing::info;

use crate::drop::types::{ClaimCondition, ClaimerRecord};
use crate::error::ClaimError;

#[derive(Debug, Default)]
pub struct ClaimConditionRegistry {
    conditions: Vec<ClaimCondition>,
    claimer_records: HashMap<(usize, Address), ClaimerRecord>,
}

impl ClaimConditionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the condition list atomically.
    ///
    /// With `reset_supply_claimed` the new list starts with zeroed counters
    /// and cleared per-claimer records. Without it, `supply_claimed` and the
    /// per-claimer records of positions that carry over are preserved;
    /// positions beyond the old list start fresh. Rejects the whole list,
    /// leaving current state untouched, when any window is empty or a
    /// carried-over counter would exceed its new cap.
    pub fn set_claim_conditions(
        &mut self,
        mut list: Vec<ClaimCondition>,
        reset_supply_claimed: bool,
    ) -> Result<(), ClaimError> {
        for (idx, condition) in list.iter().enumerate() {
            if condition.end_time <= condition.start_time {
                return Err(ClaimError::InvalidConditionList(format!(
                    "condition {idx}: end_time ({}) must be after start_time ({})",
                    condition.end_time, condition.start_time
                )));
            }
            if condition.card_ids_to_mint.is_empty() {
                return Err(ClaimError::InvalidConditionList(format!(
                    "condition {idx}: no mintable card ids"
                )));
            }
        }

        if reset_supply_claimed {
            for condition in &mut list {
                condition.supply_claimed = 0;
            }
        } else {
            // Counters carry over by position; validate before touching state.
            for (idx, condition) in list.iter().enumerate() {
                let carried = self
                    .conditions
                    .get(idx)
                    .map(|prev| prev.supply_claimed)
                    .unwrap_or(0);
                if carried > condition.max_claimable_supply {
                    return Err(ClaimError::InvalidConditionList(format!(
                        "condition {idx}: carried supply {carried} exceeds max claimable supply {}",
                        condition.max_claimable_supply
                    )));
                }
            }
            for (idx, condition) in list.iter_mut().enumerate() {
                condition.supply_claimed = self
                    .conditions
                    .get(idx)
                    .map(|prev| prev.supply_claimed)
                    .unwrap_or(0);
            }
        }

        if reset_supply_claimed {
            self.claimer_records.clear();
        } else {
            let new_len = list.len();
            self.claimer_records.retain(|(idx, _), _| *idx < new_len);
        }

        info!(
            conditions = list.len(),
            reset = reset_supply_claimed,
            "claim conditions replaced"
        );
        self.conditions = list;
        Ok(())
    }

    /// Index of the condition whose window contains `now`.
    ///
    /// When several windows overlap the lowest index wins; the tie-break is
    /// deliberate and covered by tests rather than left to iteration order.
    pub fn active_condition_id(&self, now: u64) -> Option<usize> {
        self.conditions.iter().position(|c| c.is_active_at(now))
    }

    /// Read-only lookup by index.
    pub fn condition_by_id(&self, id: usize) -> Result<&ClaimCondition, ClaimError> {
        self.conditions
            .get(id)
            .ok_or_else(|| ClaimError::IndexOutOfRange(format!("condition {id}")))
    }

    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    /// Per-claimer record under a condition, if the claimer has claimed.
    pub fn claimer_record(&self, id: usize, claimer: Address) -> Option<&ClaimerRecord> {
        self.claimer_records.get(&(id, claimer))
    }

    /// Timestamp of the claimer's last confirmed claim under a condition.
    pub fn claim_timestamp(&self, id: usize, claimer: Address) -> Result<Option<u64>, ClaimError> {
        self.condition_by_id(id)?;
        Ok(self
            .claimer_records
            .get(&(id, claimer))
            .map(|r| r.last_claim_at))
    }

    /// Apply the state effects of a confirmed claim. Callers must have
    /// validated the claim first; this only mutates counters.
    pub(crate) fn apply_claim(&mut self, id: usize, claimer: Address, quantity: u64, now: u64) {
        if let Some(condition) = self.conditions.get_mut(id) {
            condition.supply_claimed += quantity;
        }
        let record = self.claimer_records.entry((id, claimer)).or_default();
        record.last_claim_at = now;
        record.total_claimed += quantity;
    }
}
