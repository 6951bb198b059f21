/// Claim processor: the central state-transition function of the drop
///
/// Validates a claim request against the targeted condition and, only once
/// every check has passed, applies the effects: supply increment, claimer
/// bookkeeping, redemption burn, mint, and payment settlement. A rejected
/// claim leaves every collaborator untouched.
use alloy_primitives::{Address, U256};
use tracing::{debug, warn};

use crate::allowlist::verify_proof;
use crate::drop::conditions::ClaimConditionRegistry;
use crate::drop::ledger::TokenLedger;
use crate::drop::settlement::PaymentSettlement;
use crate::drop::types::{ClaimOutcome, ClaimRequest};
use crate::error::ClaimError;

/// Borrows the stores it transitions; constructed per call by the engine so
/// the state it mutates stays explicit rather than ambient.
pub struct ClaimProcessor<'a> {
    registry: &'a mut ClaimConditionRegistry,
    ledger: &'a mut TokenLedger,
    settlement: &'a mut PaymentSettlement,
}

impl<'a> ClaimProcessor<'a> {
    pub fn new(
        registry: &'a mut ClaimConditionRegistry,
        ledger: &'a mut TokenLedger,
        settlement: &'a mut PaymentSettlement,
    ) -> Self {
        Self {
            registry,
            ledger,
            settlement,
        }
    }

    /// Process one claim. All checks run before any mutation; the claim is
    /// all-or-nothing.
    pub fn claim(
        &mut self,
        caller: Address,
        request: &ClaimRequest,
        payment: U256,
        now: u64,
    ) -> Result<ClaimOutcome, ClaimError> {
        let result = self.validate_and_apply(caller, request, payment, now);
        if let Err(reason) = &result {
            warn!(claimer = %caller, %reason, "claim rejected");
        }
        result
    }

    fn validate_and_apply(
        &mut self,
        caller: Address,
        request: &ClaimRequest,
        payment: U256,
        now: u64,
    ) -> Result<ClaimOutcome, ClaimError> {
        // Resolve the targeted condition: explicit id or the active one.
        let condition_id = match request.condition_id {
            Some(id) => {
                self.registry.condition_by_id(id)?;
                id
            }
            None => self
                .registry
                .active_condition_id(now)
                .ok_or(ClaimError::NoActiveCondition)?,
        };
        let condition = self.registry.condition_by_id(condition_id)?.clone();

        if !condition.is_active_at(now) {
            return Err(ClaimError::ConditionNotActive(condition_id));
        }

        // Allowlist membership, and the committed per-address allotment.
        if !condition.merkle_root.is_zero() {
            if !verify_proof(
                caller,
                request.proof_allotment,
                &request.proof,
                condition.merkle_root,
            ) {
                return Err(ClaimError::NotWhitelisted);
            }
            if !request.proof_allotment.is_zero() {
                let already_claimed = self
                    .registry
                    .claimer_record(condition_id, caller)
                    .map(|r| r.total_claimed)
                    .unwrap_or(0);
                let after = U256::from(already_claimed) + U256::from(request.quantity);
                if after > request.proof_allotment {
                    return Err(ClaimError::QuantityExceeded {
                        requested: request.quantity,
                        limit: request
                            .proof_allotment
                            .try_into()
                            .unwrap_or(u64::MAX)
                            .saturating_sub(already_claimed),
                    });
                }
            }
        }

        if request.quantity == 0 || request.quantity > condition.quantity_limit_per_transaction {
            return Err(ClaimError::QuantityExceeded {
                requested: request.quantity,
                limit: condition.quantity_limit_per_transaction,
            });
        }

        if condition.supply_claimed.saturating_add(request.quantity) > condition.max_claimable_supply
        {
            return Err(ClaimError::SupplyExceeded {
                claimed: condition.supply_claimed,
                max: condition.max_claimable_supply,
                requested: request.quantity,
            });
        }

        // Wait-time spacing; a claimer's first claim under the condition is exempt.
        if let Some(record) = self.registry.claimer_record(condition_id, caller) {
            let elapsed = now.saturating_sub(record.last_claim_at);
            if elapsed < condition.wait_time_between_claims {
                return Err(ClaimError::ClaimTooSoon {
                    wait: condition.wait_time_between_claims,
                    elapsed,
                });
            }
        }

        // Exact payment: right currency, right per-unit price, right total.
        // No overpayment or underpayment tolerance.
        let expected = U256::from(request.quantity) * condition.price_per_unit;
        if request.currency != condition.currency
            || request.price_per_unit != condition.price_per_unit
            || payment != expected
        {
            return Err(ClaimError::InvalidPrice);
        }

        // Redemption prerequisite: the requested card must be on the menu
        // and the caller must hold enough of it to burn.
        if condition.requires_redemption() {
            if !condition
                .card_ids_to_redeem
                .contains(&request.card_id_to_redeem)
            {
                return Err(ClaimError::InvalidCardId(request.card_id_to_redeem));
            }
            if self.ledger.balance_of(caller, request.card_id_to_redeem) < request.quantity {
                return Err(ClaimError::InsufficientRedeemBalance {
                    card: request.card_id_to_redeem,
                });
            }
        }

        if !condition.card_ids_to_mint.contains(&request.card_id_to_mint) {
            return Err(ClaimError::InvalidCardId(request.card_id_to_mint));
        }
        if !self.ledger.is_lazy_minted(request.card_id_to_mint) {
            return Err(ClaimError::InvalidCardId(request.card_id_to_mint));
        }

        // Every check has passed; apply the transition.
        if condition.requires_redemption() {
            self.ledger
                .burn(caller, request.card_id_to_redeem, request.quantity)?;
        }
        self.ledger
            .mint(caller, request.card_id_to_mint, request.quantity);
        self.registry
            .apply_claim(condition_id, caller, request.quantity, now);
        let payouts = self.settlement.settle(payment);

        debug!(
            claimer = %caller,
            condition = condition_id,
            card = %request.card_id_to_mint,
            quantity = request.quantity,
            "claim confirmed"
        );

        Ok(ClaimOutcome {
            condition_id,
            card_minted: request.card_id_to_mint,
            quantity: request.quantity,
            payment,
            payouts,
        })
    }
}
