/// The evolvable drop engine
///
/// Facade owning the deployment configuration, the claim condition
/// registry, the token ledger, and payment settlement. Administrative entry
/// points are gated on the configured admin address; claims go through the
/// claim processor; everything else is a read.
use alloy_primitives::{Address, U256};
use tracing::info;

use crate::clock::{Clock, SystemClock};
use crate::config::DropConfig;
use crate::drop::conditions::ClaimConditionRegistry;
use crate::drop::ledger::TokenLedger;
use crate::drop::processor::ClaimProcessor;
use crate::drop::settlement::PaymentSettlement;
use crate::drop::types::{ClaimCondition, ClaimOutcome, ClaimRequest};
use crate::error::Error;

pub struct EvolvableDrop {
    config: DropConfig,
    registry: ClaimConditionRegistry,
    ledger: TokenLedger,
    settlement: PaymentSettlement,
    clock: Box<dyn Clock>,
}

impl EvolvableDrop {
    /// Deploy a drop with the given configuration, on the system clock.
    pub fn new(config: DropConfig) -> Result<Self, Error> {
        Self::with_clock(config, Box::new(SystemClock))
    }

    /// Deploy with an explicit clock; tests use this to drive phase windows
    /// without sleeping through them.
    pub fn with_clock(config: DropConfig, clock: Box<dyn Clock>) -> Result<Self, Error> {
        config.validate()?;
        let settlement = PaymentSettlement::new(&config);
        info!(admin = %config.admin, "drop deployed");
        Ok(Self {
            config,
            registry: ClaimConditionRegistry::new(),
            ledger: TokenLedger::new(),
            settlement,
            clock,
        })
    }

    fn ensure_admin(&self, caller: Address) -> Result<(), Error> {
        if caller != self.config.admin {
            return Err(Error::Unauthorized(format!(
                "{caller} is not the drop administrator"
            )));
        }
        Ok(())
    }

    // ============ Administrative entry points ============

    /// Register `count` new card ids under `base_uri`. Admin only.
    pub fn lazy_mint(
        &mut self,
        caller: Address,
        count: u64,
        base_uri: &str,
    ) -> Result<(U256, U256), Error> {
        self.ensure_admin(caller)?;
        if count == 0 {
            return Err(Error::Config(
                "lazy mint count must be non-zero".to_string(),
            ));
        }
        Ok(self.ledger.lazy_mint(count, base_uri))
    }

    /// Replace the claim condition list. Admin only.
    pub fn set_claim_conditions(
        &mut self,
        caller: Address,
        conditions: Vec<ClaimCondition>,
        reset_supply_claimed: bool,
    ) -> Result<(), Error> {
        self.ensure_admin(caller)?;
        self.registry
            .set_claim_conditions(conditions, reset_supply_claimed)?;
        Ok(())
    }

    // ============ Claimer entry point ============

    /// Claim under the targeted (or active) condition, paying `payment` in
    /// the condition's currency.
    pub fn claim(
        &mut self,
        caller: Address,
        request: &ClaimRequest,
        payment: U256,
    ) -> Result<ClaimOutcome, Error> {
        let now = self.clock.now_secs();
        let mut processor =
            ClaimProcessor::new(&mut self.registry, &mut self.ledger, &mut self.settlement);
        let outcome = processor.claim(caller, request, payment, now)?;
        Ok(outcome)
    }

    // ============ Read-only entry points ============

    pub fn active_condition_id(&self) -> Option<usize> {
        self.registry.active_condition_id(self.clock.now_secs())
    }

    pub fn condition_by_id(&self, id: usize) -> Result<ClaimCondition, Error> {
        Ok(self.registry.condition_by_id(id)?.clone())
    }

    pub fn condition_count(&self) -> usize {
        self.registry.condition_count()
    }

    pub fn claim_timestamp(&self, condition_id: usize, claimer: Address) -> Result<Option<u64>, Error> {
        Ok(self.registry.claim_timestamp(condition_id, claimer)?)
    }

    pub fn token_uri(&self, card_id: U256) -> Result<String, Error> {
        Ok(self.ledger.token_uri(card_id)?)
    }

    pub fn balance_of(&self, owner: Address, card_id: U256) -> u64 {
        self.ledger.balance_of(owner, card_id)
    }

    pub fn total_lazy_minted(&self) -> U256 {
        self.ledger.total_lazy_minted()
    }

    pub fn royalty_info(&self, sale_price: U256) -> (Address, U256) {
        self.settlement.royalty_info(sale_price)
    }

    pub fn settlement(&self) -> &PaymentSettlement {
        &self.settlement
    }

    pub fn contract_uri(&self) -> &str {
        &self.config.contract_uri
    }

    pub fn admin(&self) -> Address {
        self.config.admin
    }
}
