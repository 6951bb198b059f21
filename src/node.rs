/// Local execution substrate for the drop engine
///
/// Models the "submit a transaction and wait for confirmation" pattern as a
/// blocking request/response call with a distinct
/// `Pending -> Confirmed | Rejected` outcome. All state transitions are
/// serialized behind one lock, so concurrent claims against the same
/// condition can never jointly overshoot its supply cap.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use alloy_primitives::{Address, U256};
use tracing::debug;

use crate::clock::Clock;
use crate::config::DropConfig;
use crate::drop::engine::EvolvableDrop;
use crate::drop::types::{ClaimCondition, ClaimOutcome, ClaimRequest};
use crate::error::Error;

/// A state-changing entry point of the drop, as submitted by a sender.
#[derive(Debug, Clone)]
pub enum Transaction {
    LazyMint {
        count: u64,
        base_uri: String,
    },
    SetClaimConditions {
        conditions: Vec<ClaimCondition>,
        reset_supply_claimed: bool,
    },
    Claim {
        request: ClaimRequest,
        payment: U256,
    },
}

/// Lifecycle of a submitted transaction. `Pending` is the in-flight state;
/// a receipt returned by [`DropNode::submit`] is always `Confirmed` or
/// `Rejected`.
#[derive(Debug)]
pub enum TxStatus {
    Pending,
    Confirmed,
    Rejected(Error),
}

impl TxStatus {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, TxStatus::Confirmed)
    }
}

/// Outcome of a submitted transaction.
#[derive(Debug)]
pub struct TxReceipt {
    /// Position of the transaction in the node's global serialization order.
    pub index: u64,
    pub sender: Address,
    pub status: TxStatus,
    /// Claim result, for confirmed claim transactions.
    pub outcome: Option<ClaimOutcome>,
}

/// Single-node substrate hosting one deployed drop.
pub struct DropNode {
    engine: Mutex<EvolvableDrop>,
    submitted: AtomicU64,
}

impl DropNode {
    pub fn new(config: DropConfig) -> Result<Self, Error> {
        Ok(Self {
            engine: Mutex::new(EvolvableDrop::new(config)?),
            submitted: AtomicU64::new(0),
        })
    }

    pub fn with_clock(config: DropConfig, clock: Box<dyn Clock>) -> Result<Self, Error> {
        Ok(Self {
            engine: Mutex::new(EvolvableDrop::with_clock(config, clock)?),
            submitted: AtomicU64::new(0),
        })
    }

    /// Submit a transaction and block until it is confirmed or rejected.
    ///
    /// Transactions execute one at a time in lock-acquisition order; a
    /// rejected transaction has no observable side effects.
    pub fn submit(&self, sender: Address, transaction: Transaction) -> TxReceipt {
        let index = self.submitted.fetch_add(1, Ordering::SeqCst);
        debug!(index, sender = %sender, "transaction submitted");

        let mut engine = self.engine.lock().unwrap();
        let (status, outcome) = match transaction {
            Transaction::LazyMint { count, base_uri } => {
                match engine.lazy_mint(sender, count, &base_uri) {
                    Ok(_) => (TxStatus::Confirmed, None),
                    Err(e) => (TxStatus::Rejected(e), None),
                }
            }
            Transaction::SetClaimConditions {
                conditions,
                reset_supply_claimed,
            } => match engine.set_claim_conditions(sender, conditions, reset_supply_claimed) {
                Ok(()) => (TxStatus::Confirmed, None),
                Err(e) => (TxStatus::Rejected(e), None),
            },
            Transaction::Claim { request, payment } => {
                match engine.claim(sender, &request, payment) {
                    Ok(outcome) => (TxStatus::Confirmed, Some(outcome)),
                    Err(e) => (TxStatus::Rejected(e), None),
                }
            }
        };

        TxReceipt {
            index,
            sender,
            status,
            outcome,
        }
    }

    // Read-only entry points bypass the transaction path.

    pub fn active_condition_id(&self) -> Option<usize> {
        self.engine.lock().unwrap().active_condition_id()
    }

    pub fn condition_by_id(&self, id: usize) -> Result<ClaimCondition, Error> {
        self.engine.lock().unwrap().condition_by_id(id)
    }

    pub fn claim_timestamp(
        &self,
        condition_id: usize,
        claimer: Address,
    ) -> Result<Option<u64>, Error> {
        self.engine.lock().unwrap().claim_timestamp(condition_id, claimer)
    }

    pub fn token_uri(&self, card_id: U256) -> Result<String, Error> {
        self.engine.lock().unwrap().token_uri(card_id)
    }

    pub fn balance_of(&self, owner: Address, card_id: U256) -> u64 {
        self.engine.lock().unwrap().balance_of(owner, card_id)
    }

    pub fn total_lazy_minted(&self) -> U256 {
        self.engine.lock().unwrap().total_lazy_minted()
    }

    pub fn disbursed_to(&self, account: Address) -> U256 {
        self.engine.lock().unwrap().settlement().disbursed_to(account)
    }

    pub fn total_settled(&self) -> U256 {
        self.engine.lock().unwrap().settlement().total_settled()
    }
}
