/// Drop engine modules
///
/// The claim-eligibility protocol of an evolvable ERC-1155 style drop:
/// condition registry, claim processor, token ledger, and payment
/// settlement, fronted by the [`EvolvableDrop`] facade.
pub mod conditions;
pub mod engine;
pub mod ledger;
pub mod processor;
pub mod settlement;
pub mod types;

pub use conditions::ClaimConditionRegistry;
pub use engine::EvolvableDrop;
pub use ledger::TokenLedger;
pub use processor::ClaimProcessor;
pub use settlement::{PaymentSettlement, Payout};
pub use types::{
    ClaimCondition, ClaimOutcome, ClaimRequest, ClaimerRecord, BPS_DENOMINATOR, NATIVE_CURRENCY,
};
