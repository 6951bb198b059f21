pub mod allowlist;
pub mod clock;
pub mod config;
pub mod drop;
pub mod error;
pub mod node;

// Engine exports
pub use drop::{EvolvableDrop, ClaimConditionRegistry, ClaimProcessor, PaymentSettlement, TokenLedger};
pub use config::{BeneficiaryConfig, DropConfig};
pub use error::{ClaimError, Error};

// Drop type exports
pub use drop::{
    ClaimCondition, ClaimOutcome, ClaimRequest, ClaimerRecord, Payout, BPS_DENOMINATOR,
    NATIVE_CURRENCY,
};

// Allowlist exports
pub use allowlist::{hash_leaf, hash_pair, verify_proof, AllowlistEntry, AllowlistTree};

// Substrate exports
pub use node::{DropNode, Transaction, TxReceipt, TxStatus};

// Clock exports
pub use clock::{Clock, ManualClock, SystemClock};

// Re-export common primitive types for user convenience
pub use alloy_primitives::{Address, B256, U256};
