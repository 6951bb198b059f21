/// Payment settlement: fee and beneficiary splits
///
/// The claim processor forwards each confirmed native payment here. The
/// gross amount is split by basis points into a platform fee and the
/// configured beneficiary shares; integer-division dust goes to the first
/// beneficiary so the disbursed total always reconciles with the gross.
use std::collections::HashMap;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DropConfig;
use crate::drop::types::BPS_DENOMINATOR;

/// A single disbursement produced by settling one payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub to: Address,
    pub amount: U256,
}

#[derive(Debug)]
pub struct PaymentSettlement {
    platform_fee_recipient: Address,
    platform_fee_bps: u16,
    royalty_bps: u16,
    beneficiaries: Vec<(Address, u16)>,
    disbursed: HashMap<Address, U256>,
    total_settled: U256,
}

impl PaymentSettlement {
    pub fn new(config: &DropConfig) -> Self {
        Self {
            platform_fee_recipient: config.platform_fee_recipient,
            platform_fee_bps: config.platform_fee_bps,
            royalty_bps: config.royalty_bps,
            beneficiaries: config
                .beneficiaries
                .iter()
                .map(|b| (b.account, b.share_bps))
                .collect(),
            disbursed: HashMap::new(),
            total_settled: U256::ZERO,
        }
    }

    /// Split a payment into payouts and record the disbursements.
    ///
    /// Config validation guarantees the bps sum to the full denominator, so
    /// apart from rounding dust the gross is fully disbursed; the dust is
    /// folded into the first beneficiary's payout.
    pub fn settle(&mut self, payment: U256) -> Vec<Payout> {
        if payment.is_zero() {
            return Vec::new();
        }

        let denominator = U256::from(BPS_DENOMINATOR);
        let mut payouts = Vec::with_capacity(1 + self.beneficiaries.len());

        let fee = payment * U256::from(self.platform_fee_bps) / denominator;
        if !fee.is_zero() {
            payouts.push(Payout {
                to: self.platform_fee_recipient,
                amount: fee,
            });
        }

        let mut distributed = fee;
        let mut first_beneficiary_slot = None;
        for (account, share_bps) in &self.beneficiaries {
            let share = payment * U256::from(*share_bps) / denominator;
            distributed += share;
            if first_beneficiary_slot.is_none() {
                first_beneficiary_slot = Some(payouts.len());
            }
            payouts.push(Payout {
                to: *account,
                amount: share,
            });
        }

        // Rounding dust would otherwise strand value in the contract.
        let dust = payment - distributed;
        if !dust.is_zero() {
            if let Some(slot) = first_beneficiary_slot {
                payouts[slot].amount += dust;
            }
        }

        for payout in &payouts {
            *self.disbursed.entry(payout.to).or_insert(U256::ZERO) += payout.amount;
        }
        self.total_settled += payment;

        debug!(%payment, payouts = payouts.len(), "settled claim payment");
        payouts
    }

    /// Cumulative amount disbursed to an account.
    pub fn disbursed_to(&self, account: Address) -> U256 {
        self.disbursed.get(&account).copied().unwrap_or(U256::ZERO)
    }

    /// Gross total settled over the drop's lifetime.
    pub fn total_settled(&self) -> U256 {
        self.total_settled
    }

    /// ERC-2981 style royalty quote for marketplace sales.
    pub fn royalty_info(&self, sale_price: U256) -> (Address, U256) {
        let amount = sale_price * U256::from(self.royalty_bps) / U256::from(BPS_DENOMINATOR);
        (self.platform_fee_recipient, amount)
    }
}
