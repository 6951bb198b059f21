//! Deployment configuration for the drop engine
//!
//! Mirrors the constructor parameters a drop is deployed with: the
//! administrator, marketplace royalty, platform fee, and the beneficiary
//! split applied to every settled payment. Configurations can be built in
//! code or loaded from a TOML file.
use alloy_primitives::Address;
use config::{Config as ConfigLoader, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::drop::types::BPS_DENOMINATOR;
use crate::error::Error;

/// One payment-split recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeneficiaryConfig {
    pub account: Address,
    /// Share of each gross payment, in basis points.
    pub share_bps: u16,
}

/// Drop deployment parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropConfig {
    /// Account allowed to lazy mint and replace claim conditions.
    pub admin: Address,
    /// Collection-level metadata URI.
    pub contract_uri: String,
    /// Marketplace royalty, in basis points of the sale price.
    pub royalty_bps: u16,
    /// Recipient of the platform fee (and of royalty payments).
    pub platform_fee_recipient: Address,
    /// Platform fee on each gross payment, in basis points.
    pub platform_fee_bps: u16,
    /// Beneficiaries sharing the remainder of each payment.
    pub beneficiaries: Vec<BeneficiaryConfig>,
}

impl DropConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let settings = ConfigLoader::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| Error::Config(format!("failed to load drop config: {e}")))?;

        let config: DropConfig = settings
            .try_deserialize()
            .map_err(|e| Error::Config(format!("invalid drop config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the deployment parameters.
    ///
    /// The platform fee and beneficiary shares must together account for
    /// every basis point of a payment, so settlement can disburse the full
    /// gross amount.
    pub fn validate(&self) -> Result<(), Error> {
        if self.admin == Address::ZERO {
            return Err(Error::Config("admin address must not be zero".to_string()));
        }
        if self.beneficiaries.is_empty() {
            return Err(Error::Config(
                "at least one beneficiary is required".to_string(),
            ));
        }
        if u64::from(self.royalty_bps) > BPS_DENOMINATOR {
            return Err(Error::Config(format!(
                "royalty bps {} exceeds the denominator {BPS_DENOMINATOR}",
                self.royalty_bps
            )));
        }

        let share_total: u64 = self
            .beneficiaries
            .iter()
            .map(|b| u64::from(b.share_bps))
            .sum::<u64>()
            + u64::from(self.platform_fee_bps);
        if share_total != BPS_DENOMINATOR {
            return Err(Error::Config(format!(
                "platform fee and beneficiary shares must sum to {BPS_DENOMINATOR} bps, got {share_total}"
            )));
        }
        Ok(())
    }
}
