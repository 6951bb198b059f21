/// Substrate behavior: serialization, receipts, and rejected-claim isolation
use std::sync::Arc;
use std::thread;

use alloy_primitives::{Address, U256};
use evodrop::{ClaimError, ClaimRequest, Error, Transaction, TxStatus};

use super::common;

#[test]
fn concurrent_claims_never_overshoot_the_supply_cap() -> anyhow::Result<()> {
    common::init_tracing();
    let (node, _clock) = common::deploy_node();

    let receipt = node.submit(
        common::admin(),
        Transaction::LazyMint {
            count: 10,
            base_uri: "ipfs://cards/".to_string(),
        },
    );
    assert!(receipt.status.is_confirmed());

    let mut condition = common::open_condition(common::GENESIS, 50);
    condition.price_per_unit = U256::ZERO;
    condition.wait_time_between_claims = 0;
    condition.quantity_limit_per_transaction = 1;
    let receipt = node.submit(
        common::admin(),
        Transaction::SetClaimConditions {
            conditions: vec![condition],
            reset_supply_claimed: false,
        },
    );
    assert!(receipt.status.is_confirmed());

    // 8 claimers race 10 single-unit claims each against a cap of 50.
    let node = Arc::new(node);
    let mut handles = Vec::new();
    for claimer_index in 0..8u8 {
        let node = Arc::clone(&node);
        handles.push(thread::spawn(move || {
            let claimer = Address::repeat_byte(0x10 + claimer_index);
            let mut confirmed = 0u64;
            for _ in 0..10 {
                let receipt = node.submit(
                    claimer,
                    Transaction::Claim {
                        request: ClaimRequest::new(1, U256::ZERO),
                        payment: U256::ZERO,
                    },
                );
                match receipt.status {
                    TxStatus::Confirmed => confirmed += 1,
                    TxStatus::Rejected(Error::Claim(ClaimError::SupplyExceeded { .. })) => {}
                    other => panic!("unexpected status: {other:?}"),
                }
            }
            confirmed
        }));
    }

    let confirmed: u64 = handles
        .into_iter()
        .map(|h| h.join().expect("claimer thread panicked"))
        .sum();
    assert_eq!(confirmed, 50);
    assert_eq!(node.condition_by_id(0)?.supply_claimed, 50);

    let minted: u64 = (0..8u8)
        .map(|i| node.balance_of(Address::repeat_byte(0x10 + i), U256::ZERO))
        .sum();
    assert_eq!(minted, 50);
    Ok(())
}

#[test]
fn receipts_carry_the_global_serialization_order() {
    let (node, _clock) = common::deploy_node();

    let first = node.submit(
        common::admin(),
        Transaction::LazyMint {
            count: 1,
            base_uri: "ipfs://cards/".to_string(),
        },
    );
    let second = node.submit(
        common::admin(),
        Transaction::SetClaimConditions {
            conditions: vec![common::open_condition(common::GENESIS, 10)],
            reset_supply_claimed: false,
        },
    );

    assert!(second.index > first.index);
    assert_eq!(first.sender, common::admin());
}

#[test]
fn rejected_transactions_have_no_side_effects() -> anyhow::Result<()> {
    let (node, _clock) = common::deploy_node();

    // Non-admin lazy mint.
    let receipt = node.submit(
        common::outsider(),
        Transaction::LazyMint {
            count: 10,
            base_uri: "ipfs://cards/".to_string(),
        },
    );
    assert!(matches!(
        receipt.status,
        TxStatus::Rejected(Error::Unauthorized(_))
    ));
    assert_eq!(node.total_lazy_minted(), U256::ZERO);

    // Malformed condition list.
    let mut condition = common::open_condition(common::GENESIS, 10);
    condition.end_time = condition.start_time;
    let receipt = node.submit(
        common::admin(),
        Transaction::SetClaimConditions {
            conditions: vec![condition],
            reset_supply_claimed: false,
        },
    );
    assert!(matches!(
        receipt.status,
        TxStatus::Rejected(Error::Claim(ClaimError::InvalidConditionList(_)))
    ));
    assert_eq!(node.active_condition_id(), None);

    // A claim with nothing configured at all.
    let receipt = node.submit(
        common::client(),
        Transaction::Claim {
            request: ClaimRequest::new(1, U256::ZERO),
            payment: U256::ZERO,
        },
    );
    assert!(matches!(
        receipt.status,
        TxStatus::Rejected(Error::Claim(ClaimError::NoActiveCondition))
    ));
    assert_eq!(node.balance_of(common::client(), U256::ZERO), 0);
    Ok(())
}

#[test]
fn confirmed_claims_report_their_outcome() -> anyhow::Result<()> {
    let (node, _clock) = common::deploy_node();
    node.submit(
        common::admin(),
        Transaction::LazyMint {
            count: 10,
            base_uri: "ipfs://cards/".to_string(),
        },
    );
    node.submit(
        common::admin(),
        Transaction::SetClaimConditions {
            conditions: vec![common::open_condition(common::GENESIS, 100)],
            reset_supply_claimed: false,
        },
    );

    let price = common::price_per_unit();
    let receipt = node.submit(
        common::client(),
        Transaction::Claim {
            request: ClaimRequest::new(2, U256::ZERO).price_per_unit(price),
            payment: price * U256::from(2u64),
        },
    );

    let outcome = receipt.outcome.expect("confirmed claim carries an outcome");
    assert_eq!(outcome.condition_id, 0);
    assert_eq!(outcome.quantity, 2);
    assert_eq!(outcome.card_minted, U256::ZERO);
    let disbursed: U256 = outcome.payouts.iter().map(|p| p.amount).sum();
    assert_eq!(disbursed, outcome.payment);
    Ok(())
}
