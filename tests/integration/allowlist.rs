/// Allowlist tree and verifier working together, the way the administrator
/// and claimers use them: the admin commits a root, claimers derive proofs
/// from their own copy of the list.
use alloy_primitives::{Address, U256};
use evodrop::{verify_proof, AllowlistEntry, AllowlistTree};

use super::common;

fn entries_for(accounts: &[Address]) -> Vec<AllowlistEntry> {
    accounts
        .iter()
        .map(|a| AllowlistEntry::new(*a, U256::ZERO))
        .collect()
}

#[test]
fn root_is_insertion_order_independent() {
    let a = common::client();
    let b = common::client2();
    let c = common::outsider();

    let forward = AllowlistTree::new(entries_for(&[a, b, c])).unwrap();
    let backward = AllowlistTree::new(entries_for(&[c, b, a])).unwrap();
    assert_eq!(forward.root(), backward.root());
}

#[test]
fn proof_from_one_tree_fails_against_another_root() {
    let phase1 = AllowlistTree::new(entries_for(&[common::client(), common::client2()])).unwrap();
    let phase2 = AllowlistTree::new(entries_for(&[common::client()])).unwrap();
    assert_ne!(phase1.root(), phase2.root());

    let proof = phase1.proof_for(common::client(), U256::ZERO).unwrap();
    assert!(verify_proof(
        common::client(),
        U256::ZERO,
        &proof,
        phase1.root()
    ));
    assert!(!verify_proof(
        common::client(),
        U256::ZERO,
        &proof,
        phase2.root()
    ));
}

#[test]
fn committed_allotment_cannot_be_inflated() {
    let committed = U256::from(3u64);
    let tree = AllowlistTree::new(vec![AllowlistEntry::new(common::client(), committed)]).unwrap();
    let proof = tree.proof_for(common::client(), committed).unwrap();

    assert!(verify_proof(common::client(), committed, &proof, tree.root()));
    // The same proof with a larger claimed allotment recomputes a different leaf.
    assert!(!verify_proof(
        common::client(),
        U256::from(100u64),
        &proof,
        tree.root()
    ));
}

#[test]
fn membership_does_not_transfer_between_accounts() {
    let tree = AllowlistTree::new(entries_for(&[common::client()])).unwrap();
    let proof = tree.proof_for(common::client(), U256::ZERO).unwrap();

    assert!(!verify_proof(
        common::client2(),
        U256::ZERO,
        &proof,
        tree.root()
    ));
}
