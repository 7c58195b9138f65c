//! File-backed persistence across process restarts.

use ls_02_domain_store::{
    CollectionKey, DomainStoreApi, DomainStoreService, FileBackedKVStore, FixedClock,
    KeyValueStore, LoanApplication, LoanId, LoanStatus, OfferDraft, SharedKVStore, StoreConfig,
};
use serde_json::json;
use shared_types::{AccountId, NewAccount, Principal, Role};
use tempfile::tempdir;

fn open(path: &std::path::Path) -> DomainStoreService<FileBackedKVStore, FixedClock> {
    DomainStoreService::new(
        FileBackedKVStore::new(path),
        FixedClock::default(),
        StoreConfig::default(),
    )
}

fn principal(store: &DomainStoreService<FileBackedKVStore, FixedClock>, id: u64) -> Principal {
    Principal::from(store.account(AccountId(id)).expect("seeded account"))
}

#[test]
fn test_reload_reproduces_identical_collections() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.db");

    let snapshot = {
        let mut store = open(&path);
        let borrower = principal(&store, 3);
        let lender = principal(&store, 2);

        let loan_id = store.apply_for_loan(&borrower, &LoanApplication::new("9000", "Roof", "9"));
        store.approve_loan(&lender, loan_id);
        store.create_offer(&lender, &OfferDraft::new("1500", "", "3"));
        store.add_payment(&borrower, "1000", Some(loan_id));
        store.add_payment(&borrower, "n/a", None);

        assert_eq!(store.persist_failures(), 0);
        store.export_snapshot().unwrap()
    };

    let reloaded = open(&path);
    assert_eq!(reloaded.export_snapshot().unwrap(), snapshot);
}

#[test]
fn test_nan_values_survive_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.db");

    let loan_id = {
        let mut store = open(&path);
        let borrower = principal(&store, 3);
        store.apply_for_loan(&borrower, &LoanApplication::new("", "Mystery", ""))
    };

    let reloaded = open(&path);
    let loan = reloaded.loan(loan_id).unwrap();
    assert!(loan.amount.is_nan());
    assert!(loan.next_payment_amount.is_nan());
    assert_eq!(loan.status, LoanStatus::Pending);
}

#[test]
fn test_corrupt_collection_falls_back_to_seed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.db");

    {
        let mut store = open(&path);
        let admin = principal(&store, 1);
        store.delete_loan(&admin, LoanId(101));
    }
    {
        let mut kv = FileBackedKVStore::new(&path);
        kv.put(CollectionKey::Loans.as_bytes(), b"not json").unwrap();
    }

    let reloaded = open(&path);
    // Seed restored for the damaged key only
    assert!(reloaded.loan(LoanId(101)).is_some());
    assert_eq!(reloaded.activity_log()[0].action, "Loan Deleted");
}

#[test]
fn test_shared_store_serves_two_services() {
    let dir = tempdir().unwrap();
    let shared = SharedKVStore::new(FileBackedKVStore::new(dir.path().join("store.db")));

    let mut writer = DomainStoreService::new(
        shared.clone(),
        FixedClock::default(),
        StoreConfig::default(),
    );
    let borrower = Principal::from(writer.account(AccountId(3)).unwrap());
    let loan_id = writer.apply_for_loan(&borrower, &LoanApplication::new("700", "Laptop", "7"));

    shared.with(|kv| {
        assert!(kv.get(CollectionKey::Loans.as_bytes()).unwrap().is_some());
    });

    let reader = DomainStoreService::new(shared, FixedClock::default(), StoreConfig::default());
    assert_eq!(
        reader.loan(loan_id).map(|l| l.amount.value()),
        Some(700.0)
    );
}

#[test]
fn test_long_fraction_amounts_reload_byte_identical() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.db");

    let snapshot = {
        let mut store = open(&path);
        let borrower = principal(&store, 3);
        store.add_payment(&borrower, "1046667.7536305089", None);
        store.apply_for_loan(&borrower, &LoanApplication::new("0.1", "Rounding", "3"));
        store.export_snapshot().unwrap()
    };

    let reloaded = open(&path);
    assert_eq!(reloaded.export_snapshot().unwrap(), snapshot);
    assert_eq!(
        reloaded.transactions()[0].amount.value(),
        1046667.7536305089
    );
}

#[test]
fn test_infinite_instalment_survives_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.db");

    let loan_id = {
        let mut store = open(&path);
        let borrower = principal(&store, 3);
        store.apply_for_loan(&borrower, &LoanApplication::new("1200", "Zero term", "0"))
    };

    let reloaded = open(&path);
    let loan = reloaded.loan(loan_id).unwrap();
    assert_eq!(loan.next_payment_amount.value(), f64::INFINITY);
}

#[test]
fn test_attribute_named_like_a_field_keeps_accounts_loadable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.db");

    let zed = {
        let mut store = open(&path);
        let admin = principal(&store, 1);
        store
            .add_account(
                &admin,
                NewAccount::new("Zed", "zed@example.com", Role::Borrower)
                    .with_extra("name", json!("Shadow"))
                    .with_extra("tier", json!("gold")),
            )
            .unwrap()
    };

    let reloaded = open(&path);
    assert_eq!(reloaded.accounts().len(), 5);
    let account = reloaded.account(zed).unwrap();
    assert_eq!(account.name, "Zed");
    assert_eq!(account.extra.get("tier"), Some(&json!("gold")));
    assert!(!account.extra.contains_key("name"));
}
