//! # LoanSphere Domain Store (ls-02)
//!
//! The single source of truth for accounts, loans, offers, transactions and
//! the two audit trails. Behaves like a small single-process database whose
//! transactions always succeed: each mutation updates one primary collection,
//! appends to the activity log and notification feed, and persists what it
//! touched as one atomic batch.
//!
//! ## Data Flow
//!
//! ```text
//! view layer ──(&Principal, command)──→ DomainStoreService
//!                                          │ mutate in memory
//!                                          │ record activity + notification
//!                                          ↓
//!                                   KeyValueStore::atomic_batch_write
//!
//! view layer ←──(role projection)────── collections + transactions
//! ```
//!
//! ## Domain Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Audited mutations | Every applied mutation records one activity entry and one notification |
//! | Silent no-ops | A mutation on a missing id changes nothing and records nothing |
//! | Fixed tracker | A loan's stages are never reordered; only `completed`/`date` change |
//! | Offer consumption | Applying to an offer removes it in the same step that creates the loan |
//! | Derived balances | Remaining balance is computed from payments, never stored |
//! | Bounded trails | Activity log and notifications keep only the newest entries |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Pure domain logic (entities, lifecycle, projections, ledger)
//! - `ports/` - Port traits (inbound API, outbound SPI)
//! - `adapters/` - Key-value stores, clocks, JSON encoding
//! - `service/` - Application service implementing the API
//!
//! ## Usage
//!
//! ```ignore
//! use ls_02_domain_store::{DomainStoreApi, DomainStoreService, InMemoryKVStore, StoreConfig, SystemClock};
//!
//! let mut store = DomainStoreService::new(InMemoryKVStore::new(), SystemClock, StoreConfig::default());
//!
//! let loan_id = store.apply_for_loan(&borrower, &LoanApplication::new("12000", "Car", "12"));
//! store.approve_loan(&lender, loan_id);
//! store.add_payment(&borrower, "1000", Some(loan_id));
//!
//! assert_eq!(store.remaining_balance(loan_id).unwrap().value(), 11000.0);
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::{FileBackedKVStore, FixedClock, InMemoryKVStore, SharedKVStore, SystemClock};
pub use domain::analytics::{AdminOverview, PortfolioSummary, RiskAssessment};
pub use domain::audit::SYSTEM_ACTOR;
pub use domain::collections::Collections;
pub use domain::entities::{
    stage_names, ActivityLogEntry, LoanApplication, LoanId, LoanRequest, LoanStatus,
    Notification, NotificationId, NotificationKind, Offer, OfferDraft, OfferId, Stage,
    Transaction, TransactionId, TransactionKind, TransactionStatus,
};
pub use domain::errors::{KVStoreError, PersistenceError};
pub use domain::ledger::LoanLedger;
pub use domain::seed::SEED_PASSWORD;
pub use domain::value_objects::{CollectionKey, StoreConfig};
pub use ports::inbound::DomainStoreApi;
pub use ports::outbound::{BatchOperation, Clock, KeyValueStore};
pub use service::DomainStoreService;
