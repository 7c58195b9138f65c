//! # Domain Layer
//!
//! Pure domain logic for the LoanSphere domain store.
//!
//! - `entities` - Loans, offers, transactions, audit trail records
//! - `lifecycle` - Loan construction and status transitions
//! - `ledger` - Balances derived from the transaction history
//! - `projection` - Role-scoped read views
//! - `audit` - Activity log and notification wording, bounded trails
//! - `analytics` - Portfolio, risk and admin figures
//! - `collections` / `seed` / `ids` - In-memory state, demo data, id allocation

pub mod analytics;
pub mod audit;
pub mod collections;
pub mod entities;
pub mod errors;
pub mod ids;
pub mod ledger;
pub mod lifecycle;
pub mod projection;
pub mod seed;
pub mod value_objects;
