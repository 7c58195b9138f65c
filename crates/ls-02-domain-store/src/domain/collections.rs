//! # Collections
//!
//! The six collections owned by the domain store, in memory.

use shared_types::{Account, AccountId};

use super::entities::{
    ActivityLogEntry, LoanId, LoanRequest, Notification, Offer, OfferId, Transaction,
};
use super::seed;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collections {
    pub accounts: Vec<Account>,
    pub loans: Vec<LoanRequest>,
    pub offers: Vec<Offer>,
    pub transactions: Vec<Transaction>,
    pub activity_log: Vec<ActivityLogEntry>,
    pub notifications: Vec<Notification>,
}

impl Collections {
    /// All collections empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The demo dataset.
    pub fn seeded() -> Self {
        Self {
            accounts: seed::accounts(),
            loans: seed::loans(),
            offers: seed::offers(),
            transactions: seed::transactions(),
            activity_log: seed::activity_log(),
            notifications: Vec::new(),
        }
    }

    pub fn account_index(&self, id: AccountId) -> Option<usize> {
        self.accounts.iter().position(|a| a.id == id)
    }

    pub fn loan_index(&self, id: LoanId) -> Option<usize> {
        self.loans.iter().position(|l| l.id == id)
    }

    pub fn offer_index(&self, id: OfferId) -> Option<usize> {
        self.offers.iter().position(|o| o.id == id)
    }

    /// Highest account, loan or offer id in use.
    pub fn max_entity_id(&self) -> Option<u64> {
        let accounts = self.accounts.iter().map(|a| a.id.0);
        let loans = self.loans.iter().map(|l| l.id.0);
        let offers = self.offers.iter().map(|o| o.id.0);
        accounts.chain(loans).chain(offers).max()
    }

    /// Case-insensitive: true when any account already uses `email`.
    pub fn email_taken(&self, email: &str) -> bool {
        self.accounts.iter().any(|a| a.email_matches_ignore_case(email))
    }

    pub fn unread_notifications(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }
}
