//! # Inbound Ports (Driving Ports)
//!
//! The primary API of the domain store.
//!
//! ## Failure semantics
//!
//! No operation here returns an error. A mutation that cannot apply (missing
//! id, status that does not allow the transition, unknown role string,
//! duplicate email) changes nothing, records no activity or notification,
//! and returns `None`. Non-numeric amounts are stored as NaN.
//!
//! A mutation that does apply records exactly one activity log entry and one
//! notification, then persists the collections it touched in one batch.

use shared_types::{Account, AccountId, AccountStatus, NewAccount, Numeric, Principal, ProfileUpdate, Role};

use crate::domain::analytics::{AdminOverview, PortfolioSummary, RiskAssessment};
use crate::domain::entities::{
    ActivityLogEntry, LoanApplication, LoanId, LoanRequest, Notification, NotificationId, Offer,
    OfferDraft, OfferId, Transaction, TransactionId,
};
use crate::domain::ledger::LoanLedger;

/// Primary API for the domain store.
///
/// Every mutation takes the acting principal explicitly; the store never
/// consults a "current user". Role gating of admin-only operations is the
/// caller's job.
pub trait DomainStoreApi {
    // =========================================================================
    // COLLECTIONS (unfiltered)
    // =========================================================================

    fn accounts(&self) -> &[Account];

    fn loans(&self) -> &[LoanRequest];

    fn offers(&self) -> &[Offer];

    fn transactions(&self) -> &[Transaction];

    /// Most recent first.
    fn activity_log(&self) -> &[ActivityLogEntry];

    /// Most recent first.
    fn notifications(&self) -> &[Notification];

    fn unread_notification_count(&self) -> usize;

    fn account(&self, id: AccountId) -> Option<&Account>;

    fn loan(&self, id: LoanId) -> Option<&LoanRequest>;

    fn offer(&self, id: OfferId) -> Option<&Offer>;

    // =========================================================================
    // PROJECTIONS
    // =========================================================================

    fn visible_accounts(&self, viewer: &Principal) -> Vec<&Account>;

    fn visible_loans(&self, viewer: &Principal) -> Vec<&LoanRequest>;

    fn visible_offers(&self, viewer: &Principal) -> Vec<&Offer>;

    fn visible_transactions(&self, viewer: &Principal) -> Vec<&Transaction>;

    /// Pending applications, the queue every lender reviews.
    fn review_queue(&self) -> Vec<&LoanRequest>;

    // =========================================================================
    // LEDGER (derived, never stored)
    // =========================================================================

    fn amount_paid(&self, id: LoanId) -> Option<Numeric>;

    /// `max(0, amount - Σ payments)`; `None` for an unknown loan.
    fn remaining_balance(&self, id: LoanId) -> Option<Numeric>;

    fn loan_ledger(&self, id: LoanId) -> Option<LoanLedger>;

    // =========================================================================
    // ANALYTICS
    // =========================================================================

    fn portfolio_summary(&self) -> PortfolioSummary;

    fn risk_assessment(&self) -> RiskAssessment;

    fn admin_overview(&self) -> AdminOverview;

    // =========================================================================
    // DIRECTORY (used by the identity store)
    // =========================================================================

    /// First account whose email matches exactly (case-sensitive).
    fn find_by_email(&self, email: &str) -> Option<&Account>;

    /// First account whose email matches exactly and whose secret accepts
    /// `password`. Emails edited after registration may repeat, so every
    /// account with the email is tried.
    fn find_by_credentials(&self, email: &str, password: &str) -> Option<&Account>;

    /// Case-insensitive uniqueness check.
    fn email_taken(&self, email: &str) -> bool;

    /// Self-service registration. `None` when the email is taken.
    fn register_account(&mut self, account: NewAccount) -> Option<Account>;

    /// Merges `update` into the actor's own account.
    fn update_profile(&mut self, actor: &Principal, update: &ProfileUpdate) -> Option<Account>;

    // =========================================================================
    // ACCOUNT ADMINISTRATION
    // =========================================================================

    /// "Add user". `None` when the email is taken.
    fn add_account(&mut self, actor: &Principal, account: NewAccount) -> Option<AccountId>;

    /// Hard delete.
    fn remove_account(&mut self, actor: &Principal, id: AccountId) -> Option<Account>;

    /// Flips `Active` ⇄ `Blocked`, returning the new status.
    fn toggle_block(&mut self, actor: &Principal, id: AccountId) -> Option<AccountStatus>;

    /// `role` must be one of the four lowercase role names.
    fn edit_role(&mut self, actor: &Principal, id: AccountId, role: &str) -> Option<Role>;

    // =========================================================================
    // LOANS
    // =========================================================================

    /// Creates a `Pending` loan for the actor. Always succeeds.
    fn apply_for_loan(&mut self, actor: &Principal, application: &LoanApplication) -> LoanId;

    /// `Pending → Active`.
    fn approve_loan(&mut self, actor: &Principal, id: LoanId) -> Option<LoanRequest>;

    /// `Pending → Rejected`.
    fn reject_loan_application(&mut self, actor: &Principal, id: LoanId) -> Option<LoanRequest>;

    /// Hard delete; transactions naming the loan are kept.
    fn delete_loan(&mut self, actor: &Principal, id: LoanId) -> Option<LoanRequest>;

    /// `Active → Closed`.
    fn close_loan(&mut self, actor: &Principal, id: LoanId) -> Option<LoanRequest>;

    /// `Active → Defaulted`.
    fn mark_loan_defaulted(&mut self, actor: &Principal, id: LoanId) -> Option<LoanRequest>;

    // =========================================================================
    // OFFERS
    // =========================================================================

    /// Publishes an offer under the actor's name. Always succeeds.
    fn create_offer(&mut self, actor: &Principal, draft: &OfferDraft) -> OfferId;

    /// Withdraws an offer. Lenders may only withdraw their own; admins any.
    fn delete_offer(&mut self, actor: &Principal, id: OfferId) -> Option<Offer>;

    /// Consumes the offer and creates a `Pending` loan carrying its terms.
    ///
    /// A missing offer records a single "Offer Unavailable" activity entry
    /// (no notification) and returns `None`.
    fn apply_for_offer(&mut self, actor: &Principal, id: OfferId) -> Option<LoanId>;

    // =========================================================================
    // PAYMENTS
    // =========================================================================

    /// Records a successful `Payment` by the actor. Always succeeds; the loan
    /// reference is stored as given.
    fn add_payment(
        &mut self,
        actor: &Principal,
        amount: &str,
        loan_id: Option<LoanId>,
    ) -> TransactionId;

    // =========================================================================
    // NOTIFICATIONS
    // =========================================================================

    /// Returns `false` when no notification has this id.
    fn mark_notification_read(&mut self, id: &NotificationId) -> bool;

    /// Removes every notification, returning how many were cleared.
    fn clear_notifications(&mut self) -> usize;
}
