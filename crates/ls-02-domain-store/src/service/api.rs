//! `DomainStoreApi` implementation.

use shared_types::{
    Account, AccountId, AccountStatus, NewAccount, Numeric, Principal, ProfileUpdate, Role,
};
use tracing::{debug, info};

use super::DomainStoreService;
use crate::domain::analytics::{AdminOverview, PortfolioSummary, RiskAssessment};
use crate::domain::audit::AuditRecord;
use crate::domain::entities::{
    ActivityLogEntry, LoanApplication, LoanId, LoanRequest, Notification, NotificationId, Offer,
    OfferDraft, OfferId, Transaction, TransactionId, TransactionKind, TransactionStatus,
};
use crate::domain::ids::next_transaction_id;
use crate::domain::ledger::{self, LoanLedger};
use crate::domain::projection;
use crate::domain::value_objects::CollectionKey;
use crate::ports::inbound::DomainStoreApi;
use crate::ports::outbound::{Clock, KeyValueStore};

/// Which settlement a loan transition applies.
#[derive(Debug, Clone, Copy)]
enum Transition {
    Approve,
    Reject,
    Close,
    Default,
}

impl<KV, C> DomainStoreService<KV, C>
where
    KV: KeyValueStore,
    C: Clock,
{
    fn transition_loan(
        &mut self,
        actor: &Principal,
        id: LoanId,
        transition: Transition,
    ) -> Option<LoanRequest> {
        let Some(idx) = self.state.loan_index(id) else {
            debug!(loan_id = %id, ?transition, "Loan not found, nothing to do");
            return None;
        };

        let today = self.clock.today();
        let loan = &mut self.state.loans[idx];
        let from = loan.status;
        let applied = match transition {
            Transition::Approve => loan.approve(&actor.name, &today),
            Transition::Reject => loan.reject(&actor.name),
            Transition::Close => loan.close(),
            Transition::Default => loan.mark_defaulted(),
        };
        if !applied {
            debug!(loan_id = %id, ?transition, status = %from, "Transition not allowed");
            return None;
        }
        let updated = loan.clone();

        let audit = match transition {
            Transition::Approve => AuditRecord::loan_approved(&actor.name, id),
            Transition::Reject => AuditRecord::loan_rejected(&actor.name, id),
            Transition::Close => AuditRecord::loan_closed(&actor.name, id),
            Transition::Default => AuditRecord::loan_defaulted(&actor.name, id),
        };
        info!(loan_id = %id, actor = %actor.name, from = %from, to = %updated.status, "Loan status changed");
        self.commit(&[CollectionKey::Loans], audit);

        Some(updated)
    }

    fn insert_account(&mut self, account: NewAccount, audit: AuditRecord) -> Option<Account> {
        if self.state.email_taken(&account.email) {
            debug!(email = %account.email, "Email already in use");
            return None;
        }

        let id = AccountId(self.next_entity_id());
        let account = account.into_account(id);
        self.state.accounts.insert(0, account.clone());
        info!(account_id = %id, role = %account.role, "Account created");
        self.commit(&[CollectionKey::Accounts], audit);

        Some(account)
    }
}

impl<KV, C> DomainStoreApi for DomainStoreService<KV, C>
where
    KV: KeyValueStore,
    C: Clock,
{
    // =========================================================================
    // COLLECTIONS
    // =========================================================================

    fn accounts(&self) -> &[Account] {
        &self.state.accounts
    }

    fn loans(&self) -> &[LoanRequest] {
        &self.state.loans
    }

    fn offers(&self) -> &[Offer] {
        &self.state.offers
    }

    fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    fn activity_log(&self) -> &[ActivityLogEntry] {
        &self.state.activity_log
    }

    fn notifications(&self) -> &[Notification] {
        &self.state.notifications
    }

    fn unread_notification_count(&self) -> usize {
        self.state.unread_notifications()
    }

    fn account(&self, id: AccountId) -> Option<&Account> {
        self.state.accounts.iter().find(|a| a.id == id)
    }

    fn loan(&self, id: LoanId) -> Option<&LoanRequest> {
        self.state.loans.iter().find(|l| l.id == id)
    }

    fn offer(&self, id: OfferId) -> Option<&Offer> {
        self.state.offers.iter().find(|o| o.id == id)
    }

    // =========================================================================
    // PROJECTIONS
    // =========================================================================

    fn visible_accounts(&self, viewer: &Principal) -> Vec<&Account> {
        projection::visible_accounts(&self.state.accounts, viewer)
    }

    fn visible_loans(&self, viewer: &Principal) -> Vec<&LoanRequest> {
        projection::visible_loans(&self.state.loans, viewer)
    }

    fn visible_offers(&self, viewer: &Principal) -> Vec<&Offer> {
        projection::visible_offers(&self.state.offers, viewer)
    }

    fn visible_transactions(&self, viewer: &Principal) -> Vec<&Transaction> {
        projection::visible_transactions(&self.state.transactions, &self.state.loans, viewer)
    }

    fn review_queue(&self) -> Vec<&LoanRequest> {
        projection::review_queue(&self.state.loans)
    }

    // =========================================================================
    // LEDGER
    // =========================================================================

    fn amount_paid(&self, id: LoanId) -> Option<Numeric> {
        self.loan(id)
            .map(|loan| ledger::amount_paid(loan.id, &self.state.transactions))
    }

    fn remaining_balance(&self, id: LoanId) -> Option<Numeric> {
        self.loan(id)
            .map(|loan| ledger::remaining_balance(loan, &self.state.transactions))
    }

    fn loan_ledger(&self, id: LoanId) -> Option<LoanLedger> {
        self.loan(id)
            .map(|loan| LoanLedger::for_loan(loan, &self.state.transactions))
    }

    // =========================================================================
    // ANALYTICS
    // =========================================================================

    fn portfolio_summary(&self) -> PortfolioSummary {
        PortfolioSummary::compute(&self.state.loans, &self.state.transactions)
    }

    fn risk_assessment(&self) -> RiskAssessment {
        RiskAssessment::compute(&self.state.loans)
    }

    fn admin_overview(&self) -> AdminOverview {
        AdminOverview::compute(
            &self.state.accounts,
            &self.state.loans,
            &self.state.transactions,
            self.state.activity_log.len(),
        )
    }

    // =========================================================================
    // DIRECTORY
    // =========================================================================

    fn find_by_email(&self, email: &str) -> Option<&Account> {
        self.state.accounts.iter().find(|a| a.email == email)
    }

    fn find_by_credentials(&self, email: &str, password: &str) -> Option<&Account> {
        self.state
            .accounts
            .iter()
            .find(|a| a.email == email && a.verify_password(password))
    }

    fn email_taken(&self, email: &str) -> bool {
        self.state.email_taken(email)
    }

    fn register_account(&mut self, account: NewAccount) -> Option<Account> {
        let audit = AuditRecord::user_registered(&account.name, account.role);
        self.insert_account(account, audit)
    }

    fn update_profile(&mut self, actor: &Principal, update: &ProfileUpdate) -> Option<Account> {
        let Some(idx) = self.state.account_index(actor.id) else {
            debug!(account_id = %actor.id, "Account not found, profile not updated");
            return None;
        };

        let account = &mut self.state.accounts[idx];
        account.apply_profile(update);
        let updated = account.clone();

        info!(account_id = %actor.id, "Profile updated");
        self.commit(
            &[CollectionKey::Accounts],
            AuditRecord::profile_updated(&actor.name, actor.id),
        );
        Some(updated)
    }

    // =========================================================================
    // ACCOUNT ADMINISTRATION
    // =========================================================================

    fn add_account(&mut self, actor: &Principal, account: NewAccount) -> Option<AccountId> {
        let audit = AuditRecord::user_added(&actor.name, &account.name, account.role);
        self.insert_account(account, audit).map(|a| a.id)
    }

    fn remove_account(&mut self, actor: &Principal, id: AccountId) -> Option<Account> {
        let Some(idx) = self.state.account_index(id) else {
            debug!(account_id = %id, "Account not found, nothing removed");
            return None;
        };

        let removed = self.state.accounts.remove(idx);
        info!(account_id = %id, actor = %actor.name, "Account removed");
        self.commit(
            &[CollectionKey::Accounts],
            AuditRecord::user_removed(&actor.name, id),
        );
        Some(removed)
    }

    fn toggle_block(&mut self, actor: &Principal, id: AccountId) -> Option<AccountStatus> {
        let Some(idx) = self.state.account_index(id) else {
            debug!(account_id = %id, "Account not found, status unchanged");
            return None;
        };

        let account = &mut self.state.accounts[idx];
        account.status = account.status.toggled();
        let status = account.status;

        info!(account_id = %id, status = %status, "Account status toggled");
        self.commit(
            &[CollectionKey::Accounts],
            AuditRecord::user_status_toggled(&actor.name, id, status),
        );
        Some(status)
    }

    fn edit_role(&mut self, actor: &Principal, id: AccountId, role: &str) -> Option<Role> {
        let role: Role = match role.parse() {
            Ok(role) => role,
            Err(e) => {
                debug!(account_id = %id, error = %e, "Role unchanged");
                return None;
            }
        };
        let Some(idx) = self.state.account_index(id) else {
            debug!(account_id = %id, "Account not found, role unchanged");
            return None;
        };

        self.state.accounts[idx].role = role;
        info!(account_id = %id, role = %role, "Account role changed");
        self.commit(
            &[CollectionKey::Accounts],
            AuditRecord::user_role_changed(&actor.name, id, role),
        );
        Some(role)
    }

    // =========================================================================
    // LOANS
    // =========================================================================

    fn apply_for_loan(&mut self, actor: &Principal, application: &LoanApplication) -> LoanId {
        let id = LoanId(self.next_entity_id());
        let loan = LoanRequest::from_application(id, &actor.name, application, &self.clock.today());
        let amount = loan.amount;
        self.state.loans.insert(0, loan);

        info!(loan_id = %id, borrower = %actor.name, amount = %amount, "Loan application submitted");
        self.commit(
            &[CollectionKey::Loans],
            AuditRecord::loan_applied(&actor.name, amount),
        );
        id
    }

    fn approve_loan(&mut self, actor: &Principal, id: LoanId) -> Option<LoanRequest> {
        self.transition_loan(actor, id, Transition::Approve)
    }

    fn reject_loan_application(&mut self, actor: &Principal, id: LoanId) -> Option<LoanRequest> {
        self.transition_loan(actor, id, Transition::Reject)
    }

    fn delete_loan(&mut self, actor: &Principal, id: LoanId) -> Option<LoanRequest> {
        let Some(idx) = self.state.loan_index(id) else {
            debug!(loan_id = %id, "Loan not found, nothing deleted");
            return None;
        };

        let removed = self.state.loans.remove(idx);
        info!(loan_id = %id, actor = %actor.name, "Loan deleted");
        self.commit(
            &[CollectionKey::Loans],
            AuditRecord::loan_deleted(&actor.name, id),
        );
        Some(removed)
    }

    fn close_loan(&mut self, actor: &Principal, id: LoanId) -> Option<LoanRequest> {
        self.transition_loan(actor, id, Transition::Close)
    }

    fn mark_loan_defaulted(&mut self, actor: &Principal, id: LoanId) -> Option<LoanRequest> {
        self.transition_loan(actor, id, Transition::Default)
    }

    // =========================================================================
    // OFFERS
    // =========================================================================

    fn create_offer(&mut self, actor: &Principal, draft: &OfferDraft) -> OfferId {
        let id = OfferId(self.next_entity_id());
        let offer = Offer::from_draft(id, &actor.name, draft);
        let amount = offer.amount;
        self.state.offers.insert(0, offer);

        info!(offer_id = %id, lender = %actor.name, amount = %amount, "Offer published");
        self.commit(
            &[CollectionKey::Offers],
            AuditRecord::offer_created(&actor.name, amount),
        );
        id
    }

    fn delete_offer(&mut self, actor: &Principal, id: OfferId) -> Option<Offer> {
        let Some(idx) = self.state.offer_index(id) else {
            debug!(offer_id = %id, "Offer not found, nothing withdrawn");
            return None;
        };
        if !actor.is_admin() && self.state.offers[idx].lender_name != actor.name {
            debug!(offer_id = %id, actor = %actor.name, "Offer belongs to another lender");
            return None;
        }

        let removed = self.state.offers.remove(idx);
        info!(offer_id = %id, actor = %actor.name, "Offer withdrawn");
        self.commit(
            &[CollectionKey::Offers],
            AuditRecord::offer_withdrawn(&actor.name, id),
        );
        Some(removed)
    }

    fn apply_for_offer(&mut self, actor: &Principal, id: OfferId) -> Option<LoanId> {
        let Some(idx) = self.state.offer_index(id) else {
            debug!(offer_id = %id, borrower = %actor.name, "Offer no longer available");
            let touched = self.record(&AuditRecord::offer_unavailable(&actor.name, id));
            self.persist(&touched);
            return None;
        };

        let offer = self.state.offers.remove(idx);
        let loan_id = LoanId(self.next_entity_id());
        let loan = LoanRequest::from_offer(loan_id, &actor.name, &offer, &self.clock.today());
        self.state.loans.insert(0, loan);

        info!(offer_id = %id, loan_id = %loan_id, borrower = %actor.name, "Offer converted to loan");
        self.commit(
            &[CollectionKey::Loans, CollectionKey::Offers],
            AuditRecord::offer_applied(&actor.name, id, &offer.lender_name),
        );
        Some(loan_id)
    }

    // =========================================================================
    // PAYMENTS
    // =========================================================================

    fn add_payment(
        &mut self,
        actor: &Principal,
        amount: &str,
        loan_id: Option<LoanId>,
    ) -> TransactionId {
        let amount = Numeric::parse_float(amount);
        let id = next_transaction_id(self.state.transactions.iter().map(|t| &t.id));
        let transaction = Transaction {
            id: id.clone(),
            date: self.clock.today(),
            amount,
            kind: TransactionKind::Payment,
            status: TransactionStatus::Success,
            borrower_name: actor.name.clone(),
            loan_id,
        };
        self.state.transactions.insert(0, transaction);

        info!(transaction_id = %id, borrower = %actor.name, amount = %amount, "Payment recorded");
        self.commit(
            &[CollectionKey::Transactions],
            AuditRecord::payment_received(&actor.name, amount),
        );
        id
    }

    // =========================================================================
    // NOTIFICATIONS
    // =========================================================================

    fn mark_notification_read(&mut self, id: &NotificationId) -> bool {
        let Some(notification) = self.state.notifications.iter_mut().find(|n| &n.id == id) else {
            debug!(notification_id = %id, "Notification not found");
            return false;
        };

        notification.read = true;
        self.persist(&[CollectionKey::Notifications]);
        true
    }

    fn clear_notifications(&mut self) -> usize {
        let cleared = self.state.notifications.len();
        if cleared > 0 {
            self.state.notifications.clear();
            self.persist(&[CollectionKey::Notifications]);
        }
        cleared
    }
}
