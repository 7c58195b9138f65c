//! # Audit Trail
//!
//! Every mutation of accounts, loans, offers or transactions produces one
//! [`AuditRecord`]: an activity log line plus (almost always) a notification.
//! Both trails are most-recent-first and bounded; the oldest entries fall off
//! the end.

use shared_types::{format_amount, AccountId, AccountStatus, Numeric, Role};

use super::entities::{
    ActivityLogEntry, LoanId, Notification, NotificationId, NotificationKind, OfferId,
};

/// Actor label for entries not attributable to a signed-in user.
pub const SYSTEM_ACTOR: &str = "System";

/// Inserts `item` at the front, then truncates to `max` entries.
pub fn prepend_bounded<T>(list: &mut Vec<T>, item: T, max: usize) {
    list.insert(0, item);
    list.truncate(max);
}

/// Activity time label for an event recorded at `clock_label` (`10:42 AM`).
pub fn activity_time(clock_label: &str) -> String {
    format!("Just now ({clock_label})")
}

fn dollars(amount: Numeric) -> String {
    format!("${}", format_amount(amount))
}

/// The audit side effect of one mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub action: &'static str,
    pub actor_label: String,
    pub details: String,
    /// `None` only for the lone activity line of a failed offer application.
    pub notification: Option<(NotificationKind, String)>,
}

impl AuditRecord {
    fn new(
        action: &'static str,
        actor: &str,
        details: String,
        kind: NotificationKind,
        message: String,
    ) -> Self {
        Self {
            action,
            actor_label: actor.to_string(),
            details,
            notification: Some((kind, message)),
        }
    }

    pub fn activity_entry(&self, clock_label: &str) -> ActivityLogEntry {
        ActivityLogEntry {
            action: self.action.to_string(),
            actor_label: self.actor_label.clone(),
            details: self.details.clone(),
            time: activity_time(clock_label),
        }
    }

    pub fn notification(&self, id: NotificationId, clock_label: &str) -> Option<Notification> {
        self.notification.as_ref().map(|(kind, message)| Notification {
            id,
            message: message.clone(),
            kind: *kind,
            read: false,
            time: clock_label.to_string(),
        })
    }

    // ---------------------------------------------------------------------
    // Accounts
    // ---------------------------------------------------------------------

    pub fn user_added(admin: &str, name: &str, role: Role) -> Self {
        Self::new(
            "Add User",
            admin,
            format!("Added new user: {name} ({role})"),
            NotificationKind::Success,
            format!("New {role} user created: {name}"),
        )
    }

    pub fn user_status_toggled(admin: &str, id: AccountId, status: AccountStatus) -> Self {
        Self::new(
            "User Status Toggle",
            admin,
            format!("Toggled status for user ID {id} to {status}"),
            NotificationKind::Warning,
            "User status updated".to_string(),
        )
    }

    pub fn user_role_changed(admin: &str, id: AccountId, role: Role) -> Self {
        Self::new(
            "User Role Update",
            admin,
            format!("Changed role for user ID {id} to {role}"),
            NotificationKind::Success,
            format!("User role updated to {role}"),
        )
    }

    pub fn user_removed(admin: &str, id: AccountId) -> Self {
        Self::new(
            "User Removed",
            admin,
            format!("Removed user ID {id}"),
            NotificationKind::Error,
            format!("User removed (ID: {id})"),
        )
    }

    pub fn user_registered(name: &str, role: Role) -> Self {
        Self::new(
            "New Registration",
            SYSTEM_ACTOR,
            format!("New {role} registered: {name}"),
            NotificationKind::Info,
            format!("New {role} account registered: {name}"),
        )
    }

    pub fn profile_updated(actor: &str, id: AccountId) -> Self {
        Self::new(
            "Profile Updated",
            actor,
            format!("Updated profile for user ID {id}"),
            NotificationKind::Info,
            "Profile updated".to_string(),
        )
    }

    // ---------------------------------------------------------------------
    // Loans
    // ---------------------------------------------------------------------

    pub fn loan_applied(borrower: &str, amount: Numeric) -> Self {
        Self::new(
            "Loan Application",
            borrower,
            format!("Submitted application for {}", dollars(amount)),
            NotificationKind::Info,
            format!("{borrower} applied for a {} loan", dollars(amount)),
        )
    }

    pub fn loan_approved(lender: &str, id: LoanId) -> Self {
        Self::new(
            "Loan Approved",
            lender,
            format!("Approved loan request #{id}"),
            NotificationKind::Success,
            format!("Loan #{id} has been approved by {lender}"),
        )
    }

    pub fn loan_rejected(lender: &str, id: LoanId) -> Self {
        Self::new(
            "Loan Rejected",
            lender,
            format!("Rejected loan application #{id}"),
            NotificationKind::Warning,
            format!("Loan application #{id} has been rejected"),
        )
    }

    pub fn loan_deleted(actor: &str, id: LoanId) -> Self {
        Self::new(
            "Loan Deleted",
            actor,
            format!("Deleted loan #{id}"),
            NotificationKind::Error,
            format!("Loan #{id} deleted"),
        )
    }

    pub fn loan_closed(actor: &str, id: LoanId) -> Self {
        Self::new(
            "Loan Closed",
            actor,
            format!("Closed loan #{id}"),
            NotificationKind::Info,
            format!("Loan #{id} has been closed"),
        )
    }

    pub fn loan_defaulted(actor: &str, id: LoanId) -> Self {
        Self::new(
            "Loan Defaulted",
            actor,
            format!("Marked loan #{id} as defaulted"),
            NotificationKind::Error,
            format!("Loan #{id} marked as defaulted"),
        )
    }

    // ---------------------------------------------------------------------
    // Offers
    // ---------------------------------------------------------------------

    pub fn offer_created(lender: &str, amount: Numeric) -> Self {
        Self::new(
            "Offer Created",
            lender,
            format!("Published loan offer for {}", dollars(amount)),
            NotificationKind::Success,
            format!("New loan offer for {} published by {lender}", dollars(amount)),
        )
    }

    pub fn offer_withdrawn(actor: &str, id: OfferId) -> Self {
        Self::new(
            "Offer Withdrawn",
            actor,
            format!("Withdrew loan offer #{id}"),
            NotificationKind::Warning,
            format!("Loan offer #{id} withdrawn"),
        )
    }

    pub fn offer_applied(borrower: &str, id: OfferId, lender: &str) -> Self {
        Self::new(
            "Offer Applied",
            borrower,
            format!("Applied for offer #{id} ({lender})"),
            NotificationKind::Info,
            format!("{borrower} accepted loan offer #{id}"),
        )
    }

    /// Application against an offer that no longer exists: logged, never
    /// announced.
    pub fn offer_unavailable(borrower: &str, id: OfferId) -> Self {
        Self {
            action: "Offer Unavailable",
            actor_label: borrower.to_string(),
            details: format!("Offer #{id} is no longer available"),
            notification: None,
        }
    }

    // ---------------------------------------------------------------------
    // Payments
    // ---------------------------------------------------------------------

    pub fn payment_received(borrower: &str, amount: Numeric) -> Self {
        Self::new(
            "Payment Received",
            SYSTEM_ACTOR,
            format!("Received {} from {borrower}", dollars(amount)),
            NotificationKind::Success,
            format!("Payment of {} received from {borrower}", dollars(amount)),
        )
    }
}
