//! # Domain Entities
//!
//! Loans, offers, transactions and the two audit trails held by the domain
//! store. Field names serialize in camelCase; this is the persisted shape.

use std::fmt;

use serde::{Deserialize, Serialize};
use shared_types::Numeric;

// =============================================================================
// LOANS
// =============================================================================

/// Identifier of a loan request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoanId(pub u64);

impl fmt::Display for LoanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a loan request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LoanStatus {
    Pending,
    Active,
    Rejected,
    Closed,
    Defaulted,
}

impl LoanStatus {
    pub const ALL: [LoanStatus; 5] = [
        LoanStatus::Pending,
        LoanStatus::Active,
        LoanStatus::Rejected,
        LoanStatus::Closed,
        LoanStatus::Defaulted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "Pending",
            LoanStatus::Active => "Active",
            LoanStatus::Rejected => "Rejected",
            LoanStatus::Closed => "Closed",
            LoanStatus::Defaulted => "Defaulted",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stage names of the four-step tracker, in tracker order.
pub mod stage_names {
    pub const SUBMITTED: &str = "Application Submitted";
    pub const UNDERWRITING: &str = "Underwriting";
    pub const APPROVED: &str = "Approved";
    pub const DISBURSED: &str = "Disbursed";

    pub const TRACKER: [&str; 4] = [SUBMITTED, UNDERWRITING, APPROVED, DISBURSED];
}

/// One step of a loan's stage tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Stage {
    pub fn pending(name: &str) -> Self {
        Self {
            name: name.to_string(),
            completed: false,
            date: None,
        }
    }

    pub fn completed_on(name: &str, date: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            completed: true,
            date: Some(date.into()),
        }
    }
}

/// A borrower's loan request and, once approved, the live loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    pub id: LoanId,
    pub borrower_name: String,
    pub amount: Numeric,
    #[serde(default)]
    pub purpose: String,
    pub status: LoanStatus,
    pub interest_rate: Numeric,
    pub term_months: Numeric,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_payment_date: Option<String>,
    pub next_payment_amount: Numeric,
    /// The deciding lender, or the offering lender for loans spawned from an
    /// offer. `None` before any decision.
    #[serde(default)]
    pub approved_by_lender_name: Option<String>,
    #[serde(default)]
    pub stages: Vec<Stage>,
}

/// Input for a direct loan application, as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoanApplication {
    pub amount: String,
    pub purpose: String,
    pub term: String,
    /// Annual rate; 6.5 when omitted.
    pub interest: Option<String>,
}

impl LoanApplication {
    pub fn new(amount: impl Into<String>, purpose: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            purpose: purpose.into(),
            term: term.into(),
            interest: None,
        }
    }

    pub fn with_interest(mut self, interest: impl Into<String>) -> Self {
        self.interest = Some(interest.into());
        self
    }
}

// =============================================================================
// OFFERS
// =============================================================================

/// Identifier of a marketplace offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferId(pub u64);

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A lender's published loan offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: OfferId,
    pub amount: Numeric,
    pub interest_rate: Numeric,
    pub term_months: Numeric,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub optional_terms: String,
    pub lender_name: String,
}

/// Input for publishing an offer, as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferDraft {
    pub amount: String,
    pub interest: String,
    pub term: String,
    pub description: String,
    pub optional_terms: String,
}

impl OfferDraft {
    pub fn new(amount: impl Into<String>, interest: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            interest: interest.into(),
            term: term.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_optional_terms(mut self, terms: impl Into<String>) -> Self {
        self.optional_terms = terms.into();
        self
    }
}

// =============================================================================
// TRANSACTIONS
// =============================================================================

/// Identifier of a ledger transaction (`TXN` followed by digits).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub String);

impl TransactionId {
    pub const PREFIX: &'static str = "TXN";

    /// Numeric suffix of a well-formed id.
    pub fn sequence(&self) -> Option<u64> {
        self.0.strip_prefix(Self::PREFIX)?.parse().ok()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Payment,
    Disbursement,
    Fee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    Success,
    Pending,
    Failed,
}

/// An immutable ledger record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub date: String,
    pub amount: Numeric,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub borrower_name: String,
    #[serde(default)]
    pub loan_id: Option<LoanId>,
}

impl Transaction {
    pub fn is_payment(&self) -> bool {
        self.kind == TransactionKind::Payment
    }
}

// =============================================================================
// AUDIT TRAILS
// =============================================================================

/// One line of the system activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    pub action: String,
    pub actor_label: String,
    pub details: String,
    pub time: String,
}

/// Identifier of a notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub String);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A purely informational feed item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    pub read: bool,
    pub time: String,
}
