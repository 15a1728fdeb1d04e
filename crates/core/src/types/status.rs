//! Closed value sets: user roles and transaction statuses.
//!
//! Both sets carry an `Other` member. Unrecognized names map to it instead of
//! failing, and callers decide whether `Other` is acceptable in context.

use serde::{Deserialize, Serialize};

/// Role assigned to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "sea.user_role", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Default role for self-registered accounts.
    #[default]
    Customer,
    /// Receives payments in transactions.
    Merchant,
    /// Manages the product catalogue.
    Admin,
    /// Any unrecognized role name.
    Other,
}

impl UserRole {
    /// All roles in declaration order.
    pub const ALL: [Self; 4] = [Self::Customer, Self::Merchant, Self::Admin, Self::Other];

    /// Canonical lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Merchant => "merchant",
            Self::Admin => "admin",
            Self::Other => "other",
        }
    }

    /// Look up a role by name, falling back to [`UserRole::Other`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == name)
            .unwrap_or(Self::Other)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment status of a transaction.
///
/// New transactions start in `WaitingConfirmation`; the merchant then
/// accepts or rejects the transfer. There is no transition table: any
/// recognized status may replace any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "sea.transaction_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    #[default]
    WaitingConfirmation,
    Accepted,
    Rejected,
    /// Any unrecognized status name. Never a valid update target.
    Other,
}

impl TransactionStatus {
    /// All statuses in declaration order.
    pub const ALL: [Self; 4] = [
        Self::WaitingConfirmation,
        Self::Accepted,
        Self::Rejected,
        Self::Other,
    ];

    /// Canonical lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WaitingConfirmation => "waiting_confirmation",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Other => "other",
        }
    }

    /// Look up a status by name, falling back to [`TransactionStatus::Other`].
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(name))
            .unwrap_or(Self::Other)
    }

    /// Whether a transaction may be moved into this status.
    #[must_use]
    pub const fn is_assignable(self) -> bool {
        !matches!(self, Self::Other)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
