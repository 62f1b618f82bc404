//! Query/filter layer: who may see which borrowings.

use booklend_core::UserId;

use crate::record::Borrowing;

/// Resolved ledger filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorrowingFilter {
    /// Restrict to a single user's records.
    pub user_id: Option<UserId>,
    /// `Some(true)` → only open records, `Some(false)` → only closed ones.
    pub active: Option<bool>,
}

impl BorrowingFilter {
    pub fn matches(&self, record: &Borrowing) -> bool {
        if let Some(user_id) = self.user_id {
            if record.user_id != user_id {
                return false;
            }
        }
        if let Some(active) = self.active {
            if record.is_active() != active {
                return false;
            }
        }
        true
    }
}

/// Raw list parameters as they arrive from the HTTP surface.
#[derive(Debug, Clone, Default)]
pub struct ListBorrowings {
    /// Cross-user filter; honored for staff requesters only.
    pub user_id: Option<UserId>,
    /// Raw `is_active` query value; anything but a case-insensitive
    /// "true"/"false" disables the filter.
    pub is_active: Option<String>,
}

impl ListBorrowings {
    /// Resolve the parameters against the requester's identity.
    ///
    /// Non-staff requesters are always scoped to their own records, no matter
    /// what `user_id` they supplied.
    pub fn scope(&self, requester: UserId, is_staff: bool) -> BorrowingFilter {
        let user_id = if is_staff {
            self.user_id
        } else {
            Some(requester)
        };

        BorrowingFilter {
            user_id,
            active: self.is_active.as_deref().and_then(parse_active),
        }
    }
}

fn parse_active(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
