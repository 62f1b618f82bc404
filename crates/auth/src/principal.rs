use thiserror::Error;

use booklend_core::UserId;

/// A resolved requester identity for authorization decisions.
///
/// Derived from verified claims. The rest of the system consumes exactly this
/// pair and nothing else about the user.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub is_staff: bool,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: staff access required")]
    StaffRequired,
}

/// Pure policy check for staff-only operations (catalog writes).
///
/// - No IO
/// - No panics
/// - No business logic
pub fn require_staff(principal: &Principal) -> Result<(), AuthzError> {
    if principal.is_staff {
        Ok(())
    } else {
        Err(AuthzError::StaffRequired)
    }
}
