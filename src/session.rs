use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::model::Ms;

/// Closed set of roles. The remote session metadata carries these as strings
/// (`"admin"`, `"hostel-admin"`, `"user"`); matching on the enum is
/// exhaustive everywhere so an unhandled role cannot slip through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserRole {
    Admin,
    HostelAdmin,
    User,
}

/// Account data mirrored from the remote identity provider. Roles are read
/// from session metadata and are not locally authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Ulid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    /// Meaningful only for `HostelAdmin`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_hostel_id: Option<Ulid>,
    pub created_at: Ms,
}

/// What a session may see in the admin area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardScope {
    /// Platform admin: every hostel.
    Platform,
    /// Hostel admin: exactly one hostel.
    Single(Ulid),
    /// Regular users have no dashboard.
    Denied,
}

/// Explicitly passed authentication context. Authorization questions go
/// through this object; the engine itself stays free of any auth dependency.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    /// Platform-level actions: hostel CRUD, admin assignment, invitations.
    pub fn can_manage_platform(&self) -> bool {
        match self.user.role {
            UserRole::Admin => true,
            UserRole::HostelAdmin | UserRole::User => false,
        }
    }

    /// Per-hostel actions: edit rooms, bookings, file feedback.
    pub fn can_manage_hostel(&self, hostel_id: Ulid) -> bool {
        match self.user.role {
            UserRole::Admin => true,
            UserRole::HostelAdmin => self.user.assigned_hostel_id == Some(hostel_id),
            UserRole::User => false,
        }
    }

    pub fn can_view_dashboard(&self) -> bool {
        self.dashboard_scope() != DashboardScope::Denied
    }

    pub fn dashboard_scope(&self) -> DashboardScope {
        match self.user.role {
            UserRole::Admin => DashboardScope::Platform,
            UserRole::HostelAdmin => match self.user.assigned_hostel_id {
                Some(id) => DashboardScope::Single(id),
                // A hostel admin with no assignment yet sees nothing.
                None => DashboardScope::Denied,
            },
            UserRole::User => DashboardScope::Denied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole, assigned: Option<Ulid>) -> User {
        User {
            id: Ulid::new(),
            email: "test@exemplu.ro".into(),
            name: "Test".into(),
            role,
            assigned_hostel_id: assigned,
            created_at: 0,
        }
    }

    #[test]
    fn role_serde_strings() {
        assert_eq!(serde_json::to_value(UserRole::Admin).unwrap(), "admin");
        assert_eq!(
            serde_json::to_value(UserRole::HostelAdmin).unwrap(),
            "hostel-admin"
        );
        assert_eq!(serde_json::to_value(UserRole::User).unwrap(), "user");

        let role: UserRole = serde_json::from_str("\"hostel-admin\"").unwrap();
        assert_eq!(role, UserRole::HostelAdmin);
    }

    #[test]
    fn platform_admin_manages_everything() {
        let s = Session::new(user(UserRole::Admin, None));
        assert!(s.can_manage_platform());
        assert!(s.can_manage_hostel(Ulid::new()));
        assert!(s.can_view_dashboard());
        assert_eq!(s.dashboard_scope(), DashboardScope::Platform);
    }

    #[test]
    fn hostel_admin_scoped_to_assignment() {
        let mine = Ulid::new();
        let other = Ulid::new();
        let s = Session::new(user(UserRole::HostelAdmin, Some(mine)));
        assert!(!s.can_manage_platform());
        assert!(s.can_manage_hostel(mine));
        assert!(!s.can_manage_hostel(other));
        assert_eq!(s.dashboard_scope(), DashboardScope::Single(mine));
    }

    #[test]
    fn hostel_admin_without_assignment_denied() {
        let s = Session::new(user(UserRole::HostelAdmin, None));
        assert!(!s.can_manage_hostel(Ulid::new()));
        assert_eq!(s.dashboard_scope(), DashboardScope::Denied);
    }

    #[test]
    fn regular_user_denied() {
        let s = Session::new(user(UserRole::User, None));
        assert!(!s.can_manage_platform());
        assert!(!s.can_manage_hostel(Ulid::new()));
        assert!(!s.can_view_dashboard());
        assert_eq!(s.dashboard_scope(), DashboardScope::Denied);
    }
}
