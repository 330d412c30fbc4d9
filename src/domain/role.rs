//! User roles.
//!
//! Roles form a closed, flat set. There is no ordering between them: a rule that
//! should admit admins has to list `Role::Admin` itself.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Participant,
    Judge,
    Organizer,
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Participant, Role::Judge, Role::Organizer, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Participant => "participant",
            Role::Judge => "judge",
            Role::Organizer => "organizer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    // Exact match only. "Admin" or " admin" are not admins.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "participant" => Ok(Role::Participant),
            "judge" => Ok(Role::Judge),
            "organizer" => Ok(Role::Organizer),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// `role` is accepted iff it is literally a member of `allowed`.
pub fn satisfies(role: Role, allowed: &[Role]) -> bool {
    allowed.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_only_exact_lowercase_names() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert!("Admin".parse::<Role>().is_err());
        assert!(" admin".parse::<Role>().is_err());
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn satisfies_is_plain_membership() {
        assert!(satisfies(Role::Admin, &[Role::Judge, Role::Admin]));
        assert!(!satisfies(Role::Admin, &[Role::Judge]));
        assert!(!satisfies(Role::Organizer, &[Role::Participant, Role::Judge]));
        assert!(!satisfies(Role::Admin, &[]));
    }

    #[test]
    fn serializes_as_lowercase_string() {
        let json = serde_json::to_string(&Role::Organizer).unwrap();
        assert_eq!(json, "\"organizer\"");
    }
}
