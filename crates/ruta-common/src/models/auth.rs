use serde::{Deserialize, Serialize};

/// Account role carried in the JWT and stored on the user row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Commuter,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Commuter => "commuter",
        }
    }
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&Role::Commuter).unwrap(),
            "\"commuter\""
        );
    }

    #[test]
    fn test_role_as_str_matches_serde() {
        for role in [Role::Admin, Role::Commuter] {
            let quoted = serde_json::to_string(&role).unwrap();
            assert_eq!(quoted, format!("\"{}\"", role.as_str()));
        }
    }
}
