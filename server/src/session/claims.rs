use serde::{Deserialize, Serialize};

/// Verified claims carried by the store's access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: u64,
}

/// The per-request user derived from verified claims. Constructed fresh
/// on every navigation and discarded with the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedUser {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub role: String,
}

impl ResolvedUser {
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            id: claims.sub.clone(),
            username: claims.username.clone().unwrap_or_default(),
            avatar_url: claims.avatar_url.clone(),
            role: claims
                .role
                .clone()
                .filter(|role| !role.is_empty())
                .unwrap_or_else(|| "user".to_string()),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("admin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: Option<&str>) -> Claims {
        Claims {
            sub: "user-1".to_string(),
            username: Some("ramen_lover".to_string()),
            avatar_url: Some("https://cdn.example.com/a.png".to_string()),
            role: role.map(str::to_string),
            exp: 4_102_444_800,
        }
    }

    #[test]
    fn resolved_user_defaults_missing_role_to_user() {
        let user = ResolvedUser::from_claims(&claims(None));
        assert_eq!(user.role, "user");
    }

    #[test]
    fn resolved_user_defaults_empty_role_to_user() {
        let user = ResolvedUser::from_claims(&claims(Some("")));
        assert_eq!(user.role, "user");
    }

    #[test]
    fn resolved_user_keeps_explicit_role() {
        let user = ResolvedUser::from_claims(&claims(Some("admin")));
        assert_eq!(user.role, "admin");
        assert!(user.is_admin());
    }

    #[test]
    fn resolved_user_copies_identity_claims() {
        let user = ResolvedUser::from_claims(&claims(Some("user")));
        assert_eq!(user.id, "user-1");
        assert_eq!(user.username, "ramen_lover");
        assert_eq!(
            user.avatar_url.as_deref(),
            Some("https://cdn.example.com/a.png")
        );
        assert!(!user.is_admin());
    }
}
