use serde::{Deserialize, Serialize};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Public part of the user returned to the client. Never carries the id or
/// the password hash.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub username: String,
    pub email: String,
}

/// Form body for the credential exchange.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Response returned after a successful credential exchange.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// The authenticated caller's identity, derived from token claims.
#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub username: String,
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_omits_sensitive_fields() {
        let user = PublicUser {
            username: "alice".into(),
            email: "alice@example.com".into(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("alice@example.com"));
        assert!(!json.contains("password"));
        assert!(!json.contains("id"));
    }

    #[test]
    fn token_response_serialization() {
        let response = TokenResponse {
            access_token: "abc".into(),
            token_type: "bearer".into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("access_token"));
        assert!(json.contains("bearer"));
    }
}
