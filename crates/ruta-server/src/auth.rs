use anyhow::{Context, Result};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use ruta_common::models::auth::{Claims, Role};
use uuid::Uuid;

/// Access tokens live for one day
const ACCESS_TOKEN_TTL_SECS: i64 = 86_400;

/// Hash a password using argon2id
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Create an access token (JWT) carrying the user id and role
pub fn create_access_token(user_id: Uuid, role: Role, jwt_secret: &str) -> Result<String> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        role,
        iat: now,
        exp: now + ACCESS_TOKEN_TTL_SECS,
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .context("Failed to create access token")
}

/// Validate an access token and return claims
pub fn validate_access_token(token: &str, jwt_secret: &str) -> Result<Claims> {
    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .context("Invalid access token")?;
    Ok(token_data.claims)
}

/// Generate an email verification token: 20 random bytes as 40 hex chars
pub fn generate_verification_token() -> String {
    use argon2::password_hash::rand_core::RngCore;
    let mut bytes = [0u8; 20];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify_correct() {
        let password = "my-secure-password";
        let hash = hash_password(password).unwrap();
        assert!(verify_password(password, &hash).unwrap());
    }

    #[test]
    fn test_password_verify_wrong() {
        let hash = hash_password("correct-password").unwrap();
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_password_different_salts() {
        let password = "same-password";
        let hash1 = hash_password(password).unwrap();
        let hash2 = hash_password(password).unwrap();
        assert_ne!(hash1, hash2);
        // Both still verify
        assert!(verify_password(password, &hash1).unwrap());
        assert!(verify_password(password, &hash2).unwrap());
    }

    #[test]
    fn test_jwt_create_and_validate() {
        let secret = "test-jwt-secret";
        let user_id = Uuid::new_v4();
        let token = create_access_token(user_id, Role::Commuter, secret).unwrap();
        let claims = validate_access_token(&token, secret).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, Role::Commuter);
    }

    #[test]
    fn test_jwt_carries_admin_role() {
        let secret = "test-jwt-secret";
        let token = create_access_token(Uuid::new_v4(), Role::Admin, secret).unwrap();
        let claims = validate_access_token(&token, secret).unwrap();
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn test_jwt_wrong_secret_fails() {
        let token = create_access_token(Uuid::new_v4(), Role::Commuter, "secret-1").unwrap();
        let result = validate_access_token(&token, "secret-2");
        assert!(result.is_err());
    }

    #[test]
    fn test_jwt_expiry_window() {
        let secret = "test-jwt-secret";
        let token = create_access_token(Uuid::new_v4(), Role::Commuter, secret).unwrap();
        let claims = validate_access_token(&token, secret).unwrap();
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn test_verification_token_format() {
        let token = generate_verification_token();
        assert_eq!(token.len(), 40);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_verification_token_uniqueness() {
        assert_ne!(generate_verification_token(), generate_verification_token());
    }
}
