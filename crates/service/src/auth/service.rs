use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::{rngs::OsRng, RngCore};

use super::{
    domain::{AuthSession, Claims, LoginInput, NewUser, RegisterInput},
    errors::AuthError,
    repository::AuthRepository,
};
use crate::mailer::Mailer;
use models::user::{self, ROLE_CLIENT};

const MIN_PASSWORD_LEN: usize = 8;
const TOKEN_TTL_HOURS: i64 = 24;
const RESET_TTL_MS: i64 = 60 * 60 * 1000;

pub struct AuthService<R: AuthRepository> {
    repo: R,
    jwt_secret: String,
    /// Base URL of the SPA, used for the password-reset link.
    frontend_url: String,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: R, jwt_secret: impl Into<String>, frontend_url: impl Into<String>) -> Self {
        Self { repo, jwt_secret: jwt_secret.into(), frontend_url: frontend_url.into() }
    }

    /// Creates a Client account and returns its id. Email and username
    /// must both be free.
    #[tracing::instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> Result<i32, AuthError> {
        user::validate_name(&input.name)?;
        user::validate_email(&input.email)?;
        if input.username.trim().is_empty() {
            return Err(AuthError::Validation("username required".into()));
        }
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if self.repo.email_or_username_taken(&input.email, &input.username).await? {
            return Err(AuthError::Conflict);
        }

        let avatar_url =
            format!("https://ui-avatars.com/api/?name={}", input.name.replace(' ', "+"));
        let created = self
            .repo
            .create_user(NewUser {
                name: input.name,
                email: input.email,
                username: input.username,
                password_hash: hash_password(&input.password)?,
                role: ROLE_CLIENT.to_string(),
                avatar_url,
            })
            .await?;
        tracing::info!(user_id = created.id, "user registered");
        Ok(created.id)
    }

    /// Verifies the password against the stored hash and issues a one-day
    /// token. A missing account and a wrong password are indistinguishable
    /// to the caller.
    #[tracing::instrument(skip(self, input), fields(identifier = %input.identifier))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let Some(found) = self.repo.find_by_identifier(&input.identifier).await? else {
            return Err(AuthError::InvalidCredentials);
        };
        if !verify_password(&input.password, &found.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }
        let token = self.issue_token(found.id, &found.role)?;
        Ok(AuthSession { token, user: found.into() })
    }

    pub fn issue_token(&self, id: i32, role: &str) -> Result<String, AuthError> {
        let exp = (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize;
        let claims = Claims { id, role: role.to_string(), exp };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::Token(e.to_string()))
    }

    /// Stores a one-hour reset token and mails the reset link. Unknown
    /// addresses are reported to the caller so the form can say so.
    #[tracing::instrument(skip(self, mailer))]
    pub async fn forgot_password(&self, email: &str, mailer: &dyn Mailer) -> Result<(), AuthError> {
        let Some(found) = self.repo.find_by_email(email).await? else {
            return Err(AuthError::EmailNotFound);
        };

        let token = random_token();
        let expires = Utc::now().timestamp_millis() + RESET_TTL_MS;
        self.repo.set_reset_token(found.id, &token, expires).await?;

        let link = format!("{}/reset-password/{}", self.frontend_url.trim_end_matches('/'), token);
        let body = format!(
            "You are receiving this because you (or someone else) requested a password reset \
             for your account.\n\nFollow this link to complete the process within one hour:\n\n\
             {link}\n\nIf you did not request this, ignore this email and your password will \
             remain unchanged.\n"
        );
        mailer
            .send(&found.email, "Password Reset", &body)
            .await
            .map_err(|e| AuthError::Mail(e.to_string()))?;
        Ok(())
    }

    /// Consumes a reset token: replaces the password and clears the token.
    #[tracing::instrument(skip(self, token, new_password))]
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        if new_password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        let now_ms = Utc::now().timestamp_millis();
        let Some(found) = self.repo.find_by_reset_token(token, now_ms).await? else {
            return Err(AuthError::ResetTokenInvalid);
        };
        self.repo.update_password(found.id, &hash_password(new_password)?).await?;
        tracing::info!(user_id = found.id, "password reset");
        Ok(())
    }
}

/// Verifies a bearer token and returns its claims. Used by the HTTP
/// layer's auth extractors.
pub fn decode_claims(token: &str, jwt_secret: &str) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AuthError::Token(e.to_string()))
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
        .unwrap_or(false)
}

/// 20 random bytes, hex encoded. Same shape as the links users already
/// have in their inboxes.
fn random_token() -> String {
    let mut buf = [0u8; 20];
    OsRng.fill_bytes(&mut buf);
    buf.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::super::repository::mock::MockAuthRepository;
    use super::*;
    use crate::mailer::RecordingMailer;

    const SECRET: &str = "unit-test-secret";

    fn svc() -> AuthService<MockAuthRepository> {
        AuthService::new(MockAuthRepository::new(), SECRET, "http://localhost:5173")
    }

    fn register_input() -> RegisterInput {
        RegisterInput {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            username: "jane".into(),
            password: "correct-horse".into(),
        }
    }

    #[tokio::test]
    async fn register_then_login_roundtrip() {
        let svc = svc();
        let id = svc.register(register_input()).await.unwrap();
        assert_eq!(id, 1);

        // Username works as the identifier
        let session = svc
            .login(LoginInput { identifier: "jane".into(), password: "correct-horse".into() })
            .await
            .unwrap();
        assert_eq!(session.user.role, ROLE_CLIENT);

        // So does the email
        let session = svc
            .login(LoginInput {
                identifier: "jane@example.com".into(),
                password: "correct-horse".into(),
            })
            .await
            .unwrap();
        let claims = decode_claims(&session.token, SECRET).unwrap();
        assert_eq!(claims.id, 1);
        assert_eq!(claims.role, ROLE_CLIENT);
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let svc = svc();
        svc.register(register_input()).await.unwrap();
        let err = svc
            .login(LoginInput { identifier: "jane".into(), password: "wrong-password".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let svc = svc();
        svc.register(register_input()).await.unwrap();
        let err = svc.register(register_input()).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict));
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let svc = svc();
        let mut input = register_input();
        input.password = "short".into();
        let err = svc.register(input).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn token_is_not_valid_under_another_secret() {
        let svc = svc();
        svc.register(register_input()).await.unwrap();
        let session = svc
            .login(LoginInput { identifier: "jane".into(), password: "correct-horse".into() })
            .await
            .unwrap();
        assert!(decode_claims(&session.token, "some-other-secret").is_err());
    }

    #[tokio::test]
    async fn forgot_and_reset_password_flow() {
        let svc = svc();
        svc.register(register_input()).await.unwrap();

        let mailer = RecordingMailer::default();
        svc.forgot_password("jane@example.com", &mailer).await.unwrap();

        let sent = mailer.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "jane@example.com");

        // The mail carries the link; the token is its last path segment.
        let link =
            sent[0].body.lines().find(|l| l.contains("/reset-password/")).unwrap().trim();
        let token = link.rsplit('/').next().unwrap();
        assert_eq!(token.len(), 40);

        svc.reset_password(token, "a-new-password").await.unwrap();

        // Old password no longer works, new one does
        assert!(svc
            .login(LoginInput { identifier: "jane".into(), password: "correct-horse".into() })
            .await
            .is_err());
        assert!(svc
            .login(LoginInput { identifier: "jane".into(), password: "a-new-password".into() })
            .await
            .is_ok());

        // Token is single use
        let err = svc.reset_password(token, "yet-another-pass").await.unwrap_err();
        assert!(matches!(err, AuthError::ResetTokenInvalid));
    }

    #[tokio::test]
    async fn forgot_password_for_unknown_email_errors() {
        let svc = svc();
        let mailer = RecordingMailer::default();
        let err = svc.forgot_password("nobody@example.com", &mailer).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailNotFound));
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn expired_reset_token_is_rejected() {
        let repo = MockAuthRepository::new();
        let svc = AuthService::new(repo, SECRET, "http://localhost:5173");
        let id = svc.register(register_input()).await.unwrap();
        svc.repo.set_reset_token(id, "deadbeef", Utc::now().timestamp_millis() - 1).await.unwrap();

        let err = svc.reset_password("deadbeef", "a-new-password").await.unwrap_err();
        assert!(matches!(err, AuthError::ResetTokenInvalid));
    }
}
