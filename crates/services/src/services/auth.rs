//! Authentication boundary: credential checks, token issuing, and the
//! per-request identity every data call depends on.

use db::{
    DBService,
    models::{
        activity::LoginHistory,
        business::BusinessType,
        profile::{Profile, ProfileInfo},
    },
};
use rand::Rng;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::warn;
use utils::jwt;
use uuid::Uuid;

/// The authenticated identity resolved for one request, together with the
/// account's active business type. Flows as an explicit value into every
/// dispatch and mutation call; there is no ambient "current user".
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub business_type: BusinessType,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated")]
    Unauthenticated,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("email is already registered")]
    EmailTaken,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("token error: {0}")]
    Token(#[from] jwt::JwtError),
}

#[derive(Clone)]
pub struct AuthService {
    db: DBService,
    token_secret: String,
}

impl AuthService {
    pub fn new(db: DBService, token_secret: impl Into<String>) -> Self {
        Self {
            db,
            token_secret: token_secret.into(),
        }
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
        business_type: BusinessType,
    ) -> Result<(ProfileInfo, String), AuthError> {
        if Profile::find_by_email(&self.db.pool, email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let salt = random_salt();
        let digest = digest_password(&salt, password);
        let profile =
            Profile::create(&self.db.pool, email, full_name, business_type, &digest, &salt).await?;

        let token = jwt::sign(&self.token_secret, profile.id)?;
        Ok((profile.into(), token))
    }

    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
        user_agent: Option<&str>,
    ) -> Result<(ProfileInfo, String), AuthError> {
        let Some(profile) = Profile::find_by_email(&self.db.pool, email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        let matches = digest_password(&profile.password_salt, password) == profile.password_digest;
        self.record_login(profile.id, matches, user_agent).await;

        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        let token = jwt::sign(&self.token_secret, profile.id)?;
        Ok((profile.into(), token))
    }

    /// Resolves a bearer token into the calling identity, or
    /// `Unauthenticated` when the token is absent, invalid, or orphaned.
    pub async fn verify_token(&self, token: Option<&str>) -> Result<CurrentUser, AuthError> {
        let token = token.ok_or(AuthError::Unauthenticated)?;
        let claims =
            jwt::verify(&self.token_secret, token).map_err(|_| AuthError::Unauthenticated)?;

        let profile = Profile::find_by_id(&self.db.pool, claims.sub)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        Ok(CurrentUser {
            id: profile.id,
            business_type: profile.business_type,
        })
    }

    /// Switches the account's single active business type.
    pub async fn switch_business_type(
        &self,
        user: &CurrentUser,
        business_type: BusinessType,
    ) -> Result<ProfileInfo, AuthError> {
        let profile = Profile::update_business_type(&self.db.pool, user.id, business_type)
            .await?
            .ok_or(AuthError::Unauthenticated)?;
        Ok(profile.into())
    }

    pub async fn profile(&self, user: &CurrentUser) -> Result<ProfileInfo, AuthError> {
        let profile = Profile::find_by_id(&self.db.pool, user.id)
            .await?
            .ok_or(AuthError::Unauthenticated)?;
        Ok(profile.into())
    }

    /// Login attempts are recorded best-effort; a failure to write history
    /// never fails the sign-in itself.
    async fn record_login(&self, user_id: Uuid, success: bool, user_agent: Option<&str>) {
        if let Err(error) =
            LoginHistory::create(&self.db.pool, user_id, success, user_agent, None).await
        {
            warn!(%error, %user_id, "failed to record login attempt");
        }
    }
}

fn random_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill(&mut bytes);
    to_hex(&bytes)
}

fn digest_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    to_hex(&hasher.finalize())
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service() -> AuthService {
        let db = DBService::new_in_memory().await.unwrap();
        AuthService::new(db, "test-secret")
    }

    #[tokio::test]
    async fn sign_up_then_sign_in_round_trips() {
        let auth = service().await;
        let (profile, _) = auth
            .sign_up("jane@example.com", "hunter2", Some("Jane"), BusinessType::Hospital)
            .await
            .unwrap();
        assert_eq!(profile.business_type, BusinessType::Hospital);

        let (signed_in, token) = auth
            .sign_in("jane@example.com", "hunter2", None)
            .await
            .unwrap();
        assert_eq!(signed_in.id, profile.id);

        let user = auth.verify_token(Some(&token)).await.unwrap();
        assert_eq!(user.id, profile.id);
        assert_eq!(user.business_type, BusinessType::Hospital);
    }

    #[tokio::test]
    async fn wrong_password_is_rejected_and_recorded() {
        let auth = service().await;
        auth.sign_up("jane@example.com", "hunter2", None, BusinessType::Hospital)
            .await
            .unwrap();

        let outcome = auth.sign_in("jane@example.com", "wrong", None).await;
        assert!(matches!(outcome, Err(AuthError::InvalidCredentials)));

        let profile = Profile::find_by_email(&auth.db.pool, "jane@example.com")
            .await
            .unwrap()
            .unwrap();
        let history = LoginHistory::find_recent(&auth.db.pool, profile.id)
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
        assert!(!history[0].success);
    }

    #[tokio::test]
    async fn missing_token_is_unauthenticated() {
        let auth = service().await;
        assert!(matches!(
            auth.verify_token(None).await,
            Err(AuthError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let auth = service().await;
        auth.sign_up("jane@example.com", "hunter2", None, BusinessType::Hospital)
            .await
            .unwrap();
        let outcome = auth
            .sign_up("jane@example.com", "other", None, BusinessType::Warehouse)
            .await;
        assert!(matches!(outcome, Err(AuthError::EmailTaken)));
    }
}
