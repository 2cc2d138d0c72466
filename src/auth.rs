//! Onboarding and sign-in.
//!
//! Validation is local and immediate; a valid form then goes through a
//! simulated round-trip. There is no account store: any valid form signs in.
//! The simulated call is a plain future, so dropping it (the client
//! navigating away) cancels it.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::UserRole;

pub const MIN_PASSWORD_CHARS: usize = 6;

/// Route the app opens after a successful sign-in.
pub const DASHBOARD_ROUTE: &str = "/(tabs)";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Please enter both email and password")]
    MissingCredentials,
    #[error("Please fill in all required fields")]
    MissingFields,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,
    #[error("Please select a role to continue")]
    NoRoleSelected,
}

// ═══════════════════════════════════════════
// Role selection
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleOption {
    pub id: UserRole,
    pub title: String,
    pub description: String,
}

pub fn role_options() -> Vec<RoleOption> {
    [
        (UserRole::Mother, "Pregnant Mother",
         "Track your pregnancy journey with AI-powered insights and support"),
        (UserRole::HealthWorker, "Health Worker / Midwife",
         "Support multiple patients with professional healthcare tools"),
        (UserRole::Doctor, "Doctor / Specialist",
         "Provide telemedicine consultations and monitor patient health"),
        (UserRole::Pharmacy, "Pharmacy Operator",
         "Manage medicine inventory and fulfill prescription orders"),
    ]
    .into_iter()
    .map(|(id, title, description)| RoleOption {
        id,
        title: title.into(),
        description: description.into(),
    })
    .collect()
}

/// Parameters handed to the registration screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationParams {
    pub role: UserRole,
}

/// "Continue" on role selection. Requires a selection.
pub fn continue_with_role(selected: Option<UserRole>) -> Result<RegistrationParams, AuthError> {
    selected
        .map(|role| RegistrationParams { role })
        .ok_or(AuthError::NoRoleSelected)
}

/// Heading on the registration screen for a raw route parameter.
pub fn role_title(role: Option<&str>) -> &'static str {
    match role.and_then(|r| r.parse::<UserRole>().ok()) {
        Some(UserRole::Mother) => "Pregnant Mother",
        Some(UserRole::HealthWorker) => "Health Worker",
        Some(UserRole::Doctor) => "Doctor",
        Some(UserRole::Pharmacy) => "Pharmacy Operator",
        None => "User",
    }
}

// ═══════════════════════════════════════════
// Forms
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    #[serde(default)]
    pub role: Option<String>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub date_of_birth: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Checks run in order; the first failure is reported.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.full_name.is_empty()
            || self.email.is_empty()
            || self.phone.is_empty()
            || self.password.is_empty()
        {
            return Err(AuthError::MissingFields);
        }
        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AuthError::PasswordTooShort);
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════
// Simulated sign-in
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub session_id: Uuid,
    pub email: String,
    pub role: Option<UserRole>,
    pub role_title: String,
    pub signed_in_at: DateTime<Utc>,
    pub redirect_to: String,
}

impl AuthSession {
    fn new(email: &str, role: Option<&str>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            email: email.to_string(),
            role: role.and_then(|r| r.parse().ok()),
            role_title: role_title(role).to_string(),
            signed_in_at: Utc::now(),
            redirect_to: DASHBOARD_ROUTE.to_string(),
        }
    }
}

pub async fn sign_in(form: &LoginForm, delay: Duration) -> Result<AuthSession, AuthError> {
    form.validate()?;
    tokio::time::sleep(delay).await;
    tracing::info!("Simulated sign-in complete");
    Ok(AuthSession::new(&form.email, None))
}

pub async fn register(form: &RegistrationForm, delay: Duration) -> Result<AuthSession, AuthError> {
    form.validate()?;
    tokio::time::sleep(delay).await;
    tracing::info!(role = role_title(form.role.as_deref()), "Simulated registration complete");
    Ok(AuthSession::new(&form.email, form.role.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_registration() -> RegistrationForm {
        RegistrationForm {
            role: Some("mother".into()),
            full_name: "Ama Owusu".into(),
            email: "ama@example.com".into(),
            phone: "+233 20 000 0000".into(),
            date_of_birth: String::new(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        }
    }

    #[test]
    fn login_requires_both_fields() {
        let form = LoginForm {
            email: "ama@example.com".into(),
            password: String::new(),
        };
        assert_eq!(form.validate(), Err(AuthError::MissingCredentials));
        assert_eq!(LoginForm::default().validate(), Err(AuthError::MissingCredentials));
    }

    #[test]
    fn registration_checks_in_order() {
        let mut form = valid_registration();
        assert!(form.validate().is_ok());

        form.confirm_password = "other".into();
        form.phone.clear();
        assert_eq!(form.validate(), Err(AuthError::MissingFields));

        form.phone = "1".into();
        assert_eq!(form.validate(), Err(AuthError::PasswordMismatch));

        form.password = "abc".into();
        form.confirm_password = "abc".into();
        assert_eq!(form.validate(), Err(AuthError::PasswordTooShort));
    }

    #[test]
    fn date_of_birth_is_optional() {
        let form = valid_registration();
        assert!(form.date_of_birth.is_empty());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn role_titles() {
        assert_eq!(role_title(Some("mother")), "Pregnant Mother");
        assert_eq!(role_title(Some("health-worker")), "Health Worker");
        assert_eq!(role_title(Some("doctor")), "Doctor");
        assert_eq!(role_title(Some("pharmacy")), "Pharmacy Operator");
        assert_eq!(role_title(Some("admin")), "User");
        assert_eq!(role_title(None), "User");
    }

    #[test]
    fn continue_requires_selection() {
        assert_eq!(continue_with_role(None), Err(AuthError::NoRoleSelected));
        assert_eq!(
            continue_with_role(Some(UserRole::Doctor)).unwrap(),
            RegistrationParams { role: UserRole::Doctor }
        );
    }

    #[test]
    fn four_roles_offered() {
        let ids: Vec<_> = role_options().into_iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            vec![UserRole::Mother, UserRole::HealthWorker, UserRole::Doctor, UserRole::Pharmacy]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn sign_in_waits_then_redirects() {
        let form = LoginForm {
            email: "ama@example.com".into(),
            password: "pw".into(),
        };
        let started = tokio::time::Instant::now();
        let session = sign_in(&form, Duration::from_secs(2)).await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(session.redirect_to, DASHBOARD_ROUTE);
        assert_eq!(session.role_title, "User");
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_form_fails_without_delay() {
        let started = tokio::time::Instant::now();
        let err = sign_in(&LoginForm::default(), Duration::from_secs(2)).await.unwrap_err();
        assert_eq!(err, AuthError::MissingCredentials);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn register_carries_role() {
        let session = register(&valid_registration(), Duration::from_secs(2)).await.unwrap();
        assert_eq!(session.role, Some(UserRole::Mother));
        assert_eq!(session.role_title, "Pregnant Mother");
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_sign_in_never_completes() {
        let form = LoginForm {
            email: "a@b.c".into(),
            password: "pw".into(),
        };
        let result = tokio::time::timeout(Duration::from_millis(500), sign_in(&form, Duration::from_secs(2))).await;
        assert!(result.is_err());
    }
}
