//! Users, roles and the `/auth/*` request/response payloads.

use serde::{Deserialize, Serialize};

/// Portal role of a signed-in user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Lecturer,
    Admin,
}

impl Role {
    /// Every role, in sidebar order.
    pub const ALL: [Role; 3] = [Role::Student, Role::Lecturer, Role::Admin];

    /// Wire name (also the URL prefix of the role's portal)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Lecturer => "lecturer",
            Self::Admin => "admin",
        }
    }

    /// Capitalised label for headings and badges
    pub fn label(&self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Lecturer => "Lecturer",
            Self::Admin => "Admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "lecturer" => Ok(Self::Lecturer),
            "admin" => Ok(Self::Admin),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// Returned when a role string is not one of `student`, `lecturer`, `admin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl std::fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

/// A user as returned by `/auth/me`, `/auth/login` and `/auth/users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Database id (`id` on list endpoints, `_id` on `/auth/me`)
    #[serde(default, alias = "_id")]
    pub id: String,

    pub email: String,

    #[serde(default)]
    pub name: String,

    pub role: Role,

    /// Student registration number, e.g. `ABC001-2345/2024`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lecturer_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl User {
    /// Minimal user built from an email and role (used when only token claims are known).
    pub fn from_claims(email: impl Into<String>, role: Role) -> Self {
        Self {
            id: String::new(),
            email: email.into(),
            name: String::new(),
            role,
            registration_number: None,
            lecturer_id: None,
            admin_id: None,
            phone: None,
            address: None,
            city: None,
            country: None,
            bio: None,
        }
    }

    /// Name if set, otherwise the email address.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }

    /// Upper-cased first letter of the display name, for avatars.
    pub fn initial(&self) -> String {
        self.display_name()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }

    /// The role-specific identifier (registration number, lecturer id or admin id).
    pub fn role_identifier(&self) -> Option<&str> {
        match self.role {
            Role::Student => self.registration_number.as_deref(),
            Role::Lecturer => self.lecturer_id.as_deref(),
            Role::Admin => self.admin_id.as_deref(),
        }
    }
}

/// `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Response of `/auth/login` and `/auth/google/signin`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Response of `/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeResponse {
    pub user: User,
}

/// `POST /auth/google/signin`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoogleSignInRequest {
    /// Credential issued by Google Identity Services
    pub token: String,
    pub role: Role,
}

/// `POST /auth/register/student`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StudentRegistration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub registration_number: String,
}

/// `POST /auth/register/lecturer` and `POST /auth/create/lecturer`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LecturerRegistration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub lecturer_id: String,
}

/// `POST /auth/register/admin` and `POST /auth/create/admin`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AdminRegistration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub admin_id: String,
}

/// `PUT /auth/profile`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    pub phone: String,
    pub country_code: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub bio: String,
}

impl ProfileUpdate {
    /// Pre-fill the form from the current user.
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            country_code: "+1".to_string(),
            address: user.address.clone().unwrap_or_default(),
            city: user.city.clone().unwrap_or_default(),
            country: user.country.clone().unwrap_or_default(),
            bio: user.bio.clone().unwrap_or_default(),
        }
    }
}

/// `POST /auth/notification-preferences`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub email_notifications: bool,
    pub login_alerts: bool,
    pub activity_updates: bool,
    pub news_and_updates: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email_notifications: true,
            login_alerts: true,
            activity_updates: true,
            news_and_updates: false,
        }
    }
}

/// `POST /auth/change-password`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

/// Generic `{"message": "..."}` acknowledgement.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Lecturer).unwrap(), "\"lecturer\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
        assert_eq!("Student".parse::<Role>().unwrap(), Role::Student);
        assert!("dean".parse::<Role>().is_err());
    }

    #[test]
    fn test_me_user_accepts_mongo_id() {
        let json = r#"{
            "_id": "65f0c0ffee",
            "email": "jane.doe@students.jkuat.ac.ke",
            "name": "Jane Doe",
            "role": "student",
            "registration_number": "ABC001-2345/2024",
            "created_at": "2024-01-01T10:00:00"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "65f0c0ffee");
        assert_eq!(user.role_identifier(), Some("ABC001-2345/2024"));
        assert_eq!(user.initial(), "J");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user = User::from_claims("lee@uni.ac.ke", Role::Lecturer);
        assert_eq!(user.display_name(), "lee@uni.ac.ke");
        assert_eq!(user.role_identifier(), None);
    }

    #[test]
    fn test_login_response_without_user() {
        let resp: LoginResponse = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(resp.access_token, "abc");
        assert!(resp.user.is_none());
    }

    #[test]
    fn test_profile_update_uses_camel_case() {
        let json = serde_json::to_value(ProfileUpdate::default()).unwrap();
        assert!(json.get("countryCode").is_some());
        let prefs = serde_json::to_value(NotificationPreferences::default()).unwrap();
        assert_eq!(prefs["newsAndUpdates"], false);
        assert_eq!(prefs["emailNotifications"], true);
    }
}
