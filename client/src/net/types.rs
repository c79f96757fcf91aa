//! Wire DTOs shared with the Yoon-Bi backend.
//!
//! DESIGN
//! ======
//! Field names mirror the backend JSON (French camelCase keys). Anything read
//! from the network or from browser storage goes through these types so the
//! rest of the client never inspects raw JSON structurally.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Role attached to a platform account (`typeUtilisateur`).
///
/// Unrecognized role strings are preserved in `Other` so they parse cleanly
/// and are rejected by the admin checks instead of failing deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    Admin,
    Client,
    Chauffeur,
    Other(String),
}

impl UserRole {
    /// Wire representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "ADMIN",
            Self::Client => "CLIENT",
            Self::Chauffeur => "CHAUFFEUR",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for UserRole {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "ADMIN" => Self::Admin,
            "CLIENT" => Self::Client,
            "CHAUFFEUR" => Self::Chauffeur,
            _ => Self::Other(raw),
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

/// The authenticated principal as returned by the login endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawUser")]
pub struct User {
    /// Account identifier: `id`, else the document `_id`.
    pub id: String,
    pub email: String,
    pub type_utilisateur: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prenom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actif: Option<bool>,
}

/// Wire shape of [`User`]. The backend may send `id`, `_id` or both.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUser {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    document_id: Option<String>,
    email: String,
    type_utilisateur: UserRole,
    #[serde(default)]
    prenom: Option<String>,
    #[serde(default)]
    nom: Option<String>,
    #[serde(default)]
    photo: Option<String>,
    #[serde(default)]
    tel: Option<String>,
    #[serde(default)]
    actif: Option<bool>,
}

impl TryFrom<RawUser> for User {
    type Error = String;

    fn try_from(raw: RawUser) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .filter(|id| !id.is_empty())
            .or(raw.document_id.filter(|id| !id.is_empty()))
            .ok_or_else(|| "user has neither `id` nor `_id`".to_owned())?;
        Ok(Self {
            id,
            email: raw.email,
            type_utilisateur: raw.type_utilisateur,
            prenom: raw.prenom,
            nom: raw.nom,
            photo: raw.photo,
            tel: raw.tel,
            actif: raw.actif,
        })
    }
}

impl User {
    /// Whether this principal may use the admin dashboard.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.type_utilisateur == UserRole::Admin
    }

    /// Name shown in the shell header: first + last name, else the email.
    #[must_use]
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.prenom.as_deref(), self.nom.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() { self.email.clone() } else { parts.join(" ") }
    }
}

/// Body of `POST /auth/login`. Exactly one of `email` / `tel` is set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,
    pub mot_de_passe: String,
}

impl LoginRequest {
    /// Choose the `email` key when the identifier contains `@`, `tel` otherwise.
    #[must_use]
    pub fn from_identifier(identifier: &str, password: &str) -> Self {
        let identifier = identifier.to_owned();
        let (email, tel) = if identifier.contains('@') { (Some(identifier), None) } else { (None, Some(identifier)) };
        Self { email, tel, mot_de_passe: password.to_owned() }
    }
}

/// Raw login response. Every field is optional on the wire; the login flow
/// decides which combinations count as success.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub token: Option<String>,
    /// Kept untyped until password-bearing keys have been stripped.
    #[serde(default)]
    pub user: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}
