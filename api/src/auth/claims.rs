use serde::{Deserialize, Serialize};

/// Platform-wide role carried in the token.
///
/// Variants are declared lowest privilege first so the derived ordering
/// matches the hierarchy: `Student < Tutor < Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Tutor,
    Admin,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
