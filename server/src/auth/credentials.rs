use super::crypto::{hash_password, verify_password};
use crate::config::ServerConfig;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    User,
    Admin,
}

pub type RoleSet = BTreeSet<Role>;

/// Username and password taken from an HTTP Basic `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// Keep passwords out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicAuthError {
    NotBasic,
    InvalidEncoding,
    MissingSeparator,
}

impl Credentials {
    /// Parse the value of an `Authorization: Basic <base64(user:pass)>` header.
    pub fn from_basic_header(value: &str) -> Result<Self, BasicAuthError> {
        let encoded = value
            .strip_prefix("Basic ")
            .ok_or(BasicAuthError::NotBasic)?;

        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|_| BasicAuthError::InvalidEncoding)?;
        let decoded = String::from_utf8(decoded).map_err(|_| BasicAuthError::InvalidEncoding)?;

        let (username, password) = decoded
            .split_once(':')
            .ok_or(BasicAuthError::MissingSeparator)?;

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// An authenticated caller, stored in request extensions by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub username: String,
    pub roles: RoleSet,
}

impl AuthUser {
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.roles.contains(role))
    }
}

/// Checks credentials and reports the caller's roles.
pub trait CredentialStore: Send + Sync {
    fn authenticate(&self, credentials: &Credentials) -> Option<AuthUser>;
}

struct StoredUser {
    password_hash: String,
    roles: RoleSet,
}

/// Fixed set of users with argon2-hashed passwords, held in memory.
pub struct StaticCredentials {
    users: HashMap<String, StoredUser>,
    /// Verified against when the username is unknown, so a miss costs as much
    /// as a wrong password.
    dummy_hash: String,
    insecure_hashing: bool,
}

impl StaticCredentials {
    pub fn new(insecure_hashing: bool) -> Result<Self, argon2::password_hash::Error> {
        Ok(Self {
            users: HashMap::new(),
            dummy_hash: hash_password("no-such-user", insecure_hashing)?,
            insecure_hashing,
        })
    }

    /// The built-in `user` (USER) and `admin` (USER, ADMIN) accounts.
    pub fn from_config(config: &ServerConfig) -> Result<Self, argon2::password_hash::Error> {
        Self::new(config.insecure_password_hashing)?
            .with_user("user", &config.user_password, [Role::User])?
            .with_user(
                "admin",
                &config.admin_password,
                [Role::User, Role::Admin],
            )
    }

    pub fn with_user(
        mut self,
        username: &str,
        password: &str,
        roles: impl IntoIterator<Item = Role>,
    ) -> Result<Self, argon2::password_hash::Error> {
        let password_hash = hash_password(password, self.insecure_hashing)?;
        self.users.insert(
            username.to_string(),
            StoredUser {
                password_hash,
                roles: roles.into_iter().collect(),
            },
        );
        Ok(self)
    }
}

impl CredentialStore for StaticCredentials {
    fn authenticate(&self, credentials: &Credentials) -> Option<AuthUser> {
        let Some(user) = self.users.get(&credentials.username) else {
            verify_password(&credentials.password, &self.dummy_hash);
            return None;
        };
        if !verify_password(&credentials.password, &user.password_hash) {
            return None;
        }
        Some(AuthUser {
            username: credentials.username.clone(),
            roles: user.roles.clone(),
        })
    }
}
