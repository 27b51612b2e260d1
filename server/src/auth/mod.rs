mod credentials;
mod crypto;
mod middleware;

pub use credentials::{AuthUser, CredentialStore, Role, StaticCredentials};
pub use middleware::require_role;
