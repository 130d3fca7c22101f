//! Session token issuance/verification and credential handling.

pub mod middleware;
pub mod password;
pub mod token;

pub use middleware::{AppState, AuthSession};
pub use password::CredentialScheme;
pub use token::{Claims, SessionAuthority};
