//! Authentication: password hashing, registration/login and sessions.
//!
//! HTTP handlers authenticate through the extractors in [`middleware`]:
//!
//! ```text
//! Authorization: Bearer <token> ─► SessionStore::resolve ─► UserDirectory::get ─► SessionUser
//! ```

pub mod middleware;
pub mod password;
pub mod provider;
pub mod sessions;

pub use middleware::{BearerToken, SessionUser};
pub use password::PasswordHashing;
pub use provider::AuthProvider;
pub use sessions::{Session, SessionStore};
