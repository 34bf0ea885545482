pub mod claims;
pub mod cookies;
pub mod hosted;
pub mod store;

pub use claims::{Claims, ResolvedUser};
pub use cookies::{RequestCookies, SessionCookie};
pub use store::{EstablishedSession, SessionRefresh, SessionStore, SessionStoreError};

#[cfg(test)]
pub use store::MockSessionStore;
