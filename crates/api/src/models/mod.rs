//! Domain models and request payloads.

pub mod product;
pub mod requests;
pub mod session;
pub mod transaction;
pub mod user;

pub use product::{Product, ProductFields};
pub use session::{CurrentUser, keys as session_keys};
pub use transaction::{NewTransaction, Transaction};
pub use user::{NewUser, User};
