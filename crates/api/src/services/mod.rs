//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Registration (customers and admins) and password login
//! - `products` - Product catalogue management
//! - `transactions` - Bank-transfer transactions and their status
//!
//! Services own their repository through a trait object, so tests swap in
//! `mockall` mocks and the HTTP layer never touches SQL.

pub mod auth;
pub mod products;
pub mod transactions;

pub use auth::{AuthError, AuthService};
pub use products::{ProductError, ProductService};
pub use transactions::{TransactionError, TransactionService};
