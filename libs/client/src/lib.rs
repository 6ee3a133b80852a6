//! Typed access to the portfolio API plus the state models of the public
//! site and the admin panel.

pub mod admin;
mod client;
mod error;
pub mod presentation;
mod store;

pub use client::{AdminInfo, AdminStatus, AdminUser, Client, EventPayload};
pub use error::ClientError;
pub use store::LocalStore;
