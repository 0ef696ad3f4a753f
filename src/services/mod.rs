//! Services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the login flow and input handling so route handlers
//! stay focused on request/response translation.

pub mod auth;
pub mod cpf;
