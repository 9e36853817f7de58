//! Request handlers.

pub mod crud;
