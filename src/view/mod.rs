//! View models for the screens of the client.
//!
//! Each view owns the state a template renders and exposes one method per user
//! action. Network calls go through the services passed to those methods.

pub mod app;
pub mod auth;
pub mod timeline;

pub use app::{AppView, Screen};
pub use auth::{AuthForm, AuthMode, AuthView};
pub use timeline::{Key, KeyAction, TimelineView};

pub const GENERIC_ERROR: &str = "An error occurred";
