//! Webhook intake for forge deliveries: authentication, event-type
//! dispatch, and a uniform read interface over the event variants.

pub mod accessor;
pub mod auth;
pub mod config;
pub mod dispatch;
pub mod events;

pub use accessor::{Event, EventView};
pub use auth::{AuthError, Authenticated, Authenticator};
pub use config::{EventKind, HookConfig, Vocabulary};
pub use dispatch::{dispatch, Delivery};
