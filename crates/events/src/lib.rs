//! Alert delivery infrastructure.
//!
//! - [`delivery`]: the [`PushSender`] capability and its web push and
//!   disabled implementations.
//! - [`AlertDispatcher`]: periodic task that delivers queued alert events
//!   to their users' push subscriptions.

pub mod delivery;
pub mod dispatch;

pub use delivery::web_push::{
    build_sender, DisabledPushSender, PushError, PushSender, PushTarget, VapidConfig,
    WebPushSender,
};
pub use dispatch::{AlertDispatcher, DispatchConfig, TickReport};
