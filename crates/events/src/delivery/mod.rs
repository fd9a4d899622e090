//! External delivery channels for alert notifications.

pub mod web_push;
