//! Web push delivery with VAPID signing.
//!
//! [`PushSender`] is the capability the dispatcher depends on. Two
//! implementations exist: [`WebPushSender`], which encrypts the payload for
//! the subscription and posts it to the push service, and
//! [`DisabledPushSender`], which fails every attempt with
//! [`PushError::Disabled`] so the dispatcher can run without VAPID keys.

use std::sync::Arc;

use async_trait::async_trait;
use dealwatch_core::config::{non_empty, process_env, ConfigError};
use web_push::{
    ContentEncoding, IsahcWebPushClient, PartialVapidSignatureBuilder, SubscriptionInfo,
    VapidSignatureBuilder, WebPushClient, WebPushError, WebPushMessageBuilder,
};

/// Claims subject used when `VAPID_SUBJECT` is unset.
const DEFAULT_VAPID_SUBJECT: &str = "mailto:ops@example.com";

/// How long the push service should hold an undelivered message.
const MESSAGE_TTL_SECS: u32 = 24 * 60 * 60;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// VAPID key material.
#[derive(Debug, Clone)]
pub struct VapidConfig {
    /// URL-safe base64 private key. `None` disables web push.
    pub private_key: Option<String>,
    /// Public key handed to browsers; informational on the server side.
    pub public_key: Option<String>,
    /// `sub` claim, usually a `mailto:` address.
    pub subject: String,
}

impl VapidConfig {
    /// Load VAPID settings from the environment.
    ///
    /// | Env Var             | Default                  |
    /// |---------------------|--------------------------|
    /// | `VAPID_PRIVATE_KEY` | unset (push disabled)    |
    /// | `VAPID_PUBLIC_KEY`  | unset                    |
    /// | `VAPID_SUBJECT`     | `mailto:ops@example.com` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            private_key: non_empty(lookup, "VAPID_PRIVATE_KEY"),
            public_key: non_empty(lookup, "VAPID_PUBLIC_KEY"),
            subject: non_empty(lookup, "VAPID_SUBJECT")
                .unwrap_or_else(|| DEFAULT_VAPID_SUBJECT.to_string()),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.private_key.is_some()
    }
}

// ---------------------------------------------------------------------------
// Capability
// ---------------------------------------------------------------------------

/// One subscription's endpoint and client encryption keys.
#[derive(Debug, Clone, Copy)]
pub struct PushTarget<'a> {
    pub endpoint: &'a str,
    pub p256dh: &'a str,
    pub auth: &'a str,
}

/// Error type for push delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    /// No push capability is configured.
    #[error("Web push is not configured")]
    Disabled,

    /// The VAPID signature could not be produced.
    #[error("VAPID signing failed: {0}")]
    Vapid(WebPushError),

    /// The encrypted message could not be built (bad client keys, payload too large).
    #[error("Failed to build push message: {0}")]
    Message(WebPushError),

    /// The push service rejected or did not accept the message.
    #[error("Push delivery failed: {0}")]
    Delivery(WebPushError),
}

impl PushError {
    /// Whether this failure should count against the event's retry budget.
    ///
    /// A disabled sender never really attempted delivery.
    pub fn counts_as_attempt(&self) -> bool {
        !matches!(self, PushError::Disabled)
    }
}

/// Performs a single web push delivery attempt.
#[async_trait]
pub trait PushSender: Send + Sync {
    async fn send(&self, target: PushTarget<'_>, payload: &str) -> Result<(), PushError>;
}

// ---------------------------------------------------------------------------
// Implementations
// ---------------------------------------------------------------------------

/// Sender used when VAPID keys are absent: every attempt fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledPushSender;

#[async_trait]
impl PushSender for DisabledPushSender {
    async fn send(&self, _target: PushTarget<'_>, _payload: &str) -> Result<(), PushError> {
        Err(PushError::Disabled)
    }
}

/// Real web push sender backed by the `web-push` crate.
pub struct WebPushSender {
    client: IsahcWebPushClient,
    signer: PartialVapidSignatureBuilder,
    subject: String,
}

impl WebPushSender {
    /// Create a sender from a URL-safe base64 VAPID private key.
    pub fn new(private_key: &str, subject: impl Into<String>) -> Result<Self, PushError> {
        let signer =
            VapidSignatureBuilder::from_base64_no_sub(private_key, web_push::URL_SAFE_NO_PAD)
                .map_err(PushError::Vapid)?;
        let client = IsahcWebPushClient::new().map_err(PushError::Delivery)?;
        Ok(Self {
            client,
            signer,
            subject: subject.into(),
        })
    }
}

#[async_trait]
impl PushSender for WebPushSender {
    async fn send(&self, target: PushTarget<'_>, payload: &str) -> Result<(), PushError> {
        let subscription = SubscriptionInfo::new(target.endpoint, target.p256dh, target.auth);

        let mut sig_builder = self.signer.clone().add_sub_info(&subscription);
        sig_builder.add_claim("sub", self.subject.as_str());
        let signature = sig_builder.build().map_err(PushError::Vapid)?;

        let mut builder = WebPushMessageBuilder::new(&subscription);
        builder.set_ttl(MESSAGE_TTL_SECS);
        builder.set_payload(ContentEncoding::Aes128Gcm, payload.as_bytes());
        builder.set_vapid_signature(signature);
        let message = builder.build().map_err(PushError::Message)?;

        self.client
            .send(message)
            .await
            .map_err(PushError::Delivery)
    }
}

/// Select the sender for the given configuration.
///
/// Without a private key the dispatcher gets a [`DisabledPushSender`]; an
/// invalid key is an error so misconfiguration fails at startup.
pub fn build_sender(config: &VapidConfig) -> Result<Arc<dyn PushSender>, PushError> {
    match &config.private_key {
        Some(key) => {
            let sender = WebPushSender::new(key, config.subject.clone())?;
            tracing::info!(subject = %config.subject, "Web push sender enabled");
            Ok(Arc::new(sender))
        }
        None => {
            tracing::warn!("VAPID_PRIVATE_KEY not set, web push disabled");
            Ok(Arc::new(DisabledPushSender))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
