//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod alert_event_repo;
pub mod deal_repo;
pub mod profile_repo;
pub mod push_subscription_repo;
pub mod report_repo;
pub mod rule_repo;

pub use alert_event_repo::AlertEventRepo;
pub use deal_repo::DealRepo;
pub use profile_repo::ProfileRepo;
pub use push_subscription_repo::PushSubscriptionRepo;
pub use report_repo::ReportRepo;
pub use rule_repo::RuleRepo;
