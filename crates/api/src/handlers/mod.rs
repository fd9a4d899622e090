pub mod alerts;
pub mod deals;
pub mod health;
pub mod profile;
pub mod push;
pub mod reports;
