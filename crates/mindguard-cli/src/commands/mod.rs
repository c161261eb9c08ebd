pub mod ask;
pub mod checkin;
pub mod config;
pub mod history;
pub mod streak;
