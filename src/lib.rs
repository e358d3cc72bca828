pub mod config;
pub mod dashboard;
pub mod error;
pub mod notice;
pub mod output;
pub mod presenter;
pub mod records;
pub mod source;
