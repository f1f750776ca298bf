//! Infrastructure adapters. Implement outbound ports.
//!
//! Catalog HTTP, Telegram Bot API, local storage. Map errors to DomainError.

pub mod catalog;
pub mod persistence;
pub mod telegram;
pub mod ui;
