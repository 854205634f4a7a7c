//! # Kolmeya Tracker Library
//!
//! Core functionality of the Kolmeya tracker service: SMS dispatch with
//! tracking links, click recording, provider webhook intake and the
//! statistics dashboard.

pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod handlers;
pub mod links;
pub mod models;
pub mod normalization;
pub mod repositories;
pub mod server;
pub mod sms;
pub mod telemetry;
pub mod tracking;
pub use migration;
