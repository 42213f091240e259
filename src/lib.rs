//! P1 Control Panel - terminal dashboard for a P1 backend
//!
//! This library polls the backend's live-health, summary and recent-jobs
//! endpoints and renders the results as a terminal dashboard.

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod logging;
