//! Proposal Builder - software development proposals from questionnaire answers
//!
//! Answers collected by a multi-step wizard are enriched with display names,
//! scheduled across business days respecting phase dependencies, costed
//! against a rate card, narrated through Handlebars templates and rendered to
//! HTML or PDF.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
