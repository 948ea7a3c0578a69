//! Car Dealer Lead Processing API Library
//!
//! Ingests sales leads for a car dealership, validates them, enriches them
//! with external geographic/customer data, scores them, and routes them to a
//! salesperson or manager. Intake acknowledges a batch synchronously; each
//! lead then runs through an independent background pipeline
//! (validate -> enrich -> score -> route -> persist).
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `enrichment_client`: Client for the external enrichment service.
//! - `errors`: Error handling types.
//! - `event_log`: Structured per-stage pipeline event log.
//! - `handlers`: HTTP request handlers and shared state.
//! - `models`: Core data models.
//! - `pipeline`: Per-lead pipeline orchestrator.
//! - `reference_data`: Static branch and car-model tables.
//! - `routing`: Score-to-tier routing and assignment.
//! - `scoring`: Lead scoring.
//! - `storage`: Processed-lead persistence sink.
//! - `validation`: Lead validation rules.

pub mod config;
pub mod enrichment_client;
pub mod errors;
pub mod event_log;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod reference_data;
pub mod routing;
pub mod scoring;
pub mod storage;
pub mod validation;
