//! ShopSense companion - receipt sync and voice capture
//!
//! This crate provides the core functionality for syncing locally
//! scanned receipt images to the ShopSense backend and for running
//! voice capture sessions that turn streaming transcription into
//! chat queries.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core business logic, value objects, entities, and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (filesystem store, HTTP
//!   clients, desktop notifications, config storage)
//! - **CLI**: Command-line interface, argument parsing, and presenters

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
