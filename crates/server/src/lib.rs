// Notekeep Server Library
// Decision: Shared library for binaries (API server, OpenAPI export) and integration tests

// API routes and types (shared for OpenAPI generation)
pub mod api;

// Router assembly
pub mod app;
pub use app::{build_app, build_router_with_prefix};

// Authentication module
pub mod auth;

// Environment configuration
pub mod config;
pub use config::ServerConfig;

// Services layer
pub mod services;

// Storage layer
pub mod storage;

// OpenAPI spec generation
pub mod openapi;
