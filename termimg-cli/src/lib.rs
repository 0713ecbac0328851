// ABOUTME: Library exports for termimg CLI modules for testing and external use
// ABOUTME: Makes internal modules available to integration tests

pub mod attachments;
pub mod cli;
pub mod cli_output;
pub mod config;
pub mod settings;
