/// Handles argument parsing and command dispatch.
pub mod cli;

/// Group configuration documents and template root discovery.
pub mod config;

/// Constants shared across the crate.
pub mod constants;

/// Defines custom error types.
pub mod error;

/// Extension traits for standard library types.
pub mod ext;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// MCP server exposing the operations as tools.
#[cfg(feature = "mcp")]
pub mod mcp;

/// Batch generation of a module's artifacts.
pub mod module;

/// Template rendering backends.
pub mod renderer;

/// Inline annotation rules and their extraction from JSON data.
pub mod rules;

/// Read access to a template root.
pub mod store;

/// The operations offered to callers.
pub mod tools;
