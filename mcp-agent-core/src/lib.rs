//! # mcp-agent-core
//!
//! Connects a tool-calling model to one or more MCP servers over JSON-RPC,
//! discovers what each server offers, plans how much autonomous work to allow
//! and drives a bounded call/observe loop that ends in a synthesis input for
//! the final answer-generation step.
//!
//! ## Layers
//!
//! - [`infrastructure`] - JSON-RPC envelopes, HTTP transport, model collaborator contract
//! - [`application`] - protocol client, capability registry, planner, agent runtime
//! - [`config`] - TOML configuration and the runtime settings derived from it

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;


pub use application::{agent, client, planner, registry};
pub use config::{AppConfig, DebugOptions, RuntimeConfig, ServerConfig};
pub use domain::types;
pub use infrastructure::{model, rpc, transport};
