//! # Agent Runtime
//!
//! Plans a run, drives the bounded call/observe loop against the registry
//! and assembles the [`SynthesisInput`] for the answer-generation step.
//!
//! Prompt-template fetches are routed apart from research observations: the
//! rendered template never enters the run history and instead becomes the
//! synthesis system instruction.

mod errors;
mod models;
mod runner;
mod runtime;


pub use errors::AgentError;
pub use models::{AgentOutcome, ReasoningStep, ReasoningTrace, SynthesisInput};
pub use runner::{
    AgentRuntime, CONTINUE_MARKER, DUPLICATE_NOTICE, GOAL_ACHIEVED_MARKER, PROMPT_QUEUED_NOTICE,
    fingerprint,
};
pub use runtime::{DispatchOutcome, coerce_arguments, flatten_prompt_messages};
