use crate::client::McpError;
use crate::model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Client(#[from] McpError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("model requested unknown tool '{0}'")]
    UnknownTool(String),
    #[error("model requested unknown prompt template '{0}'")]
    UnknownPrompt(String),
}
