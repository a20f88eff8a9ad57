//! End-to-end agent runs against stub servers and a scripted model.

#[path = "../common/mod.rs"]
mod common;

use common::{ScriptedModel, StubServer};
use mcp_agent_core::RuntimeConfig;
use mcp_agent_core::agent::{AgentRuntime, DUPLICATE_NOTICE, PROMPT_QUEUED_NOTICE};
use mcp_agent_core::model::{ModelTurn, ToolCall};
use mcp_agent_core::planner::{GREETING_ANSWER, PlanningMode};
use mcp_agent_core::registry::CapabilityRegistry;
use serde_json::json;
use std::sync::Arc;

fn research_server() -> StubServer {
    StubServer::new("research")
        .tools(&["search"])
        .reply("search", "AI adoption grew 40% in 2024")
        .prompt(json!({ "name": "report_template", "description": "Report layout" }))
}

async fn runtime(server: &StubServer, model: &ScriptedModel, config: RuntimeConfig) -> AgentRuntime {
    let registry = CapabilityRegistry::discover(vec![server.client()])
        .await
        .expect("registry builds");
    AgentRuntime::new(Arc::new(registry), Arc::new(model.clone()), config)
}

#[tokio::test]
async fn greeting_is_answered_without_entering_the_loop() {
    let server = research_server();
    let model = ScriptedModel::new(vec![], vec![]);
    let agent = runtime(&server, &model, RuntimeConfig::default()).await;

    let outcome = agent.run("hello").await.expect("run");

    assert!(outcome.plan.is_trivial());
    assert!(outcome.trace.is_empty());
    assert!(outcome.synthesis.system_instruction.is_none());
    assert_eq!(outcome.synthesis.user_message, GREETING_ANSWER);
    assert!(model.instructions.lock().await.is_empty());
    assert_eq!(server.count("tools/call").await, 0);
}

#[tokio::test]
async fn identical_calls_in_one_step_reach_the_server_once() {
    let server = research_server();
    let model = ScriptedModel::new(
        vec![ModelTurn::calls(vec![
            ToolCall::new("c1", "search", json!({ "q": "AI" })),
            ToolCall::new("c2", "search", json!({ "q": "AI" })),
        ])],
        vec![],
    );
    let agent = runtime(&server, &model, RuntimeConfig::default()).await;

    let outcome = agent.run("What happened with AI?").await.expect("run");

    assert_eq!(server.count("tools/call").await, 1);
    assert_eq!(outcome.dispatched, 1);

    let results = model.results.lock().await;
    assert_eq!(results[0][0].output, "AI adoption grew 40% in 2024");
    assert_eq!(results[0][1].call_id, "c2");
    assert!(results[0][1].output.contains(DUPLICATE_NOTICE));

    let step = &outcome.trace.steps()[0];
    assert_eq!(step.actions, vec!["search", "search(dup)"]);
}

#[tokio::test]
async fn template_fetch_shapes_synthesis_and_search_feeds_research() {
    let server = research_server();
    let model = ScriptedModel::new(
        vec![
            ModelTurn::calls(vec![ToolCall::new("c1", "get_prompt__report_template", json!({}))]),
            ModelTurn::calls(vec![ToolCall::new("c2", "search", json!({ "q": "trends" }))]),
        ],
        vec![],
    );
    let agent = runtime(&server, &model, RuntimeConfig::default()).await;

    let outcome = agent.run("Write a report on AI trends").await.expect("run");

    assert_eq!(
        outcome.synthesis.system_instruction.as_deref(),
        Some("Follow the report_template layout.")
    );
    let message = &outcome.synthesis.user_message;
    assert!(message.starts_with("Original request: Write a report on AI trends"));
    assert!(message.contains("OBSERVATION[search]: AI adoption grew 40% in 2024"));
    assert!(!message.contains("Follow the report_template layout."));

    let results = model.results.lock().await;
    assert_eq!(results[0][0].output, PROMPT_QUEUED_NOTICE);
    assert_eq!(server.count("prompts/get").await, 1);
    assert_eq!(server.count("tools/call").await, 1);
}

#[tokio::test]
async fn balanced_budget_caps_the_number_of_steps() {
    let server = research_server();
    let turns = (0..5)
        .map(|index| {
            ModelTurn::calls(vec![ToolCall::new(
                format!("c{index}"),
                "search",
                json!({ "q": format!("query {index}") }),
            )])
        })
        .collect();
    let model = ScriptedModel::new(
        turns,
        vec![r#"{"complexity":"simple","step_budget":2,"intent":"Quick lookup"}"#],
    );
    let config = RuntimeConfig {
        planning_mode: PlanningMode::Balanced,
        ..RuntimeConfig::default()
    };
    let agent = runtime(&server, &model, config).await;

    let outcome = agent.run("Find AI adoption numbers").await.expect("run");

    assert_eq!(outcome.plan.budget, 2);
    assert_eq!(outcome.trace.len(), 2);
    assert_eq!(server.count("tools/call").await, 2);
}

#[tokio::test]
async fn full_mode_reflection_can_end_the_run_early() {
    let server = research_server();
    let model = ScriptedModel::new(
        vec![
            ModelTurn::calls(vec![ToolCall::new("c1", "search", json!({ "q": "AI" }))]),
            ModelTurn::calls(vec![ToolCall::new("c2", "search", json!({ "q": "more" }))]),
        ],
        vec![
            r#"{"complexity":"complex","step_budget":5,"intent":"Survey","planned_steps":["search"]}"#,
            "Enough gathered. [GOAL_ACHIEVED]",
        ],
    );
    let config = RuntimeConfig {
        planning_mode: PlanningMode::Full,
        ..RuntimeConfig::default()
    };
    let agent = runtime(&server, &model, config).await;

    let outcome = agent.run("Survey AI").await.expect("run");

    assert_eq!(outcome.trace.len(), 1);
    assert!(outcome.trace.steps()[0].goal_achieved);
    assert_eq!(server.count("tools/call").await, 1);
}
