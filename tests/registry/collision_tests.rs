//! Multi-server registry: first registration wins and every later duplicate
//! is recorded as a collision.

#[path = "../common/mod.rs"]
mod common;

use common::StubServer;
use mcp_agent_core::registry::{CapabilityKind, CapabilityRegistry, Collision, RegistryError};
use serde_json::json;

#[tokio::test]
async fn duplicate_tool_routes_to_first_server() {
    let first = StubServer::new("first")
        .tools(&["search", "fetch"])
        .reply("search", "from first");
    let second = StubServer::new("second")
        .tools(&["search", "translate"])
        .reply("search", "from second")
        .reply("translate", "bonjour");

    let registry = CapabilityRegistry::discover(vec![first.client(), second.client()])
        .await
        .expect("registry builds");

    assert_eq!(
        registry.tool_names().collect::<Vec<_>>(),
        vec!["search", "fetch", "translate"]
    );
    assert_eq!(
        registry.collisions(),
        &[Collision {
            kind: CapabilityKind::Tool,
            name: "search".into(),
            kept: "first".into(),
            dropped: "second".into(),
        }]
    );

    let output = registry
        .call_tool("search", json!({ "query": "mcp" }))
        .await
        .expect("routed call");
    assert_eq!(output, "from first");
    assert_eq!(first.count("tools/call").await, 1);
    assert_eq!(second.count("tools/call").await, 0);

    let translated = registry
        .call_tool("translate", json!({}))
        .await
        .expect("second server tool");
    assert_eq!(translated, "bonjour");
}

#[tokio::test]
async fn prompts_and_resources_collide_independently_of_tools() {
    let first = StubServer::new("first")
        .prompt(json!({ "name": "report" }))
        .resource("file:///shared.txt");
    let second = StubServer::new("second")
        .tools(&["report"])
        .prompt(json!({ "name": "report" }))
        .resource("file:///shared.txt");

    let registry = CapabilityRegistry::discover(vec![first.client(), second.client()])
        .await
        .expect("registry builds");

    let kinds: Vec<_> = registry
        .collisions()
        .iter()
        .map(|collision| collision.kind)
        .collect();
    assert_eq!(kinds, vec![CapabilityKind::Prompt, CapabilityKind::Resource]);
    assert_eq!(registry.tool_owner("report").map(|owner| owner.name()), Some("second"));
    assert_eq!(registry.prompt_owner("report").map(|owner| owner.name()), Some("first"));
    assert_eq!(
        registry.resource_owner("file:///shared.txt").map(|owner| owner.name()),
        Some("first")
    );
}

#[tokio::test]
async fn advertised_definitions_include_one_fetcher_per_template() {
    let server = StubServer::new("docs")
        .tools(&["search"])
        .prompt(json!({
            "name": "brief",
            "description": "Two paragraph brief",
            "arguments": [{ "name": "topic", "required": true }]
        }));

    let registry = CapabilityRegistry::discover(vec![server.client()])
        .await
        .expect("registry builds");

    let names: Vec<_> = registry
        .tool_definitions()
        .into_iter()
        .map(|definition| definition.name)
        .collect();
    assert_eq!(names, vec!["search", "get_prompt__brief"]);
    assert_eq!(
        registry.capability_summary(),
        "TOOLS: search\nPROMPT TEMPLATES: brief\n"
    );
}

#[tokio::test]
async fn unknown_names_are_rejected_before_reaching_a_server() {
    let server = StubServer::new("general").tools(&["search"]);
    let registry = CapabilityRegistry::discover(vec![server.client()])
        .await
        .expect("registry builds");

    let err = registry
        .call_tool("nope", json!({}))
        .await
        .expect_err("unknown tool");
    assert!(matches!(err, RegistryError::UnknownTool(name) if name == "nope"));
    assert!(matches!(
        registry.read_resource("file:///missing").await,
        Err(RegistryError::UnknownResource(_))
    ));
    assert_eq!(server.count("tools/call").await, 0);
}
