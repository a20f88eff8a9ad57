//! Planning modes through the public planner API.

#[path = "../common/mod.rs"]
mod common;

use common::ScriptedModel;
use mcp_agent_core::planner::{
    FILLER_ANSWER, GREETING_ANSWER, MAX_STEPS, Planner, PlanningMode, clamp_budget,
};

const CAPABILITIES: &str = "TOOLS: search, fetch\n";

#[tokio::test]
async fn minimal_mode_answers_greetings_without_a_model_call() {
    let model = ScriptedModel::new(vec![], vec![]);
    let planner = Planner::new(PlanningMode::Minimal);

    for greeting in ["hi", "Hello!", "thanks", "heyyy"] {
        let plan = planner
            .plan(&model, greeting, CAPABILITIES)
            .await
            .expect("plan");
        assert!(plan.is_trivial(), "{greeting} should be trivial");
        assert_eq!(plan.direct_answer.as_deref(), Some(GREETING_ANSWER));
        assert_eq!(plan.budget, 0);
    }
    assert!(model.instructions.lock().await.is_empty());
}

#[tokio::test]
async fn minimal_mode_grants_the_full_budget_otherwise() {
    let model = ScriptedModel::new(vec![], vec![]);
    let plan = Planner::new(PlanningMode::Minimal)
        .plan(&model, "hi, what is the latest rust release?", CAPABILITIES)
        .await
        .expect("plan");

    assert!(!plan.is_trivial());
    assert_eq!(plan.budget, MAX_STEPS);
    assert!(plan.steps.is_empty());
}

#[tokio::test]
async fn balanced_mode_falls_back_on_prose() {
    let model = ScriptedModel::new(vec![], vec!["I think this needs a few searches."]);
    let plan = Planner::new(PlanningMode::Balanced)
        .plan(&model, "compare rust web frameworks", CAPABILITIES)
        .await
        .expect("plan");

    assert_eq!(plan.complexity, "moderate");
    assert_eq!(plan.budget, 4);
    assert_eq!(plan.intent, "compare rust web frameworks");
    assert!(plan.steps.is_empty());
    assert!(plan.direct_answer.is_none());
}

#[tokio::test]
async fn full_mode_fallback_carries_research_steps() {
    let model = ScriptedModel::new(vec![], vec!["no json here"]);
    let plan = Planner::new(PlanningMode::Full)
        .plan(&model, "survey vector databases", CAPABILITIES)
        .await
        .expect("plan");

    assert_eq!(plan.budget, 4);
    assert_eq!(
        plan.steps,
        vec![
            "Search for information",
            "Search for context",
            "Gather data points",
            "Synthesise findings"
        ]
    );
}

#[tokio::test]
async fn structured_reply_is_clamped_and_fenced_json_accepted() {
    let reply = "```json\n{\"complexity\":\"complex\",\"step_budget\":42,\"intent\":\"Deep survey\",\
                 \"planned_steps\":[\"a\",\"b\"]}\n```";
    let model = ScriptedModel::new(vec![], vec![reply]);
    let plan = Planner::new(PlanningMode::Full)
        .plan(&model, "question", CAPABILITIES)
        .await
        .expect("plan");

    assert_eq!(plan.budget, MAX_STEPS);
    assert_eq!(plan.complexity, "complex");
    assert_eq!(plan.intent, "Deep survey");
    assert_eq!(plan.steps, vec!["a", "b"]);
}

#[tokio::test]
async fn zero_budget_without_answer_gets_filler() {
    let model = ScriptedModel::new(vec![], vec![r#"{"complexity":"trivial","step_budget":0}"#]);
    let plan = Planner::new(PlanningMode::Balanced)
        .plan(&model, "ok", CAPABILITIES)
        .await
        .expect("plan");

    assert!(plan.is_trivial());
    assert_eq!(plan.direct_answer.as_deref(), Some(FILLER_ANSWER));
}

#[tokio::test]
async fn model_failure_propagates() {
    // No scripted completion: the model reports a request error.
    let model = ScriptedModel::new(vec![], vec![]);
    let result = Planner::new(PlanningMode::Balanced)
        .plan(&model, "anything", CAPABILITIES)
        .await;
    assert!(result.is_err());
}

#[test]
fn budgets_are_clamped_into_range() {
    assert_eq!(clamp_budget(-3), 0);
    assert_eq!(clamp_budget(7), 7);
    assert_eq!(clamp_budget(11), MAX_STEPS);
}

#[test]
fn modes_parse_from_legacy_names() {
    assert_eq!("short".parse::<PlanningMode>(), Ok(PlanningMode::Minimal));
    assert_eq!("Mid".parse::<PlanningMode>(), Ok(PlanningMode::Balanced));
    assert_eq!("long".parse::<PlanningMode>(), Ok(PlanningMode::Full));
    assert!("extreme".parse::<PlanningMode>().is_err());
}
