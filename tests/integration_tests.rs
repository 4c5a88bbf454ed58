use agent_deck::{
    pacer_for, standard_factory,
    tools::{data_analyzer, CalculatorTool, DataAnalyzerTool, WebSearchTool},
    Agent, AgentStatus, AgentStep, DemoError, ExecutionPlan, FunctionFactory, PlannedTool, Tool,
    ToolReport, ToolRouter,
};
use serde_json::json;

fn quiet_agent(seed: u64) -> Agent {
    let pacer = pacer_for(false);
    Agent::new(standard_factory(pacer.clone(), Some(seed)), pacer).with_seed(seed)
}

fn routed(message: &str) -> Vec<String> {
    ToolRouter::new()
        .analyze(message)
        .tool_names()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_router_vocabulary() {
    assert_eq!(routed("search the latest news"), vec!["web_search"]);
    assert_eq!(routed("what is 4 * 9"), vec!["calculator"]);
    assert_eq!(routed("what's the weather in Paris"), vec!["api_caller"]);
    assert_eq!(
        routed("analyze the data and draw a chart"),
        vec!["code_executor", "data_analyzer"]
    );
    assert_eq!(
        routed("Find the stock price and calculate 5 + 5"),
        vec!["web_search", "calculator", "api_caller"]
    );
    assert!(routed("hello there").is_empty());
}

#[tokio::test]
async fn test_calculator_tool() {
    let calculator = CalculatorTool::new(pacer_for(false));

    let result = calculator
        .execute(json!({ "expression": "calculate 6 * 7" }))
        .await
        .unwrap();
    let report = ToolReport::from_value(&result);
    assert_eq!(report.summary.as_deref(), Some("Calculated: 6 * 7 = 42"));

    // A matched but unevaluable expression is an error report, not an Err
    let result = calculator
        .execute(json!({ "expression": "calculate 9 / 0" }))
        .await
        .unwrap();
    let report = ToolReport::from_value(&result);
    assert!(report.is_error());
    assert_eq!(report.error.as_deref(), Some("Calculation failed: Division by zero"));

    let result = calculator.execute(json!({ "expr": "1 + 1" })).await;
    assert!(matches!(result, Err(DemoError::Validation(_))));
}

#[tokio::test]
async fn test_function_factory() {
    let pacer = pacer_for(false);
    let mut factory = FunctionFactory::new();
    factory.register_tool(CalculatorTool::new(pacer.clone()));
    factory.register_tool(WebSearchTool::new(pacer, Some(3)));

    assert!(factory.has_function("calculator"));
    assert!(factory.has_function("web_search"));
    assert!(!factory.has_function("nonexistent"));
    assert_eq!(factory.display_name("web_search"), "Web Search");
    assert_eq!(factory.display_name("nonexistent"), "nonexistent");

    let definitions = factory.get_tool_definitions();
    assert_eq!(definitions.len(), 2);

    let result = factory
        .execute_function("calculator", json!({ "expression": "10 - 4" }))
        .await
        .unwrap();
    assert_eq!(result["summary"], "Calculated: 10 - 4 = 6");

    let err = factory
        .execute_function("nonexistent", json!({}))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "TOOL_NOT_FOUND");
}

#[tokio::test]
async fn test_data_analyzer_statistics() {
    let data = [2, 4, 4, 4, 5, 5, 7, 9];
    assert_eq!(data_analyzer::mean(&data), Some(5.0));
    assert_eq!(data_analyzer::median(&data), Some(4.5));
    assert_eq!(data_analyzer::std_dev(&data), Some(2.0));
    assert_eq!(data_analyzer::mean(&[]), None);

    let analyzer = DataAnalyzerTool::new(pacer_for(false), Some(11));
    let result = analyzer
        .execute(json!({ "intent": "analyze sales" }))
        .await
        .unwrap();
    let report = ToolReport::from_value(&result);
    assert_eq!(report.summary.as_deref(), Some("Data analysis completed"));
}

#[tokio::test]
async fn test_agent_turn_records_steps() {
    let mut agent = quiet_agent(5);
    let turn = agent.handle_message("calculate 3 + 4").await.unwrap();

    assert!(turn.reply.contains("✅ **Calculator**: Calculated: 3 + 4 = 7"));
    assert!(matches!(turn.steps.first(), Some(AgentStep::Task { .. })));
    assert!(matches!(turn.steps.last(), Some(AgentStep::FinalAnswer { .. })));
    assert_eq!(turn.action_count(), 1);
    assert!(turn.replay().contains("=== Agent Turn Trace ==="));
    assert_eq!(agent.status(), AgentStatus::Ready);
    assert_eq!(agent.conversation().len(), 2);
}

#[tokio::test]
async fn test_failed_tool_does_not_abort_turn() {
    let mut agent = quiet_agent(9);
    let plan = ExecutionPlan {
        tools: vec![
            PlannedTool {
                tool: "nonexistent".to_string(),
                params: json!({}),
            },
            PlannedTool {
                tool: "calculator".to_string(),
                params: json!({ "expression": "7 * 6" }),
            },
        ],
        reasoning: "manual plan".to_string(),
    };

    let turn = agent.handle_with_plan("7 * 6 please", plan).await.unwrap();

    assert_eq!(turn.outputs.len(), 2);
    assert!(turn.outputs[0].is_error());
    assert!(!turn.outputs[1].is_error());
    assert!(!turn.all_failed());
    assert!(turn.reply.contains("❌ **nonexistent**"));
    assert!(turn.reply.contains("💡 I suggest we"));
    assert!(turn.reply.contains("✅ **Calculator**: Calculated: 7 * 6 = 42"));
    assert_eq!(agent.status(), AgentStatus::Ready);
    assert_eq!(agent.insights().errors.stats().total_errors, 1);
}

#[tokio::test]
async fn test_seeded_agents_agree() {
    let mut first = quiet_agent(21);
    let mut second = quiet_agent(21);

    let a = first.handle_message("search latest rust news").await.unwrap();
    let b = second.handle_message("search latest rust news").await.unwrap();
    assert_eq!(a.reply, b.reply);
}

#[test]
fn test_reset_keeps_metrics() {
    let mut agent = quiet_agent(2);
    tokio_test::block_on(agent.handle_message("calculate 1 + 1")).unwrap();
    agent.reset();

    assert!(agent.conversation().is_empty());
    assert!(agent.memory().steps().is_empty());
    assert_eq!(
        agent
            .insights()
            .metrics
            .stats("calculator")
            .map(|s| s.counters.executions),
        Some(1)
    );
}
