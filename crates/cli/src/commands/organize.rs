//! `tidydesk organize` — run the organizing agent against a request.

use std::sync::Arc;

use tidydesk_agent::AgentLoop;
use tidydesk_config::AppConfig;
use tidydesk_core::event::{DomainEvent, EventBus};
use tidydesk_core::message::{Conversation, Message};
use tidydesk_core::provider::Provider;
use tidydesk_providers::AnthropicProvider;
use tracing::debug;

pub async fn run(request: String, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for API key early — give a clear error
    let Some(api_key) = config.api_key.clone() else {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    export ANTHROPIC_API_KEY='sk-ant-...'");
        eprintln!("    export TIDYDESK_API_KEY='sk-ant-...'   (generic)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    };

    debug!(
        model = %config.model,
        planner_model = %config.planner.model,
        script_model = %config.script.model,
        "Loaded configuration"
    );

    // The loop and the planner share a provider; the script generator gets
    // its own instance so it can carry the extended-thinking budget.
    let provider: Arc<dyn Provider> = Arc::new(AnthropicProvider::new(api_key.clone()));
    let script_provider: Arc<dyn Provider> = if config.script.thinking_budget > 0 {
        Arc::new(
            AnthropicProvider::new(api_key).with_extended_thinking(config.script.thinking_budget),
        )
    } else {
        Arc::new(AnthropicProvider::new(api_key))
    };

    let tools = Arc::new(tidydesk_tools::organizer_registry(
        provider.clone(),
        script_provider,
        &config,
    ));

    let event_bus = Arc::new(EventBus::default());

    // In verbose runs, echo tool activity as it happens
    if verbose {
        let mut rx = event_bus.subscribe();
        tokio::spawn(async move {
            while let Ok(event) = rx.recv().await {
                match event.as_ref() {
                    DomainEvent::ToolExecuted {
                        tool_name,
                        success,
                        duration_ms,
                        ..
                    } => {
                        let outcome = if *success { "ok" } else { "failed" };
                        eprintln!("  [tool] {tool_name}: {outcome} ({duration_ms}ms)");
                    }
                    DomainEvent::PlanRecorded { plan_chars, .. } => {
                        eprintln!("  [plan] recorded ({plan_chars} chars)");
                    }
                    _ => {}
                }
            }
        });
    }

    let agent = AgentLoop::new(
        provider,
        &config.model,
        config.temperature,
        tools,
        event_bus,
    )
    .with_max_tokens(config.max_tokens)
    .with_max_turns(config.max_turns);

    let mut conv = Conversation::new();
    conv.push(Message::user(&request));

    eprint!("  Thinking...");
    let reply = agent.run(&mut conv).await?;
    eprint!("\r             \r");

    println!("{reply}");

    // A drafted plan is worth keeping; echo it under a separator so the
    // user can save it.
    if let Some(plan) = &conv.plan {
        println!();
        println!("  ───────── reorganization plan ─────────");
        println!("{plan}");
    }

    Ok(())
}
