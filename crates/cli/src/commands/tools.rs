//! `tidydesk tools` — list the registered capabilities.

use std::sync::Arc;

use tidydesk_config::AppConfig;
use tidydesk_core::provider::Provider;
use tidydesk_providers::AnthropicProvider;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Listing descriptors never calls the API, so a missing key is fine here
    let api_key = config.api_key.clone().unwrap_or_default();
    let provider: Arc<dyn Provider> = Arc::new(AnthropicProvider::new(api_key));
    let registry = tidydesk_tools::organizer_registry(provider.clone(), provider, &config);

    let mut definitions = registry.definitions();
    definitions.sort_by(|a, b| a.name.cmp(&b.name));

    println!("🧰 Registered capabilities");
    println!("==========================");
    println!();

    for def in definitions {
        println!("  {}", def.name);
        println!("      {}", def.description);
        if let Some(properties) = def.parameters.get("properties").and_then(|p| p.as_object()) {
            let required: Vec<&str> = def
                .parameters
                .get("required")
                .and_then(|r| r.as_array())
                .map(|r| r.iter().filter_map(|v| v.as_str()).collect())
                .unwrap_or_default();

            let mut names: Vec<&String> = properties.keys().collect();
            names.sort();
            for name in names {
                let marker = if required.contains(&name.as_str()) {
                    " (required)"
                } else {
                    ""
                };
                println!("      · {name}{marker}");
            }
        }
        println!();
    }

    Ok(())
}
