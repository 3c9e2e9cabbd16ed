//! Tool implementations for tidydesk.
//!
//! Three capabilities drive the organizing loop: listing a directory tree,
//! drafting a reorganization plan, and generating the script that applies
//! the plan. The latter two make their own model calls through the shared
//! `Provider` trait.

pub mod draft_plan;
pub mod generate_script;
pub mod list_directory;

#[cfg(test)]
pub(crate) mod test_support;

pub use draft_plan::PlanDrafter;
pub use generate_script::ScriptGenerator;
pub use list_directory::DirectoryLister;

use std::sync::Arc;
use tidydesk_config::AppConfig;
use tidydesk_core::provider::Provider;
use tidydesk_core::tool::ToolRegistry;

/// Create the standard organizing registry.
///
/// The plan drafter shares the loop's provider; script generation gets its
/// own provider so it can carry different model settings (extended thinking).
pub fn organizer_registry(
    planner_provider: Arc<dyn Provider>,
    script_provider: Arc<dyn Provider>,
    config: &AppConfig,
) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(DirectoryLister::new()));
    registry.register(Box::new(PlanDrafter::new(
        planner_provider,
        config.planner.model.clone(),
        config.planner.max_tokens,
    )));
    registry.register(Box::new(ScriptGenerator::new(
        script_provider,
        config.script.model.clone(),
        config.script.max_tokens,
    )));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StaticProvider;

    #[test]
    fn organizer_registry_has_all_three_tools() {
        let provider = Arc::new(StaticProvider::new("ok"));
        let registry = organizer_registry(provider.clone(), provider, &AppConfig::default());

        let mut names = registry.names();
        names.sort();
        assert_eq!(names, vec!["draft_plan", "generate_script", "list_directory"]);
    }
}
