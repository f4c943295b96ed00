// graphprompt Configuration
// Edit this file to customize the prompt, then rebuild.

use crate::config::Config;

/// User configuration function
pub fn configure(config: &mut Config) {
    // Keybindings - line acceptance and exit
    config.bind("Enter", "confirm");
    config.bind("Esc", "cancel");
    config.bind("^G", "cancel");
    config.bind("^C", "quit");
    config.bind("^Q", "quit");

    // Keybindings - document actions
    config.bind("^R", "rebuild");
    config.bind("^A", "select-all");
    config.bind("^E", "connect-selection");

    // Settings
    config.set("document_title", "Main");
    config.set("log_filter", "graphprompt=info");

    // Manifest assemblies to scan for members
    config.assemblies.push("Engine.Core".to_string());
    config.assemblies.push("Engine.Math".to_string());

    // Never scan these namespaces
    config.exclude_namespaces.push("Engine.Internal".to_string());

    // Extra names for catalog entries
    config.alias_unit("log", "debug.log(object)");
    config.alias_unit("tick", "onupdate");
    config.alias_unit("start", "onstart");

    // Short verbs
    config.alias_command("u:", "unit:");
    config.alias_command("d:", "defaultvalue:");
    config.alias_command("v:", "vargraph:");
    config.alias_command("sv:", "setvargraph:");
    config.alias_command("sg:", "subgraph:");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_defaults() {
        let mut config = Config::default();
        configure(&mut config);
        assert_eq!(config.keybindings.get("Enter"), Some(&"confirm".to_string()));
        assert_eq!(config.keybindings.get("^G"), Some(&"cancel".to_string()));
        assert_eq!(config.keybindings.get("^E"), Some(&"connect-selection".to_string()));
        assert_eq!(config.get_string("document_title"), Some("Main"));
        assert!(config.assemblies.iter().any(|a| a == "Engine.Core"));
        assert!(config.command_aliases.iter().any(|a| a.from == "v:"));
    }
}
