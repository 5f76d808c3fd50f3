//! AI assistant catalog

use serde::{Deserialize, Serialize};

/// One supported AI assistant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AgentConfig {
    /// Identifier used on the command line and in asset names
    pub key: String,

    /// Display name
    pub name: String,

    /// Folder the template installs the agent's files into
    pub folder: String,

    /// Where to get the agent's CLI tool
    #[serde(default)]
    pub install_url: Option<String>,

    /// Whether the agent is driven by a command-line tool (vs. an IDE)
    #[serde(default)]
    pub requires_cli: bool,
}

/// Ordered list of supported assistants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentCatalog {
    agents: Vec<AgentConfig>,
}

impl AgentCatalog {
    pub fn new(agents: Vec<AgentConfig>) -> Self {
        Self { agents }
    }

    pub fn get(&self, key: &str) -> Option<&AgentConfig> {
        self.agents.iter().find(|a| a.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.agents.iter().map(|a| a.key.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgentConfig> {
        self.agents.iter()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> AgentCatalog {
        AgentCatalog::new(vec![
            AgentConfig {
                key: "copilot".into(),
                name: "GitHub Copilot".into(),
                folder: ".github/".into(),
                install_url: None,
                requires_cli: false,
            },
            AgentConfig {
                key: "claude".into(),
                name: "Claude Code".into(),
                folder: ".claude/".into(),
                install_url: Some("https://docs.anthropic.com/en/docs/claude-code/setup".into()),
                requires_cli: true,
            },
        ])
    }

    #[test]
    fn test_lookup_preserves_order() {
        let catalog = catalog();
        assert_eq!(catalog.keys(), vec!["copilot", "claude"]);
        assert!(catalog.get("claude").unwrap().requires_cli);
        assert!(!catalog.contains("vim"));
    }

    #[test]
    fn test_deserialize_with_optional_fields() {
        let yaml = r#"
agents:
  - key: roo
    name: Roo Code
    folder: .roo/
"#;
        let catalog: AgentCatalog = serde_yaml_ng::from_str(yaml).unwrap();
        let roo = catalog.get("roo").unwrap();
        assert_eq!(roo.install_url, None);
        assert!(!roo.requires_cli);
    }
}
