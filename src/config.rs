// Copyright (c) 2026 voltctl contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration persistence for voltctl
//!
//! Stores named "stacks" (controller endpoint bundles) in a config file.
//! All voltctl data lives under ~/.voltctl/:
//! - ~/.voltctl/config.yaml - stacks and the current selection

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Fallback northbound endpoint when no stack is configured.
pub const DEFAULT_SERVER: &str = "http://localhost:8181";

/// Get the base voltctl directory (~/.voltctl/)
pub fn base_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|p| p.join(".voltctl"))
        .context("Could not determine home directory")
}

/// One named bundle of endpoint configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stack {
    pub name: String,
    /// Controller northbound endpoint, e.g. "http://voltha.local:8181"
    pub server: String,
    /// Kafka bootstrap endpoint for the event stream
    #[serde(default)]
    pub kafka: String,
    /// KV store endpoint
    #[serde(default)]
    pub kv_store: String,
}

/// voltctl configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Name of the stack used when no --server/--stack override is given
    #[serde(default)]
    pub current_stack: String,
    #[serde(default)]
    pub stacks: Vec<Stack>,
}

impl Config {
    /// Load config from disk, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Get the config file path (~/.voltctl/config.yaml)
    pub fn config_path() -> Result<PathBuf> {
        Ok(base_dir()?.join("config.yaml"))
    }

    pub fn stack(&self, name: &str) -> Option<&Stack> {
        self.stacks.iter().find(|s| s.name == name)
    }

    /// The stack selected by `current_stack`, if any.
    pub fn current_stack(&self) -> Option<&Stack> {
        self.stack(&self.current_stack)
    }

    /// Add or replace a stack by name.
    pub fn upsert_stack(&mut self, stack: Stack) {
        match self.stacks.iter_mut().find(|s| s.name == stack.name) {
            Some(existing) => *existing = stack,
            None => self.stacks.push(stack),
        }
    }

    /// Remove a stack by name; clears the current selection if it pointed
    /// at the removed stack.
    pub fn remove_stack(&mut self, name: &str) -> Result<()> {
        let before = self.stacks.len();
        self.stacks.retain(|s| s.name != name);
        if self.stacks.len() == before {
            return Err(anyhow!("stack '{}' not found", name));
        }
        if self.current_stack == name {
            self.current_stack.clear();
        }
        Ok(())
    }

    /// Select the named stack as current.
    pub fn use_stack(&mut self, name: &str) -> Result<()> {
        if self.stack(name).is_none() {
            return Err(anyhow!("stack '{}' not found", name));
        }
        self.current_stack = name.to_string();
        Ok(())
    }

    /// Resolve the controller endpoint: explicit flag wins, then a named
    /// stack override, then the current stack, then the built-in default.
    pub fn resolve_server(&self, flag: Option<&str>, stack_flag: Option<&str>) -> Result<String> {
        if let Some(server) = flag {
            return Ok(server.to_string());
        }
        if let Some(name) = stack_flag {
            let stack = self
                .stack(name)
                .ok_or_else(|| anyhow!("stack '{}' not found", name))?;
            return Ok(stack.server.clone());
        }
        Ok(self
            .current_stack()
            .map(|s| s.server.clone())
            .unwrap_or_else(|| DEFAULT_SERVER.to_string()))
    }
}
