//! Action registry
//!
//! Maps action names to extraction strategies. Registration needs
//! `&mut ActionRegistry`; queries share the registry behind an `Arc`, so
//! nothing can be registered while a query is running.

use crate::actions::{BlockCaptureAction, FnAction};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use switchlore_domain::{ActionError, ActionInput, ExtractionAction, FieldMap};
use thiserror::Error;

/// Generic block capture keyed on the section prefix
pub const CAPTURE_BLOCK_CONFIG: &str = "capture_block_config";

/// Interface stanza capture with attribute parsing
pub const CAPTURE_INTERFACE_CONFIG: &str = "capture_interface_config";

/// Alias of [`CAPTURE_INTERFACE_CONFIG`]
pub const CAPTURE_INTERFACES: &str = "capture_interfaces";

/// Name that selects template parsing; cannot be registered
pub const TEMPLATE_ACTION: &str = "parse";

/// Registry error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Action names must be non-empty
    #[error("Action name must not be empty")]
    EmptyName,

    /// Name already taken
    #[error("Action '{0}' is already registered")]
    Duplicate(String),

    /// Name reserved for template parsing
    #[error("Action name '{0}' is reserved")]
    Reserved(String),
}

/// Registry of named extraction actions
#[derive(Clone)]
pub struct ActionRegistry {
    actions: HashMap<String, Arc<dyn ExtractionAction>>,
}

impl ActionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Create a registry holding the built-in block capture actions
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let interfaces: Arc<dyn ExtractionAction> = Arc::new(BlockCaptureAction::interface_config());

        registry
            .actions
            .insert(CAPTURE_BLOCK_CONFIG.to_string(), Arc::new(BlockCaptureAction::block_config()));
        registry
            .actions
            .insert(CAPTURE_INTERFACE_CONFIG.to_string(), Arc::clone(&interfaces));
        registry.actions.insert(CAPTURE_INTERFACES.to_string(), interfaces);
        registry
    }

    /// Register a new action
    ///
    /// Fails when the name is empty, reserved, or already taken. Use
    /// [`replace`](Self::replace) to swap out an existing action.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        action: Arc<dyn ExtractionAction>,
    ) -> Result<(), RegistryError> {
        let name = check_name(name.into())?;
        if self.actions.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        self.actions.insert(name, action);
        Ok(())
    }

    /// Register a closure as an action
    pub fn register_fn<F>(&mut self, name: impl Into<String>, f: F) -> Result<(), RegistryError>
    where
        F: Fn(&ActionInput<'_>) -> Result<Vec<FieldMap>, ActionError> + Send + Sync + 'static,
    {
        self.register(name, Arc::new(FnAction::new(f)))
    }

    /// Register or overwrite an action, returning the previous one
    pub fn replace(
        &mut self,
        name: impl Into<String>,
        action: Arc<dyn ExtractionAction>,
    ) -> Result<Option<Arc<dyn ExtractionAction>>, RegistryError> {
        let name = check_name(name.into())?;
        Ok(self.actions.insert(name, action))
    }

    /// Look up an action by exact name
    pub fn get(&self, name: &str) -> Option<Arc<dyn ExtractionAction>> {
        self.actions.get(name).cloned()
    }

    /// Whether an action is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

fn check_name(name: String) -> Result<String, RegistryError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RegistryError::EmptyName);
    }
    if trimmed == TEMPLATE_ACTION {
        return Err(RegistryError::Reserved(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.names())
            .finish()
    }
}
