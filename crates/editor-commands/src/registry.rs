//! Command registry: command name -> handler, tagged with the focus scope it needs.
//!
//! The registry is built once (see [`CommandRegistry::builder`] and
//! [`CommandRegistry::doc_commands`]) and is immutable afterwards. Share it with `Arc` between
//! editor instances; the input-dispatch layer calls [`CommandRegistry::perform`] with whatever is
//! focused, and the focus decides through [`Focus`] whether it can serve the command's scope.

use crate::commands::{CommandError, CommandResult, DocCommand};
use crate::context::DocContext;
use crate::navigation;
use std::collections::BTreeMap;
use std::sync::Arc;

/// The context a command needs from the focused component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// A view showing an editable document.
    DocView,
}

/// A zero-argument command handler.
pub type Handler = Arc<dyn Fn(&mut DocContext<'_>) -> CommandResult + Send + Sync>;

/// Capability check performed by the registry before running a command.
pub trait Focus {
    /// The document context, if the focused component is a document view.
    fn doc_view(&mut self) -> Option<DocContext<'_>>;
}

#[derive(Clone)]
struct Entry {
    scope: Scope,
    handler: Handler,
}

/// Collects commands before freezing them into a [`CommandRegistry`].
#[derive(Default)]
pub struct RegistryBuilder {
    commands: BTreeMap<String, Entry>,
}

impl RegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a command.
    pub fn add(mut self, scope: Scope, name: impl Into<String>, handler: Handler) -> Self {
        self.commands.insert(name.into(), Entry { scope, handler });
        self
    }

    /// Register several commands for one scope; later entries replace earlier ones.
    pub fn extend(
        mut self,
        scope: Scope,
        commands: impl IntoIterator<Item = (String, Handler)>,
    ) -> Self {
        for (name, handler) in commands {
            self.commands.insert(name, Entry { scope, handler });
        }
        self
    }

    /// Freeze the registry.
    pub fn build(self) -> CommandRegistry {
        CommandRegistry {
            commands: self.commands,
        }
    }
}

/// An immutable name -> command mapping.
#[derive(Clone)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Entry>,
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.commands.len())
            .finish()
    }
}

impl CommandRegistry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The document-view commands: every [`DocCommand`] plus the generated navigation commands.
    pub fn doc_commands() -> Self {
        let statics = DocCommand::ALL.into_iter().map(|command| {
            let handler: Handler = Arc::new(move |ctx: &mut DocContext<'_>| command.execute(ctx));
            (command.name().to_string(), handler)
        });
        Self::builder()
            .extend(Scope::DocView, statics)
            .extend(Scope::DocView, navigation::commands())
            .build()
    }

    /// Handler registered under `name`.
    pub fn get(&self, name: &str) -> Option<&Handler> {
        self.commands.get(name).map(|entry| &entry.handler)
    }

    /// Scope of the command registered under `name`.
    pub fn scope(&self, name: &str) -> Option<Scope> {
        self.commands.get(name).map(|entry| entry.scope)
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Run a command against the focused component.
    ///
    /// Returns `Ok(false)` when the name is unknown or the focus cannot serve the command's
    /// scope. The document's undo group is closed after the handler, so one invocation is one
    /// undo step.
    pub fn perform(&self, name: &str, focus: &mut dyn Focus) -> Result<bool, CommandError> {
        let Some(entry) = self.commands.get(name) else {
            tracing::debug!(command = name, "unknown command");
            return Ok(false);
        };

        let context = match entry.scope {
            Scope::DocView => focus.doc_view(),
        };
        let Some(mut ctx) = context else {
            tracing::debug!(command = name, scope = ?entry.scope, "focus does not support scope");
            return Ok(false);
        };

        tracing::debug!(command = name, "perform");
        let result = (entry.handler)(&mut ctx);
        ctx.doc.end_undo_group();

        match result {
            Ok(()) => Ok(true),
            Err(err) => {
                tracing::error!(command = name, %err, "command failed");
                Err(err)
            }
        }
    }
}
