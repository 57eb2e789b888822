//! Injected confirmation capability.
//!
//! The controller never blocks on a dialog itself; it asks a [`Confirmer`]
//! and continues with the answer.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

/// What the user is being asked to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmPrompt {
    /// "Add all" would place more widgets than the configured threshold.
    AddAllWidgets { count: usize },
    /// Leaving edit mode would throw away unsaved changes.
    DiscardChanges,
    /// The host is navigating away with unsaved changes.
    LeaveWithUnsavedChanges,
}

impl ConfirmPrompt {
    /// Text shown in the confirmation dialog.
    pub fn message(&self) -> String {
        match self {
            Self::AddAllWidgets { count } => {
                format!("Add {count} widgets to the dashboard?")
            }
            Self::DiscardChanges => "Discard unsaved dashboard changes?".to_string(),
            Self::LeaveWithUnsavedChanges => {
                "You have unsaved dashboard changes. Leave anyway?".to_string()
            }
        }
    }
}

/// Asks the user a yes/no question.
#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}

#[async_trait]
impl<T: Confirmer + ?Sized> Confirmer for Arc<T> {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        (**self).confirm(prompt).await
    }
}

/// A confirmer that always gives the same answer and counts how often it
/// was asked. Used for headless hosts and tests.
#[derive(Debug, Default)]
pub struct StaticConfirmer {
    answer: bool,
    asked: AtomicUsize,
}

impl StaticConfirmer {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: AtomicUsize::new(0),
        }
    }

    pub fn accepting() -> Self {
        Self::new(true)
    }

    pub fn declining() -> Self {
        Self::new(false)
    }

    /// Number of prompts answered so far.
    pub fn asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Confirmer for StaticConfirmer {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(prompt = %prompt.message(), answer = self.answer, "Confirmation requested");
        self.answer
    }
}
