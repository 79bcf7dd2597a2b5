//! Generation state machine.
//!
//! ```text
//! Idle ─▶ ParsingFields ─▶ ParsingRelations ─▶ DerivingRules ─▶ RenderingArtifacts ─▶ Done
//!              │                 │                   │                  │
//!              └─────────────────┴───────────────────┴──────────────────┴──▶ Failed
//! ```

use std::fmt;

use serde::Serialize;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GenerationState {
    Idle,
    ParsingFields,
    ParsingRelations,
    DerivingRules,
    RenderingArtifacts,
    Done,
    Failed,
}

impl GenerationState {
    /// States that do work and may therefore fail.
    pub const fn is_working(self) -> bool {
        matches!(
            self,
            Self::ParsingFields
                | Self::ParsingRelations
                | Self::DerivingRules
                | Self::RenderingArtifacts
        )
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// The single forward successor, if any.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::ParsingFields),
            Self::ParsingFields => Some(Self::ParsingRelations),
            Self::ParsingRelations => Some(Self::DerivingRules),
            Self::DerivingRules => Some(Self::RenderingArtifacts),
            Self::RenderingArtifacts => Some(Self::Done),
            Self::Done | Self::Failed => None,
        }
    }

    pub fn can_transition_to(self, to: Self) -> bool {
        match to {
            Self::Failed => self.is_working(),
            _ => self.next() == Some(to),
        }
    }
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::ParsingFields => "parsing-fields",
            Self::ParsingRelations => "parsing-relations",
            Self::DerivingRules => "deriving-rules",
            Self::RenderingArtifacts => "rendering-artifacts",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Records the states a run has been through and rejects illegal moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTracker {
    trail: Vec<GenerationState>,
}

impl StageTracker {
    pub fn new() -> Self {
        Self {
            trail: vec![GenerationState::Idle],
        }
    }

    pub fn current(&self) -> GenerationState {
        self.trail
            .last()
            .copied()
            .unwrap_or(GenerationState::Idle)
    }

    /// # Errors
    ///
    /// `InvalidTransition` when `to` is not reachable from the current state.
    pub fn advance(&mut self, to: GenerationState) -> Result<(), DomainError> {
        let from = self.current();
        if !from.can_transition_to(to) {
            return Err(DomainError::InvalidTransition {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        self.trail.push(to);
        Ok(())
    }

    /// Move to `Failed` if the current state is a working one.
    pub fn fail(&mut self) {
        if self.current().is_working() {
            self.trail.push(GenerationState::Failed);
        }
    }

    pub fn trail(&self) -> &[GenerationState] {
        &self.trail
    }
}

impl Default for StageTracker {
    fn default() -> Self {
        Self::new()
    }
}
