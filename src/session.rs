//! Session controller: sole owner of the current result, view and checklist state.
//!
//! Every model request is tagged with a sequence number. A completion is applied
//! only while its ticket is still the latest one issued for that request kind,
//! so a superseded response can never overwrite newer state.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::clients::GenerativeModel;
use crate::dashboard::{Dashboard, compose_dashboard};
use crate::error::{MandalaError, Result};
use crate::models::{ChecklistItem, MandalaResult};
use crate::prompts::{RequestKind, build_checklist_prompt, build_mandala_prompt};
use crate::responses::{parse_checklist, parse_mandala};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Dashboard,
    Grid,
    Report,
    Checklist,
}

/// Handle for one in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub seq: u64,
    pub kind: RequestKind,
}

/// Whether a completion was applied or dropped as stale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ChecklistState {
    #[default]
    Unselected,
    Loading {
        dimension: String,
    },
    Loaded {
        dimension: String,
        items: Vec<ChecklistItem>,
    },
}

#[derive(Debug, Default)]
pub struct Session {
    topic: String,
    pending_topic: Option<String>,
    result: Option<MandalaResult>,
    view: ViewMode,
    generating: bool,
    error: Option<String>,
    checklist: ChecklistState,
    completed: BTreeSet<usize>,
    next_seq: u64,
    latest_generation: Option<u64>,
    latest_checklist: Option<u64>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session seeded with an already generated result (e.g. loaded from disk)
    pub fn with_result(topic: &str, result: MandalaResult) -> Self {
        Self {
            topic: topic.trim().to_string(),
            result: Some(result),
            ..Self::default()
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn result(&self) -> Option<&MandalaResult> {
        self.result.as_ref()
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn checklist(&self) -> &ChecklistState {
        &self.checklist
    }

    pub fn dashboard(&self) -> Option<Dashboard> {
        self.result
            .as_ref()
            .map(|result| compose_dashboard(&self.topic, result))
    }

    fn issue(&mut self, kind: RequestKind) -> RequestTicket {
        self.next_seq += 1;
        let seq = self.next_seq;
        match kind {
            RequestKind::Mandala => self.latest_generation = Some(seq),
            RequestKind::Checklist => self.latest_checklist = Some(seq),
        }
        RequestTicket { seq, kind }
    }

    fn is_latest(&self, ticket: RequestTicket) -> bool {
        let latest = match ticket.kind {
            RequestKind::Mandala => self.latest_generation,
            RequestKind::Checklist => self.latest_checklist,
        };
        latest == Some(ticket.seq)
    }

    /// Drop the current topic, result and checklist entirely
    pub fn new_topic(&mut self) {
        self.topic.clear();
        self.pending_topic = None;
        self.result = None;
        self.error = None;
        self.generating = false;
        self.latest_generation = None;
        self.reset_checklist();
        self.view = ViewMode::Dashboard;
    }

    /// Start a generation for `topic`. The prior result stays visible until a
    /// successful completion replaces it.
    pub fn begin_generation(&mut self, topic: &str) -> Result<RequestTicket> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(MandalaError::InvalidInput {
                message: "topic must not be empty".to_string(),
            });
        }
        let ticket = self.issue(RequestKind::Mandala);
        self.generating = true;
        self.error = None;
        self.pending_topic = Some(topic.to_string());
        debug!("generation #{} started for '{}'", ticket.seq, topic);
        Ok(ticket)
    }

    pub fn complete_generation(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<MandalaResult>,
    ) -> Completion {
        match outcome {
            Ok(result) => self.apply_generation(ticket, result),
            Err(err) => self.fail_generation(ticket, &err),
        }
    }

    /// Replace the current result wholesale
    pub fn apply_generation(&mut self, ticket: RequestTicket, result: MandalaResult) -> Completion {
        if !self.is_latest(ticket) {
            debug!("discarding stale generation #{}", ticket.seq);
            return Completion::Stale;
        }
        let topic = self.pending_topic.take().unwrap_or_default();
        info!(
            "generation #{} applied: {} dimensions for '{}'",
            ticket.seq,
            result.main_dimensions.len(),
            topic
        );
        self.generating = false;
        self.topic = topic;
        self.result = Some(result);
        self.error = None;
        self.reset_checklist();
        Completion::Applied
    }

    /// Record a user-visible error; the prior result is left untouched
    pub fn fail_generation(&mut self, ticket: RequestTicket, err: &MandalaError) -> Completion {
        if !self.is_latest(ticket) {
            debug!("discarding stale generation failure #{}", ticket.seq);
            return Completion::Stale;
        }
        warn!("generation #{} failed: {}", ticket.seq, err);
        self.generating = false;
        self.pending_topic = None;
        self.error = Some(err.user_message());
        Completion::Applied
    }

    /// Move the checklist flow to `Loading` for a dimension of the current result.
    /// A new attempt clears any error left by the previous one.
    pub fn select_dimension(&mut self, dimension: &str) -> Result<RequestTicket> {
        let Some(result) = self.result.as_ref() else {
            return Err(MandalaError::InvalidInput {
                message: "no result to pick a dimension from".to_string(),
            });
        };
        if !result.main_dimensions.iter().any(|d| d == dimension) {
            return Err(MandalaError::InvalidInput {
                message: format!("'{}' is not a dimension of the current result", dimension),
            });
        }
        self.completed.clear();
        self.error = None;
        self.checklist = ChecklistState::Loading {
            dimension: dimension.to_string(),
        };
        self.view = ViewMode::Checklist;
        Ok(self.issue(RequestKind::Checklist))
    }

    /// `Loaded -> Loading` for the same dimension
    pub fn regenerate_checklist(&mut self) -> Result<RequestTicket> {
        let dimension = match &self.checklist {
            ChecklistState::Loaded { dimension, .. } => dimension.clone(),
            other => {
                return Err(MandalaError::InvalidInput {
                    message: format!("cannot regenerate checklist from {:?}", other),
                });
            }
        };
        self.select_dimension(&dimension)
    }

    /// Malformed or empty responses degrade to an empty checklist
    pub fn complete_checklist(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<Vec<ChecklistItem>>,
    ) -> Completion {
        if !self.is_latest(ticket) {
            debug!("discarding stale checklist #{}", ticket.seq);
            return Completion::Stale;
        }
        let ChecklistState::Loading { dimension } = &self.checklist else {
            debug!("checklist #{} arrived outside Loading, dropping", ticket.seq);
            return Completion::Stale;
        };
        let dimension = dimension.clone();
        let items = match outcome {
            Ok(items) => {
                info!(
                    "checklist #{} applied: {} tasks for '{}'",
                    ticket.seq,
                    items.len(),
                    dimension
                );
                items
            }
            Err(err) if err.degrades_to_empty() => {
                warn!("checklist #{} degraded to empty: {}", ticket.seq, err);
                Vec::new()
            }
            Err(err) => {
                warn!("checklist #{} failed: {}", ticket.seq, err);
                self.error = Some(err.user_message());
                Vec::new()
            }
        };
        self.completed.clear();
        self.checklist = ChecklistState::Loaded { dimension, items };
        Completion::Applied
    }

    /// `Loaded/Loading -> Unselected`; any in-flight checklist becomes stale
    pub fn back_to_dimensions(&mut self) {
        self.reset_checklist();
        self.error = None;
        self.view = ViewMode::Dashboard;
    }

    fn reset_checklist(&mut self) {
        self.checklist = ChecklistState::Unselected;
        self.completed.clear();
        self.latest_checklist = None;
    }

    /// Flip completion for the task at `index`; returns the new state
    pub fn toggle_completed(&mut self, index: usize) -> Option<bool> {
        let ChecklistState::Loaded { items, .. } = &self.checklist else {
            return None;
        };
        if index >= items.len() {
            return None;
        }
        if self.completed.remove(&index) {
            Some(false)
        } else {
            self.completed.insert(index);
            Some(true)
        }
    }

    /// Loaded items with the view-local completion flag filled in
    pub fn checklist_items(&self) -> Vec<ChecklistItem> {
        match &self.checklist {
            ChecklistState::Loaded { items, .. } => items
                .iter()
                .enumerate()
                .map(|(i, item)| ChecklistItem {
                    is_completed: Some(self.completed.contains(&i)),
                    ..item.clone()
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn active_dimension(&self) -> Option<&str> {
        match &self.checklist {
            ChecklistState::Unselected => None,
            ChecklistState::Loading { dimension } | ChecklistState::Loaded { dimension, .. } => {
                Some(dimension)
            }
        }
    }

    /// Run one full generation round trip against `model`
    pub async fn generate(&mut self, model: &dyn GenerativeModel, topic: &str) -> Result<()> {
        let ticket = self.begin_generation(topic)?;
        let request = build_mandala_prompt(topic.trim());
        let outcome = match model.generate(&request).await {
            Ok(response) => parse_mandala(&response.text),
            Err(err) => Err(err),
        };
        match outcome {
            Ok(result) => {
                self.apply_generation(ticket, result);
                Ok(())
            }
            Err(err) => {
                self.fail_generation(ticket, &err);
                Err(err)
            }
        }
    }

    /// Select `dimension` and load its checklist from `model`
    pub async fn load_checklist(
        &mut self,
        model: &dyn GenerativeModel,
        dimension: &str,
    ) -> Result<()> {
        let ticket = self.select_dimension(dimension)?;
        let request = build_checklist_prompt(&self.topic, dimension);
        let outcome = match model.generate(&request).await {
            Ok(response) => parse_checklist(&response.text),
            Err(err) => Err(err),
        };
        self.complete_checklist(ticket, outcome);
        Ok(())
    }
}
