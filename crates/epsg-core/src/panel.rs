//! The EPSG section of one coordinate editing surface.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use epsg_model::EpsgRegistry;
use epsg_search::{AutocompleteSession, CodeIndex, EditOutcome};
use tracing::{debug, info, info_span, warn};

use crate::error::{ApplicationError, Result};
use crate::tracker::{
    Applied, ApplyEpoch, ChangeOrigin, ConsistencyTracker, FieldChangeOutcome, FieldKind,
};

/// Registry and search index, built once and shared by every panel.
#[derive(Debug, Clone)]
pub struct EpsgCatalog {
    registry: Arc<EpsgRegistry>,
    index: Arc<CodeIndex>,
}

impl EpsgCatalog {
    pub fn new(registry: EpsgRegistry) -> Self {
        Self::from_shared(Arc::new(registry))
    }

    pub fn from_shared(registry: Arc<EpsgRegistry>) -> Self {
        let index = Arc::new(CodeIndex::from_registry(&registry));
        Self { registry, index }
    }

    pub fn registry(&self) -> &Arc<EpsgRegistry> {
        &self.registry
    }

    pub fn index(&self) -> &Arc<CodeIndex> {
        &self.index
    }
}

/// Which end of a conversion a panel edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceSide {
    Source,
    Target,
}

impl SurfaceSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceSide::Source => "source",
            SurfaceSide::Target => "target",
        }
    }
}

impl fmt::Display for SurfaceSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code input, apply action and consistency tracking for one surface.
#[derive(Debug)]
pub struct EpsgPanel {
    side: SurfaceSide,
    registry: Arc<EpsgRegistry>,
    session: AutocompleteSession,
    tracker: ConsistencyTracker,
}

impl EpsgPanel {
    pub fn new(side: SurfaceSide, catalog: &EpsgCatalog) -> Self {
        Self {
            side,
            registry: Arc::clone(catalog.registry()),
            session: AutocompleteSession::new(Arc::clone(catalog.index())),
            tracker: ConsistencyTracker::new(),
        }
    }

    pub fn side(&self) -> SurfaceSide {
        self.side
    }

    pub fn session(&self) -> &AutocompleteSession {
        &self.session
    }

    pub fn tracker(&self) -> &ConsistencyTracker {
        &self.tracker
    }

    pub fn is_active(&self) -> bool {
        self.tracker.is_active()
    }

    pub fn current_code(&self) -> Option<&str> {
        self.tracker.current_code()
    }

    /// Applies whatever the code box holds.
    ///
    /// An empty box drops the active code and returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Fails when the text is not a known code or the code cannot be mapped
    /// to parameters. The panel is fully cleared in both cases.
    pub fn apply_selected(&mut self) -> Result<Option<Applied>> {
        let span = info_span!("epsg_apply", side = %self.side, text = %self.session.text());
        let _guard = span.enter();

        if self.session.text().is_empty() {
            self.tracker.clear();
            return Ok(None);
        }

        let Some(code) = self.session.resolved_value().map(str::to_string) else {
            let err = ApplicationError::UnsupportedCode(self.session.text().to_string());
            warn!(error = %err, "EPSG apply rejected");
            self.clear();
            return Err(err);
        };

        match self.tracker.apply(&code, &self.registry) {
            Ok(applied) => {
                info!(code = %applied.code, epoch = %applied.epoch, "EPSG code applied");
                Ok(Some(applied))
            }
            Err(err) => {
                self.session.clear_selection();
                Err(err)
            }
        }
    }

    /// Drops the active code and empties the code box.
    pub fn clear(&mut self) {
        self.tracker.clear();
        self.session.clear_selection();
    }

    /// Reports a change to one of the surface's fields. An invalidating
    /// change also empties the code box.
    pub fn notify_field_changed(
        &mut self,
        field: FieldKind,
        origin: ChangeOrigin,
    ) -> FieldChangeOutcome {
        let outcome = self.tracker.notify_field_changed(field, origin);
        if outcome == FieldChangeOutcome::Invalidated {
            let span = info_span!("epsg_invalidate", side = %self.side, %field);
            let _guard = span.enter();
            info!("EPSG selection cleared by field edit");
            self.session.clear_selection();
        }
        outcome
    }

    pub fn expect_echo(&mut self, field: FieldKind) -> Option<ApplyEpoch> {
        self.tracker.expect_echo(field)
    }

    /// Empties the code box when it holds text that was never applied.
    /// Returns true if anything was discarded.
    pub fn discard_inactive_selection(&mut self) -> bool {
        if self.tracker.is_active() || self.session.text().is_empty() {
            return false;
        }
        self.session.clear_selection();
        true
    }

    pub fn insert(&mut self, offset: usize, inserted: &str) -> EditOutcome {
        self.edit_code_box(|session| session.insert(offset, inserted))
    }

    pub fn replace(&mut self, range: Range<usize>, inserted: &str) -> EditOutcome {
        self.edit_code_box(|session| session.replace(range, inserted))
    }

    pub fn remove(&mut self, range: Range<usize>) -> EditOutcome {
        self.edit_code_box(|session| session.remove(range))
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.edit_code_box(|session| session.set_text(text));
    }

    pub fn select_candidate(&mut self, index: usize) -> Option<String> {
        self.edit_code_box(|session| session.select_candidate(index))
    }

    pub fn process_pending(&mut self) -> usize {
        self.session.process_pending()
    }

    pub fn focus_gained(&mut self) {
        self.session.focus_gained();
    }

    // The applied code no longer describes the surface once the box holds
    // different text.
    fn edit_code_box<R>(&mut self, edit: impl FnOnce(&mut AutocompleteSession) -> R) -> R {
        let before = self.session.text().to_string();
        let result = edit(&mut self.session);
        if self.session.text() != before && self.tracker.is_active() {
            debug!(
                side = %self.side,
                text = %self.session.text(),
                "code box edited, EPSG code dropped"
            );
            self.tracker.clear();
        }
        result
    }
}
