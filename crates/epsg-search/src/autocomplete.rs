//! Autocomplete input for EPSG codes.
//!
//! An [`AutocompleteSession`] models the editable code box and its dropdown.
//! Edits go through the keystroke filter in [`crate::code_filter`] and never
//! rebuild the candidate list directly. They post a refresh to a
//! [`DeferredQueue`], and the host runs it with
//! [`AutocompleteSession::process_pending`] once the current event has
//! finished.
//!
//! Picking a candidate rewrites the text, which would normally trigger a
//! search of its own. The pick sets an explicit-selection flag that the next
//! refresh consumes instead of rebuilding.

use std::ops::Range;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::code_filter::{accepts_edit, byte_range, splice};
use crate::deferred::DeferredQueue;
use crate::index::{CodeIndex, Searchable};

/// Number of codes offered before anything is typed.
pub const NUM_INITIAL_OPTIONS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No text; the seeded list is shown.
    Empty,
    /// Text entered; the list holds search results.
    Typing,
    /// A candidate was picked and its text is shown.
    Selected,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Empty => "Empty",
            SessionState::Typing => "Typing",
            SessionState::Selected => "Selected",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an edit reached the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Accepted,
    Rejected,
}

impl EditOutcome {
    pub fn is_accepted(self) -> bool {
        self == EditOutcome::Accepted
    }
}

/// Work posted by an edit and run on the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTask {
    /// Rebuild the candidate list from the current text.
    Refresh,
}

#[derive(Debug, Clone)]
struct ListModel {
    text: String,
    seeded: Vec<String>,
    candidates: Vec<String>,
    highlighted: Option<usize>,
    popup_open: bool,
    state: SessionState,
    explicit_selection: bool,
}

impl ListModel {
    fn reset_to_seeded(&mut self) {
        self.candidates.clone_from(&self.seeded);
        self.highlighted = None;
        self.popup_open = false;
        self.state = SessionState::Empty;
    }

    fn run<S>(&mut self, task: SessionTask, index: &S)
    where
        S: Searchable<String, str> + ?Sized,
    {
        match task {
            SessionTask::Refresh => self.refresh(index),
        }
    }

    fn refresh<S>(&mut self, index: &S)
    where
        S: Searchable<String, str> + ?Sized,
    {
        if self.explicit_selection {
            self.explicit_selection = false;
            self.state = SessionState::Selected;
            trace!(text = %self.text, "explicit selection consumed");
            return;
        }

        if self.text.is_empty() {
            self.reset_to_seeded();
            return;
        }

        let mut found = index.search(&self.text);
        found.sort();
        // Search is case-sensitive but this check is not, so "ab" is not
        // offered again when "AB" already matched.
        let lowered = self.text.to_lowercase();
        let already_listed = found.iter().any(|code| code.to_lowercase() == lowered);

        self.candidates.clear();
        if !already_listed {
            self.candidates.push(self.text.clone());
        }
        self.candidates.extend(found);
        self.highlighted = None;
        self.popup_open = true;
        self.state = SessionState::Typing;
        debug!(
            text = %self.text,
            candidates = self.candidates.len(),
            "candidate list rebuilt"
        );
    }
}

/// Editable EPSG code box with a reactive candidate list.
#[derive(Debug)]
pub struct AutocompleteSession<S = CodeIndex>
where
    S: Searchable<String, str>,
{
    index: Arc<S>,
    model: ListModel,
    pending: DeferredQueue<SessionTask>,
}

impl<S> AutocompleteSession<S>
where
    S: Searchable<String, str>,
{
    /// Starts empty with the first [`NUM_INITIAL_OPTIONS`] codes in numeric order.
    pub fn new(index: Arc<S>) -> Self {
        let seeded = index.first_n(NUM_INITIAL_OPTIONS, true);
        Self {
            index,
            model: ListModel {
                text: String::new(),
                candidates: seeded.clone(),
                seeded,
                highlighted: None,
                popup_open: false,
                state: SessionState::Empty,
                explicit_selection: false,
            },
            pending: DeferredQueue::new(),
        }
    }

    pub fn index(&self) -> &Arc<S> {
        &self.index
    }

    pub fn text(&self) -> &str {
        &self.model.text
    }

    /// Length of the text in chars, the unit edit offsets are measured in.
    pub fn char_len(&self) -> usize {
        self.model.text.chars().count()
    }

    pub fn candidates(&self) -> &[String] {
        &self.model.candidates
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.model.highlighted
    }

    pub fn is_popup_open(&self) -> bool {
        self.model.popup_open
    }

    pub fn state(&self) -> SessionState {
        self.model.state
    }

    pub fn has_explicit_selection(&self) -> bool {
        self.model.explicit_selection
    }

    /// Number of refreshes waiting for [`process_pending`](Self::process_pending).
    pub fn pending_tasks(&self) -> usize {
        self.pending.len()
    }

    /// Inserts `inserted` at char `offset`.
    pub fn insert(&mut self, offset: usize, inserted: &str) -> EditOutcome {
        if inserted.is_empty() {
            return EditOutcome::Rejected;
        }
        self.replace(offset..offset, inserted)
    }

    /// Replaces the chars in `range` with `inserted`.
    ///
    /// An empty `inserted` removes the range.
    pub fn replace(&mut self, range: Range<usize>, inserted: &str) -> EditOutcome {
        if inserted.is_empty() {
            return self.remove(range);
        }
        if !accepts_edit(&self.model.text, range.clone(), inserted) {
            trace!(text = %self.model.text, inserted, "keystroke rejected");
            return EditOutcome::Rejected;
        }
        self.model.text = splice(&self.model.text, range, inserted);
        self.model.explicit_selection = false;
        self.schedule_refresh();
        EditOutcome::Accepted
    }

    /// Removes the chars in `range`. Removals always succeed.
    ///
    /// Like every edit, a removal drops a pending explicit selection: only
    /// the text change made by the pick itself skips the rebuild.
    pub fn remove(&mut self, range: Range<usize>) -> EditOutcome {
        let (start, end) = byte_range(&self.model.text, range);
        if start == end {
            return EditOutcome::Accepted;
        }
        self.model.text.replace_range(start..end, "");
        self.model.explicit_selection = false;
        self.schedule_refresh();
        EditOutcome::Accepted
    }

    /// Replaces the whole text without going through the keystroke filter.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.model.text = text.into();
        self.model.explicit_selection = false;
        self.schedule_refresh();
    }

    /// Picks the candidate at `index` and returns its text.
    ///
    /// The pick only counts as explicit when the candidate is a real code;
    /// the literal entry echoed at the top of the list is searched again on
    /// the next tick.
    pub fn select_candidate(&mut self, index: usize) -> Option<String> {
        let candidate = self.model.candidates.get(index)?.clone();
        self.model.explicit_selection = self.index.contains(&candidate);
        self.model.highlighted = Some(index);
        self.model.popup_open = false;
        self.model.text.clone_from(&candidate);
        self.schedule_refresh();
        debug!(
            code = %candidate,
            explicit = self.model.explicit_selection,
            "candidate selected"
        );
        Some(candidate)
    }

    /// Runs the refreshes posted so far. Returns how many ran.
    pub fn process_pending(&mut self) -> usize {
        let model = &mut self.model;
        let index = self.index.as_ref();
        self.pending.drain_with(|task| model.run(task, index))
    }

    /// Focus returned to the box: re-open the dropdown if there is text.
    pub fn focus_gained(&mut self) {
        if !self.model.text.is_empty() {
            self.model.popup_open = true;
        }
    }

    /// The text, if it is exactly a known code.
    pub fn resolved_value(&self) -> Option<&str> {
        let text = self.model.text.as_str();
        self.index.contains(text).then_some(text)
    }

    /// Back to the initial state, dropping any refresh not yet run.
    pub fn clear_selection(&mut self) {
        self.pending.clear();
        self.model.text.clear();
        self.model.explicit_selection = false;
        self.model.reset_to_seeded();
        trace!("selection cleared");
    }

    // A refresh reads the text when it runs, so one pending refresh covers
    // any number of edits.
    fn schedule_refresh(&mut self) {
        if !self.pending.contains(&SessionTask::Refresh) {
            self.pending.post(SessionTask::Refresh);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> AutocompleteSession {
        let index = CodeIndex::new(["4326", "32601", "3395", "2100", "4978", "32761"]);
        AutocompleteSession::new(Arc::new(index))
    }

    #[test]
    fn starts_empty_with_seeded_candidates() {
        let session = session();
        assert_eq!(session.state(), SessionState::Empty);
        assert_eq!(
            session.candidates(),
            ["2100", "3395", "4326", "4978", "32601", "32761"]
        );
        assert!(!session.is_popup_open());
        assert_eq!(session.highlighted(), None);
        assert_eq!(session.resolved_value(), None);
    }

    #[test]
    fn rebuild_waits_for_the_next_tick() {
        let mut session = session();
        assert!(session.insert(0, "4").is_accepted());
        assert_eq!(session.state(), SessionState::Empty);
        assert_eq!(session.pending_tasks(), 1);

        assert_eq!(session.process_pending(), 1);
        assert_eq!(session.state(), SessionState::Typing);
        assert_eq!(session.candidates(), ["4", "4326", "4978"]);
        assert!(session.is_popup_open());
    }

    #[test]
    fn edits_in_one_tick_share_a_refresh() {
        let mut session = session();
        session.insert(0, "3");
        session.insert(1, "2");
        assert_eq!(session.pending_tasks(), 1);
        session.process_pending();
        assert_eq!(session.candidates(), ["32", "32601", "32761", "4326"]);
    }

    #[test]
    fn remove_drops_explicit_selection() {
        let mut session = session();
        session.insert(0, "4");
        session.process_pending();
        session.select_candidate(1);
        assert!(session.has_explicit_selection());

        let len = session.char_len();
        session.remove(len - 1..len);
        assert!(!session.has_explicit_selection());
        session.process_pending();
        assert_eq!(session.text(), "432");
        assert_eq!(session.state(), SessionState::Typing);
    }

    #[test]
    fn programmatic_text_drops_explicit_selection() {
        let mut session = session();
        session.insert(0, "4");
        session.process_pending();
        session.select_candidate(1);
        session.set_text("3395");
        assert!(!session.has_explicit_selection());
        session.process_pending();
        assert_eq!(session.state(), SessionState::Typing);
        assert_eq!(session.candidates(), ["3395"]);
    }

    #[test]
    fn focus_reopens_only_with_text() {
        let mut session = session();
        session.focus_gained();
        assert!(!session.is_popup_open());

        session.set_text("2100");
        session.process_pending();
        session.select_candidate(0);
        session.process_pending();
        assert!(!session.is_popup_open());
        session.focus_gained();
        assert!(session.is_popup_open());
    }

    #[test]
    fn clear_selection_discards_pending_work() {
        let mut session = session();
        session.set_text("3395");
        session.clear_selection();
        assert_eq!(session.pending_tasks(), 0);
        assert_eq!(session.process_pending(), 0);
        assert_eq!(session.text(), "");
        assert_eq!(session.state(), SessionState::Empty);
        assert_eq!(session.candidates().len(), 6);
    }
}
