use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::client::{ServiceFailure, WordClient};
use crate::data::{GroupKey, Output, QueryMode, WordGroup, WordResult};
use crate::group::group_by;

/// Fixed description shown when a lookup fails, naming the dependency.
pub const SERVICE_FAILURE_MESSAGE: &str = "Failed to fetch from Datamuse API.";
/// Saved-word display before anything has been saved.
pub const SAVED_NONE_SENTINEL: &str = "(none)";

/// Phase of the lookup lifecycle. Within one query, strictly Loading then
/// one of Ready/Empty/Error; a new query restarts from Loading out of any
/// phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Empty,
    Error,
    Ready,
}

/// What the presentation layer renders: one description line and one output
/// region, plus the phase that produced them. The two are separate cells so
/// the Error transition can rewrite the description while whatever the
/// output region held stays on screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryView {
    pub phase: Phase,
    pub description: String,
    pub output: Output,
}

/// Inputs to the view reducer.
#[derive(Debug, Clone)]
pub enum QueryEvent {
    /// A lookup was issued (button press or the input-submit keystroke).
    Submitted { mode: QueryMode, term: String },
    Completed {
        mode: QueryMode,
        outcome: Result<Vec<WordResult>, ServiceFailure>,
    },
}

impl QueryView {
    /// Advances the view by one event and returns the next view. Pure.
    #[must_use]
    pub fn step(self, event: QueryEvent) -> QueryView {
        match event {
            QueryEvent::Submitted { mode, term } => QueryView {
                phase: Phase::Loading,
                description: mode.description(&term),
                output: Output::Loading,
            },
            QueryEvent::Completed {
                outcome: Err(_), ..
            } => QueryView {
                phase: Phase::Error,
                description: SERVICE_FAILURE_MESSAGE.to_string(),
                // The output region keeps whatever it held; only the
                // description announces the failure.
                output: self.output,
            },
            QueryEvent::Completed {
                mode,
                outcome: Ok(words),
            } => {
                if words.is_empty() {
                    return QueryView {
                        phase: Phase::Empty,
                        description: self.description,
                        output: Output::NoResults,
                    };
                }
                let output = match mode {
                    QueryMode::Rhyme => Output::Grouped(group_by_syllables(words)),
                    QueryMode::Synonym => Output::Flat(words),
                };
                QueryView {
                    phase: Phase::Ready,
                    description: self.description,
                    output,
                }
            }
        }
    }
}

/// Buckets rhyme results by syllable count, fewest first. Results the
/// service returned without a count land in a trailing unknown bucket.
pub fn group_by_syllables(words: Vec<WordResult>) -> Vec<WordGroup> {
    group_by(words, |word| GroupKey::from_count(word.num_syllables))
        .into_iter()
        .map(|(key, words)| WordGroup { key, words })
        .collect()
}

/// Drives lookups against the word service and owns the session state the
/// presentation layer renders: the current [`QueryView`] and the append-only
/// saved-word list. Clones share the same cells, so a save or a new lookup
/// stays responsive while an earlier lookup is still in flight.
#[derive(Clone)]
pub struct QueryController {
    shared: Arc<ControllerShared>,
}

struct ControllerShared {
    client: WordClient,
    view: RwLock<QueryView>,
    saved: RwLock<Vec<String>>,
    ticket: AtomicU64,
}

impl QueryController {
    pub fn new(client: WordClient) -> Self {
        Self {
            shared: Arc::new(ControllerShared {
                client,
                view: RwLock::new(QueryView::default()),
                saved: RwLock::new(Vec::new()),
                ticket: AtomicU64::new(0),
            }),
        }
    }

    /// Issues one lookup for `term` in `mode`, always passing through
    /// Loading first. Every lookup takes a fresh ticket; an event whose
    /// ticket is no longer the latest is dropped instead of written, so an
    /// older request resolving late cannot clobber the view.
    pub async fn lookup(&self, mode: QueryMode, term: &str) {
        let ticket = self.shared.ticket.fetch_add(1, AtomicOrdering::SeqCst) + 1;
        debug!(ticket, %mode, term, "lookup submitted");
        self.apply_if_current(
            ticket,
            QueryEvent::Submitted {
                mode,
                term: term.to_string(),
            },
        );

        let outcome = self.shared.client.lookup(mode, term).await;
        if let Err(err) = &outcome {
            warn!(ticket, error = %err, "lookup failed");
        }
        if !self.apply_if_current(ticket, QueryEvent::Completed { mode, outcome }) {
            warn!(ticket, "discarding stale completion");
        }
    }

    /// Steps the view with `event` unless a newer lookup has taken a ticket
    /// in the meantime. Returns whether the event was applied.
    fn apply_if_current(&self, ticket: u64, event: QueryEvent) -> bool {
        let mut view = self.shared.view.write();
        if self.shared.ticket.load(AtomicOrdering::SeqCst) != ticket {
            return false;
        }
        *view = view.clone().step(event);
        true
    }

    /// Snapshot of the current view.
    pub fn view(&self) -> QueryView {
        self.shared.view.read().clone()
    }

    /// Appends `word` to the saved list. No deduplication and no validation;
    /// saving the same word twice records it twice.
    pub fn save(&self, word: impl Into<String>) {
        self.shared.saved.write().push(word.into());
    }

    pub fn saved_count(&self) -> usize {
        self.shared.saved.read().len()
    }

    /// Comma-joined saved words, or `(none)` before the first save.
    pub fn saved_display(&self) -> String {
        let saved = self.shared.saved.read();
        if saved.is_empty() {
            SAVED_NONE_SENTINEL.to_string()
        } else {
            saved.join(", ")
        }
    }

    pub fn saved_words(&self) -> Vec<String> {
        self.shared.saved.read().clone()
    }
}
