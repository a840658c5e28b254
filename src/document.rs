//! The element tree store.
//!
//! A [`Document`] owns the one current tree and the undo history. Every edit goes
//! through [`Document::execute`] (or one of the typed helpers wrapping it): the edit
//! runs against a cheap clone of the tree, and only if it succeeds and changes
//! something is the old tree pushed onto the history and the new one installed. A
//! failed or no-op edit leaves both tree and history exactly as they were.

use std::fmt;
use std::time::Instant;

use crate::command::{
    self, history::History, Applied, Command, CommandContext, CommandResult, Direction,
};
use crate::config::EditorConfig;
use crate::element::{self, factory, Element, ElementKind, ElementPatch};
use crate::error::{EditError, ExportError, LoadError, SaveError};
use crate::event::{DocumentEvent, EventBus, EventHandler, Subscription};
use crate::id_generator::{ElementId, IdGenerator, UuidIds};
use crate::renderer::HtmlRenderer;
use crate::state::{AutoSave, SaveCoordinator, SaveReceipt, SaveRequest, SaveTarget};
use crate::tree::Tree;

/// What a drag-and-drop gesture carries into the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropPayload {
    /// A palette item, identified only by its element type name
    NewElement {
        element_type: String,
        parent: Option<ElementId>,
    },
    /// An existing element nudged past its neighbour
    Reorder { id: ElementId, direction: Direction },
}

pub struct Document {
    tree: Tree,
    history: History,
    ids: Box<dyn IdGenerator>,
    config: EditorConfig,
    events: EventBus,
    /// Bumped by every installed change, including undo and redo
    revision: u64,
    /// Revision last confirmed written by a save
    saved_revision: Option<u64>,
    saver: SaveCoordinator,
    autosave: AutoSave,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("elements", &self.tree.len())
            .field("revision", &self.revision)
            .field("saved_revision", &self.saved_revision)
            .field("history", &self.history)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Document {
    /// An empty document.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            tree: Tree::new(),
            history: History::with_limit(config.history_limit),
            ids: Box::new(UuidIds),
            autosave: AutoSave::new(config.autosave_interval(), Instant::now()),
            config,
            events: EventBus::new(),
            revision: 0,
            saved_revision: Some(0),
            saver: SaveCoordinator::new(),
        }
    }

    /// A document initialized from an externally supplied tree. Starts clean.
    pub fn from_elements(elements: Vec<Element>, config: EditorConfig) -> Result<Self, LoadError> {
        let mut document = Self::new(config);
        document.reset(elements)?;
        Ok(document)
    }

    /// Parses the Element JSON schema and loads it.
    pub fn from_json(json: &str, config: EditorConfig) -> Result<Self, LoadError> {
        Self::from_elements(element::from_json(json)?, config)
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Replaces the whole tree, dropping history. The document is clean afterwards.
    pub fn reset(&mut self, elements: Vec<Element>) -> Result<(), LoadError> {
        element::check_unique_ids(&elements)?;
        let tree = Tree::from_elements(elements)?;
        log::info!("loaded document with {} elements", tree.len());

        self.tree = tree;
        self.history.clear();
        self.revision += 1;
        self.saved_revision = Some(self.revision);
        self.events.emit(DocumentEvent::Loaded {
            elements: self.tree.len(),
        });
        Ok(())
    }

    /// Tears the document down, handing back its final tree.
    pub fn into_elements(self) -> Vec<Element> {
        self.tree.to_elements()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The top-level sequence, materialized.
    pub fn elements(&self) -> Vec<Element> {
        self.tree.to_elements()
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn find_element_by_id(&self, id: &ElementId) -> Option<Element> {
        self.tree.get(id)
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) -> Subscription {
        self.events.subscribe(handler)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.events.unsubscribe(subscription)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True when the current revision has not been confirmed written.
    pub fn is_dirty(&self) -> bool {
        self.saved_revision != Some(self.revision)
    }

    // ------------------------------------------------------------------------
    // Edits

    /// Execute any command as one undoable step. Returns whether the tree changed.
    pub fn execute(&mut self, command: Command) -> Result<bool, EditError> {
        let name = command.name();
        let before = self.revision;
        if let Err(err) = self.commit(|tree, ctx| command.apply(tree, ctx)) {
            log::warn!("{name} rejected: {err}");
            return Err(err);
        }
        Ok(self.revision != before)
    }

    /// Appends `element` at the top level, or as the last child of `parent`.
    pub fn add_element(
        &mut self,
        element: Element,
        parent: Option<&ElementId>,
    ) -> Result<ElementId, EditError> {
        self.commit(|tree, ctx| command::add_element(tree, ctx, element, parent))
    }

    /// Creates a default element of `kind` and adds it.
    pub fn add_new(
        &mut self,
        kind: ElementKind,
        parent: Option<&ElementId>,
    ) -> Result<ElementId, EditError> {
        let element = factory::create(kind, self.ids.as_mut());
        self.add_element(element, parent)
    }

    /// Shallow-merges `patch` into the element. Returns whether anything changed.
    pub fn update_element(&mut self, id: &ElementId, patch: ElementPatch) -> Result<bool, EditError> {
        self.commit(|tree, _| command::update_element(tree, id, patch))
    }

    /// Removes the element with its subtree and hands it back.
    pub fn remove_element(&mut self, id: &ElementId) -> Result<Element, EditError> {
        self.commit(|tree, _| command::remove_element(tree, id))
    }

    /// Copies the element and its subtree under fresh ids, right after the original.
    /// Returns the id of the copy.
    pub fn duplicate_element(&mut self, id: &ElementId) -> Result<ElementId, EditError> {
        self.commit(|tree, ctx| command::duplicate_element(tree, ctx, id))
    }

    /// Swaps with the neighbouring sibling. Returns `false` at either end.
    pub fn move_element(&mut self, id: &ElementId, direction: Direction) -> Result<bool, EditError> {
        self.commit(|tree, _| command::move_element(tree, id, direction))
    }

    /// Handles a drag-and-drop gesture. Returns the id of a newly created element.
    pub fn apply_drop(&mut self, payload: DropPayload) -> Result<Option<ElementId>, EditError> {
        match payload {
            DropPayload::NewElement {
                element_type,
                parent,
            } => {
                let kind = element_type.parse::<ElementKind>()?;
                self.add_new(kind, parent.as_ref()).map(Some)
            }
            DropPayload::Reorder { id, direction } => {
                self.move_element(&id, direction).map(|_| None)
            }
        }
    }

    fn commit<T>(
        &mut self,
        edit: impl FnOnce(&mut Tree, &mut CommandContext<'_>) -> CommandResult<T>,
    ) -> Result<T, EditError> {
        let mut next = self.tree.clone();
        let mut ctx = CommandContext::new(self.ids.as_mut(), self.config.nesting);
        let Applied { value, event } = edit(&mut next, &mut ctx)?;

        if let Some(event) = event {
            let previous = std::mem::replace(&mut self.tree, next);
            self.history.record(previous);
            self.revision += 1;
            log::debug!("revision {}: {:?}", self.revision, event);
            self.events.emit(event);
        }
        Ok(value)
    }

    // ------------------------------------------------------------------------
    // History

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Returns `false` when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo(&mut self.tree) {
            return false;
        }
        self.revision += 1;
        log::debug!("undo -> revision {}", self.revision);
        self.events.emit(DocumentEvent::Undone {
            revision: self.revision,
        });
        true
    }

    /// Returns `false` when there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.history.redo(&mut self.tree) {
            return false;
        }
        self.revision += 1;
        log::debug!("redo -> revision {}", self.revision);
        self.events.emit(DocumentEvent::Redone {
            revision: self.revision,
        });
        true
    }

    // ------------------------------------------------------------------------
    // Export

    pub fn export_json(&self) -> Result<String, ExportError> {
        element::to_json(&self.elements())
    }

    pub fn export_html(&self) -> Result<String, ExportError> {
        HtmlRenderer::new().render(&self.elements())
    }

    // ------------------------------------------------------------------------
    // Saving

    /// Captures the current tree for a save. Edits made while the save is in flight
    /// keep the document dirty.
    pub fn begin_save(&self) -> SaveRequest {
        SaveRequest::new(self.revision, self.elements())
    }

    /// The coordinator shared by saves started from this document.
    pub fn save_coordinator(&self) -> SaveCoordinator {
        self.saver.clone()
    }

    pub fn finish_save(&mut self, receipt: &SaveReceipt) {
        if receipt.superseded {
            return;
        }
        let newer = self
            .saved_revision
            .is_none_or(|saved| receipt.revision >= saved);
        if newer {
            self.saved_revision = Some(receipt.revision);
        }
        log::info!("saved revision {}", receipt.revision);
        self.events.emit(DocumentEvent::Saved {
            revision: receipt.revision,
        });
    }

    /// Records a failed save. Edits are never rolled back; the document stays dirty.
    pub fn fail_save(&mut self, revision: u64, err: &SaveError) {
        log::warn!("save of revision {revision} failed: {err}");
        self.events.emit(DocumentEvent::SaveFailed {
            revision,
            reason: err.to_string(),
        });
    }

    /// Saves the current tree through `target` and records the outcome.
    pub async fn save(&mut self, target: &dyn SaveTarget) -> Result<SaveReceipt, SaveError> {
        let request = self.begin_save();
        let revision = request.revision;
        let coordinator = self.saver.clone();
        match coordinator.run(target, request).await {
            Ok(receipt) => {
                self.finish_save(&receipt);
                Ok(receipt)
            }
            Err(err) => {
                self.fail_save(revision, &err);
                Err(err)
            }
        }
    }

    /// Polls the auto-save timer. Returns a request to hand to the save target when
    /// one is due.
    pub fn autosave_tick(&mut self, now: Instant) -> Option<SaveRequest> {
        let dirty = self.is_dirty();
        self.autosave
            .poll(now, dirty)
            .then(|| self.begin_save())
    }
}
