#![warn(clippy::all, rust_2018_idioms)]

//! Headless element tree for a page and funnel builder: typed elements, undoable
//! edits over a persistent arena, JSON and HTML export, and the save boundary.

pub mod command;
pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod id_generator;
pub mod renderer;
pub mod state;
pub mod tree;

pub use command::{Command, Direction, History};
pub use config::{EditorConfig, NestingPolicy};
pub use document::{Document, DropPayload};
pub use element::{Element, ElementContent, ElementKind, ElementPatch, Settings, Styles};
pub use error::{ConfigError, EditError, ExportError, LoadError, SaveError};
pub use event::{DocumentEvent, EventBus, EventHandler, EventLog, Subscription};
pub use id_generator::{ElementId, IdGenerator, SequentialIds, UuidIds};
pub use renderer::HtmlRenderer;
pub use state::{AutoSave, SaveCoordinator, SaveReceipt, SaveRequest, SaveTarget};
pub use tree::Tree;
