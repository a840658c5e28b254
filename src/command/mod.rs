mod commands;
mod context;
pub mod history;

use serde::{Deserialize, Serialize};

pub use commands::{Applied, Command};
pub(crate) use commands::{
    add_element, duplicate_element, move_element, remove_element, update_element,
};
pub use context::CommandContext;
pub use history::History;

/// Result type for command operations
pub type CommandResult<T> = Result<Applied<T>, crate::error::EditError>;

/// Direction of a sibling swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}
