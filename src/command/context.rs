use crate::config::NestingPolicy;
use crate::id_generator::IdGenerator;

/// What a command needs besides the tree it edits.
pub struct CommandContext<'a> {
    /// Fresh ids for duplicated subtrees
    pub ids: &'a mut dyn IdGenerator,
    /// Placement rules checked on insertion
    pub nesting: NestingPolicy,
}

impl<'a> CommandContext<'a> {
    pub fn new(ids: &'a mut dyn IdGenerator, nesting: NestingPolicy) -> Self {
        Self { ids, nesting }
    }
}
