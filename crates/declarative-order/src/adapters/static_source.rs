//! In-memory declaration source.

use crate::domain::errors::SourceError;
use crate::domain::value_objects::DeclarationSet;
use crate::ports::outbound::DeclarationSource;

/// Serves a fixed declaration set, e.g. one assembled at startup through
/// the builder API.
#[derive(Clone, Debug, Default)]
pub struct StaticDeclarationSource {
    declarations: DeclarationSet,
}

impl StaticDeclarationSource {
    pub fn new(declarations: DeclarationSet) -> Self {
        Self { declarations }
    }

    /// Swap in a new declaration set; the next reload picks it up.
    pub fn replace(&mut self, declarations: DeclarationSet) {
        self.declarations = declarations;
    }
}

impl DeclarationSource for StaticDeclarationSource {
    fn load_declarations(&self) -> Result<DeclarationSet, SourceError> {
        Ok(self.declarations.clone())
    }
}
