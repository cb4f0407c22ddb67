//! extdoc — reference documentation for native extension modules.
//!
//! One linear pipeline per source file:
//!
//! 1. **Load** the source ([`source`])
//! 2. **Extract** the `Init_*` declarations ([`parser::decl`])
//! 3. **Match** each method's comment block ([`parser::comment`])
//! 4. **Aggregate** coverage statistics ([`stats`])
//! 5. **Render** the report ([`render`])
//!
//! [`graphics`] holds the scripting-side drawing binding.

pub mod graphics;
pub mod model;
pub mod parser;
pub mod render;
pub mod revision;
pub mod source;
pub mod stats;

use model::{ModuleDoc, Revision};
use parser::ExtractError;
use source::Source;

/// Build the complete ModuleDoc for a source file.
pub fn document(source: &Source, date: String, revision: Revision) -> Result<ModuleDoc, ExtractError> {
    let extracted = parser::parse(source)?;
    let stats = stats::aggregate(&extracted.methods, date, revision);
    Ok(ModuleDoc {
        name: extracted.name,
        description: extracted.description,
        methods: extracted.methods,
        stats,
    })
}
