//! Parser module — declarations first, then one comment lookup per method.

pub mod comment;
pub mod decl;

use crate::model::MethodDoc;
use crate::source::Source;
pub use decl::ExtractError;

/// Everything pulled out of a source file, before statistics are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    pub name: String,
    pub description: String,
    pub methods: Vec<MethodDoc>,
}

/// Extract the module and its methods from a source file.
///
/// Fails only when the initializer routine, module name or module variable
/// is missing. Methods without a comment block are recorded as undocumented.
pub fn parse(source: &Source) -> Result<Extracted, ExtractError> {
    let decls = decl::extract(source.text())?;
    let body = source.body(decls.init_start);

    let methods = decls
        .methods
        .into_iter()
        .map(|reg| {
            let doc = comment::find_block(body, &reg.symbol)
                .map(|block| comment::parse_block(&block))
                .filter(|doc| !doc.is_empty());
            match doc {
                Some(doc) => MethodDoc::Documented {
                    name: reg.name,
                    description: doc.description,
                    signatures: doc.signatures,
                    examples: doc.examples,
                    returns: doc.returns,
                },
                None => {
                    tracing::debug!(method = %reg.name, symbol = %reg.symbol, "no comment block");
                    MethodDoc::Undocumented { name: reg.name }
                }
            }
        })
        .collect();

    Ok(Extracted {
        name: decls.module_name,
        description: source.header_description(),
        methods,
    })
}
