//! Data model for an extracted extension module — format-agnostic.
//!
//! Everything here is built once per run and handed to a renderer as-is.

use serde::Serialize;

/// Complete documentation for one native extension module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleDoc {
    pub name: String,
    /// Leading comment block of the source file (empty if none)
    pub description: String,
    /// Every registered method, in registration order
    pub methods: Vec<MethodDoc>,
    pub stats: Stats,
}

impl ModuleDoc {
    /// Methods with a matched comment block, in registration order.
    pub fn documented_methods(&self) -> impl Iterator<Item = &MethodDoc> {
        self.methods.iter().filter(|m| m.is_documented())
    }

    /// Methods with no adjacent comment block, in registration order.
    pub fn nodoc_methods(&self) -> impl Iterator<Item = &MethodDoc> {
        self.methods.iter().filter(|m| !m.is_documented())
    }
}

/// A single registered method.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum MethodDoc {
    Documented {
        name: String,
        description: String,
        signatures: Vec<Signature>,
        examples: Vec<String>,
        returns: Option<String>,
    },
    Undocumented {
        name: String,
    },
}

impl MethodDoc {
    /// Exposed (scripting-side) name.
    pub fn name(&self) -> &str {
        match self {
            MethodDoc::Documented { name, .. } | MethodDoc::Undocumented { name } => name,
        }
    }

    pub fn is_documented(&self) -> bool {
        matches!(self, MethodDoc::Documented { .. })
    }

    pub fn has_examples(&self) -> bool {
        matches!(self, MethodDoc::Documented { examples, .. } if !examples.is_empty())
    }
}

/// One call form of a method.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Signature {
    pub args: Vec<Arg>,
}

impl Signature {
    /// Argument names joined for a syntax line, e.g. `x, y, radius`.
    pub fn arg_list(&self) -> String {
        self.args
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arg {
    pub name: String,
    pub description: Option<String>,
}

/// Documentation coverage plus render metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    pub total_methods: usize,
    pub documented_methods: usize,
    pub documented_percent: u32,
    pub exampled_methods: usize,
    pub exampled_percent: u32,
    /// Render timestamp, `%Y-%m-%d %H:%M`
    pub date: String,
    pub revision: Revision,
}

/// Version-control revision the report was generated against.
/// Both fields are empty when the lookup failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Revision {
    pub hash: String,
    pub short_hash: String,
}
