//! JSON renderer — structured output for tooling integration.
//!
//! Serializes the ModuleDoc model directly. Method records carry a
//! `"status"` tag of `"documented"` or `"undocumented"`.

use crate::model::ModuleDoc;
use crate::render::Renderer;
use anyhow::{Context, Result};

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, doc: &ModuleDoc) -> Result<String> {
        let mut out =
            serde_json::to_string_pretty(doc).context("failed to serialize module doc")?;
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;

    #[test]
    fn tagged_methods() {
        let doc = ModuleDoc {
            name: "Graphics".into(),
            description: String::new(),
            methods: vec![
                MethodDoc::Documented {
                    name: "circle".into(),
                    description: "Draws".into(),
                    signatures: vec![Signature {
                        args: vec![Arg {
                            name: "x".into(),
                            description: None,
                        }],
                    }],
                    examples: Vec::new(),
                    returns: Some("nothing".into()),
                },
                MethodDoc::Undocumented {
                    name: "square".into(),
                },
            ],
            stats: Stats::default(),
        };

        let out = JsonRenderer.render(&doc).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["name"], "Graphics");
        assert_eq!(value["methods"][0]["status"], "documented");
        assert_eq!(value["methods"][0]["signatures"][0]["args"][0]["name"], "x");
        assert_eq!(value["methods"][1]["status"], "undocumented");
        assert_eq!(value["methods"][1]["name"], "square");
        assert_eq!(value["stats"]["documented_percent"], 0);
        assert!(out.ends_with("}\n"));
    }
}
