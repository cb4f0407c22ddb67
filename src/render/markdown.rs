//! Markdown reference page renderer.
//!
//! Layout: module heading and description, one `#` section per documented
//! method, a bare section per undocumented method, then a coverage footer.

use crate::model::*;
use crate::render::Renderer;
use anyhow::Result;

/// Language tag on example fences.
const EXAMPLE_LANG: &str = "ruby";

pub struct MarkdownRenderer {
    repo_url: String,
}

impl MarkdownRenderer {
    /// `repo_url` is the web base of the repository; commit links are
    /// `<repo_url>/commit/<hash>`.
    pub fn new(repo_url: &str) -> Self {
        Self {
            repo_url: repo_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, doc: &ModuleDoc) -> Result<String> {
        let mut output = String::new();

        output.push_str(&heading(&doc.name, &doc.description));
        output.push('\n');

        for method in doc.documented_methods() {
            output.push_str(&render_method(method));
            output.push('\n');
        }

        for method in doc.nodoc_methods() {
            output.push_str(&render_method(method));
            output.push('\n');
        }

        output.push_str(&self.render_footer(&doc.stats));
        Ok(output)
    }
}

impl MarkdownRenderer {
    fn render_footer(&self, stats: &Stats) -> String {
        let mut lines: Vec<String> = vec!["---".to_string(), String::new()];

        let rev = &stats.revision;
        if rev.short_hash.is_empty() {
            lines.push(format!("Generated **{}**", stats.date));
        } else {
            lines.push(format!(
                "Generated **{}** against [{}]({}/commit/{})",
                stats.date, rev.short_hash, self.repo_url, rev.hash
            ));
        }
        lines.push(String::new());
        lines.push(format!(
            "{}% of methods documented, {}% given examples.",
            stats.documented_percent, stats.exampled_percent
        ));
        lines.push(String::new());

        lines.join("\n")
    }
}

/// `# name` followed by the description, if any.
fn heading(name: &str, description: &str) -> String {
    if description.is_empty() {
        format!("# {}\n", name)
    } else {
        format!("# {}\n{}\n", name, description)
    }
}

/// Render a single method section; every section ends with a blank line.
fn render_method(method: &MethodDoc) -> String {
    let (name, description, signatures, examples, returns) = match method {
        MethodDoc::Undocumented { name } => {
            return format!("# {}\n*Not documented yet*\n", name);
        }
        MethodDoc::Documented {
            name,
            description,
            signatures,
            examples,
            returns,
        } => (name, description, signatures, examples, returns),
    };

    let mut lines: Vec<String> = vec![heading(name, description)];

    lines.push("**Syntax**\n".to_string());
    if signatures.is_empty() {
        lines.push(format!("`{}`\n", name));
    }
    for sig in signatures {
        lines.push(format!("`{} {}`\n", name, sig.arg_list()));
        for arg in &sig.args {
            lines.push(render_arg(arg));
        }
        lines.push(String::new());
    }

    lines.push("**Examples**\n".to_string());
    if examples.is_empty() {
        lines.push("*No examples provided*".to_string());
    }
    for example in examples {
        lines.push(format!("```{}", EXAMPLE_LANG));
        lines.push(example.clone());
        lines.push("```".to_string());
    }
    lines.push(String::new());

    match returns {
        Some(r) => lines.push(format!("**Returns** {}", r)),
        None => lines.push("**Returns**".to_string()),
    }
    lines.push(String::new());

    lines.join("\n")
}

/// `  * name - description`, or `  * name` when undescribed.
fn render_arg(arg: &Arg) -> String {
    match arg.description {
        Some(ref desc) => format!("  * {} - {}", arg.name, desc),
        None => format!("  * {}", arg.name),
    }
}
