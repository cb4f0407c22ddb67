//! Declaration extractor — pulls the module and its private methods out of
//! the `Init_*` routine.
//!
//! Purely textual: a routine that does not follow the conventional shape
//! simply produces no matches.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

// Definition only: a `;` before the opening brace means a prototype
static RE_INIT_ROUTINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"void\s+Init[^;{]*\{").unwrap());

static RE_MODULE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^void\s+Init_([A-Za-z0-9_]+)\s*\(").unwrap());

static RE_ANY_PRIVATE_METHOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"rb_define_private_method\s*\(").unwrap());

/// A fatal extraction failure: the report cannot be produced without these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("initializer routine (void Init_<module>) not found")]
    MissingInitRoutine,
    #[error("module name not found in initializer routine")]
    MissingModuleName,
    #[error("module variable for `{module}` not found (expected `var = rb_define_module(...\"{module}\")`)")]
    MissingModuleVariable { module: String },
}

/// What the initializer routine declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declarations {
    /// Byte offset of the initializer routine in the source
    pub init_start: usize,
    pub module_name: String,
    /// Local variable the module object is bound to
    pub module_var: String,
    /// Private methods in registration order
    pub methods: Vec<Registration>,
}

/// One `rb_define_private_method` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Name exposed to scripts
    pub name: String,
    /// Implementing C symbol
    pub symbol: String,
}

/// Extract the module declarations from raw source text.
pub fn extract(source: &str) -> Result<Declarations, ExtractError> {
    let init_start = RE_INIT_ROUTINE
        .find(source)
        .ok_or(ExtractError::MissingInitRoutine)?
        .start();
    // The routine runs to the last closing brace of the file.
    let init_end = source
        .rfind('}')
        .filter(|&end| end > init_start)
        .ok_or(ExtractError::MissingInitRoutine)?;
    let init_func = &source[init_start..=init_end];

    let module_name = RE_MODULE_NAME
        .captures(init_func)
        .map(|caps| caps[1].to_string())
        .ok_or(ExtractError::MissingModuleName)?;

    let module_var = find_module_var(init_func, &module_name).ok_or_else(|| {
        ExtractError::MissingModuleVariable {
            module: module_name.clone(),
        }
    })?;

    let methods = find_private_methods(init_func, &module_var);

    let registered = RE_ANY_PRIVATE_METHOD.find_iter(init_func).count();
    if registered > methods.len() {
        tracing::warn!(
            skipped = registered - methods.len(),
            module_var = %module_var,
            "private method registrations not bound to the module variable were skipped"
        );
    }

    Ok(Declarations {
        init_start,
        module_name,
        module_var,
        methods,
    })
}

/// `var = rb_define_module("Name")` or `var = rb_define_module_under(parent, "Name")`.
fn find_module_var(init_func: &str, module_name: &str) -> Option<String> {
    let pattern = format!(
        r#"([^\s=]+)\s*=\s*rb_define_module[^(]*\([^"]*"{}""#,
        regex::escape(module_name)
    );
    let re = Regex::new(&pattern).ok()?;
    re.captures(init_func).map(|caps| caps[1].to_string())
}

/// `rb_define_private_method(var, "name", RB_FUNC(symbol), argc)`; the
/// `RB_FUNC` wrapper is optional.
fn find_private_methods(init_func: &str, module_var: &str) -> Vec<Registration> {
    let pattern = format!(
        r#"rb_define_private_method\s*\(\s*{}\s*,\s*"([^"]+)"\s*,\s*(?:RB_FUNC\s*\(\s*)?([A-Za-z_][A-Za-z0-9_]*)"#,
        regex::escape(module_var)
    );
    let Ok(re) = Regex::new(&pattern) else {
        return Vec::new();
    };
    re.captures_iter(init_func)
        .map(|caps| Registration {
            name: caps[1].to_string(),
            symbol: caps[2].to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const INIT: &str = r#"
VALUE zj_circle(int argc, VALUE* argv, VALUE klass) { return Qnil; }

void Init_Graphics() {
  zj_mGraphics = rb_define_module_under(zj_mZajal, "Graphics");
  rb_define_private_method(zj_mGraphics, "circle", RB_FUNC(zj_circle), -1);
  rb_define_private_method(zj_mGraphics, "smoothing?", zj_smoothing_p, 0);
  rb_define_private_method(zj_mOther, "stray", RB_FUNC(zj_stray), 0);
}
"#;

    #[test]
    fn extracts_module_and_methods() {
        let decls = extract(INIT).unwrap();
        assert_eq!(decls.module_name, "Graphics");
        assert_eq!(decls.module_var, "zj_mGraphics");
        assert_eq!(
            decls.methods,
            vec![
                Registration {
                    name: "circle".into(),
                    symbol: "zj_circle".into()
                },
                Registration {
                    name: "smoothing?".into(),
                    symbol: "zj_smoothing_p".into()
                },
            ]
        );
        assert_eq!(&INIT[decls.init_start..decls.init_start + 9], "void Init");
    }

    #[test]
    fn top_level_module() {
        let src = "void Init_Events() {\n  mEvents = rb_define_module(\"Events\");\n}\n";
        let decls = extract(src).unwrap();
        assert_eq!(decls.module_var, "mEvents");
        assert!(decls.methods.is_empty());
    }

    #[test]
    fn skips_init_prototype() {
        let src = "void Init_Graphics();\n\nVALUE zj_circle(VALUE self) { return Qnil; }\n\nvoid Init_Graphics() {\n  mGraphics = rb_define_module(\"Graphics\");\n  rb_define_private_method(mGraphics, \"circle\", zj_circle, 0);\n}\n";
        let decls = extract(src).unwrap();
        assert_eq!(decls.init_start, src.rfind("void Init_Graphics").unwrap());
        assert_eq!(decls.methods.len(), 1);
    }

    #[test]
    fn prototype_only_is_missing() {
        assert_eq!(
            extract("void Init_Graphics();\nVALUE f() { return Qnil; }\n"),
            Err(ExtractError::MissingInitRoutine)
        );
    }

    #[test]
    fn missing_init_routine() {
        assert_eq!(
            extract("VALUE f() { return Qnil; }\n"),
            Err(ExtractError::MissingInitRoutine)
        );
    }

    #[test]
    fn missing_module_name() {
        assert_eq!(
            extract("void Init() {\n}\n"),
            Err(ExtractError::MissingModuleName)
        );
    }

    #[test]
    fn missing_module_variable() {
        let err = extract("void Init_Sound() {\n  rb_define_private_method(x, \"play\", f, 0);\n}\n")
            .unwrap_err();
        assert_eq!(
            err,
            ExtractError::MissingModuleVariable {
                module: "Sound".into()
            }
        );
        assert!(err.to_string().contains("Sound"));
    }
}
