//! Graphics binding — scripting-side drawing calls forwarded to the native
//! graphics library after numeric coercion.
//!
//! There is no state here beyond the backend itself; every call coerces its
//! arguments and forwards them unchanged.

use regex::Regex;
use std::ffi::{CStr, CString};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

// Leading numeric prefix of a string: "12.5px" -> "12.5"
static RE_FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:[0-9]+(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?|\.[0-9]+)").unwrap()
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphicsError {
    #[error("can't convert {0} into Float")]
    Coerce(&'static str),
    #[error("text contains an interior NUL byte")]
    InteriorNul,
}

/// A dynamically typed value handed over by the scripting layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(true) => "true",
            Value::Bool(false) => "false",
            Value::Int(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Str(_) => "String",
        }
    }

    /// Coerce to a native float. Strings use their leading numeric prefix
    /// and fall back to 0.0; booleans do not convert.
    pub fn to_f(&self) -> Result<f32, GraphicsError> {
        match self {
            Value::Nil => Ok(0.0),
            Value::Int(i) => Ok(*i as f32),
            Value::Float(f) => Ok(*f as f32),
            Value::Str(s) => Ok(RE_FLOAT_PREFIX
                .find(s)
                .and_then(|m| m.as_str().trim().parse::<f32>().ok())
                .unwrap_or(0.0)),
            Value::Bool(_) => Err(GraphicsError::Coerce(self.type_name())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

/// The native library calls the binding forwards to.
pub trait Native {
    fn circle(&mut self, x: f32, y: f32, z: f32, radius: f32);
    fn translate(&mut self, x: f32, y: f32, z: f32);
    fn draw_bitmap_string(&mut self, text: &CStr, x: f32, y: f32);
}

/// Drawing functions exposed to scripts.
pub struct Graphics<N: Native> {
    native: N,
}

impl<N: Native> Graphics<N> {
    pub fn new(native: N) -> Self {
        Self { native }
    }

    pub fn native(&self) -> &N {
        &self.native
    }

    pub fn circle(&mut self, x: &Value, y: &Value, z: &Value, r: &Value) -> Result<(), GraphicsError> {
        self.native.circle(x.to_f()?, y.to_f()?, z.to_f()?, r.to_f()?);
        Ok(())
    }

    /// `z` defaults to 0.0.
    pub fn translate(&mut self, x: &Value, y: &Value, z: Option<&Value>) -> Result<(), GraphicsError> {
        let z = match z {
            Some(z) => z.to_f()?,
            None => 0.0,
        };
        self.native.translate(x.to_f()?, y.to_f()?, z);
        Ok(())
    }

    pub fn text(&mut self, s: &Value, x: &Value, y: &Value) -> Result<(), GraphicsError> {
        let text = CString::new(s.to_string()).map_err(|_| GraphicsError::InteriorNul)?;
        self.native.draw_bitmap_string(&text, x.to_f()?, y.to_f()?);
        Ok(())
    }
}

/// openFrameworks backend, through the C-linkage shim in `libof`.
#[cfg(feature = "openframeworks")]
pub mod of {
    use super::Native;
    use std::ffi::{c_char, CStr};

    #[link(name = "of")]
    extern "C" {
        fn ofCircle(x: f32, y: f32, z: f32, radius: f32);
        fn ofTranslate(x: f32, y: f32, z: f32);
        fn ofDrawBitmapString(text: *const c_char, x: f32, y: f32);
    }

    /// Must only be driven from the thread that owns the GL context.
    pub struct OfNative;

    impl Native for OfNative {
        fn circle(&mut self, x: f32, y: f32, z: f32, radius: f32) {
            unsafe { ofCircle(x, y, z, radius) }
        }

        fn translate(&mut self, x: f32, y: f32, z: f32) {
            unsafe { ofTranslate(x, y, z) }
        }

        fn draw_bitmap_string(&mut self, text: &CStr, x: f32, y: f32) {
            // text outlives the call; the library copies what it draws
            unsafe { ofDrawBitmapString(text.as_ptr(), x, y) }
        }
    }
}
