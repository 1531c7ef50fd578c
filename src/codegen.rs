use anyhow::Result;

use crate::ast::Module;

pub mod cpp;
pub mod emitter;
pub mod javascript;
pub mod python;

pub trait Generator {
    fn name(&self) -> &'static str;
    fn generate(&self, module: &Module) -> Result<String>;
}

pub fn generators() -> Vec<Box<dyn Generator>> {
    vec![
        Box::new(python::PythonGenerator),
        Box::new(javascript::JavaScriptGenerator),
        Box::new(cpp::CppGenerator),
    ]
}

/// Re-escape a decoded string payload for emission, always double-quoted.
pub(crate) fn escape_string(value: &str) -> String {
    let mut result = String::with_capacity(value.len() + 2);
    result.push('"');
    for c in value.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            other => result.push(other),
        }
    }
    result.push('"');
    result
}
