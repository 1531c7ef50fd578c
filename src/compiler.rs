use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use crate::codegen::{
    Generator, cpp::CppGenerator, javascript::JavaScriptGenerator, python::PythonGenerator,
};
use crate::lexer;
use crate::parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Python,
    JavaScript,
    Cpp,
}

impl Target {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "python" => Some(Target::Python),
            "javascript" | "js" => Some(Target::JavaScript),
            "cpp" | "c++" => Some(Target::Cpp),
            _ => None,
        }
    }

    fn generator(self) -> Box<dyn Generator> {
        match self {
            Target::Python => Box::new(PythonGenerator),
            Target::JavaScript => Box::new(JavaScriptGenerator),
            Target::Cpp => Box::new(CppGenerator),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CompileOptions {
    pub target: Target,
    /// Surface the raw stage error instead of the wrapped form.
    pub aggressive_errors: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            target: Target::Python,
            aggressive_errors: false,
        }
    }
}

pub fn compile_source(source: &str, options: &CompileOptions) -> Result<String> {
    let result = run_pipeline(source, options.target);
    if options.aggressive_errors {
        result
    } else {
        result.context("Compilation failed")
    }
}

pub fn compile_file(path: &Path, options: &CompileOptions) -> Result<String> {
    let source = fs::read_to_string(path)
        .map_err(|_| anyhow!("Unable to open file: {}", path.display()))?;
    compile_source(&source, options)
}

fn run_pipeline(source: &str, target: Target) -> Result<String> {
    let tokens = lexer::tokenize(source)?;
    let module = parser::parse_tokens(&tokens)?;
    target.generator().generate(&module)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_target_aliases() {
        assert_eq!(Target::from_name("python"), Some(Target::Python));
        assert_eq!(Target::from_name("javascript"), Some(Target::JavaScript));
        assert_eq!(Target::from_name("js"), Some(Target::JavaScript));
        assert_eq!(Target::from_name("cpp"), Some(Target::Cpp));
        assert_eq!(Target::from_name("c++"), Some(Target::Cpp));
        assert_eq!(Target::from_name("rust"), None);
    }

    #[test]
    fn wraps_errors_by_default() {
        let options = CompileOptions::default();
        let err = compile_source("spawn 42", &options).expect_err("expected failure");
        assert_eq!(
            format!("{err:#}"),
            "Compilation failed: spawn expects a function call"
        );
    }

    #[test]
    fn aggressive_mode_surfaces_the_raw_error() {
        let options = CompileOptions {
            target: Target::Python,
            aggressive_errors: true,
        };
        let err = compile_source("spawn 42", &options).expect_err("expected failure");
        assert_eq!(format!("{err:#}"), "spawn expects a function call");
    }

    #[test]
    fn lex_errors_flow_through_the_same_policy() {
        let options = CompileOptions::default();
        let err = compile_source("let x = @", &options).expect_err("expected failure");
        assert_eq!(
            format!("{err:#}"),
            "Compilation failed: Unexpected character '@' at line 1 column 9"
        );
    }

    #[test]
    fn compiles_for_every_target() {
        for target in [Target::Python, Target::JavaScript, Target::Cpp] {
            let options = CompileOptions {
                target,
                aggressive_errors: false,
            };
            let output =
                compile_source("let x = 1", &options).expect("compile should succeed");
            assert!(!output.is_empty());
        }
    }

    #[test]
    fn missing_file_reports_the_path() {
        let options = CompileOptions::default();
        let err = compile_file(Path::new("no/such/module.trif"), &options)
            .expect_err("expected failure");
        assert_eq!(format!("{err:#}"), "Unable to open file: no/such/module.trif");
    }
}
