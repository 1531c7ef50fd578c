use anyhow::Result;

use crate::ast::Module;
use crate::codegen::Generator;

/// Skeleton program emitted for every module. Real C++ lowering does not
/// exist yet; the marker comment shows where it would go.
const STUB: &str = "\
#include <trif/runtime.hpp>
#include <utility>

int main(int argc, char** argv) {
    trif::runtime::Runtime runtime;
    auto exports = runtime.create_module();
    auto default_export = runtime.null_value();
    runtime.bootstrap(argv[0]);
    // TODO: Generated body
    runtime.register_module(exports, default_export);
    return 0;
}
";

pub struct CppGenerator;

impl Generator for CppGenerator {
    fn name(&self) -> &'static str {
        "cpp"
    }

    fn generate(&self, _module: &Module) -> Result<String> {
        Ok(STUB.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse_tokens;

    fn generate(source: &str) -> String {
        let tokens = tokenize(source).expect("tokenize should succeed");
        let module = parse_tokens(&tokens).expect("parse should succeed");
        CppGenerator
            .generate(&module)
            .expect("generate should succeed")
    }

    #[test]
    fn stub_ignores_the_module_body() {
        assert_eq!(generate(""), generate("let x = 1\nspawn work()"));
    }

    #[test]
    fn stub_constructs_and_registers_a_runtime() {
        let output = generate("let x = 1");
        assert!(output.starts_with("#include <trif/runtime.hpp>\n"));
        assert!(output.contains("trif::runtime::Runtime runtime;\n"));
        assert!(output.contains("runtime.register_module(exports, default_export);\n"));
        assert!(output.ends_with("    return 0;\n}\n"));
    }
}
