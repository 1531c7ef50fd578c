use anyhow::Result;

use crate::ast::{BinaryOperator, Expression, Module, Statement, UnaryOperator};
use crate::codegen::emitter::IndentedEmitter;
use crate::codegen::{Generator, escape_string};

pub struct PythonGenerator;

impl Generator for PythonGenerator {
    fn name(&self) -> &'static str {
        "python"
    }

    fn generate(&self, module: &Module) -> Result<String> {
        PythonEmitter::new().generate(module)
    }
}

struct PythonEmitter {
    emitter: IndentedEmitter,
    temp_index: usize,
}

impl PythonEmitter {
    fn new() -> Self {
        Self {
            emitter: IndentedEmitter::new(),
            temp_index: 0,
        }
    }

    fn generate(mut self, module: &Module) -> Result<String> {
        self.emit_prelude()?;
        for statement in &module.body {
            self.emit_statement(statement)?;
        }
        self.emit_epilogue()?;
        Ok(self.emitter.finish())
    }

    /// Locate a sibling `trif_lang` package so generated files run ad hoc,
    /// then bind the runtime and the export registers.
    fn emit_prelude(&mut self) -> Result<()> {
        self.emitter.emit("import pathlib");
        self.emitter.emit("import sys");
        self.emitter.emit(
            "_trif_origin = pathlib.Path(__file__).resolve().parent if '__file__' in globals() else pathlib.Path.cwd()",
        );
        self.emitter
            .emit("for _candidate in (_trif_origin, _trif_origin.parent):");
        self.emitter.indent();
        self.emitter.emit("candidate_pkg = _candidate / 'trif_lang'");
        self.emitter.emit("if candidate_pkg.exists():");
        self.emitter.indent();
        self.emitter.emit("if str(_candidate) not in sys.path:");
        self.emitter.indent();
        self.emitter.emit("sys.path.insert(0, str(_candidate))");
        self.emitter.dedent()?;
        self.emitter.emit("break");
        self.emitter.dedent()?;
        self.emitter.dedent()?;
        self.emitter.emit("from trif_lang.runtime import runtime");
        self.emitter.emit("__trif_exports__ = {}");
        self.emitter.emit("__trif_default_export__ = None");
        self.emitter.emit("");
        Ok(())
    }

    fn emit_epilogue(&mut self) -> Result<()> {
        self.emitter.emit("");
        self.emitter.emit(
            "runtime.register_module_exports(__name__, __trif_exports__, __trif_default_export__)",
        );
        self.emitter.emit("");
        self.emitter.emit("if __name__ == '__main__':");
        self.emitter.indent();
        self.emitter.emit("runtime.default_entry_point(locals())");
        self.emitter.dedent()?;
        Ok(())
    }

    fn temp(&mut self, prefix: &str) -> String {
        let index = self.temp_index;
        self.temp_index += 1;
        format!("__trif_{prefix}_{index}")
    }

    fn emit_statement(&mut self, statement: &Statement) -> Result<()> {
        match statement {
            Statement::Import { module, alias } => {
                let target = alias
                    .clone()
                    .unwrap_or_else(|| module.clone())
                    .replace(['.', '-'], "_");
                self.emitter
                    .emit(&format!("{target} = runtime.import_module('{module}')"));
            }
            Statement::ImportFrom {
                module,
                names,
                default_name,
                namespace_name,
            } => {
                let temp = self.temp("import");
                self.emitter
                    .emit(&format!("{temp} = runtime.import_module('{module}')"));
                if let Some(namespace) = namespace_name {
                    self.emitter.emit(&format!("{namespace} = {temp}"));
                }
                if let Some(default) = default_name {
                    self.emitter
                        .emit(&format!("{default} = runtime.extract_default({temp})"));
                }
                for (source, alias) in names {
                    self.emitter.emit(&format!(
                        "{alias} = runtime.extract_export({temp}, '{source}')"
                    ));
                }
            }
            Statement::Let {
                name,
                value,
                mutable,
                exported,
                is_default,
            } => {
                let mut line = format!("{name} = {}", render_expression(value));
                if !mutable {
                    line.push_str("  # const");
                }
                self.emitter.emit(&line);
                if *exported {
                    self.emitter
                        .emit(&format!("__trif_exports__['{name}'] = {name}"));
                }
                if *is_default {
                    self.emitter
                        .emit(&format!("__trif_default_export__ = {name}"));
                }
            }
            Statement::Assign { target, value } => {
                let line = format!(
                    "{} = {}",
                    render_expression(target),
                    render_expression(value)
                );
                self.emitter.emit(&line);
            }
            Statement::FunctionDef {
                name,
                params,
                body,
                exported,
                is_default,
            } => {
                self.emitter
                    .emit(&format!("def {name}({}):", params.join(", ")));
                self.emitter.indent();
                if body.is_empty() {
                    self.emitter.emit("return None");
                } else {
                    for statement in body {
                        self.emit_statement(statement)?;
                    }
                    if !matches!(body.last(), Some(Statement::Return { .. })) {
                        self.emitter.emit("return None");
                    }
                }
                self.emitter.dedent()?;
                if *exported {
                    self.emitter
                        .emit(&format!("__trif_exports__['{name}'] = {name}"));
                }
                if *is_default {
                    self.emitter
                        .emit(&format!("__trif_default_export__ = {name}"));
                }
                self.emitter.emit("");
            }
            Statement::Return { value } => match value {
                Some(value) => {
                    let line = format!("return {}", render_expression(value));
                    self.emitter.emit(&line);
                }
                None => self.emitter.emit("return None"),
            },
            Statement::ExportNames { names, source } => {
                if let Some(source_module) = source {
                    let temp = self.temp("export");
                    self.emitter
                        .emit(&format!("{temp} = runtime.import_module('{source_module}')"));
                    for (source_name, alias) in names {
                        self.emitter.emit(&format!(
                            "__trif_exports__['{alias}'] = runtime.extract_export({temp}, '{source_name}')"
                        ));
                    }
                } else {
                    for (local, alias) in names {
                        self.emitter
                            .emit(&format!("__trif_exports__['{alias}'] = {local}"));
                    }
                }
            }
            Statement::ExportDefault { value } => {
                let line = format!("__trif_default_export__ = {}", render_expression(value));
                self.emitter.emit(&line);
            }
            Statement::If { test, body, orelse } => {
                let line = format!("if {}:", render_expression(test));
                self.emitter.emit(&line);
                self.emitter.indent();
                for statement in body {
                    self.emit_statement(statement)?;
                }
                self.emitter.dedent()?;
                if !orelse.is_empty() {
                    self.emitter.emit("else:");
                    self.emitter.indent();
                    for statement in orelse {
                        self.emit_statement(statement)?;
                    }
                    self.emitter.dedent()?;
                }
            }
            Statement::While { test, body } => {
                let line = format!("while {}:", render_expression(test));
                self.emitter.emit(&line);
                self.emitter.indent();
                for statement in body {
                    self.emit_statement(statement)?;
                }
                self.emitter.dedent()?;
            }
            Statement::For {
                target,
                iterator,
                body,
            } => {
                let line = format!("for {target} in {}:", render_expression(iterator));
                self.emitter.emit(&line);
                self.emitter.indent();
                for statement in body {
                    self.emit_statement(statement)?;
                }
                self.emitter.dedent()?;
            }
            Statement::Spawn { call } => {
                let line = format!("runtime.spawn({})", render_expression(call));
                self.emitter.emit(&line);
            }
            Statement::Expr(expr) => {
                let line = render_expression(expr);
                self.emitter.emit(&line);
            }
        }
        Ok(())
    }
}

// Python has no `&&`/`||`; the short-circuit operators map to keywords.
fn binary_symbol(op: BinaryOperator) -> &'static str {
    match op {
        BinaryOperator::And => "and",
        BinaryOperator::Or => "or",
        other => other.symbol(),
    }
}

fn render_expression(expr: &Expression) -> String {
    match expr {
        Expression::Name(id) => id.clone(),
        Expression::Number(value) => value.to_string(),
        Expression::Str(value) => escape_string(value),
        Expression::Boolean(true) => "True".to_string(),
        Expression::Boolean(false) => "False".to_string(),
        Expression::Null => "None".to_string(),
        Expression::BinaryOp { left, op, right } => format!(
            "{} {} {}",
            render_expression(left),
            binary_symbol(*op),
            render_expression(right)
        ),
        Expression::UnaryOp { op, operand } => match op {
            UnaryOperator::Neg => format!("-{}", render_expression(operand)),
            UnaryOperator::Not => format!("not {}", render_expression(operand)),
        },
        Expression::Call { callee, args } => {
            let args = args
                .iter()
                .map(render_expression)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}({args})", render_expression(callee))
        }
        Expression::Attribute { object, name } => {
            format!("{}.{name}", render_expression(object))
        }
        Expression::List(elements) => {
            let elements = elements
                .iter()
                .map(render_expression)
                .collect::<Vec<_>>()
                .join(", ");
            format!("[{elements}]")
        }
        Expression::Dict(pairs) => {
            let pairs = pairs
                .iter()
                .map(|(key, value)| {
                    format!("{}: {}", render_expression(key), render_expression(value))
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{{pairs}}}")
        }
    }
}
