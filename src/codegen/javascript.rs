use anyhow::Result;

use crate::ast::{Expression, Module, Statement};
use crate::codegen::emitter::IndentedEmitter;
use crate::codegen::{Generator, escape_string};

pub struct JavaScriptGenerator;

impl Generator for JavaScriptGenerator {
    fn name(&self) -> &'static str {
        "javascript"
    }

    fn generate(&self, module: &Module) -> Result<String> {
        JavaScriptEmitter::new().generate(module)
    }
}

struct JavaScriptEmitter {
    emitter: IndentedEmitter,
    temp_index: usize,
}

impl JavaScriptEmitter {
    fn new() -> Self {
        Self {
            emitter: IndentedEmitter::new(),
            temp_index: 0,
        }
    }

    fn generate(mut self, module: &Module) -> Result<String> {
        self.emitter
            .emit("import { runtime } from '@trif/lang/runtime.js'");
        self.emitter.emit("const __trif_exports__ = new Map();");
        self.emitter.emit("let __trif_default_export__ = null;");
        self.emitter.emit("");
        for statement in &module.body {
            self.emit_statement(statement)?;
        }
        self.emitter.emit("");
        self.emitter.emit("export default __trif_default_export__;");
        self.emitter.emit("export const exports = __trif_exports__;");
        Ok(self.emitter.finish())
    }

    /// Module temporaries get a fresh suffix so that several selective
    /// imports or re-exports in one file cannot shadow each other.
    fn temp(&mut self) -> String {
        let index = self.temp_index;
        self.temp_index += 1;
        format!("__trif_mod_{index}")
    }

    fn emit_statement(&mut self, statement: &Statement) -> Result<()> {
        match statement {
            Statement::Import { module, alias } => {
                let target = alias.clone().unwrap_or_else(|| module.clone());
                self.emitter.emit(&format!(
                    "const {target} = await runtime.importModule('{module}');"
                ));
            }
            Statement::ImportFrom {
                module,
                names,
                default_name,
                namespace_name,
            } => {
                let temp = self.temp();
                self.emitter.emit(&format!(
                    "const {temp} = await runtime.importModule('{module}');"
                ));
                if let Some(namespace) = namespace_name {
                    self.emitter.emit(&format!("const {namespace} = {temp};"));
                }
                if let Some(default) = default_name {
                    self.emitter
                        .emit(&format!("const {default} = runtime.extractDefault({temp});"));
                }
                for (source, alias) in names {
                    self.emitter.emit(&format!(
                        "const {alias} = runtime.extractExport({temp}, '{source}');"
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
                let keyword = if *mutable { "let" } else { "const" };
                let line = format!("{keyword} {name} = {};", render_expression(value));
                self.emitter.emit(&line);
                if *exported {
                    self.emitter
                        .emit(&format!("__trif_exports__.set('{name}', {name});"));
                }
                if *is_default {
                    self.emitter
                        .emit(&format!("__trif_default_export__ = {name};"));
                }
            }
            Statement::Assign { target, value } => {
                let line = format!(
                    "{} = {};",
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
                    .emit(&format!("function {name}({}) {{", params.join(", ")));
                self.emitter.indent();
                if body.is_empty() {
                    self.emitter.emit("return null;");
                } else {
                    for statement in body {
                        self.emit_statement(statement)?;
                    }
                    if !matches!(body.last(), Some(Statement::Return { .. })) {
                        self.emitter.emit("return null;");
                    }
                }
                self.emitter.dedent()?;
                self.emitter.emit("}");
                if *exported {
                    self.emitter
                        .emit(&format!("__trif_exports__.set('{name}', {name});"));
                }
                if *is_default {
                    self.emitter
                        .emit(&format!("__trif_default_export__ = {name};"));
                }
                self.emitter.emit("");
            }
            Statement::Return { value } => match value {
                Some(value) => {
                    let line = format!("return {};", render_expression(value));
                    self.emitter.emit(&line);
                }
                None => self.emitter.emit("return null;"),
            },
            Statement::ExportNames { names, source } => {
                if let Some(source_module) = source {
                    let temp = self.temp();
                    self.emitter.emit(&format!(
                        "const {temp} = await runtime.importModule('{source_module}');"
                    ));
                    for (source_name, alias) in names {
                        self.emitter.emit(&format!(
                            "__trif_exports__.set('{alias}', runtime.extractExport({temp}, '{source_name}'));"
                        ));
                    }
                } else {
                    for (local, alias) in names {
                        self.emitter
                            .emit(&format!("__trif_exports__.set('{alias}', {local});"));
                    }
                }
            }
            Statement::ExportDefault { value } => {
                let line = format!("__trif_default_export__ = {};", render_expression(value));
                self.emitter.emit(&line);
            }
            Statement::If { test, body, orelse } => {
                let line = format!("if ({}) {{", render_expression(test));
                self.emitter.emit(&line);
                self.emitter.indent();
                for statement in body {
                    self.emit_statement(statement)?;
                }
                self.emitter.dedent()?;
                if !orelse.is_empty() {
                    self.emitter.emit("} else {");
                    self.emitter.indent();
                    for statement in orelse {
                        self.emit_statement(statement)?;
                    }
                    self.emitter.dedent()?;
                }
                self.emitter.emit("}");
            }
            Statement::While { test, body } => {
                let line = format!("while ({}) {{", render_expression(test));
                self.emitter.emit(&line);
                self.emitter.indent();
                for statement in body {
                    self.emit_statement(statement)?;
                }
                self.emitter.dedent()?;
                self.emitter.emit("}");
            }
            Statement::For {
                target,
                iterator,
                body,
            } => {
                let line = format!("for (const {target} of {}) {{", render_expression(iterator));
                self.emitter.emit(&line);
                self.emitter.indent();
                for statement in body {
                    self.emit_statement(statement)?;
                }
                self.emitter.dedent()?;
                self.emitter.emit("}");
            }
            Statement::Spawn { call } => {
                let line = format!("runtime.spawn({});", render_expression(call));
                self.emitter.emit(&line);
            }
            Statement::Expr(expr) => {
                let line = format!("{};", render_expression(expr));
                self.emitter.emit(&line);
            }
        }
        Ok(())
    }
}

fn render_expression(expr: &Expression) -> String {
    match expr {
        Expression::Name(id) => id.clone(),
        Expression::Number(value) => value.to_string(),
        Expression::Str(value) => escape_string(value),
        Expression::Boolean(true) => "true".to_string(),
        Expression::Boolean(false) => "false".to_string(),
        Expression::Null => "null".to_string(),
        Expression::BinaryOp { left, op, right } => format!(
            "{} {} {}",
            render_expression(left),
            op.symbol(),
            render_expression(right)
        ),
        Expression::UnaryOp { op, operand } => {
            format!("{}{}", op.symbol(), render_expression(operand))
        }
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
