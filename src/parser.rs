use anyhow::{Context, Result, bail};

pub mod ast;

use self::ast::{BinaryOperator, Expression, Module, Statement, UnaryOperator};
use crate::token::{Span, Token, TokenKind};

/// Name given to an anonymous `export default fn`. The `__trif_` prefix is
/// reserved for generated bindings, so user identifiers cannot collide
/// with it.
pub const DEFAULT_EXPORT_FN: &str = "__trif_default_fn__";

static EOF_TOKEN: Token = Token {
    kind: TokenKind::Eof,
    span: Span { line: 0, column: 0 },
};

pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse_module(mut self) -> Result<Module> {
        let mut body = Vec::new();
        while !matches!(self.current().kind, TokenKind::Eof) {
            if self.skip_separators() {
                continue;
            }
            body.push(self.parse_statement()?);
        }
        Ok(Module { body })
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        let statement = self.parse_statement_inner()?;
        self.skip_separators();
        Ok(statement)
    }

    fn parse_statement_inner(&mut self) -> Result<Statement> {
        if matches!(self.current().kind, TokenKind::Import) {
            return self.parse_import_statement();
        }
        if matches!(self.current().kind, TokenKind::Export) {
            return self.parse_export_statement();
        }
        if matches!(self.current().kind, TokenKind::Let | TokenKind::Const) {
            let mutable = matches!(self.current().kind, TokenKind::Let);
            self.advance();
            return self.parse_variable_statement(mutable, false, false);
        }
        if matches!(self.current().kind, TokenKind::Fn | TokenKind::Function) {
            return self.parse_function_statement(false, false);
        }
        if matches!(self.current().kind, TokenKind::Return) {
            self.advance();
            let value = if matches!(
                self.current().kind,
                TokenKind::Newline | TokenKind::RBrace | TokenKind::Eof
            ) {
                None
            } else {
                Some(self.parse_expression()?)
            };
            return Ok(Statement::Return { value });
        }
        if matches!(self.current().kind, TokenKind::If) {
            self.advance();
            let test = self.parse_expression()?;
            let body = self.parse_block()?;
            let orelse = if self.eat(&TokenKind::Else) {
                self.parse_block()?
            } else {
                Vec::new()
            };
            return Ok(Statement::If { test, body, orelse });
        }
        if matches!(self.current().kind, TokenKind::While) {
            self.advance();
            let test = self.parse_expression()?;
            let body = self.parse_block()?;
            return Ok(Statement::While { test, body });
        }
        if matches!(self.current().kind, TokenKind::For) {
            self.advance();
            let target = self.expect_name()?;
            self.expect(&TokenKind::In)?;
            let iterator = self.parse_expression()?;
            let body = self.parse_block()?;
            return Ok(Statement::For {
                target,
                iterator,
                body,
            });
        }
        if matches!(self.current().kind, TokenKind::Spawn) {
            self.advance();
            let call = self.parse_expression()?;
            if !matches!(call, Expression::Call { .. }) {
                bail!("spawn expects a function call");
            }
            return Ok(Statement::Spawn { call });
        }

        let expr = self.parse_expression()?;
        if matches!(expr, Expression::Name(_) | Expression::Attribute { .. }) && self.eat_op("=") {
            let value = self.parse_expression()?;
            return Ok(Statement::Assign {
                target: expr,
                value,
            });
        }
        Ok(Statement::Expr(expr))
    }

    fn parse_import_statement(&mut self) -> Result<Statement> {
        self.expect(&TokenKind::Import)?;

        // A quoted module is always a whole-module import, even before
        // any `from` lookahead.
        if let TokenKind::Str(module) = &self.current().kind {
            let module = module.clone();
            self.advance();
            let alias = if self.eat(&TokenKind::As) {
                Some(self.expect_name()?)
            } else {
                None
            };
            return Ok(Statement::Import { module, alias });
        }

        let mut default_name = None;
        let mut names = Vec::new();
        let mut namespace_name = None;

        if matches!(self.current().kind, TokenKind::Name(_))
            && matches!(self.peek().kind, TokenKind::Comma)
        {
            default_name = Some(self.expect_name()?);
            self.advance();
            if matches!(self.current().kind, TokenKind::LBrace) {
                names = self.parse_specifier_list()?;
            } else {
                bail!("Expected named import list after comma");
            }
        } else if matches!(self.current().kind, TokenKind::Name(_))
            && matches!(self.peek().kind, TokenKind::From)
        {
            default_name = Some(self.expect_name()?);
        } else if matches!(self.current().kind, TokenKind::LBrace) {
            names = self.parse_specifier_list()?;
        } else if self.eat_op("*") {
            self.expect(&TokenKind::As)?;
            namespace_name = Some(self.expect_name()?);
        }

        if default_name.is_some() || !names.is_empty() || namespace_name.is_some() {
            self.expect(&TokenKind::From)?;
            let module = self.parse_module_specifier()?;
            return Ok(Statement::ImportFrom {
                module,
                names,
                default_name,
                namespace_name,
            });
        }

        let module = self.parse_module_specifier()?;
        let alias = if self.eat(&TokenKind::As) {
            Some(self.expect_name()?)
        } else {
            None
        };
        Ok(Statement::Import { module, alias })
    }

    fn parse_export_statement(&mut self) -> Result<Statement> {
        self.expect(&TokenKind::Export)?;
        if self.eat(&TokenKind::Default) {
            if matches!(self.current().kind, TokenKind::Fn | TokenKind::Function) {
                return self.parse_function_statement(true, true);
            }
            if matches!(self.current().kind, TokenKind::Let | TokenKind::Const) {
                let mutable = matches!(self.current().kind, TokenKind::Let);
                self.advance();
                return self.parse_variable_statement(mutable, true, true);
            }
            let value = self.parse_expression()?;
            return Ok(Statement::ExportDefault { value });
        }
        if matches!(self.current().kind, TokenKind::Fn | TokenKind::Function) {
            return self.parse_function_statement(true, false);
        }
        if matches!(self.current().kind, TokenKind::Let | TokenKind::Const) {
            let mutable = matches!(self.current().kind, TokenKind::Let);
            self.advance();
            return self.parse_variable_statement(mutable, true, false);
        }
        if matches!(self.current().kind, TokenKind::LBrace) {
            let names = self.parse_specifier_list()?;
            let source = if self.eat(&TokenKind::From) {
                Some(self.parse_module_specifier()?)
            } else {
                None
            };
            return Ok(Statement::ExportNames { names, source });
        }
        bail!("Unsupported export statement")
    }

    /// `{ a, b as c, }` into pairs whose second name defaults to the
    /// first. Import specifiers read the pairs as (source, alias), export
    /// specifiers as (local, exported). A trailing comma is tolerated.
    fn parse_specifier_list(&mut self) -> Result<Vec<(String, String)>> {
        self.expect(&TokenKind::LBrace)?;
        let mut names = Vec::new();
        while !matches!(self.current().kind, TokenKind::RBrace) {
            let first = self.expect_name()?;
            let second = if self.eat(&TokenKind::As) {
                self.expect_name()?
            } else {
                first.clone()
            };
            names.push((first, second));
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(names)
    }

    fn parse_module_specifier(&mut self) -> Result<String> {
        if let TokenKind::Str(module) = &self.current().kind {
            let module = module.clone();
            self.advance();
            return Ok(module);
        }
        self.parse_dotted_name()
    }

    fn parse_dotted_name(&mut self) -> Result<String> {
        let mut result = self.expect_name()?;
        while self.eat(&TokenKind::Dot) {
            result.push('.');
            result.push_str(&self.expect_name()?);
        }
        Ok(result)
    }

    fn parse_variable_statement(
        &mut self,
        mutable: bool,
        exported: bool,
        is_default: bool,
    ) -> Result<Statement> {
        let name = self.expect_name()?;
        if !self.eat_op("=") {
            bail!("Expected '=' in variable declaration");
        }
        let value = self.parse_expression()?;
        Ok(Statement::Let {
            name,
            value,
            mutable,
            exported,
            is_default,
        })
    }

    fn parse_function_statement(&mut self, exported: bool, is_default: bool) -> Result<Statement> {
        self.advance();
        let name = if matches!(self.current().kind, TokenKind::Name(_)) {
            self.expect_name()?
        } else if is_default {
            DEFAULT_EXPORT_FN.to_string()
        } else {
            bail!("Function declaration requires a name");
        };
        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        if !matches!(self.current().kind, TokenKind::RParen) {
            loop {
                params.push(self.expect_name()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen)?;
        let body = self.parse_block()?;
        Ok(Statement::FunctionDef {
            name,
            params,
            body,
            exported,
            is_default,
        })
    }

    fn parse_block(&mut self) -> Result<Vec<Statement>> {
        self.expect(&TokenKind::LBrace)?;
        let mut body = Vec::new();
        while !matches!(self.current().kind, TokenKind::RBrace) {
            if self.skip_separators() {
                continue;
            }
            body.push(self.parse_statement()?);
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(body)
    }

    fn parse_expression(&mut self) -> Result<Expression> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expression> {
        let mut expr = self.parse_and()?;
        while self.eat_op("||") {
            let right = self.parse_and()?;
            expr = binary(expr, BinaryOperator::Or, right);
        }
        Ok(expr)
    }

    fn parse_and(&mut self) -> Result<Expression> {
        let mut expr = self.parse_equality()?;
        while self.eat_op("&&") {
            let right = self.parse_equality()?;
            expr = binary(expr, BinaryOperator::And, right);
        }
        Ok(expr)
    }

    fn parse_equality(&mut self) -> Result<Expression> {
        let mut expr = self.parse_comparison()?;
        loop {
            let op = match self.current_op() {
                Some("==") => BinaryOperator::Eq,
                Some("!=") => BinaryOperator::NotEq,
                _ => break,
            };
            self.advance();
            let right = self.parse_comparison()?;
            expr = binary(expr, op, right);
        }
        Ok(expr)
    }

    fn parse_comparison(&mut self) -> Result<Expression> {
        let mut expr = self.parse_term()?;
        loop {
            let op = match self.current_op() {
                Some("<") => BinaryOperator::Less,
                Some("<=") => BinaryOperator::LessEq,
                Some(">") => BinaryOperator::Greater,
                Some(">=") => BinaryOperator::GreaterEq,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            expr = binary(expr, op, right);
        }
        Ok(expr)
    }

    fn parse_term(&mut self) -> Result<Expression> {
        let mut expr = self.parse_factor()?;
        loop {
            let op = match self.current_op() {
                Some("+") => BinaryOperator::Add,
                Some("-") => BinaryOperator::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_factor()?;
            expr = binary(expr, op, right);
        }
        Ok(expr)
    }

    fn parse_factor(&mut self) -> Result<Expression> {
        let mut expr = self.parse_unary()?;
        loop {
            let op = match self.current_op() {
                Some("*") => BinaryOperator::Mul,
                Some("/") => BinaryOperator::Div,
                Some("%") => BinaryOperator::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            expr = binary(expr, op, right);
        }
        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<Expression> {
        let op = match self.current_op() {
            Some("-") => Some(UnaryOperator::Neg),
            Some("!") => Some(UnaryOperator::Not),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expression::UnaryOp {
                op,
                operand: Box::new(operand),
            });
        }
        self.parse_call_expression()
    }

    fn parse_call_expression(&mut self) -> Result<Expression> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.eat(&TokenKind::LParen) {
                let mut args = Vec::new();
                if !matches!(self.current().kind, TokenKind::RParen) {
                    loop {
                        args.push(self.parse_expression()?);
                        if !self.eat(&TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.expect(&TokenKind::RParen)?;
                expr = Expression::Call {
                    callee: Box::new(expr),
                    args,
                };
            } else if self.eat(&TokenKind::Dot) {
                let name = self.expect_name()?;
                expr = Expression::Attribute {
                    object: Box::new(expr),
                    name,
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        if let TokenKind::Number(text) = &self.current().kind {
            let value = text
                .parse::<f64>()
                .with_context(|| format!("Invalid number literal '{text}'"))?;
            self.advance();
            return Ok(Expression::Number(value));
        }
        if let TokenKind::Str(value) = &self.current().kind {
            let value = value.clone();
            self.advance();
            return Ok(Expression::Str(value));
        }
        if self.eat(&TokenKind::True) {
            return Ok(Expression::Boolean(true));
        }
        if self.eat(&TokenKind::False) {
            return Ok(Expression::Boolean(false));
        }
        if self.eat(&TokenKind::Null) {
            return Ok(Expression::Null);
        }
        if let TokenKind::Name(id) = &self.current().kind {
            let id = id.clone();
            self.advance();
            return Ok(Expression::Name(id));
        }
        if self.eat(&TokenKind::LParen) {
            let expr = self.parse_expression()?;
            self.expect(&TokenKind::RParen)?;
            return Ok(expr);
        }
        if self.eat(&TokenKind::LBracket) {
            let mut elements = Vec::new();
            if !matches!(self.current().kind, TokenKind::RBracket) {
                loop {
                    elements.push(self.parse_expression()?);
                    if !self.eat(&TokenKind::Comma) {
                        break;
                    }
                }
            }
            self.expect(&TokenKind::RBracket)?;
            return Ok(Expression::List(elements));
        }
        if self.eat(&TokenKind::LBrace) {
            let mut pairs = Vec::new();
            if !matches!(self.current().kind, TokenKind::RBrace) {
                loop {
                    let key = self.parse_expression()?;
                    self.expect(&TokenKind::Colon)?;
                    let value = self.parse_expression()?;
                    pairs.push((key, value));
                    if !self.eat(&TokenKind::Comma) {
                        break;
                    }
                }
            }
            self.expect(&TokenKind::RBrace)?;
            return Ok(Expression::Dict(pairs));
        }
        Err(self.unexpected())
    }

    fn current(&self) -> &'a Token {
        self.tokens.get(self.pos).unwrap_or(&EOF_TOKEN)
    }

    fn peek(&self) -> &'a Token {
        self.tokens.get(self.pos + 1).unwrap_or(&EOF_TOKEN)
    }

    fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn skip_separators(&mut self) -> bool {
        let mut skipped = false;
        while matches!(
            self.current().kind,
            TokenKind::Newline | TokenKind::Semicolon
        ) {
            self.advance();
            skipped = true;
        }
        skipped
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        if self.current().kind == *kind {
            self.advance();
            Ok(())
        } else {
            Err(self.error(&kind.to_string()))
        }
    }

    fn expect_name(&mut self) -> Result<String> {
        if let TokenKind::Name(name) = &self.current().kind {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.error("NAME"))
        }
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.current().kind == *kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_op(&mut self, symbol: &str) -> bool {
        if matches!(&self.current().kind, TokenKind::Op(op) if op == symbol) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn current_op(&self) -> Option<&'a str> {
        match &self.current().kind {
            TokenKind::Op(op) => Some(op.as_str()),
            _ => None,
        }
    }

    fn error(&self, expected: &str) -> anyhow::Error {
        let token = self.current();
        anyhow::anyhow!(
            "Expected {expected} but got {} at line {}, column {}",
            token.kind(),
            token.span().line,
            token.span().column
        )
    }

    fn unexpected(&self) -> anyhow::Error {
        let token = self.current();
        anyhow::anyhow!(
            "Unexpected token {} at line {}, column {}",
            token.kind(),
            token.span().line,
            token.span().column
        )
    }
}

fn binary(left: Expression, op: BinaryOperator, right: Expression) -> Expression {
    Expression::BinaryOp {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}

pub fn parse_tokens(tokens: &[Token]) -> Result<Module> {
    Parser::new(tokens).parse_module()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_source(source: &str) -> Module {
        let tokens = tokenize(source).expect("tokenize should succeed");
        parse_tokens(&tokens).expect("parse should succeed")
    }

    fn parse_error(source: &str) -> String {
        let tokens = tokenize(source).expect("tokenize should succeed");
        parse_tokens(&tokens)
            .expect_err("expected parse failure")
            .to_string()
    }

    fn name(id: &str) -> Expression {
        Expression::Name(id.to_string())
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let module = parse_source("1 + 2 * 3");
        let expected = Statement::Expr(binary(
            Expression::Number(1.0),
            BinaryOperator::Add,
            binary(
                Expression::Number(2.0),
                BinaryOperator::Mul,
                Expression::Number(3.0),
            ),
        ));
        assert_eq!(module.body, vec![expected]);
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let module = parse_source("a || b && c");
        let expected = Statement::Expr(binary(
            name("a"),
            BinaryOperator::Or,
            binary(name("b"), BinaryOperator::And, name("c")),
        ));
        assert_eq!(module.body, vec![expected]);
    }

    #[test]
    fn unary_not_is_right_associative() {
        let module = parse_source("!!x");
        let expected = Statement::Expr(Expression::UnaryOp {
            op: UnaryOperator::Not,
            operand: Box::new(Expression::UnaryOp {
                op: UnaryOperator::Not,
                operand: Box::new(name("x")),
            }),
        });
        assert_eq!(module.body, vec![expected]);
    }

    #[test]
    fn converts_name_and_attribute_assignments() {
        let module = parse_source("x = 1\nobj.field = 2");
        assert_eq!(
            module.body,
            vec![
                Statement::Assign {
                    target: name("x"),
                    value: Expression::Number(1.0),
                },
                Statement::Assign {
                    target: Expression::Attribute {
                        object: Box::new(name("obj")),
                        name: "field".to_string(),
                    },
                    value: Expression::Number(2.0),
                },
            ]
        );
    }

    #[test]
    fn call_results_are_not_assignment_targets() {
        let message = parse_error("f() = 1");
        assert!(
            message.contains("Unexpected token OP"),
            "got '{message}'"
        );
    }

    #[test]
    fn parses_whole_module_imports() {
        let module = parse_source("import \"fs\"\nimport \"fs\" as files\nimport std.io as io\nimport util");
        assert_eq!(
            module.body,
            vec![
                Statement::Import {
                    module: "fs".to_string(),
                    alias: None,
                },
                Statement::Import {
                    module: "fs".to_string(),
                    alias: Some("files".to_string()),
                },
                Statement::Import {
                    module: "std.io".to_string(),
                    alias: Some("io".to_string()),
                },
                Statement::Import {
                    module: "util".to_string(),
                    alias: None,
                },
            ]
        );
    }

    #[test]
    fn parses_selective_imports() {
        let module = parse_source(
            "import util from \"helpers\"\nimport d, { a, b as c } from \"m\"\nimport { x, } from \"m\"\nimport * as ns from \"m\"",
        );
        assert_eq!(
            module.body,
            vec![
                Statement::ImportFrom {
                    module: "helpers".to_string(),
                    names: vec![],
                    default_name: Some("util".to_string()),
                    namespace_name: None,
                },
                Statement::ImportFrom {
                    module: "m".to_string(),
                    names: vec![
                        ("a".to_string(), "a".to_string()),
                        ("b".to_string(), "c".to_string()),
                    ],
                    default_name: Some("d".to_string()),
                    namespace_name: None,
                },
                Statement::ImportFrom {
                    module: "m".to_string(),
                    names: vec![("x".to_string(), "x".to_string())],
                    default_name: None,
                    namespace_name: None,
                },
                Statement::ImportFrom {
                    module: "m".to_string(),
                    names: vec![],
                    default_name: None,
                    namespace_name: Some("ns".to_string()),
                },
            ]
        );
    }

    #[test]
    fn rejects_default_import_without_named_list() {
        let message = parse_error("import d, x from \"m\"");
        assert_eq!(message, "Expected named import list after comma");
    }

    #[test]
    fn parses_export_declarations() {
        let module = parse_source("export let a = 1\nexport const B = 2");
        assert_eq!(
            module.body,
            vec![
                Statement::Let {
                    name: "a".to_string(),
                    value: Expression::Number(1.0),
                    mutable: true,
                    exported: true,
                    is_default: false,
                },
                Statement::Let {
                    name: "B".to_string(),
                    value: Expression::Number(2.0),
                    mutable: false,
                    exported: true,
                    is_default: false,
                },
            ]
        );
    }

    #[test]
    fn parses_default_function_export() {
        let module = parse_source("export default fn add(a, b) { return a + b }");
        match &module.body[0] {
            Statement::FunctionDef {
                name,
                params,
                exported,
                is_default,
                ..
            } => {
                assert_eq!(name, "add");
                assert_eq!(params, &["a".to_string(), "b".to_string()]);
                assert!(exported);
                assert!(is_default);
            }
            other => panic!("expected function definition, got {other:?}"),
        }
    }

    #[test]
    fn names_anonymous_default_function() {
        let module = parse_source("export default fn(x) { return x }");
        match &module.body[0] {
            Statement::FunctionDef { name, .. } => assert_eq!(name, DEFAULT_EXPORT_FN),
            other => panic!("expected function definition, got {other:?}"),
        }
    }

    #[test]
    fn parses_default_expression_export() {
        let module = parse_source("export default 42");
        assert_eq!(
            module.body,
            vec![Statement::ExportDefault {
                value: Expression::Number(42.0),
            }]
        );
    }

    #[test]
    fn parses_export_name_lists() {
        let module = parse_source("export { a as b, c }\nexport { x } from \"m\"");
        assert_eq!(
            module.body,
            vec![
                Statement::ExportNames {
                    names: vec![
                        ("a".to_string(), "b".to_string()),
                        ("c".to_string(), "c".to_string()),
                    ],
                    source: None,
                },
                Statement::ExportNames {
                    names: vec![("x".to_string(), "x".to_string())],
                    source: Some("m".to_string()),
                },
            ]
        );
    }

    #[test]
    fn rejects_unsupported_export() {
        assert_eq!(parse_error("export 5"), "Unsupported export statement");
    }

    #[test]
    fn spawn_requires_a_call() {
        let module = parse_source("spawn worker(1)");
        match &module.body[0] {
            Statement::Spawn { call } => {
                assert!(matches!(call, Expression::Call { .. }));
            }
            other => panic!("expected spawn, got {other:?}"),
        }
        assert_eq!(parse_error("spawn 42"), "spawn expects a function call");
        assert_eq!(parse_error("spawn worker"), "spawn expects a function call");
    }

    #[test]
    fn return_value_is_optional_before_brace() {
        let module = parse_source("fn f() { return }\nfn g() { return 1 }");
        match &module.body[0] {
            Statement::FunctionDef { body, .. } => {
                assert_eq!(body, &vec![Statement::Return { value: None }]);
            }
            other => panic!("expected function definition, got {other:?}"),
        }
        match &module.body[1] {
            Statement::FunctionDef { body, .. } => {
                assert_eq!(
                    body,
                    &vec![Statement::Return {
                        value: Some(Expression::Number(1.0)),
                    }]
                );
            }
            other => panic!("expected function definition, got {other:?}"),
        }
    }

    #[test]
    fn rejects_declaration_without_equals() {
        assert_eq!(
            parse_error("let x 1"),
            "Expected '=' in variable declaration"
        );
    }

    #[test]
    fn rejects_anonymous_function_statement() {
        assert_eq!(
            parse_error("fn (x) { return x }"),
            "Function declaration requires a name"
        );
    }

    #[test]
    fn errors_carry_line_and_column() {
        assert_eq!(
            parse_error("let 1 = 2"),
            "Expected NAME but got NUMBER at line 1, column 5"
        );
        assert_eq!(
            parse_error("let x = )"),
            "Unexpected token RPAREN at line 1, column 9"
        );
    }

    #[test]
    fn semicolons_separate_statements() {
        let module = parse_source("let a = 1; let b = 2;; a = b");
        assert_eq!(module.body.len(), 3);
    }

    #[test]
    fn parses_container_literals() {
        let module = parse_source("x = {name: \"n\", 1: two}\ny = [1, 2, 3]");
        assert_eq!(
            module.body,
            vec![
                Statement::Assign {
                    target: name("x"),
                    value: Expression::Dict(vec![
                        (name("name"), Expression::Str("n".to_string())),
                        (Expression::Number(1.0), name("two")),
                    ]),
                },
                Statement::Assign {
                    target: name("y"),
                    value: Expression::List(vec![
                        Expression::Number(1.0),
                        Expression::Number(2.0),
                        Expression::Number(3.0),
                    ]),
                },
            ]
        );
    }

    #[test]
    fn parses_for_loops() {
        let module = parse_source("for item in items { print(item) }");
        match &module.body[0] {
            Statement::For {
                target,
                iterator,
                body,
            } => {
                assert_eq!(target, "item");
                assert_eq!(iterator, &name("items"));
                assert_eq!(body.len(), 1);
            }
            other => panic!("expected for loop, got {other:?}"),
        }
    }

    #[test]
    fn attribute_and_call_chains_are_left_associative() {
        let module = parse_source("server.get(\"/\").then(handler)");
        let expected = Statement::Expr(Expression::Call {
            callee: Box::new(Expression::Attribute {
                object: Box::new(Expression::Call {
                    callee: Box::new(Expression::Attribute {
                        object: Box::new(name("server")),
                        name: "get".to_string(),
                    }),
                    args: vec![Expression::Str("/".to_string())],
                }),
                name: "then".to_string(),
            }),
            args: vec![name("handler")],
        });
        assert_eq!(module.body, vec![expected]);
    }
}
