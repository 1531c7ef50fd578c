#![allow(dead_code)]
use std::fs;

use trifc::ast::Module;
use trifc::{lexer, parser};

pub const WORKLOADS: [(&str, &str); 2] = [
    ("imports", "tests/programs/imports/program.trif"),
    ("control_flow", "tests/programs/control_flow/program.trif"),
];

pub fn load_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|err| panic!("read {path}: {err}"))
}

pub fn load_module(path: &str) -> Module {
    let source = load_source(path);
    let tokens = lexer::tokenize(&source).unwrap_or_else(|err| panic!("tokenize {path}: {err}"));
    parser::parse_tokens(&tokens).unwrap_or_else(|err| panic!("parse {path}: {err}"))
}
