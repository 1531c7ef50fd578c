use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use test_support::{Case, CaseClass, load_cases, normalize_output};
use trifc::compiler::{self, CompileOptions, Target};

fn case_target(name: &str, case: &Case) -> Result<Target> {
    Target::from_name(name)
        .with_context(|| format!("Unknown target '{name}' in case {}", case.name))
}

#[test]
fn runs_golden_cases() -> Result<()> {
    let cases = load_cases(Path::new("tests/programs"))?;
    for case in cases {
        let source = fs::read_to_string(&case.program_path)
            .with_context(|| format!("Reading {}", case.name))?;
        match case.spec.class {
            CaseClass::CompileSuccess => {
                ensure!(
                    !case.spec.targets.is_empty(),
                    "Case {} lists no targets",
                    case.name
                );
                for expectation in &case.spec.targets {
                    let target = case_target(&expectation.target, &case)?;
                    let options = CompileOptions {
                        target,
                        aggressive_errors: false,
                    };
                    let output = compiler::compile_source(&source, &options).with_context(|| {
                        format!("Compiling {} for {}", case.name, expectation.target)
                    })?;
                    let expected = case.read_text(&expectation.output_file)?;
                    assert_eq!(
                        normalize_output(&output),
                        normalize_output(&expected),
                        "Target {} mismatch for {}",
                        expectation.target,
                        case.name
                    );
                }
            }
            CaseClass::CompileError => {
                let expectation = case.spec.error.as_ref().with_context(|| {
                    format!("Case {} is compile_error but lists no error", case.name)
                })?;
                let target = case_target(&expectation.target, &case)?;
                let options = CompileOptions {
                    target,
                    aggressive_errors: expectation.aggressive,
                };
                let result = compiler::compile_source(&source, &options);
                ensure!(
                    result.is_err(),
                    "Expected compile error for {}, but compilation succeeded",
                    case.name
                );
                let message = format!("{:#}", result.expect_err("result checked as err"));
                ensure!(
                    message.contains(&expectation.message_contains),
                    "Expected error containing '{}' in {}, got '{message}'",
                    expectation.message_contains,
                    case.name
                );
            }
        }
    }
    Ok(())
}

#[test]
fn golden_outputs_are_deterministic() -> Result<()> {
    let cases = load_cases(Path::new("tests/programs"))?;
    for case in cases {
        if !matches!(case.spec.class, CaseClass::CompileSuccess) {
            continue;
        }
        let source = fs::read_to_string(&case.program_path)
            .with_context(|| format!("Reading {}", case.name))?;
        for expectation in &case.spec.targets {
            let target = case_target(&expectation.target, &case)?;
            let options = CompileOptions {
                target,
                aggressive_errors: false,
            };
            let first = compiler::compile_source(&source, &options)?;
            let second = compiler::compile_source(&source, &options)?;
            assert_eq!(
                first, second,
                "Nondeterministic output for {} target {}",
                case.name, expectation.target
            );
        }
    }
    Ok(())
}
