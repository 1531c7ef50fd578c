use std::fs;
use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};
use trifc::compiler::{self, CompileOptions, Target};

fn main() {
    if let Err(error) = run() {
        eprintln!("trifc: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let mut target_name = "python".to_string();
    let mut output_path: Option<PathBuf> = None;
    let mut aggressive_errors = false;
    let mut input_path: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--target" => {
                target_name = args
                    .next()
                    .ok_or_else(|| anyhow!("Missing target name after {arg}"))?;
            }
            "--output" => {
                output_path = Some(
                    args.next()
                        .ok_or_else(|| anyhow!("Missing output path after {arg}"))?
                        .into(),
                );
            }
            "--aggressive-errors" => {
                aggressive_errors = true;
            }
            _ if input_path.is_none() => {
                input_path = Some(arg.into());
            }
            _ => bail!("Unrecognized argument: {arg}"),
        }
    }

    let input_path = input_path.ok_or_else(|| anyhow!("No input file provided"))?;
    let target = Target::from_name(&target_name)
        .ok_or_else(|| anyhow!("Unknown target: {target_name}"))?;
    let options = CompileOptions {
        target,
        aggressive_errors,
    };

    let output = compiler::compile_file(&input_path, &options)?;
    match output_path {
        Some(path) => {
            fs::write(&path, &output)
                .map_err(|_| anyhow!("Unable to write to output path: {}", path.display()))?;
        }
        None => println!("{output}"),
    }
    Ok(())
}
