use anyhow::{Context, Result};
use clap::Parser;
use day21::{Part1CLIArgs, Transform};

fn main() -> Result<()> {
    let args = Part1CLIArgs::parse();
    let seed = day21::read_seed(&args.input_path).with_context(|| {
        format!(
            "Failed to read seed from given program file({}).",
            args.input_path.display()
        )
    })?;

    let transform = Transform::new(seed);
    match args.target {
        Some(target) => match day21::find_first(&transform, target)
            .with_context(|| format!("Failed to check register 0 value {}.", target))?
        {
            Some(loops_n) => println!(
                "If set register 0 to {}, program halts after {} loop(s).",
                target, loops_n
            ),
            None => println!("If set register 0 to {}, program never halts.", target),
        },
        None => println!(
            "Set register 0 to {}, can halt program and cost the least steps.",
            day21::first_value(&transform)
        ),
    }

    Ok(())
}
