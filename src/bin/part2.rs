use anyhow::{Context, Result};
use clap::Parser;
use day21::{CLIArgs, CycleDetector, Phase, Transform};

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    let seed = day21::read_seed(&args.input_path).with_context(|| {
        format!(
            "Failed to read seed from given program file({}).",
            args.input_path.display()
        )
    })?;

    let mut detector = CycleDetector::new(Transform::new(seed));
    if args.verbose {
        println!("Loop#0: register[3] = {}", detector.last_unique());
    }
    while detector.step() == Phase::Generating {
        if args.verbose {
            println!(
                "Loop#{}: register[3] = {}",
                detector.loops_n() - 1,
                detector.last_unique()
            );
        }
    }
    if let Some(repeated) = detector.repeated() {
        if args.verbose {
            println!(
                "Loop#{}: register[3] = {}, repeated after {} unique value(s).",
                detector.loops_n() - 1,
                repeated,
                detector.seen_n()
            );
        }
    }

    println!(
        "Set register 0 to {}, can halt program and cost the most steps.",
        detector.last_unique()
    );

    Ok(())
}
