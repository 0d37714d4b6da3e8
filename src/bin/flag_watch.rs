use shape_detector::{run_flag_exercise, FlagExerciseOptions};
use std::env;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() > 2 {
        return Err(usage());
    }

    let mut options = FlagExerciseOptions::default();
    if let Some(readers) = args.first() {
        options.readers = readers
            .parse()
            .map_err(|e| format!("Invalid reader count '{readers}': {e}"))?;
    }
    if let Some(toggles) = args.get(1) {
        options.writer_toggles = toggles
            .parse()
            .map_err(|e| format!("Invalid toggle count '{toggles}': {e}"))?;
    }

    let report = run_flag_exercise(&options)?;

    for (i, stats) in report.readers.iter().enumerate() {
        println!(
            "reader {i}: true={} false={}",
            stats.true_count, stats.false_count
        );
    }
    println!(
        "writer: {} toggles, final value {}",
        report.writer_toggles, report.final_value
    );
    println!("elapsed: {:.1} ms", report.elapsed_ms);

    Ok(())
}

fn usage() -> String {
    "Usage: flag_watch [readers] [toggles]".to_string()
}
