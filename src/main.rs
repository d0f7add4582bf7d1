use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use tracing::info;
mod cli;
use cli::Cli;
use pagesim::{
    compare, input, logging, sweep, PolicyKind, PolicyReport, ReferenceSequence, Step, Summary,
    Sweep, Trace,
};

fn main() -> Result<()> {
    /**********SETUP**********/
    let args = Cli::parse();
    logging::init(args.debug);

    /**********INPUT PARSING**********/
    let reference = match (&args.reference, &args.file, args.preset) {
        (Some(text), _, _) => text.clone(),
        (_, Some(path), _) => fs::read_to_string(path)
            .with_context(|| format!("Unable to read file: {}", path.display()))?,
        (_, _, Some(preset)) => preset.reference().to_string(),
        (None, None, None) => anyhow::bail!("no reference string given"),
    };
    let (pages, frames) =
        input::parse_and_validate(&reference, &args.frames).context("Invalid input")?;
    let sequence = ReferenceSequence::from(pages);
    let policy = PolicyKind::from(args.pra);

    /**********RUNNING SIMULATOR**********/
    if args.compare {
        let reports = compare(&sequence, frames)?;
        info!(frames, accesses = sequence.len(), "comparison complete");
        if args.json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        } else {
            print_comparison(&reports, frames);
        }
    } else if let Some(max) = args.sweep {
        let sweep = sweep(&sequence, policy, 1..=max)?;
        info!(policy = %policy, max, accesses = sequence.len(), "sweep complete");
        if args.json {
            println!("{}", serde_json::to_string_pretty(&sweep)?);
        } else {
            print_sweep(&sweep);
        }
    } else {
        let trace = pagesim::run(&sequence, frames, policy)?;
        info!(
            policy = %policy,
            frames,
            accesses = trace.summary.accesses,
            hits = trace.summary.hits,
            faults = trace.summary.faults,
            "run complete"
        );
        if args.json {
            println!("{}", serde_json::to_string_pretty(&trace)?);
        } else {
            print_trace(&trace);
        }
    }

    Ok(())
}

/* HELPER FUNCTIONS */
fn format_frames(frames: &[Option<usize>]) -> String {
    frames
        .iter()
        .map(|slot| match slot {
            Some(page) => format!("{:>3}", page),
            None => "  -".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_step(step: &Step) {
    let outcome = if step.is_hit() { "HIT  " } else { "FAULT" };
    print!(
        "{:>4}: {:>4} {} [{}]",
        step.index,
        step.page,
        outcome,
        format_frames(&step.frames)
    );
    if let Some(victim) = step.evicted {
        print!(" evicted {}", victim);
    }
    println!();
}

fn print_trace(trace: &Trace) {
    println!(
        "{} with {} frames",
        trace.config.policy, trace.config.capacity
    );
    for step in &trace.steps {
        print_step(step);
    }
    print_statistics(&trace.summary);
}

fn print_statistics(summary: &Summary) {
    /* Prints totals of a finished run */
    println!("***********************************");
    println!("Number of References = {}", summary.accesses);
    println!("Page Faults = {}", summary.faults);
    println!("Page Fault Rate = {:.3}", summary.fault_rate());
    println!("Page Hits = {}", summary.hits);
    println!("Page Hit Rate = {:.3}", summary.hit_rate());
    println!("Final Frames = [{}]", format_frames(&summary.frames));
}

fn print_comparison(reports: &[PolicyReport], frames: usize) {
    println!("{} frames", frames);
    println!("{:<6} {:>7} {:>7} {:>10}", "PRA", "Faults", "Hits", "Fault Rate");
    for report in reports {
        println!(
            "{:<6} {:>7} {:>7} {:>10.3}",
            report.policy.to_string(),
            report.summary.faults,
            report.summary.hits,
            report.summary.fault_rate()
        );
    }
}

fn print_sweep(sweep: &Sweep) {
    println!("{}", sweep.policy);
    println!("{:>6} {:>7}", "Frames", "Faults");
    for point in &sweep.points {
        println!("{:>6} {:>7}", point.capacity, point.faults);
    }
    for (before, after) in sweep.anomalies() {
        println!(
            "Belady's anomaly: {} -> {} frames raised faults {} -> {}",
            before.capacity, after.capacity, before.faults, after.faults
        );
    }
}
