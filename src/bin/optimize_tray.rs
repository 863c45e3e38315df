// Small CLI utility: run the optimizer against a list of experiment ids
// and print the resulting tray. Stands in for the dashboard that would
// normally call this library — not a replacement for one.
//
// Usage:
//   cargo run --bin optimize_tray -- 1 7 16

use reagent_tray_optimizer::domain::placement::SlotState;
use reagent_tray_optimizer::{list_experiments, TrayOptimizer};

fn main() {
    reagent_tray_optimizer::logging::init();

    let ids: Vec<u32> = std::env::args()
        .skip(1)
        .map(|arg| {
            arg.parse().unwrap_or_else(|_| {
                eprintln!("not a valid experiment id: {arg}");
                std::process::exit(2);
            })
        })
        .collect();

    if ids.is_empty() {
        eprintln!("usage: optimize_tray <experiment_id> [experiment_id ...]");
        eprintln!();
        eprintln!("available experiments:");
        for (id, name) in list_experiments() {
            eprintln!("  {id:>3}  {name}");
        }
        std::process::exit(1);
    }

    let optimizer = TrayOptimizer::new();
    match optimizer.optimize(&ids) {
        Ok(config) => print_configuration(&config),
        Err(err) => {
            eprintln!("optimize failed: {err}");
            std::process::exit(1);
        }
    }
}

fn print_configuration(config: &reagent_tray_optimizer::TrayConfiguration) {
    println!("slots:");
    for (i, slot) in config.slots().iter().enumerate() {
        match slot {
            SlotState::Empty => println!("  [{i:>2}] empty"),
            SlotState::Occupied {
                reagent_code,
                experiment_id,
                tests_possible,
                ..
            } => {
                println!(
                    "  [{i:>2}] {reagent_code:<8} experiment {experiment_id:<3} tests_possible={tests_possible}"
                );
            }
        }
    }

    println!();
    println!("results:");
    for (id, result) in config.results() {
        println!(
            "  experiment {id:<3} {:<30} sets={:<2} total_tests={}",
            result.name,
            result.sets.len(),
            result.total_tests
        );
    }
}
