//! Console front-end for the scheduling simulator.
//!
//! Generates a random workload, runs it across the simulated
//! processors, prints each processor's timeline and a KPI summary, then
//! serves an interactive task-lookup prompt until `-1`, a non-integer
//! line, or end of input.

use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use procsim::generator::{assign_processors, generate_tasks};
use procsim::models::Task;
use procsim::scheduler::{SimKpi, Simulation};
use procsim::timeline;
use procsim::validation::validate_tasks;

/// Simulation parameters. No flags or config file: the defaults are the
/// program's interface.
#[derive(Debug, Clone)]
struct SimConfig {
    task_count: usize,
    processor_count: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            task_count: 20,
            processor_count: 3,
        }
    }
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}

fn print_task(task: &Task) {
    match task.execution_window() {
        Some((start, end)) => println!(
            "Task {}: Priority={}, Duration={}, Created at={}, Executed=[{}-{}]",
            task.id, task.base_priority, task.duration, task.created_at, start, end
        ),
        None => println!(
            "Task {}: Priority={}, Duration={}, Created at={}, not executed",
            task.id, task.base_priority, task.duration, task.created_at
        ),
    }
}

/// Reads task ids from stdin and answers from the simulation's index
/// until the sentinel `-1`, a non-integer line, or EOF.
fn lookup_loop(sim: &Simulation) -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("Enter task ID to search (-1 to exit): ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let Ok(query) = line.trim().parse::<i64>() else {
            // Malformed input ends the loop like EOF would.
            break;
        };
        if query == -1 {
            break;
        }

        let found = u32::try_from(query).ok().and_then(|id| sim.find(id));
        match found {
            Some(task) => print_task(task),
            None => println!("Task not found."),
        }
    }

    Ok(())
}

fn print_kpi(kpi: &SimKpi) {
    println!("Makespan: {} ticks over {} tasks", kpi.makespan, kpi.executed_count);
    println!(
        "Avg waiting time: {:.1}, avg flow time: {:.1}, avg utilization: {:.0}%",
        kpi.avg_waiting_time,
        kpi.avg_flow_time,
        kpi.avg_utilization * 100.0
    );
    println!();
}

fn main() -> io::Result<()> {
    let config = SimConfig::default();
    let mut rng = SmallRng::seed_from_u64(wall_clock_seed());

    let tasks = generate_tasks(config.task_count, &mut rng);
    if let Err(errors) = validate_tasks(&tasks) {
        for error in &errors {
            eprintln!("Invalid workload: {}", error.message);
        }
        std::process::exit(1);
    }

    let assignment = assign_processors(tasks.len(), config.processor_count, &mut rng);
    let mut sim = Simulation::new(tasks, &assignment, config.processor_count);

    let runs = sim.run();
    for run in &runs {
        print!("{}", timeline::render(run));
        println!();
    }
    print_kpi(&SimKpi::calculate(&runs, sim.tasks()));

    lookup_loop(&sim)
}
