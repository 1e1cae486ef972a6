//! Ejemplo básico de uso del simulador de planificación de CPU

use cpu_scheduler_simulator::{config, SchedulingPolicy, Simulation};

fn main() {
    println!("=== Ejemplo: Uso Básico del Simulador ===\n");

    // Ejecutar simulación con FCFS
    println!("1. Ejecutando simulación con FCFS...");
    let mut fcfs_simulation = Simulation::with_default_workload(SchedulingPolicy::fcfs())
        .expect("la carga por defecto es válida");
    let fcfs_metrics = fcfs_simulation.run();

    println!("\n--- Reporte FCFS ---");
    println!("Gantt: {}", fcfs_simulation.gantt_chart());
    println!("{}", fcfs_simulation.generate_report(&fcfs_metrics));

    // Ejecutar simulación con Round Robin
    println!(
        "\n2. Ejecutando simulación con Round Robin (quantum {})...",
        config::DEFAULT_QUANTUM
    );
    let rr_policy = SchedulingPolicy::round_robin(config::DEFAULT_QUANTUM);
    let mut rr_simulation =
        Simulation::with_default_workload(rr_policy).expect("la carga por defecto es válida");
    let rr_metrics = rr_simulation.run();

    println!("\n--- Reporte Round Robin ---");
    println!("Gantt: {}", rr_simulation.gantt_chart());
    println!("{}", rr_simulation.generate_report(&rr_metrics));

    // Comparación de resultados
    println!("\n=== Comparación de Algoritmos ===");
    println!("| Métrica                    | FCFS   | Round Robin |");
    println!("|----------------------------|--------|-------------|");
    println!(
        "| Tiempo promedio de espera  | {:>6.2} | {:>11.2} |",
        fcfs_metrics.average_waiting_time, rr_metrics.average_waiting_time
    );
    println!(
        "| Tiempo promedio turnaround | {:>6.2} | {:>11.2} |",
        fcfs_metrics.average_turnaround_time, rr_metrics.average_turnaround_time
    );

    // Paso a paso: el motor también puede conducirse tick a tick
    println!("\n3. Conducción manual tick a tick (SRTF)...");
    let mut manual = Simulation::with_default_workload(SchedulingPolicy::srtf())
        .expect("la carga por defecto es válida");
    while !manual.is_done() {
        let result = manual.step();
        match result.running {
            Some(pid) => println!("  tick {:2}: ejecuta P{}", result.tick, pid),
            None => println!("  tick {:2}: CPU ociosa", result.tick),
        }
    }

    println!("\nEjemplo completado exitosamente!");
}
