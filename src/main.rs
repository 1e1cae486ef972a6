//! Binario de línea de comandos del simulador de planificación de CPU.
//!
//! Ejecuta una corrida completa con la política indicada y muestra el
//! diagrama de Gantt y el reporte de métricas.
//!
//! Ejemplos:
//!   cpu-scheduler-simulator --algorithm fcfs
//!   cpu-scheduler-simulator --algorithm round_robin --quantum 2
//!   cpu-scheduler-simulator -a srtf -p A,0,5 -p B,1,3 -p C,2,8

use clap::Parser;

use cpu_scheduler_simulator::{config, ProcessRecord, Simulation};

/// Simulador de algoritmos de planificación de CPU
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Algoritmo: fcfs, sjf, srtf, priority, priority_preemptive, round_robin
    #[arg(short, long, default_value = "fcfs")]
    algorithm: String,

    /// Quantum para Round Robin (en ticks, > 0)
    #[arg(short, long)]
    quantum: Option<u32>,

    /// Proceso en formato nombre,llegada,rafaga[,prioridad] (repetible)
    #[arg(short = 'p', long = "process", value_name = "SPEC")]
    processes: Vec<String>,

    /// Imprimir además el reporte en formato CSV
    #[arg(long)]
    csv: bool,
}

/// Parseo de un proceso de la CLI: nombre,llegada,rafaga[,prioridad]
fn parse_process(spec: &str, id: usize) -> Result<ProcessRecord, String> {
    let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
    if parts.len() < 3 || parts.len() > 4 {
        return Err(format!(
            "Formato inválido '{}': se espera nombre,llegada,rafaga[,prioridad]",
            spec
        ));
    }

    let name = parts[0];
    if name.is_empty() {
        return Err(format!("Nombre vacío en '{}'", spec));
    }

    // Los valores negativos fallan aquí: llegada y ráfaga son sin signo.
    let arrival: u32 = parts[1]
        .parse()
        .map_err(|_| format!("Llegada inválida en '{}': {}", spec, parts[1]))?;
    let burst: u32 = parts[2]
        .parse()
        .map_err(|_| format!("Ráfaga inválida en '{}': {}", spec, parts[2]))?;

    let mut record = ProcessRecord::new(id, name, arrival, burst);
    if parts.len() == 4 {
        let priority: i32 = parts[3]
            .parse()
            .map_err(|_| format!("Prioridad inválida en '{}': {}", spec, parts[3]))?;
        record.priority = Some(priority);
    }
    Ok(record)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let processes: Vec<ProcessRecord> = if cli.processes.is_empty() {
        config::default_process_set()
    } else {
        let mut records = Vec::with_capacity(cli.processes.len());
        for (index, spec) in cli.processes.iter().enumerate() {
            match parse_process(spec, index + 1) {
                Ok(record) => records.push(record),
                Err(error) => {
                    eprintln!("Error: {}", error);
                    std::process::exit(1);
                }
            }
        }
        records
    };

    let mut simulation = match Simulation::configure(processes, &cli.algorithm, cli.quantum) {
        Ok(simulation) => simulation,
        Err(error) => {
            eprintln!("Error de configuración: {}", error);
            std::process::exit(1);
        }
    };

    println!(
        "=== Simulación de planificación de CPU ({}) ===",
        simulation.policy()
    );
    println!("Configuración:");
    for process in &simulation.snapshot().pending {
        match process.priority {
            Some(priority) => println!(
                "  {} (P{}): llegada={}, ráfaga={}, prioridad={}",
                process.name, process.id, process.arrival_time, process.burst_time, priority
            ),
            None => println!(
                "  {} (P{}): llegada={}, ráfaga={}",
                process.name, process.id, process.arrival_time, process.burst_time
            ),
        }
    }
    println!();

    let metrics = simulation.run();

    println!("Gantt: {}", simulation.gantt_chart());
    println!("{}", simulation.generate_report(&metrics));

    if cli.csv {
        println!("{}", simulation.generate_csv_report(&metrics));
    }
}
