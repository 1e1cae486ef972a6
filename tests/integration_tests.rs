//! Tests de integración para el simulador de planificación de CPU

use cpu_scheduler_simulator::{
    config, ConfigError, ExecutionSegment, ProcessRecord, SchedulingPolicy, Simulation,
};

/// Carga clásica: A(llegada 0, ráfaga 5), B(1, 3), C(2, 8).
fn abc_workload() -> Vec<ProcessRecord> {
    vec![
        ProcessRecord::new(1, "A", 0, 5),
        ProcessRecord::new(2, "B", 1, 3),
        ProcessRecord::new(3, "C", 2, 8),
    ]
}

/// La misma carga con prioridades explícitas (B la más urgente).
fn abc_priority_workload() -> Vec<ProcessRecord> {
    vec![
        ProcessRecord::with_priority(1, "A", 0, 5, 2),
        ProcessRecord::with_priority(2, "B", 1, 3, 1),
        ProcessRecord::with_priority(3, "C", 2, 8, 3),
    ]
}

fn segment(pid: usize, start: u32, end: u32) -> ExecutionSegment {
    ExecutionSegment {
        pid,
        start_tick: start,
        end_tick: end,
    }
}

#[test]
fn test_fcfs_scenario() {
    let mut simulation = Simulation::new(abc_workload(), SchedulingPolicy::fcfs()).unwrap();
    let metrics = simulation.run();

    assert_eq!(metrics.completion_order, vec![1, 2, 3]);
    assert_eq!(metrics.total_ticks, 16);

    let completions: Vec<u32> = metrics.processes.iter().map(|p| p.completion_time).collect();
    assert_eq!(completions, vec![5, 8, 16]);

    // Espera = (fin - llegada) - ráfaga: 0, 4 y 6 ticks.
    let waits: Vec<u32> = metrics.processes.iter().map(|p| p.waiting_time).collect();
    assert_eq!(waits, vec![0, 4, 6]);

    assert_eq!(
        simulation.history(),
        &[segment(1, 0, 5), segment(2, 5, 8), segment(3, 8, 16)]
    );
}

#[test]
fn test_sjf_non_preemptive_scenario() {
    let mut simulation = Simulation::new(abc_workload(), SchedulingPolicy::sjf()).unwrap();
    let metrics = simulation.run();

    // En t=0 solo A está listo, así que corre completo; luego B (ráfaga 3)
    // le gana a C (ráfaga 8).
    assert_eq!(metrics.completion_order, vec![1, 2, 3]);
    let completions: Vec<u32> = metrics.processes.iter().map(|p| p.completion_time).collect();
    assert_eq!(completions, vec![5, 8, 16]);
}

#[test]
fn test_srtf_scenario_preempts_at_tick_boundary() {
    let mut simulation = Simulation::new(abc_workload(), SchedulingPolicy::srtf()).unwrap();
    let metrics = simulation.run();

    // B llega en t=1 con restante 3 < 4 de A y lo expropia en el límite del
    // tick; A reanuda al terminar B y aun así ejecuta sus 5 ticks completos.
    assert_eq!(
        simulation.history(),
        &[
            segment(1, 0, 1),
            segment(2, 1, 4),
            segment(1, 4, 8),
            segment(3, 8, 16),
        ]
    );
    assert_eq!(metrics.completion_order, vec![2, 1, 3]);

    let a_executed: u32 = simulation
        .history()
        .iter()
        .filter(|s| s.pid == 1)
        .map(|s| s.end_tick - s.start_tick)
        .sum();
    assert_eq!(a_executed, 5);
}

#[test]
fn test_priority_non_preemptive_scenario() {
    let mut simulation =
        Simulation::new(abc_priority_workload(), SchedulingPolicy::priority()).unwrap();
    let metrics = simulation.run();

    // A corre completo (nadie más listo en t=0); después la prioridad 1 de B
    // le gana a la 3 de C.
    assert_eq!(metrics.completion_order, vec![1, 2, 3]);
    let completions: Vec<u32> = metrics.processes.iter().map(|p| p.completion_time).collect();
    assert_eq!(completions, vec![5, 8, 16]);
}

#[test]
fn test_priority_preemptive_scenario() {
    let mut simulation = Simulation::new(
        abc_priority_workload(),
        SchedulingPolicy::priority_preemptive(),
    )
    .unwrap();
    let metrics = simulation.run();

    // B (prioridad 1) expropia a A en t=1; A reanuda al terminar B.
    assert_eq!(
        simulation.history(),
        &[
            segment(1, 0, 1),
            segment(2, 1, 4),
            segment(1, 4, 8),
            segment(3, 8, 16),
        ]
    );
    assert_eq!(metrics.completion_order, vec![2, 1, 3]);
}

#[test]
fn test_round_robin_scenario() {
    let mut simulation =
        Simulation::new(abc_workload(), SchedulingPolicy::round_robin(2)).unwrap();
    let metrics = simulation.run();

    assert_eq!(metrics.completion_order, vec![2, 1, 3]);
    assert_eq!(metrics.total_ticks, 16);

    // Línea de tiempo entrelazada: cada turno dura a lo sumo 2 ticks y el
    // proceso expropiado queda detrás de los llegados durante su turno.
    assert_eq!(
        simulation.history(),
        &[
            segment(1, 0, 2),
            segment(2, 2, 4),
            segment(3, 4, 6),
            segment(1, 6, 8),
            segment(2, 8, 9),
            segment(3, 9, 11),
            segment(1, 11, 12),
            segment(3, 12, 16),
        ]
    );

    let completions: Vec<u32> = metrics.processes.iter().map(|p| p.completion_time).collect();
    assert_eq!(completions, vec![9, 12, 16]);
}

#[test]
fn test_identical_runs_produce_identical_history() {
    for policy in [
        SchedulingPolicy::fcfs(),
        SchedulingPolicy::sjf(),
        SchedulingPolicy::srtf(),
        SchedulingPolicy::priority(),
        SchedulingPolicy::priority_preemptive(),
        SchedulingPolicy::round_robin(2),
    ] {
        let mut first = Simulation::new(abc_priority_workload(), policy.clone()).unwrap();
        let mut second = Simulation::new(abc_priority_workload(), policy).unwrap();
        first.run();
        second.run();
        assert_eq!(first.history(), second.history());
    }
}

#[test]
fn test_segment_durations_sum_to_burst_for_every_policy() {
    for policy in [
        SchedulingPolicy::fcfs(),
        SchedulingPolicy::sjf(),
        SchedulingPolicy::srtf(),
        SchedulingPolicy::priority(),
        SchedulingPolicy::priority_preemptive(),
        SchedulingPolicy::round_robin(2),
    ] {
        let workload = abc_priority_workload();
        let mut simulation = Simulation::new(workload.clone(), policy).unwrap();
        let metrics = simulation.run();

        for process in &workload {
            let executed: u32 = simulation
                .history()
                .iter()
                .filter(|s| s.pid == process.id)
                .map(|s| s.end_tick - s.start_tick)
                .sum();
            assert_eq!(executed, process.burst_time);
        }

        // Cota inferior de finalización: nadie termina antes de llegar y
        // ejecutar toda su ráfaga.
        for process_metrics in &metrics.processes {
            assert!(
                process_metrics.completion_time
                    >= process_metrics.arrival_time + process_metrics.burst_time
            );
        }
    }
}

#[test]
fn test_step_after_done_is_idempotent() {
    let mut simulation = Simulation::new(abc_workload(), SchedulingPolicy::fcfs()).unwrap();
    simulation.run();
    assert!(simulation.is_done());

    let tick_before = simulation.current_tick();
    let history_before = simulation.history().to_vec();
    let metrics_before = simulation.metrics();

    for _ in 0..5 {
        let result = simulation.step();
        assert!(result.idle);
        assert!(result.newly_completed.is_empty());
    }

    assert_eq!(simulation.current_tick(), tick_before);
    assert_eq!(simulation.history(), history_before.as_slice());
    assert_eq!(
        simulation.metrics().completion_order,
        metrics_before.completion_order
    );
}

#[test]
fn test_reset_restores_initial_configuration() {
    let mut simulation =
        Simulation::new(abc_workload(), SchedulingPolicy::round_robin(2)).unwrap();
    let first = simulation.run();

    simulation.reset();
    assert_eq!(simulation.current_tick(), 0);
    assert!(simulation.history().is_empty());

    let snapshot = simulation.snapshot();
    assert!(snapshot.completed.is_empty());
    assert_eq!(snapshot.pending.len(), 3);
    for process in &snapshot.pending {
        assert_eq!(process.remaining_time, process.burst_time);
        assert!(process.start_time.is_none());
        assert!(process.completion_time.is_none());
    }

    // Tras el reinicio la corrida se reproduce exactamente.
    let second = simulation.run();
    assert_eq!(first.completion_order, second.completion_order);
    assert_eq!(first.total_ticks, second.total_ticks);
}

#[test]
fn test_dynamic_insertion_round_robin_goes_to_back() {
    let mut simulation =
        Simulation::new(abc_workload(), SchedulingPolicy::round_robin(2)).unwrap();

    // Tres ticks ya ejecutados; D entra en caliente al final de la cola.
    for _ in 0..3 {
        simulation.step();
    }
    simulation
        .add_process(ProcessRecord::new(4, "D", 0, 2))
        .unwrap();

    let metrics = simulation.run();
    assert_eq!(metrics.processes.len(), 4);

    let d_executed: u32 = simulation
        .history()
        .iter()
        .filter(|s| s.pid == 4)
        .map(|s| s.end_tick - s.start_tick)
        .sum();
    assert_eq!(d_executed, 2);
    assert_eq!(metrics.total_ticks, 18);
}

#[test]
fn test_configure_rejects_invalid_input_without_mutation() {
    // Ráfaga cero
    let zero_burst = vec![ProcessRecord::new(1, "A", 0, 0)];
    assert!(matches!(
        Simulation::new(zero_burst, SchedulingPolicy::fcfs()),
        Err(ConfigError::InvalidBurstTime { .. })
    ));

    // Id duplicado
    let duplicated = vec![
        ProcessRecord::new(1, "A", 0, 5),
        ProcessRecord::new(1, "B", 1, 3),
    ];
    assert!(matches!(
        Simulation::new(duplicated, SchedulingPolicy::fcfs()),
        Err(ConfigError::DuplicateId { id: 1 })
    ));

    // Quantum inválido o ausente para Round Robin
    assert!(matches!(
        Simulation::configure(abc_workload(), "round_robin", Some(0)),
        Err(ConfigError::InvalidQuantum)
    ));
    assert!(matches!(
        Simulation::configure(abc_workload(), "round_robin", None),
        Err(ConfigError::MissingQuantum)
    ));

    // Política desconocida: error inmediato, nunca un default silencioso
    assert!(matches!(
        Simulation::configure(abc_workload(), "multilevel", None),
        Err(ConfigError::UnknownPolicy { .. })
    ));
}

#[test]
fn test_default_workload_runs_with_every_policy() {
    for name in [
        "fcfs",
        "sjf",
        "srtf",
        "priority",
        "priority_preemptive",
        "round_robin",
    ] {
        let quantum = (name == "round_robin").then_some(config::DEFAULT_QUANTUM);
        let mut simulation =
            Simulation::configure(config::default_process_set(), name, quantum).unwrap();
        let metrics = simulation.run();
        assert_eq!(metrics.processes.len(), 3);
        assert!(simulation.is_done());
        assert!((metrics.cpu_utilization - 1.0).abs() < 1e-9);
    }
}
