//! # Simulador de Planificación de CPU
//!
//! Esta biblioteca implementa un simulador didáctico de algoritmos clásicos de
//! planificación de procesos sobre una sola CPU, avanzando el tiempo en ticks
//! discretos (un tick = una unidad de ráfaga consumida).
//!
//! ## Características principales
//!
//! - **Seis políticas de planificación**: FCFS, SJF (no expropiativa y
//!   expropiativa/SRTF), Prioridad (no expropiativa y expropiativa) y Round
//!   Robin con quantum configurable a nivel de corrida.
//! - **Motor por pasos**: un `step` síncrono y determinista que puede
//!   conducirse en bucle cerrado o desde un temporizador externo; la
//!   cadencia es asunto de la capa de presentación.
//! - **Historial de ejecución**: bitácora de segmentos apta para dibujar
//!   diagramas de Gantt y derivar métricas.
//! - **Métricas detalladas**: turnaround y espera por proceso, promedios,
//!   orden de finalización y utilización de CPU.
//!
//! ## Estructura del proyecto
//!
//! - `process`: Módulo que define los procesos planificables y su ciclo de vida
//! - `policy`: Módulo que implementa las políticas de selección
//! - `queue`: Módulo que promueve procesos pendientes a la cola de listos
//! - `history`: Módulo del historial de segmentos de ejecución
//! - `metrics`: Módulo para el cálculo y reporte de métricas
//! - `simulation`: Módulo principal que coordina la simulación

pub mod error;
pub mod history;
pub mod metrics;
pub mod policy;
pub mod process;
pub mod queue;
pub mod simulation;

// Re-exportar las estructuras principales para facilitar su uso
pub use error::ConfigError;
pub use history::{ExecutionHistory, ExecutionSegment};
pub use metrics::{MetricsCalculator, ProcessMetrics, SimulationMetrics};
pub use policy::{SchedulingPolicy, Selection};
pub use process::{Pid, ProcessRecord, Tick};
pub use queue::QueueManager;
pub use simulation::{Simulation, SimulationSnapshot, SimulationState, TickResult};

/// Configuración por defecto del simulador
pub mod config {
    use crate::process::{ProcessRecord, Tick};

    /// Quantum por defecto para Round Robin (en ticks)
    pub const DEFAULT_QUANTUM: Tick = 2;

    /// Conjunto de procesos por defecto.
    ///
    /// Lleva prioridades explícitas para que funcione con cualquiera de las
    /// seis políticas sin configuración adicional.
    pub fn default_process_set() -> Vec<ProcessRecord> {
        vec![
            ProcessRecord::with_priority(1, "A", 0, 5, 2),
            ProcessRecord::with_priority(2, "B", 1, 3, 1),
            ProcessRecord::with_priority(3, "C", 2, 8, 3),
        ]
    }
}
