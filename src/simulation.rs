//! # Módulo de Simulación Principal
//!
//! Este módulo contiene el motor de la simulación: el estado por contenedores
//! (pendientes, listos, en ejecución, completados), el avance discreto tick a
//! tick y la superficie de operaciones que consume la capa de presentación.
//!
//! El motor es una función `step` pura respecto a hilos: puede conducirse en
//! un bucle cerrado (simulación instantánea) o desde un temporizador externo
//! (reproducción visual), con comportamiento idéntico. Las inserciones de
//! procesos y las solicitudes de parada se aplican solo en el límite de tick,
//! de modo que la mutación de estado es atómica por tick.

use std::collections::{HashSet, VecDeque};

use serde::Serialize;

use crate::error::ConfigError;
use crate::history::{ExecutionHistory, ExecutionSegment};
use crate::metrics::{MetricsCalculator, SimulationMetrics};
use crate::policy::SchedulingPolicy;
use crate::process::{Pid, ProcessRecord, Tick};
use crate::queue::QueueManager;

/// Estado completo de la simulación en un instante dado.
///
/// Cada proceso pertenece exactamente a uno de los cuatro contenedores; la
/// pertenencia se expresa por propiedad (el registro vive dentro del
/// contenedor), así que la partición no puede violarse por un campo
/// desincronizado.
#[derive(Debug, Default)]
pub struct SimulationState {
    /// Tick actual del reloj (monótonamente creciente)
    pub current_tick: Tick,
    /// Procesos que aún no llegan, en orden de inserción
    pub pending: Vec<ProcessRecord>,
    /// Cola de listos; la semántica del orden depende de la política
    pub ready: VecDeque<ProcessRecord>,
    /// Proceso en ejecución (a lo sumo uno: una sola CPU)
    pub running: Option<ProcessRecord>,
    /// Procesos terminados, en orden de finalización
    pub completed: Vec<ProcessRecord>,
}

impl SimulationState {
    fn new(processes: Vec<ProcessRecord>) -> Self {
        Self {
            current_tick: 0,
            pending: processes,
            ready: VecDeque::new(),
            running: None,
            completed: Vec::new(),
        }
    }
}

/// Resultado observable de un tick de simulación.
#[derive(Debug, Clone, Serialize)]
pub struct TickResult {
    /// Tick que se acaba de ejecutar
    pub tick: Tick,
    /// Proceso que ocupó la CPU durante el tick (`None` = tick ocioso)
    pub running: Option<Pid>,
    /// Identificadores en la cola de listos al cerrar el tick
    pub ready: Vec<Pid>,
    /// Identificadores aún pendientes de llegar al cerrar el tick
    pub pending: Vec<Pid>,
    /// Procesos que llegaron durante este tick
    pub newly_arrived: Vec<Pid>,
    /// Procesos que terminaron durante este tick
    pub newly_completed: Vec<Pid>,
    /// `true` si ningún proceso ocupó la CPU
    pub idle: bool,
}

/// Instantánea completa del estado, pensada para la capa de render.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSnapshot {
    /// Tick actual
    pub current_tick: Tick,
    /// Descripción de la política configurada
    pub policy: String,
    /// Procesos pendientes de llegar
    pub pending: Vec<ProcessRecord>,
    /// Cola de listos en su orden actual
    pub ready: Vec<ProcessRecord>,
    /// Proceso en ejecución
    pub running: Option<ProcessRecord>,
    /// Procesos completados en orden de finalización
    pub completed: Vec<ProcessRecord>,
    /// `true` si la corrida terminó
    pub done: bool,
}

/// Motor de la simulación de planificación.
///
/// Coordina el gestor de colas, la política de selección y el historial de
/// ejecución, y expone la superficie de operaciones (`step`, `reset`,
/// `snapshot`, `metrics`, ...) que consume la capa de presentación.
///
/// # Examples
///
/// ```rust
/// use cpu_scheduler_simulator::{ProcessRecord, SchedulingPolicy, Simulation};
///
/// let processes = vec![
///     ProcessRecord::new(1, "A", 0, 5),
///     ProcessRecord::new(2, "B", 1, 3),
/// ];
/// let mut simulation = Simulation::new(processes, SchedulingPolicy::fcfs()).unwrap();
/// let metrics = simulation.run();
/// assert_eq!(metrics.completion_order, vec![1, 2]);
/// ```
pub struct Simulation {
    policy: SchedulingPolicy,
    state: SimulationState,
    history: ExecutionHistory,
    queue_manager: QueueManager,
    metrics_calculator: MetricsCalculator,
    /// Conjunto configurado, para poder reiniciar sin re-simular
    initial: Vec<ProcessRecord>,
    /// Inserciones externas, aplicadas en el próximo límite de tick
    injected: Vec<ProcessRecord>,
    /// Ticks consumidos del turno actual (solo Round Robin)
    slice_used: Tick,
    /// Solicitud de parada, honrada en el próximo límite de tick
    stop_requested: bool,
}

impl Simulation {
    /// Crea una simulación validando procesos y política.
    ///
    /// Rechaza, sin mutar estado alguno: ráfagas no positivas, ids
    /// duplicados, quantum no positivo para Round Robin, y procesos sin
    /// prioridad cuando la política ordena por prioridad.
    ///
    /// # Arguments
    ///
    /// * `processes` - Conjunto inicial de procesos
    /// * `policy` - Política de planificación de toda la corrida
    pub fn new(
        processes: Vec<ProcessRecord>,
        policy: SchedulingPolicy,
    ) -> Result<Self, ConfigError> {
        if policy.quantum() == Some(0) {
            return Err(ConfigError::InvalidQuantum);
        }

        let mut seen: HashSet<Pid> = HashSet::new();
        for process in &processes {
            process.validate()?;
            if !seen.insert(process.id) {
                return Err(ConfigError::DuplicateId { id: process.id });
            }
            if policy.uses_priority() && process.priority.is_none() {
                return Err(ConfigError::MissingPriority {
                    name: process.name.clone(),
                });
            }
        }

        Ok(Self {
            state: SimulationState::new(processes.clone()),
            initial: processes,
            policy,
            history: ExecutionHistory::new(),
            queue_manager: QueueManager::new(),
            metrics_calculator: MetricsCalculator::new(),
            injected: Vec::new(),
            slice_used: 0,
            stop_requested: false,
        })
    }

    /// Crea una simulación a partir del nombre de la política.
    ///
    /// Es la operación `configure` de la superficie externa: un nombre
    /// desconocido o un quantum inválido fallan de inmediato.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduler_simulator::{ProcessRecord, Simulation};
    ///
    /// let processes = vec![ProcessRecord::new(1, "A", 0, 5)];
    /// let simulation = Simulation::configure(processes, "round_robin", Some(2));
    /// assert!(simulation.is_ok());
    /// ```
    pub fn configure(
        processes: Vec<ProcessRecord>,
        policy_name: &str,
        quantum: Option<Tick>,
    ) -> Result<Self, ConfigError> {
        let policy = SchedulingPolicy::from_name(policy_name, quantum)?;
        Self::new(processes, policy)
    }

    /// Crea una simulación con el conjunto de procesos por defecto.
    pub fn with_default_workload(policy: SchedulingPolicy) -> Result<Self, ConfigError> {
        Self::new(crate::config::default_process_set(), policy)
    }

    /// Agrega un proceso en caliente, utilizable en medio de la corrida.
    ///
    /// La validación ocurre antes de cualquier mutación; el proceso aceptado
    /// se incorpora en el próximo límite de tick (entra a pendientes o a
    /// listos según su `arrival_time`). Las políticas expropiativas lo
    /// reconsideran automáticamente en el siguiente tick; Round Robin lo
    /// anexa al final de la cola.
    pub fn add_process(&mut self, process: ProcessRecord) -> Result<(), ConfigError> {
        process.validate()?;
        if self.known_ids().contains(&process.id) {
            return Err(ConfigError::DuplicateId { id: process.id });
        }
        if self.policy.uses_priority() && process.priority.is_none() {
            return Err(ConfigError::MissingPriority {
                name: process.name.clone(),
            });
        }

        log::info!(
            "proceso {} ('{}') agregado en el tick {}",
            process.id,
            process.name,
            self.state.current_tick
        );
        // También forma parte del conjunto que restaura `reset`.
        self.initial.push(process.clone());
        self.injected.push(process);
        Ok(())
    }

    /// Ejecuta exactamente un tick de simulación.
    ///
    /// Orden del tick: aplicar inserciones externas, promover llegadas,
    /// seleccionar según la política, registrar el cambio de segmento,
    /// consumir una unidad de ráfaga y avanzar el reloj. Si la corrida ya
    /// terminó, la llamada es un no-op idempotente (no un error).
    pub fn step(&mut self) -> TickResult {
        let tick = self.state.current_tick;
        if self.is_done() {
            return TickResult {
                tick,
                running: None,
                ready: Vec::new(),
                pending: Vec::new(),
                newly_arrived: Vec::new(),
                newly_completed: Vec::new(),
                idle: true,
            };
        }

        // Límite de tick: las inserciones externas entran aquí y no antes.
        self.state.pending.append(&mut self.injected);
        let newly_arrived =
            self.queue_manager
                .update(&mut self.state.pending, &mut self.state.ready, tick);

        let previous = self.state.running.as_ref().map(|p| p.id);
        let slice_expired = match self.policy.quantum() {
            Some(quantum) if previous.is_some() => self.slice_used >= quantum,
            _ => false,
        };

        let selection =
            self.policy
                .select(&mut self.state.ready, self.state.running.take(), slice_expired);
        self.state.running = selection.next;
        let current = self.state.running.as_ref().map(|p| p.id);

        if selection.preempted {
            if let (Some(prev), Some(curr)) = (previous, current) {
                log::debug!("tick {}: el proceso {} expropia al proceso {}", tick, curr, prev);
            }
        }

        // Cambio de despacho: cerrar el segmento anterior y abrir el nuevo.
        if previous != current {
            if let Some(prev) = previous {
                self.history.close_segment(prev, tick);
            }
            if let Some(curr) = current {
                self.history.open_segment(curr, tick);
            }
            self.slice_used = 0;
        } else if slice_expired {
            // Mismo proceso tras agotar el quantum con la cola vacía: el
            // turno se reinicia sin cortar el segmento.
            self.slice_used = 0;
        }

        let mut idle = true;
        if let Some(process) = self.state.running.as_mut() {
            idle = false;
            if process.start_time.is_none() {
                process.start_time = Some(tick);
                log::debug!("tick {}: primer despacho del proceso {}", tick, process.id);
            }
            process.remaining_time -= 1;
            self.slice_used += 1;
        } else {
            log::debug!("tick {}: CPU ociosa", tick);
        }

        self.state.current_tick += 1;

        let mut newly_completed = Vec::new();
        if let Some(mut process) = self.state.running.take() {
            if process.is_completed() {
                self.history.close_segment(process.id, self.state.current_tick);
                process.completion_time = Some(self.state.current_tick);
                log::info!(
                    "tick {}: el proceso {} ('{}') terminó",
                    self.state.current_tick,
                    process.id,
                    process.name
                );
                newly_completed.push(process.id);
                self.state.completed.push(process);
                self.slice_used = 0;
            } else {
                self.state.running = Some(process);
            }
        }

        TickResult {
            tick,
            running: current,
            ready: self.state.ready.iter().map(|p| p.id).collect(),
            pending: self.state.pending.iter().map(|p| p.id).collect(),
            newly_arrived,
            newly_completed,
            idle,
        }
    }

    /// Conduce la simulación hasta completarla y devuelve las métricas.
    ///
    /// Una solicitud de parada pendiente se honra en el límite de tick,
    /// dejando el estado consistente y reanudable con otra llamada a `run`
    /// o con llamadas sueltas a [`Simulation::step`].
    pub fn run(&mut self) -> SimulationMetrics {
        log::info!("iniciando corrida: {}", self.policy.description());
        while !self.is_done() {
            if self.stop_requested {
                self.stop_requested = false;
                log::info!("corrida detenida en el tick {}", self.state.current_tick);
                break;
            }
            self.step();
        }
        self.metrics()
    }

    /// Solicita detener la corrida; se honra en el próximo límite de tick.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    /// Indica si la corrida terminó: pendientes, listos y CPU vacíos.
    pub fn is_done(&self) -> bool {
        self.state.pending.is_empty()
            && self.state.ready.is_empty()
            && self.state.running.is_none()
            && self.injected.is_empty()
    }

    /// Restaura el conjunto original de procesos y borra todo lo derivado.
    ///
    /// Tras el reinicio: `remaining_time == burst_time` para todos los
    /// procesos, historial y completados vacíos, `current_tick == 0`.
    pub fn reset(&mut self) {
        let mut processes = self.initial.clone();
        for process in &mut processes {
            process.reset();
        }
        self.state = SimulationState::new(processes);
        self.history.clear();
        self.injected.clear();
        self.slice_used = 0;
        self.stop_requested = false;
        log::info!("simulación reiniciada");
    }

    /// Tick actual del reloj de simulación.
    pub fn current_tick(&self) -> Tick {
        self.state.current_tick
    }

    /// Política configurada para la corrida.
    pub fn policy(&self) -> &SchedulingPolicy {
        &self.policy
    }

    /// Instantánea completa del estado para la capa de render.
    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            current_tick: self.state.current_tick,
            policy: self.policy.description(),
            pending: self.state.pending.clone(),
            ready: self.state.ready.iter().cloned().collect(),
            running: self.state.running.clone(),
            completed: self.state.completed.clone(),
            done: self.is_done(),
        }
    }

    /// Segmentos de ejecución registrados hasta el momento.
    pub fn history(&self) -> &[ExecutionSegment] {
        self.history.segments()
    }

    /// Métricas por proceso y agregadas sobre los procesos completados.
    pub fn metrics(&self) -> SimulationMetrics {
        self.metrics_calculator.calculate_simulation_metrics(
            &self.state.completed,
            &self.history,
            self.state.current_tick,
        )
    }

    /// Genera un reporte detallado de los resultados.
    pub fn generate_report(&self, metrics: &SimulationMetrics) -> String {
        self.metrics_calculator.generate_report(metrics)
    }

    /// Genera un reporte en formato CSV.
    pub fn generate_csv_report(&self, metrics: &SimulationMetrics) -> String {
        self.metrics_calculator.generate_csv_report(metrics)
    }

    /// Genera la línea de Gantt de lo ejecutado hasta el momento.
    pub fn gantt_chart(&self) -> String {
        self.metrics_calculator
            .gantt_chart(&self.history, self.state.current_tick)
    }

    /// Identificadores conocidos por el motor en cualquier contenedor.
    fn known_ids(&self) -> HashSet<Pid> {
        let mut ids: HashSet<Pid> = HashSet::new();
        ids.extend(self.state.pending.iter().map(|p| p.id));
        ids.extend(self.state.ready.iter().map(|p| p.id));
        ids.extend(self.state.running.iter().map(|p| p.id));
        ids.extend(self.state.completed.iter().map(|p| p.id));
        ids.extend(self.injected.iter().map(|p| p.id));
        ids
    }
}
