//! # Módulo de Políticas de Planificación
//!
//! Este módulo implementa las seis políticas de selección disponibles y su
//! contrato común: dado el estado de la cola de listos y el proceso en
//! ejecución, decidir quién ocupa la CPU durante el siguiente tick.
//!
//! Las políticas forman un conjunto cerrado de variantes elegido una sola vez
//! al configurar la corrida; el modo expropiativo es propiedad de la variante,
//! nunca se infiere de los procesos.

use std::collections::VecDeque;
use std::fmt;

use crate::error::ConfigError;
use crate::process::{ProcessRecord, Tick};

/// Políticas de planificación disponibles.
///
/// Las reglas de desempate son canónicas y consistentes entre variantes:
/// - FCFS: menor llegada; empate por orden de inserción.
/// - SJF: menor ráfaga; empate por llegada y luego por id.
/// - SRTF: menor tiempo restante sobre {ejecutando ∪ listos}; empate por
///   llegada y luego por id.
/// - Prioridad (no expropiativa): menor prioridad; empate por ráfaga y luego
///   por llegada.
/// - Prioridad expropiativa: menor prioridad sobre {ejecutando ∪ listos};
///   empate por tiempo restante y luego por llegada.
/// - Round Robin: FIFO estricto con quantum fijo a nivel de corrida.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchedulingPolicy {
    /// First-Come First-Served: no expropiativa, en orden de llegada.
    Fcfs,
    /// Shortest Job First: no expropiativa, menor ráfaga total primero.
    SjfNonPreemptive,
    /// Shortest Remaining Time First: SJF expropiativa, se reevalúa cada tick.
    Srtf,
    /// Prioridad no expropiativa (menor valor = mayor precedencia).
    PriorityNonPreemptive,
    /// Prioridad expropiativa, se reevalúa cada tick.
    PriorityPreemptive,
    /// Round Robin: FIFO con quantum fijo compartido por toda la corrida.
    RoundRobin {
        /// Máximo de ticks continuos por turno
        quantum: Tick,
    },
}

/// Resultado de una decisión de planificación para un tick.
#[derive(Debug)]
pub struct Selection {
    /// Proceso que ocupa la CPU este tick (`None` = tick ocioso)
    pub next: Option<ProcessRecord>,
    /// `true` si el proceso que venía ejecutando fue devuelto a listos
    pub preempted: bool,
}

impl SchedulingPolicy {
    /// Crea una política FCFS.
    pub fn fcfs() -> Self {
        Self::Fcfs
    }

    /// Crea una política SJF no expropiativa.
    pub fn sjf() -> Self {
        Self::SjfNonPreemptive
    }

    /// Crea una política SRTF (SJF expropiativa).
    pub fn srtf() -> Self {
        Self::Srtf
    }

    /// Crea una política de prioridad no expropiativa.
    pub fn priority() -> Self {
        Self::PriorityNonPreemptive
    }

    /// Crea una política de prioridad expropiativa.
    pub fn priority_preemptive() -> Self {
        Self::PriorityPreemptive
    }

    /// Crea una política Round Robin con el quantum indicado.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduler_simulator::SchedulingPolicy;
    ///
    /// let policy = SchedulingPolicy::round_robin(2);
    /// assert!(policy.is_preemptive());
    /// ```
    pub fn round_robin(quantum: Tick) -> Self {
        Self::RoundRobin { quantum }
    }

    /// Resuelve una política a partir de su nombre en la superficie de
    /// configuración.
    ///
    /// Un nombre desconocido es un error de configuración inmediato, nunca se
    /// sustituye por una política por defecto. Round Robin exige un quantum
    /// positivo; las demás políticas ignoran el parámetro.
    ///
    /// # Arguments
    ///
    /// * `name` - Nombre del algoritmo (`fcfs`, `sjf`, `srtf`, `priority`,
    ///   `priority_preemptive`, `round_robin`/`rr`)
    /// * `quantum` - Quantum de Round Robin, si aplica
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduler_simulator::SchedulingPolicy;
    ///
    /// let policy = SchedulingPolicy::from_name("round_robin", Some(3)).unwrap();
    /// assert_eq!(policy.quantum(), Some(3));
    ///
    /// assert!(SchedulingPolicy::from_name("lottery", None).is_err());
    /// ```
    pub fn from_name(name: &str, quantum: Option<Tick>) -> Result<Self, ConfigError> {
        let normalized = name.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "fcfs" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::SjfNonPreemptive),
            "srtf" | "sjf_preemptive" => Ok(Self::Srtf),
            "priority" => Ok(Self::PriorityNonPreemptive),
            "priority_preemptive" => Ok(Self::PriorityPreemptive),
            "rr" | "round_robin" => match quantum {
                Some(0) => Err(ConfigError::InvalidQuantum),
                Some(q) => Ok(Self::RoundRobin { quantum: q }),
                None => Err(ConfigError::MissingQuantum),
            },
            _ => Err(ConfigError::UnknownPolicy {
                name: name.to_string(),
            }),
        }
    }

    /// Determina si la política puede interrumpir a un proceso en ejecución.
    pub fn is_preemptive(&self) -> bool {
        matches!(
            self,
            Self::Srtf | Self::PriorityPreemptive | Self::RoundRobin { .. }
        )
    }

    /// Determina si la política ordena por el campo `priority`.
    ///
    /// Las políticas de prioridad exigen que todos los procesos declaren una
    /// prioridad explícita; la validación ocurre al configurar.
    pub fn uses_priority(&self) -> bool {
        matches!(self, Self::PriorityNonPreemptive | Self::PriorityPreemptive)
    }

    /// Obtiene el quantum configurado para Round Robin.
    ///
    /// # Returns
    ///
    /// `Some(quantum)` si la política es Round Robin, `None` en caso contrario.
    pub fn quantum(&self) -> Option<Tick> {
        match self {
            Self::RoundRobin { quantum } => Some(*quantum),
            _ => None,
        }
    }

    /// Obtiene una descripción textual de la política.
    pub fn description(&self) -> String {
        match self {
            Self::Fcfs => "First-Come First-Served (no expropiativa)".to_string(),
            Self::SjfNonPreemptive => "Shortest Job First (no expropiativa)".to_string(),
            Self::Srtf => "Shortest Remaining Time First (expropiativa)".to_string(),
            Self::PriorityNonPreemptive => "Prioridad (no expropiativa)".to_string(),
            Self::PriorityPreemptive => "Prioridad (expropiativa)".to_string(),
            Self::RoundRobin { quantum } => {
                format!("Round Robin expropiativa (quantum: {} ticks)", quantum)
            }
        }
    }

    /// Decide qué proceso ocupa la CPU durante el siguiente tick.
    ///
    /// Contrato común a las seis variantes:
    /// - Nunca selecciona un proceso con `remaining_time == 0`.
    /// - Todo proceso presente en listos o en ejecución antes de la llamada
    ///   sigue presente después (en listos o como seleccionado).
    /// - Un tick ocioso se expresa con `next == None`.
    ///
    /// # Arguments
    ///
    /// * `ready` - Cola de listos; las variantes expropiativas pueden devolver
    ///   a ella el proceso interrumpido
    /// * `running` - Proceso en ejecución al inicio del tick, si lo hay
    /// * `slice_expired` - Solo Round Robin: `true` si el turno actual agotó
    ///   su quantum
    pub fn select(
        &self,
        ready: &mut VecDeque<ProcessRecord>,
        running: Option<ProcessRecord>,
        slice_expired: bool,
    ) -> Selection {
        debug_assert!(
            ready.iter().all(|p| p.remaining_time > 0),
            "la cola de listos no debe contener procesos terminados"
        );

        match self {
            Self::Fcfs | Self::SjfNonPreemptive | Self::PriorityNonPreemptive => {
                self.select_non_preemptive(ready, running)
            }
            Self::Srtf | Self::PriorityPreemptive => self.select_preemptive(ready, running),
            Self::RoundRobin { .. } => Self::select_round_robin(ready, running, slice_expired),
        }
    }

    /// Selección no expropiativa: el proceso en ejecución conserva la CPU
    /// hasta terminar; si la CPU está libre se despacha el mejor de listos.
    fn select_non_preemptive(
        &self,
        ready: &mut VecDeque<ProcessRecord>,
        running: Option<ProcessRecord>,
    ) -> Selection {
        if running.is_some() {
            return Selection {
                next: running,
                preempted: false,
            };
        }

        let chosen = self
            .best_ready_index(ready)
            .and_then(|idx| ready.remove(idx));
        Selection {
            next: chosen,
            preempted: false,
        }
    }

    /// Selección expropiativa: se reevalúa el mínimo sobre {ejecutando ∪
    /// listos}; si el mínimo cambia, el proceso interrumpido vuelve a listos
    /// conservando su tiempo restante.
    fn select_preemptive(
        &self,
        ready: &mut VecDeque<ProcessRecord>,
        running: Option<ProcessRecord>,
    ) -> Selection {
        let previous = running.as_ref().map(|p| p.id);

        // El proceso en ejecución compite como un candidato más.
        if let Some(current) = running {
            ready.push_back(current);
        }

        let chosen = self
            .best_ready_index(ready)
            .and_then(|idx| ready.remove(idx));
        let preempted = match (&chosen, previous) {
            (Some(next), Some(prev)) => next.id != prev,
            _ => false,
        };

        Selection {
            next: chosen,
            preempted,
        }
    }

    /// Round Robin: FIFO estricto. Al agotar el quantum, el proceso pasa al
    /// final de la cola (detrás de los que llegaron durante su turno) y la
    /// nueva cabeza se despacha de inmediato, sin tick ocioso intermedio.
    fn select_round_robin(
        ready: &mut VecDeque<ProcessRecord>,
        running: Option<ProcessRecord>,
        slice_expired: bool,
    ) -> Selection {
        match running {
            Some(current) if !slice_expired => Selection {
                next: Some(current),
                preempted: false,
            },
            Some(current) => {
                let previous = current.id;
                ready.push_back(current);
                // Con la cola vacía la cabeza vuelve a ser el mismo proceso:
                // su turno simplemente se reinicia.
                let next = ready.pop_front();
                let preempted = next.as_ref().map(|n| n.id != previous).unwrap_or(false);
                Selection { next, preempted }
            }
            None => Selection {
                next: ready.pop_front(),
                preempted: false,
            },
        }
    }

    /// Índice del mejor candidato en listos según la clave de la política.
    ///
    /// El barrido conserva el primer mínimo, de modo que los empates totales
    /// respetan el orden de inserción.
    fn best_ready_index(&self, ready: &VecDeque<ProcessRecord>) -> Option<usize> {
        match self {
            Self::Fcfs => min_index_by_key(ready, |p| p.arrival_time),
            Self::SjfNonPreemptive => {
                min_index_by_key(ready, |p| (p.burst_time, p.arrival_time, p.id))
            }
            Self::Srtf => min_index_by_key(ready, |p| (p.remaining_time, p.arrival_time, p.id)),
            Self::PriorityNonPreemptive => min_index_by_key(ready, |p| {
                (effective_priority(p), p.burst_time, p.arrival_time)
            }),
            Self::PriorityPreemptive => min_index_by_key(ready, |p| {
                (effective_priority(p), p.remaining_time, p.arrival_time)
            }),
            Self::RoundRobin { .. } => if ready.is_empty() { None } else { Some(0) },
        }
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fcfs => write!(f, "FCFS"),
            Self::SjfNonPreemptive => write!(f, "SJF"),
            Self::Srtf => write!(f, "SRTF"),
            Self::PriorityNonPreemptive => write!(f, "Prioridad"),
            Self::PriorityPreemptive => write!(f, "Prioridad expropiativa"),
            Self::RoundRobin { quantum } => write!(f, "Round Robin (quantum {})", quantum),
        }
    }
}

/// Prioridad efectiva para ordenar. La validación de configuración garantiza
/// que las políticas por prioridad nunca ven `None`.
fn effective_priority(p: &ProcessRecord) -> i32 {
    p.priority.unwrap_or(i32::MAX)
}

/// Índice del primer elemento con clave mínima (estable ante empates).
fn min_index_by_key<K: Ord>(
    ready: &VecDeque<ProcessRecord>,
    key: impl Fn(&ProcessRecord) -> K,
) -> Option<usize> {
    let mut best_idx: Option<usize> = None;
    let mut best_key: Option<K> = None;
    for (idx, process) in ready.iter().enumerate() {
        let candidate = key(process);
        let better = match &best_key {
            Some(current) => candidate < *current,
            None => true,
        };
        if better {
            best_idx = Some(idx);
            best_key = Some(candidate);
        }
    }
    best_idx
}
