//! # Módulo de Procesos
//!
//! Este módulo define la estructura de los procesos que compiten por la CPU
//! simulada y los campos derivados que registran su progreso (tiempo restante,
//! primer despacho, finalización).

use serde::Serialize;

use crate::error::ConfigError;

/// Identificador único y estable de un proceso.
///
/// A diferencia del nombre, el identificador nunca se reutiliza y es la única
/// forma válida de correlacionar un proceso con sus segmentos de ejecución.
pub type Pid = usize;

/// Instante discreto de la simulación (un tick = una unidad de ráfaga).
pub type Tick = u32;

/// Representa un proceso planificable dentro de la simulación.
///
/// Cada proceso mantiene su identidad, sus parámetros de llegada y ráfaga, y
/// los campos mutables que el motor actualiza tick a tick. En todo momento el
/// proceso pertenece exactamente a uno de los conjuntos {pendiente, listo,
/// en ejecución, completado}; la pertenencia es estructural (el registro se
/// mueve entre contenedores), nunca un campo redundante.
///
/// El `name` es solo para presentación y puede repetirse entre procesos;
/// toda la lógica del motor se basa en `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessRecord {
    /// Identificador único del proceso
    pub id: Pid,
    /// Nombre para mostrar (puede colisionar entre procesos)
    pub name: String,
    /// Tick en el que el proceso se vuelve elegible para ejecutar
    pub arrival_time: Tick,
    /// Total de ticks de CPU que el proceso necesita (siempre > 0)
    pub burst_time: Tick,
    /// Ticks de CPU que aún faltan; invariante `0 <= remaining <= burst`
    pub remaining_time: Tick,
    /// Prioridad opcional (menor valor = mayor precedencia)
    pub priority: Option<i32>,
    /// Tick del primer despacho; se asigna una sola vez
    pub start_time: Option<Tick>,
    /// Tick de finalización; se asigna exactamente cuando `remaining` llega a 0
    pub completion_time: Option<Tick>,
}

impl ProcessRecord {
    /// Crea un nuevo proceso sin prioridad.
    ///
    /// # Arguments
    ///
    /// * `id` - Identificador único (no debe repetirse en la simulación)
    /// * `name` - Nombre para mostrar
    /// * `arrival_time` - Tick de llegada
    /// * `burst_time` - Ticks de CPU requeridos (debe ser > 0; ver [`ProcessRecord::validate`])
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduler_simulator::ProcessRecord;
    ///
    /// let p = ProcessRecord::new(1, "A", 0, 5);
    /// assert_eq!(p.remaining_time, 5);
    /// assert!(p.start_time.is_none());
    /// ```
    pub fn new(id: Pid, name: &str, arrival_time: Tick, burst_time: Tick) -> Self {
        Self {
            id,
            name: name.to_string(),
            arrival_time,
            burst_time,
            remaining_time: burst_time,
            priority: None,
            start_time: None,
            completion_time: None,
        }
    }

    /// Crea un nuevo proceso con prioridad explícita.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduler_simulator::ProcessRecord;
    ///
    /// let p = ProcessRecord::with_priority(2, "B", 1, 3, 1);
    /// assert_eq!(p.priority, Some(1));
    /// ```
    pub fn with_priority(
        id: Pid,
        name: &str,
        arrival_time: Tick,
        burst_time: Tick,
        priority: i32,
    ) -> Self {
        let mut record = Self::new(id, name, arrival_time, burst_time);
        record.priority = Some(priority);
        record
    }

    /// Valida los campos del proceso antes de entrar al motor.
    ///
    /// Un `burst_time` de cero se rechaza aquí; los valores negativos de
    /// llegada o ráfaga son irrepresentables por tipo y se rechazan en la
    /// capa de entrada.
    ///
    /// # Returns
    ///
    /// `Ok(())` si el proceso es válido, `ConfigError` identificando el campo
    /// ofensivo en caso contrario.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.burst_time == 0 {
            return Err(ConfigError::InvalidBurstTime {
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Indica si el proceso terminó toda su ráfaga.
    pub fn is_completed(&self) -> bool {
        self.remaining_time == 0
    }

    /// Ticks de CPU ya consumidos por el proceso.
    pub fn executed_time(&self) -> Tick {
        self.burst_time - self.remaining_time
    }

    /// Tiempo de turnaround: finalización menos llegada.
    ///
    /// # Returns
    ///
    /// `Some(ticks)` si el proceso ya fue completado, `None` en caso contrario.
    pub fn turnaround_time(&self) -> Option<Tick> {
        self.completion_time.map(|c| c - self.arrival_time)
    }

    /// Tiempo de espera: turnaround menos ráfaga.
    ///
    /// # Returns
    ///
    /// `Some(ticks)` si el proceso ya fue completado, `None` en caso contrario.
    pub fn waiting_time(&self) -> Option<Tick> {
        self.turnaround_time().map(|t| t - self.burst_time)
    }

    /// Restaura el proceso a su estado de configuración inicial.
    ///
    /// Deja `remaining_time == burst_time` y borra los tiempos derivados,
    /// como exige la operación `reset` de la simulación.
    pub fn reset(&mut self) {
        self.remaining_time = self.burst_time;
        self.start_time = None;
        self.completion_time = None;
    }
}
