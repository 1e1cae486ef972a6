//! # Módulo de Gestión de Colas
//!
//! Promoción de procesos pendientes a la cola de listos según su tick de
//! llegada. La promoción conserva el orden por tiempo de llegada, con empates
//! resueltos por orden de inserción en la configuración.

use std::collections::VecDeque;

use crate::process::{Pid, ProcessRecord, Tick};

/// Promueve procesos de pendientes a listos en cada tick.
///
/// La operación es idempotente dentro del mismo tick: un proceso ya movido no
/// vuelve a moverse porque abandona la colección de pendientes.
#[derive(Debug, Default)]
pub struct QueueManager;

impl QueueManager {
    /// Crea un nuevo gestor de colas.
    pub fn new() -> Self {
        Self
    }

    /// Mueve a listos todo proceso pendiente con `arrival_time <= tick`.
    ///
    /// Los recién llegados se anexan al final de la cola de listos ordenados
    /// por tiempo de llegada; los empates conservan el orden de inserción
    /// (el ordenamiento es estable).
    ///
    /// # Returns
    ///
    /// Los identificadores de los procesos recién llegados, en el orden en
    /// que entraron a listos.
    pub fn update(
        &self,
        pending: &mut Vec<ProcessRecord>,
        ready: &mut VecDeque<ProcessRecord>,
        tick: Tick,
    ) -> Vec<Pid> {
        let mut arrived: Vec<ProcessRecord> = Vec::new();
        let mut remaining: Vec<ProcessRecord> = Vec::new();

        for process in pending.drain(..) {
            if process.arrival_time <= tick {
                arrived.push(process);
            } else {
                remaining.push(process);
            }
        }
        *pending = remaining;

        arrived.sort_by_key(|p| p.arrival_time);

        let ids: Vec<Pid> = arrived.iter().map(|p| p.id).collect();
        for process in arrived {
            log::debug!(
                "tick {}: llega el proceso {} ('{}')",
                tick,
                process.id,
                process.name
            );
            ready.push_back(process);
        }
        ids
    }
}
