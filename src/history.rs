//! # Módulo de Historial de Ejecución
//!
//! Bitácora de solo-anexar de los segmentos de ejecución, fuente tanto del
//! diagrama de Gantt como de las métricas. Los ticks ociosos no generan
//! segmento: quedan como huecos entre segmentos consecutivos.

use serde::Serialize;

use crate::process::{Pid, Tick};

/// Intervalo semiabierto `[start_tick, end_tick)` durante el cual un proceso
/// ocupó la CPU de forma continua.
///
/// Un proceso interrumpido y reanudado posee varios segmentos disjuntos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExecutionSegment {
    /// Proceso dueño del segmento
    pub pid: Pid,
    /// Primer tick del intervalo (inclusivo)
    pub start_tick: Tick,
    /// Tick final del intervalo (exclusivo); `end_tick >= start_tick`
    pub end_tick: Tick,
}

impl ExecutionSegment {
    /// Duración del segmento en ticks.
    pub fn duration(&self) -> Tick {
        self.end_tick - self.start_tick
    }
}

/// Historial de ejecución de la corrida.
///
/// Con una sola CPU hay a lo sumo un segmento abierto a la vez. El cierre se
/// correlaciona por `pid`, nunca por nombre: los nombres pueden colisionar,
/// los identificadores no.
#[derive(Debug, Default, Clone)]
pub struct ExecutionHistory {
    segments: Vec<ExecutionSegment>,
    open: Option<usize>,
}

impl ExecutionHistory {
    /// Crea un historial vacío.
    pub fn new() -> Self {
        Self::default()
    }

    /// Abre un segmento para `pid` a partir de `tick`.
    ///
    /// # Panics
    ///
    /// En compilaciones de depuración, si ya existe un segmento abierto.
    pub fn open_segment(&mut self, pid: Pid, tick: Tick) {
        debug_assert!(self.open.is_none(), "ya hay un segmento abierto");
        self.segments.push(ExecutionSegment {
            pid,
            start_tick: tick,
            end_tick: tick,
        });
        self.open = Some(self.segments.len() - 1);
    }

    /// Cierra el segmento abierto de `pid` fijando su `end_tick`.
    ///
    /// Si no hay segmento abierto, o el abierto pertenece a otro proceso, no
    /// se modifica nada: la correlación es estrictamente por identidad.
    pub fn close_segment(&mut self, pid: Pid, tick: Tick) {
        if let Some(idx) = self.open {
            if self.segments[idx].pid == pid {
                debug_assert!(tick >= self.segments[idx].start_tick);
                self.segments[idx].end_tick = tick;
                self.open = None;
            }
        }
    }

    /// Identificador del proceso con segmento abierto, si lo hay.
    pub fn open_pid(&self) -> Option<Pid> {
        self.open.map(|idx| self.segments[idx].pid)
    }

    /// Segmentos registrados, en orden de apertura.
    pub fn segments(&self) -> &[ExecutionSegment] {
        &self.segments
    }

    /// Suma de las duraciones de los segmentos de un proceso.
    ///
    /// Para un proceso completado debe coincidir con su `burst_time`.
    pub fn total_running_time(&self, pid: Pid) -> Tick {
        self.segments
            .iter()
            .filter(|s| s.pid == pid)
            .map(|s| s.duration())
            .sum()
    }

    /// Total de ticks con CPU ocupada.
    pub fn busy_ticks(&self) -> Tick {
        self.segments.iter().map(|s| s.duration()).sum()
    }

    /// Vacía el historial (usado por la operación de reinicio).
    pub fn clear(&mut self) {
        self.segments.clear();
        self.open = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_close_records_half_open_interval() {
        let mut history = ExecutionHistory::new();
        history.open_segment(1, 0);
        assert_eq!(history.open_pid(), Some(1));
        history.close_segment(1, 5);

        assert_eq!(history.segments().len(), 1);
        let segment = history.segments()[0];
        assert_eq!(segment.duration(), 5);
        assert!(history.open_pid().is_none());
    }

    #[test]
    fn test_close_matches_by_pid_not_position() {
        let mut history = ExecutionHistory::new();
        history.open_segment(1, 0);
        // Cierre con pid equivocado: el segmento sigue abierto.
        history.close_segment(2, 3);
        assert_eq!(history.open_pid(), Some(1));
        history.close_segment(1, 3);
        assert!(history.open_pid().is_none());
    }

    #[test]
    fn test_preempted_process_owns_disjoint_segments() {
        let mut history = ExecutionHistory::new();
        history.open_segment(1, 0);
        history.close_segment(1, 2);
        history.open_segment(2, 2);
        history.close_segment(2, 4);
        history.open_segment(1, 4);
        history.close_segment(1, 7);

        assert_eq!(history.segments().len(), 3);
        assert_eq!(history.total_running_time(1), 5);
        assert_eq!(history.total_running_time(2), 2);
        assert_eq!(history.busy_ticks(), 7);
    }

    #[test]
    fn test_clear_empties_history() {
        let mut history = ExecutionHistory::new();
        history.open_segment(1, 0);
        history.close_segment(1, 1);
        history.clear();
        assert!(history.segments().is_empty());
        assert!(history.open_pid().is_none());
        assert_eq!(history.busy_ticks(), 0);
    }
}
