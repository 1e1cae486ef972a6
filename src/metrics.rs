//! # Módulo de Métricas y Reportes
//!
//! Este módulo calcula las métricas de rendimiento de la corrida (turnaround
//! y espera por proceso, promedios, utilización de CPU) y genera los reportes
//! en texto, CSV y el diagrama de Gantt a partir del historial de ejecución.

use serde::Serialize;

use crate::history::ExecutionHistory;
use crate::process::{Pid, ProcessRecord, Tick};

/// Métricas individuales de un proceso completado.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessMetrics {
    /// Identificador del proceso
    pub pid: Pid,
    /// Nombre para mostrar
    pub name: String,
    /// Tick de llegada
    pub arrival_time: Tick,
    /// Ráfaga total requerida
    pub burst_time: Tick,
    /// Tick del primer despacho
    pub start_time: Tick,
    /// Tick de finalización
    pub completion_time: Tick,
    /// Turnaround: finalización menos llegada
    pub turnaround_time: Tick,
    /// Espera: turnaround menos ráfaga
    pub waiting_time: Tick,
}

/// Métricas agregadas de toda la corrida.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationMetrics {
    /// Métricas individuales, en orden de finalización
    pub processes: Vec<ProcessMetrics>,
    /// Promedio aritmético del tiempo de espera
    pub average_waiting_time: f64,
    /// Promedio aritmético del turnaround
    pub average_turnaround_time: f64,
    /// Orden de finalización de los procesos
    pub completion_order: Vec<Pid>,
    /// Duración total de la corrida en ticks
    pub total_ticks: Tick,
    /// Fracción de ticks con CPU ocupada (0.0 a 1.0)
    pub cpu_utilization: f64,
}

/// Calculadora de métricas de la simulación.
///
/// Deriva todas las cifras del conjunto final de procesos completados y del
/// historial de segmentos; no mantiene estado propio.
#[derive(Debug, Default)]
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Crea una nueva instancia del calculador de métricas.
    pub fn new() -> Self {
        Self
    }

    /// Calcula las métricas de un proceso completado.
    ///
    /// # Returns
    ///
    /// `ProcessMetrics` con las cifras derivadas, o `None` si el proceso aún
    /// no termina.
    pub fn calculate_process_metrics(&self, process: &ProcessRecord) -> Option<ProcessMetrics> {
        let completion_time = process.completion_time?;
        let start_time = process.start_time?;
        let turnaround_time = process.turnaround_time()?;
        let waiting_time = process.waiting_time()?;

        Some(ProcessMetrics {
            pid: process.id,
            name: process.name.clone(),
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            start_time,
            completion_time,
            turnaround_time,
            waiting_time,
        })
    }

    /// Calcula las métricas agregadas de la corrida.
    ///
    /// # Arguments
    ///
    /// * `completed` - Procesos completados, en orden de finalización
    /// * `history` - Historial de segmentos de la corrida
    /// * `total_ticks` - Tick actual del reloj de simulación
    pub fn calculate_simulation_metrics(
        &self,
        completed: &[ProcessRecord],
        history: &ExecutionHistory,
        total_ticks: Tick,
    ) -> SimulationMetrics {
        let mut processes = Vec::new();
        let mut total_wait: u64 = 0;
        let mut total_turnaround: u64 = 0;

        for process in completed {
            if let Some(metrics) = self.calculate_process_metrics(process) {
                total_wait += u64::from(metrics.waiting_time);
                total_turnaround += u64::from(metrics.turnaround_time);
                processes.push(metrics);
            }
        }

        let count = processes.len();
        let average_waiting_time = if count > 0 {
            total_wait as f64 / count as f64
        } else {
            0.0
        };
        let average_turnaround_time = if count > 0 {
            total_turnaround as f64 / count as f64
        } else {
            0.0
        };

        let cpu_utilization = if total_ticks > 0 {
            f64::from(history.busy_ticks()) / f64::from(total_ticks)
        } else {
            0.0
        };

        SimulationMetrics {
            completion_order: completed.iter().map(|p| p.id).collect(),
            processes,
            average_waiting_time,
            average_turnaround_time,
            total_ticks,
            cpu_utilization,
        }
    }

    /// Genera la línea de Gantt tick a tick a partir del historial.
    ///
    /// Cada tick se etiqueta `P<id>` o `Idle`, unidos por flechas.
    ///
    /// # Returns
    ///
    /// String tipo `"P1 -> P1 -> Idle -> P2"`.
    pub fn gantt_chart(&self, history: &ExecutionHistory, total_ticks: Tick) -> String {
        let mut labels: Vec<String> = Vec::with_capacity(total_ticks as usize);
        for tick in 0..total_ticks {
            let label = history
                .segments()
                .iter()
                .find(|s| s.start_tick <= tick && tick < s.end_tick)
                .map(|s| format!("P{}", s.pid))
                .unwrap_or_else(|| "Idle".to_string());
            labels.push(label);
        }
        labels.join(" -> ")
    }

    /// Genera un reporte detallado de los resultados de la corrida.
    ///
    /// # Returns
    ///
    /// String con la tabla por proceso y las estadísticas resumidas.
    pub fn generate_report(&self, metrics: &SimulationMetrics) -> String {
        let mut report = String::new();

        report.push_str("\n=== REPORTE DE RESULTADOS ===\n\n");
        report.push_str(&format!(
            "{:^12} {:^10} {:^10} {:^10} {:^10} {:^10} {:^12}\n",
            "Proceso", "Llegada", "Ráfaga", "Inicio", "Fin", "Espera", "Turnaround"
        ));
        report.push_str(&format!("{}\n", "-".repeat(80)));

        for process in &metrics.processes {
            report.push_str(&format!(
                "{:^12} {:^10} {:^10} {:^10} {:^10} {:^10} {:^12}\n",
                format!("{} (P{})", process.name, process.pid),
                process.arrival_time,
                process.burst_time,
                process.start_time,
                process.completion_time,
                process.waiting_time,
                process.turnaround_time,
            ));
        }

        report.push_str("\n=== ESTADÍSTICAS RESUMIDAS ===\n");
        report.push_str(&format!(
            "Procesos completados: {}\n",
            metrics.processes.len()
        ));
        report.push_str(&format!(
            "Tiempo promedio de espera: {:.2} ticks\n",
            metrics.average_waiting_time
        ));
        report.push_str(&format!(
            "Tiempo promedio de turnaround: {:.2} ticks\n",
            metrics.average_turnaround_time
        ));
        report.push_str(&format!("Duración total: {} ticks\n", metrics.total_ticks));
        report.push_str(&format!(
            "Utilización de CPU: {:.1}%\n",
            metrics.cpu_utilization * 100.0
        ));
        report.push_str(&format!(
            "Orden de finalización: {:?}\n",
            metrics.completion_order
        ));

        report
    }

    /// Genera un reporte resumido en formato CSV.
    pub fn generate_csv_report(&self, metrics: &SimulationMetrics) -> String {
        let mut csv = String::new();
        csv.push_str(
            "ProcessID,Name,ArrivalTime,BurstTime,StartTime,CompletionTime,WaitingTime,TurnaroundTime\n",
        );

        for process in &metrics.processes {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{}\n",
                process.pid,
                process.name,
                process.arrival_time,
                process.burst_time,
                process.start_time,
                process.completion_time,
                process.waiting_time,
                process.turnaround_time,
            ));
        }

        csv
    }
}
