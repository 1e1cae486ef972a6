//! # Módulo de Errores de Configuración
//!
//! Define los errores que pueden producirse al configurar la simulación o al
//! agregar procesos. Cada variante identifica el campo ofensivo; ningún error
//! deja estado parcial en el motor.

use std::error::Error;
use std::fmt;

/// Errores de validación de la configuración y de los procesos.
///
/// Se producen antes de mutar cualquier estado: si la configuración es
/// rechazada, el motor queda exactamente como estaba.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// El tiempo de ráfaga (burst) debe ser mayor que cero.
    InvalidBurstTime {
        /// Nombre del proceso ofensivo
        name: String,
    },
    /// El quantum de Round Robin debe ser mayor que cero.
    InvalidQuantum,
    /// Round Robin requiere un quantum y no se proporcionó.
    MissingQuantum,
    /// Ya existe un proceso con este identificador.
    DuplicateId {
        /// Identificador duplicado
        id: usize,
    },
    /// El nombre de algoritmo no corresponde a ninguna política conocida.
    UnknownPolicy {
        /// Nombre recibido
        name: String,
    },
    /// Las políticas por prioridad exigen prioridad explícita en cada proceso.
    MissingPriority {
        /// Nombre del proceso sin prioridad
        name: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBurstTime { name } => {
                write!(f, "burst_time inválido para '{}': debe ser > 0", name)
            }
            Self::InvalidQuantum => write!(f, "quantum inválido: debe ser > 0"),
            Self::MissingQuantum => write!(f, "Round Robin requiere un quantum"),
            Self::DuplicateId { id } => write!(f, "id de proceso duplicado: {}", id),
            Self::UnknownPolicy { name } => {
                write!(f, "algoritmo de planificación desconocido: '{}'", name)
            }
            Self::MissingPriority { name } => {
                write!(
                    f,
                    "el proceso '{}' no tiene prioridad y la política la requiere",
                    name
                )
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_identifies_field() {
        let err = ConfigError::InvalidBurstTime {
            name: "P1".to_string(),
        };
        assert!(err.to_string().contains("burst_time"));
        assert!(err.to_string().contains("P1"));

        let err = ConfigError::DuplicateId { id: 7 };
        assert!(err.to_string().contains('7'));

        let err = ConfigError::UnknownPolicy {
            name: "lottery".to_string(),
        };
        assert!(err.to_string().contains("lottery"));
    }
}
