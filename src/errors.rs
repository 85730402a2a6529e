//! Unified error types for the back-office core.
//!
//! Every fallible operation in the crate returns [`Result`]. Operator-facing
//! text is uniform and Portuguese (the back office runs in pt-BR); use
//! [`Error::user_message`] at the presentation boundary instead of `Display`,
//! which stays developer-facing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Client not found: {id}")]
    ClientNotFound { id: i64 },

    #[error("Equipment not found: {id}")]
    EquipmentNotFound { id: i64 },

    #[error("Category not found: {id}")]
    CategoryNotFound { id: i64 },

    #[error("Part not found: {id}")]
    PartNotFound { id: i64 },

    #[error("Checklist type not found: {id}")]
    ChecklistTypeNotFound { id: i64 },

    #[error("Inspection not found: {id}")]
    InspectionNotFound { id: i64 },

    #[error("Service order not found: {id}")]
    ServiceOrderNotFound { id: i64 },

    #[error("Appointment not found: {id}")]
    AppointmentNotFound { id: i64 },
}

impl Error {
    /// Short Portuguese message suitable for the dismissible alert banner the
    /// back office shows on failure. One message shape per failure class; the
    /// operator retries manually, nothing is retried automatically.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation { message } | Error::Config { message } => message.clone(),
            Error::Database(_) | Error::Io(_) => {
                "Erro ao acessar o banco de dados. Tente novamente.".to_string()
            }
            Error::Csv(_) => "Erro ao processar o arquivo. Verifique o formato.".to_string(),
            Error::ClientNotFound { .. } => "Cliente não encontrado.".to_string(),
            Error::EquipmentNotFound { .. } => "Equipamento não encontrado.".to_string(),
            Error::CategoryNotFound { .. } => "Categoria não encontrada.".to_string(),
            Error::PartNotFound { .. } => "Peça não encontrada.".to_string(),
            Error::ChecklistTypeNotFound { .. } => {
                "Tipo de checklist não encontrado.".to_string()
            }
            Error::InspectionNotFound { .. } => "Inspeção não encontrada.".to_string(),
            Error::ServiceOrderNotFound { .. } => "Ordem de serviço não encontrada.".to_string(),
            Error::AppointmentNotFound { .. } => "Agendamento não encontrado.".to_string(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_for_validation_is_the_message_itself() {
        let err = Error::Validation {
            message: "Selecione um cliente para continuar.".to_string(),
        };
        assert_eq!(err.user_message(), "Selecione um cliente para continuar.");
    }

    #[test]
    fn user_message_for_not_found_is_portuguese() {
        assert_eq!(
            Error::PartNotFound { id: 7 }.user_message(),
            "Peça não encontrada."
        );
        assert_eq!(
            Error::ClientNotFound { id: 1 }.user_message(),
            "Cliente não encontrado."
        );
    }
}
