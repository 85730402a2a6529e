//! Appointment scheduling business logic.

use crate::{
    core::counter,
    entities::{Appointment, Client, appointment},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Retrieves all appointments, soonest first.
pub async fn get_all_appointments(db: &DatabaseConnection) -> Result<Vec<appointment::Model>> {
    Appointment::find()
        .order_by_asc(appointment::Column::ScheduledFor)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a client's appointments, soonest first.
pub async fn get_appointments_for_client(
    db: &DatabaseConnection,
    client_id: i64,
) -> Result<Vec<appointment::Model>> {
    Appointment::find()
        .filter(appointment::Column::ClientId.eq(client_id))
        .order_by_asc(appointment::Column::ScheduledFor)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Books an appointment for a client with status `"scheduled"`.
///
/// # Errors
/// Returns [`Error::ClientNotFound`] for a missing client and
/// [`Error::Validation`] for an empty service description.
pub async fn create_appointment(
    db: &DatabaseConnection,
    client_id: i64,
    service: String,
    scheduled_for: DateTime<Utc>,
) -> Result<appointment::Model> {
    if service.trim().is_empty() {
        return Err(Error::Validation {
            message: "Informe o serviço desejado.".to_string(),
        });
    }

    Client::find_by_id(client_id)
        .one(db)
        .await?
        .ok_or(Error::ClientNotFound { id: client_id })?;

    let id = counter::next_number(db, counter::APPOINTMENTS).await?;

    let active = appointment::ActiveModel {
        id: Set(id),
        client_id: Set(client_id),
        service: Set(service.trim().to_string()),
        scheduled_for: Set(scheduled_for),
        status: Set("scheduled".to_string()),
        created_at: Set(chrono::Utc::now()),
    };

    let result = active.insert(db).await?;
    info!(
        "Booked appointment {} for client {} at {}",
        result.id, client_id, scheduled_for
    );
    Ok(result)
}

/// Updates an appointment's status (`"scheduled"`, `"confirmed"`, `"done"`,
/// `"canceled"`).
///
/// # Errors
/// Returns [`Error::AppointmentNotFound`] if the appointment does not exist
/// and [`Error::Validation`] for an unknown status.
pub async fn update_appointment_status(
    db: &DatabaseConnection,
    appointment_id: i64,
    status: &str,
) -> Result<appointment::Model> {
    if !matches!(status, "scheduled" | "confirmed" | "done" | "canceled") {
        return Err(Error::Validation {
            message: "Status de agendamento inválido.".to_string(),
        });
    }

    let existing = Appointment::find_by_id(appointment_id)
        .one(db)
        .await?
        .ok_or(Error::AppointmentNotFound { id: appointment_id })?;

    let mut active: appointment::ActiveModel = existing.into();
    active.status = Set(status.to_string());
    active.update(db).await.map_err(Into::into)
}

/// Deletes an appointment.
///
/// # Errors
/// Returns [`Error::AppointmentNotFound`] if the appointment does not exist.
pub async fn delete_appointment(db: &DatabaseConnection, appointment_id: i64) -> Result<()> {
    let result = Appointment::delete_by_id(appointment_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::AppointmentNotFound { id: appointment_id });
    }
    Ok(())
}
