//! CSV export for the parts catalog and the service order book.
//!
//! Every field is quoted so names with commas or line breaks survive a round
//! trip through spreadsheet software.

use crate::{
    core::{part, service_order},
    entities::{client, service_order as order_entity},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::io::Write;
use tracing::{info, instrument};

/// Writes the full parts catalog as CSV, one row per part.
///
/// # Errors
/// Returns [`crate::errors::Error::Csv`] on write failure.
#[instrument(skip(db, writer))]
pub async fn export_parts<W: Write>(db: &DatabaseConnection, writer: W) -> Result<usize> {
    let parts = part::get_all_parts(db).await?;

    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);
    csv_writer.write_record([
        "Nome",
        "Código",
        "Preço",
        "Descrição",
        "Categoria",
        "Subcategoria",
    ])?;

    let count = parts.len();
    for part in parts {
        csv_writer.write_record([
            part.name,
            part.code,
            format!("{:.2}", part.price),
            part.description.unwrap_or_default(),
            part.category_name,
            part.subcategory_name,
        ])?;
    }
    csv_writer.flush()?;

    info!("Exported {count} parts");
    Ok(count)
}

/// Writes all service orders as CSV, newest first, each row carrying the
/// client name alongside the order.
///
/// # Errors
/// Returns [`crate::errors::Error::Csv`] on write failure.
#[instrument(skip(db, writer))]
pub async fn export_orders<W: Write>(db: &DatabaseConnection, writer: W) -> Result<usize> {
    let orders = service_order::get_orders_with_clients(db).await?;

    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);
    csv_writer.write_record(["Número", "Cliente", "Descrição", "Status", "Total", "Data"])?;

    let count = orders.len();
    for (order, client) in orders {
        csv_writer.write_record(order_record(&order, client.as_ref()))?;
    }
    csv_writer.flush()?;

    info!("Exported {count} service orders");
    Ok(count)
}

fn order_record(order: &order_entity::Model, client: Option<&client::Model>) -> [String; 6] {
    [
        order.id.to_string(),
        client.map(|c| c.name.clone()).unwrap_or_default(),
        order.description.clone().unwrap_or_default(),
        order.status.clone(),
        format!("{:.2}", order.total),
        order.created_at.format("%Y-%m-%d %H:%M").to_string(),
    ]
}
