//! Bulk part import from CSV spreadsheets.
//!
//! The importer is tolerant about headers: columns are matched by
//! case-insensitive substring, so "Nome do Produto", "nome" and "NOME" all
//! map to the name column. Rows import independently; a bad row is recorded
//! in the [`ImportSummary`] and the rest proceed.

use crate::{
    core::part::{self, NewPart},
    entities::{Category, CategoryColumn, category},
    errors::{Error, Result},
};
use sea_orm::prelude::*;
use std::io::{Read, Write};
use tracing::{info, instrument, warn};

/// Header row written into the downloadable import template.
pub const TEMPLATE_HEADERS: [&str; 6] = [
    "Nome",
    "Código",
    "Preço",
    "Descrição",
    "Categoria",
    "Subcategoria",
];

/// Resolved header positions for one spreadsheet. Only name is mandatory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: Option<usize>,
    pub code: Option<usize>,
    pub price: Option<usize>,
    pub description: Option<usize>,
    pub category: Option<usize>,
    pub subcategory: Option<usize>,
}

/// Outcome of one import run: how many rows landed and why the rest did not.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    /// (1-based data row number, reason) for every skipped row.
    pub skipped: Vec<(usize, String)>,
}

/// Maps spreadsheet headers to part fields by case-insensitive substring.
///
/// Subcategory patterns are tested before category ones; "Subcategoria"
/// contains "categoria" and would otherwise be swallowed by the category
/// match.
///
/// # Errors
/// Returns [`Error::Validation`] when no header matches the name column,
/// since a part cannot be created without one.
pub fn map_columns(headers: &[String]) -> Result<ColumnMap> {
    let mut map = ColumnMap::default();

    for (index, header) in headers.iter().enumerate() {
        let header = header.to_lowercase();
        let slot = if header.contains("subcategoria") || header.contains("subcategory") {
            &mut map.subcategory
        } else if header.contains("categoria") || header.contains("category") {
            &mut map.category
        } else if header.contains("nome") || header.contains("name") {
            &mut map.name
        } else if header.contains("código") || header.contains("codigo") || header.contains("code")
        {
            &mut map.code
        } else if header.contains("preço") || header.contains("preco") || header.contains("price")
        {
            &mut map.price
        } else if header.contains("descrição")
            || header.contains("descricao")
            || header.contains("description")
        {
            &mut map.description
        } else {
            continue;
        };
        // First matching header wins
        slot.get_or_insert(index);
    }

    if map.name.is_none() {
        return Err(Error::Validation {
            message: "Nenhuma coluna de nome encontrada na planilha.".to_string(),
        });
    }
    Ok(map)
}

/// Writes an empty import template with the expected headers.
///
/// # Errors
/// Returns [`Error::Csv`] on serialization failure.
pub fn write_template<W: Write>(writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);
    csv_writer.write_record(TEMPLATE_HEADERS)?;
    csv_writer.flush()?;
    Ok(())
}

/// Reads a CSV spreadsheet and creates one part per usable row.
///
/// Prices accept both decimal point and decimal comma ("12,50"). Category and
/// subcategory cells are matched against existing categories by exact name;
/// an unknown name skips the row rather than inventing a category.
///
/// # Errors
/// Returns [`Error::Validation`] for an unusable header row and [`Error::Csv`]
/// for an unreadable file. Row-level problems never fail the run.
#[instrument(skip(db, reader))]
pub async fn import_parts<R: Read>(
    db: &DatabaseConnection,
    reader: R,
) -> Result<ImportSummary> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let columns = map_columns(&headers)?;

    let mut summary = ImportSummary::default();

    for (index, record) in csv_reader.records().enumerate() {
        let row = index + 1;
        let record = match record {
            Ok(record) => record,
            Err(error) => {
                warn!("Skipping row {row}: {error}");
                summary.skipped.push((row, "Linha ilegível.".to_string()));
                continue;
            }
        };

        match import_row(db, &columns, &record).await {
            Ok(()) => summary.imported += 1,
            Err(error) => {
                warn!("Skipping row {row}: {error}");
                summary.skipped.push((row, error.user_message()));
            }
        }
    }

    info!(
        "Imported {} parts, skipped {}",
        summary.imported,
        summary.skipped.len()
    );
    Ok(summary)
}

async fn import_row(
    db: &DatabaseConnection,
    columns: &ColumnMap,
    record: &csv::StringRecord,
) -> Result<()> {
    let cell = |slot: Option<usize>| {
        slot.and_then(|index| record.get(index))
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    };

    let name = cell(columns.name);
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Nome da peça é obrigatório.".to_string(),
        });
    }

    let price_text = cell(columns.price);
    let price = if price_text.is_empty() {
        0.0
    } else {
        parse_price(&price_text)?
    };

    let category_id = match cell(columns.category).as_str() {
        "" => None,
        category_name => Some(find_category_by_name(db, category_name, None).await?),
    };
    let subcategory_id = match (cell(columns.subcategory).as_str(), category_id) {
        ("", _) => None,
        (_, None) => {
            return Err(Error::Validation {
                message: "Subcategoria informada sem categoria.".to_string(),
            });
        }
        (subcategory_name, Some(parent_id)) => {
            Some(find_category_by_name(db, subcategory_name, Some(parent_id)).await?)
        }
    };

    let description = match cell(columns.description) {
        text if text.is_empty() => None,
        text => Some(text),
    };

    part::create_part(
        db,
        NewPart {
            name,
            code: cell(columns.code),
            price,
            description,
            category_id,
            subcategory_id,
            ..Default::default()
        },
    )
    .await?;
    Ok(())
}

/// Parses a price cell, accepting "1234.56", "1234,56" and "R$ 1.234,56".
fn parse_price(text: &str) -> Result<f64> {
    let cleaned = text.trim().trim_start_matches("R$").trim();
    // Decimal comma: drop thousands dots, turn the comma into a point
    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned.to_string()
    };
    normalized.parse::<f64>().map_err(|_| Error::Validation {
        message: format!("Preço inválido: {text}"),
    })
}

async fn find_category_by_name(
    db: &DatabaseConnection,
    name: &str,
    parent_id: Option<i64>,
) -> Result<i64> {
    let mut query = Category::find().filter(CategoryColumn::Name.eq(name));
    query = match parent_id {
        Some(parent_id) => query.filter(CategoryColumn::ParentId.eq(parent_id)),
        None => query.filter(CategoryColumn::ParentId.is_null()),
    };
    let found: Option<category::Model> = query.one(db).await?;
    found.map(|category| category.id).ok_or(Error::Validation {
        message: format!("Categoria não encontrada: {name}"),
    })
}
