//! CSV exports.

use folio_core::{CanonicalField, CanonicalHolding, FieldValue, FolioError, FolioResult, ResolvedSchema};

/// Header of the reduced export.
pub const REDUCED_EXPORT_COLUMNS: [&str; 2] = ["Symbol", "Shares"];

/// Renders every column of every holding as CSV.
///
/// Columns keep input order, except that `Name` is placed in front of the
/// symbol column.
pub fn render_full_export(
    holdings: &[CanonicalHolding],
    schema: &ResolvedSchema,
) -> FolioResult<String> {
    let columns = schema.presentation_order();
    let rows = holdings.iter().map(|h| {
        columns
            .iter()
            .map(|col| h.record.get(col).map(FieldValue::to_string).unwrap_or_default())
            .collect::<Vec<_>>()
    });
    let header: Vec<&str> = columns.iter().map(String::as_str).collect();
    write_csv("full export", &header, rows)
}

/// Renders the two-column `Symbol`,`Shares` export.
///
/// Returns `None` when either field is unresolved, so no file is produced.
pub fn render_reduced_export(
    holdings: &[CanonicalHolding],
    schema: &ResolvedSchema,
) -> FolioResult<Option<String>> {
    if !schema.is_resolved(CanonicalField::Symbol) || !schema.is_resolved(CanonicalField::Shares) {
        return Ok(None);
    }

    let rows = holdings.iter().map(|h| {
        vec![
            h.symbol.clone().unwrap_or_default(),
            h.shares
                .as_ref()
                .and_then(FieldValue::display_value)
                .unwrap_or_default(),
        ]
    });
    write_csv("reduced export", &REDUCED_EXPORT_COLUMNS, rows).map(Some)
}

fn write_csv<I>(artifact: &str, header: &[&str], rows: I) -> FolioResult<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let to_err = |e: csv::Error| FolioError::artifact(artifact, e.to_string());

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header).map_err(to_err)?;
    for row in rows {
        writer.write_record(&row).map_err(to_err)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FolioError::artifact(artifact, e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| FolioError::artifact(artifact, e.to_string()))
}
