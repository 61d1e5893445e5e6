//! Export encoder: semicolon-delimited CSV for spreadsheet import.
//!
//! The delimiter is `;` so the file opens cleanly in spreadsheet locales
//! that use the comma as decimal separator; a UTF-8 BOM prefix keeps
//! charset detection honest.

use csv::{QuoteStyle, WriterBuilder};

use crate::error::{MonitorError, Result};
use crate::models::Record;

/// Default download name for the exported history.
pub const EXPORT_FILE_NAME: &str = "monitoring_ct_data.csv";

const BOM: &[u8] = "\u{feff}".as_bytes();

/// Column headers, fixed order.
pub const HEADERS: [&str; 13] = [
    "Waktu dan Tanggal",
    "Lokasi Pit",
    "Unit Loader",
    "Cycletime Loader (detik)",
    "Jumlah Passing (kali)",
    "Loading Time (menit)",
    "Waktu Kerja (menit)",
    "Productivity Loader (bcm/jam)",
    "Cycletime Hauler (menit)",
    "Konversi Jarak (km)",
    "Productivity Hauler (bcm/Jam/km)",
    "Jumlah HD (unit)",
    "Match Factor",
];

/// Render the record sequence as a BOM-prefixed, `;`-delimited CSV
/// document, oldest record first. Cells containing a quote, semicolon
/// or newline are quoted with internal quotes doubled; derived metrics
/// carry exactly two decimals, raw inputs are rendered verbatim.
pub fn encode_csv(records: &[Record]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::from(BOM));

    writer.write_record(HEADERS)?;
    for record in records {
        writer.write_record(csv_row(record))?;
    }

    writer
        .into_inner()
        .map_err(|e| MonitorError::Other(e.to_string()))
}

fn csv_row(record: &Record) -> Vec<String> {
    vec![
        record.date_time.trim().to_string(),
        record.pit_location.trim().to_string(),
        record.unit_loader.trim().to_string(),
        record.inputs.cycletime_loader.display(),
        record.inputs.jumlah_passing.display(),
        format!("{:.2}", record.loading_time),
        record.inputs.waktu_kerja_loader.display(),
        format!("{:.2}", record.productivity_loader),
        record.inputs.cycletime_hauler.display(),
        record.inputs.konversi_jarak.display(),
        format!("{:.2}", record.productivity_hauler),
        record.inputs.jumlah_hd.display(),
        format!("{:.2}", record.match_factor),
    ]
}
