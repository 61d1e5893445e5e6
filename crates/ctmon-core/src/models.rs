//! Data models for ctmon.

use serde::{Deserialize, Serialize};

/// A raw form field value: the operator may leave it empty, type free
/// text, or a number. Persisted as `number|string`, exactly as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// The unset field: an empty string.
    pub fn empty() -> Self {
        RawValue::Text(String::new())
    }

    /// Cell text for display and export. Text is trimmed; whole numbers
    /// render without a trailing `.0`.
    pub fn display(&self) -> String {
        match self {
            RawValue::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            RawValue::Text(s) => s.trim().to_string(),
        }
    }
}

impl Default for RawValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Number(v)
    }
}
impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_string())
    }
}
impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Text(v)
    }
}

/// The six measurement fields of the entry form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    /// Loader cycle time (detik)
    #[serde(rename = "cycletimeLoader")]
    pub cycletime_loader: RawValue,
    /// Loader working time (menit)
    #[serde(rename = "waktuKerjaLoader")]
    pub waktu_kerja_loader: RawValue,
    /// Passes per hauler load (kali)
    #[serde(rename = "jumlahPassing")]
    pub jumlah_passing: RawValue,
    /// Hauler cycle time (menit)
    #[serde(rename = "cycletimeHauler")]
    pub cycletime_hauler: RawValue,
    /// Distance conversion factor (km)
    #[serde(rename = "konversiJarak")]
    pub konversi_jarak: RawValue,
    /// Hauler unit count
    #[serde(rename = "jumlahHD")]
    pub jumlah_hd: RawValue,
}

/// The four productivity figures, always recomputed from [`RawInputs`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DerivedMetrics {
    /// Minutes to fill one hauler
    pub loading_time: f64,
    /// bcm/jam
    pub productivity_loader: f64,
    /// bcm/jam/km
    pub productivity_hauler: f64,
    /// Hauler fleet capacity over loader capacity
    pub match_factor: f64,
}

/// Everything the operator supplies for one commit.
#[derive(Debug, Clone, Default)]
pub struct Candidate {
    pub inputs: RawInputs,
    pub pit_location: String,
    pub unit_loader: String,
}

/// A saved monitoring record. Immutable once created; removed only by the
/// retention sweep or a bulk overwrite of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    /// Display timestamp captured at save time (`dd/mm/yy, HH:MM:SS`)
    #[serde(rename = "dateTime")]
    pub date_time: String,
    #[serde(rename = "pitLocation")]
    pub pit_location: String,
    #[serde(rename = "unitLoader")]
    pub unit_loader: String,
    #[serde(flatten)]
    pub inputs: RawInputs,
    #[serde(rename = "loadingTime")]
    pub loading_time: f64,
    #[serde(rename = "productivityLoader")]
    pub productivity_loader: f64,
    #[serde(rename = "productivityHauler")]
    pub productivity_hauler: f64,
    #[serde(rename = "matchFactor")]
    pub match_factor: f64,
    /// Machine-sortable creation time, RFC 3339
    pub timestamp: String,
}
