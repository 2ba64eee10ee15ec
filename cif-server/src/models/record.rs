//! The CIF record and its write-side shapes.
//!
//! JSON field names are camelCase (`cifKey`, `memberName`, ...); database
//! columns are the snake_case struct field names (see `db::schema`).

use std::num::ParseIntError;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// One row of the `cif` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CifRecord {
    pub cif_key: String,
    pub member_name: String,
    pub spouse: Option<String>,
    pub sitio_purok: Option<String>,
    pub barangay: Option<String>,
    pub municipality: Option<String>,
    pub district: Option<i32>,
    #[serde(with = "super::blob")]
    pub signature: Option<Vec<u8>>,
    #[serde(with = "super::blob")]
    pub picture: Option<Vec<u8>>,
    pub date_created: DateTime<Utc>,
}

/// Values for a new row. `date_created` is assigned by storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCifRecord {
    pub cif_key: String,
    pub member_name: String,
    pub spouse: Option<String>,
    pub sitio_purok: Option<String>,
    pub barangay: Option<String>,
    pub municipality: Option<String>,
    pub district: Option<i32>,
    pub signature: Option<Vec<u8>>,
    pub picture: Option<Vec<u8>>,
}

impl NewCifRecord {
    pub fn into_record(self, date_created: DateTime<Utc>) -> CifRecord {
        CifRecord {
            cif_key: self.cif_key,
            member_name: self.member_name,
            spouse: self.spouse,
            sitio_purok: self.sitio_purok,
            barangay: self.barangay,
            municipality: self.municipality,
            district: self.district,
            signature: self.signature,
            picture: self.picture,
            date_created,
        }
    }
}

/// The six mutable scalar columns, as sent in a PUT body.
///
/// Missing fields are written as null, matching a plain `UPDATE ... SET`
/// of every column; the table rejects a null `member_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CifUpdate {
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default)]
    pub spouse: Option<String>,
    #[serde(default)]
    pub sitio_purok: Option<String>,
    #[serde(default)]
    pub barangay: Option<String>,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default, deserialize_with = "deserialize_district")]
    pub district: Option<i32>,
}

impl CifUpdate {
    pub fn apply_to(self, record: &mut CifRecord, member_name: String) {
        record.member_name = member_name;
        record.spouse = self.spouse;
        record.sitio_purok = self.sitio_purok;
        record.barangay = self.barangay;
        record.municipality = self.municipality;
        record.district = self.district;
    }
}

/// Projection used by the raffle-ticket listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CifKeyRow {
    pub cif_key: String,
}

/// Parse a district sent as text. Blank means null.
pub fn parse_district(raw: &str) -> Result<Option<i32>, ParseIntError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DistrictValue {
    Number(i32),
    Text(String),
}

fn deserialize_district<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<DistrictValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(DistrictValue::Number(n)) => Ok(Some(n)),
        Some(DistrictValue::Text(s)) => parse_district(&s).map_err(serde::de::Error::custom),
    }
}
