//! Multipart CIF submission
//!
//! Scalar fields arrive as text parts; `signature` and `picture` arrive as
//! file parts (at most one each). Text parts with unknown names are ignored.

use axum::extract::multipart::{Multipart, MultipartError};

use crate::models::record::parse_district;
use crate::models::NewCifRecord;

/// Form error type
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("missing required field '{0}'")]
    Missing(&'static str),

    #[error("district is not an integer: {0:?}")]
    InvalidDistrict(String),

    #[error("unexpected file field '{0}'")]
    UnexpectedFile(String),

    #[error("more than one file for '{0}'")]
    TooManyFiles(&'static str),
}

/// Raw values of one submission, before conversion to a row.
#[derive(Debug, Default)]
pub struct CifForm {
    pub cif_key: Option<String>,
    pub member_name: Option<String>,
    pub spouse: Option<String>,
    pub sitio_purok: Option<String>,
    pub barangay: Option<String>,
    pub municipality: Option<String>,
    pub district: Option<String>,
    pub signature: Option<Vec<u8>>,
    pub picture: Option<Vec<u8>>,
}

impl CifForm {
    /// Drain every part of the multipart body.
    pub async fn read(mut multipart: Multipart) -> Result<Self, FormError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if field.file_name().is_some() {
                let (slot, label) = match name.as_str() {
                    "signature" => (&mut form.signature, "signature"),
                    "picture" => (&mut form.picture, "picture"),
                    _ => return Err(FormError::UnexpectedFile(name.clone())),
                };
                if slot.is_some() {
                    return Err(FormError::TooManyFiles(label));
                }
                *slot = Some(field.bytes().await?.to_vec());
                continue;
            }

            let value = field.text().await?;
            let slot = match name.as_str() {
                "cifKey" => &mut form.cif_key,
                "memberName" => &mut form.member_name,
                "spouse" => &mut form.spouse,
                "sitioPurok" => &mut form.sitio_purok,
                "barangay" => &mut form.barangay,
                "municipality" => &mut form.municipality,
                "district" => &mut form.district,
                other => {
                    tracing::debug!(field = other, "Ignoring unknown form field");
                    continue;
                }
            };
            *slot = Some(value);
        }

        Ok(form)
    }

    /// Convert to a row. Absent files stay null.
    pub fn into_new_record(self) -> Result<NewCifRecord, FormError> {
        let district = match self.district {
            Some(raw) => parse_district(&raw).map_err(|_| FormError::InvalidDistrict(raw))?,
            None => None,
        };

        Ok(NewCifRecord {
            cif_key: self.cif_key.ok_or(FormError::Missing("cifKey"))?,
            member_name: self.member_name.ok_or(FormError::Missing("memberName"))?,
            spouse: self.spouse,
            sitio_purok: self.sitio_purok,
            barangay: self.barangay,
            municipality: self.municipality,
            district,
            signature: self.signature,
            picture: self.picture,
        })
    }
}
