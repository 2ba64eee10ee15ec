//! The `cif` table contract.
//!
//! Column list and statements are defined once here and shared by the
//! insert, select and update paths. Column names match the fields of
//! [`CifRecord`](crate::models::CifRecord) so rows map with `FromRow`.

/// Table name
pub const TABLE: &str = "cif";

macro_rules! record_columns {
    () => {
        "cif_key, member_name, spouse, sitio_purok, barangay, municipality, district, signature, picture, date_created"
    };
}

/// Every column of a record, in row order.
pub const RECORD_COLUMNS: &str = record_columns!();

pub const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS cif (
    cif_key TEXT PRIMARY KEY,
    member_name TEXT NOT NULL,
    spouse TEXT,
    sitio_purok TEXT,
    barangay TEXT,
    municipality TEXT,
    district INTEGER,
    signature BYTEA,
    picture BYTEA,
    date_created TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

pub const CREATE_MEMBER_NAME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS cif_member_name_idx ON cif (member_name)";

/// `$1..$9` follow the column order; `date_created` comes from the server clock.
pub const INSERT: &str = concat!(
    "INSERT INTO cif (",
    record_columns!(),
    ") VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())"
);

pub const SELECT_ALL: &str = concat!("SELECT ", record_columns!(), " FROM cif");

pub const SELECT_BY_KEY: &str = concat!(
    "SELECT ",
    record_columns!(),
    " FROM cif WHERE cif_key = $1"
);

/// Exact match, no pattern operators.
pub const SELECT_BY_MEMBER_NAME: &str = concat!(
    "SELECT ",
    record_columns!(),
    " FROM cif WHERE member_name = $1"
);

pub const SELECT_KEYS: &str = "SELECT cif_key FROM cif";

/// `$1` is the key; `cif_key`, `signature`, `picture` and `date_created` are never set.
pub const UPDATE_SCALARS: &str = "UPDATE cif SET \
    member_name = $2, spouse = $3, sitio_purok = $4, \
    barangay = $5, municipality = $6, district = $7 \
    WHERE cif_key = $1";
