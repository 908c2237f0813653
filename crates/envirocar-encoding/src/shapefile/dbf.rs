//! dBase III attribute table.

use chrono::{Datelike, NaiveDate};

/// Longest field name dBase III accepts.
pub const MAX_FIELD_NAME: usize = 10;

/// Field types used by the track export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Left-aligned text.
    Character,
    /// Right-aligned decimal number.
    Numeric,
}

impl FieldType {
    fn code(self) -> u8 {
        match self {
            FieldType::Character => b'C',
            FieldType::Numeric => b'N',
        }
    }
}

/// One column of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// At most [`MAX_FIELD_NAME`] ASCII characters.
    pub name: String,
    /// Column type.
    pub kind: FieldType,
    /// Width in bytes.
    pub length: u8,
    /// Digits after the decimal point, numeric fields only.
    pub decimals: u8,
}

impl Field {
    /// A text column.
    pub fn character(name: impl Into<String>, length: u8) -> Self {
        Self {
            name: name.into(),
            kind: FieldType::Character,
            length,
            decimals: 0,
        }
    }

    /// A numeric column.
    pub fn numeric(name: impl Into<String>, length: u8, decimals: u8) -> Self {
        Self {
            name: name.into(),
            kind: FieldType::Numeric,
            length,
            decimals,
        }
    }
}

/// A cell value; `None` cells are written blank.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text.
    Text(String),
    /// Number.
    Number(f64),
}

/// Derives unique dBase field names from arbitrary labels.
///
/// Non-alphanumeric characters become `_`, names are cut to ten
/// characters, and clashes (case-insensitive, also against `reserved`)
/// are resolved with a numeric suffix.
pub fn field_names<'a>(labels: impl IntoIterator<Item = &'a str>, reserved: &[&str]) -> Vec<String> {
    let mut taken: Vec<String> = reserved.iter().map(|r| r.to_ascii_lowercase()).collect();
    let mut names = Vec::new();
    for label in labels {
        let mut base: String = label
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .take(MAX_FIELD_NAME)
            .collect();
        if base.is_empty() {
            base.push('_');
        }
        let mut name = base.clone();
        let mut n = 1;
        while taken.contains(&name.to_ascii_lowercase()) {
            let suffix = format!("_{n}");
            let keep = MAX_FIELD_NAME.saturating_sub(suffix.len()).min(base.len());
            name = format!("{}{suffix}", &base[..keep]);
            n += 1;
        }
        taken.push(name.to_ascii_lowercase());
        names.push(name);
    }
    names
}

fn cell(field: &Field, value: Option<&Value>) -> Vec<u8> {
    let width = usize::from(field.length);
    let text = match value {
        Some(Value::Text(s)) => {
            let mut s: String = s.chars().filter(char::is_ascii).collect();
            s.truncate(width);
            format!("{s:<width$}")
        }
        Some(Value::Number(v)) if v.is_finite() => {
            let decimals = usize::from(field.decimals);
            let s = format!("{v:>width$.decimals$}");
            if s.len() > width {
                log::warn!("Value {v} does not fit field '{}', left blank", field.name);
                " ".repeat(width)
            } else {
                s
            }
        }
        _ => " ".repeat(width),
    };
    text.into_bytes()
}

/// Writes a table. Each row holds one optional value per field.
pub fn write(fields: &[Field], rows: &[Vec<Option<Value>>], date: NaiveDate) -> Vec<u8> {
    let header_len = 32 + 32 * fields.len() + 1;
    let record_len = 1 + fields.iter().map(|f| usize::from(f.length)).sum::<usize>();
    let mut out = Vec::with_capacity(header_len + record_len * rows.len() + 1);

    out.push(0x03);
    out.push(u8::try_from(date.year() - 1900).unwrap_or(0));
    out.push(u8::try_from(date.month()).unwrap_or(1));
    out.push(u8::try_from(date.day()).unwrap_or(1));
    out.extend_from_slice(&u32::try_from(rows.len()).unwrap_or(u32::MAX).to_le_bytes());
    out.extend_from_slice(&u16::try_from(header_len).unwrap_or(u16::MAX).to_le_bytes());
    out.extend_from_slice(&u16::try_from(record_len).unwrap_or(u16::MAX).to_le_bytes());
    out.extend_from_slice(&[0; 20]);

    for field in fields {
        let mut name = [0u8; 11];
        for (slot, b) in name.iter_mut().zip(field.name.bytes().take(MAX_FIELD_NAME)) {
            *slot = b;
        }
        out.extend_from_slice(&name);
        out.push(field.kind.code());
        out.extend_from_slice(&[0; 4]);
        out.push(field.length);
        out.push(field.decimals);
        out.extend_from_slice(&[0; 14]);
    }
    out.push(0x0D);

    for row in rows {
        out.push(b' ');
        for (i, field) in fields.iter().enumerate() {
            out.extend_from_slice(&cell(field, row.get(i).and_then(Option::as_ref)));
        }
    }
    out.push(0x1A);
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_truncate_and_dedupe() {
        let names = field_names(
            ["Speed", "Consumption", "Consumption (GPS)", "ID", "CO2 emission"],
            &["id", "time"],
        );
        assert_eq!(
            names,
            vec!["Speed", "Consumptio", "Consumpt_1", "ID_1", "CO2_emissi"]
        );
        assert!(names.iter().all(|n| n.len() <= MAX_FIELD_NAME));
    }

    #[test]
    fn test_layout() {
        let fields = vec![Field::character("id", 4), Field::numeric("Speed", 8, 2)];
        let rows = vec![
            vec![Some(Value::Text("m0".into())), Some(Value::Number(42.5))],
            vec![Some(Value::Text("m1".into())), None],
        ];
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let dbf = write(&fields, &rows, date);

        assert_eq!(dbf[0], 0x03);
        assert_eq!(&dbf[1..4], &[124, 5, 1]);
        assert_eq!(u32::from_le_bytes(dbf[4..8].try_into().unwrap()), 2);
        let header_len = u16::from_le_bytes(dbf[8..10].try_into().unwrap()) as usize;
        assert_eq!(header_len, 32 + 64 + 1);
        assert_eq!(u16::from_le_bytes(dbf[10..12].try_into().unwrap()), 13);
        assert_eq!(&dbf[32..34], b"id");
        assert_eq!(dbf[32 + 11], b'C');
        assert_eq!(dbf[64 + 11], b'N');
        assert_eq!(dbf[header_len - 1], 0x0D);

        let first = &dbf[header_len..header_len + 13];
        assert_eq!(first, b" m0     42.50");
        let second = &dbf[header_len + 13..header_len + 26];
        assert_eq!(second, b" m1          ");
        assert_eq!(*dbf.last().unwrap(), 0x1A);
    }

    #[test]
    fn test_oversized_number_is_blank() {
        let fields = vec![Field::numeric("v", 4, 2)];
        let rows = vec![vec![Some(Value::Number(12345.0))]];
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dbf = write(&fields, &rows, date);
        let header_len = 32 + 32 + 1;
        assert_eq!(&dbf[header_len..header_len + 5], b"     ");
    }
}
