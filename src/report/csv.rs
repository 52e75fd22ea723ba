use tokio::io::{AsyncWriteExt, BufWriter};

use super::Row;

/// Writes report rows as comma-delimited text.
///
/// # Errors
///
/// Returns an error when the file cannot be created or written.
pub async fn write_csv(path: &str, rows: &[Row]) -> Result<(), std::io::Error> {
    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::new(file);
    for row in rows {
        writer.write_all(format_row(row).as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }
    writer.flush().await?;
    Ok(())
}

pub(super) fn format_row(row: &Row) -> String {
    let mut line = String::new();
    for (index, field) in row.iter().enumerate() {
        if index > 0 {
            line.push(',');
        }
        line.push_str(&quote_minimal(&field.to_string()));
    }
    line
}

/// Quotes a field only when it contains a delimiter, quote or line break;
/// embedded quotes are doubled.
fn quote_minimal(value: &str) -> String {
    let needs_quoting = value.contains(',')
        || value.contains('"')
        || value.contains('\n')
        || value.contains('\r');
    if !needs_quoting {
        return value.to_owned();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        if ch == '"' {
            quoted.push('"');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}
