// Output formatting: the credentials table printed to stdout, the summary
// line, and the CSV file handed to whoever distributes the passwords.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::api::{BulkGenerationSummary, GeneratedCredential};

pub const CSV_HEADER: &str = "roomNumber,password,status";
/// Same record terminator as spreadsheet exports (RFC 4180).
const CSV_LINE_END: &str = "\r\n";

#[derive(Tabled)]
struct CredentialRow<'a> {
    #[tabled(rename = "Room")]
    room: &'a str,
    #[tabled(rename = "Password")]
    password: &'a str,
    #[tabled(rename = "Status")]
    status: String,
}

impl<'a> From<&'a GeneratedCredential> for CredentialRow<'a> {
    fn from(credential: &'a GeneratedCredential) -> Self {
        CredentialRow {
            room: &credential.room_number,
            password: credential.password.as_deref().unwrap_or(""),
            status: credential.status.to_string(),
        }
    }
}

/// Render the credentials as an aligned table with a header row.
pub fn render_table(credentials: &[GeneratedCredential]) -> String {
    let rows: Vec<CredentialRow<'_>> = credentials.iter().map(CredentialRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

pub fn summary_line(summary: &BulkGenerationSummary) -> String {
    format!(
        "Summary: created={} updated={} skipped={}",
        summary.created, summary.updated, summary.skipped
    )
}

/// Quote a CSV field when it contains a separator, quote or line break.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

pub fn write_csv_to<W: Write>(mut out: W, credentials: &[GeneratedCredential]) -> std::io::Result<()> {
    write!(out, "{CSV_HEADER}{CSV_LINE_END}")?;
    for credential in credentials {
        let status = credential.status.to_string();
        write!(
            out,
            "{},{},{}{CSV_LINE_END}",
            csv_field(&credential.room_number),
            csv_field(credential.password.as_deref().unwrap_or("")),
            csv_field(&status)
        )?;
    }
    out.flush()
}

/// Write the credentials to `path`, replacing any existing file.
pub fn write_csv(path: &Path, credentials: &[GeneratedCredential]) -> std::io::Result<()> {
    write_csv_to(BufWriter::new(File::create(path)?), credentials)
}
