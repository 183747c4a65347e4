// spreadsheets/export.rs

use crate::domain::{DailyRow, ExpandedTable};
use crate::spreadsheets::daily_rows_xlsx::daily_rows_xlsx;
use crate::spreadsheets::ExportError;
use std::collections::HashSet;
use std::fmt;
use std::io::{Cursor, Write};
use std::str::FromStr;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const DEFAULT_CHUNK_ROWS: usize = 1000;

pub const SINGLE_FILE_NAME: &str = "output_all.xlsx";
pub const BY_ID_ARCHIVE_NAME: &str = "files_by_id.zip";

/// How the expanded table is split into downloadable files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    Single,
    ByDetailId,
    ByRowCount(usize),
}

impl ExportMode {
    /// Builds a chunked mode, rejecting empty chunks.
    pub fn by_row_count(rows: usize) -> Result<Self, ExportError> {
        if rows == 0 {
            return Err(ExportError::InvalidChunkSize);
        }
        Ok(ExportMode::ByRowCount(rows))
    }

    pub fn key(&self) -> &'static str {
        match self {
            ExportMode::Single => "single",
            ExportMode::ByDetailId => "by-id",
            ExportMode::ByRowCount(_) => "by-count",
        }
    }

    /// Label shown next to the radio button.
    pub fn label(&self) -> String {
        match self {
            ExportMode::Single => "1 file".to_string(),
            ExportMode::ByDetailId => "1 file per id detail".to_string(),
            ExportMode::ByRowCount(n) => format!("1 file per {n} lines"),
        }
    }
}

impl FromStr for ExportMode {
    type Err = ExportError;

    /// Accepts the mode keys as well as the labels of the upload form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "single" | "1 file" => Ok(ExportMode::Single),
            "by-id" | "1 file per id detail" => Ok(ExportMode::ByDetailId),
            "by-count" | "1 file per 1000 lines" => {
                Ok(ExportMode::ByRowCount(DEFAULT_CHUNK_ROWS))
            }
            other => Err(ExportError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportMode::ByRowCount(n) => write!(f, "{}({n})", self.key()),
            _ => f.write_str(self.key()),
        }
    }
}

/// A named file ready to hand to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub payload: Vec<u8>,
}

impl ExportArtifact {
    pub fn content_type(&self) -> &'static str {
        if self.file_name.ends_with(".zip") {
            "application/zip"
        } else {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        }
    }
}

/// Lazy artifact sequence for one export call. Artifacts are built on
/// demand; once drained the sequence cannot be restarted.
pub struct Export {
    table: ExpandedTable,
    mode: ExportMode,
    done: bool,
}

pub fn export(table: ExpandedTable, mode: ExportMode) -> Export {
    Export {
        table,
        mode,
        done: false,
    }
}

impl Export {
    fn build(&self) -> Result<ExportArtifact, ExportError> {
        match self.mode {
            ExportMode::Single => Ok(ExportArtifact {
                file_name: SINGLE_FILE_NAME.to_string(),
                payload: daily_rows_xlsx(self.table.rows())?,
            }),
            ExportMode::ByRowCount(0) => Err(ExportError::InvalidChunkSize),
            ExportMode::ByDetailId => bundle(BY_ID_ARCHIVE_NAME, self.sheets()?),
            ExportMode::ByRowCount(size) => {
                bundle(&format!("files_by_{size}.zip"), self.sheets()?)
            }
        }
    }

    fn sheets(&self) -> Result<Vec<(String, Vec<u8>)>, ExportError> {
        partition(&self.table, self.mode)
            .into_iter()
            .map(|(name, rows)| daily_rows_xlsx(rows).map(|bytes| (name, bytes)))
            .collect()
    }
}

impl Iterator for Export {
    type Item = Result<ExportArtifact, ExportError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.done = true;

        let artifact = self.build();
        match &artifact {
            Ok(a) => tracing::info!(
                mode = %self.mode,
                rows = self.table.len(),
                file = %a.file_name,
                bytes = a.payload.len(),
                "export artifact ready"
            ),
            Err(e) => tracing::warn!(mode = %self.mode, error = %e, "export failed"),
        }
        Some(artifact)
    }
}

/// Packs spreadsheets into one deflated zip archive.
fn bundle(
    archive_name: &str,
    files: Vec<(String, Vec<u8>)>,
) -> Result<ExportArtifact, ExportError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, bytes) in files {
        zip.start_file(name, options)?;
        zip.write_all(&bytes)?;
    }

    let payload = zip.finish()?.into_inner();
    Ok(ExportArtifact {
        file_name: archive_name.to_string(),
        payload,
    })
}

/// File names and the rows each file receives, in output order.
pub fn partition(table: &ExpandedTable, mode: ExportMode) -> Vec<(String, Vec<&DailyRow>)> {
    match mode {
        ExportMode::Single => vec![(
            SINGLE_FILE_NAME.to_string(),
            table.rows().iter().collect(),
        )],
        ExportMode::ByDetailId => {
            let mut taken = HashSet::new();
            table
                .group_by_detail()
                .into_iter()
                .map(|(id, rows)| (unique_entry_name(&id.file_stem(), &mut taken), rows))
                .collect()
        }
        ExportMode::ByRowCount(0) => Vec::new(),
        ExportMode::ByRowCount(size) => table
            .rows()
            .chunks(size)
            .enumerate()
            .map(|(i, chunk)| (format!("output_{i}.xlsx"), chunk.iter().collect()))
            .collect(),
    }
}

/// `<stem>.xlsx`, or `<stem>-2.xlsx`, `<stem>-3.xlsx`... when an earlier group
/// already flattened to the same stem.
fn unique_entry_name(stem: &str, taken: &mut HashSet<String>) -> String {
    let mut name = format!("{stem}.xlsx");
    let mut n = 2;
    while !taken.insert(name.clone()) {
        name = format!("{stem}-{n}.xlsx");
        n += 1;
    }
    name
}
