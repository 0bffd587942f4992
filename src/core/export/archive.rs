//! In-memory zip packaging for report downloads

use crate::domain::Result;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// A named in-memory file
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ReportFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// A finished zip archive ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct ReportArchive {
    /// Download name, e.g. `Reportes_Farmu.zip`
    pub name: String,
    /// Names of the entries, in archive order
    pub entries: Vec<String>,
    pub bytes: Vec<u8>,
}

impl ReportArchive {
    /// Number of files packed in the archive
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Size of the encoded zip in bytes
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}

/// Packs the files into a deflated zip archive, keeping their order
pub fn pack(name: &str, files: &[ReportFile]) -> Result<ReportArchive> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for file in files {
        writer.start_file(file.name.as_str(), options)?;
        writer.write_all(&file.bytes)?;
    }

    let bytes = writer.finish()?.into_inner();
    tracing::debug!(archive = name, files = files.len(), bytes = bytes.len(), "Packed archive");

    Ok(ReportArchive {
        name: name.to_string(),
        entries: files.iter().map(|f| f.name.clone()).collect(),
        bytes,
    })
}
