// src/output.rs

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::info;

use crate::normalize::ScrapeOptions;
use crate::row::Row;

/// Prefix shared by every output file name.
pub const FILE_PREFIX: &str = "ponylist";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum OutputFormat {
    Txt,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

/// `<dir>/ponylist_<category>[_names][_striplabels][_known].<ext>`
pub fn output_path(
    data_dir: &Path,
    category: &str,
    opts: &ScrapeOptions,
    format: OutputFormat,
) -> PathBuf {
    let mut components = vec![FILE_PREFIX, category];
    if opts.names_only {
        components.push("names");
    }
    if opts.strip_labels {
        components.push("striplabels");
    }
    if opts.known_only {
        components.push("known");
    }
    data_dir.join(format!("{}.{}", components.join("_"), format.ext()))
}

fn write_csv<W: Write>(w: W, rows: &[Row], sentinel: &str) -> Result<()> {
    // header rows may be one field shorter than data rows
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(w);
    for r in rows {
        wtr.write_record(r.to_fields(sentinel))?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_txt<W: Write>(mut w: W, rows: &[Row], sentinel: &str) -> Result<()> {
    for r in rows {
        writeln!(w, "{}", r.to_fields(sentinel).join("\t"))?;
    }
    w.flush()?;
    Ok(())
}

fn write_json<W: Write>(mut w: W, rows: &[Row], sentinel: &str) -> Result<()> {
    let fields: Vec<Vec<String>> = rows.iter().map(|r| r.to_fields(sentinel)).collect();
    serde_json::to_writer_pretty(&mut w, &fields)?;
    writeln!(w)?;
    w.flush()?;
    Ok(())
}

/// Serialize rows in `format` to any writer.
pub fn write_to<W: Write>(w: W, rows: &[Row], format: OutputFormat, sentinel: &str) -> Result<()> {
    match format {
        OutputFormat::Txt => write_txt(w, rows, sentinel),
        OutputFormat::Csv => write_csv(w, rows, sentinel),
        OutputFormat::Json => write_json(w, rows, sentinel),
    }
}

/// Write rows to `path`, creating the parent directory if needed.
pub fn write_rows(path: &Path, rows: &[Row], format: OutputFormat, sentinel: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
        }
    }
    info!("Writing to {}.", path.display());
    let file = File::create(path).with_context(|| format!("creating {:?}", path))?;
    write_to(BufWriter::new(file), rows, format, sentinel)
        .with_context(|| format!("writing {:?}", path))
}
