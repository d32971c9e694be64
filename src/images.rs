// src/images.rs

use anyhow::{Context, Result};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument};
use url::Url;

use crate::fetch::PageFetcher;
use crate::row::Row;

const IMAGE_EXTS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp"];
const DEFAULT_EXT: &str = "png";
pub const SHEET_NAME: &str = "index.html";

/// One image written to disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedImage {
    pub name: String,
    pub path: PathBuf,
}

/// Image extension taken from the last path segment that has one. Wiki
/// image URLs often end in `/revision/latest`, so earlier segments count.
fn image_ext(url: &Url) -> String {
    let segments: Vec<&str> = url.path_segments().map(|s| s.collect()).unwrap_or_default();
    segments
        .into_iter()
        .rev()
        .filter_map(|seg| seg.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()))
        .find(|ext| IMAGE_EXTS.contains(&ext.as_str()))
        .unwrap_or_else(|| DEFAULT_EXT.to_string())
}

/// Filesystem-safe stem: alphanumerics, `-` and `_` kept, whitespace runs
/// become one `_`, everything else is dropped.
pub fn sanitize_stem(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() || ch == '-' {
            out.push(ch);
            last_us = false;
        } else if (ch.is_whitespace() || ch == '_') && !last_us {
            out.push('_');
            last_us = true;
        }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() {
        "image".to_string()
    } else {
        out
    }
}

/// `<stem>.<ext>` the first time, `<stem> (N).<ext>` after that.
fn unique_path(dir: &Path, stem: &str, ext: &str, seen: &mut HashMap<String, usize>) -> PathBuf {
    let count = seen.entry(format!("{stem}.{ext}")).or_insert(0);
    let filename = if *count == 0 {
        format!("{stem}.{ext}")
    } else {
        format!("{stem} ({}).{ext}", *count + 1)
    };
    *count += 1;
    dir.join(filename)
}

/// Download the linked image of every data row into `dir`. Relative links
/// are resolved against `base`.
#[instrument(level = "info", skip(fetcher, rows, dir), fields(dir = %dir.display()))]
pub fn get_images<F: PageFetcher + ?Sized>(
    fetcher: &F,
    rows: &[Row],
    base: &Url,
    dir: &Path,
) -> Result<Vec<SavedImage>> {
    fs::create_dir_all(dir).with_context(|| format!("creating image dir {:?}", dir))?;

    let mut seen = HashMap::new();
    let mut saved = Vec::new();
    for row in rows {
        let Some(href) = row.link.as_ref().and_then(|l| l.href()) else {
            debug!(name = ?row.name(), "no image link");
            continue;
        };
        let url = base
            .join(href)
            .with_context(|| format!("resolving image link {}", href))?;
        let name = row.name().unwrap_or_default().to_string();
        let path = unique_path(dir, &sanitize_stem(&name), &image_ext(&url), &mut seen);

        let bytes = fetcher.fetch_bytes(url.as_str())?;
        fs::write(&path, &bytes).with_context(|| format!("writing {:?}", path))?;
        debug!(url = %url, path = %path.display(), "saved image");
        saved.push(SavedImage { name, path });
    }

    info!(count = saved.len(), "downloaded images");
    Ok(saved)
}

/// Write a browsable `index.html` showing every saved image with its name.
pub fn write_contact_sheet(dir: &Path, images: &[SavedImage]) -> Result<PathBuf> {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>ponylist images</title>\n\
         <style>\nbody { font-family: sans-serif; }\n\
         figure { display: inline-block; width: 160px; margin: 8px; text-align: center; vertical-align: top; }\n\
         img { max-width: 150px; max-height: 150px; }\n</style>\n</head>\n<body>\n",
    );
    for img in images {
        let file = img
            .path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        html.push_str(&format!(
            "<figure><img src=\"{}\" alt=\"{}\"><figcaption>{}</figcaption></figure>\n",
            encode_double_quoted_attribute(&file),
            encode_double_quoted_attribute(&img.name),
            encode_text(&img.name),
        ));
    }
    html.push_str("</body>\n</html>\n");

    let path = dir.join(SHEET_NAME);
    fs::write(&path, html).with_context(|| format!("writing {:?}", path))?;
    info!("Wrote contact sheet {}", path.display());
    Ok(path)
}
