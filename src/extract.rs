// src/extract.rs

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};

use crate::row::{Link, Row};

/// CSS selector for the character table on every list page.
pub const TABLE_SELECTOR: &str = "table.listofponies";

static TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(TABLE_SELECTOR).expect("table selector should parse"));
static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("tr selector should parse"));
static TH: Lazy<Selector> = Lazy::new(|| Selector::parse("th").expect("th selector should parse"));
static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("td selector should parse"));
static A: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("a selector should parse"));

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect()
}

/// Locate the character table in a parsed page.
pub fn find_table(document: &Html) -> Result<ElementRef<'_>> {
    document
        .select(&TABLE)
        .next()
        .ok_or_else(|| anyhow!("no table matching `{}`", TABLE_SELECTOR))
}

/// Convert a table into rows: the first `tr` yields the header row, every
/// `tr` holding `td` cells yields a data row whose last column is a link.
pub fn extract_rows(table: ElementRef<'_>) -> Result<Vec<Row>> {
    let table_rows: Vec<ElementRef<'_>> = table.select(&TR).collect();
    let first = table_rows
        .first()
        .ok_or_else(|| anyhow!("table has no rows"))?;

    let header = first
        .select(&TH)
        .map(|th| cell_text(th).trim().to_string())
        .collect();

    let mut rows = Vec::with_capacity(table_rows.len());
    rows.push(Row::header(header));

    for tr in &table_rows {
        let cells: Vec<ElementRef<'_>> = tr.select(&TD).collect();
        let Some((last, leading)) = cells.split_last() else {
            trace!("skipping row without data cells");
            continue;
        };

        // Raw text; whitespace is left for the normalizer.
        let texts = leading.iter().map(|td| cell_text(*td)).collect();
        let link = last
            .select(&A)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| Link::Href(href.to_string()))
            .unwrap_or(Link::Missing);

        rows.push(Row::data(texts, link));
    }

    debug!(rows = rows.len(), "extracted table");
    Ok(rows)
}

/// Parse a whole page and extract its character table.
pub fn extract_from_html(html: &str) -> Result<Vec<Row>> {
    let document = Html::parse_document(html);
    let table = find_table(&document)?;
    extract_rows(table)
}
