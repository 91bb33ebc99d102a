// src/extract/mod.rs
//
// Turns the results page markup into a title, header labels and records.
// Expected layout:
//   <h5>title</h5>
//   <table class="table">
//     <thead><tr><th>Party</th><th>Won</th>...</tr></thead>
//     <tbody><tr class="tr"><td><a>BJP</a></td><td>5</td>...</tr></tbody>
//   </table>

pub mod sort;

use crate::record::{Record, Snapshot};
use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

pub use sort::sort_by_won;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static CSS selector should parse")
}

static TITLE: Lazy<Selector> = Lazy::new(|| selector("h5"));
static TABLE: Lazy<Selector> = Lazy::new(|| selector("table.table"));
static HEADER_CELL: Lazy<Selector> = Lazy::new(|| selector("thead th"));
static BODY: Lazy<Selector> = Lazy::new(|| selector("tbody"));
static ROW: Lazy<Selector> = Lazy::new(|| selector("tr.tr"));
static CELL: Lazy<Selector> = Lazy::new(|| selector("td"));
static LINK: Lazy<Selector> = Lazy::new(|| selector("a"));

/// Title, table and sort in one go.
pub fn extract_snapshot(html: &str) -> Result<Snapshot> {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE)
        .next()
        .map(text_of)
        .context("no <h5> title on the page")?;

    let (headers, mut records) = table_from(&document)?;
    sort_by_won(&mut records);
    debug!(rows = records.len(), columns = headers.len(), "extracted");

    Ok(Snapshot {
        title,
        headers,
        records,
    })
}

/// Header labels and rows of the results table, in document order.
pub fn extract_table(html: &str) -> Result<(Vec<String>, Vec<Record>)> {
    table_from(&Html::parse_document(html))
}

fn table_from(document: &Html) -> Result<(Vec<String>, Vec<Record>)> {
    let table = document
        .select(&TABLE)
        .next()
        .context("no <table class=\"table\"> on the page")?;

    let headers: Vec<String> = table.select(&HEADER_CELL).map(text_of).collect();
    if headers.is_empty() {
        bail!("results table has no <thead> header cells");
    }

    let body = table
        .select(&BODY)
        .next()
        .context("results table has no <tbody>")?;

    let mut records: Vec<Record> = Vec::new();
    for (row_idx, row) in body.select(&ROW).enumerate() {
        let cells: Vec<String> = row.select(&CELL).map(cell_text).collect();
        if cells.len() > headers.len() {
            bail!(
                "row {} has {} cells but the table has {} headers",
                row_idx,
                cells.len(),
                headers.len()
            );
        }
        records.push(headers.iter().cloned().zip(cells).collect());
    }

    Ok((headers, records))
}

/// Text shown for one `<td>`: the first link's text when the cell holds a
/// link, otherwise the cell's own text. Always trimmed.
pub fn cell_text(cell: ElementRef<'_>) -> String {
    match cell.select(&LINK).next() {
        Some(link) => text_of(link),
        None => text_of(cell),
    }
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn page(rows: &str) -> String {
        format!(
            r#"<html><body>
            <h5>  General Election to Parliamentary Constituencies: Trends &amp; Results June-2024 </h5>
            <table class="table">
              <thead><tr><th>Party</th><th>Won</th><th>Leading</th><th>Total</th></tr></thead>
              <tbody>{rows}</tbody>
            </table>
            </body></html>"#
        )
    }

    #[test]
    fn single_row_example() -> Result<()> {
        let html = page(r#"<tr class="tr"><td>BJP</td><td>5</td><td>2</td><td>7</td></tr>"#);
        let (headers, records) = extract_table(&html)?;

        assert_eq!(headers, vec!["Party", "Won", "Leading", "Total"]);
        assert_eq!(records.len(), 1);
        let expected: Record = [("Party", "BJP"), ("Won", "5"), ("Leading", "2"), ("Total", "7")]
            .into_iter()
            .collect();
        assert_eq!(records[0], expected);
        assert_eq!(records[0].labels().collect::<Vec<_>>(), headers);
        Ok(())
    }

    #[test]
    fn one_record_per_row_keyed_by_headers() -> Result<()> {
        let html = page(
            r#"<tr class="tr"><td>A</td><td>1</td><td>0</td><td>1</td></tr>
               <tr class="tr"><td>B</td><td>2</td><td>1</td><td>3</td></tr>
               <tr class="tr"><td>C</td><td>0</td><td>4</td><td>4</td></tr>"#,
        );
        let (headers, records) = extract_table(&html)?;
        assert_eq!(records.len(), 3);
        for r in &records {
            assert_eq!(r.len(), headers.len());
            assert_eq!(r.labels().collect::<Vec<_>>(), headers);
        }
        Ok(())
    }

    #[test]
    fn rows_without_row_class_are_skipped() -> Result<()> {
        let html = page(
            r#"<tr class="tr"><td>A</td><td>1</td><td>0</td><td>1</td></tr>
               <tr class="total"><td>Total</td><td>1</td><td>0</td><td>1</td></tr>"#,
        );
        let (_, records) = extract_table(&html)?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Party"), Some("A"));
        Ok(())
    }

    #[test]
    fn link_text_wins_over_cell_text() -> Result<()> {
        let html = page(
            r#"<tr class="tr">
                 <td>ignored <a href="/party/369">  Bharatiya Janata Party - BJP </a> trailing</td>
                 <td><a href="/won/369">240</a></td>
                 <td>0</td>
                 <td>240</td>
               </tr>"#,
        );
        let (_, records) = extract_table(&html)?;
        assert_eq!(records[0].get("Party"), Some("Bharatiya Janata Party - BJP"));
        assert_eq!(records[0].get("Won"), Some("240"));
        Ok(())
    }

    #[test]
    fn values_are_trimmed() -> Result<()> {
        let html = page("<tr class=\"tr\"><td>\n  INC \t</td><td> 99 </td><td>\n0\n</td><td>  99</td></tr>");
        let (_, records) = extract_table(&html)?;
        assert_eq!(
            records[0].values().collect::<Vec<_>>(),
            vec!["INC", "99", "0", "99"]
        );
        Ok(())
    }

    #[test]
    fn short_row_keeps_leading_headers() -> Result<()> {
        let html = page(r#"<tr class="tr"><td>X</td><td>3</td></tr>"#);
        let (_, records) = extract_table(&html)?;
        assert_eq!(records[0].len(), 2);
        assert_eq!(records[0].get("Won"), Some("3"));
        assert_eq!(records[0].get("Total"), None);
        Ok(())
    }

    #[test]
    fn too_many_cells_is_an_error() {
        let html = page(r#"<tr class="tr"><td>X</td><td>1</td><td>2</td><td>3</td><td>4</td></tr>"#);
        assert!(extract_table(&html).is_err());
    }

    #[test]
    fn missing_table_is_an_error() {
        let err = extract_table("<html><body><h5>Results</h5><p>maintenance</p></body></html>")
            .unwrap_err();
        assert!(err.to_string().contains("table"));
    }

    #[test]
    fn table_without_expected_class_is_an_error() {
        let html = r#"<table class="other"><thead><tr><th>Party</th></tr></thead>
                      <tbody><tr class="tr"><td>A</td></tr></tbody></table>"#;
        assert!(extract_table(html).is_err());
    }

    #[test]
    fn snapshot_reads_title_and_sorts() -> Result<()> {
        let html = page(
            r#"<tr class="tr"><td>A</td><td>2</td><td>0</td><td>2</td></tr>
               <tr class="tr"><td>B</td><td>10</td><td>0</td><td>10</td></tr>"#,
        );
        let snap = extract_snapshot(&html)?;
        assert_eq!(
            snap.title,
            "General Election to Parliamentary Constituencies: Trends & Results June-2024"
        );
        let parties: Vec<_> = snap.records.iter().filter_map(|r| r.get("Party")).collect();
        assert_eq!(parties, vec!["B", "A"]);
        Ok(())
    }

    #[test]
    fn snapshot_without_title_is_an_error() {
        let html = r#"<table class="table"><thead><tr><th>Party</th></tr></thead>
                      <tbody><tr class="tr"><td>A</td></tr></tbody></table>"#;
        assert!(extract_snapshot(html).is_err());
    }
}
