// src/render/mod.rs

pub mod display;

use crate::record::{Record, Snapshot};
use anyhow::{bail, Result};
use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Cell, Row, Table, Widget},
};

pub use display::LiveDisplay;

/// Style of a recognized column, `None` for columns we don't show.
pub fn column_style(label: &str) -> Option<Style> {
    match label {
        "Party" => Some(Style::new()),
        "Won" | "Total" => Some(Style::new().green()),
        "Leading" => Some(Style::new().magenta()),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayColumn {
    pub label: String,
    pub style: Style,
    /// Position of this column in the source header row.
    pub source: usize,
}

/// Ready-to-draw results table. Built fresh from every snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsTable {
    pub title: String,
    pub columns: Vec<DisplayColumn>,
    /// One cell per displayed column.
    pub rows: Vec<Vec<String>>,
    pub updated_at: DateTime<Local>,
}

impl ResultsTable {
    pub fn from_snapshot(snapshot: &Snapshot, updated_at: DateTime<Local>) -> Result<Self> {
        Self::build(
            &snapshot.title,
            &snapshot.headers,
            &snapshot.records,
            updated_at,
        )
    }

    /// Cells are picked by header position, so a column that isn't shown
    /// never shifts the values of the ones that are.
    pub fn build(
        title: &str,
        headers: &[String],
        records: &[Record],
        updated_at: DateTime<Local>,
    ) -> Result<Self> {
        let columns: Vec<DisplayColumn> = headers
            .iter()
            .enumerate()
            .filter_map(|(source, label)| {
                column_style(label).map(|style| DisplayColumn {
                    label: label.clone(),
                    style,
                    source,
                })
            })
            .collect();

        let mut rows: Vec<Vec<String>> = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            if record.len() != headers.len() {
                bail!(
                    "row {} has {} values but the table has {} columns",
                    idx,
                    record.len(),
                    headers.len()
                );
            }
            rows.push(
                columns
                    .iter()
                    .map(|c| record.value_at(c.source).unwrap_or_default().to_string())
                    .collect(),
            );
        }

        Ok(Self {
            title: title.to_string(),
            columns,
            rows,
            updated_at,
        })
    }

    /// Display width of each shown column: its widest cell or its label.
    fn column_widths(&self) -> Vec<u16> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                self.rows
                    .iter()
                    .map(|r| Line::from(r[i].as_str()).width())
                    .chain(std::iter::once(Line::from(c.label.as_str()).width()))
                    .max()
                    .unwrap_or(0) as u16
            })
            .collect()
    }

    fn footer(&self) -> String {
        format!(
            " updated {}, {} rows ",
            self.updated_at.format("%H:%M:%S"),
            self.rows.len()
        )
    }
}

impl Widget for &ResultsTable {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(self.columns.iter().map(|c| Cell::from(c.label.as_str())))
            .style(Style::new().yellow().bold());

        let widths = self.column_widths();
        // a rule above every row, under the header too
        let rule = Row::new(widths.iter().map(|w| Cell::from("─".repeat(*w as usize))))
            .style(Style::new().dark_gray());

        let rows = self.rows.iter().flat_map(|cells| {
            let row = Row::new(
                cells
                    .iter()
                    .zip(&self.columns)
                    .map(|(v, c)| Cell::from(v.as_str()).style(c.style)),
            );
            [rule.clone(), row]
        });

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(Line::from(self.title.as_str()).centered())
            .title_bottom(Line::from(self.footer()).right_aligned());

        Table::new(rows, widths.into_iter().map(Constraint::Length))
            .header(header)
            .block(block)
            .column_spacing(3)
            .render(area, buf);
    }
}
