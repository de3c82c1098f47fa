//! Native Slides tables sized to their data.

use log::debug;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::{cell_text, ensure_area, parse_content, DiagramKind, DiagramRenderer, Look, Result};
use crate::canvas::{Canvas, TextOptions, TextTarget};
use crate::layout::{LayoutManager, Rect};
use crate::settings::Settings;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TableContent {
    headers: Vec<JsonValue>,
    rows: Vec<Vec<JsonValue>>,
}

/// Rows beyond this shrink the cell font to the small size.
const DENSE_ROWS: usize = 8;

/// A native table with a filled header row and alternating row shading.
pub struct TableRenderer;

impl DiagramRenderer for TableRenderer {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Table
    }

    fn render(
        &self,
        canvas: &mut Canvas<'_>,
        data: &JsonValue,
        area: Rect,
        settings: &Settings,
        layout: &LayoutManager,
    ) -> Result<()> {
        let content: TableContent = parse_content(self.kind(), data)?;
        let columns = content
            .headers
            .len()
            .max(content.rows.first().map_or(0, Vec::len));
        let has_header = !content.headers.is_empty();
        let total_rows = content.rows.len() + usize::from(has_header);
        if columns == 0 || total_rows == 0 {
            return Ok(());
        }
        ensure_area(area)?;
        let look = Look::new(settings, layout);

        let height = (total_rows as f64 * layout.diagram_y("tableRowH")).min(area.height);
        let id = canvas.table(total_rows, columns, Rect::new(area.left, area.top, area.width, height));
        debug!("[TableRenderer::render] {total_rows}x{columns} table '{id}'");
        let size = if total_rows > DENSE_ROWS { look.small } else { look.body };

        let mut row = 0;
        if has_header {
            for column in 0..columns {
                canvas.fill_cell(&id, 0, column, &look.primary);
                if let Some(header) = content.headers.get(column) {
                    canvas.set_text(
                        TextTarget::Cell { table_id: id.clone(), row: 0, column },
                        &cell_text(header),
                        &TextOptions::new(size, &look.on(&look.primary)).bold(),
                    );
                }
            }
            row = 1;
        }
        for (i, cells) in content.rows.iter().enumerate() {
            if i % 2 == 1 {
                for column in 0..columns {
                    canvas.fill_cell(&id, row, column, &look.card);
                }
            }
            // cells past the column count are dropped; missing ones stay blank
            for (column, cell) in cells.iter().take(columns).enumerate() {
                canvas.set_text(
                    TextTarget::Cell { table_id: id.clone(), row, column },
                    &cell_text(cell),
                    &TextOptions::new(size, &look.text),
                );
            }
            row += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Intent;
    use crate::render::test_support::{area, render_json};
    use serde_json::json;

    #[test]
    fn columns_follow_the_widest_of_header_and_first_row() {
        let intents = render_json(
            DiagramKind::Table,
            json!({"headers": ["Name", "Score"], "rows": [["a", 1, true], ["b", 2]]}),
        );
        assert!(matches!(&intents[0], Intent::CreateTable { rows: 3, columns: 3, .. }));
        let header_cells: Vec<usize> = intents
            .iter()
            .filter_map(|i| match i {
                Intent::InsertText { target: TextTarget::Cell { row: 0, column, .. }, .. } => Some(*column),
                _ => None,
            })
            .collect();
        assert_eq!(header_cells, vec![0, 1]);
        assert!(intents.iter().any(|i| matches!(i,
            Intent::InsertText { target: TextTarget::Cell { row: 1, column: 2, .. }, text } if text == "true")));
    }

    #[test]
    fn header_fill_and_row_parity() {
        let intents = render_json(
            DiagramKind::Table,
            json!({"headers": ["h1", "h2"], "rows": [["a", "b"], ["c", "d"], ["e", "f"]]}),
        );
        let filled_rows: Vec<usize> = intents
            .iter()
            .filter_map(|i| match i {
                Intent::FillCell { row, column: 0, .. } => Some(*row),
                _ => None,
            })
            .collect();
        // header row, then the second data row
        assert_eq!(filled_rows, vec![0, 2]);
    }

    #[test]
    fn height_is_capped_by_the_area() {
        let rows: Vec<Vec<String>> = (0..40).map(|i| vec![i.to_string()]).collect();
        let intents = render_json(DiagramKind::Table, json!({"rows": rows}));
        match &intents[0] {
            Intent::CreateTable { rows, rect, .. } => {
                assert_eq!(*rows, 40);
                assert!(rect.height <= area().height);
            }
            other => panic!("expected a table, got {other:?}"),
        }
    }
}
