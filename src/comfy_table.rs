use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

use crate::{app::ModelReport, download::DownloadOutcome, units::format_size};

pub fn create_summary_table(reports: &[ModelReport]) -> Table {
    let mut table = Table::new();

    let header = vec![
        Cell::new("Model"),
        Cell::new("Status"),
        Cell::new("Location"),
        Cell::new("Size"),
    ];
    let rows: Vec<Vec<Cell>> = reports
        .iter()
        .map(|report| match &report.outcome {
            DownloadOutcome::Downloaded { path, size } => vec![
                Cell::new(report.kind.spec().label),
                Cell::new("downloaded")
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold),
                Cell::new(path.display()),
                Cell::new(format_size(*size)).fg(Color::Yellow),
            ],
            DownloadOutcome::Failed { .. } => vec![
                Cell::new(report.kind.spec().label),
                Cell::new("failed")
                    .fg(Color::Red)
                    .add_attribute(Attribute::Bold),
                Cell::new(report.destination.display()),
                Cell::new("-"),
            ],
        })
        .collect();

    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100)
        .set_header(header)
        .add_rows(rows);

    table
}
