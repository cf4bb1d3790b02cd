use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use survey_model::{NumericField, TopSegment};

use crate::types::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("Source: {}", result.source);
    println!("Output: {}", result.output_dir.display());

    let stats = &result.stats;
    let quality = &result.quality;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Responses"),
        Cell::new(stats.total_responses).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Skipped rows"),
        count_cell(quality.skipped_count(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Coercion warnings"),
        count_cell(quality.warning_count(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Unmapped columns"),
        count_cell(quality.unmapped_columns.len(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Mean satisfaction"),
        value_cell(stats.mean(NumericField::Satisfaction).map(|v| format!("{v:.2} / 5"))),
    ]);
    table.add_row(vec![
        Cell::new("Net Promoter Score"),
        value_cell(stats.nps.score.map(|v| format!("{v:.1}"))),
    ]);
    table.add_row(vec![
        Cell::new("Completeness"),
        Cell::new(format!("{:.1}%", stats.completion_rate)),
    ]);
    table.add_row(vec![
        Cell::new("Best region"),
        value_cell(stats.best_region.as_ref().map(segment_label)),
    ]);
    table.add_row(vec![
        Cell::new("Top age group"),
        value_cell(stats.top_age_group.as_ref().map(segment_label)),
    ]);
    table.add_row(vec![
        Cell::new("Insight provider"),
        Cell::new(&result.insight_provider),
    ]);
    println!("{table}");

    if quality.empty_dataset {
        eprintln!("warning: no responses were read; statistics are empty");
    }
    println!("Files:");
    for path in &result.files {
        println!("- {}", path.display());
    }
}

fn segment_label(segment: &TopSegment) -> String {
    format!("{} ({:.2})", segment.category, segment.mean_satisfaction)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn value_cell(value: Option<String>) -> Cell {
    match value {
        Some(text) => Cell::new(text),
        None => dim_cell("n/a"),
    }
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
