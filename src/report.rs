use crate::types::{DirContents, EntryMetadata};
use comfy_table::{Attribute, Cell, Color, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One line per entry: names, or full paths for metadata records.
    #[default]
    Plain,
    Table,
    Json,
}

/// Renders scan results. Empty contents render as an empty string except in
/// JSON, which always produces an array.
pub fn render(contents: &DirContents, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(contents),
        _ if contents.is_empty() => Ok(String::new()),
        OutputFormat::Plain => Ok(render_plain(contents)),
        OutputFormat::Table => Ok(build_table(contents).to_string()),
    }
}

fn render_plain(contents: &DirContents) -> String {
    match contents {
        DirContents::Names(names) => names.join("\n"),
        DirContents::Metadata(records) => records
            .iter()
            .map(|r| r.full_path.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

#[must_use]
pub fn build_table(contents: &DirContents) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);

    match contents {
        DirContents::Names(names) => {
            table.set_header(vec![Cell::new("Name").add_attribute(Attribute::Bold)]);
            for name in names {
                table.add_row(vec![Cell::new(name)]);
            }
        }
        DirContents::Metadata(records) => {
            table.set_header(
                ["Name", "Size", "Last Modified", "Parent Directory", "Full Path"]
                    .into_iter()
                    .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
            );
            for record in records {
                table.add_row(metadata_row(record));
            }
        }
    }

    table
}

fn metadata_row(record: &EntryMetadata) -> Vec<Cell> {
    vec![
        Cell::new(&record.name).fg(Color::Cyan),
        Cell::new(&record.size),
        Cell::new(&record.last_modified),
        Cell::new(&record.parent_directory),
        Cell::new(&record.full_path),
    ]
}
