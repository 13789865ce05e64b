//! CLI output formatting module

use crate::config::{CliConfig, OutputFormat};
use serde::Serialize;
use solrnav_core::{Document, FacetField, Result, SearchResponse};
use std::io::{self, Write};

/// Widest cell rendered in table output
const TABLE_CELL_WIDTH: usize = 32;

/// Output formatter for CLI results
pub struct OutputFormatter {
    format: OutputFormat,
    use_colors: bool,
    writer: Box<dyn Write + Send>,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(config: &CliConfig) -> Self {
        Self::with_format(config.default_output_format, config.use_colors)
    }

    /// Create a formatter with specific format
    pub fn with_format(format: OutputFormat, use_colors: bool) -> Self {
        Self {
            format,
            use_colors: use_colors && crate::config::supports_color(),
            writer: Box::new(io::stdout()),
        }
    }

    /// Create a formatter with custom writer. Colors are never used.
    pub fn with_writer<W: Write + Send + 'static>(format: OutputFormat, writer: W) -> Self {
        Self {
            format,
            use_colors: false,
            writer: Box::new(writer),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Serialize a value in one of the machine-readable formats.
    /// Pretty and table fall back to indented JSON.
    pub fn output<T: Serialize>(&mut self, value: &T) -> Result<()> {
        match self.format {
            OutputFormat::Yaml => {
                let yaml = serde_yaml::to_string(value)?;
                write!(self.writer, "{}", yaml)?;
            }
            OutputFormat::Compact => {
                let json = serde_json::to_string(value)?;
                writeln!(self.writer, "{}", json)?;
            }
            OutputFormat::Json | OutputFormat::Pretty | OutputFormat::Table => {
                let json = serde_json::to_string_pretty(value)?;
                writeln!(self.writer, "{}", json)?;
            }
        }
        Ok(())
    }

    /// Render a search response
    pub fn search_response(&mut self, response: &SearchResponse) -> Result<()> {
        match self.format {
            OutputFormat::Pretty => self.pretty_search(response),
            OutputFormat::Table => {
                self.summary(response)?;
                self.document_table(&response.documents)
            }
            _ => self.output(response),
        }
    }

    /// Render a single document
    pub fn document(&mut self, doc: &Document) -> Result<()> {
        match self.format {
            OutputFormat::Pretty => self.pretty_document(doc, 0),
            OutputFormat::Table => self.document_table(std::slice::from_ref(doc)),
            _ => self.output(doc),
        }
    }

    /// Render a document count
    pub fn count(&mut self, count: u64) -> Result<()> {
        match self.format {
            OutputFormat::Pretty | OutputFormat::Table => {
                writeln!(self.writer, "{} documents", self.colorize_number(count))?;
                Ok(())
            }
            _ => self.output(&serde_json::json!({ "count": count })),
        }
    }

    /// Render a list of names, one per line in pretty and table formats
    pub fn names(&mut self, names: &[String]) -> Result<()> {
        match self.format {
            OutputFormat::Pretty | OutputFormat::Table => {
                for name in names {
                    writeln!(self.writer, "{}", name)?;
                }
                Ok(())
            }
            _ => self.output(&names),
        }
    }

    fn summary(&mut self, response: &SearchResponse) -> Result<()> {
        let shown = response.documents.len() as u64;
        let first = if shown == 0 { 0 } else { response.start + 1 };
        writeln!(
            self.writer,
            "Found {} documents for {} (showing {}-{}, {} ms)",
            self.colorize_number(response.num_found),
            self.colorize_key(&format!("\"{}\"", response.q)),
            first,
            response.start + shown,
            response.qtime
        )?;
        Ok(())
    }

    fn pretty_search(&mut self, response: &SearchResponse) -> Result<()> {
        self.summary(response)?;

        for (i, doc) in response.documents.iter().enumerate() {
            writeln!(self.writer)?;
            let position = response.start + i as u64 + 1;
            writeln!(self.writer, "[{}] {}", position, self.colorize_key(&doc.id()))?;
            self.pretty_document(doc, 1)?;
        }

        for facet in &response.facets {
            writeln!(self.writer)?;
            self.pretty_facet(facet)?;
        }

        if response.has_prev_page() || response.has_next_page() {
            writeln!(self.writer)?;
        }
        if response.has_prev_page() {
            writeln!(self.writer, "prev: {}", response.prev_page_url)?;
        }
        if response.has_next_page() {
            writeln!(self.writer, "next: {}", response.next_page_url)?;
        }
        Ok(())
    }

    fn pretty_document(&mut self, doc: &Document, indent: usize) -> Result<()> {
        let indent_str = "  ".repeat(indent);
        for field in doc.field_names() {
            writeln!(
                self.writer,
                "{}{}: {}",
                indent_str,
                self.colorize_key(field),
                doc.value(field)
            )?;
        }
        for (field, fragments) in &doc.highlights {
            for fragment in fragments {
                writeln!(
                    self.writer,
                    "{}{} {}",
                    indent_str,
                    self.colorize_key(&format!("~{}:", field)),
                    fragment
                )?;
            }
        }
        Ok(())
    }

    fn pretty_facet(&mut self, facet: &FacetField) -> Result<()> {
        writeln!(self.writer, "{}", self.colorize_key(&facet.title))?;
        for value in &facet.values {
            let marker = if value.active { "*" } else { " " };
            writeln!(
                self.writer,
                "  {} {} ({})",
                marker,
                value.text,
                self.colorize_number(value.count)
            )?;
        }
        Ok(())
    }

    /// One row per document, one column per field seen across the documents
    fn document_table(&mut self, docs: &[Document]) -> Result<()> {
        let mut columns: Vec<&str> = Vec::new();
        for doc in docs {
            for field in doc.field_names() {
                if !columns.contains(&field) {
                    columns.push(field);
                }
            }
        }
        if columns.is_empty() {
            writeln!(self.writer, "(no documents)")?;
            return Ok(());
        }

        let rows: Vec<Vec<String>> = docs
            .iter()
            .map(|doc| {
                columns
                    .iter()
                    .map(|c| truncate(&doc.value(c), TABLE_CELL_WIDTH))
                    .collect()
            })
            .collect();
        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                rows.iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(c.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let rule = |left: &str, mid: &str, right: &str| {
            let parts: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{}{}{}", left, parts.join(mid), right)
        };
        let line = |cells: Vec<&str>| {
            let parts: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!(" {}{} ", cell, " ".repeat(w - cell.chars().count())))
                .collect();
            format!("│{}│", parts.join("│"))
        };

        writeln!(self.writer, "{}", rule("┌", "┬", "┐"))?;
        writeln!(self.writer, "{}", line(columns.clone()))?;
        writeln!(self.writer, "{}", rule("├", "┼", "┤"))?;
        for row in &rows {
            writeln!(self.writer, "{}", line(row.iter().map(String::as_str).collect()))?;
        }
        writeln!(self.writer, "{}", rule("└", "┴", "┘"))?;
        Ok(())
    }

    /// Colorize a key name
    fn colorize_key(&self, key: &str) -> String {
        if self.use_colors {
            format!("\x1b[34m{}\x1b[0m", key) // Blue for keys
        } else {
            key.to_string()
        }
    }

    fn colorize_number(&self, n: u64) -> String {
        if self.use_colors {
            format!("\x1b[36m{}\x1b[0m", n) // Cyan for numbers
        } else {
            n.to_string()
        }
    }

    /// Output a simple message
    pub fn message(&mut self, msg: &str) -> Result<()> {
        writeln!(self.writer, "{}", msg)?;
        Ok(())
    }

    /// Output a success message
    pub fn success(&mut self, msg: &str) -> Result<()> {
        if self.use_colors {
            writeln!(self.writer, "\x1b[32m✓\x1b[0m {}", msg)?;
        } else {
            writeln!(self.writer, "✓ {}", msg)?;
        }
        Ok(())
    }

    /// Output an error message
    pub fn error(&mut self, msg: &str) -> Result<()> {
        if self.use_colors {
            writeln!(self.writer, "\x1b[31m✗\x1b[0m {}", msg)?;
        } else {
            writeln!(self.writer, "✗ {}", msg)?;
        }
        Ok(())
    }

    /// Output a warning message
    pub fn warning(&mut self, msg: &str) -> Result<()> {
        if self.use_colors {
            writeln!(self.writer, "\x1b[33m⚠\x1b[0m {}", msg)?;
        } else {
            writeln!(self.writer, "⚠ {}", msg)?;
        }
        Ok(())
    }
}

/// Cut `value` to `width` characters, marking the cut with `...`
fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let kept: String = value.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}
