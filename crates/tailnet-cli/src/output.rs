//! Plain-text tables and tag formatting

use colored::Colorize;

/// Shown in place of an empty tag list
pub const NO_TAGS: &str = "none";

/// Join tags for display
pub fn join_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        NO_TAGS.to_string()
    } else {
        tags.join(", ")
    }
}

/// Left-aligned columns sized to their widest cell
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths
    }

    /// Render without styling, one line per row, header first
    pub fn render_lines(&self) -> Vec<String> {
        let widths = self.widths();
        let format_row = |cells: &[String]| {
            let padded: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    let cell = cells.get(i).map(String::as_str).unwrap_or("");
                    format!("{:<width$}", cell, width = *w)
                })
                .collect();
            padded.join("  ").trim_end().to_string()
        };

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(format_row(&self.headers));
        lines.extend(self.rows.iter().map(|row| format_row(row)));
        lines
    }

    /// Print with a bold header line
    pub fn print(&self) {
        let mut lines = self.render_lines().into_iter();
        if let Some(header) = lines.next() {
            println!("  {}", header.bold());
        }
        for line in lines {
            println!("  {}", line);
        }
    }
}
