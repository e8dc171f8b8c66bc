// src/pipeline/output.rs

//! Output sinks for result tables: plain print, pretty table, CSV file.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::Result;
use crate::models::{Config, ResultTable};
use crate::pipeline::Mode;
use crate::storage::LocalStorage;

const DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// How to render a result table. Without one, rows are printed plainly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Bordered table on stdout
    Pretty,
    /// CSV file in the results directory
    File,
}

/// Render `table` the way the user asked.
pub fn control_output(
    table: &ResultTable,
    format: Option<OutputFormat>,
    mode: Mode,
    config: &Config,
) -> Result<()> {
    match format {
        Some(OutputFormat::Pretty) => print!("{}", pretty_table(table)),
        Some(OutputFormat::File) => {
            let path = file_output(table, mode, &config.paths.results_dir)?;
            log::info!("Results saved to {}", path.display());
        }
        None => print!("{}", plain_rows(table)),
    }
    Ok(())
}

/// One line per row, cells separated by a space.
pub fn plain_rows(table: &ResultTable) -> String {
    table
        .all_rows()
        .map(|row| row.join(" ") + "\n")
        .collect()
}

/// Left-aligned table with `+---+` borders, sized to the widest cell.
pub fn pretty_table(table: &ResultTable) -> String {
    let widths: Vec<usize> = (0..table.width())
        .map(|col| {
            table
                .all_rows()
                .map(|row| row[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let border = widths
        .iter()
        .fold(String::from("+"), |acc, w| acc + &"-".repeat(w + 2) + "+");
    let line = |row: &[String]| {
        row.iter()
            .zip(&widths)
            .fold(String::from("|"), |acc, (cell, w)| {
                let pad = w - cell.chars().count();
                acc + " " + cell + &" ".repeat(pad) + " |"
            })
    };

    let mut out = Vec::with_capacity(table.len() + 4);
    out.push(border.clone());
    out.push(line(table.header()));
    out.push(border.clone());
    out.extend(table.rows().iter().map(|row| line(row.as_slice())));
    out.push(border);
    out.join("\n") + "\n"
}

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", sep)?;
        }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Header and rows as CSV.
pub fn to_csv(table: &ResultTable) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    for row in table.all_rows() {
        write_row(&mut buf, row, ',')?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Save `table` as `<dir>/<mode>_<timestamp>.csv`.
pub fn file_output(table: &ResultTable, mode: Mode, dir: &Path) -> Result<PathBuf> {
    let name = format!("{}_{}.csv", mode, Local::now().format(DATETIME_FORMAT));
    LocalStorage::new(dir).write_bytes(&name, to_csv(table)?.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultTable {
        let mut table = ResultTable::new(["Status", "Count"]);
        table.push(["Final", "12"]).unwrap();
        table.push(["Total", "3"]).unwrap();
        table
    }

    #[test]
    fn test_plain_rows() {
        assert_eq!(plain_rows(&sample()), "Status Count\nFinal 12\nTotal 3\n");
    }

    #[test]
    fn test_pretty_table_layout() {
        let expected = "\
+--------+-------+
| Status | Count |
+--------+-------+
| Final  | 12    |
| Total  | 3     |
+--------+-------+
";
        assert_eq!(pretty_table(&sample()), expected);
    }

    #[test]
    fn test_pretty_table_counts_chars_not_bytes() {
        let mut table = ResultTable::new(["Title"]);
        table.push(["What’s New"]).unwrap();
        let rendered = pretty_table(&table);
        assert!(rendered.starts_with("+------------+\n"));
        assert!(rendered.contains("| What’s New |"));
    }

    #[test]
    fn test_csv_quotes_special_fields() {
        let mut table = ResultTable::new(["Article link", "Title", "Editor, author"]);
        table
            .push(["https://x.test/3.12.html", "Say \"hi\"", "A\nB"])
            .unwrap();

        assert_eq!(
            to_csv(&table).unwrap(),
            "Article link,Title,\"Editor, author\"\nhttps://x.test/3.12.html,\"Say \"\"hi\"\"\",\"A\nB\"\n"
        );
    }

    #[test]
    fn test_file_output_names_file_after_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = file_output(&sample(), Mode::Pep, &dir.path().join("results")).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("pep_"));
        assert!(name.ends_with(".csv"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Status,Count\nFinal,12\nTotal,3\n"
        );
    }
}
