//! Text, heatmap and CSV views of a probability matrix.

use santa_core::{ErrorInfo, ProbabilityMatrix, SantaError};

const RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Spreadsheet style label for a participant index: A..Z, AA, AB, ...
pub fn label(index: usize) -> String {
    let mut letters = Vec::new();
    let mut rest = index;
    loop {
        letters.push(char::from(b'A' + (rest % 26) as u8));
        if rest < 26 {
            break;
        }
        rest = rest / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// Labels for participants `0..n`.
pub fn labels(n: usize) -> Vec<String> {
    (0..n).map(label).collect()
}

/// Index of a participant label, ignoring case.
pub fn find_label(labels: &[String], name: &str) -> Result<usize, SantaError> {
    labels
        .iter()
        .position(|label| label.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| {
            SantaError::InvalidArgument(
                ErrorInfo::new("participant_label", "unknown participant")
                    .with_context("label", name)
                    .with_context("participants", labels.len()),
            )
        })
}

pub fn text_matrix(matrix: &ProbabilityMatrix, labels: &[String]) -> String {
    let header: Vec<String> = labels.iter().map(|name| format!("{name:>6}")).collect();
    let mut out = format!("     {}\n", header.join(" "));
    for (name, row) in labels.iter().zip(matrix.rows()) {
        let cells: Vec<String> = row.iter().map(|p| format!("{p:6.3}")).collect();
        out.push_str(&format!("{name} |{}\n", cells.join(" ")));
    }
    out
}

pub fn row_view(
    matrix: &ProbabilityMatrix,
    labels: &[String],
    giver: usize,
) -> Result<String, SantaError> {
    let row = matrix.row(giver)?;
    let name = labels.get(giver).map(String::as_str).unwrap_or("?");
    let mut out = format!("Probabilities for {name}:\n");
    for (name, p) in labels.iter().zip(row) {
        out.push_str(&format!("{name}: {p:.3}\n"));
    }
    Ok(out)
}

/// Character heatmap scaled to the largest cell.
pub fn heatmap(matrix: &ProbabilityMatrix, labels: &[String]) -> String {
    let max = matrix
        .rows()
        .flat_map(|row| row.iter().copied())
        .fold(0.0, f64::max);
    let width = labels.iter().map(String::len).max().unwrap_or(1);
    let cell = width.max(2);
    let mut out = format!("{:width$}  ", "");
    for name in labels {
        out.push_str(&format!("{name:<cell$}"));
    }
    out.push('\n');
    for (name, row) in labels.iter().zip(matrix.rows()) {
        out.push_str(&format!("{name:>width$} |"));
        for &p in row {
            let shade = if max > 0.0 {
                let level = (p / max * (RAMP.len() - 1) as f64).round() as usize;
                RAMP[level.min(RAMP.len() - 1)]
            } else {
                RAMP[0]
            };
            out.extend(std::iter::repeat(shade).take(cell));
        }
        out.push_str("|\n");
    }
    out.push_str(&format!("scale: '{}' = 0, '{}' = {max:.3}\n", RAMP[0], RAMP[RAMP.len() - 1]));
    out
}

fn csv_error(err: &dyn std::fmt::Display) -> SantaError {
    SantaError::Serde(ErrorInfo::new("csv_encode", err.to_string()))
}

pub fn csv_matrix(matrix: &ProbabilityMatrix, labels: &[String]) -> Result<String, SantaError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut header = vec![String::new()];
    header.extend(labels.iter().cloned());
    writer.write_record(&header).map_err(|err| csv_error(&err))?;
    for (name, row) in labels.iter().zip(matrix.rows()) {
        let mut record = vec![name.clone()];
        record.extend(row.iter().map(|p| p.to_string()));
        writer.write_record(&record).map_err(|err| csv_error(&err))?;
    }
    let bytes = writer.into_inner().map_err(|err| csv_error(&err))?;
    String::from_utf8(bytes).map_err(|err| csv_error(&err))
}
