use super::TrainingError;
use std::io::Read;

/// Parsed tabular dataset: feature matrix rows plus binary targets.
#[derive(Debug)]
pub(crate) struct Dataset {
    pub(crate) feature_names: Vec<String>,
    pub(crate) features: Vec<Vec<f64>>,
    pub(crate) targets: Vec<f64>,
}

/// Read a dataset CSV, splitting out the named target column.
///
/// Header cells are trimmed before matching, so exports with stray
/// whitespace around the target name still resolve. Target cells map
/// YES/1 to the positive class and anything else to the negative class.
pub(crate) fn parse_dataset<R: Read>(
    reader: R,
    target_column: &str,
) -> Result<Dataset, TrainingError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let wanted = target_column.trim();
    let target_index = headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| TrainingError::MissingColumn {
            column: wanted.to_string(),
        })?;

    let feature_names: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != target_index)
        .map(|(_, header)| header.trim().to_string())
        .collect();

    if feature_names.is_empty() {
        return Err(TrainingError::NoFeatureColumns);
    }

    let mut features = Vec::new();
    let mut targets = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row_number = index + 2;

        let mut row = Vec::with_capacity(feature_names.len());
        for (column, cell) in record.iter().enumerate() {
            if column == target_index {
                targets.push(parse_target(cell));
                continue;
            }
            let value: f64 = cell.trim().parse().map_err(|_| TrainingError::InvalidNumber {
                column: headers
                    .get(column)
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                row: row_number,
            })?;
            row.push(value);
        }
        features.push(row);
    }

    Ok(Dataset {
        feature_names,
        features,
        targets,
    })
}

fn parse_target(cell: &str) -> f64 {
    let normalized = cell.trim();
    if normalized.eq_ignore_ascii_case("yes") || normalized == "1" {
        1.0
    } else {
        0.0
    }
}
