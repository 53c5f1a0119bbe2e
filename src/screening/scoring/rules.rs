use super::ScoringError;
use crate::screening::domain::{AnswerScale, Instrument, SectionScore};

/// Sum the configured weight of every answer label.
///
/// Record-time validation makes an unknown label unreachable through the
/// session path; the check stays for callers scoring raw label lists.
pub(crate) fn score_answers(labels: &[&str], scale: &AnswerScale) -> Result<u32, ScoringError> {
    let mut total = 0;
    for label in labels {
        let weight = scale
            .weight_of(label)
            .ok_or_else(|| ScoringError::UnknownLabel {
                label: (*label).to_string(),
            })?;
        total += weight;
    }
    Ok(total)
}

/// Per-section subtotals over each section's global index range.
pub(crate) fn section_subtotals(
    labels: &[&str],
    instrument: &Instrument,
) -> Result<Vec<SectionScore>, ScoringError> {
    let max_weight = instrument.max_weight();
    let mut subtotals = Vec::with_capacity(instrument.sections.len());

    for (section, range) in instrument.section_ranges() {
        let slice = &labels[range.start..range.end.min(labels.len())];
        let score = score_answers(slice, &instrument.scale)?;
        subtotals.push(SectionScore {
            key: section.key,
            name: section.name,
            score,
            max: section.questions.len() as u32 * max_weight,
        });
    }

    Ok(subtotals)
}
