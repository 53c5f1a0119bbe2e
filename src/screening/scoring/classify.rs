use crate::screening::domain::{ClassificationScheme, RiskBand};

/// A matched band plus its severity rank (0 = least severe).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandMatch<'a> {
    pub severity: usize,
    pub band: &'a RiskBand,
}

/// Resolve a value against ordered breakpoints, first match wins.
///
/// A value strictly below a band's upper bound belongs to that band; a
/// value equal to the bound falls through to the next band. Values past
/// every breakpoint land in the ceiling band.
pub fn classify(value: f64, scheme: &ClassificationScheme) -> BandMatch<'_> {
    for (severity, band) in scheme.bands.iter().enumerate() {
        if value < band.upper {
            return BandMatch {
                severity,
                band: &band.band,
            };
        }
    }

    BandMatch {
        severity: scheme.bands.len(),
        band: &scheme.ceiling,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::catalog::ScreeningCatalog;

    #[test]
    fn percent_breakpoints_are_exclusive_on_the_upper_bound() {
        let catalog = ScreeningCatalog::standard();
        let scheme = &catalog
            .find("caregiver-48")
            .expect("preset present")
            .classification;

        assert_eq!(classify(39.99, scheme).band.label, "Low");
        assert_eq!(classify(40.0, scheme).band.label, "Moderate");
        assert_eq!(classify(59.99, scheme).band.label, "Moderate");
        assert_eq!(classify(60.0, scheme).band.label, "High");
        assert_eq!(classify(100.0, scheme).band.label, "High");
    }

    #[test]
    fn raw_breakpoints_match_the_literal_cutoffs() {
        let catalog = ScreeningCatalog::standard();
        let scheme = &catalog
            .find("isaa-40")
            .expect("preset present")
            .classification;

        assert_eq!(classify(69.0, scheme).band.label, "No indication");
        assert_eq!(classify(70.0, scheme).band.label, "Mild");
        assert_eq!(classify(106.0, scheme).band.label, "Mild");
        assert_eq!(classify(107.0, scheme).band.label, "Moderate");
        assert_eq!(classify(153.0, scheme).band.label, "Moderate");
        assert_eq!(classify(154.0, scheme).band.label, "Severe");
    }

    #[test]
    fn binary_cutoff_crosses_at_six() {
        let catalog = ScreeningCatalog::standard();
        let scheme = &catalog
            .find("qchat-10")
            .expect("preset present")
            .classification;

        assert_eq!(classify(5.0, scheme).band.label, "Low");
        assert_eq!(classify(6.0, scheme).band.label, "High");
    }

    #[test]
    fn severity_never_decreases_as_the_value_grows() {
        let catalog = ScreeningCatalog::standard();
        for instrument in catalog.instruments() {
            let scheme = &instrument.classification;
            let mut previous = 0;
            for step in 0..=2000 {
                let value = step as f64 / 10.0;
                let severity = classify(value, scheme).severity;
                assert!(
                    severity >= previous,
                    "severity regressed at {value} for {}",
                    instrument.id
                );
                previous = severity;
            }
        }
    }
}
