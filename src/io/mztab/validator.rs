//! Post-parse completeness checks. Unlike the line handlers, the validator
//! never fails fast: it walks the fully populated document once and reports
//! every problem it finds in a single batch.
use std::fmt::Display;

use indexmap::IndexMap;
use thiserror::Error;

use crate::meta::{MetaData, MzTabMode, MzTabType};
use crate::params::CvParam;
use crate::table::{ColumnRef, MzTabColumn, SectionTable};

use super::reader::MzTab;

/// One completeness problem found after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("mzTab-mode was never declared")]
    MissingMode,
    #[error("mzTab-type was never declared")]
    MissingType,
    #[error("mzTab-type is Identification but no PSM section header was seen")]
    MissingPsmSection,
    #[error(
        "mzTab-type is Quantification but no protein, peptide, or small molecule section was seen"
    )]
    MissingQuantifiedSection,
    #[error("mzTab-mode is Complete but ms_run[{0}] has no location")]
    MissingRunLocation(u32),
    #[error("`{item}` points at undeclared `{target}`")]
    DanglingReference { item: String, target: String },
    #[error("A {section} header column references undeclared `{target}`")]
    DanglingColumnReference {
        section: &'static str,
        target: String,
    },
}

/// The batch of problems collected by [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter()
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} problem(s) found", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "; {}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

/// Check cross-section completeness of a parsed document: that the sections
/// implied by `mzTab-mode`/`mzTab-type` are present, and that every declared
/// reference points at something that was actually declared.
pub fn validate(document: &MzTab) -> Result<(), ValidationReport> {
    let mut issues = Vec::new();
    let meta = &document.metadata;

    match meta.mode {
        None => issues.push(ValidationIssue::MissingMode),
        Some(MzTabMode::Complete) => {
            for (index, run) in meta.ms_runs.iter() {
                if run.location.is_none() {
                    issues.push(ValidationIssue::MissingRunLocation(*index));
                }
            }
        }
        Some(MzTabMode::Summary) => {}
    }

    match meta.mztab_type {
        None => issues.push(ValidationIssue::MissingType),
        Some(MzTabType::Identification) => {
            if !document.psms.has_header() {
                issues.push(ValidationIssue::MissingPsmSection);
            }
        }
        Some(MzTabType::Quantification) => {
            if !document.proteins.has_header()
                && !document.peptides.has_header()
                && !document.small_molecules.has_header()
            {
                issues.push(ValidationIssue::MissingQuantifiedSection);
            }
        }
    }

    for (index, assay) in meta.assays.iter() {
        if let Some(sample) = assay.sample_ref {
            if !meta.samples.contains_key(&sample) {
                issues.push(dangling(
                    format!("assay[{index}]-sample_ref"),
                    format!("sample[{sample}]"),
                ));
            }
        }
        if let Some(run) = assay.ms_run_ref {
            if !meta.ms_runs.contains_key(&run) {
                issues.push(dangling(
                    format!("assay[{index}]-ms_run_ref"),
                    format!("ms_run[{run}]"),
                ));
            }
        }
    }

    for (index, study_variable) in meta.study_variables.iter() {
        for assay in study_variable.assay_refs.iter().flatten() {
            if !meta.assays.contains_key(assay) {
                issues.push(dangling(
                    format!("study_variable[{index}]-assay_refs"),
                    format!("assay[{assay}]"),
                ));
            }
        }
        for sample in study_variable.sample_refs.iter().flatten() {
            if !meta.samples.contains_key(sample) {
                issues.push(dangling(
                    format!("study_variable[{index}]-sample_refs"),
                    format!("sample[{sample}]"),
                ));
            }
        }
    }

    check_columns(
        "protein",
        "protein_search_engine_score",
        &document.proteins,
        &meta.protein_search_engine_scores,
        meta,
        &mut issues,
    );
    check_columns(
        "peptide",
        "peptide_search_engine_score",
        &document.peptides,
        &meta.peptide_search_engine_scores,
        meta,
        &mut issues,
    );
    check_columns(
        "PSM",
        "psm_search_engine_score",
        &document.psms,
        &meta.psm_search_engine_scores,
        meta,
        &mut issues,
    );
    check_columns(
        "small molecule",
        "smallmolecule_search_engine_score",
        &document.small_molecules,
        &meta.smallmolecule_search_engine_scores,
        meta,
        &mut issues,
    );

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationReport { issues })
    }
}

fn dangling(item: String, target: String) -> ValidationIssue {
    ValidationIssue::DanglingReference { item, target }
}

fn check_columns<C: MzTabColumn>(
    section: &'static str,
    score_item: &'static str,
    table: &SectionTable<C>,
    scores: &IndexMap<u32, CvParam>,
    meta: &MetaData,
    issues: &mut Vec<ValidationIssue>,
) {
    for column in table.columns() {
        for reference in column.references() {
            let target = match reference {
                ColumnRef::SearchEngineScore(score) => {
                    if scores.contains_key(&score) {
                        continue;
                    }
                    format!("{score_item}[{score}]")
                }
                ColumnRef::MsRun(run) => {
                    if meta.ms_runs.contains_key(&run) {
                        continue;
                    }
                    format!("ms_run[{run}]")
                }
                ColumnRef::Assay(assay) => {
                    if meta.assays.contains_key(&assay) {
                        continue;
                    }
                    format!("assay[{assay}]")
                }
                ColumnRef::StudyVariable(study_variable) => {
                    if meta.study_variables.contains_key(&study_variable) {
                        continue;
                    }
                    format!("study_variable[{study_variable}]")
                }
            };
            issues.push(ValidationIssue::DanglingColumnReference { section, target });
        }
    }
}

#[cfg(test)]
mod test {
    use super::super::reader::MzTabReader;
    use super::*;
    use std::io;

    fn parse(text: &str) -> MzTab {
        MzTabReader::new(io::Cursor::new(text))
            .read_unvalidated()
            .expect("Parse should succeed")
    }

    #[test]
    fn test_complete_identification_passes() {
        let document = parse(
            "MTD\tmzTab-mode\tComplete\n\
             MTD\tmzTab-type\tIdentification\n\
             MTD\tms_run[1]-location\tfile:///tmp/run1.mzML\n\
             MTD\tpsm_search_engine_score[1]\t[MS, MS:1001171, Mascot:score, ]\n\
             PSH\tsequence\tPSM_ID\tsearch_engine_score[1]\n\
             PSM\tELVISLIVESK\t1\t30.8\n",
        );
        assert!(validate(&document).is_ok());
    }

    #[test]
    fn test_missing_mode_and_type_batched() {
        let document = parse("MTD\ttitle\tan untyped document\n");
        let report = validate(&document).unwrap_err();
        assert_eq!(report.len(), 2);
        assert!(report.iter().any(|i| *i == ValidationIssue::MissingMode));
        assert!(report.iter().any(|i| *i == ValidationIssue::MissingType));
    }

    #[test]
    fn test_identification_requires_psm_section() {
        let document = parse(
            "MTD\tmzTab-mode\tSummary\nMTD\tmzTab-type\tIdentification\n",
        );
        let report = validate(&document).unwrap_err();
        assert_eq!(report.issues, vec![ValidationIssue::MissingPsmSection]);
    }

    #[test]
    fn test_quantification_requires_a_quantified_section() {
        let document = parse(
            "MTD\tmzTab-mode\tSummary\nMTD\tmzTab-type\tQuantification\n",
        );
        let report = validate(&document).unwrap_err();
        assert_eq!(
            report.issues,
            vec![ValidationIssue::MissingQuantifiedSection]
        );

        let document = parse(
            "MTD\tmzTab-mode\tSummary\nMTD\tmzTab-type\tQuantification\nPEH\tsequence\n",
        );
        assert!(validate(&document).is_ok());
    }

    #[test]
    fn test_complete_mode_requires_run_locations() {
        let document = parse(
            "MTD\tmzTab-mode\tComplete\n\
             MTD\tmzTab-type\tIdentification\n\
             MTD\tms_run[1]-format\t[MS, MS:1000584, mzML file, ]\n\
             PSH\tsequence\n",
        );
        let report = validate(&document).unwrap_err();
        assert_eq!(report.issues, vec![ValidationIssue::MissingRunLocation(1)]);
    }

    #[test]
    fn test_dangling_assay_references() {
        let document = parse(
            "MTD\tmzTab-mode\tSummary\n\
             MTD\tmzTab-type\tIdentification\n\
             MTD\tassay[1]-sample_ref\tsample[5]\n\
             MTD\tassay[1]-ms_run_ref\tms_run[2]\n\
             PSH\tsequence\n",
        );
        let report = validate(&document).unwrap_err();
        assert_eq!(report.len(), 2);
        assert!(report.iter().any(|issue| matches!(
            issue,
            ValidationIssue::DanglingReference { item, target }
                if item == "assay[1]-sample_ref" && target == "sample[5]"
        )));
        assert!(report.iter().any(|issue| matches!(
            issue,
            ValidationIssue::DanglingReference { item, .. } if item == "assay[1]-ms_run_ref"
        )));
    }

    #[test]
    fn test_dangling_study_variable_references() {
        let document = parse(
            "MTD\tmzTab-mode\tSummary\n\
             MTD\tmzTab-type\tIdentification\n\
             MTD\tstudy_variable[1]-assay_refs\tassay[1], assay[2]\n\
             PSH\tsequence\n",
        );
        let report = validate(&document).unwrap_err();
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_dangling_column_references() {
        let document = parse(
            "MTD\tmzTab-mode\tSummary\n\
             MTD\tmzTab-type\tIdentification\n\
             PSH\tsequence\tsearch_engine_score[1]\n\
             PRH\taccession\tsearch_engine_score[1]_ms_run[1]\tprotein_abundance_assay[2]\n",
        );
        let report = validate(&document).unwrap_err();
        // psm score declaration, protein score declaration, ms_run and assay
        let targets: Vec<String> = report
            .iter()
            .filter_map(|issue| match issue {
                ValidationIssue::DanglingColumnReference { target, .. } => Some(target.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            targets,
            vec![
                "protein_search_engine_score[1]".to_string(),
                "ms_run[1]".to_string(),
                "assay[2]".to_string(),
                "psm_search_engine_score[1]".to_string(),
            ]
        );
    }

    #[test]
    fn test_report_display() {
        let report = ValidationReport {
            issues: vec![ValidationIssue::MissingMode, ValidationIssue::MissingType],
        };
        let rendered = report.to_string();
        assert!(rendered.starts_with("2 problem(s) found"));
        assert!(rendered.contains("mzTab-mode was never declared"));
    }
}
