//! Concrete line-item handlers. Each recognized line shape is one entry in
//! an ordered chain: a handler cheaply rejects lines that are not its shape
//! (`Ok(false)`, the chain moves on), decodes and applies the ones that are
//! (`Ok(true)`), and turns a structural problem into a parse-fatal error.
use indexmap::IndexMap;
use log::warn;

use crate::meta::{MetaData, MzTabMode, MzTabType, SoftwareSetting};
use crate::params::{CvParam, CvParamError, IndexedParam};
use crate::table::{
    MzTabColumn, PeptideColumn, ProteinColumn, PsmColumn, SectionTable, SmallMoleculeColumn,
};

use super::line::{
    self, IndexedItem, LineDecodeError, SubIndexedItem,
};
use super::reader::{MzTab, MzTabError, Position};

pub(crate) const METADATA: &str = "MTD";
pub(crate) const COMMENT: &str = "COM";

/// One recognized line shape. `Ok(false)` means the line is not this
/// handler's shape and the chain should continue; any error aborts the
/// parse.
pub(crate) trait LineItemHandler {
    fn handle(
        &self,
        line: &str,
        position: Position,
        document: &mut MzTab,
    ) -> Result<bool, MzTabError>;
}

/// A handler accepted a line's shape but could not apply it to the document.
#[derive(Debug)]
pub(crate) enum ApplyError {
    /// The `(item, index)` slot was already written this parse.
    Duplicate,
    Decode(LineDecodeError),
}

impl ApplyError {
    fn into_error(self, position: Position, item: String) -> MzTabError {
        match self {
            Self::Duplicate => MzTabError::Duplicate { position, item },
            Self::Decode(source) => MzTabError::Decode { position, source },
        }
    }
}

impl From<LineDecodeError> for ApplyError {
    fn from(value: LineDecodeError) -> Self {
        Self::Decode(value)
    }
}

impl From<CvParamError> for ApplyError {
    fn from(value: CvParamError) -> Self {
        Self::Decode(value.into())
    }
}

impl From<crate::meta::MzTabModeError> for ApplyError {
    fn from(value: crate::meta::MzTabModeError) -> Self {
        Self::Decode(value.into())
    }
}

impl From<crate::meta::MzTabTypeError> for ApplyError {
    fn from(value: crate::meta::MzTabTypeError) -> Self {
        Self::Decode(value.into())
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T) -> Result<(), ApplyError> {
    if slot.is_some() {
        return Err(ApplyError::Duplicate);
    }
    *slot = Some(value);
    Ok(())
}

fn insert_once<V>(map: &mut IndexMap<u32, V>, index: u32, value: V) -> Result<(), ApplyError> {
    if map.contains_key(&index) {
        return Err(ApplyError::Duplicate);
    }
    map.insert(index, value);
    Ok(())
}

/// `MTD<TAB>key<TAB>value` scalar document attributes.
pub(crate) struct ScalarHandler {
    key: &'static str,
    apply: fn(&mut MetaData, &str) -> Result<(), ApplyError>,
}

impl ScalarHandler {
    pub fn new(key: &'static str, apply: fn(&mut MetaData, &str) -> Result<(), ApplyError>) -> Self {
        Self { key, apply }
    }
}

impl LineItemHandler for ScalarHandler {
    fn handle(
        &self,
        line: &str,
        position: Position,
        document: &mut MzTab,
    ) -> Result<bool, MzTabError> {
        let Some(item) = line::decode_scalar(line, METADATA)
            .map_err(|source| MzTabError::Decode { position, source })?
        else {
            return Ok(false);
        };
        if item.key != self.key {
            return Ok(false);
        }
        (self.apply)(&mut document.metadata, item.value)
            .map_err(|e| e.into_error(position, self.key.to_string()))?;
        Ok(true)
    }
}

/// `MTD<TAB>key[index](-property)?<TAB>value` items. A second declaration of
/// the same `(key, index, property)` slot within one parse is a hard error.
pub(crate) struct IndexedHandler {
    key: &'static str,
    property: Option<&'static str>,
    apply: fn(&mut MetaData, &IndexedItem) -> Result<(), ApplyError>,
}

impl IndexedHandler {
    pub fn new(
        key: &'static str,
        property: Option<&'static str>,
        apply: fn(&mut MetaData, &IndexedItem) -> Result<(), ApplyError>,
    ) -> Self {
        Self {
            key,
            property,
            apply,
        }
    }

    fn describe(&self, index: u32) -> String {
        match self.property {
            Some(property) => format!("{}[{}]-{}", self.key, index, property),
            None => format!("{}[{}]", self.key, index),
        }
    }
}

impl LineItemHandler for IndexedHandler {
    fn handle(
        &self,
        line: &str,
        position: Position,
        document: &mut MzTab,
    ) -> Result<bool, MzTabError> {
        let Some(key) = line::key_field(line, METADATA) else {
            return Ok(false);
        };
        if line::item_name(key) != self.key || line::property_name(key) != self.property {
            return Ok(false);
        }
        let Some(item) = line::decode_indexed(line, METADATA)
            .map_err(|source| MzTabError::Decode { position, source })?
        else {
            return Ok(false);
        };
        if item.property != self.property {
            // a sub-index on a property that takes none
            return Err(MzTabError::Decode {
                position,
                source: LineDecodeError::MalformedKey {
                    key: key.to_string(),
                },
            });
        }
        (self.apply)(&mut document.metadata, &item)
            .map_err(|e| e.into_error(position, self.describe(item.index)))?;
        Ok(true)
    }
}

/// `MTD<TAB>key[index]-property[subIndex]<TAB>value` items. Repeated
/// sub-indices under one `(key, index, property)` accumulate, so this
/// handler performs no duplicate detection of its own.
pub(crate) struct SubIndexedHandler {
    key: &'static str,
    property: &'static str,
    apply: fn(&mut MetaData, &SubIndexedItem) -> Result<(), ApplyError>,
}

impl SubIndexedHandler {
    pub fn new(
        key: &'static str,
        property: &'static str,
        apply: fn(&mut MetaData, &SubIndexedItem) -> Result<(), ApplyError>,
    ) -> Self {
        Self {
            key,
            property,
            apply,
        }
    }
}

impl LineItemHandler for SubIndexedHandler {
    fn handle(
        &self,
        line: &str,
        position: Position,
        document: &mut MzTab,
    ) -> Result<bool, MzTabError> {
        let Some(key) = line::key_field(line, METADATA) else {
            return Ok(false);
        };
        if line::item_name(key) != self.key || line::property_name(key) != Some(self.property) {
            return Ok(false);
        }
        let Some(item) = line::decode_sub_indexed(line, METADATA)
            .map_err(|source| MzTabError::Decode { position, source })?
        else {
            return Ok(false);
        };
        (self.apply)(&mut document.metadata, &item).map_err(|e| {
            e.into_error(
                position,
                format!(
                    "{}[{}]-{}[{}]",
                    self.key, item.index, self.property, item.sub_index
                ),
            )
        })?;
        Ok(true)
    }
}

fn strip_code<'a>(line: &'a str, code: &str) -> Option<&'a str> {
    line.strip_prefix(code)?.strip_prefix('\t')
}

/// `PRH`/`PEH`/`PSH`/`SMH` header lines: resolve every token against the
/// section's column vocabulary and install the column registry. An
/// unrecognized token is a hard error, mzTab is schema-strict.
pub(crate) struct SectionHeaderHandler<C: MzTabColumn> {
    code: &'static str,
    section: &'static str,
    table: fn(&mut MzTab) -> &mut SectionTable<C>,
}

impl<C: MzTabColumn> SectionHeaderHandler<C> {
    pub fn new(
        code: &'static str,
        section: &'static str,
        table: fn(&mut MzTab) -> &mut SectionTable<C>,
    ) -> Self {
        Self {
            code,
            section,
            table,
        }
    }
}

impl<C: MzTabColumn> LineItemHandler for SectionHeaderHandler<C> {
    fn handle(
        &self,
        line: &str,
        position: Position,
        document: &mut MzTab,
    ) -> Result<bool, MzTabError> {
        let Some(rest) = strip_code(line, self.code) else {
            return Ok(false);
        };
        let mut columns = Vec::new();
        for token in rest.split('\t') {
            match C::from_token(token) {
                Some(column) => columns.push(column),
                None => {
                    return Err(MzTabError::UnknownColumn {
                        position,
                        section: self.section,
                        token: token.to_string(),
                    })
                }
            }
        }
        let table = (self.table)(document);
        if table.has_header() {
            warn!(
                "Replacing the previously declared {} header at line {}",
                self.section, position.line
            );
        }
        table.set_columns(columns);
        Ok(true)
    }
}

/// `PRT`/`PEP`/`PSM`/`SML` data rows: reject lines from foreign sections,
/// require the section's header to have been seen, and enforce its declared
/// width.
pub(crate) struct DataRowHandler<C: MzTabColumn> {
    code: &'static str,
    section: &'static str,
    table: fn(&mut MzTab) -> &mut SectionTable<C>,
}

impl<C: MzTabColumn> DataRowHandler<C> {
    pub fn new(
        code: &'static str,
        section: &'static str,
        table: fn(&mut MzTab) -> &mut SectionTable<C>,
    ) -> Self {
        Self {
            code,
            section,
            table,
        }
    }
}

impl<C: MzTabColumn> LineItemHandler for DataRowHandler<C> {
    fn handle(
        &self,
        line: &str,
        position: Position,
        document: &mut MzTab,
    ) -> Result<bool, MzTabError> {
        let Some(rest) = strip_code(line, self.code) else {
            return Ok(false);
        };
        let table = (self.table)(document);
        if !table.has_header() {
            return Err(MzTabError::DataBeforeHeader {
                position,
                section: self.section,
            });
        }
        let fields: Vec<String> = rest.split('\t').map(str::to_string).collect();
        table
            .add_row(fields)
            .map_err(|source| MzTabError::RowWidth {
                position,
                section: self.section,
                source,
            })?;
        Ok(true)
    }
}

fn protein_table(document: &mut MzTab) -> &mut SectionTable<ProteinColumn> {
    &mut document.proteins
}

fn peptide_table(document: &mut MzTab) -> &mut SectionTable<PeptideColumn> {
    &mut document.peptides
}

fn psm_table(document: &mut MzTab) -> &mut SectionTable<PsmColumn> {
    &mut document.psms
}

fn small_molecule_table(document: &mut MzTab) -> &mut SectionTable<SmallMoleculeColumn> {
    &mut document.small_molecules
}

/// The metadata handler chain, in offer order. Scalar handlers come first so
/// that field-count and empty-key problems surface from the scalar decoder.
pub(crate) fn metadata_handlers() -> Vec<Box<dyn LineItemHandler>> {
    vec![
        Box::new(ScalarHandler::new("mzTab-version", |meta, value| {
            set_once(&mut meta.version, value.to_string())
        })),
        Box::new(ScalarHandler::new("mzTab-mode", |meta, value| {
            let mode = value.trim().parse::<MzTabMode>()?;
            set_once(&mut meta.mode, mode)
        })),
        Box::new(ScalarHandler::new("mzTab-type", |meta, value| {
            let mztab_type = value.trim().parse::<MzTabType>()?;
            set_once(&mut meta.mztab_type, mztab_type)
        })),
        Box::new(ScalarHandler::new("mzTab-ID", |meta, value| {
            set_once(&mut meta.id, value.to_string())
        })),
        Box::new(ScalarHandler::new("title", |meta, value| {
            set_once(&mut meta.title, value.to_string())
        })),
        Box::new(ScalarHandler::new("description", |meta, value| {
            set_once(&mut meta.description, value.to_string())
        })),
        Box::new(ScalarHandler::new("quantification_method", |meta, value| {
            let param = value.parse::<CvParam>()?;
            set_once(&mut meta.quantification_method, param)
        })),
        Box::new(IndexedHandler::new("ms_run", Some("format"), |meta, item| {
            let run = meta.ms_runs.entry(item.index).or_default();
            set_once(&mut run.format, item.value.parse::<CvParam>()?)
        })),
        Box::new(IndexedHandler::new(
            "ms_run",
            Some("location"),
            |meta, item| {
                let run = meta.ms_runs.entry(item.index).or_default();
                set_once(&mut run.location, item.value.to_string())
            },
        )),
        Box::new(IndexedHandler::new(
            "ms_run",
            Some("id_format"),
            |meta, item| {
                let run = meta.ms_runs.entry(item.index).or_default();
                set_once(&mut run.id_format, item.value.parse::<CvParam>()?)
            },
        )),
        Box::new(IndexedHandler::new("ms_run", Some("hash"), |meta, item| {
            let run = meta.ms_runs.entry(item.index).or_default();
            set_once(&mut run.hash, item.value.to_string())
        })),
        Box::new(IndexedHandler::new(
            "ms_run",
            Some("hash_method"),
            |meta, item| {
                let run = meta.ms_runs.entry(item.index).or_default();
                set_once(&mut run.hash_method, item.value.parse::<CvParam>()?)
            },
        )),
        Box::new(IndexedHandler::new(
            "sample",
            Some("description"),
            |meta, item| {
                let sample = meta.samples.entry(item.index).or_default();
                set_once(&mut sample.description, item.value.to_string())
            },
        )),
        Box::new(SubIndexedHandler::new("sample", "species", |meta, item| {
            let sample = meta.samples.entry(item.index).or_default();
            sample
                .species
                .push(IndexedParam::new(item.sub_index, item.value.parse()?));
            Ok(())
        })),
        Box::new(SubIndexedHandler::new("sample", "tissue", |meta, item| {
            let sample = meta.samples.entry(item.index).or_default();
            sample
                .tissue
                .push(IndexedParam::new(item.sub_index, item.value.parse()?));
            Ok(())
        })),
        Box::new(SubIndexedHandler::new("sample", "cell_type", |meta, item| {
            let sample = meta.samples.entry(item.index).or_default();
            sample
                .cell_type
                .push(IndexedParam::new(item.sub_index, item.value.parse()?));
            Ok(())
        })),
        Box::new(SubIndexedHandler::new("sample", "disease", |meta, item| {
            let sample = meta.samples.entry(item.index).or_default();
            sample
                .disease
                .push(IndexedParam::new(item.sub_index, item.value.parse()?));
            Ok(())
        })),
        Box::new(SubIndexedHandler::new("sample", "custom", |meta, item| {
            let sample = meta.samples.entry(item.index).or_default();
            sample
                .custom
                .push(IndexedParam::new(item.sub_index, item.value.parse()?));
            Ok(())
        })),
        Box::new(IndexedHandler::new(
            "assay",
            Some("quantification_reagent"),
            |meta, item| {
                let assay = meta.assays.entry(item.index).or_default();
                set_once(&mut assay.quantification_reagent, item.value.parse::<CvParam>()?)
            },
        )),
        Box::new(IndexedHandler::new(
            "assay",
            Some("sample_ref"),
            |meta, item| {
                let reference = line::parse_reference(item.value, "sample")?;
                let assay = meta.assays.entry(item.index).or_default();
                set_once(&mut assay.sample_ref, reference)
            },
        )),
        Box::new(IndexedHandler::new(
            "assay",
            Some("ms_run_ref"),
            |meta, item| {
                let reference = line::parse_reference(item.value, "ms_run")?;
                let assay = meta.assays.entry(item.index).or_default();
                set_once(&mut assay.ms_run_ref, reference)
            },
        )),
        Box::new(IndexedHandler::new(
            "study_variable",
            Some("description"),
            |meta, item| {
                let study_variable = meta.study_variables.entry(item.index).or_default();
                set_once(&mut study_variable.description, item.value.to_string())
            },
        )),
        Box::new(IndexedHandler::new(
            "study_variable",
            Some("assay_refs"),
            |meta, item| {
                let references = line::parse_reference_list(item.value, "assay")?;
                let study_variable = meta.study_variables.entry(item.index).or_default();
                set_once(&mut study_variable.assay_refs, references)
            },
        )),
        Box::new(IndexedHandler::new(
            "study_variable",
            Some("sample_refs"),
            |meta, item| {
                let references = line::parse_reference_list(item.value, "sample")?;
                let study_variable = meta.study_variables.entry(item.index).or_default();
                set_once(&mut study_variable.sample_refs, references)
            },
        )),
        Box::new(IndexedHandler::new(
            "instrument",
            Some("name"),
            |meta, item| {
                let instrument = meta.instruments.entry(item.index).or_default();
                set_once(&mut instrument.name, item.value.parse::<CvParam>()?)
            },
        )),
        Box::new(IndexedHandler::new(
            "instrument",
            Some("source"),
            |meta, item| {
                let instrument = meta.instruments.entry(item.index).or_default();
                set_once(&mut instrument.source, item.value.parse::<CvParam>()?)
            },
        )),
        Box::new(SubIndexedHandler::new(
            "instrument",
            "analyzer",
            |meta, item| {
                let instrument = meta.instruments.entry(item.index).or_default();
                instrument
                    .analyzers
                    .push(IndexedParam::new(item.sub_index, item.value.parse()?));
                Ok(())
            },
        )),
        Box::new(IndexedHandler::new(
            "instrument",
            Some("detector"),
            |meta, item| {
                let instrument = meta.instruments.entry(item.index).or_default();
                set_once(&mut instrument.detector, item.value.parse::<CvParam>()?)
            },
        )),
        Box::new(IndexedHandler::new("software", None, |meta, item| {
            let software = meta.software.entry(item.index).or_default();
            set_once(&mut software.param, item.value.parse::<CvParam>()?)
        })),
        Box::new(SubIndexedHandler::new(
            "software",
            "setting",
            |meta, item| {
                let software = meta.software.entry(item.index).or_default();
                software.settings.push(SoftwareSetting {
                    index: item.sub_index,
                    value: item.value.to_string(),
                });
                Ok(())
            },
        )),
        Box::new(IndexedHandler::new("contact", Some("name"), |meta, item| {
            let contact = meta.contacts.entry(item.index).or_default();
            set_once(&mut contact.name, item.value.to_string())
        })),
        Box::new(IndexedHandler::new(
            "contact",
            Some("affiliation"),
            |meta, item| {
                let contact = meta.contacts.entry(item.index).or_default();
                set_once(&mut contact.affiliation, item.value.to_string())
            },
        )),
        Box::new(IndexedHandler::new(
            "contact",
            Some("email"),
            |meta, item| {
                let contact = meta.contacts.entry(item.index).or_default();
                set_once(&mut contact.email, item.value.to_string())
            },
        )),
        Box::new(IndexedHandler::new("uri", None, |meta, item| {
            insert_once(&mut meta.uris, item.index, item.value.to_string())
        })),
        Box::new(IndexedHandler::new("publication", None, |meta, item| {
            insert_once(&mut meta.publications, item.index, item.value.to_string())
        })),
        Box::new(IndexedHandler::new("custom", None, |meta, item| {
            let param = item.value.parse::<CvParam>()?;
            insert_once(&mut meta.custom, item.index, param)
        })),
        Box::new(IndexedHandler::new("fixed_mod", None, |meta, item| {
            let modification = meta.fixed_mods.entry(item.index).or_default();
            set_once(&mut modification.param, item.value.parse::<CvParam>()?)
        })),
        Box::new(IndexedHandler::new(
            "fixed_mod",
            Some("site"),
            |meta, item| {
                let modification = meta.fixed_mods.entry(item.index).or_default();
                set_once(&mut modification.site, item.value.to_string())
            },
        )),
        Box::new(IndexedHandler::new(
            "fixed_mod",
            Some("position"),
            |meta, item| {
                let modification = meta.fixed_mods.entry(item.index).or_default();
                set_once(&mut modification.position, item.value.to_string())
            },
        )),
        Box::new(IndexedHandler::new("variable_mod", None, |meta, item| {
            let modification = meta.variable_mods.entry(item.index).or_default();
            set_once(&mut modification.param, item.value.parse::<CvParam>()?)
        })),
        Box::new(IndexedHandler::new(
            "variable_mod",
            Some("site"),
            |meta, item| {
                let modification = meta.variable_mods.entry(item.index).or_default();
                set_once(&mut modification.site, item.value.to_string())
            },
        )),
        Box::new(IndexedHandler::new(
            "variable_mod",
            Some("position"),
            |meta, item| {
                let modification = meta.variable_mods.entry(item.index).or_default();
                set_once(&mut modification.position, item.value.to_string())
            },
        )),
        Box::new(IndexedHandler::new(
            "protein_search_engine_score",
            None,
            |meta, item| {
                let param = item.value.parse::<CvParam>()?;
                insert_once(&mut meta.protein_search_engine_scores, item.index, param)
            },
        )),
        Box::new(IndexedHandler::new(
            "peptide_search_engine_score",
            None,
            |meta, item| {
                let param = item.value.parse::<CvParam>()?;
                insert_once(&mut meta.peptide_search_engine_scores, item.index, param)
            },
        )),
        Box::new(IndexedHandler::new(
            "psm_search_engine_score",
            None,
            |meta, item| {
                let param = item.value.parse::<CvParam>()?;
                insert_once(&mut meta.psm_search_engine_scores, item.index, param)
            },
        )),
        Box::new(IndexedHandler::new(
            "smallmolecule_search_engine_score",
            None,
            |meta, item| {
                let param = item.value.parse::<CvParam>()?;
                insert_once(&mut meta.smallmolecule_search_engine_scores, item.index, param)
            },
        )),
    ]
}

/// The four section-header handlers, in section order.
pub(crate) fn header_handlers() -> Vec<Box<dyn LineItemHandler>> {
    vec![
        Box::new(SectionHeaderHandler::new("PRH", "protein", protein_table)),
        Box::new(SectionHeaderHandler::new("PEH", "peptide", peptide_table)),
        Box::new(SectionHeaderHandler::new("PSH", "PSM", psm_table)),
        Box::new(SectionHeaderHandler::new(
            "SMH",
            "small molecule",
            small_molecule_table,
        )),
    ]
}

/// The four data-row handlers, in section order.
pub(crate) fn data_handlers() -> Vec<Box<dyn LineItemHandler>> {
    vec![
        Box::new(DataRowHandler::new("PRT", "protein", protein_table)),
        Box::new(DataRowHandler::new("PEP", "peptide", peptide_table)),
        Box::new(DataRowHandler::new("PSM", "PSM", psm_table)),
        Box::new(DataRowHandler::new(
            "SML",
            "small molecule",
            small_molecule_table,
        )),
    ]
}
