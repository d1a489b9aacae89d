use super::handlers::{
    data_handlers, header_handlers, metadata_handlers, LineItemHandler, METADATA,
};

/// Parse progress through the ordered mzTab sections. Metadata lines stay
/// legal in every state, so the state mostly decides which handlers are
/// offered a line first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MzTabParserState {
    #[default]
    Start,
    Metadata,
    ProteinHeader,
    ProteinData,
    PeptideHeader,
    PeptideData,
    PsmHeader,
    PsmData,
    SmallMoleculeHeader,
    SmallMoleculeData,
    Done,
}

impl MzTabParserState {
    /// The state after a line with the given section code has been consumed.
    pub fn after(self, code: &str) -> MzTabParserState {
        match code {
            METADATA => match self {
                Self::Start => Self::Metadata,
                other => other,
            },
            "PRH" => Self::ProteinHeader,
            "PRT" => Self::ProteinData,
            "PEH" => Self::PeptideHeader,
            "PEP" => Self::PeptideData,
            "PSH" => Self::PsmHeader,
            "PSM" => Self::PsmData,
            "SMH" => Self::SmallMoleculeHeader,
            "SML" => Self::SmallMoleculeData,
            _ => self,
        }
    }

    fn in_data_sections(&self) -> bool {
        !matches!(self, Self::Start | Self::Metadata)
    }
}

/// The parser state factory: builds the handler chains once and yields the
/// ordered chain to try for the current state.
pub(crate) struct HandlerChains {
    metadata: Vec<Box<dyn LineItemHandler>>,
    headers: Vec<Box<dyn LineItemHandler>>,
    data: Vec<Box<dyn LineItemHandler>>,
}

impl HandlerChains {
    pub fn new() -> Self {
        Self {
            metadata: metadata_handlers(),
            headers: header_handlers(),
            data: data_handlers(),
        }
    }

    /// The ordered handler chain for a line read in `state`. Inside the data
    /// sections the row handlers come first; the metadata handlers remain
    /// reachable from every state.
    pub fn chain(&self, state: MzTabParserState) -> impl Iterator<Item = &dyn LineItemHandler> {
        let (first, second, third) = if state.in_data_sections() {
            (&self.data, &self.headers, &self.metadata)
        } else {
            (&self.metadata, &self.headers, &self.data)
        };
        first
            .iter()
            .chain(second.iter())
            .chain(third.iter())
            .map(|handler| handler.as_ref())
    }
}
