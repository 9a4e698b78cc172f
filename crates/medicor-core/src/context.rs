//! Read-only inputs shared by every stage of a pass.

use crate::datetime::CellParser;
use crate::resolve::ResolvedMappings;

#[derive(Debug, Clone, Copy)]
pub struct FormatContext<'a> {
    pub mappings: &'a ResolvedMappings,
    pub parser: CellParser,
}

impl<'a> FormatContext<'a> {
    pub fn new(mappings: &'a ResolvedMappings) -> Self {
        Self {
            mappings,
            parser: CellParser::default(),
        }
    }

    pub fn with_parser(mut self, parser: CellParser) -> Self {
        self.parser = parser;
        self
    }
}
