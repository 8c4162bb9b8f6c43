/// One unit of contract content. Blocks are the smallest thing the paginator
/// keeps together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Paragraph(String),
    /// Label/value row, e.g. `Client Name: Jane Doe`.
    Field { label: String, value: String },
    /// Signature line with the signing party underneath.
    Signature { party: String },
    /// Start a new page; only honoured with the `css`/`legacy` break modes.
    PageBreak,
}

/// The content region handed to the exporter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContractDocument {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl ContractDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    pub fn heading(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Heading(text.into()));
        self
    }

    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Paragraph(text.into()));
        self
    }

    pub fn field(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.blocks.push(Block::Field {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    pub fn signature(mut self, party: impl Into<String>) -> Self {
        self.blocks.push(Block::Signature {
            party: party.into(),
        });
        self
    }

    pub fn page_break(mut self) -> Self {
        self.blocks.push(Block::PageBreak);
        self
    }
}
