use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label};
use serde::Deserialize;

use wall::{AtomicBlock, Block, Composite, Wall};

/// A wall description in TOML: `[[block]]` tables, optionally followed by
/// `[[check]]` tables when the file is used as a scenario.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WallFile {
    /// Human-readable scenario description.
    #[serde(default)]
    pub description: Option<String>,

    /// Top-level blocks, in wall order.
    #[serde(default, rename = "block")]
    pub blocks: Vec<BlockSpec>,

    /// Expected query results (scenario files only).
    #[serde(default, rename = "check")]
    pub checks: Vec<Check>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockSpec {
    pub color: String,
    pub material: String,

    /// Sub-blocks. Any `blocks` key, even an empty array, makes this a composite.
    #[serde(default)]
    pub blocks: Option<Vec<BlockSpec>>,
}

impl BlockSpec {
    pub fn into_block(self) -> Box<dyn Block> {
        match self.blocks {
            Some(children) => Box::new(Composite::new(
                self.color,
                self.material,
                children.into_iter().map(BlockSpec::into_block).collect(),
            )),
            None => Box::new(AtomicBlock::new(self.color, self.material)),
        }
    }
}

/// One expected query result. Blocks are identified by their top-level index.
#[derive(Debug, Deserialize)]
#[serde(tag = "query", rename_all = "lowercase", deny_unknown_fields)]
pub enum Check {
    Count {
        expect: usize,
    },
    Color {
        value: String,
        /// `None` expects no match.
        #[serde(default)]
        expect: Option<usize>,
    },
    Material {
        value: String,
        #[serde(default)]
        expect: Vec<usize>,
    },
}

/// Fixture loading errors with source location information.
#[derive(Debug, Clone)]
pub struct LoadError {
    pub message: String,
    pub span: Option<Range<usize>>,
    pub file_id: usize,
    pub notes: Vec<String>,
}

impl LoadError {
    pub fn from_toml(error: &toml::de::Error, file_id: usize) -> Self {
        LoadError {
            message: error.message().to_string(),
            span: error.span(),
            file_id,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        let labels = match &self.span {
            Some(span) => vec![Label::primary(self.file_id, span.clone())],
            None => Vec::new(),
        };
        Diagnostic::error()
            .with_message(&self.message)
            .with_labels(labels)
            .with_notes(self.notes.clone())
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for LoadError {}

/// Parse a wall fixture. `file_id` is the codespan file the source was registered under.
pub fn parse(source: &str, file_id: usize) -> Result<WallFile, LoadError> {
    toml::from_str(source).map_err(|e| {
        let error = LoadError::from_toml(&e, file_id);
        if error.message.contains("unknown field") {
            error.with_note(
                "`[[block]]` accepts `color`, `material` and `blocks`; \
                 `[[check]]` accepts `query`, `value` and `expect`",
            )
        } else {
            error
        }
    })
}

/// Build a wall from top-level block specs, preserving their order.
pub fn build_wall(blocks: Vec<BlockSpec>) -> Wall {
    blocks.into_iter().map(BlockSpec::into_block).collect()
}

/// Top-level index of a block returned by a wall query.
pub fn position_of(wall: &Wall, block: &dyn Block) -> Option<usize> {
    wall.blocks()
        .iter()
        .position(|entry| std::ptr::addr_eq(entry.as_ref(), block))
}
