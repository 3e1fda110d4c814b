use crate::block::{Block, CompositeBlock};

/// A block that owns an ordered list of sub-blocks and reports its own
/// color and material, e.g. a brick made of metal and wood reporting "metal-wood".
#[derive(Debug)]
pub struct Composite {
    color: String,
    material: String,
    blocks: Vec<Box<dyn Block>>,
}

impl Composite {
    pub fn new(
        color: impl Into<String>,
        material: impl Into<String>,
        blocks: Vec<Box<dyn Block>>,
    ) -> Self {
        Composite {
            color: color.into(),
            material: material.into(),
            blocks,
        }
    }
}

impl Block for Composite {
    fn color(&self) -> &str {
        &self.color
    }

    fn material(&self) -> &str {
        &self.material
    }

    fn as_composite(&self) -> Option<&dyn CompositeBlock> {
        Some(self)
    }
}

impl CompositeBlock for Composite {
    fn blocks(&self) -> &[Box<dyn Block>] {
        &self.blocks
    }
}
