use crate::block::Block;

/// A block with no sub-blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomicBlock {
    color: String,
    material: String,
}

impl AtomicBlock {
    pub fn new(color: impl Into<String>, material: impl Into<String>) -> Self {
        AtomicBlock {
            color: color.into(),
            material: material.into(),
        }
    }
}

impl Block for AtomicBlock {
    fn color(&self) -> &str {
        &self.color
    }

    fn material(&self) -> &str {
        &self.material
    }
}
