use crate::block::Block;
use crate::structure::Structure;

/// An immutable, ordered sequence of top-level blocks.
///
/// Every entry is treated as one opaque unit: a composite is matched and
/// counted by its own color and material, and its sub-blocks are never visited.
#[derive(Debug)]
pub struct Wall {
    blocks: Vec<Box<dyn Block>>,
}

impl Wall {
    pub fn new(blocks: Vec<Box<dyn Block>>) -> Self {
        log::debug!("wall assembled from {} top-level blocks", blocks.len());
        Wall { blocks }
    }

    /// Top-level entries in construction order.
    pub fn blocks(&self) -> &[Box<dyn Block>] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The sequence every query walks. Composites are yielded as themselves.
    fn entries(&self) -> impl Iterator<Item = &dyn Block> {
        self.blocks.iter().map(|block| block.as_ref())
    }
}

impl FromIterator<Box<dyn Block>> for Wall {
    fn from_iter<I: IntoIterator<Item = Box<dyn Block>>>(iter: I) -> Self {
        Wall::new(iter.into_iter().collect())
    }
}

impl Structure for Wall {
    fn find_block_by_color(&self, color: &str) -> Option<&dyn Block> {
        let found = self.entries().find(|block| block.color() == color);
        log::trace!("find_block_by_color({:?}): found={}", color, found.is_some());
        found
    }

    fn find_blocks_by_material(&self, material: &str) -> Vec<&dyn Block> {
        let found: Vec<&dyn Block> = self
            .entries()
            .filter(|block| block.material() == material)
            .collect();
        log::trace!("find_blocks_by_material({:?}): {} match(es)", material, found.len());
        found
    }

    fn count(&self) -> usize {
        self.entries().count()
    }
}
