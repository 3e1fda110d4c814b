mod wall;

pub use wall::Wall;

use crate::block::Block;

/// Read-only queries over an ordered collection of blocks.
pub trait Structure {
    /// First block whose color equals `color` exactly, if any.
    fn find_block_by_color(&self, color: &str) -> Option<&dyn Block>;

    /// All blocks whose material equals `material`, in order.
    fn find_blocks_by_material(&self, material: &str) -> Vec<&dyn Block>;

    fn count(&self) -> usize;
}
