pub mod atomic;
pub mod composite;

use std::fmt;

/// A queryable building block.
/// Color and material are fixed at construction and compared only by equality.
pub trait Block: fmt::Debug + Send + Sync {
    fn color(&self) -> &str;

    fn material(&self) -> &str;

    /// Returns the composite view of this block, if it has one.
    /// Wall queries never call this.
    fn as_composite(&self) -> Option<&dyn CompositeBlock> {
        None
    }
}

/// A block assembled from other blocks.
/// Its own color and material are independent of its children.
pub trait CompositeBlock: Block {
    /// Direct children, in construction order.
    fn blocks(&self) -> &[Box<dyn Block>];
}
