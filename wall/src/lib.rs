pub mod block;
pub mod structure;

pub use block::atomic::AtomicBlock;
pub use block::composite::Composite;
pub use block::{Block, CompositeBlock};
pub use structure::{Structure, Wall};
