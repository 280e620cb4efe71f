pub mod rng;
pub mod sampler;
pub mod table;

pub use rng::{FixedFraction, RandomSource, RngSource, SequenceSource};
pub use sampler::sample;
pub use table::{Message, MessageTable};
