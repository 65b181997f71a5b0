pub mod extractor;
pub mod normalize;
