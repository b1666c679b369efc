mod splitter;
mod tokenizer;

pub use splitter::split_pipeline;
pub use tokenizer::Tokenizer;
