//! Text processing pipeline
//!
//! `tokenizer -> lemmatizer -> [merge_idiom]`, composed explicitly in order.

pub mod doc;
pub mod idiom_nlp;
pub mod lemmatizer;
pub mod pipeline;
pub mod tokenizer;

pub use doc::{Doc, Token, IDIOM_TAG};
pub use idiom_nlp::IdiomNlp;
pub use lemmatizer::{Lemmatizer, LEMMATIZER_STAGE};
pub use pipeline::{Pipeline, Stage, TOKENIZER_STAGE};
pub use tokenizer::WhitespaceTokenizer;
