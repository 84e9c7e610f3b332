pub mod extractor;
pub mod secret;
