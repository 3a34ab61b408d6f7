//! Speech source adapters

pub mod lines;

pub use lines::LineSpeechSource;
