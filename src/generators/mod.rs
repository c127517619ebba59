pub mod synthesizer;

pub use synthesizer::RecordSynthesizer;
