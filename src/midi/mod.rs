pub mod encoder;

pub use encoder::{EncodedMidi, MidiEncoder, DEFAULT_VELOCITY, RELEASE_VELOCITY, REST_VELOCITY};
