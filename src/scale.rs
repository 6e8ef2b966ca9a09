use crate::error::{MelogenError, Result};
use serde::{Deserialize, Serialize};

/// Number of scale degrees the encoder can address: two octaves of a
/// seven-note scale. Genome groups 0 and 15 are reserved for rest/sustain,
/// leaving indices 1..=14 for these degrees.
pub const SCALE_DEGREES: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    Major,
    Minor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    MajorBlues,
    MinorBlues,
}

impl ScaleType {
    /// Semitone offsets from the root, the mode's interval formula repeated
    /// across two octaves
    fn scheme(self) -> [u8; SCALE_DEGREES] {
        match self {
            // major formula: whole, whole, half, whole, whole, whole, half
            ScaleType::Major => [0, 2, 4, 5, 7, 9, 11, 12, 14, 16, 17, 19, 21, 23],
            // minor formula: whole, half, whole, whole, half, whole, whole
            ScaleType::Minor => [0, 2, 3, 5, 7, 8, 10, 12, 14, 15, 17, 19, 20, 22],
            // dorian formula: whole, half, whole, whole, whole, half, whole
            ScaleType::Dorian => [0, 2, 3, 5, 7, 9, 10, 12, 14, 15, 17, 19, 21, 22],
            // phrygian formula: half, whole, whole, whole, half, whole, whole
            ScaleType::Phrygian => [0, 1, 3, 5, 7, 8, 10, 12, 13, 15, 17, 19, 20, 22],
            // lydian formula: whole, whole, whole, half, whole, whole, half
            ScaleType::Lydian => [0, 2, 4, 6, 7, 9, 10, 11, 13, 15, 17, 18, 20, 22],
            // mixolydian formula: whole, whole, half, whole, whole, half, whole
            ScaleType::Mixolydian => [0, 2, 4, 5, 7, 9, 10, 12, 14, 16, 17, 19, 21, 22],
            // major blues formula: whole, half, half, 3*half, whole, 3*half
            ScaleType::MajorBlues => [0, 2, 3, 4, 7, 9, 12, 14, 15, 16, 19, 21, 24, 26],
            // minor blues formula: 3*half, whole, half, half, 3*half, whole
            ScaleType::MinorBlues => [0, 3, 5, 6, 7, 10, 12, 15, 17, 18, 19, 22, 24, 27],
        }
    }
}

/// MIDI note number of the named root key, fifth octave
fn root_note(key: &str) -> Result<u8> {
    let note = match key {
        "C" => 72,
        "C#" | "Db" => 73,
        "D" => 74,
        "D#" | "Eb" => 75,
        "E" => 76,
        "F" => 77,
        "F#" | "Gb" => 78,
        "G" => 79,
        "G#" | "Ab" => 80,
        "A" => 81,
        "A#" | "Bb" => 82,
        "B" => 83,
        _ => return Err(MelogenError::UnknownKey(key.to_string())),
    };
    Ok(note)
}

/// A concrete two-octave scale: 14 MIDI pitch codes, read-only once built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    pitches: [u8; SCALE_DEGREES],
}

impl Scale {
    pub fn new(scale_type: ScaleType, key: &str) -> Result<Self> {
        let root = root_note(key)?;
        let scheme = scale_type.scheme();

        let mut pitches = [0u8; SCALE_DEGREES];
        for (pitch, offset) in pitches.iter_mut().zip(scheme) {
            *pitch = root + offset;
        }
        Ok(Self { pitches })
    }

    pub fn pitches(&self) -> [u8; SCALE_DEGREES] {
        self.pitches
    }
}
