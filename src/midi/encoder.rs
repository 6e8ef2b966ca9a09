use crate::engine::genome::Genome;
use crate::error::Result;
use crate::scale::SCALE_DEGREES;
use log::{debug, warn};
use std::path::Path;

/// Loudness of a sounding note-on
pub const DEFAULT_VELOCITY: u8 = 0x64;
/// Note-on velocity of a rest group
pub const REST_VELOCITY: u8 = 0x00;
/// Note-off release velocity
pub const RELEASE_VELOCITY: u8 = 0x40;

// MThd chunk (length 6, format 1, 2 tracks, division 0x60), MTrk marker with
// the fixed track length, then the set-tempo meta opcode. The tempo payload
// follows as 3 separate bytes.
const FILE_HEADER: [u8; 25] = [
    0x4d, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, //
    0x00, 0x01, 0x00, 0x02, 0x00, 0x60, //
    0x4d, 0x54, 0x72, 0x6b, 0x00, 0x00, 0x05, 0xff, //
    0x00, 0xff, 0x51,
];

// Time signature 4/4, end of the tempo track, start of track 2 with its
// fixed length, and the "Sampler 1" track name meta event.
const META_BLOCK: [u8; 34] = [
    0xe2, 0x00, 0xff, 0x58, //
    0x04, 0x04, 0x02, 0x18, 0x08, 0x00, 0xff, 0x2f, //
    0x00, 0x4d, 0x54, 0x72, 0x6b, 0x00, //
    0x00, 0x01, 0x11, //
    0x00, 0xff, 0x03, 0x09, 0x53, 0x61, 0x6d, //
    0x70, 0x6c, 0x65, 0x72, 0x20, 0x31,
];

// End-of-track meta event
const TRACK_END: [u8; 4] = [0x00, 0xff, 0x2f, 0x00];

/// Bytes emitted per 4-bit genome group: one note-on, one note-off
const BYTES_PER_GROUP: usize = 8;

/// Tempo truncated to 24 bits, big-endian
fn tempo_bytes(tempo: u32) -> [u8; 3] {
    [(tempo >> 16) as u8, (tempo >> 8) as u8, tempo as u8]
}

/// One encode result: the complete file image plus the count of trailing
/// genome bits that did not fill a 4-bit group and were dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMidi {
    pub bytes: Vec<u8>,
    pub dropped_bits: usize,
}

impl EncodedMidi {
    /// Write the buffer to a file. The buffer stays valid when this fails.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Pure genome-to-bytes encoder over a fixed pitch table
///
/// Holds only read-only state, so one encoder may serve any number of
/// concurrent `encode` calls.
#[derive(Debug, Clone)]
pub struct MidiEncoder {
    pitches: [u8; SCALE_DEGREES],
    tempo: [u8; 3],
}

impl MidiEncoder {
    pub fn new(pitches: [u8; SCALE_DEGREES], tempo: u32) -> Self {
        Self {
            pitches,
            tempo: tempo_bytes(tempo),
        }
    }

    /// Encode a genome into a complete file image
    ///
    /// The genome is consumed 4 bits at a time, least-significant bit first,
    /// each group selecting a scale degree:
    /// - 0: rest — silent note-on on the previous pitch (or the root degree
    ///   when no note has sounded yet)
    /// - 15: sustain — repeat the previous pitch, falling back to the root
    ///   degree when no note has sounded yet
    /// - 1..=14: degree n plays `pitches[n - 1]`
    ///
    /// Trailing bits beyond the last full group are dropped and reported in
    /// [`EncodedMidi::dropped_bits`].
    pub fn encode(&self, genome: &Genome) -> EncodedMidi {
        let groups = genome.len() / 4;
        let dropped_bits = genome.len() % 4;
        if dropped_bits != 0 {
            warn!(
                "Genome length {} is not a multiple of 4, dropping {} trailing bits",
                genome.len(),
                dropped_bits
            );
        }

        let mut bytes = Vec::with_capacity(
            FILE_HEADER.len()
                + self.tempo.len()
                + META_BLOCK.len()
                + groups * BYTES_PER_GROUP
                + TRACK_END.len(),
        );
        bytes.extend_from_slice(&FILE_HEADER);
        bytes.extend_from_slice(&self.tempo);
        bytes.extend_from_slice(&META_BLOCK);
        self.push_events(genome, &mut bytes);
        bytes.extend_from_slice(&TRACK_END);

        debug!("Encoded {} groups into {} bytes", groups, bytes.len());
        EncodedMidi { bytes, dropped_bits }
    }

    fn push_events(&self, genome: &Genome, bytes: &mut Vec<u8>) {
        let mut prev_index: Option<usize> = None;

        for group in genome.chunks_exact(4) {
            let index = group
                .iter()
                .enumerate()
                .fold(0usize, |acc, (bit, &set)| acc | ((set as usize) << bit));

            let mut velocity = DEFAULT_VELOCITY;
            let resolved = if index == 0 {
                // rest: silence the previous pitch, root degree before the
                // first sounded note
                velocity = REST_VELOCITY;
                prev_index.unwrap_or(1)
            } else if index == 15 {
                // sustain, root fallback before the first sounded note
                prev_index.unwrap_or(1)
            } else {
                index
            };

            let pitch = self.pitches[resolved - 1];
            bytes.extend_from_slice(&[
                0x00, 0x90, pitch, velocity, // note on
                0x60, 0x80, pitch, RELEASE_VELOCITY, // note off
            ]);

            prev_index = Some(resolved);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PITCHES: [u8; SCALE_DEGREES] =
        [60, 61, 62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 72, 73];

    fn events_region(encoded: &EncodedMidi) -> &[u8] {
        let start = FILE_HEADER.len() + 3 + META_BLOCK.len();
        &encoded.bytes[start..encoded.bytes.len() - TRACK_END.len()]
    }

    /// Bits of a 4-bit group value, least-significant first
    fn group_bits(value: u8) -> Vec<bool> {
        (0..4).map(|bit| value & (1 << bit) != 0).collect()
    }

    #[test]
    fn test_envelope_framing() {
        let encoder = MidiEncoder::new(TEST_PITCHES, 130);
        let genome: Genome = group_bits(5);
        let encoded = encoder.encode(&genome);

        assert!(encoded.bytes.starts_with(&FILE_HEADER));
        assert!(encoded.bytes.ends_with(&TRACK_END));
        assert_eq!(
            encoded.bytes.len(),
            FILE_HEADER.len() + 3 + META_BLOCK.len() + BYTES_PER_GROUP + TRACK_END.len()
        );
        assert_eq!(encoded.dropped_bits, 0);
    }

    #[test]
    fn test_tempo_big_endian_truncated() {
        assert_eq!(tempo_bytes(130), [0x00, 0x00, 0x82]);
        assert_eq!(tempo_bytes(0x0012_3456), [0x12, 0x34, 0x56]);
        assert_eq!(tempo_bytes(0xff12_3456), [0x12, 0x34, 0x56]);
    }

    #[test]
    fn test_rest_then_sustain_resolve_to_root() {
        // 0000 is a rest before any note, 1111 sustains with root fallback
        let encoder = MidiEncoder::new(TEST_PITCHES, 130);
        let mut genome = group_bits(0);
        genome.extend(group_bits(15));
        let encoded = encoder.encode(&genome);

        let events = events_region(&encoded);
        assert_eq!(
            events,
            [
                0x00, 0x90, 60, 0x00, 0x60, 0x80, 60, 0x40, //
                0x00, 0x90, 60, 0x64, 0x60, 0x80, 60, 0x40,
            ]
        );
    }

    #[test]
    fn test_degree_groups_index_pitch_table() {
        let encoder = MidiEncoder::new(TEST_PITCHES, 130);
        let mut genome = group_bits(1);
        genome.extend(group_bits(14));
        let encoded = encoder.encode(&genome);

        let events = events_region(&encoded);
        assert_eq!(&events[..8], [0x00, 0x90, 60, 0x64, 0x60, 0x80, 60, 0x40]);
        assert_eq!(&events[8..], [0x00, 0x90, 73, 0x64, 0x60, 0x80, 73, 0x40]);
    }

    #[test]
    fn test_sustain_and_rest_chain_previous_pitch() {
        // degree 5, sustain it, rest on it
        let encoder = MidiEncoder::new(TEST_PITCHES, 130);
        let mut genome = group_bits(5);
        genome.extend(group_bits(15));
        genome.extend(group_bits(0));
        let encoded = encoder.encode(&genome);

        let events = events_region(&encoded);
        let pitch = TEST_PITCHES[4];
        assert_eq!(&events[..8], [0x00, 0x90, pitch, 0x64, 0x60, 0x80, pitch, 0x40]);
        assert_eq!(&events[8..16], [0x00, 0x90, pitch, 0x64, 0x60, 0x80, pitch, 0x40]);
        assert_eq!(&events[16..], [0x00, 0x90, pitch, 0x00, 0x60, 0x80, pitch, 0x40]);
    }

    #[test]
    fn test_group_bits_are_least_significant_first() {
        // 1000 as stored bits is group value 1, not 8
        let encoder = MidiEncoder::new(TEST_PITCHES, 130);
        let genome: Genome = vec![true, false, false, false];
        let encoded = encoder.encode(&genome);
        assert_eq!(events_region(&encoded)[2], TEST_PITCHES[0]);

        let genome: Genome = vec![false, false, false, true];
        let encoded = encoder.encode(&genome);
        assert_eq!(events_region(&encoded)[2], TEST_PITCHES[7]);
    }

    #[test]
    fn test_trailing_bits_dropped_and_reported() {
        let encoder = MidiEncoder::new(TEST_PITCHES, 130);
        let mut genome = group_bits(3);
        genome.extend([true, false, true]);
        let encoded = encoder.encode(&genome);

        assert_eq!(encoded.dropped_bits, 3);
        assert_eq!(events_region(&encoded).len(), BYTES_PER_GROUP);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let encoder = MidiEncoder::new(TEST_PITCHES, 130);
        let genome: Genome = (0..64).map(|i| i % 3 == 0).collect();
        assert_eq!(encoder.encode(&genome), encoder.encode(&genome));
    }
}
