use melogen::engine::Genome;
use melogen::midi::MidiEncoder;
use melogen::scale::{Scale, ScaleType};

const PITCHES: [u8; 14] = [60, 61, 62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 72, 73];

const FIXED_HEADER_LEN: usize = 25 + 3 + 34;
const TRAILER_LEN: usize = 4;

fn events(bytes: &[u8]) -> &[u8] {
    &bytes[FIXED_HEADER_LEN..bytes.len() - TRAILER_LEN]
}

#[test]
fn test_rest_then_sustain_scenario() {
    // First group 0000 is a rest before any note; second group 1111 sustains
    // with the root fallback. Both resolve to pitch 60, the first silent.
    let encoder = MidiEncoder::new(PITCHES, 130);
    let genome: Genome = vec![false, false, false, false, true, true, true, true];
    let encoded = encoder.encode(&genome);

    let generated = events(&encoded.bytes);
    assert_eq!(generated.len(), 16);
    assert_eq!(
        generated,
        [
            0x00, 0x90, 60, 0x00, 0x60, 0x80, 60, 0x40, //
            0x00, 0x90, 60, 0x64, 0x60, 0x80, 60, 0x40,
        ]
    );
}

#[test]
fn test_envelope_constants() {
    let encoder = MidiEncoder::new(PITCHES, 130);
    let encoded = encoder.encode(&vec![true, false, false, false]);

    // MThd chunk: length 6, format 1, 2 tracks, division 0x60
    assert_eq!(
        &encoded.bytes[..14],
        [0x4d, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x01, 0x00, 0x02, 0x00, 0x60]
    );
    // Track chunk marker
    assert_eq!(&encoded.bytes[14..18], b"MTrk");
    // Set-tempo opcode then 130 as 3 big-endian bytes
    assert_eq!(&encoded.bytes[22..25], [0x00, 0xff, 0x51]);
    assert_eq!(&encoded.bytes[25..28], [0x00, 0x00, 0x82]);
    // Track name meta event "Sampler 1" inside the fixed meta block
    let name_at = 28 + 25;
    assert_eq!(&encoded.bytes[name_at..name_at + 9], b"Sampler 1");
    // End-of-track trailer
    assert_eq!(&encoded.bytes[encoded.bytes.len() - 4..], [0x00, 0xff, 0x2f, 0x00]);
}

#[test]
fn test_every_group_emits_one_event_pair() {
    let encoder = MidiEncoder::new(PITCHES, 130);
    let genome: Genome = (0..256).map(|i| i % 2 == 0).collect();
    let encoded = encoder.encode(&genome);

    assert_eq!(events(&encoded.bytes).len(), (256 / 4) * 8);
    for pair in events(&encoded.bytes).chunks_exact(8) {
        assert_eq!(pair[0], 0x00);
        assert_eq!(pair[1], 0x90);
        assert_eq!(pair[4], 0x60);
        assert_eq!(pair[5], 0x80);
        assert_eq!(pair[7], 0x40);
        // both events reference the same resolved pitch
        assert_eq!(pair[2], pair[6]);
    }
}

#[test]
fn test_encode_pure_and_reentrant() {
    let scale = Scale::new(ScaleType::Major, "C").unwrap();
    let encoder = MidiEncoder::new(scale.pitches(), 130);
    let genome: Genome = (0..128).map(|i| i % 5 < 2).collect();

    let first = encoder.encode(&genome);
    let second = encoder.encode(&genome);
    assert_eq!(first, second);

    // read-only inputs: encoding from several threads agrees byte for byte
    let reference = first.bytes.clone();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                assert_eq!(encoder.encode(&genome).bytes, reference);
            });
        }
    });
}

#[test]
fn test_truncation_reported() {
    let encoder = MidiEncoder::new(PITCHES, 130);
    let genome: Genome = vec![true; 10];
    let encoded = encoder.encode(&genome);

    assert_eq!(encoded.dropped_bits, 2);
    assert_eq!(events(&encoded.bytes).len(), 2 * 8);
}

#[test]
fn test_write_to_round_trip() {
    let encoder = MidiEncoder::new(PITCHES, 130);
    let genome: Genome = vec![true, false, true, false];
    let encoded = encoder.encode(&genome);

    let dir = std::env::temp_dir();
    let path = dir.join("melogen_write_test.mid");
    encoded.write_to(&path).unwrap();
    let on_disk = std::fs::read(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(on_disk, encoded.bytes);
}
