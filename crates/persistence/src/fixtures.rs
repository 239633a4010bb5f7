//! Deterministic synthetic stores for demos and tests.

use crate::error::Result;
use crate::writer::{StoreSummary, StoreWriter};
use kinemix::{EventRecord, SeriesId, Track};

use std::fs;
use std::path::{Path, PathBuf};

/// Particle species the generator draws from.
const SPECIES: [i32; 8] = [211, -211, 111, 321, -321, 2212, -2212, 22];

/// PCG-XSH-RR 32. Deterministic across platforms; no external RNG needed.
pub struct Pcg32 {
    state: u64,
    inc: u64,
}

impl Pcg32 {
    pub fn new(seed: u64) -> Self {
        let mut rng = Self {
            state: 0,
            inc: (seed << 1) | 1,
        };
        rng.next_u32();
        rng.state = rng.state.wrapping_add(seed);
        rng.next_u32();
        rng
    }

    pub fn next_u32(&mut self) -> u32 {
        let oldstate = self.state;
        self.state = oldstate.wrapping_mul(6364136223846793005).wrapping_add(self.inc);
        let xorshifted = (((oldstate >> 18) ^ oldstate) >> 27) as u32;
        let rot = (oldstate >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Uniform in `[-1, 1)`.
    fn next_signed_unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / f64::from(u32::MAX) * 2.0 - 1.0
    }
}

/// One synthetic event with `tracks` primaries.
pub fn synthetic_event(rng: &mut Pcg32, tracks: u32) -> EventRecord {
    (0..tracks)
        .map(|_| {
            let pdg = SPECIES[(rng.next_u32() as usize) % SPECIES.len()];
            Track {
                pdg,
                mother: -1,
                second_mother: -1,
                first_daughter: -1,
                last_daughter: -1,
                momentum: [
                    rng.next_signed_unit() * 2.0,
                    rng.next_signed_unit() * 2.0,
                    rng.next_signed_unit() * 20.0,
                ],
                vertex: [
                    rng.next_signed_unit() * 0.01,
                    rng.next_signed_unit() * 0.01,
                    rng.next_signed_unit() * 5.0,
                ],
                time: 0.0,
                flags: 0,
            }
        })
        .collect::<Vec<_>>()
        .into()
}

/// Writes `events` synthetic events. Same seed, same bytes.
pub fn write_synthetic_store(
    path: impl AsRef<Path>,
    series: SeriesId,
    events: u64,
    tracks_per_event: u32,
    seed: u64,
) -> Result<StoreSummary> {
    let mut rng = Pcg32::new(seed);
    let mut writer = StoreWriter::create(path, series)?;
    for _ in 0..events {
        writer.append(&synthetic_event(&mut rng, tracks_per_event))?;
    }
    writer.finalize()
}

/// Event whose origin can be read back: every track carries `tag` as its PDG
/// code and `index` in `flags`.
pub fn tagged_event(tag: i32, index: u32, tracks: usize) -> EventRecord {
    vec![
        Track {
            pdg: tag,
            flags: index,
            ..Track::default()
        };
        tracks.max(1)
    ]
    .into()
}

/// Reads `(pdg, flags)` of the first track back out of a [`tagged_event`].
pub fn event_tag(record: &EventRecord) -> Option<(i32, u32)> {
    record.tracks.first().map(|t| (t.pdg, t.flags))
}

pub fn write_store(
    path: impl AsRef<Path>,
    series: SeriesId,
    records: &[EventRecord],
) -> Result<StoreSummary> {
    let mut writer = StoreWriter::create(path, series)?;
    for record in records {
        writer.append(record)?;
    }
    writer.finalize()
}

/// Tag of input A events in the fixtures.
pub const TAG_A: i32 = 211;
/// Tag of input B events in the fixtures.
pub const TAG_B: i32 = 2212;

pub struct TestPaths {
    pub input_a: PathBuf,
    pub input_b: PathBuf,
    pub output: PathBuf,
}

/// Two tagged inputs with `count_a` and `count_b` events in `dir`.
pub fn generate_mix_scenario(dir: &Path, count_a: u32, count_b: u32) -> Result<TestPaths> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let input_a = dir.join("signal.kmix");
    let a: Vec<EventRecord> = (0..count_a).map(|i| tagged_event(TAG_A, i, 3)).collect();
    write_store(&input_a, SeriesId::default(), &a)?;

    let input_b = dir.join("background.kmix");
    let b: Vec<EventRecord> = (0..count_b).map(|i| tagged_event(TAG_B, i, 2)).collect();
    write_store(&input_b, SeriesId::default(), &b)?;

    Ok(TestPaths {
        input_a,
        input_b,
        output: dir.join("mixed.kmix"),
    })
}

/// The 5-vs-2 scenario: A = a0..a4, B = b0, b1.
pub fn generate_test_scenario(dir: &Path) -> Result<TestPaths> {
    generate_mix_scenario(dir, 5, 2)
}
