use std::{error, fmt::Display, fs, path::{Path, PathBuf}};

use anyhow::{Context, Result};
use clap::Parser;
use once_cell::sync::Lazy;
use regex::Regex;

mod seen;

pub use seen::SeenSet;

pub const MASK: usize = 0xFFFFFF;
pub const DOMAIN_SIZE: usize = MASK + 1;
pub const OR_MASK: usize = 0x10000;
pub const MULTIPLIER: usize = 65899;
pub const DEFAULT_SEED: usize = 10373714;

#[derive(Debug)]
pub enum Error {
    InvalidInstructionText(String),
    SeedNotFound,
    TargetOutOfDomain(usize),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidInstructionText(s) => write!(f, "Invalid text({}) for instruction.", s),
            Error::SeedNotFound => write!(
                f,
                "Can't find the seed instruction(seti following bori with {}) in given program.",
                OR_MASK
            ),
            Error::TargetOutOfDomain(n) => write!(
                f,
                "Target value {} is out of the 24-bit domain, expect value in [0, {}].",
                n, MASK
            ),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    pub input_path: PathBuf,
    /// Print every value of register 3 when the program reaches the halting check
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct Part1CLIArgs {
    pub input_path: PathBuf,
    /// Check after how many loops the program halts with this value in register 0
    #[arg(short, long)]
    pub target: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transform {
    seed: usize,
    or_mask: usize,
    multiplier: usize,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Transform {
    pub fn new(seed: usize) -> Self {
        Self {
            seed,
            or_mask: OR_MASK,
            multiplier: MULTIPLIER,
        }
    }

    pub fn seed(&self) -> usize {
        self.seed
    }

    /// One outer loop of the program: fold `acc | OR_MASK` into the seed byte by byte.
    pub fn apply(&self, acc: usize) -> usize {
        let mut state = MixState::Mixing {
            acc: self.seed,
            mix: acc | self.or_mask,
        };
        loop {
            match state.step(self) {
                MixState::Refined(value) => break value,
                mixing => state = mixing,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixState {
    Mixing { acc: usize, mix: usize },
    Refined(usize),
}

impl MixState {
    pub fn step(self, transform: &Transform) -> Self {
        match self {
            MixState::Mixing { acc, mix } => {
                let acc = (acc + (mix & 0xFF)) & MASK;
                let acc = (acc * transform.multiplier) & MASK;
                if mix < 256 {
                    MixState::Refined(acc)
                } else {
                    MixState::Mixing { acc, mix: mix / 256 }
                }
            }
            refined => refined,
        }
    }
}

#[test]
fn test_mix_state_step() {
    let transform = Transform::new(0);
    let mut state = MixState::Mixing { acc: 0, mix: OR_MASK };
    state = state.step(&transform);
    assert!(state == MixState::Mixing { acc: 0, mix: 256 });
    state = state.step(&transform);
    assert!(state == MixState::Mixing { acc: 0, mix: 1 });
    state = state.step(&transform);
    assert!(state == MixState::Refined(MULTIPLIER));
    // Refined is the end of one outer loop.
    assert!(state.step(&transform) == state);
}

#[test]
fn test_apply() {
    assert!(Transform::new(0).apply(0) == MULTIPLIER);
    assert!(Transform::default().apply(0) == 7967233);
}

/// Values of register 3 each time the program reaches its halting check, starting from 0.
#[derive(Debug, Clone)]
pub struct Sequence {
    transform: Transform,
    acc: usize,
}

impl Iterator for Sequence {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.emit())
    }
}

impl Sequence {
    pub fn new(transform: Transform) -> Self {
        Self { transform, acc: 0 }
    }

    pub fn emit(&mut self) -> usize {
        self.acc = self.transform.apply(self.acc);
        self.acc
    }
}

#[test]
fn test_sequence() {
    let target_seq = vec![7967233, 2663934, 11413072, 12438049, 4794690];
    let seq = Sequence::new(Transform::default())
        .take(target_seq.len())
        .collect::<Vec<_>>();
    assert!(target_seq == seq);
}

#[test]
fn test_sequence_bounded() {
    for seed in [0, 6663054, DEFAULT_SEED, MASK] {
        assert!(Sequence::new(Transform::new(seed))
            .take(1000)
            .all(|n| n <= MASK));
    }
}

/// The register 0 value that halts the program after the fewest instructions.
pub fn first_value(transform: &Transform) -> usize {
    Sequence::new(*transform).emit()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Generating,
    Done,
}

pub struct CycleDetector {
    seq: Sequence,
    seen: SeenSet,
    last_unique: usize,
    loops_n: usize,
    repeated: Option<usize>,
}

impl CycleDetector {
    pub fn new(transform: Transform) -> Self {
        let mut seq = Sequence::new(transform);
        let first = seq.emit();
        let mut seen = SeenSet::new();
        seen.insert(first);

        Self {
            seq,
            seen,
            last_unique: first,
            loops_n: 1,
            repeated: None,
        }
    }

    pub fn step(&mut self) -> Phase {
        if self.repeated.is_some() {
            return Phase::Done;
        }

        let value = self.seq.emit();
        self.loops_n += 1;
        if self.seen.insert(value) {
            self.last_unique = value;
            Phase::Generating
        } else {
            self.repeated = Some(value);
            Phase::Done
        }
    }

    pub fn phase(&self) -> Phase {
        if self.repeated.is_some() {
            Phase::Done
        } else {
            Phase::Generating
        }
    }

    pub fn last_unique(&self) -> usize {
        self.last_unique
    }

    pub fn loops_n(&self) -> usize {
        self.loops_n
    }

    pub fn seen_n(&self) -> usize {
        self.seen.len()
    }

    pub fn repeated(&self) -> Option<usize> {
        self.repeated
    }

    pub fn report(&self) -> Option<CycleReport> {
        self.repeated.map(|repeated| CycleReport {
            last_unique: self.last_unique,
            repeated,
            distinct_n: self.seen.len(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub last_unique: usize,
    pub repeated: usize,
    pub distinct_n: usize,
}

/// The register 0 value that halts the program after the most instructions.
pub fn find_last_unique(transform: &Transform) -> CycleReport {
    let mut detector = CycleDetector::new(*transform);
    loop {
        if detector.step() == Phase::Done {
            if let Some(report) = detector.report() {
                break report;
            }
        }
    }
}

#[test]
fn test_find_last_unique() {
    let report = find_last_unique(&Transform::default());
    assert!(report.last_unique == 16477902);
    assert!(report.repeated == 3107527);
    assert!(report.distinct_n == 10497);
}

#[test]
fn test_find_last_unique_deterministic() {
    let transform = Transform::new(6663054);
    assert!(find_last_unique(&transform) == find_last_unique(&transform));
    assert!(find_last_unique(&transform).last_unique == 13846724);
}

#[test]
fn test_cycle_detector_growth() {
    let mut detector = CycleDetector::new(Transform::default());
    assert!(detector.seen_n() == 1);
    while detector.step() == Phase::Generating {
        assert!(detector.seen_n() == detector.loops_n());
        assert!(detector.last_unique() <= MASK);
        assert!(detector.loops_n() <= DOMAIN_SIZE);
    }

    // The repeating loop doesn't touch the seen set or the last unique value.
    assert!(detector.phase() == Phase::Done);
    assert!(detector.seen_n() == detector.loops_n() - 1);
    let last_unique = detector.last_unique();
    let repeated = detector.repeated().unwrap();
    assert!(detector.seen.contains(repeated));
    assert!(Transform::default().apply(last_unique) == repeated);
    assert!(detector.step() == Phase::Done);
    assert!(detector.last_unique() == last_unique);
}

/// Count of loops before the program halts with `target` in register 0, None if it never halts.
pub fn find_first(transform: &Transform, target: usize) -> Result<Option<usize>, Error> {
    if target > MASK {
        return Err(Error::TargetOutOfDomain(target));
    }

    let mut seq = Sequence::new(*transform);
    let mut seen = SeenSet::new();
    let mut loops_n = 0;
    loop {
        let value = seq.emit();
        loops_n += 1;
        if value == target {
            break Ok(Some(loops_n));
        }
        if !seen.insert(value) {
            break Ok(None);
        }
    }
}

#[test]
fn test_find_first() {
    let transform = Transform::default();
    assert!(matches!(find_first(&transform, 7967233), Ok(Some(1))));
    assert!(matches!(find_first(&transform, 11413072), Ok(Some(3))));
    assert!(matches!(find_first(&transform, 16477902), Ok(Some(10497))));
    assert!(matches!(find_first(&transform, 0), Ok(None)));
    assert!(matches!(
        find_first(&transform, DOMAIN_SIZE),
        Err(Error::TargetOutOfDomain(DOMAIN_SIZE))
    ));
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Instruction {
    name: String,
    oprands: [usize; 3],
}

impl TryFrom<&str> for Instruction {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        static INST_PATTERN: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^([a-z]{4}) (\d+) (\d+) (\d+)$").unwrap());

        let caps = INST_PATTERN
            .captures(value)
            .ok_or(Error::InvalidInstructionText(value.to_string()))?;
        let mut oprands = [0; 3];
        for (ind, oprand) in oprands.iter_mut().enumerate() {
            *oprand = caps[ind + 2]
                .parse::<usize>()
                .map_err(|_| Error::InvalidInstructionText(value.to_string()))?;
        }

        Ok(Instruction {
            name: caps[1].to_string(),
            oprands,
        })
    }
}

impl Instruction {
    // bori r 65536 _ then seti seed _ r
    fn seed_after(&self, next: &Instruction) -> Option<usize> {
        if self.name == "bori"
            && self.oprands[1] == OR_MASK
            && next.name == "seti"
            && next.oprands[2] == self.oprands[0]
        {
            Some(next.oprands[0])
        } else {
            None
        }
    }
}

pub fn find_seed<'a>(lines: impl Iterator<Item = &'a str>) -> Result<usize, Error> {
    static IP_DECL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#ip \d+$").unwrap());

    let mut last_inst: Option<Instruction> = None;
    for line in lines.map(str::trim) {
        if line.is_empty() || IP_DECL_PATTERN.is_match(line) {
            continue;
        }

        let inst = Instruction::try_from(line)?;
        if let Some(seed) = last_inst.as_ref().and_then(|last| last.seed_after(&inst)) {
            return Ok(seed);
        }
        last_inst = Some(inst);
    }

    Err(Error::SeedNotFound)
}

#[test]
fn test_find_seed() {
    let program = "#ip 4\nseti 0 0 3\nbori 3 65536 1\nseti 6663054 1 3\nbani 1 255 5";
    assert!(matches!(find_seed(program.lines()), Ok(6663054)));

    let program = "#ip 4\nbori 3 65536 1\nseti 6663054 1 2";
    assert!(matches!(find_seed(program.lines()), Err(Error::SeedNotFound)));

    let program = "#ip 4\nbori 3 65536\nseti 6663054 1 3";
    assert!(matches!(
        find_seed(program.lines()),
        Err(Error::InvalidInstructionText(_))
    ));
}

pub fn read_seed<P: AsRef<Path>>(path: P) -> Result<usize> {
    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read given file({}).", path.as_ref().display()))?;
    find_seed(text.lines()).with_context(|| {
        format!(
            "Failed to find seed in program from given file({}).",
            path.as_ref().display()
        )
    })
}
