use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

pub const FACES: u8 = 6;
pub const BUST_FACE: u8 = 1;

/// Source of six-sided die rolls.
pub trait Dice {
    /// Returns a face in `1..=6`.
    fn roll(&mut self) -> u8;
}

impl<D: Dice + ?Sized> Dice for &mut D {
    fn roll(&mut self) -> u8 {
        (**self).roll()
    }
}

impl<D: Dice + ?Sized> Dice for Box<D> {
    fn roll(&mut self) -> u8 {
        (**self).roll()
    }
}

/// A fair die driven by any `rand` generator.
#[derive(Debug, Clone)]
pub struct Die<R = StdRng> {
    rng: R,
}

impl Die<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Die<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Dice for Die<R> {
    fn roll(&mut self) -> u8 {
        self.rng.gen_range(1..=FACES)
    }
}

/// Replays a fixed sequence of faces. Once the script runs out every roll is a
/// bust, so an automated turn fed by an exhausted script still terminates.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    faces: VecDeque<u8>,
}

impl ScriptedDice {
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        Self {
            faces: faces
                .into_iter()
                .map(|face| face.clamp(1, FACES))
                .collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.faces.len()
    }

    pub fn push(&mut self, face: u8) {
        self.faces.push_back(face.clamp(1, FACES));
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> u8 {
        self.faces.pop_front().unwrap_or(BUST_FACE)
    }
}
