use rand::Rng;
use rand::rngs::{SmallRng, StdRng};

/// Uniform index source behind every random choice the dashboard makes.
pub trait RandomSource {
    /// Uniform index in `0..upper`. `upper` is always at least 1.
    fn next_index(&mut self, upper: usize) -> usize;
}

impl RandomSource for SmallRng {
    fn next_index(&mut self, upper: usize) -> usize {
        self.gen_range(0..upper)
    }
}

impl RandomSource for StdRng {
    fn next_index(&mut self, upper: usize) -> usize {
        self.gen_range(0..upper)
    }
}

/// Replays a fixed index sequence once, reduced modulo `upper`.
///
/// Panics when a draw is requested past the end of the script, so a test that
/// keeps hitting the rejection loop fails instead of spinning.
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct ScriptedSource {
    script: Vec<usize>,
    calls: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub(crate) fn new(script: Vec<usize>) -> Self {
        Self { script, calls: 0 }
    }

    /// How many indices have been drawn so far.
    pub(crate) fn calls(&self) -> usize {
        self.calls
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn next_index(&mut self, upper: usize) -> usize {
        let Some(&v) = self.script.get(self.calls) else {
            panic!(
                "scripted random source exhausted after {} draws",
                self.script.len()
            );
        };
        self.calls += 1;
        v % upper.max(1)
    }
}

/// Rejection sampling against the immediately preceding draw only.
///
/// Redraws while the index equals `previous`. With `upper < 2` a repeat is
/// unavoidable and index 0 is returned without consuming entropy.
pub fn draw_distinct_from_previous<R: RandomSource + ?Sized>(
    rng: &mut R,
    upper: usize,
    previous: Option<usize>,
) -> usize {
    if upper < 2 {
        return 0;
    }
    loop {
        let i = rng.next_index(upper);
        if Some(i) != previous {
            return i;
        }
    }
}
