pub const DEFAULT_DELAY_MS: u32 = 100;
pub const HERO_DELAY_MS: u32 = 80;

/// Reveals a fixed string one character per `delay_ms`.
///
/// Counts Unicode scalar values, not bytes, so Japanese copy reveals a
/// whole character at a time.
#[derive(Clone, PartialEq, Debug)]
pub struct Typewriter {
    source: String,
    chars: usize,
    revealed: usize,
    delay_ms: u32,
}

impl Typewriter {
    pub fn new(source: impl Into<String>, delay_ms: u32) -> Self {
        let source = source.into();
        Self {
            chars: source.chars().count(),
            source,
            revealed: 0,
            delay_ms: delay_ms.max(1),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    pub fn is_done(&self) -> bool {
        self.revealed >= self.chars
    }

    pub fn prefix(&self) -> &str {
        prefix_of(&self.source, self.revealed)
    }

    /// Reveals one more character. Returns `false` once the text is complete.
    pub fn advance(&mut self) -> bool {
        if self.is_done() {
            return false;
        }
        self.revealed += 1;
        true
    }

    /// Jumps to the state reached `elapsed_ms` after the reveal started.
    pub fn seek(&mut self, elapsed_ms: u64) {
        self.revealed = revealed_count_at(self.chars, self.delay_ms, elapsed_ms);
    }

    /// Swaps in new text. An unchanged source keeps its progress; anything
    /// else starts over from an empty prefix.
    pub fn set_source(&mut self, source: &str) -> bool {
        if self.source == source {
            return false;
        }
        *self = Self::new(source, self.delay_ms);
        true
    }
}

/// `min(len, floor(elapsed / delay))`.
pub fn revealed_count_at(len: usize, delay_ms: u32, elapsed_ms: u64) -> usize {
    let steps = elapsed_ms / u64::from(delay_ms.max(1));
    usize::try_from(steps).map_or(len, |steps| steps.min(len))
}

pub fn revealed_at(source: &str, delay_ms: u32, elapsed_ms: u64) -> &str {
    let count = revealed_count_at(source.chars().count(), delay_ms, elapsed_ms);
    prefix_of(source, count)
}

fn prefix_of(source: &str, count: usize) -> &str {
    match source.char_indices().nth(count) {
        Some((index, _)) => &source[..index],
        None => source,
    }
}
