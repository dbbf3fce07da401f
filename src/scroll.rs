//! Values derived from the page's vertical scroll offset.

pub const DESKTOP_MEDIA_QUERY: &str = "(min-width: 768px)";

pub const BACKGROUND_FADE: Interpolation = Interpolation::new((0.0, 1_000.0), (0.0, 1.0));
pub const PROGRESS: Interpolation = Interpolation::new((0.0, 1_000.0), (0.0, 1.0));
pub const HERO_PARALLAX: Interpolation = Interpolation::new((0.0, 200.0), (0.0, 24.0));

pub const BACKGROUND_TOP: Rgba = Rgba::new(232, 241, 255, 1.0);
pub const BACKGROUND_BOTTOM: Rgba = Rgba::new(255, 255, 255, 1.0);

/// Linear map from an input range to an output range, clamped at both ends.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Interpolation {
    from: (f64, f64),
    to: (f64, f64),
}

impl Interpolation {
    pub const fn new(from: (f64, f64), to: (f64, f64)) -> Self {
        Self { from, to }
    }

    /// Position of `input` inside the input range, clamped to `[0, 1]`.
    pub fn progress(&self, input: f64) -> f64 {
        let span = self.from.1 - self.from.0;
        if span == 0.0 || !input.is_finite() {
            return 0.0;
        }
        ((input - self.from.0) / span).clamp(0.0, 1.0)
    }

    pub fn apply(&self, input: f64) -> f64 {
        let t = self.progress(input);
        self.to.0 + (self.to.1 - self.to.0) * t
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let channel = |from: u8, to: u8| {
            (f64::from(from) + (f64::from(to) - f64::from(from)) * t).round() as u8
        };

        Self {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

pub fn background_color(scroll_y: f64) -> Rgba {
    BACKGROUND_TOP.lerp(BACKGROUND_BOTTOM, BACKGROUND_FADE.progress(scroll_y))
}

/// Horizontal scale of the reading-progress bar, in `[0, 1]`.
pub fn progress_scale(scroll_y: f64) -> f64 {
    PROGRESS.apply(scroll_y)
}

/// Downward hero offset in px. Phones and reduced-motion visitors get none.
pub fn hero_parallax(scroll_y: f64, desktop: bool, reduced_motion: bool) -> f64 {
    if !desktop || reduced_motion {
        return 0.0;
    }
    HERO_PARALLAX.apply(scroll_y)
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ScrollStyles {
    pub background: Rgba,
    pub progress: f64,
    pub parallax_px: f64,
}

impl ScrollStyles {
    pub fn at(scroll_y: f64, desktop: bool, reduced_motion: bool) -> Self {
        Self {
            background: background_color(scroll_y),
            progress: progress_scale(scroll_y),
            parallax_px: hero_parallax(scroll_y, desktop, reduced_motion),
        }
    }

    pub fn main_style(&self) -> String {
        format!("background-color: {};", self.background.css())
    }

    pub fn indicator_style(&self) -> String {
        format!("transform: scaleX({:.4});", self.progress)
    }

    pub fn hero_style(&self) -> String {
        format!("transform: translateY({:.2}px);", self.parallax_px)
    }
}
