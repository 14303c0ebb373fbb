pub trait Lerp {
    fn lerp(self, target: Self, t: Self) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, target: f32, t: f32) -> f32 {
        (1.0 - t) * self + t * target
    }
}

/// Step one unit from `from` towards `to`.
pub fn step_towards(from: usize, to: usize) -> usize {
    match to.cmp(&from) {
        std::cmp::Ordering::Greater => from + 1,
        std::cmp::Ordering::Less => from - 1,
        std::cmp::Ordering::Equal => from,
    }
}
