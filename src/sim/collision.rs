//! Collision detection for the bird
//!
//! Everything is axis-aligned: the bird, both pipes and the viewport are
//! rectangles, and overlaps are strict (touching edges never collide).

use super::rect::Rect;
use super::state::Viewport;

/// Which boundary the bird left the viewport through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Floor,
    Ceiling,
}

/// Which pipe the bird hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeHit {
    Top,
    Bottom,
}

/// Check whether the bird has touched or crossed the top or bottom of the
/// viewport. Reaching an edge exactly counts as leaving.
pub fn bird_bounds_check(bird: &Rect, viewport: Viewport) -> Option<Boundary> {
    if bird.bottom >= viewport.height_f() {
        Some(Boundary::Floor)
    } else if bird.top <= 0.0 {
        Some(Boundary::Ceiling)
    } else {
        None
    }
}

/// Check the bird against both pipes of the active pair. Pipes without area
/// (no pipe sprite) are not obstacles.
pub fn bird_pipe_collision(bird: &Rect, top_pipe: &Rect, bottom_pipe: &Rect) -> Option<PipeHit> {
    if !top_pipe.is_empty() && bird.overlaps(top_pipe) {
        Some(PipeHit::Top)
    } else if !bottom_pipe.is_empty() && bird.overlaps(bottom_pipe) {
        Some(PipeHit::Bottom)
    } else {
        None
    }
}
