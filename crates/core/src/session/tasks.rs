use crate::render::Outcome;

/// Deferred steps the session schedules on its virtual clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SettleTask {
    /// The opening preview is over; unlock the grid.
    EndPreview,
    /// Turn a mismatched pair back face down.
    FlipBack { first: usize, second: usize },
    /// Open the result dialog once the last animation settled.
    ShowResult(Outcome),
}
