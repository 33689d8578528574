//! Session progression and long-running work labels.

use serde::Serialize;
use std::fmt;

/// How far a conversion session has progressed.
///
/// Steps are strictly ordered; an operation that needs the output of a step
/// is only legal once the session has reached it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Empty,
    PaletteReady,
    ImageLoaded,
    Converted,
    Built,
}

impl Step {
    /// The step one below this one, or `None` at the bottom.
    pub fn previous(self) -> Option<Step> {
        match self {
            Step::Empty => None,
            Step::PaletteReady => Some(Step::Empty),
            Step::ImageLoaded => Some(Step::PaletteReady),
            Step::Converted => Some(Step::ImageLoaded),
            Step::Built => Some(Step::Converted),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Empty => "empty",
            Step::PaletteReady => "palette ready",
            Step::ImageLoaded => "image loaded",
            Step::Converted => "converted",
            Step::Built => "built",
        };
        f.write_str(name)
    }
}

/// Label for the long operation currently running, shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    Idle,
    CollectingColors,
    Converting,
    Dithering,
    BuildingHeightMap,
    Compressing,
    ConstructingBridges,
    Building3D,
    FlippingToWall,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_ordered() {
        assert!(Step::Empty < Step::PaletteReady);
        assert!(Step::Converted < Step::Built);
    }

    #[test]
    fn previous_walks_down_to_empty() {
        let mut step = Step::Built;
        let mut seen = vec![step];
        while let Some(prev) = step.previous() {
            step = prev;
            seen.push(step);
        }
        assert_eq!(
            seen,
            vec![
                Step::Built,
                Step::Converted,
                Step::ImageLoaded,
                Step::PaletteReady,
                Step::Empty
            ]
        );
    }
}
