//! Draws step events as a single colored terminal line.

use colored::{ColoredString, Colorize};
use sortvis::prelude::*;

const BAR_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const MAX_BOX_PADDING: usize = 3;

/// Renders one step: every element drawn in `mode`, highlighted ones colored by kind.
pub fn render_step(step: &StepEvent<i64>, mode: VisualizationMode) -> String {
    let scale = Scale::of(&step.snapshot);
    step.snapshot
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let cell = draw_cell(value, mode, &scale);
            if step.is_highlighted(index) {
                paint(&cell, step.kind).to_string()
            } else {
                cell
            }
        })
        .collect::<Vec<_>>()
        .join(separator(mode))
}

/// Renders a sequence with nothing highlighted.
pub fn render_sequence(sequence: &[i64], mode: VisualizationMode) -> String {
    let scale = Scale::of(sequence);
    sequence
        .iter()
        .map(|&value| draw_cell(value, mode, &scale))
        .collect::<Vec<_>>()
        .join(separator(mode))
}

pub fn paint(text: &str, kind: HighlightKind) -> ColoredString {
    match kind {
        HighlightKind::Comparing => text.yellow().bold(),
        HighlightKind::Swapping => text.red().bold(),
        HighlightKind::Settled => text.green().bold(),
    }
}

fn separator(mode: VisualizationMode) -> &'static str {
    match mode {
        VisualizationMode::Bars => "",
        VisualizationMode::Boxes | VisualizationMode::SizedBoxes => " ",
    }
}

/// Value range of the sequence being drawn, used to size bars and boxes.
struct Scale {
    min: i64,
    max: i64,
    width: usize,
}

impl Scale {
    fn of(values: &[i64]) -> Self {
        let min = values.iter().copied().min().unwrap_or(0);
        let max = values.iter().copied().max().unwrap_or(0);
        let width = values
            .iter()
            .map(|value| value.to_string().len())
            .max()
            .unwrap_or(1);
        Self { min, max, width }
    }

    /// Where `value` sits in the range, from `0` to `steps - 1`.
    fn level(&self, value: i64, steps: usize) -> usize {
        if self.max == self.min || steps <= 1 {
            return steps.saturating_sub(1);
        }
        let span = i128::from(self.max) - i128::from(self.min);
        let offset = (i128::from(value) - i128::from(self.min)) as f64 / span as f64;
        ((offset * (steps - 1) as f64).round() as usize).min(steps - 1)
    }
}

fn draw_cell(value: i64, mode: VisualizationMode, scale: &Scale) -> String {
    match mode {
        VisualizationMode::Boxes => format!("[{:>width$}]", value, width = scale.width),
        VisualizationMode::Bars => BAR_LEVELS[scale.level(value, BAR_LEVELS.len())].to_string(),
        VisualizationMode::SizedBoxes => {
            let pad = " ".repeat(scale.level(value, MAX_BOX_PADDING + 1));
            format!("[{pad}{value}{pad}]")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxes_are_right_aligned_to_the_widest_value() {
        assert_eq!(
            render_sequence(&[5, 120, 42], VisualizationMode::Boxes),
            "[  5] [120] [ 42]"
        );
    }

    #[test]
    fn bars_follow_the_value_range() {
        assert_eq!(render_sequence(&[1, 8, 4], VisualizationMode::Bars), "▁█▄");
        assert_eq!(render_sequence(&[3, 3], VisualizationMode::Bars), "██");
        assert_eq!(render_sequence(&[], VisualizationMode::Bars), "");
    }

    #[test]
    fn sized_boxes_grow_with_the_value() {
        assert_eq!(
            render_sequence(&[1, 10], VisualizationMode::SizedBoxes),
            "[1] [   10   ]"
        );
    }

    #[test]
    fn bars_cope_with_the_full_i64_range() {
        assert_eq!(
            render_sequence(&[i64::MIN, 0, i64::MAX], VisualizationMode::Bars),
            "▁▅█"
        );
    }

    #[test]
    fn highlighted_cells_are_painted_by_kind() {
        let step = StepEvent::new(vec![3, 1, 2], &[0, 1], HighlightKind::Swapping);
        let line = render_step(&step, VisualizationMode::Boxes);
        assert!(line.contains(&"[3]".red().bold().to_string()));
        assert!(line.contains(&"[1]".red().bold().to_string()));
        assert!(line.ends_with(" [2]"));
    }
}
