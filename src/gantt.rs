//! Gantt chart derivation.
//!
//! Turns an [`ExecutionPlan`] into the chart payload consumed by the
//! presentation layer: one dataset per plan entry, each a single bar
//! `[start, start + duration)` on its own row, colored by task priority.

use serde::{Deserialize, Serialize};

use crate::models::{ExecutionPlan, TaskId};

/// Bar border width in pixels.
pub const BORDER_WIDTH: u32 = 2;

/// Fill and border colors for one priority tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierColor {
    /// Bar fill.
    pub background: &'static str,
    /// Bar outline.
    pub border: &'static str,
}

const PALETTE: [TierColor; 5] = [
    // 1: red
    TierColor {
        background: "#dc3545",
        border: "#b02a37",
    },
    // 2: orange
    TierColor {
        background: "#fd7e14",
        border: "#d63384",
    },
    // 3: yellow
    TierColor {
        background: "#ffc107",
        border: "#d39e00",
    },
    // 4: teal
    TierColor {
        background: "#20c997",
        border: "#1aa179",
    },
    // 5: purple
    TierColor {
        background: "#6f42c1",
        border: "#59359a",
    },
];

const GRAY: TierColor = TierColor {
    background: "#6c757d",
    border: "#545b62",
};

/// Colors for a priority value. Anything outside 1..=5 is gray.
pub fn priority_color(priority: i32) -> TierColor {
    usize::try_from(priority)
        .ok()
        .and_then(|p| p.checked_sub(1))
        .and_then(|i| PALETTE.get(i))
        .copied()
        .unwrap_or(GRAY)
}

/// One bar in a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttPoint {
    /// `[start, end]` of the bar.
    pub x: [i64; 2],
    /// Row index (position of the entry in the plan).
    pub y: usize,
    /// Source task.
    pub task_id: TaskId,
    /// Source task priority.
    pub priority: i32,
    /// Bar length.
    pub duration: i64,
}

/// One plan entry rendered as a chart dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttDataset {
    /// Task name.
    pub label: String,
    /// Bars (always one per entry).
    pub data: Vec<GanttPoint>,
    /// Fill color.
    pub background_color: String,
    /// Outline color.
    pub border_color: String,
    /// Outline width.
    pub border_width: u32,
}

/// Chart payload for a whole plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttChart {
    /// Row labels (task names, one per entry).
    pub labels: Vec<String>,
    /// One dataset per entry.
    pub datasets: Vec<GanttDataset>,
    /// Makespan.
    pub total_time: i64,
    /// Scheduler label (e.g. `"PriorityScheduler"`).
    pub algorithm: String,
}

impl GanttChart {
    /// Builds the chart for a plan.
    pub fn from_plan(plan: &ExecutionPlan<'_>) -> Self {
        let mut labels = Vec::with_capacity(plan.len());
        let mut datasets = Vec::with_capacity(plan.len());

        for (row, entry) in plan.entries.iter().enumerate() {
            let task = entry.task;
            let color = priority_color(task.priority);

            labels.push(task.name.clone());
            datasets.push(GanttDataset {
                label: task.name.clone(),
                data: vec![GanttPoint {
                    x: [entry.start_time, entry.completion_time()],
                    y: row,
                    task_id: task.id,
                    priority: task.priority,
                    duration: entry.duration,
                }],
                background_color: color.background.to_string(),
                border_color: color.border.to_string(),
                border_width: BORDER_WIDTH,
            });
        }

        Self {
            labels,
            datasets,
            total_time: plan.total_time,
            algorithm: plan.algorithm.label().to_string(),
        }
    }

    /// Empty chart tagged with an arbitrary algorithm name.
    pub fn empty(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            ..Default::default()
        }
    }
}

impl From<&ExecutionPlan<'_>> for GanttChart {
    fn from(plan: &ExecutionPlan<'_>) -> Self {
        Self::from_plan(plan)
    }
}
