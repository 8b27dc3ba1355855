//! Interaction controller: the single owner of mutable chart state.
//!
//! State changes arrive as [`Action`]s. Each applied action bumps the
//! revision counter; readers re-flatten and repaint from scratch, so there
//! is no derived state to invalidate.

use tracing::debug;

use crate::flatten::{ExpandedSet, FlatRow, flatten};
use crate::hit_test::{TaskTooltip, hit_test};
use crate::layout::ChartMetrics;
use crate::model::Task;
use crate::render::{Surface, render};
use crate::timeline::{Bounds, ViewTransform, compute_bounds};

/// Default horizontal pan step in pixels.
pub const DEFAULT_PAN_STEP: f64 = 50.0;

/// A state change requested by the user or the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ZoomIn,
    ZoomOut,
    /// Move the content right (offset grows).
    PanLeft,
    /// Move the content left (offset shrinks).
    PanRight,
    Toggle(String),
    ExpandAll,
    CollapseAll,
    /// Restore scale 1.0 and offset 0.
    ResetView,
    Resize {
        width: f64,
        height: f64,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerLeave,
}

/// Size of the drawing viewport in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Viewport {
    /// Whether a pixel lies on the drawn area.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

/// Owns the forest, expand/collapse state, view transform and hover state.
#[derive(Debug, Clone)]
pub struct Controller {
    forest: Vec<Task>,
    expanded: ExpandedSet,
    transform: ViewTransform,
    metrics: ChartMetrics,
    viewport: Viewport,
    pan_step: f64,
    pointer: Option<(f64, f64)>,
    hovered: Option<String>,
    revision: u64,
}

static_assertions::assert_impl_all!(Controller: Send, Sync);

impl Controller {
    /// Create a controller over `forest` with the given initial expansion.
    pub fn new(forest: Vec<Task>, expanded: ExpandedSet) -> Self {
        Self {
            forest,
            expanded,
            transform: ViewTransform::default(),
            metrics: ChartMetrics::default(),
            viewport: Viewport::default(),
            pan_step: DEFAULT_PAN_STEP,
            pointer: None,
            hovered: None,
            revision: 0,
        }
    }

    /// Override the chart metrics.
    pub fn with_metrics(mut self, metrics: ChartMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Override the pan step.
    pub fn with_pan_step(mut self, pan_step: f64) -> Self {
        self.pan_step = pan_step;
        self
    }

    pub fn forest(&self) -> &[Task] {
        &self.forest
    }

    pub fn expanded(&self) -> &ExpandedSet {
        &self.expanded
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn metrics(&self) -> &ChartMetrics {
        &self.metrics
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pan_step(&self) -> f64 {
        self.pan_step
    }

    /// Number of actions applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Visible rows, recomputed from the forest and expanded set.
    pub fn rows(&self) -> Vec<FlatRow<'_>> {
        flatten(&self.forest, &self.expanded)
    }

    /// Date bounds of the visible rows.
    pub fn bounds(&self) -> Option<Bounds> {
        compute_bounds(&self.rows())
    }

    /// The task currently under the pointer, if any.
    pub fn hovered_task(&self) -> Option<&Task> {
        let id = self.hovered.as_deref()?;
        self.rows()
            .into_iter()
            .find(|row| row.task.id == id)
            .map(|row| row.task)
    }

    /// Tooltip for the hovered task.
    pub fn tooltip(&self) -> Option<TaskTooltip> {
        self.hovered_task().map(TaskTooltip::from_task)
    }

    /// Find the visible row under a pixel position.
    pub fn row_at(&self, x: f64, y: f64) -> Option<FlatRow<'_>> {
        let rows = self.rows();
        let bounds = compute_bounds(&rows)?;
        let index = hit_test(&rows, &bounds, &self.transform, &self.metrics, x, y)?;
        rows.get(index).copied()
    }

    /// Paint the current state onto `surface`.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        let rows = self.rows();
        let bounds = compute_bounds(&rows);
        render(
            surface,
            &rows,
            bounds.as_ref(),
            &self.transform,
            &self.metrics,
        );
    }

    /// Apply a state change.
    pub fn apply(&mut self, action: Action) {
        debug!("Applying action {:?}", action);

        match action {
            Action::ZoomIn => self.transform = self.transform.zoomed_in(),
            Action::ZoomOut => self.transform = self.transform.zoomed_out(),
            Action::PanLeft => self.transform = self.transform.panned(self.pan_step),
            Action::PanRight => self.transform = self.transform.panned(-self.pan_step),
            Action::Toggle(id) => self.expanded.toggle(&id),
            Action::ExpandAll => self.expanded.expand_all(&self.forest),
            Action::CollapseAll => self.expanded.collapse_all(),
            Action::ResetView => self.transform = ViewTransform::default(),
            Action::Resize { width, height } => self.viewport = Viewport { width, height },
            Action::PointerMove { x, y } => self.pointer = Some((x, y)),
            Action::PointerLeave => self.pointer = None,
        }

        self.revision += 1;
        self.refresh_hover();
    }

    pub fn zoom_in(&mut self) {
        self.apply(Action::ZoomIn);
    }

    pub fn zoom_out(&mut self) {
        self.apply(Action::ZoomOut);
    }

    pub fn pan_left(&mut self) {
        self.apply(Action::PanLeft);
    }

    pub fn pan_right(&mut self) {
        self.apply(Action::PanRight);
    }

    pub fn toggle(&mut self, id: &str) {
        self.apply(Action::Toggle(id.to_string()));
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.apply(Action::Resize { width, height });
    }

    /// Record the pointer position and return the task under it.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<&Task> {
        self.apply(Action::PointerMove { x, y });
        self.hovered_task()
    }

    /// Re-run the hover hit-test against the current layout.
    ///
    /// Bars outside the viewport are not drawn, so they are not hovered.
    fn refresh_hover(&mut self) {
        let hovered = self
            .pointer
            .filter(|&(x, y)| self.viewport.contains(x, y))
            .and_then(|(x, y)| self.row_at(x, y))
            .map(|row| row.task.id.clone());
        self.hovered = hovered;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::CellGrid;
    use crate::model::{Rgb, sample_forest};
    use crate::render::RecordingSurface;
    use crate::timeline::{MAX_SCALE, MIN_SCALE};
    use chrono::NaiveDate;

    fn day(month: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, month, d).unwrap()
    }

    fn two_level() -> Vec<Task> {
        let color = Rgb::new(0, 0, 0);
        vec![
            Task::new("root", "Root", day(1, 1), day(1, 31), color).with_children([
                Task::new("c1", "Child 1", day(1, 1), day(1, 10), color),
                Task::new("c2", "Child 2", day(1, 11), day(1, 31), color),
            ]),
        ]
    }

    fn row_ids(controller: &Controller) -> Vec<String> {
        controller
            .rows()
            .iter()
            .map(|row| row.task.id.clone())
            .collect()
    }

    #[test]
    fn test_new_controller_defaults() {
        let controller = Controller::new(two_level(), ExpandedSet::new());
        assert_eq!(controller.transform(), ViewTransform::default());
        assert_eq!(controller.viewport(), Viewport::default());
        assert_eq!(controller.pan_step(), DEFAULT_PAN_STEP);
        assert_eq!(controller.revision(), 0);
        assert!(controller.hovered_task().is_none());
    }

    #[test]
    fn test_zoom_in_clamps() {
        let mut controller = Controller::new(two_level(), ExpandedSet::new());
        for _ in 0..20 {
            controller.zoom_in();
        }
        assert_eq!(controller.transform().scale, MAX_SCALE);
    }

    #[test]
    fn test_zoom_out_clamps() {
        let mut controller = Controller::new(two_level(), ExpandedSet::new());
        for _ in 0..20 {
            controller.zoom_out();
        }
        assert_eq!(controller.transform().scale, MIN_SCALE);
    }

    #[test]
    fn test_pan_left_and_right() {
        let mut controller = Controller::new(two_level(), ExpandedSet::new());
        controller.pan_left();
        assert_eq!(controller.transform().offset, 50.0);
        controller.pan_right();
        controller.pan_right();
        assert_eq!(controller.transform().offset, -50.0);
    }

    #[test]
    fn test_custom_pan_step() {
        let mut controller = Controller::new(two_level(), ExpandedSet::new()).with_pan_step(7.5);
        controller.pan_left();
        assert_eq!(controller.transform().offset, 7.5);
    }

    #[test]
    fn test_reset_view() {
        let mut controller = Controller::new(two_level(), ExpandedSet::new());
        controller.zoom_in();
        controller.pan_right();
        controller.apply(Action::ResetView);
        assert_eq!(controller.transform(), ViewTransform::default());
    }

    #[test]
    fn test_toggle_changes_rows() {
        let mut controller = Controller::new(two_level(), ExpandedSet::new());
        assert_eq!(row_ids(&controller), vec!["root"]);

        controller.toggle("root");
        assert_eq!(row_ids(&controller), vec!["root", "c1", "c2"]);

        controller.toggle("root");
        assert_eq!(row_ids(&controller), vec!["root"]);
    }

    #[test]
    fn test_expand_all_and_collapse_all() {
        let mut controller = Controller::new(sample_forest(), ExpandedSet::new());
        controller.apply(Action::ExpandAll);
        assert_eq!(controller.rows().len(), 10);

        controller.apply(Action::CollapseAll);
        assert_eq!(controller.rows().len(), 2);
    }

    #[test]
    fn test_every_action_bumps_revision() {
        let mut controller = Controller::new(two_level(), ExpandedSet::new());
        controller.zoom_in();
        controller.pan_left();
        controller.toggle("root");
        controller.resize(100.0, 100.0);
        controller.apply(Action::PointerLeave);
        assert_eq!(controller.revision(), 5);
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut controller = Controller::new(two_level(), ExpandedSet::new());
        controller.resize(1024.0, 300.0);
        assert_eq!(
            controller.viewport(),
            Viewport {
                width: 1024.0,
                height: 300.0
            }
        );
    }

    #[test]
    fn test_viewport_contains() {
        let viewport = Viewport {
            width: 100.0,
            height: 50.0,
        };
        assert!(viewport.contains(0.0, 0.0));
        assert!(viewport.contains(100.0, 50.0));
        assert!(!viewport.contains(-1.0, 10.0));
        assert!(!viewport.contains(10.0, 50.5));
    }

    #[test]
    fn test_hover_limited_to_viewport() {
        let mut controller = Controller::new(two_level(), ExpandedSet::with_roots(&two_level()));
        controller.pointer_move(50.0, 100.0);
        assert!(controller.hovered_task().is_some());

        // Shrinking the viewport hides the row under the pointer
        controller.resize(200.0, 80.0);
        assert!(controller.hovered_task().is_none());

        controller.resize(200.0, 200.0);
        assert_eq!(
            controller.hovered_task().map(|task| task.id.as_str()),
            Some("c1")
        );
    }

    #[test]
    fn test_with_metrics_drives_hit_testing() {
        let metrics = ChartMetrics {
            cell_grid: Some(CellGrid {
                width: 8.0,
                height: 16.0,
            }),
            ..ChartMetrics::default()
        };
        let mut controller = Controller::new(two_level(), ExpandedSet::new()).with_metrics(metrics);
        assert_eq!(controller.metrics(), &metrics);

        // Above the exact bar (y 40) but inside its snapped cell row (y 32)
        let hovered = controller.pointer_move(4.0, 36.0).map(|task| task.id.clone());
        assert_eq!(hovered.as_deref(), Some("root"));
    }

    #[test]
    fn test_pointer_move_hovers_bar() {
        let mut controller = Controller::new(two_level(), ExpandedSet::with_roots(&two_level()));

        // Row 1 (c1) spans x 0..180, y 90..130
        let hovered = controller.pointer_move(50.0, 100.0).map(|task| task.id.clone());
        assert_eq!(hovered.as_deref(), Some("c1"));

        let tooltip = controller.tooltip().unwrap();
        assert_eq!(tooltip.name, "Child 1");
    }

    #[test]
    fn test_pointer_move_over_empty_space() {
        let mut controller = Controller::new(two_level(), ExpandedSet::new());
        assert!(controller.pointer_move(5.0, 5.0).is_none());
        assert!(controller.tooltip().is_none());
    }

    #[test]
    fn test_hover_follows_layout_changes() {
        let mut controller = Controller::new(two_level(), ExpandedSet::with_roots(&two_level()));
        controller.pointer_move(50.0, 100.0);
        assert!(controller.hovered_task().is_some());

        // Collapsing removes the row under the pointer
        controller.toggle("root");
        assert!(controller.hovered_task().is_none());

        // Panning far away also clears hover
        controller.toggle("root");
        assert!(controller.hovered_task().is_some());
        for _ in 0..4 {
            controller.apply(Action::PanRight);
        }
        assert!(controller.hovered_task().is_none());
    }

    #[test]
    fn test_pointer_leave_clears_hover() {
        let mut controller = Controller::new(two_level(), ExpandedSet::with_roots(&two_level()));
        controller.pointer_move(50.0, 100.0);
        controller.apply(Action::PointerLeave);
        assert!(controller.hovered_task().is_none());
    }

    #[test]
    fn test_render_uses_current_state() {
        let mut controller = Controller::new(two_level(), ExpandedSet::new());
        let mut surface = RecordingSurface::new(800.0, 600.0);

        controller.render(&mut surface);
        assert_eq!(surface.bars().len(), 1);

        controller.toggle("root");
        controller.render(&mut surface);
        assert_eq!(surface.bars().len(), 3);
    }

    #[test]
    fn test_render_empty_forest() {
        let controller = Controller::new(Vec::new(), ExpandedSet::new());
        let mut surface = RecordingSurface::new(800.0, 600.0);
        controller.render(&mut surface);
        assert!(surface.bars().is_empty());
        assert!(controller.bounds().is_none());
    }
}
