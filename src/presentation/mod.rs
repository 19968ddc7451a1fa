// Presentation layer - hand-off to the host renderer
pub mod pane_tasks;
