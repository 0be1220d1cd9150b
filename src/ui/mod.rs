/// Rendering of an [`AppState`](crate::state::AppState); no analysis happens here.
pub mod heatmap;
pub mod panels;
