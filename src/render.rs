//! Draw list for the current frame
//!
//! The simulation never talks to a canvas. Each frame it hands out a list of
//! circles to paint and whoever owns the canvas paints them.

use glam::DVec2;

use crate::consts::{CLICKER_LINE_WIDTH, COLLISION_LINE_WIDTH};
use crate::settings::Mode;
use crate::sim::{Body, Color, SimState};

/// One circle to paint
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub center: DVec2,
    pub radius: f64,
    /// Interior color, `None` for an outline only
    pub fill: Option<Color>,
    pub stroke: Color,
    pub line_width: f64,
    /// Text centered on the circle, drawn in the stroke color
    pub label: Option<String>,
}

/// Collision bodies: outline plus label, both in the active color
fn outline(body: &Body) -> DrawCommand {
    DrawCommand {
        center: body.pos,
        radius: body.radius,
        fill: None,
        stroke: body.color,
        line_width: COLLISION_LINE_WIDTH,
        label: body.label.clone(),
    }
}

/// Clicker chips: filled center with a thick contrasting border
fn chip(body: &Body) -> DrawCommand {
    DrawCommand {
        center: body.pos,
        radius: body.radius,
        fill: Some(body.color),
        stroke: body.border_color,
        line_width: CLICKER_LINE_WIDTH,
        label: None,
    }
}

/// Build the draw list in body order
pub fn draw_list(state: &SimState) -> Vec<DrawCommand> {
    let shape = match state.mode() {
        Mode::Collision => outline,
        Mode::Clicker => chip,
    };
    state.bodies.iter().map(shape).collect()
}
