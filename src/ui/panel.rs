// src/ui/panel.rs
//! Debug panel for the holiday scene
//!
//! Three color pickers and six position sliders, plus a collapsed
//! statistics section.

use crate::{gfx::scene::SceneStatistics, holiday::DebugParameters};

/// Draws the debug panel and edits `params` in place
///
/// # Arguments
/// * `ui` - ImGui UI context
/// * `params` - Values to edit; callers apply them when this returns true
/// * `slider_range` - Symmetric bound of the position sliders
/// * `stats` - Scene totals shown under "Scene"
///
/// # Returns
/// True if any control changed this frame
pub fn debug_panel(
    ui: &imgui::Ui,
    params: &mut DebugParameters,
    slider_range: f32,
    stats: &SceneStatistics,
) -> bool {
    let display_size = ui.io().display_size;
    // Guard against invalid display size that could cause crashes
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return false;
    }
    let panel_width = (display_size[0] * 0.25).clamp(260.0, 360.0);

    ui.window("Controls")
        .size([panel_width, 0.0], imgui::Condition::FirstUseEver)
        .position(
            [display_size[0] - panel_width - 15.0, 15.0],
            imgui::Condition::FirstUseEver,
        )
        .always_auto_resize(true)
        .collapsible(true)
        .build(|| {
            let mut changed = render_colors(ui, params);
            ui.separator();
            changed |= render_position(ui, "Tree", "tree", &mut params.tree_position, slider_range);
            changed |=
                render_position(ui, "Stump", "stump", &mut params.stump_position, slider_range);
            render_statistics(ui, stats);
            changed
        })
        .unwrap_or(false)
}

fn render_colors(ui: &imgui::Ui, params: &mut DebugParameters) -> bool {
    let mut changed = ui.color_edit3("floorColor", &mut params.floor_color);
    changed |= ui.color_edit3("treeColor", &mut params.tree_color);
    changed |= ui.color_edit3("stumpColor", &mut params.stump_color);
    changed
}

/// x/y/z sliders for one object; ids are suffixed so labels can repeat
fn render_position(
    ui: &imgui::Ui,
    title: &str,
    id: &str,
    position: &mut [f32; 3],
    range: f32,
) -> bool {
    ui.text(title);
    let mut changed = false;
    for (axis, value) in ["x", "y", "z"].iter().zip(position.iter_mut()) {
        changed |= ui.slider(format!("{axis}##{id}_{axis}"), -range, range, value);
    }
    changed
}

fn render_statistics(ui: &imgui::Ui, stats: &SceneStatistics) {
    if ui.collapsing_header("Scene", imgui::TreeNodeFlags::empty()) {
        ui.columns(2, "stats", false);
        for (label, value) in [
            ("Objects:", stats.object_count as u32),
            ("Materials:", stats.material_count as u32),
            ("Triangles:", stats.total_triangles),
            ("Vertices:", stats.total_vertices),
        ] {
            ui.text(label);
            ui.next_column();
            ui.text(format!("{}", value));
            ui.next_column();
        }
        ui.columns(1, "", false);
        ui.text_disabled("Shift+C resets the camera");
    }
}
