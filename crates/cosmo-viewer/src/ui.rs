// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! egui rendering of the control panel.
//!
//! Widgets edit copies of the panel values and report interactions as
//! [`PanelInput`]s; the caller applies them through the session.

use cosmo_app_core::toast::{ToastKind, ToastRender};
use cosmo_scene_port::{EnvironmentPreset, SceneMode};
use egui::{CollapsingHeader, ComboBox, Slider, Ui};

use crate::{ControlPanel, Folder, PanelInput, Param, ParamValue};

fn param_widget(ui: &mut Ui, panel: &ControlPanel, param: Param, out: &mut Vec<PanelInput>) {
    match panel.get(param) {
        ParamValue::Bool(mut b) => {
            if ui.checkbox(&mut b, param.label()).changed() {
                out.push(PanelInput::Set(param, ParamValue::Bool(b)));
            }
        }
        ParamValue::Number(mut v) => {
            let Some(range) = param.range() else {
                return;
            };
            let slider = Slider::new(&mut v, range.min..=range.max)
                .step_by(f64::from(range.step))
                .text(param.label());
            if ui.add(slider).changed() {
                out.push(PanelInput::Set(param, ParamValue::Number(v)));
            }
        }
        ParamValue::Mode(current) => {
            let mut picked = current;
            ComboBox::from_id_salt(param.key())
                .selected_text(current.label())
                .show_ui(ui, |ui| {
                    for m in SceneMode::ALL {
                        ui.selectable_value(&mut picked, m, m.label());
                    }
                });
            if picked != current {
                out.push(PanelInput::Set(param, ParamValue::Mode(picked)));
            }
        }
        ParamValue::Preset(current) => {
            let mut picked = current;
            ComboBox::from_id_salt(param.key())
                .selected_text(current.map_or("None", EnvironmentPreset::label))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut picked, None, "None");
                    for p in EnvironmentPreset::ALL {
                        ui.selectable_value(&mut picked, Some(p), p.label());
                    }
                });
            if picked != current {
                out.push(PanelInput::Set(param, ParamValue::Preset(picked)));
            }
        }
    }
}

/// Draw every folder plus the Actions row. Returns the interactions made this frame.
pub fn control_panel_ui(ui: &mut Ui, panel: &ControlPanel) -> Vec<PanelInput> {
    let mut out = Vec::new();
    for folder in Folder::ALL {
        CollapsingHeader::new(folder.label())
            .default_open(matches!(folder, Folder::Scene | Folder::Lighting))
            .show(ui, |ui| {
                for param in Param::in_folder(folder) {
                    param_widget(ui, panel, param, &mut out);
                }
            });
    }
    CollapsingHeader::new("Actions")
        .default_open(true)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Recenter").clicked() {
                    out.push(PanelInput::Recenter);
                }
                if ui.button("Reset lighting").clicked() {
                    out.push(PanelInput::ResetLighting);
                }
            });
        });
    out
}

/// Stack of active toasts, newest last.
pub fn toast_stack_ui(ui: &mut Ui, toasts: &[ToastRender]) {
    for t in toasts {
        let tag = match t.kind {
            ToastKind::Info => "info",
            ToastKind::Warn => "warn",
            ToastKind::Error => "error",
        };
        ui.label(format!("[{tag}] {}", t.title));
        if let Some(body) = &t.body {
            ui.small(body);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use cosmo_app_core::toast::ToastService;

    use super::*;

    #[test]
    fn idle_frame_reports_no_inputs() {
        let ctx = egui::Context::default();
        let panel = ControlPanel::new();
        let mut inputs = vec![PanelInput::Recenter];
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                inputs = control_panel_ui(ui, &panel);
            });
        });
        assert!(inputs.is_empty());
    }

    #[test]
    fn toast_stack_renders_without_input() {
        let ctx = egui::Context::default();
        let now = Instant::now();
        let mut toasts = ToastService::new(4);
        toasts.push(ToastKind::Warn, "Prefs", Some("not persisted".into()), Duration::from_secs(3), now);
        let visible = toasts.visible(now);
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| toast_stack_ui(ui, &visible));
        });
        assert_eq!(visible.len(), 1);
    }
}
