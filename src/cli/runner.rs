use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use crate::config::{InspectorConfig, load_config};
use crate::formats::{export_slice_png, read_volume};
use crate::model::Volume;
use crate::navigation::{FrameLog, jump_to};
use crate::probe::voxel_components_f64;
use crate::runtime::{Session, ViewerEvent, load_script, save_report};
use crate::view::{ViewerId, ViewerState};

use super::types::{
    Cli, Commands, DisplayArgs, ExportOutput, NavigateOutput, NavigateStep, PlaneArgs,
    ProbeOutput, VolumeInfo,
};

fn read_config(path: Option<&Path>) -> Result<InspectorConfig, String> {
    match path {
        Some(path) => load_config(path).map_err(|error| error.to_string()),
        None => Ok(InspectorConfig::default()),
    }
}

fn apply_display(config: &mut InspectorConfig, display: &DisplayArgs) -> Result<(), String> {
    if let Some(viewport) = display.viewport {
        config.display.viewport = viewport;
    }
    if display.window.is_some() {
        config.display.window = display.window;
    }
    if display.level.is_some() {
        config.display.level = display.level;
    }
    config.validate().map_err(|error| error.to_string())
}

fn open_volume(input: &Path) -> Result<Arc<Volume>, String> {
    read_volume(input)
        .map(Arc::new)
        .map_err(|error| error.to_string())
}

fn plane_viewer(volume: Arc<Volume>, plane: &PlaneArgs, config: &InspectorConfig) -> ViewerState {
    let window_level = config.window_level_for(&volume);
    let mut state = ViewerState::new(ViewerId(0), volume, plane.orientation)
        .with_viewport(config.display.viewport)
        .with_corrections(config.navigation.corrections)
        .with_window_level(window_level);
    if let Some(slice) = plane.slice {
        jump_to(&mut state, slice);
    }
    state
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).map_err(|error| error.to_string())?
    );
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    let mut config = read_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Info { input } => {
            let volume = open_volume(&input)?;
            let geometry = volume.geometry();
            let range = volume.data_range();
            print_json(&VolumeInfo {
                source: input.display().to_string(),
                dims: geometry.dims,
                spacing: geometry.spacing,
                origin: geometry.origin,
                scalar: volume.scalar_kind(),
                components: volume.components(),
                min: range.map(|(min, _)| min),
                max: range.map(|(_, max)| max),
            })?;
        }
        Commands::Probe {
            input,
            plane,
            display,
            at,
        } => {
            apply_display(&mut config, &display)?;
            let volume = open_volume(&input)?;
            let state = plane_viewer(volume, &plane, &config);
            let id = state.id();
            let mut session: Session = Session::new();
            session.add_viewer(state).map_err(|error| error.to_string())?;
            session
                .bind_inspection(id, &config)
                .map_err(|error| error.to_string())?;
            session
                .dispatch(id, &ViewerEvent::pointer(at.x, at.y))
                .map_err(|error| error.to_string())?;
            let slot = session
                .viewer(id)
                .ok_or_else(|| format!("viewer {id} disappeared"))?;
            let pick = slot.pick();
            print_json(&ProbeOutput {
                orientation: slot.state().orientation(),
                slice: slot.state().slice(),
                pick,
                values: pick
                    .voxel()
                    .map(|voxel| voxel_components_f64(slot.state().volume(), voxel)),
                corners: slot.overlay().texts().clone(),
            })?;
        }
        Commands::Navigate { input, plane, keys } => {
            let volume = open_volume(&input)?;
            let mut state = plane_viewer(volume, &plane, &config);
            let navigator = config.navigator();
            let bindings = config.key_bindings();
            let mut frames = FrameLog::default();
            let steps = keys
                .into_iter()
                .map(|key| {
                    let outcome = bindings
                        .lookup(&key)
                        .map(|command| navigator.handle(&mut state, command, &mut frames));
                    NavigateStep { key, outcome }
                })
                .collect::<Vec<_>>();
            print_json(&NavigateOutput {
                orientation: state.orientation(),
                slice: state.slice(),
                roll: state.camera().roll_degrees(),
                renders: frames.len(),
                steps,
            })?;
        }
        Commands::Export {
            input,
            plane,
            display,
            output,
            component,
        } => {
            apply_display(&mut config, &display)?;
            let volume = open_volume(&input)?;
            let state = plane_viewer(volume, &plane, &config);
            let (width, height) =
                export_slice_png(&state, component, &output).map_err(|error| error.to_string())?;
            print_json(&ExportOutput {
                output,
                width,
                height,
                orientation: state.orientation(),
                slice: state.slice(),
            })?;
        }
        Commands::Replay {
            input,
            events,
            report,
        } => {
            let volume = open_volume(&input)?;
            let script = load_script(&events).map_err(|error| error.to_string())?;
            let mut session: Session =
                Session::triple(volume, &config).map_err(|error| error.to_string())?;
            let replay = session.replay(&script).map_err(|error| error.to_string())?;
            if let Some(report_path) = report {
                save_report(&report_path, &replay).map_err(|error| error.to_string())?;
                info!(path = %report_path.display(), "saved replay report");
            }
            print_json(&replay)?;
        }
    }

    Ok(())
}
