use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::model::{ScalarKind, SliceOrientation};
use crate::navigation::NavigationOutcome;
use crate::probe::PickResult;
use crate::view::{DisplayPoint, Viewport};

#[derive(Debug, Parser)]
#[command(
    name = "inspect",
    version,
    about = "Probe voxel values and step through slices of 3-D scalar volumes"
)]
pub(super) struct Cli {
    /// Inspector configuration (YAML or JSON).
    #[arg(long, global = true)]
    pub(super) config: Option<PathBuf>,

    #[command(subcommand)]
    pub(super) command: Commands,
}

/// Which plane of the volume to look at.
#[derive(Debug, Args)]
pub(super) struct PlaneArgs {
    #[arg(long, default_value = "axial")]
    pub(super) orientation: SliceOrientation,
    /// Slice index along the orientation axis; the middle slice when omitted.
    #[arg(long)]
    pub(super) slice: Option<usize>,
}

/// Display overrides layered on top of the configuration file.
#[derive(Debug, Args)]
pub(super) struct DisplayArgs {
    #[arg(long)]
    pub(super) viewport: Option<Viewport>,
    #[arg(long)]
    pub(super) window: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub(super) level: Option<f64>,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    /// Prints dimensions, scalar type and data range of a volume.
    Info { input: PathBuf },
    /// Picks the voxel under a display point and prints the corner annotation.
    Probe {
        input: PathBuf,
        #[command(flatten)]
        plane: PlaneArgs,
        #[command(flatten)]
        display: DisplayArgs,
        /// Pointer position in viewport pixels, `X,Y`.
        #[arg(long, allow_hyphen_values = true)]
        at: DisplayPoint,
    },
    /// Replays key names through the key bindings of a single viewer.
    Navigate {
        input: PathBuf,
        #[command(flatten)]
        plane: PlaneArgs,
        #[arg(long, value_delimiter = ',')]
        keys: Vec<String>,
    },
    /// Writes the displayed slice as an 8-bit PNG.
    Export {
        input: PathBuf,
        #[command(flatten)]
        plane: PlaneArgs,
        #[command(flatten)]
        display: DisplayArgs,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value_t = 0)]
        component: usize,
    },
    /// Opens sagittal, coronal and axial viewers and replays a scripted event list.
    Replay {
        input: PathBuf,
        #[arg(long)]
        events: PathBuf,
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
pub(super) struct VolumeInfo {
    pub(super) source: String,
    pub(super) dims: [usize; 3],
    pub(super) spacing: [f64; 3],
    pub(super) origin: [f64; 3],
    pub(super) scalar: ScalarKind,
    pub(super) components: usize,
    pub(super) min: Option<f64>,
    pub(super) max: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(super) struct ProbeOutput {
    pub(super) orientation: SliceOrientation,
    pub(super) slice: usize,
    pub(super) pick: PickResult,
    pub(super) values: Option<Vec<f64>>,
    pub(super) corners: [String; 4],
}

#[derive(Debug, Serialize)]
pub(super) struct NavigateOutput {
    pub(super) orientation: SliceOrientation,
    pub(super) slice: usize,
    pub(super) roll: f64,
    pub(super) renders: usize,
    pub(super) steps: Vec<NavigateStep>,
}

#[derive(Debug, Serialize)]
pub(super) struct NavigateStep {
    pub(super) key: String,
    pub(super) outcome: Option<NavigationOutcome>,
}

#[derive(Debug, Serialize)]
pub(super) struct ExportOutput {
    pub(super) output: PathBuf,
    pub(super) width: u32,
    pub(super) height: u32,
    pub(super) orientation: SliceOrientation,
    pub(super) slice: usize,
}
