use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use eclipse_core::classify::RecordedClassifier;
use eclipse_core::io::ser::SerReader;
use eclipse_core::io::VideoSource;
use eclipse_core::pipeline::run_scan;
use eclipse_core::session::VideoSession;
use eclipse_core::snapshot::{DirectorySink, SnapshotFormat};
use eclipse_core::timestamp::parse_start_time;
use tracing::info;

use crate::progress::BarReporter;
use crate::summary::{print_event_log, print_scan_header};

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Png,
    Jpeg,
    Tiff,
}

impl From<FormatArg> for SnapshotFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => SnapshotFormat::Png,
            FormatArg::Jpeg => SnapshotFormat::Jpeg,
            FormatArg::Tiff => SnapshotFormat::Tiff,
        }
    }
}

#[derive(Args)]
pub struct ScanArgs {
    /// Input SER file
    pub file: PathBuf,

    /// Wall-clock time of the first frame (SS, MM:SS or HH:MM:SS)
    #[arg(long)]
    pub start: String,

    /// Detections recorded by the stage classifier (TOML)
    #[arg(long)]
    pub detections: PathBuf,

    /// Frame rate to assume instead of the one derived from timestamps
    #[arg(long)]
    pub fps: Option<f64>,

    /// Config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory for transition snapshots
    #[arg(long)]
    pub snapshots: Option<PathBuf>,

    /// Snapshot image format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Minimum classifier confidence (0-1)
    #[arg(long)]
    pub min_confidence: Option<f32>,
}

pub fn run(args: &ScanArgs) -> Result<()> {
    // Everything that can be rejected up front is checked before the video
    // is touched.
    let start_offset = parse_start_time(&args.start)?;

    let mut config = super::load_config(args.config.as_deref())?;
    if let Some(dir) = &args.snapshots {
        config.snapshots.directory = dir.clone();
    }
    if let Some(format) = args.format {
        config.snapshots.format = format.into();
    }
    if let Some(min) = args.min_confidence {
        config.classifier.min_confidence = min;
    }
    let rules = config.rule_table().context("Invalid transition rules")?;

    let classifier = RecordedClassifier::load(&args.detections, config.classifier.min_confidence)
        .with_context(|| format!("Failed to load detections {}", args.detections.display()))?;

    let reader = SerReader::open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let session = VideoSession::from_metadata(reader.metadata(), args.fps, start_offset)?;
    info!(fps = session.fps(), frames = session.total_frames(), "Session ready");

    print_scan_header(&args.file, &session, &config, &rules);

    let mut sink = DirectorySink::create(&config.snapshots.directory, config.snapshots.format)
        .with_context(|| {
            format!(
                "Failed to create snapshot directory {}",
                config.snapshots.directory.display()
            )
        })?;

    let reporter = BarReporter::new()?;
    let report = match run_scan(&reader, &classifier, &mut sink, &session, &rules, &reporter) {
        Ok(report) => {
            reporter.finish("Done");
            report
        }
        Err(e) => {
            reporter.abandon();
            return Err(e).context("Scan aborted");
        }
    };

    print_event_log(&report);
    Ok(())
}
