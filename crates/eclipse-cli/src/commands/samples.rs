use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use eclipse_core::io::image_io::save_png;
use eclipse_core::io::ser::SerReader;
use eclipse_core::io::VideoSource;
use eclipse_core::sampler::FrameSampler;
use eclipse_core::session::VideoSession;
use eclipse_core::timestamp::{parse_start_time, TimestampMapper};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Args)]
pub struct SamplesArgs {
    /// Input SER file
    pub file: PathBuf,

    /// Frame rate to assume instead of the one derived from timestamps
    #[arg(long)]
    pub fps: Option<f64>,

    /// Wall-clock time of the first frame (SS, MM:SS or HH:MM:SS)
    #[arg(long)]
    pub start: Option<String>,

    /// Write every sampled frame as `frame_<index>.png` into this directory
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn run(args: &SamplesArgs) -> Result<()> {
    let start_offset = match args.start.as_deref() {
        Some(s) => parse_start_time(s)?,
        None => Duration::ZERO,
    };

    let reader = SerReader::open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let session = VideoSession::from_metadata(reader.metadata(), args.fps, start_offset)?;
    let sampler = FrameSampler::for_session(&session);
    let mapper = TimestampMapper::new(&session);

    if let Some(ref dir) = args.export {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        let pb = ProgressBar::new(sampler.sample_count() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40}] {pos}/{len}")?
                .progress_chars("=> "),
        );
        pb.set_message("Exporting frames");

        for point in sampler.iter() {
            let frame = reader.read_frame(point.frame_index)?;
            save_png(&frame, &dir.join(format!("frame_{:06}.png", point.frame_index)))?;
            pb.inc(1);
        }
        pb.finish_with_message("Exported");
        println!("Frames written to {}", dir.display());
        return Ok(());
    }

    println!("{:>8}  {:>8}  {:>10}", "Frame", "Second", "Time");
    println!("{}", "-".repeat(30));
    for point in sampler.iter() {
        println!(
            "{:>8}  {:>8}  {:>10}",
            point.frame_index,
            point.elapsed_seconds,
            mapper.timestamp(point.frame_index)
        );
    }

    Ok(())
}
