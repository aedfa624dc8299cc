use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use eclipse_core::io::ser::SerReader;
use eclipse_core::sampler::FrameSampler;

#[derive(Args)]
pub struct InfoArgs {
    /// Input SER file
    pub file: PathBuf,

    /// Frame rate to assume instead of the one derived from timestamps
    #[arg(long)]
    pub fps: Option<f64>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let reader = SerReader::open(&args.file)?;
    let info = reader.source_info(&args.file);

    println!("File:        {}", info.filename.display());
    println!("Frames:      {}", info.total_frames);
    println!("Dimensions:  {}x{}", info.width, info.height);
    println!("Bit depth:   {}", info.bit_depth);
    println!("Color mode:  {:?}", info.color_mode);

    if let Some(ref obs) = info.observer {
        println!("Observer:    {}", obs);
    }
    if let Some(ref tel) = info.telescope {
        println!("Telescope:   {}", tel);
    }
    if let Some(ref inst) = info.instrument {
        println!("Instrument:  {}", inst);
    }

    let total_mb = reader.data_size() as f64 / (1024.0 * 1024.0);
    println!("Data size:   {:.1} MB", total_mb);

    match info.frame_rate {
        Some(rate) => println!("Frame rate:  {:.3} fps (from timestamps)", rate),
        None => println!("Frame rate:  unknown (no timestamp trailer)"),
    }

    if let Some(fps) = args.fps.or(info.frame_rate) {
        let sampler = FrameSampler::new(fps, info.total_frames)?;
        println!(
            "Duration:    {:.1} s at {:.3} fps",
            info.total_frames as f64 / fps,
            fps
        );
        println!("Samples:     {}", sampler.sample_count());
    }

    Ok(())
}
