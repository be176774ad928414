use std::path::PathBuf;

use anyhow::{Context, anyhow, bail};
use rawframe::image_pipeline::{
    ChannelOffsetMap, ChromaOrder, ConversionConfig, Orientation, RawLayout, RawToImagePipeline,
    SampleWidth, encode::default_output_path,
};
use rawframe::logger;

use tracing::info;

const USAGE: &str = "\
Convert raw YUV/Bayer pixel dumps to jpg/png/tiff

Usage: rawframe --raw-path <PATH> [OPTIONS]

Options:
  --raw-path <PATH>     input raw file
  --out-path <PATH>     output image, format from extension (default: input with .jpg)
  --width <N>           image width (default: 1280)
  --height <N>          image height (default: 720)
  --bpp <N>             bytes per sample, 1 or 2 (default: 1)
  --rowwise             samples are stored row-major (default: column-major)
  --luma-only           read the Y plane only
  --yvu                 chroma planes are stored V first (YV12); camera video
                        dumps are usually stored this way, pass it with --video
  --bayer <CFA>         input is a Bayer mosaic: rggb, bggr, grbg or gbrg
  --bit-depth <N>       significant bits per Bayer sample
  --header-len <N>      bytes to skip at the start of the file
  --video <DIR>         decode every frame to <DIR>/<index>.png
  -v, --verbose         debug logging with per-stage timings
  -h, --help            print this help";

struct Args {
    raw_path: PathBuf,
    out_path: Option<PathBuf>,
    video_dir: Option<PathBuf>,
    verbose: bool,
    config: ConversionConfig,
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<String>) -> anyhow::Result<T> {
    let value = value.ok_or_else(|| anyhow!("{} needs a value", flag))?;
    value
        .parse()
        .map_err(|_| anyhow!("{}: not a number: {}", flag, value))
}

fn parse_args() -> anyhow::Result<Option<Args>> {
    let mut raw_path = None;
    let mut out_path = None;
    let mut video_dir = None;
    let mut verbose = false;
    let mut width = 1280usize;
    let mut height = 720usize;
    let mut bpp = 1usize;
    let mut orientation = Orientation::ColumnMajor;
    let mut luma_only = false;
    let mut chroma = ChromaOrder::Uv;
    let mut bayer = None;
    let mut bit_depth = None;
    let mut header_len = 0u64;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--raw-path" => raw_path = args.next().map(PathBuf::from),
            "--out-path" => out_path = args.next().map(PathBuf::from),
            "--video" => video_dir = args.next().map(PathBuf::from),
            "--width" => width = parse_number(&arg, args.next())?,
            "--height" => height = parse_number(&arg, args.next())?,
            "--bpp" => bpp = parse_number(&arg, args.next())?,
            "--bit-depth" => bit_depth = Some(parse_number(&arg, args.next())?),
            "--header-len" => header_len = parse_number(&arg, args.next())?,
            "--rowwise" => orientation = Orientation::RowMajor,
            "--luma-only" => luma_only = true,
            "--yvu" => chroma = ChromaOrder::Vu,
            "--bayer" => {
                let cfa = args.next().ok_or_else(|| anyhow!("--bayer needs a value"))?;
                bayer = Some(match cfa.to_ascii_lowercase().as_str() {
                    "rggb" => ChannelOffsetMap::RGGB,
                    "bggr" => ChannelOffsetMap::BGGR,
                    "grbg" => ChannelOffsetMap::GRBG,
                    "gbrg" => ChannelOffsetMap::GBRG,
                    other => bail!("unknown Bayer layout: {}", other),
                });
            }
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => return Ok(None),
            other => bail!("unexpected argument: {}\n\n{}", other, USAGE),
        }
    }

    let raw_path = raw_path.ok_or_else(|| anyhow!("--raw-path is required\n\n{}", USAGE))?;
    let layout = match (bayer, luma_only) {
        (Some(offsets), _) => RawLayout::Bayer { offsets },
        (None, true) => RawLayout::Luma,
        (None, false) => RawLayout::Yuv420 { chroma },
    };

    let config = ConversionConfig::builder()
        .dimensions(width, height)
        .sample_width(SampleWidth::try_from(bpp)?)
        .layout(layout)
        .orientation(orientation)
        .header_len(header_len)
        .bit_depth(bit_depth)
        .build();

    Ok(Some(Args {
        raw_path,
        out_path,
        video_dir,
        verbose,
        config,
    }))
}

fn main() -> anyhow::Result<()> {
    let Some(args) = parse_args()? else {
        println!("{}", USAGE);
        return Ok(());
    };

    logger::init_with_default(if args.verbose { "debug" } else { "info" });

    let pipeline = RawToImagePipeline::new(args.config);
    info!(
        "Layout: {:?}, {}x{}",
        pipeline.config().layout,
        pipeline.config().width,
        pipeline.config().height
    );

    if let Some(dir) = args.video_dir {
        let frames = pipeline
            .convert_sequence(&args.raw_path, &dir)
            .with_context(|| format!("decoding frames of {}", args.raw_path.display()))?;
        info!("Wrote {} frames to {}", frames, dir.display());
        return Ok(());
    }

    let out_path = args
        .out_path
        .unwrap_or_else(|| default_output_path(&args.raw_path));
    pipeline
        .convert_file(&args.raw_path, &out_path)
        .with_context(|| format!("converting {}", args.raw_path.display()))?;
    info!("Conversion successful: {}", out_path.display());

    Ok(())
}
