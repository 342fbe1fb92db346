#[macro_use]
extern crate tracing;

use anyhow::Context;
use certembed_common::{
    EncodeConfig, NoText, Sha256Fingerprint, TextLayout, Theme, encode::DEFAULT_FONT_SIZE,
};
use certembed_process::{CertificateInfo, GlyphLayout};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::Level;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(argh::FromArgs)]
/// Embed a certificate into the pixels of a PNG image, or find and verify one
struct Args {
    #[argh(option)]
    /// file to embed into a new image
    encode: Option<PathBuf>,

    #[argh(option)]
    /// image to scan for an embedded certificate
    decode: Option<PathBuf>,

    #[argh(option, default = "PathBuf::from(\"cert.png\")")]
    /// where the encoded image is written
    output: PathBuf,

    #[argh(option)]
    /// font used for the title and digest thumbprint
    font: Option<PathBuf>,

    #[argh(option, default = "DEFAULT_FONT_SIZE")]
    /// font size in pixels
    font_size: u32,

    #[argh(option, default = "Theme::default()")]
    /// color theme: sky, slate, midnight, ocean or steel
    theme: Theme,

    #[argh(option)]
    /// raster width in pixels, derived from the text width when omitted
    width: Option<u32>,

    #[argh(option, default = "1")]
    /// threads used to scan for the frame
    jobs: usize,

    #[argh(switch, short = 'v')]
    /// dump header, payload and digest bytes
    verbose: bool,
}

fn encode_file(args: &Args, path: &Path) -> anyhow::Result<()> {
    let payload = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let config = EncodeConfig {
        theme: args.theme,
        font_size: args.font_size,
        width: args.width,
        ..EncodeConfig::default()
    };

    let text: Box<dyn TextLayout> = match &args.font {
        Some(font) => Box::new(GlyphLayout::open(font, args.font_size as f32)?),
        None => {
            warn!("no font given, encoding without title and thumbprint");
            Box::new(NoText)
        }
    };

    let canvas = certembed_common::encode(&payload, &Sha256Fingerprint, text.as_ref(), &config)
        .with_context(|| format!("failed to encode {}", path.display()))?;
    certembed_process::write_grid(&canvas.grid, &args.output)?;

    info!(
        output = %args.output.display(),
        width = canvas.grid.width(),
        height = canvas.grid.height(),
        "wrote image"
    );
    Ok(())
}

fn decode_file(args: &Args, path: &Path) -> anyhow::Result<()> {
    let grid = certembed_process::read_grid(path)?;
    let decoded = certembed_common::decode(
        &grid,
        &Sha256Fingerprint,
        args.jobs,
        certembed_process::parse_certificate,
    )
    .with_context(|| format!("failed to decode {}", path.display()))?;

    let certificate: CertificateInfo = decoded.certificate;
    println!("Certificate:\n{certificate}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    if args.encode.is_none() && args.decode.is_none() {
        anyhow::bail!("nothing to do, pass --encode and/or --decode");
    }

    if let Some(path) = &args.encode {
        encode_file(&args, path)?;
    }
    if let Some(path) = &args.decode {
        decode_file(&args, path)?;
    }

    Ok(())
}
