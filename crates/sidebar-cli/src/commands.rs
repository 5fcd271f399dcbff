use anyhow::{Context, Result};
use sidebar_cli::layout::Layout;
use sidebar_cli::render::{RenderOptions, render_layout};
use sidebar_cli::report::{SegmentReport, animation_frames, frames_hex, frames_json, frames_table};
use sidebar_text::{HighlightAnimation, segment, strip, translate_alternate_codes};
use tracing::{debug, info_span};

use crate::cli::{AnimateArgs, FrameFormatArg, RenderArgs, SegmentArgs};

pub fn run_render(args: &RenderArgs) -> Result<()> {
    let span = info_span!("render", layout = %args.layout.display());
    let _guard = span.enter();

    let layout = Layout::load(&args.layout)?;
    let records = render_layout(
        &layout,
        RenderOptions {
            ticks: args.ticks,
            detach: args.detach,
        },
    )?;

    match args.format {
        FrameFormatArg::Table => println!("{}", frames_table(&records)),
        FrameFormatArg::Json => println!("{}", frames_json(&records)?),
        FrameFormatArg::Hex => print!("{}", frames_hex(&records)),
    }
    Ok(())
}

pub fn run_segment(args: &SegmentArgs) -> Result<()> {
    let raw = translate_alternate_codes(args.marker, &args.text);
    let split = segment(&raw, args.budget).context("cannot segment text")?;
    debug!(lag = split.lag, split = split.is_split(), "segmented line");

    let report = SegmentReport::new(&raw, args.budget, &split);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.table());
    }
    Ok(())
}

pub fn run_animate(args: &AnimateArgs) -> Result<()> {
    let text = strip(&translate_alternate_codes(args.marker, &args.text))
        .context("cannot strip escape codes")?;
    let mut animation =
        HighlightAnimation::with_state(text, args.primary, args.secondary, args.cooldown, 0)
            .with_wrap_cooldown(args.wrap_cooldown);

    for (index, frame) in animation_frames(&mut animation, args.frames)
        .into_iter()
        .enumerate()
    {
        println!("{index:>4}  {frame}");
    }
    Ok(())
}
