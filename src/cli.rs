//! One-shot command line operations: quantize a file, print a histogram.

use anyhow::Context;
use clap::Args;
use luma_quant::{BitDepth, Histogram, Quantizer};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::codec::{decode_png, encode_png, export_file_name, DecodeLimits, ExportOptions};
use crate::models::{sanitize_stem, AppConfig};

/// Width of the bars in the text histogram
const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, Args)]
pub struct QuantizeArgs {
    /// Input PNG file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Target bit depth (1-8)
    #[arg(short, long, value_parser = parse_bit_depth)]
    pub bits: BitDepth,

    /// Output PNG file (default: <stem>-<N>bit.png next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the histogram as JSON to this file
    #[arg(long)]
    pub histogram: Option<PathBuf>,

    /// Re-compress the output with oxipng
    #[arg(long)]
    pub optimize: bool,
}

#[derive(Debug, Clone, Args)]
pub struct HistogramArgs {
    /// Input PNG file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Bit depth to quantize to first (default from config)
    #[arg(short, long, value_parser = parse_bit_depth)]
    pub bits: Option<BitDepth>,

    /// Print JSON instead of a text chart
    #[arg(long)]
    pub json: bool,
}

fn parse_bit_depth(s: &str) -> Result<BitDepth, luma_quant::QuantizeError> {
    s.parse()
}

/// Histogram of one quantized file, as written by `--histogram` and `--json`
#[derive(Debug, Serialize)]
pub struct HistogramSummary {
    pub file: String,
    pub bit_depth: u8,
    pub levels: u32,
    pub step: f64,
    pub width: u32,
    pub height: u32,
    pub total: u64,
    pub max: u64,
    pub occupied: usize,
    pub counts: Vec<u64>,
}

impl HistogramSummary {
    fn new(file: &Path, depth: BitDepth, width: u32, height: u32, histogram: &Histogram) -> Self {
        Self {
            file: file.display().to_string(),
            bit_depth: depth.bits(),
            levels: depth.levels(),
            step: depth.step(),
            width,
            height,
            total: histogram.total(),
            max: histogram.max(),
            occupied: histogram.occupied_levels(),
            counts: histogram.counts().to_vec(),
        }
    }
}

/// What `quantize` wrote
#[derive(Debug)]
pub struct QuantizeReport {
    pub output: PathBuf,
    pub size_bytes: usize,
    pub bit_depth: BitDepth,
    pub histogram: Histogram,
}

/// Default export path: `<dir>/<stem>-<N>bit.png`.
pub fn default_output_path(input: &Path, depth: BitDepth) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| sanitize_stem(&s.to_string_lossy()))
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(export_file_name(&stem, depth))
}

/// Quantize a PNG file and write the result.
pub fn run_quantize(args: &QuantizeArgs, config: &AppConfig) -> anyhow::Result<QuantizeReport> {
    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let decoded = decode_png(
        &bytes,
        DecodeLimits {
            max_dimension: config.max_dimension,
        },
    )
    .with_context(|| format!("Failed to decode {}", args.input.display()))?;

    let result = Quantizer::new(args.bits).run(&decoded.buffer);
    let png_bytes = encode_png(
        result.buffer(),
        &ExportOptions {
            bit_depth: Some(args.bits),
            optimize: args.optimize || config.optimize_png,
        },
    )?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, args.bits));
    std::fs::write(&output, &png_bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::debug!(
        input = %args.input.display(),
        output = %output.display(),
        bit_depth = args.bits.bits(),
        size_bytes = png_bytes.len(),
        "Quantized file written"
    );

    if let Some(path) = &args.histogram {
        let summary = HistogramSummary::new(
            &output,
            args.bits,
            result.buffer().width(),
            result.buffer().height(),
            result.histogram(),
        );
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    let (_, histogram) = result.into_parts();
    Ok(QuantizeReport {
        output,
        size_bytes: png_bytes.len(),
        bit_depth: args.bits,
        histogram,
    })
}

/// Quantize a PNG file in memory and render its histogram as text or JSON.
pub fn run_histogram(args: &HistogramArgs, config: &AppConfig) -> anyhow::Result<String> {
    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let decoded = decode_png(
        &bytes,
        DecodeLimits {
            max_dimension: config.max_dimension,
        },
    )
    .with_context(|| format!("Failed to decode {}", args.input.display()))?;

    let depth = args.bits.unwrap_or_else(|| config.default_depth());
    let result = Quantizer::new(depth).run(&decoded.buffer);
    let summary = HistogramSummary::new(
        &args.input,
        depth,
        decoded.buffer.width(),
        decoded.buffer.height(),
        result.histogram(),
    );

    if args.json {
        Ok(serde_json::to_string_pretty(&summary)?)
    } else {
        Ok(format_histogram(&summary, result.histogram()))
    }
}

/// Text chart of the non-empty buckets, bars scaled to the largest count.
pub fn format_histogram(summary: &HistogramSummary, histogram: &Histogram) -> String {
    let mut out = format!(
        "{} ({}x{}) at {}-bit: {} of {} levels occupied\n",
        summary.file,
        summary.width,
        summary.height,
        summary.bit_depth,
        summary.occupied,
        summary.levels
    );
    let max = histogram.max().max(1);
    for (level, count) in histogram.iter().filter(|&(_, count)| count > 0) {
        let bar = ((count as u128 * BAR_WIDTH as u128).div_ceil(max as u128)) as usize;
        out.push_str(&format!("{level:>5} {count:>10} {}\n", "#".repeat(bar)));
    }
    out
}
