//! Domain-critical regression tests for luma-quant.
//!
//! These tests pin down the observable behaviour of the quantize/histogram
//! pipeline on whole images. Each test documents the regression it guards
//! against.

#[cfg(test)]
mod domain_tests {
    use crate::api::{QuantizeError, Quantizer};
    use crate::histogram::build_histogram;
    use crate::pixel::{luminosity, PixelBuffer, Rgba};
    use crate::quantize::{quantize, quantize_bits, BitDepth};

    /// Deterministic xorshift32 noise: each state word becomes one RGBA pixel.
    fn noise_image(width: u32, height: u32, seed: u32) -> PixelBuffer {
        let mut state = seed;
        let pixels: Vec<Rgba> = (0..width * height)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                Rgba::from_bytes(state.to_le_bytes())
            })
            .collect();
        PixelBuffer::from_pixels(width, height, &pixels).unwrap()
    }

    fn grey_ramp() -> PixelBuffer {
        let pixels: Vec<Rgba> = (0..=255u8).map(|v| Rgba::opaque(v, v, v)).collect();
        PixelBuffer::from_pixels(16, 16, &pixels).unwrap()
    }

    // ========================================================================
    // Pipeline shape
    // ========================================================================

    /// If this breaks, it means: the 1-bit threshold moved. A white/black
    /// pair must come out as mid-grey/black. The grey's luminosity evaluates
    /// to 127.99999999999999, so it is counted in level 127.
    #[test]
    fn test_one_bit_white_and_black() {
        let original = PixelBuffer::from_pixels(2, 1, &[Rgba::WHITE, Rgba::BLACK]).unwrap();
        let result = Quantizer::new(BitDepth::MIN).run(&original);

        assert_eq!(result.buffer().pixel(0, 0), Some(Rgba::opaque(128, 128, 128)));
        assert_eq!(result.buffer().pixel(1, 0), Some(Rgba::BLACK));
        assert_eq!(result.histogram().get(127), 1);
        assert_eq!(result.histogram().get(0), 1);
        assert_eq!(result.histogram().occupied_levels(), 2);
    }

    /// If this breaks, it means: the histogram is sampling, skipping rows,
    /// or carrying counts over from a previous call.
    #[test]
    fn test_histogram_total_equals_pixel_count_at_every_depth() {
        let original = noise_image(37, 23, 0x2545_F491);
        for depth in BitDepth::all() {
            let result = Quantizer::new(depth).run(&original);
            assert_eq!(
                result.histogram().total(),
                37 * 23,
                "REGRESSION: histogram total wrong at {}",
                depth
            );
            assert_eq!(result.buffer().width(), 37);
            assert_eq!(result.buffer().height(), 23);
        }
    }

    /// If this breaks, it means: black is being divided by zero or nudged
    /// off zero, or alpha is being rewritten by the quantizer.
    #[test]
    fn test_black_is_a_fixed_point_and_alpha_survives() {
        let pixels = [
            Rgba::new(0, 0, 0, 0),
            Rgba::new(0, 0, 0, 99),
            Rgba::new(200, 100, 50, 3),
            Rgba::new(255, 255, 255, 128),
        ];
        let original = PixelBuffer::from_pixels(4, 1, &pixels).unwrap();
        for depth in BitDepth::all() {
            let quantized = quantize(&original, depth);
            assert_eq!(quantized.pixel(0, 0), Some(Rgba::new(0, 0, 0, 0)));
            assert_eq!(quantized.pixel(1, 0), Some(Rgba::new(0, 0, 0, 99)));
            let alphas: Vec<u8> = quantized.pixels().map(|p| p.a).collect();
            assert_eq!(alphas, vec![0, 99, 3, 128], "alpha changed at {}", depth);
        }
    }

    /// If this breaks, it means: the quantizer wrote into its input.
    #[test]
    fn test_original_is_untouched() {
        let original = noise_image(16, 16, 7);
        let snapshot = original.clone();
        for depth in BitDepth::all() {
            let _ = Quantizer::new(depth).run(&original);
        }
        assert_eq!(original, snapshot);
    }

    /// If this breaks, it means: some hidden state (a cache, a reused table,
    /// thread scheduling) is leaking into the output.
    #[test]
    fn test_runs_are_deterministic() {
        let original = noise_image(64, 33, 0x9E37_79B9);
        let depth = BitDepth::new(5).unwrap();
        let first = Quantizer::new(depth).run(&original);
        let second = Quantizer::new(depth).run(&original);
        assert_eq!(first, second);
    }

    // ========================================================================
    // Formula parity
    // ========================================================================

    /// The quantization formula written out literally, one `f64` operation
    /// at a time.
    fn literal_pixel(p: Rgba, bits: u8) -> Rgba {
        let (r, g, b) = (p.r as f64, p.g as f64, p.b as f64);
        let l = 0.299 * r + 0.587 * g + 0.114 * b;
        let levels = 2f64.powi(bits as i32);
        let step = 256.0 / levels;
        let q = (l / step).floor() * step;
        let f = if l > 0.0 { q / l } else { 0.0 };
        let channel = |c: f64| (c * f).floor().min(255.0) as u8;
        Rgba::new(channel(r), channel(g), channel(b), p.a)
    }

    fn literal_level(p: Rgba) -> usize {
        (0.299 * p.r as f64 + 0.587 * p.g as f64 + 0.114 * p.b as f64).floor() as usize
    }

    /// If this breaks, it means: the quantizer or the histogram no longer
    /// evaluates `0.299 R + 0.587 G + 0.114 B` and the bucket arithmetic in
    /// plain `f64`. Greys are the sensitive case: 65 of them evaluate just
    /// under their channel value and must fall into the level below.
    #[test]
    fn test_matches_literal_float_formula() {
        for image in [grey_ramp(), noise_image(32, 32, 0x9E37_79B9)] {
            for depth in BitDepth::all() {
                let result = Quantizer::new(depth).run(&image);

                let mut expected_counts = [0u64; 256];
                for (x, src) in image.pixels().enumerate() {
                    let expected = literal_pixel(src, depth.bits());
                    let (col, row) = (x as u32 % image.width(), x as u32 / image.width());
                    assert_eq!(
                        result.buffer().pixel(col, row),
                        Some(expected),
                        "REGRESSION: {:?} at {}",
                        src,
                        depth
                    );
                    expected_counts[literal_level(expected)] += 1;
                }
                assert_eq!(result.histogram().counts(), &expected_counts, "at {}", depth);
            }
        }
    }

    /// If this breaks, it means: grey evaluation was "corrected" to exact
    /// arithmetic. These greys sit on bucket boundaries but evaluate just
    /// under them.
    #[test]
    fn test_greys_below_boundary_drop_a_bucket() {
        let pixels = [Rgba::opaque(128, 128, 128), Rgba::opaque(64, 64, 64)];
        let original = PixelBuffer::from_pixels(2, 1, &pixels).unwrap();

        let one_bit = quantize(&original, BitDepth::MIN);
        assert_eq!(one_bit.pixel(0, 0), Some(Rgba::BLACK));

        let two_bit = quantize(&original, BitDepth::new(2).unwrap());
        assert_eq!(two_bit.pixel(1, 0), Some(Rgba::BLACK));

        let eight_bit = quantize(&original, BitDepth::ORIGINAL);
        assert_eq!(eight_bit.pixel(0, 0), Some(Rgba::opaque(127, 127, 127)));
        assert_eq!(eight_bit.pixel(1, 0), Some(Rgba::opaque(63, 63, 63)));
    }

    // ========================================================================
    // Bucket placement
    // ========================================================================

    /// If this breaks, it means: the scale factor is no longer shared by all
    /// three channels, or it is rounding instead of flooring. Output
    /// luminosity must sit at the bucket floor Q or less than one level
    /// below it (up to `f64` rounding).
    #[test]
    fn test_output_luminosity_lies_just_below_bucket_floor() {
        const EPS: f64 = 1e-9;
        let original = noise_image(32, 32, 0x9E37_79B9);
        for depth in BitDepth::all() {
            let quantized = quantize(&original, depth);
            for (src, out) in original.pixels().zip(quantized.pixels()) {
                let floor = depth.bucket_floor(src.luminosity());
                let after = out.luminosity();
                assert!(
                    after <= floor + EPS && after > floor - 1.0 - EPS,
                    "REGRESSION: {:?} -> {:?} at {} left bucket floor {}",
                    src,
                    out,
                    depth,
                    floor
                );
            }
        }
    }

    /// If this breaks, it means: 8-bit output drifted by more than the
    /// rounding the formula allows. Greys move by at most one, and no pixel
    /// may lose two or more luminosity levels.
    #[test]
    fn test_eight_bit_is_nearly_lossless() {
        let ramp = grey_ramp();
        let quantized = quantize(&ramp, BitDepth::ORIGINAL);
        let moved = ramp
            .pixels()
            .zip(quantized.pixels())
            .inspect(|(src, out)| assert!(src.r - out.r <= 1, "{:?} -> {:?}", src, out))
            .filter(|(src, out)| src != out)
            .count();
        assert_eq!(moved, 65);

        let original = noise_image(32, 32, 0x2545_F491);
        let quantized = quantize(&original, BitDepth::ORIGINAL);
        for (src, out) in original.pixels().zip(quantized.pixels()) {
            let before = luminosity(src.r, src.g, src.b);
            let after = luminosity(out.r, out.g, out.b);
            assert!(after <= before);
            assert!(after > before - 2.0, "{:?} -> {:?}", src, out);
            assert!(out.r <= src.r && out.g <= src.g && out.b <= src.b);
        }
    }

    /// If this breaks, it means: the scale factor exceeded one. Re-quantizing
    /// may darken a pixel further but must never brighten any channel.
    #[test]
    fn test_requantizing_never_brightens() {
        let original = noise_image(24, 24, 0x2545_F491);
        for depth in BitDepth::all() {
            let once = quantize(&original, depth);
            let twice = quantize(&once, depth);
            for (a, b) in once.pixels().zip(twice.pixels()) {
                assert!(b.r <= a.r && b.g <= a.g && b.b <= a.b, "{:?} -> {:?}", a, b);
                assert_eq!(a.a, b.a);
            }
        }
    }

    /// If this breaks, it means: a coarser depth is producing more distinct
    /// levels than a finer one on a grey ramp.
    #[test]
    fn test_grey_ramp_occupancy_is_monotone() {
        let ramp = grey_ramp();
        let occupied: Vec<usize> = BitDepth::all()
            .map(|d| Quantizer::new(d).run(&ramp).histogram().occupied_levels())
            .collect();
        assert_eq!(occupied, vec![3, 5, 8, 16, 32, 64, 128, 192]);
        assert!(occupied.windows(2).all(|w| w[0] <= w[1]));
    }

    // ========================================================================
    // Golden values
    // ========================================================================

    /// If this breaks, it means: the luminosity weights, the bucket width or
    /// the flooring changed. These counts were computed independently from
    /// the formula on a fixed noise image.
    #[test]
    fn test_noise_image_occupancy_golden() {
        let original = noise_image(32, 32, 0x9E37_79B9);
        assert_eq!(original.pixel(0, 0), Some(Rgba::new(25, 70, 12, 81)));
        assert_eq!(original.pixel(1, 0), Some(Rgba::new(62, 85, 46, 224)));

        let occupied: Vec<usize> = BitDepth::all()
            .map(|d| Quantizer::new(d).run(&original).histogram().occupied_levels())
            .collect();
        assert_eq!(occupied, vec![2, 4, 8, 16, 31, 60, 116, 214]);
    }

    /// If this breaks, it means: 4-bit chromatic pixels are being binned
    /// differently. Chromatic pixels fall just below each 16-level boundary,
    /// so most buckets are one less than a multiple of 16.
    #[test]
    fn test_noise_image_four_bit_histogram_golden() {
        let original = noise_image(32, 32, 0x9E37_79B9);
        let result = Quantizer::new(BitDepth::new(4).unwrap()).run(&original);

        let occupied: Vec<(u8, u64)> = result
            .histogram()
            .iter()
            .filter(|&(_, count)| count > 0)
            .collect();
        assert_eq!(
            occupied,
            vec![
                (0, 4),
                (15, 15),
                (31, 40),
                (47, 62),
                (63, 72),
                (79, 95),
                (95, 109),
                (111, 98),
                (127, 124),
                (143, 86),
                (159, 97),
                (175, 106),
                (191, 59),
                (207, 37),
                (223, 17),
                (239, 3),
            ]
        );
        assert_eq!(result.histogram().max(), 124);
    }

    /// If this breaks, it means: the first two noise pixels no longer
    /// quantize to their hand-checked values.
    #[test]
    fn test_noise_pixels_golden() {
        let original = noise_image(2, 1, 0x9E37_79B9);
        let expect = |bits: u8, first: Rgba, second: Rgba| {
            let quantized = quantize_bits(&original, bits).unwrap();
            assert_eq!(quantized.pixel(0, 0), Some(first), "first pixel at {} bits", bits);
            assert_eq!(quantized.pixel(1, 0), Some(second), "second pixel at {} bits", bits);
        };
        expect(3, Rgba::new(16, 44, 7, 81), Rgba::new(53, 73, 39, 224));
        expect(4, Rgba::new(24, 67, 11, 81), Rgba::new(53, 73, 39, 224));
        expect(8, Rgba::new(24, 68, 11, 81), Rgba::new(61, 84, 45, 224));
    }

    // ========================================================================
    // Rejection
    // ========================================================================

    /// If this breaks, it means: invalid parameters are being clamped or
    /// silently accepted instead of reported.
    #[test]
    fn test_invalid_parameters_are_rejected() {
        let original = grey_ramp();
        assert_eq!(
            quantize_bits(&original, 0),
            Err(QuantizeError::BitDepthOutOfRange { bits: 0, max: 8 })
        );
        assert_eq!(
            quantize_bits(&original, 9),
            Err(QuantizeError::BitDepthOutOfRange { bits: 9, max: 8 })
        );
        assert_eq!(
            PixelBuffer::new(0, 0, Vec::new()),
            Err(QuantizeError::EmptyImage {
                width: 0,
                height: 0
            })
        );
        assert_eq!(
            PixelBuffer::new(2, 2, vec![0; 15]),
            Err(QuantizeError::BufferLength {
                expected: 16,
                actual: 15
            })
        );
        assert_eq!(
            build_histogram(&PixelBuffer::filled(3, 3, Rgba::BLACK).unwrap()).get(0),
            9
        );
    }
}
