//! Row-band partitioning for the parallel scans.

use crate::pixel::PixelBuffer;

/// Bands per worker thread; a few per thread keeps the pool busy when
/// rows differ in cost.
const BANDS_PER_THREAD: usize = 4;

/// Size in bytes of one band: a whole number of rows, at least one.
pub(crate) fn band_bytes(buffer: &PixelBuffer) -> usize {
    let rows = buffer.height() as usize;
    let bands = (rayon::current_num_threads() * BANDS_PER_THREAD).max(1);
    let rows_per_band = rows.div_ceil(bands).max(1);
    rows_per_band * buffer.row_bytes()
}
