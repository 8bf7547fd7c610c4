/// Incremental trailing-window sums over a fixed-interval series.
///
/// The storm segmenter asks, for every record, "how much rain fell in
/// the 6 hours before this record?". Recomputing each window from
/// scratch is O(n·window); a running sum (add the newest value, evict
/// the oldest) brings a century of 10-minute data down to O(n).

/// Trailing sums over the `window` values strictly before each index:
/// `out[i] = Σ values[i-window .. i-1]` for `i >= window`, else `0.0`.
///
/// The running sum is re-zeroed whenever the window holds no positive
/// value, so a fully dry window reports exactly `0.0` — the wet/dry
/// boundary test compares against zero and must not be disturbed by
/// accumulated floating-point residue.
pub fn trailing_sums_exclusive(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let mut sums = vec![0.0; n];
    if window == 0 || n <= window {
        return sums;
    }

    let mut running = 0.0;
    let mut wet_count = 0usize;
    for &v in &values[..window] {
        running += v;
        if v > 0.0 {
            wet_count += 1;
        }
    }

    for i in window..n {
        if wet_count == 0 {
            running = 0.0;
        }
        sums[i] = running;

        let incoming = values[i];
        let outgoing = values[i - window];
        running += incoming - outgoing;
        if incoming > 0.0 {
            wet_count += 1;
        }
        if outgoing > 0.0 {
            wet_count -= 1;
        }
    }

    sums
}
