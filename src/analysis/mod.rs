/// Erosivity analysis stages, in pipeline order:
/// rolling (windowed sums) → storms (segmentation + erosive filter)
/// → intensity (per-storm I30) → erosivity (EI30 and annual R).

pub mod erosivity;
pub mod intensity;
pub mod rolling;
pub mod storms;
