use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::FilterType;
use kmeans_colors::get_kmeans_hamerly;
use palette::Lab;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::color::Color;
use crate::theme::Palette;

/// Images are resampled to exactly this square before clustering.
const WORKING_DIM: u32 = 100;
/// Above this many pixels a uniform sample is clustered instead.
pub const MAX_SAMPLES: usize = 10_000;
const MAX_ITER: usize = 100;
const CONVERGE: f32 = 1.0;
const SEED: u64 = 42;
/// Independent k-means initializations; the lowest-score run wins.
const RUNS: u64 = 10;
/// Cluster indices are stored as `u8`.
const MAX_CLUSTERS: usize = u8::MAX as usize;
const DARK_CUTOFF: u8 = 30;
const LIGHT_CUTOFF: u8 = 225;

/// Extract `n` dominant colors from the image at `path`, most dominant first.
///
/// Never fails: decode errors yield the fallback palette, and clusters that
/// are near-black or near-white are dropped and replaced with fallback tones.
pub fn extract_dominant_colors(path: &Path, n: usize) -> Palette {
    let n = n.max(1);
    let pixels = match load_and_prepare(path) {
        Ok(pixels) => pixels,
        Err(e) => {
            warn!("error extracting colors: {e:#}");
            return Palette::fallback(n);
        }
    };

    let pixels = sample_pixels(pixels);
    let colors: Vec<Color> = cluster(&pixels, n)
        .into_iter()
        .filter(|c| !is_near_black_or_white(*c))
        .collect();
    debug!(
        "kept {} of {n} clustered colors for {}",
        colors.len(),
        path.display()
    );

    Palette::backfill(colors, n)
}

/// Load an image, resample to the working resolution, and flatten to RGB pixels.
pub fn load_and_prepare(path: &Path) -> Result<Vec<[u8; 3]>> {
    let img = image::open(path).with_context(|| {
        if !path.exists() {
            format!("file not found: {}", path.display())
        } else {
            format!("unsupported or corrupt image: {}", path.display())
        }
    })?;

    let rgb_img = img
        .resize_exact(WORKING_DIM, WORKING_DIM, FilterType::CatmullRom)
        .to_rgb8();

    Ok(rgb_img.pixels().map(|p| p.0).collect())
}

/// Draw a seeded uniform sample of `MAX_SAMPLES` pixels, without replacement,
/// when there are more than that. Smaller inputs pass through untouched.
pub fn sample_pixels(pixels: Vec<[u8; 3]>) -> Vec<[u8; 3]> {
    if pixels.len() <= MAX_SAMPLES {
        return pixels;
    }
    let mut rng = StdRng::seed_from_u64(SEED);
    rand::seq::index::sample(&mut rng, pixels.len(), MAX_SAMPLES)
        .into_iter()
        .map(|i| pixels[i])
        .collect()
}

/// Run K-means in CIELAB and return centroids ordered by cluster size.
///
/// Uses Hamerly's algorithm, restarted with `RUNS` consecutive seeds; the
/// run with the lowest score is kept. `k` is capped by the number of
/// distinct pixel values so identical pixels never share a cluster.
pub fn cluster(pixels: &[[u8; 3]], k: usize) -> Vec<Color> {
    let distinct = pixels.iter().collect::<HashSet<_>>().len();
    let k = k.min(distinct).min(MAX_CLUSTERS);
    if k == 0 {
        return Vec::new();
    }

    let lab: Vec<Lab> = pixels
        .iter()
        .map(|&[r, g, b]| Color::new(r, g, b).to_lab())
        .collect();

    let Some(best) = (SEED..SEED + RUNS)
        .map(|seed| get_kmeans_hamerly(k, MAX_ITER, CONVERGE, false, &lab, seed))
        .min_by(|a, b| a.score.total_cmp(&b.score))
    else {
        return Vec::new();
    };

    let mut counts = vec![0usize; best.centroids.len()];
    for &idx in &best.indices {
        counts[idx as usize] += 1;
    }

    let mut ranked: Vec<(usize, Color)> = best
        .centroids
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(lab, count)| (count, Color::from_lab(*lab)))
        .collect();

    // Stable, so equal-sized clusters keep centroid order.
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    ranked.into_iter().map(|(_, color)| color).collect()
}

fn is_near_black_or_white(c: Color) -> bool {
    let all_dark = c.r < DARK_CUTOFF && c.g < DARK_CUTOFF && c.b < DARK_CUTOFF;
    let all_light = c.r > LIGHT_CUTOFF && c.g > LIGHT_CUTOFF && c.b > LIGHT_CUTOFF;
    all_dark || all_light
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::FALLBACK_COLORS;

    fn save_image(
        dir: &Path,
        name: &str,
        width: u32,
        height: u32,
        f: impl Fn(u32, u32) -> [u8; 3],
    ) -> std::path::PathBuf {
        let path = dir.join(name);
        let img = image::RgbImage::from_fn(width, height, |x, y| image::Rgb(f(x, y)));
        img.save(&path).unwrap();
        path
    }

    fn close_to(c: Color, target: [u8; 3], tolerance: i16) -> bool {
        (c.r as i16 - target[0] as i16).abs() <= tolerance
            && (c.g as i16 - target[1] as i16).abs() <= tolerance
            && (c.b as i16 - target[2] as i16).abs() <= tolerance
    }

    // --- load_and_prepare tests ---

    #[test]
    fn load_resamples_to_working_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_image(dir.path(), "wide.png", 640, 360, |_, _| [128, 128, 128]);

        let pixels = load_and_prepare(&path).unwrap();
        assert_eq!(pixels.len(), (WORKING_DIM * WORKING_DIM) as usize);
    }

    #[test]
    fn load_small_image_upsamples() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_image(dir.path(), "tiny.png", 4, 4, |_, _| [10, 200, 30]);

        let pixels = load_and_prepare(&path).unwrap();
        assert_eq!(pixels.len(), 10_000);
        assert!(pixels
            .iter()
            .all(|p| close_to(Color::new(p[0], p[1], p[2]), [10, 200, 30], 1)));
    }

    #[test]
    fn load_file_not_found() {
        let err = load_and_prepare(Path::new("/nonexistent/image.png"))
            .unwrap_err()
            .to_string();
        assert!(err.contains("file not found"), "got: {err}");
    }

    #[test]
    fn load_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_an_image.png");
        std::fs::write(&path, "this is not an image").unwrap();

        let err = load_and_prepare(&path).unwrap_err().to_string();
        assert!(err.contains("unsupported"), "got: {err}");
    }

    // --- sampling tests ---

    #[test]
    fn sampling_caps_large_inputs() {
        let pixels: Vec<[u8; 3]> = (0..25_000u32)
            .map(|i| [(i % 256) as u8, (i / 256 % 256) as u8, 7])
            .collect();
        let sampled = sample_pixels(pixels);
        assert_eq!(sampled.len(), MAX_SAMPLES);
    }

    #[test]
    fn sampling_is_deterministic() {
        let pixels: Vec<[u8; 3]> = (0..20_000u32).map(|i| [(i % 251) as u8, 0, 0]).collect();
        assert_eq!(sample_pixels(pixels.clone()), sample_pixels(pixels));
    }

    #[test]
    fn sampling_passes_small_inputs_through() {
        let pixels = vec![[1, 2, 3]; MAX_SAMPLES];
        assert_eq!(sample_pixels(pixels.clone()), pixels);
    }

    // --- cluster tests ---

    #[test]
    fn two_color_pixels_produce_both_centroids() {
        let mut pixels = vec![[200, 50, 50]; 700];
        pixels.extend(vec![[50, 50, 200]; 300]);

        let colors = cluster(&pixels, 2);
        assert_eq!(colors.len(), 2);
        assert!(close_to(colors[0], [200, 50, 50], 2), "got {}", colors[0]);
        assert!(close_to(colors[1], [50, 50, 200], 2), "got {}", colors[1]);
    }

    #[test]
    fn uniform_pixels_yield_single_cluster() {
        let pixels = vec![[90, 140, 60]; 500];
        let colors = cluster(&pixels, 5);
        assert_eq!(colors.len(), 1);
        assert!(close_to(colors[0], [90, 140, 60], 1));
    }

    #[test]
    fn clustering_is_deterministic() {
        let pixels: Vec<[u8; 3]> = (0..3000u32)
            .map(|i| [(i * 7 % 256) as u8, (i * 13 % 256) as u8, (i * 29 % 256) as u8])
            .collect();
        assert_eq!(cluster(&pixels, 5), cluster(&pixels, 5));
    }

    // --- extract_dominant_colors tests ---

    #[test]
    fn missing_image_returns_full_fallback() {
        let palette = extract_dominant_colors(Path::new("/nonexistent/wall.png"), 5);
        assert_eq!(palette.colors(), &FALLBACK_COLORS);
    }

    #[test]
    fn black_and_white_image_is_backfilled() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_image(dir.path(), "bw.png", 100, 100, |x, _| {
            if x < 50 {
                [5, 5, 5]
            } else {
                [250, 250, 250]
            }
        });

        let palette = extract_dominant_colors(&path, 5);
        assert_eq!(palette.colors(), &FALLBACK_COLORS);
    }

    #[test]
    fn dominant_color_comes_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_image(dir.path(), "mostly_red.png", 100, 100, |x, _| {
            if x < 75 {
                [200, 50, 50]
            } else {
                [50, 50, 200]
            }
        });

        let palette = extract_dominant_colors(&path, 5);
        assert_eq!(palette.len(), 5);
        let primary = palette.primary();
        assert!(
            primary.r > primary.b,
            "the red three quarters should dominate, got {primary}"
        );
    }

    #[test]
    fn always_returns_requested_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_image(dir.path(), "two.png", 32, 32, |_, y| {
            if y < 16 {
                [180, 120, 40]
            } else {
                [40, 120, 180]
            }
        });

        for n in [1, 3, 5, 8, 12] {
            assert_eq!(extract_dominant_colors(&path, n).len(), n);
        }
    }
}
