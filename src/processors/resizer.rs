// image-optimizer/src/processors/resizer.rs
use crate::core::{ResizeAlgorithm, TargetSize};
use image::{imageops::FilterType, DynamicImage, GenericImageView};

pub struct Resizer {
    algorithm: ResizeAlgorithm,
}

impl Resizer {
    pub fn new(algorithm: ResizeAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Scales `image` down to fit inside `target`, keeping the aspect ratio.
    /// Never crops and never enlarges.
    pub fn fit_within(&self, image: DynamicImage, target: TargetSize) -> DynamicImage {
        let (orig_width, orig_height) = image.dimensions();
        let (width, height) = fit_inside(orig_width, orig_height, target);

        if width == orig_width && height == orig_height {
            log::debug!("Image dimensions unchanged, skipping resize");
            return image;
        }

        log::debug!(
            "Resizing image from {}x{} to {}x{}",
            orig_width,
            orig_height,
            width,
            height
        );

        image.resize_exact(width, height, self.filter_type())
    }

    fn filter_type(&self) -> FilterType {
        match self.algorithm {
            ResizeAlgorithm::Nearest => FilterType::Nearest,
            ResizeAlgorithm::Bilinear => FilterType::Triangle,
            ResizeAlgorithm::Bicubic => FilterType::CatmullRom,
            ResizeAlgorithm::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Output size for an `orig_w`×`orig_h` image bounded by `target`. Both
/// bounds apply at once; the tighter one wins.
pub fn fit_inside(orig_w: u32, orig_h: u32, target: TargetSize) -> (u32, u32) {
    if orig_w == 0 || orig_h == 0 || !target.is_constrained() {
        return (orig_w, orig_h);
    }

    let ratio_w = target.width.map_or(f64::INFINITY, |w| w as f64 / orig_w as f64);
    let ratio_h = target.height.map_or(f64::INFINITY, |h| h as f64 / orig_h as f64);
    let ratio = ratio_w.min(ratio_h).min(1.0);

    if ratio >= 1.0 {
        return (orig_w, orig_h);
    }

    let new_w = (orig_w as f64 * ratio).round() as u32;
    let new_h = (orig_h as f64 * ratio).round() as u32;

    (
        new_w.min(target.width.unwrap_or(orig_w)).max(1),
        new_h.min(target.height.unwrap_or(orig_h)).max(1),
    )
}
