use fprint_core::{Correspondence, Keypoint};
use image::{imageops, DynamicImage, GrayImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_antialiased_line_segment_mut, draw_hollow_circle_mut};
use imageproc::pixelops::interpolate;

const KEYPOINT_COLOR: Rgba<u8> = Rgba([0, 255, 255, 255]);
const KEYPOINT_RADIUS: i32 = 3;

/// Line colors cycle per correspondence so neighboring lines stay apart
const LINE_COLORS: [Rgba<u8>; 6] = [
    Rgba([255, 64, 64, 255]),
    Rgba([64, 255, 64, 255]),
    Rgba([64, 128, 255, 255]),
    Rgba([255, 200, 0, 255]),
    Rgba([255, 64, 255, 255]),
    Rgba([0, 255, 200, 255]),
];

/// Draws probe and candidate side by side with keypoint circles and a
/// line per accepted correspondence, then upscales the canvas by
/// `magnification` for inspection of small captures.
pub fn render_matches(
    probe: &GrayImage,
    probe_kps: &[Keypoint],
    candidate: &GrayImage,
    candidate_kps: &[Keypoint],
    correspondences: &[Correspondence],
    magnification: f32,
) -> RgbaImage {
    let (pw, ph) = probe.dimensions();
    let (cw, ch) = candidate.dimensions();
    let mut canvas = RgbaImage::from_pixel(pw + cw, ph.max(ch), Rgba([0, 0, 0, 255]));

    let probe_rgba = DynamicImage::ImageLuma8(probe.clone()).to_rgba8();
    let candidate_rgba = DynamicImage::ImageLuma8(candidate.clone()).to_rgba8();
    imageops::replace(&mut canvas, &probe_rgba, 0, 0);
    imageops::replace(&mut canvas, &candidate_rgba, pw as i64, 0);

    for kp in probe_kps {
        draw_hollow_circle_mut(
            &mut canvas,
            (kp.x.round() as i32, kp.y.round() as i32),
            KEYPOINT_RADIUS,
            KEYPOINT_COLOR,
        );
    }
    for kp in candidate_kps {
        draw_hollow_circle_mut(
            &mut canvas,
            (kp.x.round() as i32 + pw as i32, kp.y.round() as i32),
            KEYPOINT_RADIUS,
            KEYPOINT_COLOR,
        );
    }

    for (i, m) in correspondences.iter().enumerate() {
        let (Some(p), Some(c)) = (probe_kps.get(m.probe_idx), candidate_kps.get(m.candidate_idx))
        else {
            continue;
        };
        let color = LINE_COLORS[i % LINE_COLORS.len()];
        draw_antialiased_line_segment_mut(
            &mut canvas,
            (p.x.round() as i32, p.y.round() as i32),
            (c.x.round() as i32 + pw as i32, c.y.round() as i32),
            color,
            interpolate,
        );
    }

    if (magnification - 1.0).abs() > f32::EPSILON {
        let w = (canvas.width() as f32 * magnification).round().max(1.0) as u32;
        let h = (canvas.height() as f32 * magnification).round().max(1.0) as u32;
        canvas = imageops::resize(&canvas, w, h, imageops::FilterType::Nearest);
    }
    canvas
}
