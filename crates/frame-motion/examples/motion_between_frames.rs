use frame_motion::interop::{estimate_frame_motion_image, overlay_to_image};
use frame_motion::MotionPipelineParams;
use image::ImageReader;

#[cfg(feature = "tracing")]
use frame_motion::core::init_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    init_tracing();

    let mut args = std::env::args().skip(1);
    let (Some(ref_path), Some(tgt_path)) = (args.next(), args.next()) else {
        eprintln!("Usage: motion_between_frames <frame1> <frame2> [overlay.png]");
        return Ok(());
    };

    let reference = ImageReader::open(&ref_path)?.decode()?.to_luma8();
    let target = ImageReader::open(&tgt_path)?.decode()?.to_luma8();

    let params = MotionPipelineParams::default();
    let estimate = estimate_frame_motion_image(&reference, &target, &params)?;

    let t = &estimate.model.transform;
    println!("affine matrix:");
    for row in t.to_array() {
        println!("  [{:9.4}, {:9.4}, {:9.4}]", row[0], row[1], row[2]);
    }
    println!(
        "{} selected, {} tracked, {} inliers ({:.0}%)",
        estimate.selected,
        estimate.correspondences.len(),
        estimate.model.inlier_count(),
        100.0 * estimate.inlier_ratio()
    );

    if let Some(out_path) = args.next() {
        let view = frame_motion::interop::gray_view(&reference);
        let overlay = overlay_to_image(&estimate.overlay(&view));
        overlay.save(&out_path)?;
        println!("overlay written to {out_path}");
    }

    Ok(())
}
