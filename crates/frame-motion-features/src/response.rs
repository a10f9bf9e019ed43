use frame_motion_core::GrayImageView;

/// Per-pixel corner response: the smaller eigenvalue of the 2x2 gradient
/// covariance accumulated over a `(2r+1)^2` window.
///
/// A large smaller-eigenvalue means the neighbourhood's intensity varies
/// distinctly in two directions, which is exactly what the tracker's
/// normal equations need. Border pixels (where the window or the gradient
/// stencil would leave the frame) are left at zero.
pub fn corner_response(frame: &GrayImageView<'_>, window_radius: usize) -> Vec<f32> {
    let w = frame.width;
    let h = frame.height;
    let mut response = vec![0.0f32; w * h];
    if w < 3 || h < 3 {
        return response;
    }

    // Central-difference gradients, zero on the one-pixel border.
    let mut gx = vec![0.0f32; w * h];
    let mut gy = vec![0.0f32; w * h];
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let xi = x as i32;
            let yi = y as i32;
            gx[y * w + x] = 0.5 * (frame.get(xi + 1, yi) as f32 - frame.get(xi - 1, yi) as f32);
            gy[y * w + x] = 0.5 * (frame.get(xi, yi + 1) as f32 - frame.get(xi, yi - 1) as f32);
        }
    }

    let r = window_radius;
    let lo_x = r + 1;
    let lo_y = r + 1;
    if w < 2 * lo_x || h < 2 * lo_y {
        return response;
    }

    for y in lo_y..h - lo_y {
        for x in lo_x..w - lo_x {
            let mut sxx = 0.0f32;
            let mut sxy = 0.0f32;
            let mut syy = 0.0f32;
            for dy in 0..=2 * r {
                let row = (y + dy - r) * w;
                for dx in 0..=2 * r {
                    let idx = row + x + dx - r;
                    let ix = gx[idx];
                    let iy = gy[idx];
                    sxx += ix * ix;
                    sxy += ix * iy;
                    syy += iy * iy;
                }
            }

            // Smaller eigenvalue of [[sxx, sxy], [sxy, syy]].
            let trace = sxx + syy;
            let diff = sxx - syy;
            let root = (diff * diff + 4.0 * sxy * sxy).sqrt();
            response[y * w + x] = 0.5 * (trace - root);
        }
    }

    response
}
