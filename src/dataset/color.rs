//! Deterministic colormaps over [0, 1], assigned per load ordinal so the
//! same dataset renders the same palette on every pass.

/// ColorBrewer Spectral anchors, low to high.
const SPECTRAL_STOPS: [[u8; 3]; 11] = [
    [158, 1, 66],
    [213, 62, 79],
    [244, 109, 67],
    [253, 174, 97],
    [254, 224, 139],
    [255, 255, 191],
    [230, 245, 152],
    [171, 221, 164],
    [102, 194, 165],
    [50, 136, 189],
    [94, 79, 162],
];

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    ((a as f32) + ((b as f32) - (a as f32)) * t).round().clamp(0.0, 255.0) as u8
}

/// Piecewise-linear Spectral ramp; used for node colors.
pub(super) fn spectral(t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (SPECTRAL_STOPS.len() - 1) as f32;
    let index = (scaled.floor() as usize).min(SPECTRAL_STOPS.len() - 2);
    let fract = scaled - index as f32;

    let low = SPECTRAL_STOPS[index];
    let high = SPECTRAL_STOPS[index + 1];
    [
        lerp_channel(low[0], high[0], fract),
        lerp_channel(low[1], high[1], fract),
        lerp_channel(low[2], high[2], fract),
    ]
}

/// Polynomial approximation of the Turbo colormap; used for link colors.
pub(super) fn turbo(t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);

    let r = 34.61 + t * (1172.33 + t * (-10793.56 + t * (33300.12 + t * (-38394.49 + t * 14825.05))));
    let g = 23.31 + t * (557.33 + t * (1225.33 + t * (-3574.96 + t * (1073.77 + t * 707.56))));
    let b = 27.2 + t * (3211.1 + t * (-15327.97 + t * (27814.0 + t * (-22569.18 + t * 6838.66))));

    [
        r.round().clamp(0.0, 255.0) as u8,
        g.round().clamp(0.0, 255.0) as u8,
        b.round().clamp(0.0, 255.0) as u8,
    ]
}
