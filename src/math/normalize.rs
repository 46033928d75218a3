use std::f32::consts::TAU;

/// Clamp `v` into `[vmin, vmax]` and remap it linearly onto `[tmin, tmax]`.
///
/// Every remap in the animation goes through this function so the clamp
/// happens before the lerp in exactly one place. `vmax` must differ from `vmin`.
pub fn normalize(v: f32, vmin: f32, vmax: f32, tmin: f32, tmax: f32) -> f32 {
    let nv = v.min(vmax).max(vmin);
    let pc = (nv - vmin) / (vmax - vmin);
    tmin + pc * (tmax - tmin)
}

/// Fold an accumulated angle back into `[0, 2π)` so per-tick steps keep
/// their full f32 precision on long runs
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(TAU)
}

/// Close `blend` of the remaining distance between `current` and `target`
pub fn ease_toward(current: f32, target: f32, blend: f32) -> f32 {
    current + (target - current) * blend
}
