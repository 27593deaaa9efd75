pub const LAYER_SPEEDS: [f64; 3] = [0.2, 0.5, 0.9];
pub const DEFAULT_SPEED: f64 = 0.5;

/// Vertical translation in pixels for a layer moving at `speed`.
pub fn offset(scroll_y: f64, speed: f64) -> f64 {
    if !scroll_y.is_finite() {
        return 0.0;
    }
    -(scroll_y * speed)
}

pub fn layer_transform(scroll_y: f64, speed: f64) -> String {
    format!("translate3d(0, {}px, 0)", offset(scroll_y, speed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faster_layers_move_further() {
        let offsets: Vec<f64> = LAYER_SPEEDS.iter().map(|s| offset(100.0, *s)).collect();
        assert_eq!(offsets, vec![-20.0, -50.0, -90.0]);
        assert_eq!(layer_transform(10.0, DEFAULT_SPEED), "translate3d(0, -5px, 0)");
    }
}
