pub const DISTANCE_TO_HEIGHT_RATIO: f32 = 2.0; // x:y data window ratio

const X_PADDING_RATIO: f32 = 0.06;
const Y_PADDING_RATIO: f32 = 0.10;

/// Data-space extent of a chart or view, starting at the origin on x.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisWindow {
    pub x_span: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl AxisWindow {
    /// Window for a trajectory: x from 0, y from 0, padded and then widened
    /// on one axis so x:y keeps `ratio`.
    pub fn fixed_ratio(raw_max_x: f32, raw_max_y: f32, ratio: f32) -> Self {
        let raw_x_span = raw_max_x.max(1.0);
        let raw_y_span = raw_max_y.max(1.0);
        let x_pad = raw_x_span * X_PADDING_RATIO;
        let y_pad = raw_y_span * Y_PADDING_RATIO;

        let mut x_span = (raw_max_x + x_pad).max(1.0);
        let mut y_span = (raw_max_y + y_pad).max(1.0);

        if x_span / y_span < ratio {
            x_span = y_span * ratio;
        } else {
            y_span = x_span / ratio;
        }

        Self {
            x_span,
            y_min: 0.0,
            y_max: y_span,
        }
    }

    /// Window for a time series oscillating around zero.
    pub fn symmetric(duration: f32, amplitude: f32) -> Self {
        let y = (amplitude.abs() * (1.0 + Y_PADDING_RATIO)).max(1.0);
        Self {
            x_span: duration.max(1.0),
            y_min: -y,
            y_max: y,
        }
    }

    pub fn y_span(&self) -> f32 {
        self.y_max - self.y_min
    }

    /// Maps a data point into a screen rectangle whose y axis grows downward.
    pub fn to_screen(
        &self,
        x: f32,
        y: f32,
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
    ) -> (f32, f32) {
        let plot_w = (right - left).max(1.0);
        let plot_h = (bottom - top).max(1.0);
        let sx = left + (x / self.x_span) * plot_w;
        let sy = bottom - ((y - self.y_min) / self.y_span()) * plot_h;
        (sx, sy)
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisWindow, DISTANCE_TO_HEIGHT_RATIO};

    #[test]
    fn keeps_ratio_for_tall_flights() {
        let window = AxisWindow::fixed_ratio(10.0, 20.0, DISTANCE_TO_HEIGHT_RATIO);
        assert!((window.x_span / window.y_span() - 2.0).abs() < 1e-5);
        assert!(window.y_max >= 22.0 - 1e-4);
    }

    #[test]
    fn keeps_ratio_for_long_flights() {
        let window = AxisWindow::fixed_ratio(100.0, 5.0, DISTANCE_TO_HEIGHT_RATIO);
        assert!((window.x_span - 106.0).abs() < 1e-4);
        assert!((window.y_max - 53.0).abs() < 1e-4);
    }

    #[test]
    fn symmetric_window_is_centered() {
        let window = AxisWindow::symmetric(8.0, -20.0);
        assert_eq!(window.y_min, -window.y_max);
        assert!((window.y_max - 22.0).abs() < 1e-4);
    }

    #[test]
    fn maps_corners_to_screen() {
        let window = AxisWindow::symmetric(10.0, 10.0);
        let (x, y) = window.to_screen(0.0, window.y_min, 100.0, 300.0, 50.0, 150.0);
        assert_eq!((x, y), (100.0, 150.0));
        let (x, y) = window.to_screen(10.0, window.y_max, 100.0, 300.0, 50.0, 150.0);
        assert!((x - 300.0).abs() < 1e-4 && (y - 50.0).abs() < 1e-4);
    }
}
