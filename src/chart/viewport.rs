/// Range of data values covered by the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DataBounds {
    /// Smallest bounds holding every finite point and every reference `y`.
    /// Flat ranges are widened so the mapping never divides by zero, and the
    /// y range gets a 5% margin on both sides.
    pub fn fit(points: impl IntoIterator<Item = (f64, f64)>, reference_ys: &[f64]) -> Option<Self> {
        let mut bounds: Option<DataBounds> = None;

        for (x, y) in points {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            bounds = Some(match bounds {
                None => DataBounds { x_min: x, x_max: x, y_min: y, y_max: y },
                Some(b) => DataBounds {
                    x_min: b.x_min.min(x),
                    x_max: b.x_max.max(x),
                    y_min: b.y_min.min(y),
                    y_max: b.y_max.max(y),
                },
            });
        }

        let mut bounds = bounds?;

        for y in reference_ys.iter().copied().filter(|y| y.is_finite()) {
            bounds.y_min = bounds.y_min.min(y);
            bounds.y_max = bounds.y_max.max(y);
        }

        if bounds.x_max <= bounds.x_min {
            // Single instant: show one hour either side
            bounds.x_min -= 3600.0;
            bounds.x_max += 3600.0;
        }

        if bounds.y_max <= bounds.y_min {
            let pad = (bounds.y_min.abs() * 0.1).max(0.01);
            bounds.y_min -= pad;
            bounds.y_max += pad;
        }

        let margin = (bounds.y_max - bounds.y_min) * 0.05;
        bounds.y_min -= margin;
        bounds.y_max += margin;

        Some(bounds)
    }

    pub fn x_range(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn y_range(&self) -> f64 {
        self.y_max - self.y_min
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Maps data coordinates onto SVG pixels.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    plot_area: PlotArea,
    data_bounds: DataBounds,
}

impl Viewport {
    pub fn new(plot_area: PlotArea, data_bounds: DataBounds) -> Self {
        Viewport { plot_area, data_bounds }
    }

    pub fn plot_area(&self) -> PlotArea {
        self.plot_area
    }

    pub fn data_bounds(&self) -> DataBounds {
        self.data_bounds
    }

    pub fn map_x(&self, x: f64) -> f64 {
        let t = (x - self.data_bounds.x_min) / self.data_bounds.x_range();
        self.plot_area.left + t * self.plot_area.width
    }

    /// SVG y grows downwards
    pub fn map_y(&self, y: f64) -> f64 {
        let t = (y - self.data_bounds.y_min) / self.data_bounds.y_range();
        self.plot_area.bottom() - t * self.plot_area.height
    }
}
