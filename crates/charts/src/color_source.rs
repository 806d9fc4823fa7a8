use std::fmt;

use chart3d_graphics::Color;

/// Supplies the fill color for a data item.
pub trait ColorSource: fmt::Debug {
    fn color(&self, series: usize, row: usize, column: usize) -> Color;

    /// Color shown for a series in a legend.
    fn legend_color(&self, series: usize) -> Color {
        self.color(series, 0, 0)
    }
}

fn from_colorous(color: colorous::Color) -> Color {
    Color::rgb(color.r, color.g, color.b)
}

/// Cycles through a fixed palette by series index.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardColorSource {
    palette: Vec<Color>,
}

impl Default for StandardColorSource {
    fn default() -> Self {
        Self::category10()
    }
}

impl StandardColorSource {
    /// An empty palette falls back to the category palette.
    pub fn new(palette: Vec<Color>) -> Self {
        if palette.is_empty() {
            return Self::category10();
        }
        Self { palette }
    }

    pub fn category10() -> Self {
        Self {
            palette: colorous::CATEGORY10.iter().copied().map(from_colorous).collect(),
        }
    }

    pub fn paired() -> Self {
        Self {
            palette: colorous::PAIRED.iter().copied().map(from_colorous).collect(),
        }
    }

    /// `count` evenly spaced samples of the viridis gradient.
    pub fn viridis(count: usize) -> Self {
        let count = count.max(1);
        Self {
            palette: (0..count)
                .map(|i| from_colorous(colorous::VIRIDIS.eval_rational(i, count)))
                .collect(),
        }
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }
}

impl ColorSource for StandardColorSource {
    fn color(&self, series: usize, _row: usize, _column: usize) -> Color {
        self.palette[series % self.palette.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles_by_series() {
        let source = StandardColorSource::category10();
        assert_eq!(source.palette().len(), 10);
        assert_eq!(source.color(0, 3, 4), source.color(10, 0, 0));
        assert_ne!(source.color(0, 0, 0), source.color(1, 0, 0));
        assert_eq!(source.color(0, 0, 0).to_hex(), "#1f77b4");
    }

    #[test]
    fn test_empty_palette_falls_back() {
        assert_eq!(StandardColorSource::new(vec![]), StandardColorSource::default());
        let single = StandardColorSource::new(vec![Color::RED]);
        assert_eq!(single.color(7, 0, 0), Color::RED);
        assert_eq!(StandardColorSource::viridis(0).palette().len(), 1);
    }
}
