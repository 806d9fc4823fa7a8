use std::f64::consts::PI;
use std::fmt::Display;

use chart3d_data::KeyedValues;
use chart3d_graphics::object::LabelSpec;
use chart3d_graphics::object::primitives::{create_label, create_pie_label_markers, create_pie_segment};
use chart3d_graphics::{Color, ItemKey, Tolerance, World};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::color_source::{ColorSource, StandardColorSource};
use crate::error::ChartError;
use crate::{DATA_PARTITION, LABEL_PARTITION};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieConfig {
    pub radius: f64,
    /// Height of the pie along y.
    pub depth: f64,
    /// Rim steps per half turn.
    pub segments: usize,
    /// Distance every section is pushed out from the centre.
    pub explode: f64,
    /// Y of the bottom of the pie.
    pub base: f64,
    /// Draw each section's key beside it.
    pub section_labels: bool,
    pub label_color: Color,
    /// Add the marker sheets used to place section labels.
    pub label_markers: bool,
}

impl Default for PieConfig {
    fn default() -> Self {
        Self {
            radius: 4.0,
            depth: 0.5,
            segments: 40,
            explode: 0.0,
            base: 0.0,
            section_labels: true,
            label_color: Color::BLACK,
            label_markers: false,
        }
    }
}

/// Draws a keyed list of values as a round pie, one wedge per positive
/// value, starting at angle zero and turning counter-clockwise.
#[derive(Debug)]
pub struct PieRenderer3D {
    pub config: PieConfig,
    pub colors: Box<dyn ColorSource>,
}

impl Default for PieRenderer3D {
    fn default() -> Self {
        Self::new(PieConfig::default())
    }
}

/// The angular extent of one section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

impl PieRenderer3D {
    pub fn new(config: PieConfig) -> Self {
        Self {
            config,
            colors: Box::new(StandardColorSource::default()),
        }
    }

    pub fn with_colors(mut self, colors: impl ColorSource + 'static) -> Self {
        self.colors = Box::new(colors);
        self
    }

    /// Angles of every drawable section. Empty, zero and negative values
    /// take no part in the pie.
    pub fn sweeps<D>(&self, data: &D) -> Vec<Sweep>
    where
        D: KeyedValues<Item = f64> + ?Sized,
    {
        let tol = Tolerance::default();
        let positive = |i: usize| data.value(i).filter(|v| *v > 0.0);
        let total: f64 = (0..data.item_count()).filter_map(&positive).sum();
        if total <= 0.0 || !total.is_finite() {
            return Vec::new();
        }
        let mut start = 0.0;
        let mut sweeps = Vec::new();
        for index in 0..data.item_count() {
            let Some(value) = positive(index) else {
                continue;
            };
            let angle = 2.0 * PI * value / total;
            if tol.is_zero_angle(angle) {
                continue;
            }
            sweeps.push(Sweep {
                index,
                start,
                end: start + angle,
            });
            start += angle;
        }
        sweeps
    }

    #[instrument(skip_all)]
    pub fn compose<D>(&self, world: &mut World, data: &D) -> Result<(), ChartError>
    where
        D: KeyedValues<Item = f64> + ?Sized,
        D::Key: Display,
    {
        let cfg = &self.config;
        if cfg.radius <= 0.0 || cfg.depth <= 0.0 || cfg.segments == 0 {
            return Err(ChartError::InvalidConfig {
                reason: format!(
                    "pie radius {}, depth {}, segments {}",
                    cfg.radius, cfg.depth, cfg.segments
                ),
            });
        }
        let sweeps = self.sweeps(data);
        let inc = PI / cfg.segments as f64;
        for s in &sweeps {
            let item = ItemKey::new(s.index, 0, 0);
            let segment = create_pie_segment(
                cfg.radius,
                cfg.explode,
                cfg.base,
                cfg.depth,
                s.start,
                s.end,
                inc,
                self.colors.color(s.index, 0, 0),
            )
            .with_item_key(item);
            world.add_to_partition(DATA_PARTITION, segment);

            if cfg.label_markers {
                let markers = create_pie_label_markers(
                    cfg.radius * 1.2,
                    cfg.explode,
                    cfg.base - cfg.depth * 0.05,
                    cfg.depth * 1.1,
                    s.start,
                    s.end,
                );
                world.add_all(LABEL_PARTITION, markers);
            }
            if cfg.section_labels {
                if let Some(key) = data.key(s.index) {
                    let angle = (s.start + s.end) / 2.0;
                    let r = cfg.radius * 1.2 + cfg.explode;
                    let label = create_label(
                        LabelSpec::new(key.to_string(), cfg.label_color),
                        r * angle.cos(),
                        cfg.base + cfg.depth / 2.0,
                        r * angle.sin(),
                    )
                    .with_item_key(item);
                    world.add_to_partition(LABEL_PARTITION, label);
                }
            }
        }
        debug!(sections = sweeps.len(), "pie composed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart3d_data::StandardPieDataset3D;

    fn dataset() -> StandardPieDataset3D<&'static str> {
        let mut data = StandardPieDataset3D::new();
        data.add("A", Some(1.0));
        data.add("B", None);
        data.add("C", Some(3.0));
        data.add("D", Some(-2.0));
        data
    }

    #[test]
    fn test_sweeps_cover_a_full_turn() {
        let sweeps = PieRenderer3D::default().sweeps(&dataset());
        assert_eq!(sweeps.len(), 2);
        assert_eq!(sweeps[0].index, 0);
        assert_eq!(sweeps[1].index, 2);
        assert!((sweeps[0].end - PI / 2.0).abs() < 1e-12);
        assert!((sweeps[1].start - sweeps[0].end).abs() < 1e-12);
        assert!((sweeps[1].end - 2.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn test_compose_adds_segments_and_labels() {
        let mut world = World::new();
        PieRenderer3D::default().compose(&mut world, &dataset()).unwrap();
        assert_eq!(world.partition(DATA_PARTITION).count(), 2);
        assert_eq!(world.partition(LABEL_PARTITION).count(), 2);
        let keys: Vec<_> = world
            .partition(DATA_PARTITION)
            .filter_map(|(_, o)| o.item_key())
            .map(|k| k.series)
            .collect();
        assert_eq!(keys, vec![0, 2]);
    }

    #[test]
    fn test_markers_and_bad_config() {
        let config = PieConfig {
            label_markers: true,
            section_labels: false,
            ..PieConfig::default()
        };
        let mut world = World::new();
        PieRenderer3D::new(config).compose(&mut world, &dataset()).unwrap();
        assert_eq!(world.partition(LABEL_PARTITION).count(), 4);

        let bad = PieRenderer3D::new(PieConfig {
            segments: 0,
            ..PieConfig::default()
        });
        assert!(bad.compose(&mut World::new(), &dataset()).is_err());
    }

    #[test]
    fn test_empty_pie_draws_nothing() {
        let mut world = World::new();
        let data = StandardPieDataset3D::<&str>::new();
        PieRenderer3D::default().compose(&mut world, &data).unwrap();
        assert_eq!(world.object_count(), 0);
    }
}
