//! Generate SVG renders of sample charts for the README.

mod painter;

use std::error::Error;
use std::f64::consts::PI;
use std::fs;

use chart3d_charts::{
    AreaRenderer3D, BarConfig, BarRenderer3D, CategoryRenderer3D, CategoryScale, ItemLabels, LineConfig,
    LineRenderer3D, MarkerShape, PieConfig, PieRenderer3D, PlotContext, ScatterConfig, ScatterXYZRenderer,
    StandardColorSource, StandardItemLabelGenerator, XYZPlotContext,
};
use chart3d_data::json::read_keyed_values_3d;
use chart3d_data::{Range, StandardCategoryDataset3D, StandardPieDataset3D, XYZSeries, XYZSeriesCollection};
use chart3d_graphics::color::Color;
use chart3d_graphics::geometry::dimension::{Dimension2D, Dimension3D};
use chart3d_graphics::render::{Drawable3D, RenderConfig};
use chart3d_graphics::view::ViewPoint3D;
use chart3d_graphics::world::World;

use painter::SvgPainter;

const OUT_DIR: &str = "docs/renders";
const SIZE: Dimension2D = Dimension2D {
    width: 640.0,
    height: 420.0,
};
const PLOT_BOX: Dimension3D = Dimension3D {
    width: 12.0,
    height: 6.0,
    depth: 4.0,
};

const FRUIT_JSON: &str = r#"{
  "columnKeys": ["Q1", "Q2", "Q3", "Q4"],
  "rowKeys": ["2023", "2024"],
  "data": [
    { "seriesKey": "Oranges", "rows": { "2023": [4.0, 6.5, 3.0, 5.2], "2024": [5.1, 7.0, 4.4, 6.0] } },
    { "seriesKey": "Apples", "rows": { "2023": [2.2, 3.5, 6.8, 4.1], "2024": [3.0, null, 5.5, 4.8] } }
  ]
}"#;

type Cube = StandardCategoryDataset3D<String, String, String>;

fn fruit() -> Result<Cube, Box<dyn Error>> {
    Ok(StandardCategoryDataset3D::from_values(read_keyed_values_3d(FRUIT_JSON)?))
}

fn save(name: &str, world: World) -> Result<(), Box<dyn Error>> {
    let config = RenderConfig {
        background: Some(Color::WHITE),
        ..RenderConfig::default()
    };
    let mut drawable = Drawable3D::new(world, ViewPoint3D::default()).with_config(config);
    drawable.zoom_to_fit(SIZE)?;
    let mut painter = SvgPainter::new(SIZE);
    let info = drawable.draw(&mut painter, SIZE);
    let path = format!("{OUT_DIR}/{name}.svg");
    svg::save(&path, &painter.into_document())?;
    println!(
        "  {name}: {} faces drawn, {} culled, {} item polygons -> {path}",
        info.rendered_faces(),
        info.culled_faces,
        info.items.len()
    );
    Ok(())
}

fn category_chart(
    name: &str,
    renderer: &dyn CategoryRenderer3D,
    data: &Cube,
    range: Option<Range>,
    half_width_ends: bool,
) -> Result<(), Box<dyn Error>> {
    let range = match range.or_else(|| renderer.find_value_range(data)) {
        Some(range) => range,
        None => {
            println!("  {name}: no values, skipped");
            return Ok(());
        }
    };
    let mut ctx = PlotContext::for_dataset(data, PLOT_BOX, range)?;
    if half_width_ends {
        ctx.column_axis = CategoryScale::new(ctx.column_axis.count()).with_half_width_ends(true, true);
    }
    let mut world = World::new();
    renderer.compose(&mut world, &ctx, data)?;
    save(name, world)
}

fn main() -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(OUT_DIR)?;
    let data = fruit()?;

    println!("=== Category Charts ===");
    {
        let labels = ItemLabels::new(StandardItemLabelGenerator::default().with_precision(1));
        let bars = BarRenderer3D::new(BarConfig::default()).with_labels(labels);
        category_chart("bar", &bars, &data, None, false)?;
    }
    {
        let stacked = BarRenderer3D::stacked(BarConfig::default()).with_colors(StandardColorSource::paired());
        category_chart("bar_stacked", &stacked, &data, None, false)?;
    }
    {
        // a narrow axis range shows the pegged bar ends
        let config = BarConfig {
            base_color: Some(Color::LIGHT_GRAY),
            top_color: Some(Color::RED),
            ..BarConfig::default()
        };
        category_chart("bar_pegged", &BarRenderer3D::new(config), &data, Some(Range::new(2.5, 6.0)?), false)?;
    }
    category_chart("area", &AreaRenderer3D::default(), &data, None, true)?;
    {
        let line = LineRenderer3D::new(LineConfig {
            width: 0.6,
            height: 0.3,
            ..LineConfig::default()
        });
        category_chart("line", &line, &data, None, true)?;
        // the top of the line is cut where it leaves the axis range
        category_chart("line_clipped", &line, &data, Some(Range::new(3.0, 6.0)?), true)?;
    }

    println!("\n=== Pie Chart ===");
    {
        let mut shares = StandardPieDataset3D::new();
        for (city, population) in [("London", 8.9), ("Paris", 2.1), ("Berlin", 3.6), ("Madrid", 3.3), ("Rome", 2.8)] {
            shares.add(city, Some(population));
        }
        let renderer = PieRenderer3D::new(PieConfig {
            explode: 0.15,
            ..PieConfig::default()
        });
        let mut world = World::new();
        renderer.compose(&mut world, &shares)?;
        save("pie", world)?;
    }

    println!("\n=== Scatter Chart ===");
    {
        let mut data = XYZSeriesCollection::new();
        for (key, phase) in [("helix A", 0.0), ("helix B", PI)] {
            let mut series = XYZSeries::new(key);
            for i in 0..40 {
                let t = i as f64 * PI / 10.0;
                series.add((t + phase).cos(), t, (t + phase).sin());
            }
            data.add(series)?;
        }
        let ctx = XYZPlotContext::for_dataset(&data, Dimension3D::new(6.0, 8.0, 6.0))?;
        let renderer = ScatterXYZRenderer::new(ScatterConfig {
            size: 0.3,
            shape: MarkerShape::Sphere,
            ..ScatterConfig::default()
        })
        .with_colors(StandardColorSource::viridis(2));
        let mut world = World::new();
        renderer.compose(&mut world, &ctx, &data)?;
        save("scatter", world)?;
    }

    println!("\nAll renders written to {OUT_DIR}/");
    Ok(())
}
