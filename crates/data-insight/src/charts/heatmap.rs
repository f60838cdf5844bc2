//! Annotated correlation heatmap.
//!
//! Laid out in pixel space: a square grid of cells, one per column pair,
//! coloured on a blue-white-red scale from -1 to 1.

use super::{ChartStyle, draw_err};
use crate::error::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);
const MISSING: RGBColor = RGBColor(200, 200, 200);

/// Colour for a correlation in `[-1, 1]`; `NaN` is grey.
pub fn coolwarm(r: f64) -> RGBColor {
    if r.is_nan() {
        return MISSING;
    }

    let t = (r.clamp(-1.0, 1.0) + 1.0) / 2.0;
    let (from, to, f) = if t < 0.5 {
        (COOL, NEUTRAL, t * 2.0)
    } else {
        (NEUTRAL, WARM, (t - 0.5) * 2.0)
    };
    let mix = |a: f64, b: f64| (a + (b - a) * f).round() as u8;

    RGBColor(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// Text shown inside a cell.
pub fn annotation(r: f64) -> String {
    if r.is_nan() {
        String::new()
    } else {
        format!("{r:.2}")
    }
}

/// Draw `matrix` (labelled by `columns`) to `path` as PNG.
pub(crate) fn render_heatmap(
    path: &Path,
    columns: &[String],
    matrix: &[Vec<f64>],
    style: ChartStyle,
) -> Result<()> {
    let chart_name = path.display().to_string();
    let err = |e| draw_err(&chart_name, e);

    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(err)?;

    let area = if style.with_text {
        root.titled("Correlation Heatmap", ("sans-serif", 20))
            .map_err(err)?
    } else {
        root.clone()
    };

    let n = columns.len().max(1) as i32;
    let (width, height) = area.dim_in_pixel();
    let (width, height) = (width as i32, height as i32);

    let longest = columns.iter().map(|c| c.chars().count()).max().unwrap_or(0) as i32;
    let (left, bottom) = if style.with_text {
        ((longest * 7 + 12).clamp(30, (width / 3).max(30)), 30)
    } else {
        (10, 10)
    };
    let (top, right) = (10, 10);

    let cell_w = ((width - left - right) / n).max(1);
    let cell_h = ((height - top - bottom) / n).max(1);

    for (i, row) in matrix.iter().enumerate() {
        for (j, r) in row.iter().enumerate() {
            let x0 = left + j as i32 * cell_w;
            let y0 = top + i as i32 * cell_h;
            area.draw(&Rectangle::new(
                [(x0, y0), (x0 + cell_w, y0 + cell_h)],
                coolwarm(*r).filled(),
            ))
            .map_err(err)?;

            if style.with_text && !r.is_nan() {
                let ink = if r.abs() > 0.6 { WHITE } else { BLACK };
                let text_style = TextStyle::from(("sans-serif", 13).into_font())
                    .color(&ink)
                    .pos(Pos::new(HPos::Center, VPos::Center));
                area.draw(&Text::new(
                    annotation(*r),
                    (x0 + cell_w / 2, y0 + cell_h / 2),
                    text_style,
                ))
                .map_err(err)?;
            }
        }
    }

    if style.with_text {
        let label_font = ("sans-serif", 12).into_font();
        for (k, name) in columns.iter().enumerate() {
            let k = k as i32;
            let below = TextStyle::from(label_font.clone()).pos(Pos::new(HPos::Center, VPos::Top));
            area.draw(&Text::new(
                name.clone(),
                (left + k * cell_w + cell_w / 2, top + n * cell_h + 6),
                below,
            ))
            .map_err(err)?;

            let beside =
                TextStyle::from(label_font.clone()).pos(Pos::new(HPos::Right, VPos::Center));
            area.draw(&Text::new(
                name.clone(),
                (left - 6, top + k * cell_h + cell_h / 2),
                beside,
            ))
            .map_err(err)?;
        }
    }

    root.present().map_err(err)?;
    Ok(())
}
