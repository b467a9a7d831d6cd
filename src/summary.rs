//! Wall coverage metrics

use crate::design::Design;
use crate::layout::ElementKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaSummary {
    /// Canvas width x height
    pub wall_area: f64,
    pub niche_count: usize,
    /// Sum over every niche, nested ones included
    pub niche_area: f64,
    pub net_area: f64,
    /// Share of the wall taken by niches, when there are any
    pub niche_percentage: Option<f64>,
}

impl AreaSummary {
    pub fn compute(design: &Design) -> Self {
        let canvas = &design.canvas().dimensions;
        let wall_area = canvas.width * canvas.height;

        let niches: Vec<_> = design
            .tree()
            .iter()
            .filter(|el| el.kind == ElementKind::Niche)
            .collect();
        let niche_area: f64 = niches.iter().map(|el| el.dimensions.area()).sum();

        let niche_percentage = (niche_area > 0.0 && wall_area != 0.0)
            .then(|| niche_area / wall_area * 100.0);

        Self {
            wall_area,
            niche_count: niches.len(),
            niche_area,
            net_area: wall_area - niche_area,
            niche_percentage,
        }
    }
}

/// cm² below one square meter, m² from there on
pub fn format_area(area_cm2: f64) -> String {
    if area_cm2 >= 10_000.0 {
        format!("{:.2} m²", area_cm2 / 10_000.0)
    } else {
        format!("{:.2} cm²", area_cm2)
    }
}
