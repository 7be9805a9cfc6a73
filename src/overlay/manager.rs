use crate::core::geo::{GeoPos, PlotPoint, Viewport};
use crate::core::projection::Projection;
use crate::grid::planner::GridSpec;
use crate::overlay::labels::{
    cursor_readout_style, format_lat_label, format_lon_label, meridian_label_style,
    parallel_label_style,
};
use crate::overlay::shapes;
use crate::prelude::HashMap;
use crate::surface::{
    Color, LineStyle, MarkerStyle, OverlayHandle, RenderSurface, TextAnchor, TextStyle,
};
use crate::Result;

/// Width of grid lines, in points.
const GRID_LINE_WIDTH: f32 = 0.2;
/// Samples per grid line; enough to follow a non-linear latitude axis.
const GRID_LINE_SAMPLES: usize = 64;
/// Axes-fraction anchor of the cursor readout (top-right corner).
const CURSOR_READOUT_ANCHOR: (f64, f64) = (0.995, 0.995);

/// Buckets the overlay set is tracked under.
///
/// Every grid line exists twice, once per pass: a solid dark line and a
/// dashed light line, so the grid stays visible over arbitrary imagery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayCategory {
    MeridianDark,
    MeridianLight,
    ParallelDark,
    ParallelLight,
    Label,
    CursorReadout,
    Annotation,
}

impl OverlayCategory {
    pub const ALL: [OverlayCategory; 7] = [
        OverlayCategory::MeridianDark,
        OverlayCategory::MeridianLight,
        OverlayCategory::ParallelDark,
        OverlayCategory::ParallelLight,
        OverlayCategory::Label,
        OverlayCategory::CursorReadout,
        OverlayCategory::Annotation,
    ];

    /// The four grid-line categories, in clearing order.
    pub const GRID: [OverlayCategory; 4] = [
        OverlayCategory::ParallelDark,
        OverlayCategory::ParallelLight,
        OverlayCategory::MeridianDark,
        OverlayCategory::MeridianLight,
    ];
}

/// A point, text, or image annotation pinned to a geographic position.
///
/// Annotations live outside the grid lifecycle: grid redraws never touch
/// them, only an explicit clear of their category does.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    Point {
        at: GeoPos,
        style: MarkerStyle,
    },
    Text {
        at: GeoPos,
        content: String,
        style: TextStyle,
    },
    Image {
        at: GeoPos,
        png: Vec<u8>,
        zoom: f64,
        alpha: f32,
    },
}

/// Owns every overlay handle attached to the render surface.
///
/// The invariant this type exists for: every handle in the set corresponds
/// to an object actually attached to the surface, and every clear detaches
/// each handle exactly once. All mutation of the drawn set goes through
/// here; nothing else holds handles.
#[derive(Default)]
pub struct OverlayManager {
    overlays: HashMap<OverlayCategory, Vec<OverlayHandle>>,
}

impl OverlayManager {
    pub fn new() -> Self {
        Self {
            overlays: HashMap::default(),
        }
    }

    /// Live handle count in one category.
    pub fn count(&self, category: OverlayCategory) -> usize {
        self.overlays.get(&category).map_or(0, Vec::len)
    }

    /// True when no overlay of any category is attached.
    pub fn is_empty(&self) -> bool {
        self.overlays.values().all(Vec::is_empty)
    }

    /// Detaches every overlay in one category. Clearing an empty category
    /// is a no-op, never an error.
    pub fn clear(&mut self, surface: &mut dyn RenderSurface, category: OverlayCategory) {
        if let Some(handles) = self.overlays.get_mut(&category) {
            for handle in handles.drain(..) {
                if let Err(e) = surface.remove(handle) {
                    log::warn!("failed to detach {category:?} overlay {handle:?}: {e}");
                }
            }
        }
    }

    /// Detaches everything: grid, labels, annotations, cursor readout.
    pub fn clear_all(&mut self, surface: &mut dyn RenderSurface) {
        for category in OverlayCategory::ALL {
            self.clear(surface, category);
        }
    }

    /// Detaches the four grid-line categories, leaving labels and
    /// annotations alone.
    pub fn clear_grid(&mut self, surface: &mut dyn RenderSurface) {
        for category in OverlayCategory::GRID {
            self.clear(surface, category);
        }
    }

    fn push(&mut self, category: OverlayCategory, handle: OverlayHandle) {
        self.overlays.entry(category).or_default().push(handle);
    }

    /// Draws the grid lines of a spec, two passes per line.
    ///
    /// Expects the grid categories to be cleared beforehand; issues a single
    /// redraw request for the whole batch, not one per line.
    pub fn draw_grid(
        &mut self,
        surface: &mut dyn RenderSurface,
        projection: &Projection,
        spec: &GridSpec,
    ) {
        if spec.is_empty() {
            return;
        }
        let domain = projection.domain();
        let dark = LineStyle::solid(Color::BLACK, GRID_LINE_WIDTH);
        let light = LineStyle::dashed(Color::WHITE, GRID_LINE_WIDTH, 1.0, 1.0);

        for &lat in &spec.parallels {
            let points = sample_parallel(projection, &domain, lat);
            self.draw_line_pair(
                surface,
                &points,
                (OverlayCategory::ParallelDark, &dark),
                (OverlayCategory::ParallelLight, &light),
            );
        }
        for &lon in &spec.meridians {
            let points = sample_meridian(projection, &domain, lon);
            self.draw_line_pair(
                surface,
                &points,
                (OverlayCategory::MeridianDark, &dark),
                (OverlayCategory::MeridianLight, &light),
            );
        }
        surface.request_redraw();
    }

    fn draw_line_pair(
        &mut self,
        surface: &mut dyn RenderSurface,
        points: &[PlotPoint],
        dark: (OverlayCategory, &LineStyle),
        light: (OverlayCategory, &LineStyle),
    ) {
        if points.len() < 2 {
            return;
        }
        for (category, style) in [dark, light] {
            match surface.draw_polyline(points, style) {
                Ok(handle) => self.push(category, handle),
                Err(e) => log::warn!("grid line dropped: {e}"),
            }
        }
    }

    /// Replaces all grid labels with labels for the given spec.
    ///
    /// Old labels are removed first even when labels are currently disabled,
    /// so a toggle-off wipes stale text. Labels are clipped to the viewport
    /// pegged to the projection domain and pinned along its edges.
    pub fn draw_labels(
        &mut self,
        surface: &mut dyn RenderSurface,
        projection: &Projection,
        spec: &GridSpec,
        viewport: &Viewport,
        enabled: bool,
    ) {
        self.clear(surface, OverlayCategory::Label);
        if !enabled {
            surface.request_redraw();
            return;
        }

        let pegged = viewport.clamped_to(&projection.domain());
        let lat_style = parallel_label_style();
        let lon_style = meridian_label_style();

        for &lat in &spec.parallels {
            if lat > pegged.lat_max || lat < pegged.lat_min {
                continue;
            }
            self.place_label(
                surface,
                projection,
                GeoPos::new(pegged.lon_min, lat),
                &format_lat_label(lat),
                &lat_style,
            );
        }
        for &lon in &spec.meridians {
            if lon > pegged.lon_max || lon < pegged.lon_min {
                continue;
            }
            self.place_label(
                surface,
                projection,
                GeoPos::new(lon, pegged.lat_min),
                &format_lon_label(lon),
                &lon_style,
            );
        }
        surface.request_redraw();
    }

    fn place_label(
        &mut self,
        surface: &mut dyn RenderSurface,
        projection: &Projection,
        at: GeoPos,
        text: &str,
        style: &TextStyle,
    ) {
        let anchor = match projection.to_plot(at) {
            Ok(point) => TextAnchor::Data(point),
            // Outside the projection domain: no label, no error.
            Err(_) => return,
        };
        match surface.draw_text(anchor, text, style) {
            Ok(handle) => self.push(OverlayCategory::Label, handle),
            Err(e) => log::warn!("grid label dropped: {e}"),
        }
    }

    /// Draws one annotation at its geographic position.
    pub fn draw_annotation(
        &mut self,
        surface: &mut dyn RenderSurface,
        projection: &Projection,
        annotation: &Annotation,
    ) -> Result<()> {
        let at = match annotation {
            Annotation::Point { at, .. }
            | Annotation::Text { at, .. }
            | Annotation::Image { at, .. } => *at,
        };
        let point = projection.to_plot(at)?;
        let handle = match annotation {
            Annotation::Point { style, .. } => surface.draw_marker(point, style)?,
            Annotation::Text { content, style, .. } => {
                surface.draw_text(TextAnchor::Data(point), content, style)?
            }
            Annotation::Image {
                png, zoom, alpha, ..
            } => surface.draw_image(point, png, *zoom, *alpha)?,
        };
        self.push(OverlayCategory::Annotation, handle);
        surface.request_redraw();
        Ok(())
    }

    /// Draws a geodesic range ring around a center position.
    pub fn draw_range_ring(
        &mut self,
        surface: &mut dyn RenderSurface,
        projection: &Projection,
        center: GeoPos,
        range_km: f64,
    ) {
        let ring = shapes::range_ring(center, range_km);
        self.draw_geo_polyline(
            surface,
            projection,
            &ring,
            &LineStyle::solid(Color::RED.with_alpha(128), 0.5),
        );
    }

    /// Draws the great-circle arc between two positions.
    pub fn draw_great_circle(
        &mut self,
        surface: &mut dyn RenderSurface,
        projection: &Projection,
        a: GeoPos,
        b: GeoPos,
    ) {
        let arc = shapes::great_circle_arc(a, b);
        self.draw_geo_polyline(
            surface,
            projection,
            &arc,
            &LineStyle::solid(Color::RED, 0.5),
        );
    }

    fn draw_geo_polyline(
        &mut self,
        surface: &mut dyn RenderSurface,
        projection: &Projection,
        positions: &[GeoPos],
        style: &LineStyle,
    ) {
        let points: Vec<PlotPoint> = positions
            .iter()
            .filter_map(|&pos| projection.to_plot(pos).ok())
            .collect();
        if points.len() < 2 {
            return;
        }
        match surface.draw_polyline(&points, style) {
            Ok(handle) => self.push(OverlayCategory::Annotation, handle),
            Err(e) => log::warn!("shape dropped: {e}"),
        }
        surface.request_redraw();
    }

    /// Creates or updates the single cursor readout overlay in place.
    pub fn upsert_cursor_readout(
        &mut self,
        surface: &mut dyn RenderSurface,
        text: &str,
    ) -> Result<()> {
        let existing = self
            .overlays
            .get(&OverlayCategory::CursorReadout)
            .and_then(|handles| handles.first().copied());
        match existing {
            Some(handle) => surface.update_text(handle, text)?,
            None => {
                let handle = surface.draw_text(
                    TextAnchor::AxesFraction(CURSOR_READOUT_ANCHOR.0, CURSOR_READOUT_ANCHOR.1),
                    text,
                    &cursor_readout_style(),
                )?;
                self.push(OverlayCategory::CursorReadout, handle);
            }
        }
        surface.request_redraw();
        Ok(())
    }
}

fn sample_parallel(projection: &Projection, domain: &Viewport, lat: f64) -> Vec<PlotPoint> {
    sample_line(projection, domain.lon_min, domain.lon_max, |lon| {
        GeoPos::new(lon, lat)
    })
}

fn sample_meridian(projection: &Projection, domain: &Viewport, lon: f64) -> Vec<PlotPoint> {
    sample_line(projection, domain.lat_min, domain.lat_max, |lat| {
        GeoPos::new(lon, lat)
    })
}

fn sample_line<F>(projection: &Projection, from: f64, to: f64, position: F) -> Vec<PlotPoint>
where
    F: Fn(f64) -> GeoPos,
{
    let step = (to - from) / (GRID_LINE_SAMPLES - 1) as f64;
    (0..GRID_LINE_SAMPLES)
        .filter_map(|i| projection.to_plot(position(from + step * i as f64)).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::PlotRect;
    use crate::surface::BaseMapStyle;

    /// Minimal recording surface for overlay bookkeeping tests.
    #[derive(Default)]
    struct CountingSurface {
        next_handle: u64,
        attached: Vec<OverlayHandle>,
        removals: usize,
        redraws: usize,
    }

    impl CountingSurface {
        fn issue(&mut self) -> OverlayHandle {
            self.next_handle += 1;
            let handle = OverlayHandle(self.next_handle);
            self.attached.push(handle);
            handle
        }
    }

    impl RenderSurface for CountingSurface {
        fn view_limits(&self) -> PlotRect {
            PlotRect::new(-180.0, -90.0, 180.0, 90.0)
        }
        fn draw_polyline(&mut self, _: &[PlotPoint], _: &LineStyle) -> Result<OverlayHandle> {
            Ok(self.issue())
        }
        fn draw_text(&mut self, _: TextAnchor, _: &str, _: &TextStyle) -> Result<OverlayHandle> {
            Ok(self.issue())
        }
        fn draw_marker(&mut self, _: PlotPoint, _: &MarkerStyle) -> Result<OverlayHandle> {
            Ok(self.issue())
        }
        fn draw_image(&mut self, _: PlotPoint, _: &[u8], _: f64, _: f32) -> Result<OverlayHandle> {
            Ok(self.issue())
        }
        fn update_text(&mut self, _: OverlayHandle, _: &str) -> Result<()> {
            Ok(())
        }
        fn remove(&mut self, handle: OverlayHandle) -> Result<()> {
            self.attached.retain(|&h| h != handle);
            self.removals += 1;
            Ok(())
        }
        fn draw_base_map(&mut self, _: &BaseMapStyle) -> Result<()> {
            Ok(())
        }
        fn clear_base(&mut self) {
            self.attached.clear();
        }
        fn request_redraw(&mut self) {
            self.redraws += 1;
        }
    }

    fn world_spec() -> GridSpec {
        GridSpec {
            meridians: vec![-180.0, -90.0, 0.0, 90.0, 180.0],
            parallels: vec![-90.0, -45.0, 0.0, 45.0, 90.0],
            n_meridians: 5,
            n_parallels: 5,
        }
    }

    #[test]
    fn test_grid_draws_two_passes_per_line() {
        let mut surface = CountingSurface::default();
        let mut manager = OverlayManager::new();
        let projection = Projection::equirectangular(0.0);
        manager.draw_grid(&mut surface, &projection, &world_spec());
        assert_eq!(manager.count(OverlayCategory::MeridianDark), 5);
        assert_eq!(manager.count(OverlayCategory::MeridianLight), 5);
        assert_eq!(manager.count(OverlayCategory::ParallelDark), 5);
        assert_eq!(manager.count(OverlayCategory::ParallelLight), 5);
        // One redraw for the whole batch.
        assert_eq!(surface.redraws, 1);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut surface = CountingSurface::default();
        let mut manager = OverlayManager::new();
        let projection = Projection::equirectangular(0.0);
        manager.draw_grid(&mut surface, &projection, &world_spec());
        let drawn = surface.attached.len();
        assert_eq!(drawn, 20);

        manager.clear_all(&mut surface);
        assert!(manager.is_empty());
        assert!(surface.attached.is_empty());
        assert_eq!(surface.removals, drawn);

        // Clearing again removes nothing further and does not error.
        manager.clear_all(&mut surface);
        assert!(manager.is_empty());
        assert_eq!(surface.removals, drawn);
    }

    #[test]
    fn test_no_dangling_handles_after_redraw_cycles() {
        let mut surface = CountingSurface::default();
        let mut manager = OverlayManager::new();
        let projection = Projection::equirectangular(0.0);
        for _ in 0..3 {
            manager.clear_grid(&mut surface);
            manager.draw_grid(&mut surface, &projection, &world_spec());
        }
        // Exactly one generation of lines is attached.
        assert_eq!(surface.attached.len(), 20);
        let tracked: usize = OverlayCategory::GRID
            .iter()
            .map(|&c| manager.count(c))
            .sum();
        assert_eq!(tracked, 20);
    }

    #[test]
    fn test_annotations_survive_grid_clears() {
        let mut surface = CountingSurface::default();
        let mut manager = OverlayManager::new();
        let projection = Projection::equirectangular(0.0);
        manager
            .draw_annotation(
                &mut surface,
                &projection,
                &Annotation::Point {
                    at: GeoPos::new(10.0, 20.0),
                    style: MarkerStyle::default(),
                },
            )
            .unwrap();
        manager.draw_grid(&mut surface, &projection, &world_spec());
        manager.clear_grid(&mut surface);
        assert_eq!(manager.count(OverlayCategory::Annotation), 1);
        assert_eq!(surface.attached.len(), 1);
    }

    #[test]
    fn test_labels_clipped_and_replaced() {
        let mut surface = CountingSurface::default();
        let mut manager = OverlayManager::new();
        let projection = Projection::equirectangular(0.0);
        let viewport = Viewport::new(-50.0, 50.0, -30.0, 30.0);
        let spec = world_spec();

        manager.draw_labels(&mut surface, &projection, &spec, &viewport, true);
        // Only 0° survives from each axis list inside this viewport.
        assert_eq!(manager.count(OverlayCategory::Label), 2);

        // A second pass replaces rather than accumulates.
        manager.draw_labels(&mut surface, &projection, &spec, &viewport, true);
        assert_eq!(manager.count(OverlayCategory::Label), 2);

        // Disabled pass wipes labels.
        manager.draw_labels(&mut surface, &projection, &spec, &viewport, false);
        assert_eq!(manager.count(OverlayCategory::Label), 0);
    }

    #[test]
    fn test_range_ring_attached_as_annotation() {
        let mut surface = CountingSurface::default();
        let mut manager = OverlayManager::new();
        let projection = Projection::equirectangular(0.0);
        manager.draw_range_ring(&mut surface, &projection, GeoPos::new(45.6, -28.5), 800.0);
        assert_eq!(manager.count(OverlayCategory::Annotation), 1);
    }

    #[test]
    fn test_cursor_readout_upsert_in_place() {
        let mut surface = CountingSurface::default();
        let mut manager = OverlayManager::new();
        manager
            .upsert_cursor_readout(&mut surface, "(  +1.00000,  +2.00000)")
            .unwrap();
        assert_eq!(manager.count(OverlayCategory::CursorReadout), 1);
        let before = surface.attached.len();
        manager
            .upsert_cursor_readout(&mut surface, "(  +3.00000,  +4.00000)")
            .unwrap();
        // Updated in place: no second overlay was created.
        assert_eq!(manager.count(OverlayCategory::CursorReadout), 1);
        assert_eq!(surface.attached.len(), before);
    }

    #[test]
    fn test_mercator_grid_skips_out_of_domain_parallels() {
        let mut surface = CountingSurface::default();
        let mut manager = OverlayManager::new();
        let projection = Projection::mercator();
        let spec = GridSpec::static_fallback();
        manager.draw_grid(&mut surface, &projection, &spec);
        // ±90 parallels are out of the Mercator domain; their sample lists
        // come back empty and no line is drawn for them.
        assert_eq!(manager.count(OverlayCategory::ParallelDark), 8);
        assert_eq!(manager.count(OverlayCategory::MeridianDark), 10);
    }
}
