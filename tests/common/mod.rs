//! A recording render surface for integration tests.

use graticule::prelude::*;

/// What kind of primitive a handle points at.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawKind {
    Polyline { points: usize },
    Text { content: String },
    Marker,
    Image,
}

/// Backend double: issues handles, remembers what is attached, and counts
/// the traffic the controller generates.
pub struct MockSurface {
    pub limits: PlotRect,
    next_handle: u64,
    pub attached: HashMap<OverlayHandle, DrawKind>,
    pub base_maps: Vec<BaseMapStyle>,
    pub base_clears: usize,
    pub removals: usize,
    pub text_updates: usize,
    pub redraw_requests: usize,
}

impl MockSurface {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            limits: PlotRect::new(-180.0, -90.0, 180.0, 90.0),
            next_handle: 0,
            attached: HashMap::default(),
            base_maps: Vec::new(),
            base_clears: 0,
            removals: 0,
            text_updates: 0,
            redraw_requests: 0,
        }
    }

    fn issue(&mut self, kind: DrawKind) -> OverlayHandle {
        self.next_handle += 1;
        let handle = OverlayHandle(self.next_handle);
        self.attached.insert(handle, kind);
        handle
    }

    pub fn attached_texts(&self) -> Vec<&str> {
        self.attached
            .values()
            .filter_map(|k| match k {
                DrawKind::Text { content } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RenderSurface for MockSurface {
    fn view_limits(&self) -> PlotRect {
        self.limits
    }

    fn draw_polyline(&mut self, points: &[PlotPoint], _style: &LineStyle) -> Result<OverlayHandle> {
        Ok(self.issue(DrawKind::Polyline {
            points: points.len(),
        }))
    }

    fn draw_text(
        &mut self,
        _anchor: TextAnchor,
        text: &str,
        _style: &TextStyle,
    ) -> Result<OverlayHandle> {
        Ok(self.issue(DrawKind::Text {
            content: text.to_string(),
        }))
    }

    fn draw_marker(&mut self, _at: PlotPoint, _style: &MarkerStyle) -> Result<OverlayHandle> {
        Ok(self.issue(DrawKind::Marker))
    }

    fn draw_image(
        &mut self,
        _at: PlotPoint,
        _png: &[u8],
        _zoom: f64,
        _alpha: f32,
    ) -> Result<OverlayHandle> {
        Ok(self.issue(DrawKind::Image))
    }

    fn update_text(&mut self, handle: OverlayHandle, text: &str) -> Result<()> {
        self.text_updates += 1;
        match self.attached.get_mut(&handle) {
            Some(DrawKind::Text { content }) => {
                *content = text.to_string();
                Ok(())
            }
            _ => Err(PlotError::Surface(format!("unknown text overlay {handle:?}"))),
        }
    }

    fn remove(&mut self, handle: OverlayHandle) -> Result<()> {
        self.removals += 1;
        // Tolerate unknown handles, like a real canvas that already
        // dropped the artist.
        self.attached.remove(&handle);
        Ok(())
    }

    fn draw_base_map(&mut self, style: &BaseMapStyle) -> Result<()> {
        self.base_maps.push(style.clone());
        Ok(())
    }

    fn clear_base(&mut self) {
        self.base_clears += 1;
        self.attached.clear();
    }

    fn request_redraw(&mut self) {
        self.redraw_requests += 1;
    }
}
