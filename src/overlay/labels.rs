//! Grid label formatting: degrees-minutes-seconds with hemisphere suffixes.

use crate::core::geo::{wrap_longitude, Dms};
use crate::surface::{HAlign, TextBox, TextRotation, TextStyle, VAlign};

/// Point size of grid labels.
pub const GRID_LABEL_FONT_SIZE: f32 = 2.5;
/// Point size of the cursor readout.
pub const MOTION_DISPLAY_FONT_SIZE: f32 = 3.0;

/// A latitude label: `02°30'00.00"N`. Hemisphere by sign, zero is north.
pub fn format_lat_label(lat: f64) -> String {
    let hemi = if lat >= 0.0 { 'N' } else { 'S' };
    let dms = Dms::from_degrees(lat);
    format!(
        "{:02}\u{b0}{:02}'{:05.2}\"{}",
        dms.degrees.abs(),
        dms.minutes,
        dms.seconds,
        hemi
    )
}

/// A longitude label: `170°00'00.00"W`. The value is wrapped to [-180, 180]
/// first so labels past the antimeridian read as the user expects.
pub fn format_lon_label(lon: f64) -> String {
    let display_lon = wrap_longitude(lon);
    let hemi = if display_lon >= 0.0 { 'E' } else { 'W' };
    let dms = Dms::from_degrees(display_lon);
    format!(
        "{:03}\u{b0}{:02}'{:05.2}\"{}",
        dms.degrees.abs(),
        dms.minutes,
        dms.seconds,
        hemi
    )
}

/// The fixed-width cursor readout: `(+XXX.XXXXX,+YY.YYYYY)` with the
/// longitude wrapped at the day boundary.
pub fn format_cursor_readout(lon: f64, lat: f64) -> String {
    format!("({:+10.5},{:+10.5})", wrap_longitude(lon), lat)
}

/// Style of a parallel's label: pinned to the left viewport edge.
pub fn parallel_label_style() -> TextStyle {
    TextStyle {
        h_align: HAlign::Left,
        v_align: VAlign::Center,
        boxed: Some(label_box()),
        ..TextStyle::monospace(GRID_LABEL_FONT_SIZE)
    }
}

/// Style of a meridian's label: rotated vertical along the bottom edge.
pub fn meridian_label_style() -> TextStyle {
    TextStyle {
        h_align: HAlign::Center,
        v_align: VAlign::Bottom,
        rotation: TextRotation::Vertical,
        boxed: Some(label_box()),
        ..TextStyle::monospace(GRID_LABEL_FONT_SIZE)
    }
}

/// Style of the cursor readout: top-right corner, opaque box.
pub fn cursor_readout_style() -> TextStyle {
    TextStyle {
        h_align: HAlign::Right,
        v_align: VAlign::Top,
        boxed: Some(TextBox {
            alpha: 1.0,
            pad: 0.2,
            line_width: 0.2,
        }),
        ..TextStyle::monospace(MOTION_DISPLAY_FONT_SIZE)
    }
}

fn label_box() -> TextBox {
    TextBox {
        alpha: 0.5,
        pad: 0.2,
        line_width: 0.2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_label_north_south() {
        assert_eq!(format_lat_label(12.5), "12\u{b0}30'00.00\"N");
        assert_eq!(format_lat_label(-45.25), "45\u{b0}15'00.00\"S");
        assert_eq!(format_lat_label(0.0), "00\u{b0}00'00.00\"N");
    }

    #[test]
    fn test_lon_label_east_west() {
        assert_eq!(format_lon_label(170.0), "170\u{b0}00'00.00\"E");
        assert_eq!(format_lon_label(-0.5), "000\u{b0}30'00.00\"W");
    }

    #[test]
    fn test_lon_label_wraps_at_day_boundary() {
        // 190°E is displayed as 170°W.
        assert_eq!(format_lon_label(190.0), "170\u{b0}00'00.00\"W");
        assert_eq!(format_lon_label(-190.0), "170\u{b0}00'00.00\"E");
    }

    #[test]
    fn test_cursor_readout_fixed_width() {
        let text = format_cursor_readout(-73.98765, 40.12345);
        assert_eq!(text, "( -73.98765, +40.12345)");
        // Wrapped longitude in the readout as well.
        let text = format_cursor_readout(200.0, 0.0);
        assert!(text.starts_with("(-160.00000"));
    }
}
