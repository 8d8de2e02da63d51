use crate::config::{BoundsMode, MapSettings};
use crate::constants::MAP_TILE_SIZE;
use crate::models::{BoundingBox, MapViewport};
use crate::utils::geo::Locatable;

/// Frames a map around `spots`.
///
/// Each spot with parseable coordinates contributes a box padded by
/// `settings.padding_degrees`. With [`BoundsMode::Envelope`] the boxes are
/// merged; with [`BoundsMode::LastSpot`] each one replaces the previous, so the
/// result follows the last valid spot only. Spots that cannot be parsed are
/// skipped, and a list without any valid spot gets the fallback viewport.
pub fn calculate_map_params<T: Locatable>(spots: &[T], settings: &MapSettings) -> MapViewport {
    if spots.is_empty() {
        return MapViewport::fallback(settings.default_zoom);
    }

    let mut bounds: Option<BoundingBox> = None;
    for spot in spots {
        let coordinate = spot.coordinate();
        if !coordinate.is_finite() {
            continue;
        }

        let padded = BoundingBox::around(coordinate, settings.padding_degrees);
        bounds = Some(match (settings.bounds_mode, bounds) {
            (BoundsMode::Envelope, Some(current)) => current.union(&padded),
            _ => padded,
        });
    }

    let Some(bounds) = bounds else {
        tracing::warn!(
            "No parseable coordinates among {} spots, using fallback viewport",
            spots.len()
        );
        return MapViewport::fallback(settings.default_zoom);
    };

    MapViewport {
        center: bounds.center(),
        zoom: zoom_for_span(bounds.lng_span(), settings),
        bounds: Some(bounds),
    }
}

/// Mercator tile zoom whose world width roughly matches a longitude span.
pub fn zoom_for_span(lng_span: f64, settings: &MapSettings) -> i32 {
    let zoom = ((360.0 / lng_span.abs()).log2() - MAP_TILE_SIZE.log2() + 8.0).floor();

    if !zoom.is_finite() {
        tracing::warn!(
            "Degenerate longitude span {}, using zoom {}",
            lng_span,
            settings.degenerate_zoom
        );
        return settings.degenerate_zoom;
    }

    (zoom as i32).clamp(settings.min_zoom, settings.max_zoom)
}
