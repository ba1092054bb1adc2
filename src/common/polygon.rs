use shapefile as shp;

/// Convert shapefile::Polygon to geo::MultiPolygon<f64>
pub(crate) fn shp_to_geo(p: &shp::Polygon) -> geo::MultiPolygon<f64> {
    rings_to_geo(p.rings(), |pt| geo::Coord { x: pt.x, y: pt.y })
}

/// Convert the rings of any polygon flavour (plain, Z or M) using `coord` to
/// project each point onto the plane.
pub(crate) fn rings_to_geo<P>(
    rings: &[shp::PolygonRing<P>],
    coord: impl Fn(&P) -> geo::Coord<f64>,
) -> geo::MultiPolygon<f64> {
    let mut polys: Vec<geo::Polygon<f64>> = Vec::new();
    let mut exterior: Option<geo::LineString<f64>> = None;
    let mut holes: Vec<geo::LineString<f64>> = Vec::new();

    // Shapefile stores each outer ring followed by its holes.
    for ring in rings {
        let coords = closed_ring(ring.points().iter().map(&coord));
        match ring {
            shp::PolygonRing::Outer(_) => {
                if let Some(ext) = exterior.take() {
                    polys.push(geo::Polygon::new(ext, std::mem::take(&mut holes)));
                }
                exterior = Some(geo::LineString(coords));
            }
            shp::PolygonRing::Inner(_) => holes.push(geo::LineString(coords)),
        }
    }
    if let Some(ext) = exterior {
        polys.push(geo::Polygon::new(ext, holes));
    }

    geo::MultiPolygon(polys)
}

/// Collect a ring, repeating the first coordinate at the end when it is open.
pub(crate) fn closed_ring(coords: impl IntoIterator<Item = geo::Coord<f64>>) -> Vec<geo::Coord<f64>> {
    let mut coords: Vec<geo::Coord<f64>> = coords.into_iter().collect();
    if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
        if first != last { coords.push(first) }
    }
    coords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_ring_is_closed() {
        let ring = closed_ring([
            geo::Coord { x: 0.0, y: 0.0 },
            geo::Coord { x: 1.0, y: 0.0 },
            geo::Coord { x: 1.0, y: 1.0 },
        ]);
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn outer_rings_start_new_polygons() {
        let square = |x: f64| vec![
            shp::Point { x, y: 0.0 },
            shp::Point { x, y: 1.0 },
            shp::Point { x: x + 1.0, y: 1.0 },
            shp::Point { x: x + 1.0, y: 0.0 },
            shp::Point { x, y: 0.0 },
        ];
        let polygon = shp::Polygon::with_rings(vec![
            shp::PolygonRing::Outer(square(0.0)),
            shp::PolygonRing::Outer(square(5.0)),
        ]);

        let mp = shp_to_geo(&polygon);
        assert_eq!(mp.0.len(), 2);
        assert!(mp.0.iter().all(|poly| poly.interiors().is_empty()));
    }

    #[test]
    fn z_polygons_drop_elevation() {
        let ring = vec![
            shp::PointZ { x: 0.0, y: 0.0, z: 5.0, m: 0.0 },
            shp::PointZ { x: 0.0, y: 1.0, z: 5.0, m: 0.0 },
            shp::PointZ { x: 1.0, y: 1.0, z: 5.0, m: 0.0 },
        ];
        let polygon = shp::PolygonZ::with_rings(vec![shp::PolygonRing::Outer(ring)]);

        let mp = rings_to_geo(polygon.rings(), |pt| geo::Coord { x: pt.x, y: pt.y });
        assert_eq!(mp.0.len(), 1);
        assert_eq!(mp.0[0].exterior().0.len(), 4);
        assert_eq!(mp.0[0].exterior().0[2], geo::Coord { x: 1.0, y: 1.0 });
    }
}
