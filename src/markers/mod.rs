//! Marker synthesis: deterministic on-image positions for detected objects
//! that arrive without coordinates.

mod positions;

use crate::models::{normalize_name, DetectedObject, MarkerCoordinates};

const GRID_X_START: f64 = 20.0;
const GRID_X_SPAN: f64 = 60.0;
const GRID_Y_START: f64 = 25.0;
const GRID_Y_SPAN: f64 = 50.0;

/// Position for `item`, the `index`-th of `total` objects in one photo.
///
/// Known objects use their canonical placement; anything else is laid out on
/// a centred grid with `ceil(sqrt(total))` columns.
pub fn synthesize_marker(item: &str, index: usize, total: usize) -> MarkerCoordinates {
    if let Some(coords) = positions::lookup(&normalize_name(item)) {
        return coords;
    }
    grid_position(index, total)
}

fn grid_position(index: usize, total: usize) -> MarkerCoordinates {
    let total = total.max(index + 1);
    let columns = (total as f64).sqrt().ceil() as usize;
    let rows = total.div_ceil(columns);

    let row = index / columns;
    let col = index % columns;

    let cell_width = GRID_X_SPAN / columns as f64;
    let cell_height = GRID_Y_SPAN / rows as f64;

    MarkerCoordinates::new(
        GRID_X_START + cell_width * (col as f64 + 0.5),
        GRID_Y_START + cell_height * (row as f64 + 0.5),
    )
}

/// Fill in coordinates for every object of one photo that lacks them.
/// Objects that already carry coordinates are left untouched.
pub fn assign_markers(objects: &mut [DetectedObject]) {
    let total = objects.len();
    for (index, object) in objects.iter_mut().enumerate() {
        if object.marker_coordinates.is_none() {
            object.marker_coordinates = Some(synthesize_marker(&object.item, index, total));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_object_uses_table_position() {
        let coords = synthesize_marker(" Vaso Sanitário ", 3, 9);
        assert_eq!(coords, MarkerCoordinates::new(30.0, 70.0));
        assert_eq!(synthesize_marker("mirror", 0, 1), MarkerCoordinates::new(70.0, 25.0));
    }

    #[test]
    fn test_unknown_objects_share_grid_position_for_same_slot() {
        let a = synthesize_marker("quadro abstrato", 2, 5);
        let b = synthesize_marker("vaso de planta", 2, 5);
        assert_eq!(a, b);
        assert_eq!(a, synthesize_marker("quadro abstrato", 2, 5));
    }

    #[test]
    fn test_single_unknown_object_is_centred() {
        assert_eq!(synthesize_marker("objeto", 0, 1), MarkerCoordinates::new(50.0, 50.0));
    }

    #[test]
    fn test_grid_stays_inside_bounds() {
        for total in 1..20 {
            for index in 0..total {
                let coords = synthesize_marker("desconhecido", index, total);
                assert!(coords.x > 20.0 && coords.x < 80.0, "x {} out of range", coords.x);
                assert!(coords.y > 25.0 && coords.y < 75.0, "y {} out of range", coords.y);
            }
        }
    }

    #[test]
    fn test_grid_layout_for_four_objects() {
        // 2 columns x 2 rows: cells 30 wide and 25 high
        assert_eq!(synthesize_marker("a", 0, 4), MarkerCoordinates::new(35.0, 37.5));
        assert_eq!(synthesize_marker("b", 3, 4), MarkerCoordinates::new(65.0, 62.5));
    }

    #[test]
    fn test_assign_markers_keeps_existing_coordinates() {
        let mut objects = vec![
            DetectedObject {
                item: "cama".into(),
                marker_coordinates: Some(MarkerCoordinates::new(1.0, 2.0)),
                ..Default::default()
            },
            DetectedObject {
                item: "cama".into(),
                ..Default::default()
            },
        ];

        assign_markers(&mut objects);

        assert_eq!(objects[0].marker_coordinates, Some(MarkerCoordinates::new(1.0, 2.0)));
        assert_eq!(objects[1].marker_coordinates, Some(MarkerCoordinates::new(50.0, 65.0)));
    }
}
