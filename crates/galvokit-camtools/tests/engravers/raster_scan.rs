use galvokit_camtools::{generate_raster, BinaryRaster, RasterEngraver, RasterParameters};
use galvokit_core::{RasterDirection, Waypoint};
use proptest::prelude::*;

#[test]
fn test_diagonal_two_by_two_unidirectional() {
    let raster = BinaryRaster::from_rows(&[[255u8, 0], [0, 255]]).unwrap();
    let waypoints = generate_raster(&raster, 1, RasterDirection::Uni).unwrap();

    assert_eq!(
        waypoints,
        vec![
            Waypoint::on(0.0, 0.0),
            Waypoint::off(1.0, 0.0),
            Waypoint::off(0.0, 1.0),
            Waypoint::on(1.0, 1.0),
            Waypoint::off(1.0, 1.0),
        ]
    );
}

#[test]
fn test_all_background_has_no_transitions() {
    let raster = BinaryRaster::from_pixels(3, 3, &[0; 9]).unwrap();
    let waypoints = generate_raster(&raster, 2, RasterDirection::Uni).unwrap();

    assert_eq!(waypoints.len(), 10);
    assert!(waypoints.iter().all(|w| !w.laser_on));
    assert_eq!(waypoints.last().unwrap().position(), (4.0, 4.0));
}

#[test]
fn test_empty_raster_rejected() {
    let raster = BinaryRaster::from_pixels(0, 4, &[]).unwrap();
    assert!(RasterEngraver::new(RasterParameters::default())
        .generate(&raster)
        .is_err());
}

fn raster_strategy() -> impl Strategy<Value = BinaryRaster> {
    (1usize..8, 1usize..8).prop_flat_map(|(w, h)| {
        proptest::collection::vec(0u8..=1, w * h)
            .prop_map(move |data| BinaryRaster::from_pixels(w, h, &data).unwrap())
    })
}

proptest! {
    #[test]
    fn prop_scan_ends_de_energised(
        raster in raster_strategy(),
        bidirectional in any::<bool>(),
        factor in 1u32..5,
    ) {
        let direction = if bidirectional { RasterDirection::Bi } else { RasterDirection::Uni };
        let waypoints = generate_raster(&raster, factor, direction).unwrap();

        prop_assert!(!waypoints.last().unwrap().laser_on);
        prop_assert!(waypoints.len() > raster.width() * raster.height());
        let lit = waypoints.iter().filter(|w| w.laser_on).count();
        prop_assert_eq!(lit, raster.foreground_count());
    }

    #[test]
    fn prop_uni_rows_start_de_energised(raster in raster_strategy()) {
        let waypoints = generate_raster(&raster, 1, RasterDirection::Uni).unwrap();
        for pair in waypoints.windows(2) {
            // The first waypoint entering a new row is always dark
            if pair[1].y > pair[0].y {
                prop_assert!(!pair[1].laser_on);
                prop_assert_eq!(pair[1].x, 0.0);
            }
        }
    }
}
