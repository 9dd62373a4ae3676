use galvokit_camtools::{generate_vector, VectorEngraver, VectorParameters};
use galvokit_core::ScaleMode;

#[test]
fn test_square_contour_is_lit_throughout() {
    let square = vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)];
    let waypoints = generate_vector(&[square.clone()], ScaleMode::Absolute, 0.5).unwrap();

    assert_eq!(waypoints.len(), square.len());
    assert!(waypoints.iter().all(|w| w.laser_on));
    assert_eq!(waypoints[2].position(), (5.0, 5.0));
}

#[test]
fn test_loops_keep_order_and_skip_empty() {
    let loops = vec![vec![(1.0, 1.0)], vec![], vec![(2.0, 2.0), (3.0, 3.0)]];
    let engraver = VectorEngraver::new(VectorParameters::default());
    let waypoints = engraver.generate(&loops).unwrap();

    let xs: Vec<f64> = waypoints.iter().map(|w| w.x).collect();
    assert_eq!(xs, vec![1.0, 2.0, 3.0]);
}
