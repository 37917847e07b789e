use std::f32::consts::FRAC_PI_2;

use approx::assert_abs_diff_eq;
use wirecube_core::transform::{multiply, rotate_x, rotate_y};
use wirecube_core::{Color, Cube, RotationState, Vector3};

/// Line sink standing in for a real renderer.
#[derive(Default)]
struct RecordingSink {
    lines: Vec<(Vector3, Vector3, Color)>,
}

impl RecordingSink {
    fn line(&mut self, start: Vector3, end: Vector3, color: Color) {
        self.lines.push((start, end, color));
    }
}

fn run_frame(cube: &mut Cube, rotation: RotationState, sink: &mut RecordingSink) {
    cube.set_transform(multiply(rotate_x(rotation.x), rotate_y(rotation.y)));
    cube.recompute_world_vertices();
    cube.draw_edges(Color::RED, |a, b, c| sink.line(a, b, c));
}

#[test]
fn test_quarter_yaw_moves_back_corner_to_front() {
    let mut cube = Cube::new(2.0, 2.0, 2.0);
    let mut sink = RecordingSink::default();

    run_frame(&mut cube, RotationState::new(0.0, FRAC_PI_2), &mut sink);

    let index = cube
        .local_vertices()
        .iter()
        .position(|v| *v == Vector3::new(-1.0, 1.0, -1.0))
        .unwrap();
    assert_abs_diff_eq!(cube.world_vertices()[index], Vector3::new(-1.0, 1.0, 1.0), epsilon = 1e-6);
    assert_eq!(sink.lines.len(), 12);
}

#[test]
fn test_frames_accumulate_drag() {
    let mut cube = Cube::new(2.0, 2.0, 2.0);
    let mut rotation = RotationState::zero();
    let mut sink = RecordingSink::default();

    // Drag right by 157 px in ten frames at 0.01 rad/px: about a quarter turn of yaw
    for _ in 0..10 {
        rotation.apply_drag(15.7, 0.0, 0.01);
        run_frame(&mut cube, rotation, &mut sink);
    }

    assert_eq!(sink.lines.len(), 120);
    assert_abs_diff_eq!(rotation.y, 1.57, epsilon = 1e-5);
    assert_eq!(cube.transform(), rotation.matrix());

    // The last frame's edges come from the final transform only
    let last_frame = &sink.lines[108..];
    let (start, _, _) = last_frame[0];
    assert_eq!(start, cube.world_vertices()[0]);
    assert_abs_diff_eq!(start, Vector3::new(1.0, 1.0, 1.0), epsilon = 1e-2);
}

#[test]
fn test_world_vertices_stay_on_circumsphere() {
    let mut cube = Cube::new(2.0, 2.0, 2.0);
    let mut sink = RecordingSink::default();
    run_frame(&mut cube, RotationState::new(0.8, -2.3), &mut sink);

    for v in cube.world_vertices() {
        assert_abs_diff_eq!(v.length(), 3f32.sqrt(), epsilon = 1e-5);
    }
}
