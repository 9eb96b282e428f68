use cdt::{build, Config, InputEdge, InputPoint};

fn main() {
    env_logger::init();

    let input_points = vec![
        InputPoint::new(0., 7.),
        InputPoint::new(-5., 5.),
        InputPoint::new(5., 5.),
        InputPoint::new(-1., 3.),
        InputPoint::new(3., 1.),
        InputPoint::new(-4., -1.),
        InputPoint::new(1., -2.),
        InputPoint::new(-6., -4.),
        InputPoint::new(5., -4.),
    ];

    // A closed boundary around the outer four points, supplied as a PSLG
    // the kernel must recover exactly.
    let constraints = vec![
        InputEdge::new(1, 2, 1),
        InputEdge::new(2, 8, 1),
        InputEdge::new(8, 7, 1),
        InputEdge::new(7, 1, 1),
    ];

    let mesh = match build(&input_points, &constraints, &Config::default()) {
        Ok(mesh) => mesh,
        Err(err) => panic!("triangulation failed: {err:?}"),
    };

    println!(
        "triangulated {} point(s) into {} triangle(s)",
        mesh.points.len(),
        mesh.triangles.len()
    );
}
