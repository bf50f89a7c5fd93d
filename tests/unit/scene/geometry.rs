use super::*;

fn geometry(w: u32, h: u32) -> SceneGeometry {
    SceneGeometry::from_surface(SurfaceSize::new(w, h).unwrap())
}

#[test]
fn portrait_phone_anchor() {
    let g = geometry(1080, 1920);
    assert_eq!(g.anchor(), Point::new(540.0, 480.0));
    assert_eq!((g.width(), g.height()), (1080, 1920));
}

#[test]
fn larger_surface_anchor() {
    assert_eq!(geometry(1440, 2560).anchor(), Point::new(720.0, 640.0));
}

#[test]
fn odd_sizes_keep_fractional_anchor() {
    assert_eq!(geometry(1, 3).anchor(), Point::new(0.5, 0.75));
}
