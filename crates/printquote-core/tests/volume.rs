use approx::assert_relative_eq;
use printquote_core::estimate::{estimate_volume_cm3, estimate_weight_g, signed_volume_mm3};
use printquote_core::geom::Vec3;
use printquote_core::model::{Mesh, Triangle};
use printquote_core::pricing::base_price;
use printquote_core::Material;

#[test]
fn ten_millimeter_cube_is_one_cubic_centimeter() {
    let cube = Mesh::cube(10.0);
    assert_eq!(12, cube.len());
    assert_relative_eq!(1.0, estimate_volume_cm3(&cube), max_relative = 1e-6);
}

#[test]
fn empty_mesh_weighs_and_costs_nothing() {
    let mesh = Mesh::default();
    let volume = estimate_volume_cm3(&mesh);
    assert_eq!(0.0, volume);
    for material in Material::ALL {
        let weight = estimate_weight_g(volume, material);
        assert_eq!(0.0, weight);
        assert_eq!(0.0, base_price(weight, material));
    }
}

#[test]
fn volume_scales_with_cube_of_factor() {
    let base = Mesh::cube(10.0);
    let v0 = estimate_volume_cm3(&base);
    for k in [0.5, 2.0, 3.0, 7.25] {
        let scaled = base.scaled(k);
        assert_relative_eq!(v0 * k * k * k, estimate_volume_cm3(&scaled), max_relative = 1e-9);
    }
}

#[test]
fn box_volume_does_not_depend_on_origin() {
    let shape = Mesh::axis_aligned_box(Vec3::new(0.0, 0.0, 0.0), Vec3::new(20.0, 30.0, 5.0));
    let moved = shape.translated(Vec3::new(-150.0, 42.5, 1000.0));
    assert_relative_eq!(3.0, estimate_volume_cm3(&shape), max_relative = 1e-9);
    assert_relative_eq!(3.0, estimate_volume_cm3(&moved), max_relative = 1e-9);
}

#[test]
fn inverted_winding_keeps_volume_positive() {
    let inverted = Mesh::cube(10.0).flipped();
    assert!(signed_volume_mm3(&inverted) < 0.0);
    assert_relative_eq!(1.0, estimate_volume_cm3(&inverted), max_relative = 1e-6);
}

#[test]
fn degenerate_triangles_add_nothing() {
    let mut mesh = Mesh::cube(10.0);
    let before = estimate_volume_cm3(&mesh);
    // Collinear and zero-area facets are kept as-is.
    mesh.triangles.push(Triangle::new(
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(2.0, 2.0, 2.0),
        Vec3::new(3.0, 3.0, 3.0),
    ));
    mesh.triangles.push(Triangle::new(
        Vec3::new(5.0, 6.0, 7.0),
        Vec3::new(5.0, 6.0, 7.0),
        Vec3::new(5.0, 6.0, 7.0),
    ));
    assert_eq!(14, mesh.len());
    assert_relative_eq!(before, estimate_volume_cm3(&mesh), max_relative = 1e-12);
}

#[test]
fn open_mesh_is_not_an_error() {
    let mut mesh = Mesh::cube(10.0);
    mesh.triangles.truncate(10);
    let volume = estimate_volume_cm3(&mesh);
    assert!(volume >= 0.0);
    assert!(volume.is_finite());
}

#[test]
fn weight_uses_material_density() {
    let volume = estimate_volume_cm3(&Mesh::cube(10.0));
    assert_relative_eq!(1.24, estimate_weight_g(volume, Material::Pla), max_relative = 1e-6);
    assert_relative_eq!(1.04, estimate_weight_g(volume, Material::Abs), max_relative = 1e-6);
    assert_relative_eq!(1.10, estimate_weight_g(volume, Material::Resin), max_relative = 1e-6);
}

#[test]
fn volume_is_reproducible() {
    let mesh = Mesh::axis_aligned_box(Vec3::new(0.1, 0.2, 0.3), Vec3::new(17.3, 9.9, 4.4));
    let first = signed_volume_mm3(&mesh);
    for _ in 0..5 {
        assert_eq!(first.to_bits(), signed_volume_mm3(&mesh).to_bits());
    }
}
