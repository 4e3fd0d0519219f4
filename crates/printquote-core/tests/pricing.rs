use approx::{assert_abs_diff_eq, assert_relative_eq};
use printquote_core::catalog::Catalog;
use printquote_core::discount::{apply_discount, DiscountCode};
use printquote_core::pricing::{final_price, price_cart, CartLine, CartPricing};
use printquote_core::{quote, quote_by_name, Material, MaterialProfile, Mesh, UnknownMaterialError};

#[test]
fn unknown_or_empty_codes_give_no_discount() {
    for amount in [0.01, 10.0, 250.0] {
        assert_eq!(0.0, apply_discount(amount, ""));
        assert_eq!(0.0, apply_discount(amount, "   "));
        assert_eq!(0.0, apply_discount(amount, "UNKNOWN"));
    }
}

#[test]
fn registered_codes_are_case_insensitive() {
    assert_abs_diff_eq!(15.0, apply_discount(100.0, "SAY-NO-TO-POLYMATE"), epsilon = 1e-9);
    assert_abs_diff_eq!(15.0, apply_discount(100.0, "say-no-to-polymate"), epsilon = 1e-9);
    assert_abs_diff_eq!(20.0, apply_discount(100.0, "  Skem-Filament-Price "), epsilon = 1e-9);
    assert_abs_diff_eq!(50.0, apply_discount(100.0, "parcel-deez-nuts"), epsilon = 1e-9);
    assert_eq!(Some(DiscountCode::ParcelDeezNuts), DiscountCode::lookup("parcel-deez-nuts"));
}

#[test]
fn final_price_subtracts_discount() {
    assert_abs_diff_eq!(85.0, final_price(100.0, "SAY-NO-TO-POLYMATE"), epsilon = 1e-9);
    assert_abs_diff_eq!(100.0, final_price(100.0, "nope"), epsilon = 1e-9);
}

#[test]
fn cart_at_threshold_ships_free_and_discounts_subtotal() {
    let catalog = Catalog::filaments();
    // 4 x 25.00 = 100.00
    let lines = vec![CartLine::new("pla_white", 4)];
    let totals = price_cart(&lines, &catalog, "SKEM-FILAMENT-PRICE", &CartPricing::default())
        .expect("known products");

    assert_abs_diff_eq!(100.0, totals.subtotal, epsilon = 1e-9);
    assert_eq!(0.0, totals.shipping);
    assert_abs_diff_eq!(9.0, totals.tax, epsilon = 1e-9);
    assert_abs_diff_eq!(20.0, totals.discount, epsilon = 1e-9);
    assert_abs_diff_eq!(89.0, totals.total, epsilon = 1e-9);
    assert_eq!(Some(DiscountCode::SkemFilamentPrice), totals.discount_code);
}

#[test]
fn shipping_depends_only_on_subtotal() {
    let cfg = CartPricing::default();
    assert_eq!(0.0, cfg.shipping_for(120.0));
    assert_eq!(5.0, cfg.shipping_for(50.0));
    assert_abs_diff_eq!(4.5, cfg.tax_for(50.0), epsilon = 1e-9);

    let catalog = Catalog::filaments();
    // 25 + 25 = 50.00
    let lines = vec![CartLine::new("pla_black", 1), CartLine::new("pla_white", 1)];
    let totals = price_cart(&lines, &catalog, "", &cfg).expect("known products");
    assert_abs_diff_eq!(50.0, totals.subtotal, epsilon = 1e-9);
    assert_eq!(5.0, totals.shipping);
    assert_abs_diff_eq!(4.5, totals.tax, epsilon = 1e-9);
    assert_eq!(0.0, totals.discount);
    assert_eq!(None, totals.discount_code);
    assert_abs_diff_eq!(59.5, totals.total, epsilon = 1e-9);
    assert_eq!(2, totals.lines.len());
}

#[test]
fn discount_never_includes_shipping_or_tax() {
    let catalog = Catalog::filaments();
    // 28 + 2 x 35 = 98.00 -> shipping 5.00
    let lines = vec![CartLine::new("abs_red", 1), CartLine::new("tpu_clear", 2)];
    let totals = price_cart(&lines, &catalog, "PARCEL-DEEZ-NUTS", &CartPricing::default())
        .expect("known products");
    assert_abs_diff_eq!(98.0, totals.subtotal, epsilon = 1e-9);
    assert_abs_diff_eq!(49.0, totals.discount, epsilon = 1e-9);
    assert_abs_diff_eq!(98.0 + 5.0 + 8.82 - 49.0, totals.total, epsilon = 1e-9);
}

#[test]
fn unknown_product_is_reported() {
    let catalog = Catalog::filaments();
    let lines = vec![CartLine::new("wood_fill", 1)];
    let err = price_cart(&lines, &catalog, "", &CartPricing::default()).unwrap_err();
    assert_eq!("wood_fill", err.product_id);
}

#[test]
fn unknown_material_is_a_typed_error() {
    let err = "Wood".parse::<Material>().unwrap_err();
    assert_eq!(UnknownMaterialError { name: "Wood".to_string() }, err);
    assert!(MaterialProfile::lookup("carbon").is_err());
    assert!(quote_by_name(&Mesh::cube(10.0), "Unobtainium", "").is_err());
}

#[test]
fn material_names_parse_case_insensitively() {
    assert_eq!(Material::Nylon, "nylon".parse::<Material>().unwrap());
    assert_eq!(Material::Petg, " PETG ".parse::<Material>().unwrap());
    for m in Material::ALL {
        assert_eq!(m, m.to_string().parse::<Material>().unwrap());
        assert!(m.density() > 0.0);
        assert!(m.unit_cost() > 0.0);
    }
}

#[test]
fn quote_chains_volume_weight_and_price() {
    let cube = Mesh::cube(20.0); // 8 cm^3
    let q = quote(&cube, Material::Petg, "say-no-to-polymate");
    assert_relative_eq!(8.0, q.volume_cm3, max_relative = 1e-9);
    assert_relative_eq!(8.0 * 1.27, q.weight_g, max_relative = 1e-9);
    assert_relative_eq!(8.0 * 1.27 * 0.030, q.base_cost, max_relative = 1e-9);
    assert_relative_eq!(q.base_cost * 0.15, q.discount, max_relative = 1e-9);
    assert_relative_eq!(q.base_cost - q.discount, q.final_cost, max_relative = 1e-9);
    assert_eq!(Some(DiscountCode::SayNoToPolymate), q.discount_code);
}

#[test]
fn quote_is_repeatable_across_materials() {
    let cube = Mesh::cube(10.0);
    let pla = quote(&cube, Material::Pla, "");
    let abs = quote(&cube, Material::Abs, "");
    assert_eq!(pla, quote(&cube, Material::Pla, ""));
    assert_eq!(pla.volume_cm3, abs.volume_cm3);
    assert!(pla.weight_g > abs.weight_g);
    assert_eq!(0.0, pla.discount);
    assert_eq!(pla.base_cost, pla.final_cost);
}

#[test]
fn empty_mesh_quotes_zero() {
    let q = quote(&Mesh::default(), Material::Resin, "PARCEL-DEEZ-NUTS");
    assert_eq!(0.0, q.volume_cm3);
    assert_eq!(0.0, q.weight_g);
    assert_eq!(0.0, q.base_cost);
    assert_eq!(0.0, q.final_cost);
    assert_eq!(None, q.discount_code);
}

#[test]
fn quote_records_code_only_when_it_discounts() {
    let cube = Mesh::cube(10.0);
    let q = quote(&cube, Material::Abs, "PARCEL-DEEZ-NUTS");
    assert_eq!(Some(DiscountCode::ParcelDeezNuts), q.discount_code);
    assert_eq!(None, quote(&cube, Material::Abs, "NOT-A-CODE").discount_code);

    let totals = price_cart(&[], &Catalog::filaments(), "PARCEL-DEEZ-NUTS", &CartPricing::default())
        .unwrap();
    assert_eq!(None, totals.discount_code);
}

#[test]
fn catalog_filters_spools_by_material() {
    let catalog = Catalog::filaments();
    let pla: Vec<&str> = catalog.by_material(Material::Pla).map(|p| p.id.as_str()).collect();
    assert_eq!(vec!["pla_white", "pla_black"], pla);
    assert_eq!(0, catalog.by_material(Material::Resin).count());
}
