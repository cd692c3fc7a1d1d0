// Hex parsing and the target-color resolver.

use particles_core::*;

#[test]
fn parses_long_and_short_hex() {
    assert_eq!(Rgb::from_hex("#ff0000"), Ok(Rgb::new(1.0, 0.0, 0.0)));
    assert_eq!(Rgb::from_hex("#F00"), Ok(Rgb::new(1.0, 0.0, 0.0)));
    assert_eq!(Rgb::from_hex("00ff00"), Ok(Rgb::new(0.0, 1.0, 0.0)));
    assert_eq!(Rgb::from_hex("  #0000FF "), Ok(Rgb::new(0.0, 0.0, 1.0)));
}

#[test]
fn rejects_malformed_hex() {
    assert_eq!(Rgb::from_hex("#"), Err(ColorParseError::Empty));
    assert_eq!(Rgb::from_hex(""), Err(ColorParseError::Empty));
    assert_eq!(Rgb::from_hex("#1234"), Err(ColorParseError::BadLength(4)));
    assert!(matches!(
        Rgb::from_hex("#gg0000"),
        Err(ColorParseError::BadDigit(_))
    ));
    assert!(matches!(
        Rgb::from_hex("rgb(1,2,3)"),
        Err(ColorParseError::BadDigit(_))
    ));
}

#[test]
fn hex_survives_a_parse() {
    for hex in ["#ff69b4", "#00f2ff", "#4444ff", "#000000", "#ffffff"] {
        let c = Rgb::from_hex(hex).unwrap();
        assert_eq!(c.to_hex(), hex);
    }
}

#[test]
fn resolver_falls_back_to_white() {
    assert_eq!(resolve_target_color(None), Rgb::WHITE);
    assert_eq!(resolve_target_color(Some("chartreuse")), Rgb::WHITE);
    assert_eq!(resolve_target_color(Some("#zzz")), Rgb::WHITE);
    assert_eq!(
        resolve_target_color(Some("#9900ff")).to_hex(),
        "#9900ff"
    );
}

#[test]
fn lerp_moves_a_fraction_of_the_way() {
    let black = Rgb::new(0.0, 0.0, 0.0);
    let half = black.lerp(Rgb::WHITE, 0.5);
    assert_eq!(half.to_array(), [0.5, 0.5, 0.5]);
    assert_eq!(black.lerp(Rgb::WHITE, 0.0), black);
    assert_eq!(black.lerp(Rgb::WHITE, 1.0), Rgb::WHITE);
}

#[test]
fn default_color_is_white() {
    assert_eq!(Rgb::default(), Rgb::WHITE);
}
