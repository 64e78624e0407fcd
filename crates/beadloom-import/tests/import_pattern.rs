//! Decode an image, convert it and store the result as a pattern.

use beadloom_core::{BeadColor, BeadPalette, BeadPattern, PegboardShape, Rgb, Store};
use beadloom_import::{
    ConversionOptions, Dithering, FilterType, Raster, convert_in_background, image_data_to_bead_grid,
    load_raster,
};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

fn palette() -> BeadPalette {
    BeadPalette::new(
        "perler",
        "Perler",
        vec![
            BeadColor::new("p-red", "Red", Rgb::new(191, 33, 47)),
            BeadColor::new("p-green", "Green", Rgb::new(0, 150, 57)),
            BeadColor::new("p-blue", "Blue", Rgb::new(0, 85, 164)),
            BeadColor::new("p-white", "White", Rgb::new(241, 241, 241)),
        ],
    )
}

/// Left half red, right half blue.
fn split_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba([210, 20, 30, 255])
        } else {
            Rgba([10, 80, 180, 255])
        }
    });
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
    bytes
}

#[test]
fn test_image_to_pattern() {
    let raster = load_raster(&split_png(40, 20), 4, 2, FilterType::Nearest).unwrap();
    let conversion =
        image_data_to_bead_grid(&raster, &palette(), &ConversionOptions::new(4, 2)).unwrap();
    assert_eq!(conversion.used_color_ids, vec!["p-red".to_string(), "p-blue".to_string()]);

    let shape = PegboardShape::rectangle(4, 2, false);
    let mut store = Store::default();
    store.upsert_palette(palette());
    store.upsert_shape(shape.clone());
    let id = store.create_pattern(BeadPattern::new("Flag", &shape, "perler", Some(conversion.grid)));
    store.set_active_colors(&id, Some(conversion.used_color_ids));

    let project = store.snapshot();
    let pattern = project.pattern(&id).unwrap();
    assert_eq!(pattern.grid[1][0].as_deref(), Some("p-red"));
    assert_eq!(pattern.grid[1][3].as_deref(), Some("p-blue"));
    let active: Vec<&str> = pattern
        .active_colors(project.palette("perler").unwrap())
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(active.len(), 2);
    assert!(active.contains(&"p-red") && active.contains(&"p-blue"));
}

#[test]
fn test_background_conversion_matches_inline() {
    let data = (0..6 * 6)
        .flat_map(|i| {
            let v = (i * 7 % 256) as u8;
            [v, 255 - v, v / 2, 255]
        })
        .collect();
    let raster = Raster::new(6, 6, data).unwrap();
    let options = ConversionOptions::new(6, 6)
        .with_dithering(Dithering::FloydSteinberg)
        .with_max_colors(2);

    let inline = image_data_to_bead_grid(&raster, &palette(), &options).unwrap();
    let background = convert_in_background(raster, palette(), options).join().unwrap().unwrap();
    assert_eq!(inline, background);
    assert!(background.used_color_ids.len() <= 2);
}
