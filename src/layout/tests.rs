//! Unit tests for region parsing and the tiling placement math.

use super::*;

#[test]
fn test_parse_region() {
    let region: Region = "1920x1080+0+0".parse().unwrap();
    assert_eq!(
        region,
        Region {
            x: 0,
            y: 0,
            width: 1920,
            height: 1080
        }
    );
}

#[test]
fn test_parse_region_negative_offsets() {
    let region: Region = "800x600+-800+-600".parse().unwrap();
    assert_eq!(region.x, -800);
    assert_eq!(region.y, -600);
}

#[test]
fn test_parse_region_rejects_malformed_tokens() {
    for token in ["", "abc", "800x600", "800x600+0", "-1x600+0+0", "800x600+0+0+0", "WxH+x+y"] {
        assert!(token.parse::<Region>().is_err(), "accepted `{token}`");
    }
}

#[test]
fn test_region_display_round_trips() {
    let region = Region {
        x: -10,
        y: 20,
        width: 640,
        height: 480,
    };
    assert_eq!(region.to_string(), "640x480+-10+20");
    assert_eq!(region.to_string().parse::<Region>().unwrap(), region);
}

#[test]
fn test_tile_no_windows() {
    let region = Region {
        x: 0,
        y: 0,
        width: 100,
        height: 100,
    };
    assert!(tile(0, region, 10).is_empty());
}

#[test]
fn test_tile_wide_region_splits_into_columns() {
    let region = Region {
        x: 50,
        y: 20,
        width: 200,
        height: 100,
    };
    let rects = tile(2, region, 10);

    // each slot is 100 wide; windows sit gap/2 inside their slot and
    // lose the full gap in extent
    assert_eq!(
        rects,
        vec![
            Region {
                x: 55,
                y: 25,
                width: 90,
                height: 90
            },
            Region {
                x: 155,
                y: 25,
                width: 90,
                height: 90
            },
        ]
    );
}

#[test]
fn test_tile_tall_region_splits_into_rows() {
    let region = Region {
        x: 0,
        y: 0,
        width: 100,
        height: 300,
    };
    let rects = tile(3, region, 4);

    assert_eq!(
        rects,
        vec![
            Region {
                x: 2,
                y: 2,
                width: 96,
                height: 96
            },
            Region {
                x: 2,
                y: 102,
                width: 96,
                height: 96
            },
            Region {
                x: 2,
                y: 202,
                width: 96,
                height: 96
            },
        ]
    );
}

#[test]
fn test_tile_single_window_fills_region() {
    let region = Region {
        x: 0,
        y: 0,
        width: 1920,
        height: 1080,
    };
    let rects = tile(1, region, 0);
    assert_eq!(rects, vec![region]);
}

#[test]
fn test_tile_gap_larger_than_slot_clamps_to_one_pixel() {
    let region = Region {
        x: 0,
        y: 0,
        width: 30,
        height: 10,
    };
    let rects = tile(3, region, 50);
    for rect in rects {
        assert_eq!(rect.width, 1);
        assert_eq!(rect.height, 1);
    }
}
