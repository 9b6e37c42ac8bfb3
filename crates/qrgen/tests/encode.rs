//! End-to-end encoding scenarios through the public API.

use qrgen::{Ecl, QrError, Symbol, Version};

fn full_range(data: &[u8], ecl: Ecl) -> Symbol {
    Symbol::encode(data, ecl).unwrap()
}

#[test]
fn hello_world_fits_version_one_and_upgrades_to_quartile() {
    // 4 + 8 + 88 = 100 bits used; quartile capacity at version 1 is
    // 13 bytes = 104 bits, high is only 72.
    let qr = full_range(b"HELLO WORLD", Ecl::Medium);
    assert_eq!(qr.version().value(), 1);
    assert_eq!(qr.size(), 21);
    assert_eq!(qr.ecl(), Ecl::Quartile);
}

#[test]
fn ten_digits_upgrade_from_low_to_quartile() {
    // 92 bits used as bytes; high (72 bits) does not fit, quartile does.
    let qr = full_range(b"1234567890", Ecl::Low);
    assert_eq!(qr.version().value(), 1);
    assert_eq!(qr.ecl(), Ecl::Quartile);
}

#[test]
fn two_hundred_fifty_six_bytes_land_on_version_ten() {
    let qr = full_range(&[0x41u8; 256], Ecl::Low);
    assert_eq!(qr.version().value(), 10);
    assert_eq!(qr.ecl(), Ecl::Low);
}

#[test]
fn empty_payload_is_a_well_formed_version_one_symbol() {
    let qr = full_range(b"", Ecl::Low);
    assert_eq!(qr.version().value(), 1);
    assert_eq!(qr.ecl(), Ecl::High);
    assert_eq!(qr.size(), 21);
    assert!(qr.mask().value() <= 7);
}

#[test]
fn high_level_payload_overflows_a_capped_version_range() {
    let data: Vec<u8> = (0u8..255).collect();
    let v1 = Version::new(1).unwrap();
    let v5 = Version::new(5).unwrap();
    let err = Symbol::encode_in_range(&data, v1, v5, Ecl::High).unwrap_err();
    assert!(matches!(err, QrError::DataOverCapacity { .. }));

    let qr = Symbol::encode(&data, Ecl::High).unwrap();
    assert!(qr.version().value() >= 10);
    assert_eq!(qr.ecl(), Ecl::High);
}

#[test]
fn an_inverted_version_range_is_an_invariant_violation() {
    let v1 = Version::new(1).unwrap();
    let v5 = Version::new(5).unwrap();
    let err = Symbol::encode_in_range(b"x", v5, v1, Ecl::Low).unwrap_err();
    assert!(matches!(err, QrError::Invariant(_)));
}

#[test]
fn encoding_is_deterministic() {
    let a = full_range(b"determinism", Ecl::Medium);
    let b = full_range(b"determinism", Ecl::Medium);
    assert_eq!(a, b);
}

#[test]
fn out_of_bounds_modules_read_light() {
    let qr = full_range(b"bounds", Ecl::Low);
    assert!(!qr.module(-1, 0));
    assert!(!qr.module(0, -1));
    assert!(!qr.module(qr.size(), 0));
    assert!(!qr.module(0, qr.size()));
}

#[test]
fn the_dark_module_is_dark() {
    for data in [
        &b"a"[..],
        &b"HELLO WORLD"[..],
        &b"0123456789012345678901234567890123456789"[..],
    ] {
        let qr = full_range(data, Ecl::Low);
        assert!(qr.module(8, qr.size() - 8));
    }
}

#[test]
fn timing_tracks_alternate_between_the_finders() {
    let qr = full_range(b"timing", Ecl::Medium);
    for i in 8..qr.size() - 8 {
        assert_eq!(qr.module(i, 6), i % 2 == 0, "row track at {i}");
        assert_eq!(qr.module(6, i), i % 2 == 0, "column track at {i}");
    }
}

#[test]
fn finder_corners_show_the_glyph() {
    let qr = full_range(b"finders", Ecl::Medium);
    let s = qr.size();
    // Outer ring dark, light ring inside it, dark 3x3 center.
    for (ox, oy) in [(0, 0), (s - 7, 0), (0, s - 7)] {
        assert!(qr.module(ox, oy));
        assert!(qr.module(ox + 6, oy + 6));
        assert!(!qr.module(ox + 1, oy + 1));
        assert!(qr.module(ox + 3, oy + 3));
    }
}

#[test]
fn format_bits_encode_the_chosen_level_and_mask() {
    let qr = full_range(b"HELLO WORLD", Ecl::Medium);
    let s = qr.size();

    // Recompute the expected 15-bit sequence independently.
    let data = u32::from(qr.ecl().format_bits() << 3 | qr.mask().value());
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * 0x537);
    }
    let expected = (data << 10 | rem) ^ 0x5412;

    let bit = |i: u32| expected >> i & 1 != 0;

    // First copy around the top left finder.
    for i in 0..6 {
        assert_eq!(qr.module(8, i as i32), bit(i), "copy 1 bit {i}");
    }
    assert_eq!(qr.module(8, 7), bit(6));
    assert_eq!(qr.module(8, 8), bit(7));
    assert_eq!(qr.module(7, 8), bit(8));
    for i in 9..15 {
        assert_eq!(qr.module(14 - i as i32, 8), bit(i), "copy 1 bit {i}");
    }

    // Second copy along the top right and bottom left edges.
    for i in 0..8 {
        assert_eq!(qr.module(s - 1 - i as i32, 8), bit(i), "copy 2 bit {i}");
    }
    for i in 8..15 {
        assert_eq!(qr.module(8, s - 15 + i as i32), bit(i), "copy 2 bit {i}");
    }
}

#[test]
fn hello_world_matches_the_reference_grid() {
    // Byte-mode HELLO WORLD encodes as version 1 at quartile level with
    // mask 7; the complete 21x21 reference matrix below has dark cells
    // drawn as '#'. Any slip in codeword interleaving, the serpentine
    // walk, masking, or the format bits shows up as a cell mismatch here.
    const ROWS: [&str; 21] = [
        "#######.#..#..#######",
        "#.....#..#....#.....#",
        "#.###.#.#..#..#.###.#",
        "#.###.#.#.##..#.###.#",
        "#.###.#..##.#.#.###.#",
        "#.....#.##.#..#.....#",
        "#######.#.#.#.#######",
        "........#.###........",
        ".#.#.####..#####.##.#",
        "..####...#....##...#.",
        ".#..#.##.#.##..#.##.#",
        "#.###..#.####.#.##.##",
        ".#.##.#.#.##.####.#..",
        "........##..#...#.#..",
        "#######.##.#..######.",
        "#.....#.#####..#....#",
        "#.###.#..#..###...##.",
        "#.###.#.#.#....######",
        "#.###.#...#.#.#.#.#.#",
        "#.....#.#.##.#.......",
        "#######...#.#..#.###.",
    ];

    let qr = full_range(b"HELLO WORLD", Ecl::Medium);
    assert_eq!(qr.size(), 21);
    assert_eq!(qr.ecl(), Ecl::Quartile);
    assert_eq!(qr.mask().value(), 7);
    for (y, row) in ROWS.iter().enumerate() {
        for (x, cell) in row.bytes().enumerate() {
            assert_eq!(
                qr.module(x as i32, y as i32),
                cell == b'#',
                "module ({x}, {y})"
            );
        }
    }
}

#[test]
fn version_information_appears_from_version_seven() {
    let v7 = Version::new(7).unwrap();
    let qr = Symbol::encode_in_range(b"seven", v7, v7, Ecl::Low).unwrap();
    let s = qr.size();

    let data = u32::from(qr.version().value());
    let mut rem = data;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * 0x1F25);
    }
    let expected = data << 12 | rem;

    for i in 0..18i32 {
        let bit = expected >> i & 1 != 0;
        assert_eq!(qr.module(s - 11 + i % 3, i / 3), bit, "rect 1 bit {i}");
        assert_eq!(qr.module(i / 3, s - 11 + i % 3), bit, "rect 2 bit {i}");
    }
}

#[test]
fn a_pinned_version_range_is_honored() {
    let v3 = Version::new(3).unwrap();
    let qr = Symbol::encode_in_range(b"pin", v3, v3, Ecl::Low).unwrap();
    assert_eq!(qr.version().value(), 3);
    assert_eq!(qr.size(), 29);
}
