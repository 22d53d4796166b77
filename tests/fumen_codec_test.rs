use fumen_tools::fumen::{self, Field, FumenError, Operation, Page, Piece, Rotation};

fn sample_fields() -> Vec<Field> {
    vec![
        Field::empty(),
        Field::from_rows(&["XXXXXXXXX_"]).unwrap(),
        Field::from_rows(&["__________", "ZZ_______I", "_ZZ___OO_I", "XXX__XOO_I", "XXXX_XXX_I"])
            .unwrap(),
        Field::from_rows(&["TTT_______"])
            .unwrap()
            .with_garbage("_XXXXXXXXX")
            .unwrap(),
    ]
}

#[test]
fn test_single_page_round_trip_keeps_field_and_comment() {
    let comments = [None, Some(""), Some("PCO"), Some("a,b,c"), Some("100% «quoted»")];
    for field in sample_fields() {
        for comment in comments {
            let page = Page::with_comment(field.clone(), comment.map(str::to_string));
            let decoded = fumen::first_page(&fumen::encode(&[page]).unwrap()).unwrap();
            assert_eq!(decoded.field, field);
            assert_eq!(decoded.comment_text(), comment.unwrap_or_default());
        }
    }
}

#[test]
fn test_multi_page_order_is_preserved() {
    let pages: Vec<Page> = sample_fields()
        .into_iter()
        .enumerate()
        .map(|(index, field)| Page::with_comment(field, Some(format!("page {}", index))))
        .collect();

    let decoded = fumen::decode(&fumen::encode(&pages).unwrap()).unwrap();
    assert_eq!(decoded.len(), pages.len());
    for (original, page) in pages.iter().zip(&decoded) {
        assert_eq!(page.field, original.field);
        assert_eq!(page.comment, original.comment);
    }
}

#[test]
fn test_many_identical_pages_use_repeat_runs() {
    let pages = vec![Page::default(); 70];
    let code = fumen::encode(&pages).unwrap();
    let decoded = fumen::decode(&code).unwrap();
    assert_eq!(decoded.len(), 70);
    assert!(decoded.iter().all(|page| page.field.is_empty()));
}

#[test]
fn test_piece_placements_decode_on_every_page() {
    let mut first = Page::new(Field::from_rows(&["XXXX__XXXX"]).unwrap());
    first.operation = Some(Operation {
        piece: Piece::O,
        rotation: Rotation::Spawn,
        x: 4,
        y: 0,
    });
    let mut second = Page::new(Field::from_rows(&["____OO____"]).unwrap());
    second.operation = Some(Operation {
        piece: Piece::T,
        rotation: Rotation::Reverse,
        x: 1,
        y: 1,
    });

    let decoded = fumen::decode(&fumen::encode(&[first.clone(), second.clone()]).unwrap()).unwrap();
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded[0].operation, first.operation);
    assert_eq!(decoded[1].field, second.field);
    assert_eq!(decoded[1].operation, second.operation);
}

#[test]
fn test_url_and_bare_code_decode_identically() {
    let code = fumen::encode(&[Page::with_comment(
        Field::from_rows(&["JJJ_______"]).unwrap(),
        Some("url".to_string()),
    )])
    .unwrap();
    let from_url = fumen::decode(&format!("https://fumen.zui.jp/?{}", code)).unwrap();
    assert_eq!(from_url, fumen::decode(&code).unwrap());
}

#[test]
fn test_malformed_codes_are_rejected() {
    assert_eq!(
        fumen::decode("hello").unwrap_err(),
        FumenError::UnsupportedVersion
    );
    assert!(matches!(
        fumen::decode("v115@vh*AgH").unwrap_err(),
        FumenError::InvalidCharacter { ch: '*', .. }
    ));
}

/// Two-page codes as fumen viewers write them: one locked placement on an
/// empty board, then a page showing the settled board.
const PLACEMENTS: &[(&str, Piece, Rotation, i32, i32, &[&str])] = &[
    ("v115@vhBTLJAAA", Piece::O, Rotation::Spawn, 4, 0, &["____OO____", "____OO____"]),
    ("v115@vhBLLJAAA", Piece::O, Rotation::Right, 4, 1, &["____OO____", "____OO____"]),
    ("v115@vhBjKJAAA", Piece::O, Rotation::Reverse, 4, 1, &["___OO_____", "___OO_____"]),
    ("v115@vhB7KJAAA", Piece::O, Rotation::Left, 4, 0, &["___OO_____", "___OO_____"]),
    ("v115@vhBRQJAAA", Piece::I, Rotation::Spawn, 4, 0, &["___IIII___"]),
    (
        "v115@vhBJGJAAA",
        Piece::I,
        Rotation::Right,
        4,
        2,
        &["____I_____", "____I_____", "____I_____", "____I_____"],
    ),
    ("v115@vhBhPJAAA", Piece::I, Rotation::Reverse, 4, 0, &["__IIII____"]),
    (
        "v115@vhBZGJAAA",
        Piece::I,
        Rotation::Left,
        4,
        1,
        &["____I_____", "____I_____", "____I_____", "____I_____"],
    ),
    ("v115@vhBXLJAAA", Piece::S, Rotation::Spawn, 4, 0, &["____SS____", "___SS_____"]),
    (
        "v115@vhBvLJAAA",
        Piece::S,
        Rotation::Right,
        4,
        1,
        &["____S_____", "____SS____", "_____S____"],
    ),
    ("v115@vhBHLJAAA", Piece::S, Rotation::Reverse, 4, 1, &["____SS____", "___SS_____"]),
    (
        "v115@vhBfLJAAA",
        Piece::S,
        Rotation::Left,
        4,
        1,
        &["___S______", "___SS_____", "____S_____"],
    ),
    ("v115@vhBULJAAA", Piece::Z, Rotation::Spawn, 4, 0, &["___ZZ_____", "____ZZ____"]),
    (
        "v115@vhBMLJAAA",
        Piece::Z,
        Rotation::Right,
        4,
        1,
        &["_____Z____", "____ZZ____", "____Z_____"],
    ),
    ("v115@vhBELJAAA", Piece::Z, Rotation::Reverse, 4, 1, &["___ZZ_____", "____ZZ____"]),
    (
        "v115@vhB8KJAAA",
        Piece::Z,
        Rotation::Left,
        4,
        1,
        &["____Z_____", "___ZZ_____", "___Z______"],
    ),
];

#[test]
fn test_viewer_codes_place_pieces_in_every_rotation() {
    for &(code, piece, rotation, x, y, rows) in PLACEMENTS {
        let pages = fumen::decode(code).unwrap();
        assert_eq!(pages.len(), 2, "{}", code);
        assert_eq!(
            pages[0].operation,
            Some(Operation {
                piece,
                rotation,
                x,
                y
            }),
            "{}",
            code
        );
        assert!(pages[0].field.is_empty(), "{}", code);
        assert_eq!(pages[1].field, Field::from_rows(rows).unwrap(), "{}", code);
        assert_eq!(fumen::encode(&pages).unwrap(), code);
    }
}

#[test]
fn test_viewer_code_with_cleared_second_page() {
    let code = "v115@vhATJJRhxSHexSReAAA";
    let pages = fumen::decode(code).unwrap();
    assert_eq!(
        pages[0].operation,
        Some(Operation {
            piece: Piece::O,
            rotation: Rotation::Spawn,
            x: 0,
            y: 0
        })
    );
    assert!(pages[1].field.is_empty());
    assert!(fumen::first_page(code).unwrap().field.is_empty());
    assert_eq!(fumen::encode(&pages).unwrap(), code);

    let wall = fumen::first_page("v115@vhAbJJ").unwrap();
    assert_eq!(
        wall.operation,
        Some(Operation {
            piece: Piece::O,
            rotation: Rotation::Left,
            x: 1,
            y: 0
        })
    );
}

#[test]
fn test_viewer_code_with_line_clear() {
    let code = "v115@bhH8LeTNJvhAAAA";
    let pages = fumen::decode(code).unwrap();
    assert_eq!(pages[0].field, Field::from_rows(&["XXXXXXXX__"]).unwrap());
    assert_eq!(
        pages[0].operation.map(|op| (op.piece, op.x, op.y)),
        Some((Piece::O, 8, 0))
    );
    assert_eq!(pages[1].field, Field::from_rows(&["________OO"]).unwrap());
    assert_eq!(fumen::encode(&pages).unwrap(), code);
}
