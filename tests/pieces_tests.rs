//! Pieces module tests - catalog matrices, colors and rotation indexing

use eldritch_tetris::core::pieces::shape_for_index;
use eldritch_tetris::core::{definition, shape_for, CATALOG};
use eldritch_tetris::types::{PieceKind, Rotation, PREVIEW_SIZE};

// ============== Shape Tests ==============

#[test]
fn test_i_piece_shapes() {
    assert_eq!(
        shape_for(PieceKind::I, Rotation::North).shape(),
        [(0, 1), (1, 1), (2, 1), (3, 1)]
    );
    assert_eq!(
        shape_for(PieceKind::I, Rotation::East).shape(),
        [(2, 0), (2, 1), (2, 2), (2, 3)]
    );
    assert_eq!(
        shape_for(PieceKind::I, Rotation::South).shape(),
        [(0, 2), (1, 2), (2, 2), (3, 2)]
    );
    assert_eq!(
        shape_for(PieceKind::I, Rotation::West).shape(),
        [(1, 0), (1, 1), (1, 2), (1, 3)]
    );
}

#[test]
fn test_o_piece_shapes() {
    let north = shape_for(PieceKind::O, Rotation::North);
    assert_eq!(north.size(), 2);
    assert_eq!(north.shape(), [(0, 0), (1, 0), (0, 1), (1, 1)]);
    for rotation in Rotation::ALL {
        assert_eq!(shape_for(PieceKind::O, rotation), north);
    }
}

#[test]
fn test_t_piece_shapes() {
    assert_eq!(
        shape_for(PieceKind::T, Rotation::North).shape(),
        [(1, 0), (0, 1), (1, 1), (2, 1)]
    );
    assert_eq!(
        shape_for(PieceKind::T, Rotation::East).shape(),
        [(1, 0), (1, 1), (2, 1), (1, 2)]
    );
    assert_eq!(
        shape_for(PieceKind::T, Rotation::South).shape(),
        [(0, 1), (1, 1), (2, 1), (1, 2)]
    );
    assert_eq!(
        shape_for(PieceKind::T, Rotation::West).shape(),
        [(1, 0), (0, 1), (1, 1), (1, 2)]
    );
}

#[test]
fn test_spawn_shapes_of_remaining_pieces() {
    assert_eq!(
        shape_for(PieceKind::S, Rotation::North).shape(),
        [(1, 0), (2, 0), (0, 1), (1, 1)]
    );
    assert_eq!(
        shape_for(PieceKind::Z, Rotation::North).shape(),
        [(0, 0), (1, 0), (1, 1), (2, 1)]
    );
    assert_eq!(
        shape_for(PieceKind::J, Rotation::North).shape(),
        [(0, 0), (0, 1), (1, 1), (2, 1)]
    );
    assert_eq!(
        shape_for(PieceKind::L, Rotation::North).shape(),
        [(2, 0), (0, 1), (1, 1), (2, 1)]
    );
}

#[test]
fn test_every_matrix_has_four_minos_inside_its_box() {
    for def in CATALOG.iter() {
        let expected_size = match def.kind {
            PieceKind::I => 4,
            PieceKind::O => 2,
            _ => 3,
        };
        for rotation in Rotation::ALL {
            let matrix = def.matrix(rotation);
            assert_eq!(matrix.size(), expected_size, "{:?} {:?}", def.kind, rotation);
            assert_eq!(matrix.filled_count(), 4, "{:?} {:?}", def.kind, rotation);
            assert!(matrix
                .minos()
                .all(|(c, r)| c >= 0 && r >= 0 && c < expected_size as i8 && r < expected_size as i8));
            assert_eq!(matrix.rows().count(), expected_size as usize);
        }
    }
}

#[test]
fn test_catalog_order_matches_kinds() {
    for (def, kind) in CATALOG.iter().zip(PieceKind::ALL) {
        assert_eq!(def.kind, kind);
        assert_eq!(definition(kind).kind, kind);
        assert_eq!(def.color, kind.color());
    }
}

#[test]
fn test_catalog_colors() {
    assert_eq!(definition(PieceKind::I).color.to_hex(), "#00ffff");
    assert_eq!(definition(PieceKind::O).color.to_hex(), "#ffd700");
    assert_eq!(definition(PieceKind::T).color.to_hex(), "#9b59b6");
    assert_eq!(definition(PieceKind::S).color.to_hex(), "#2ecc71");
    assert_eq!(definition(PieceKind::Z).color.to_hex(), "#e74c3c");
    assert_eq!(definition(PieceKind::J).color.to_hex(), "#3498db");
    assert_eq!(definition(PieceKind::L).color.to_hex(), "#e67e22");
}

// ============== Rotation Index Tests ==============

#[test]
fn test_rotation_index_wraps() {
    for kind in PieceKind::ALL {
        for index in -8i32..8 {
            let expected = shape_for(kind, Rotation::from_index(index.rem_euclid(4)));
            assert_eq!(shape_for_index(kind, index), expected);
        }
        assert_eq!(
            shape_for_index(kind, -1),
            shape_for(kind, Rotation::West)
        );
        assert_eq!(shape_for_index(kind, 4), shape_for(kind, Rotation::North));
    }
}

#[test]
fn test_rotation_steps() {
    assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    assert_eq!(Rotation::West.step(1), Rotation::North);
    assert_eq!(Rotation::South.step(-1), Rotation::East);
    assert_eq!(Rotation::default(), Rotation::North);
}

// ============== Preview Tests ==============

#[test]
fn test_preview_origin_centers_matrix() {
    assert_eq!(definition(PieceKind::I).preview_origin(PREVIEW_SIZE), (0, 0));
    assert_eq!(definition(PieceKind::O).preview_origin(PREVIEW_SIZE), (1, 1));
    assert_eq!(definition(PieceKind::T).preview_origin(PREVIEW_SIZE), (0, 0));
}
