//! Grid tests - fixed-size value grids

use retro_arcade::core::{Field, Grid, Preview};
use retro_arcade::types::{EMPTY, FIELD_HEIGHT, FIELD_WIDTH, PREVIEW_SIZE};

#[test]
fn test_field_new_empty() {
    let field = Field::new();
    assert_eq!(field.width(), FIELD_WIDTH);
    assert_eq!(field.height(), FIELD_HEIGHT);

    for y in 0..FIELD_HEIGHT as i32 {
        for x in 0..FIELD_WIDTH as i32 {
            assert!(field.is_vacant(x, y), "Cell ({}, {}) should be empty", x, y);
        }
    }
}

#[test]
fn test_preview_dimensions() {
    let preview = Preview::new();
    assert_eq!(preview.width(), PREVIEW_SIZE);
    assert_eq!(preview.height(), PREVIEW_SIZE);
}

#[test]
fn test_get_out_of_bounds() {
    let field = Field::new();
    assert_eq!(field.get(-1, 0), None);
    assert_eq!(field.get(0, -1), None);
    assert_eq!(field.get(FIELD_WIDTH as i32, 0), None);
    assert_eq!(field.get(0, FIELD_HEIGHT as i32), None);
}

#[test]
fn test_set_and_get() {
    let mut field = Field::new();
    assert!(field.set(5, 10, 3));
    assert_eq!(field.get(5, 10), Some(3));
    assert!(field.is_occupied(5, 10));

    assert!(field.set(5, 10, EMPTY));
    assert!(field.is_vacant(5, 10));

    assert!(!field.set(-1, 0, 1));
    assert!(!field.set(0, FIELD_HEIGHT as i32, 1));
}

#[test]
fn test_copies_are_independent() {
    let mut a = Field::new();
    a.set(0, 0, 1);
    let mut b = a;
    b.set(1, 1, 1);

    assert_ne!(a, b);
    assert_eq!(a.count(|c| c != EMPTY), 1);
    assert_eq!(b.count(|c| c != EMPTY), 2);
}

#[test]
fn test_clear_rows_shift_down() {
    let mut field = Field::new();
    for x in 0..FIELD_WIDTH as i32 {
        field.set(x, 19, 1);
    }
    field.set(2, 18, 1);
    field.set(7, 17, 1);

    let cleared = field.clear_full_rows();

    assert_eq!(cleared.len(), 1);
    assert_eq!(field.get(2, 19), Some(1));
    assert_eq!(field.get(7, 18), Some(1));
    assert!(field.rows()[0].iter().all(|&c| c == EMPTY));
}

#[test]
fn test_clear_non_adjacent_rows() {
    let mut field = Field::new();
    for y in [19, 17] {
        for x in 0..FIELD_WIDTH as i32 {
            field.set(x, y, 1);
        }
    }
    field.set(4, 18, 1);
    field.set(4, 16, 1);

    assert_eq!(field.clear_full_rows().len(), 2);
    assert_eq!(field.get(4, 19), Some(1));
    assert_eq!(field.get(4, 18), Some(1));
    assert_eq!(field.count(|c| c != EMPTY), 2);
}

#[test]
fn test_is_full() {
    let mut grid: Grid<3, 2> = Grid::from_rows([[1, 1, 1], [1, 0, 1]]);
    assert!(!grid.is_full());
    assert!(grid.is_row_full(0));
    assert!(!grid.is_row_full(1));
    grid.set(1, 1, 9);
    assert!(grid.is_full());
}
