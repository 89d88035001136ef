use std::collections::HashSet;

use bonxai_geom::{CoordT, Point3D};
use bonxai_grid::{VoxelGrid, for_each_occupied_cell, occupied_cells};

#[test]
fn single_cell_scan_reports_world_position() {
    let grid = VoxelGrid::<bool>::with_bits(1.0, 2, 2).unwrap();
    grid.set_value(CoordT::new(3, 3, 3), true);

    let mut seen = Vec::new();
    for_each_occupied_cell(&grid, |v, c| seen.push((*v, c, grid.coord_to_pos(c))));
    assert_eq!(seen.len(), 1);
    let (v, c, p) = seen[0];
    assert!(v);
    assert_eq!(c, CoordT::new(3, 3, 3));
    assert_eq!(p, Point3D::new(3.0, 3.0, 3.0));
}

#[test]
fn empty_grid_visits_nothing() {
    let grid = VoxelGrid::<u32>::new(0.1).unwrap();
    let mut n = 0;
    grid.for_each_cell(|_, _| n += 1);
    assert_eq!(n, 0);
}

#[test]
fn scan_order_is_ascending_within_a_bucket() {
    let grid = VoxelGrid::<u32>::with_bits(1.0, 2, 2).unwrap();
    // All inside root (0,0,0): 16 cells per axis
    let coords = [
        CoordT::new(15, 15, 15),
        CoordT::new(0, 0, 0),
        CoordT::new(1, 0, 0),
        CoordT::new(4, 0, 0),
        CoordT::new(0, 1, 0),
        CoordT::new(0, 0, 4),
    ];
    for (i, c) in coords.iter().enumerate() {
        grid.set_value(*c, i as u32);
    }
    let order: Vec<CoordT> = occupied_cells(&grid).into_iter().map(|(c, _)| c).collect();
    // Leaf (inner index 0) first: x=0,1 then y=1, in leaf bit order
    assert_eq!(
        order,
        vec![
            CoordT::new(0, 0, 0),
            CoordT::new(1, 0, 0),
            CoordT::new(0, 1, 0),
            CoordT::new(4, 0, 0),
            CoordT::new(0, 0, 4),
            CoordT::new(15, 15, 15),
        ]
    );
}

#[test]
fn payloads_follow_their_cells() {
    let grid = VoxelGrid::<i64>::with_bits(0.25, 2, 3).unwrap();
    let mut acc = grid.create_accessor();
    for x in -20..20 {
        for z in -3..3 {
            acc.set_value(CoordT::new(x, x * 3, z), (x * 100 + z) as i64);
        }
    }
    let cells = occupied_cells(&grid);
    assert_eq!(cells.len(), 40 * 6);
    let unique: HashSet<CoordT> = cells.iter().map(|(c, _)| *c).collect();
    assert_eq!(unique.len(), cells.len());
    for (c, v) in cells {
        assert_eq!(v, (c.x * 100 + c.z) as i64);
        assert_eq!(c.y, c.x * 3);
    }
}
