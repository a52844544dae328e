//! Randomized checks of the single-source search over cost grids.

use pickpath_core::{Grid, Point};
use pickpath_paths::dijkstra;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Random grid mixing free cells, penalty cells and walls.
fn random_grid(rng: &mut StdRng, width: i32, height: i32) -> Grid<f32> {
    Grid::from_fn(width, height, |_| match rng.random_range(0..10) {
        0 | 1 => f32::INFINITY,
        2 => 11.0,
        _ => 1.0,
    })
}

fn first_free(g: &Grid<f32>) -> Option<Point> {
    g.iter().find(|(_, c)| c.is_finite()).map(|(p, _)| p)
}

#[test]
fn same_input_same_tree() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..5 {
        let g = random_grid(&mut rng, 24, 17);
        let Some(start) = first_free(&g) else {
            continue;
        };
        let a = dijkstra(&g, start);
        let b = dijkstra(&g, start);
        assert_eq!(a, b);
    }
}

#[test]
fn relaxation_holds_everywhere() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..5 {
        let g = random_grid(&mut rng, 30, 20);
        let Some(start) = first_free(&g) else {
            continue;
        };
        let tree = dijkstra(&g, start);
        for p in g.bounds() {
            let d = tree.distance_at(p);
            if !d.is_finite() {
                continue;
            }
            assert!(d >= 0.0);
            for n in p.neighbors_4() {
                let Some(cost) = g.at(n) else {
                    continue;
                };
                if !cost.is_finite() {
                    continue;
                }
                assert!(
                    tree.distance_at(n) <= d + cost + 1e-4,
                    "edge {p:?} -> {n:?} can still be relaxed"
                );
            }
        }
    }
}

#[test]
fn path_cost_matches_distance() {
    let mut rng = StdRng::seed_from_u64(1234);
    let g = random_grid(&mut rng, 40, 25);
    let start = first_free(&g).expect("grid has a free cell");
    let tree = dijkstra(&g, start);
    let mut checked = 0;
    for p in g.bounds() {
        let Some(path) = tree.path_to(p) else {
            assert!(!tree.is_reachable(p));
            continue;
        };
        assert_eq!(path[0], start);
        assert_eq!(*path.last().unwrap(), p);
        let cost: f32 = path[1..].iter().map(|&c| g.at(c).unwrap()).sum();
        assert!((cost - tree.distance_at(p)).abs() < 1e-3);
        for w in path.windows(2) {
            assert!(w[0].neighbors_4().contains(&w[1]));
        }
        checked += 1;
    }
    assert!(checked > 0);
}

#[test]
fn open_ten_by_ten_corner_to_corner() {
    let g = Grid::new(10, 10, 1.0f32);
    let tree = dijkstra(&g, Point::new(0, 0));
    let end = Point::new(9, 9);
    assert_eq!(tree.distance_at(end), 18.0);
    assert_eq!(tree.path_to(end).unwrap().len(), 19);
}

#[test]
fn single_gap_in_wall_is_used() {
    let mut g = Grid::new(10, 10, 1.0f32);
    for row in 1..10 {
        g.set(Point::from_row_col(row, 5), f32::INFINITY);
    }
    let open = dijkstra(&Grid::new(10, 10, 1.0f32), Point::new(0, 0));
    let tree = dijkstra(&g, Point::new(0, 0));
    let end = Point::new(9, 9);
    // Along the top row and down the far side is still a monotone route.
    assert!(tree.distance_at(end) >= open.distance_at(end));
    let path = tree.path_to(end).unwrap();
    let crossing: Vec<_> = path.iter().filter(|p| p.col() == 5).collect();
    assert_eq!(crossing, vec![&Point::from_row_col(0, 5)]);

    // From the bottom-left corner the gap forces a real detour.
    let bottom_left = Point::from_row_col(9, 0);
    let open = dijkstra(&Grid::new(10, 10, 1.0f32), bottom_left);
    let tree = dijkstra(&g, bottom_left);
    assert_eq!(open.distance_at(end), 9.0);
    assert_eq!(tree.distance_at(end), 27.0);
    assert!(tree.path_to(end).unwrap().contains(&Point::from_row_col(0, 5)));
}

#[test]
fn sealed_ring_is_unreachable() {
    let mut g = Grid::new(9, 9, 1.0f32);
    for p in g.bounds() {
        let ring = (2..=6).contains(&p.x)
            && (2..=6).contains(&p.y)
            && (p.x == 2 || p.x == 6 || p.y == 2 || p.y == 6);
        if ring {
            g.set(p, f32::INFINITY);
        }
    }
    let tree = dijkstra(&g, Point::new(0, 0));
    assert!(!tree.is_reachable(Point::new(4, 4)));
    assert!(tree.path_to(Point::new(4, 4)).is_none());
    assert!(tree.is_reachable(Point::new(8, 8)));
}
