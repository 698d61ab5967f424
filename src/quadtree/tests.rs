use super::*;
use rand::prelude::*;
use rand::rngs::SmallRng;
use std::collections::HashSet;

fn get_rand() -> SmallRng {
    SmallRng::seed_from_u64(0xdeadbeef)
}

fn table(size: f64) -> Quadtree {
    Quadtree::new(Rectangle::from_size(size, size), 4).unwrap()
}

#[test]
fn insertions() {
    let mut tree = table(128.0);

    assert!(tree.insert(Point::new(16, 32)));
    assert_eq!(tree.len(), 1);
    assert!(tree.contains(&Point::new(16, 32)));
}

#[test]
fn insert_outside_fails() {
    let mut tree = table(128.0);

    assert!(!tree.insert(Point::new(-1, 32)));
    assert!(!tree.insert(Point::new(16, 129)));
    assert!(tree.insert(Point::new(128, 128)), "boundary is inclusive");
    assert_eq!(tree.len(), 1);
}

#[test]
fn rejects_degenerate_construction() {
    assert_eq!(
        Quadtree::new(Rectangle::from_size(10.0, 10.0), 0).unwrap_err(),
        Error::InvalidCapacity
    );
    assert!(matches!(
        Quadtree::new(Rectangle::from_size(0.0, 10.0), 4),
        Err(Error::DegenerateBoundary { .. })
    ));
    assert!(matches!(
        Quadtree::new(Rectangle::from_size(10.0, std::f64::NAN), 4),
        Err(Error::DegenerateBoundary { .. })
    ));
}

#[test]
fn huge_capacity_does_not_preallocate() {
    let mut tree = Quadtree::new(Rectangle::from_size(10.0, 10.0), std::usize::MAX).unwrap();

    for i in 0..10 {
        assert!(tree.insert(Point::new(i, i)));
    }
    assert_eq!(tree.capacity(), std::usize::MAX);
    assert!(!tree.is_divided());
    assert_eq!(tree.len(), 10);
}

#[test]
fn splits_past_capacity() {
    let mut tree = table(128.0);

    for i in 0..4 {
        tree.insert(Point::new(i, i));
    }
    assert!(!tree.is_divided());

    tree.insert(Point::new(100, 100));
    assert!(tree.is_divided());
    assert_eq!(tree.len(), 5);
}

#[test]
fn coincident_points_do_not_recurse_forever() {
    let mut tree = table(128.0);

    for _ in 0..1000 {
        assert!(tree.insert(Point::new(7, 7)));
    }
    assert_eq!(tree.len(), 1000);
    assert_eq!(tree.iter().count(), 1000);

    for _ in 0..1000 {
        assert!(tree.remove(&Point::new(7, 7)));
    }
    assert!(tree.is_empty());
    assert!(!tree.remove(&Point::new(7, 7)));
}

#[test]
fn insert_remove_inverse() {
    let mut rng = get_rand();
    let mut tree = table(256.0);

    for _ in 0..512 {
        tree.insert(Point::new(rng.gen_range(0, 256), rng.gen_range(0, 256)));
    }
    let before = tree.len();

    let p = Point::new(300, 300);
    assert!(!tree.remove(&p), "removing a missing point is a no-op");
    assert_eq!(tree.len(), before);

    let p = Point::new(255, 0);
    let existing = tree.iter().filter(|q| *q == p).count();
    tree.insert(p);
    assert!(tree.remove(&p));
    assert_eq!(tree.len(), before);
    assert_eq!(tree.iter().filter(|q| *q == p).count(), existing);
}

#[test]
fn remove_all() {
    let mut rng = get_rand();
    let mut tree = table(256.0);

    let points = (0..1000)
        .map(|_| Point::new(rng.gen_range(0, 256), rng.gen_range(0, 256)))
        .collect::<Vec<_>>();
    assert_eq!(tree.extend(points.iter().cloned()), points.len());

    for (i, p) in points.iter().enumerate() {
        assert!(tree.remove(p), "{:?}", p);
        assert_eq!(tree.len(), points.len() - i - 1);
    }
    assert_eq!(tree.iter().count(), 0);
}

#[test]
fn iter_yields_every_point_once() {
    let mut rng = get_rand();
    let mut tree = table(512.0);
    let mut points = HashSet::new();

    while points.len() < 2048 {
        let p = Point::new(rng.gen_range(0, 512), rng.gen_range(0, 512));
        if points.insert(p) {
            tree.insert(p);
        }
    }

    let visited = tree.iter().collect::<Vec<_>>();
    assert_eq!(visited.len(), points.len());
    assert_eq!(visited.iter().cloned().collect::<HashSet<_>>(), points);

    // deterministic
    assert_eq!(visited, (&tree).into_iter().collect::<Vec<_>>());
}

#[test]
fn iter_visits_own_points_before_children() {
    let mut tree = Quadtree::new(Rectangle::from_size(100.0, 100.0), 1).unwrap();

    tree.insert(Point::new(10, 10)); // root
    tree.insert(Point::new(90, 90)); // se
    tree.insert(Point::new(10, 90)); // sw
    tree.insert(Point::new(90, 10)); // ne
    tree.insert(Point::new(20, 20)); // nw

    let order = tree.iter().collect::<Vec<_>>();
    assert_eq!(
        order,
        vec![
            Point::new(10, 10),
            Point::new(90, 10),
            Point::new(20, 20),
            Point::new(90, 90),
            Point::new(10, 90),
        ]
    );
}

#[test]
fn test_range_query_all() {
    let mut rng = get_rand();
    let mut tree = table(128.0);

    for _ in 0..256 {
        tree.insert(Point::new(rng.gen_range(0, 128), rng.gen_range(0, 128)));
    }

    let mut res = Vec::new();
    // sqrt a^2 + b^2 = 90.5; where a = 64 and b = 64
    tree.query(&Circle::new(64.0, 64.0, 91.0), &mut res);
    assert_eq!(res.len(), 256);

    res.clear();
    tree.query(&Rectangle::from_size(128.0, 128.0), &mut res);
    assert_eq!(res.len(), 256);
}

#[test]
fn test_range_query_partial() {
    let mut tree = table(32.0);

    for p in [
        Point::new(8, 6),
        Point::new(9, 10),
        Point::new(11, 8),
        Point::new(6, 8),
        // lets put some outside the query range
        Point::new(16, 8),
        Point::new(12, 11),
        Point::new(0, 0),
        Point::new(15, 20),
    ]
    .iter()
    {
        tree.insert(*p);
    }

    let mut res = Vec::new();
    tree.query(&Circle::new(8.0, 8.0, 3.0), &mut res);

    let res = res.into_iter().collect::<HashSet<_>>();
    let expected = [
        Point::new(8, 6),
        Point::new(9, 10),
        Point::new(11, 8),
        Point::new(6, 8),
    ]
    .iter()
    .cloned()
    .collect::<HashSet<_>>();
    assert_eq!(res, expected);
}

#[test]
fn query_visits_children_nw_ne_sw_se() {
    let mut tree = Quadtree::new(Rectangle::from_size(100.0, 100.0), 1).unwrap();

    tree.insert(Point::new(5, 5)); // root
    tree.insert(Point::new(90, 10)); // ne
    tree.insert(Point::new(20, 20)); // nw
    tree.insert(Point::new(90, 90)); // se
    tree.insert(Point::new(10, 90)); // sw
    assert!(tree.is_divided());

    let mut res = Vec::new();
    tree.query(&Rectangle::from_size(100.0, 100.0), &mut res);
    assert_eq!(
        res,
        vec![
            Point::new(5, 5),
            Point::new(20, 20),
            Point::new(90, 10),
            Point::new(10, 90),
            Point::new(90, 90),
        ]
    );

    res.clear();
    // leaves out the root point at a distance of 63.6
    tree.query(&Circle::new(50.0, 50.0, 60.0), &mut res);
    assert_eq!(
        res,
        vec![
            Point::new(20, 20),
            Point::new(90, 10),
            Point::new(10, 90),
            Point::new(90, 90),
        ]
    );
}

fn check_query_soundness<Q: Queryable>(tree: &Quadtree, range: &Q) {
    let mut res = Vec::new();
    tree.query(range, &mut res);

    for p in res.iter() {
        assert!(range.contains(p), "{:?} is not in range", p);
    }

    let expected = tree.iter().filter(|p| range.contains(p)).count();
    assert_eq!(res.len(), expected, "the query missed some points");
}

#[test]
fn query_soundness_rand() {
    let mut rng = get_rand();

    for _ in 0..32 {
        let mut tree = Quadtree::new(Rectangle::from_size(400.0, 300.0), rng.gen_range(1, 32))
            .unwrap();
        for _ in 0..rng.gen_range(0, 2000) {
            tree.insert(Point::new(rng.gen_range(0, 401), rng.gen_range(0, 301)));
        }

        for _ in 0..16 {
            let circle = Circle::new(
                rng.gen_range(-50.0, 450.0),
                rng.gen_range(-50.0, 350.0),
                rng.gen_range(0.0, 120.0),
            );
            check_query_soundness(&tree, &circle);

            let rect = Rectangle::new(
                rng.gen_range(-50.0, 450.0),
                rng.gen_range(-50.0, 350.0),
                rng.gen_range(0.0, 200.0),
                rng.gen_range(0.0, 200.0),
            );
            check_query_soundness(&tree, &rect);
        }
    }
}

#[test]
fn clear_empties_the_tree() {
    let mut rng = get_rand();
    let mut tree = table(128.0);

    for _ in 0..100 {
        tree.insert(Point::new(rng.gen_range(0, 128), rng.gen_range(0, 128)));
    }
    tree.clear();

    assert!(tree.is_empty());
    assert_eq!(tree.iter().count(), 0);
    assert!(tree.insert(Point::new(1, 1)));
    assert_eq!(tree.len(), 1);
}
