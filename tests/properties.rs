//! Property tests over randomly generated connected graphs.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use u_postman::graph::{generate_connected, path_length, Graph, PathFinder, VertexId};
use u_postman::postman::{find_first_solution, find_solution, splice_at, Walk};
use u_postman::sa::SaConfig;

fn graph(n: usize, seed: u64) -> Graph {
    generate_connected(n, &mut StdRng::seed_from_u64(seed)).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn first_solution_is_closed_cover(n in 2usize..12, seed in any::<u64>(), start in 0usize..12) {
        let g = graph(n, seed);
        let start = VertexId(start % n);
        let walk = find_first_solution(&g, start, &mut StdRng::seed_from_u64(seed ^ 0x5eed)).unwrap();
        prop_assert!(walk.covers(&g));
        prop_assert!(walk.is_closed(&g));
        prop_assert_eq!(walk.start(), start);
    }

    #[test]
    fn cost_is_sum_of_occurrences(n in 2usize..10, seed in any::<u64>()) {
        let g = graph(n, seed);
        let walk = find_first_solution(&g, VertexId(0), &mut StdRng::seed_from_u64(seed)).unwrap();
        let by_count: f64 = g
            .edges()
            .iter()
            .map(|e| e.length() * walk.occurrences(e.id()) as f64)
            .sum();
        prop_assert!((walk.cost(&g) - by_count).abs() < 1e-6);
    }

    #[test]
    fn every_splice_preserves_coverage(n in 2usize..9, seed in any::<u64>()) {
        let g = graph(n, seed);
        let walk = find_first_solution(&g, VertexId(0), &mut StdRng::seed_from_u64(seed)).unwrap();
        for index in 0..walk.len() {
            let next: Walk = splice_at(&g, &walk, index).unwrap();
            prop_assert!(next.covers(&g), "index {} broke coverage", index);
            prop_assert!(next.is_closed(&g), "index {} broke the walk", index);
        }
    }

    #[test]
    fn shortest_path_is_symmetric(n in 2usize..12, seed in any::<u64>(), a in 0usize..12, b in 0usize..12) {
        let g = graph(n, seed);
        let (a, b) = (VertexId(a % n), VertexId(b % n));
        let finder = PathFinder::new(&g);
        let there = finder.shortest_path(a, b).unwrap();
        let back = finder.shortest_path(b, a).unwrap();
        prop_assert!((path_length(&g, &there) - path_length(&g, &back)).abs() < 1e-9);
        if a == b {
            prop_assert!(there.is_empty());
        }
        // never longer than the fewest-hop route
        let hops = finder.hop_path(a, b).unwrap();
        prop_assert!(path_length(&g, &there) <= path_length(&g, &hops) + 1e-9);
    }

    #[test]
    fn solution_is_valid_and_bounded(n in 2usize..8, seed in any::<u64>()) {
        let g = graph(n, seed);
        let config = SaConfig::default()
            .with_initial_temperature(20.0)
            .with_final_temperature(1.0)
            .with_cooling_alpha(0.8)
            .with_inner_loop_count(3)
            .with_seed(seed);
        let result = find_solution(&g, VertexId(0), &config).unwrap();
        prop_assert!(result.best.validate(&g).is_ok());
        prop_assert!(result.best_cost >= g.total_length() - 1e-9);
        prop_assert_eq!(result.outer_iterations, config.outer_iterations());
    }
}
