use wayfinder_lib::romania::{ARAD, BUCHAREST, FAGARAS, PITESTI, RIMNICU_VILCEA, SIBIU};
use wayfinder_lib::{
    partial_romania_map, plan_route, Error, RouteAlgorithm, RouteConstraints, RouteRequest,
};

#[test]
fn a_star_finds_shortest_route() {
    let map = partial_romania_map();
    let plan = plan_route(&map, &RouteRequest::a_star(ARAD, BUCHAREST)).expect("route exists");

    assert_eq!(plan.algorithm, RouteAlgorithm::AStar);
    assert_eq!(
        plan.steps,
        vec![ARAD, SIBIU, RIMNICU_VILCEA, PITESTI, BUCHAREST]
    );
    assert_eq!(plan.distance, 418);
    assert_eq!(plan.hop_count(), 4);
}

#[test]
fn uniform_cost_agrees_with_a_star() {
    let map = partial_romania_map();
    let request = RouteRequest::new(ARAD, BUCHAREST, RouteAlgorithm::UniformCost);
    let plan = plan_route(&map, &request).expect("route exists");

    assert_eq!(plan.distance, 418);
}

#[test]
fn greedy_follows_the_heuristic() {
    let map = partial_romania_map();
    let request = RouteRequest::new(ARAD, BUCHAREST, RouteAlgorithm::Greedy);
    let plan = plan_route(&map, &request).expect("route exists");

    assert_eq!(plan.steps, vec![ARAD, SIBIU, FAGARAS, BUCHAREST]);
    assert_eq!(plan.distance, 450);
}

#[test]
fn bfs_minimises_hops() {
    let map = partial_romania_map();
    let request = RouteRequest::new(ARAD, BUCHAREST, RouteAlgorithm::Bfs);
    let plan = plan_route(&map, &request).expect("route exists");

    assert_eq!(plan.hop_count(), 3);
    assert_eq!(plan.steps, vec![ARAD, SIBIU, FAGARAS, BUCHAREST]);
}

#[test]
fn avoided_locations_are_skipped() {
    let map = partial_romania_map();
    let request = RouteRequest {
        start: ARAD.to_string(),
        goal: BUCHAREST.to_string(),
        algorithm: RouteAlgorithm::AStar,
        constraints: RouteConstraints {
            avoid: vec![PITESTI.to_string()],
            ..RouteConstraints::default()
        },
    };

    let plan = plan_route(&map, &request).expect("route exists");
    assert!(!plan.steps.iter().any(|step| step == PITESTI));
    assert_eq!(plan.distance, 450);
}

#[test]
fn max_link_can_make_route_impossible() {
    let map = partial_romania_map();
    let request = RouteRequest {
        start: ARAD.to_string(),
        goal: BUCHAREST.to_string(),
        algorithm: RouteAlgorithm::AStar,
        constraints: RouteConstraints {
            max_link: Some(100),
            ..RouteConstraints::default()
        },
    };

    let err = plan_route(&map, &request).expect_err("Arad is cut off");
    assert!(matches!(err, Error::RouteNotFound { .. }));
}

#[test]
fn unknown_location_reports_suggestions() {
    let map = partial_romania_map();
    let err = plan_route(&map, &RouteRequest::a_star(ARAD, "Bucharestt"))
        .expect_err("unknown goal");

    match err {
        Error::UnknownLocation { name, suggestions } => {
            assert_eq!(name, "Bucharestt");
            assert_eq!(suggestions.first().map(String::as_str), Some(BUCHAREST));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn algorithm_names_parse() {
    assert_eq!("a-star".parse::<RouteAlgorithm>(), Ok(RouteAlgorithm::AStar));
    assert_eq!("dijkstra".parse::<RouteAlgorithm>(), Ok(RouteAlgorithm::UniformCost));
    assert_eq!("BFS".parse::<RouteAlgorithm>(), Ok(RouteAlgorithm::Bfs));
    assert!("teleport".parse::<RouteAlgorithm>().is_err());
}
