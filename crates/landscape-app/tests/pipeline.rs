use glam::DVec3;
use landscape_app::{GenerationError, LandscapeParams, Stage, generate};
use landscape_mesh::GridMesh;
use landscape_scene::{
    BackendError, Primitive, PrimitiveKind, RecordingBackend, SceneObjectKind, Transform,
};
use landscape_terrain::{
    Biome, BiomeDef, BiomeTable, ConfigurationError, PropPass, PropScatterer, RegionLabel,
    RngStream, ScatterParams, TerrainError, classify_faces, eligible_vertices, stream_rng,
};

fn small(subdivisions: u32) -> LandscapeParams {
    LandscapeParams {
        subdivisions,
        ..Default::default()
    }
}

fn run(params: &LandscapeParams, seed: u64) -> (RecordingBackend, landscape_app::LandscapeReport) {
    let mut backend = RecordingBackend::new();
    let report = generate(params, &BiomeTable::standard(), &mut backend, seed)
        .expect("generation should succeed");
    (backend, report)
}

fn run_err(params: &LandscapeParams, backend: &mut RecordingBackend) -> GenerationError {
    generate(params, &BiomeTable::standard(), backend, 11).unwrap_err()
}

#[test]
fn default_landscape_shape() {
    let (backend, report) = run(&LandscapeParams::default(), 2024);

    assert_eq!(report.vertex_count, 71 * 71);
    assert_eq!(report.face_count, 70 * 70);
    assert_eq!(report.cluster_sizes.len(), 3);
    assert!(report.cluster_sizes.iter().all(|&n| n > 0));
    assert_eq!(report.cluster_sizes.iter().sum::<usize>(), 5041);

    assert_eq!(report.trees.len(), 50);
    assert_eq!(report.rocks.len(), 20);
    assert_eq!(backend.primitive_count(PrimitiveKind::Cylinder), 50);
    assert_eq!(backend.primitive_count(PrimitiveKind::Cone), 150);
    assert_eq!(backend.primitive_count(PrimitiveKind::IcoSphere), 20);
    assert_eq!(backend.primitive_count(PrimitiveKind::Plane), 1);

    // Four biome materials, trunk, three leaf shades, rock, water.
    assert_eq!(backend.materials().len(), 10);
}

#[test]
fn same_seed_same_scene() {
    let params = small(20);
    let (a, report_a) = run(&params, 77);
    let (b, report_b) = run(&params, 77);
    assert_eq!(report_a, report_b);
    assert_eq!(a, b);
}

#[test]
fn different_seeds_differ() {
    let params = small(20);
    let (a, _) = run(&params, 1);
    let (b, _) = run(&params, 2);
    assert_ne!(a, b);
}

#[test]
fn backend_mesh_matches_heights_and_labels() {
    let (backend, report) = run(&small(16), 5);
    let mesh = backend.mesh(report.terrain).unwrap();

    assert_eq!(mesh.vertices.len(), report.vertex_labels.len());
    let (lo, hi) = report.elevation_range;
    for (v, label) in mesh.vertices.iter().zip(&report.vertex_labels) {
        assert!(v.z >= lo && v.z <= hi);
        if *label == RegionLabel(2) {
            assert!((-0.25..=-0.15).contains(&v.z), "lake vertex at {}", v.z);
        }
    }

    for (face, label) in report.face_labels.iter().enumerate() {
        assert_eq!(
            mesh.face_materials[face],
            Some(report.biome_materials[label.index()])
        );
    }
}

#[test]
fn face_labels_are_vertex_majorities() {
    let (backend, report) = run(&small(10), 9);
    let mesh = backend.mesh(report.terrain).unwrap();
    for (face, label) in mesh.faces.iter().zip(&report.face_labels) {
        let votes = face
            .iter()
            .filter(|&&v| report.vertex_labels[v as usize] == *label)
            .count();
        assert!(votes >= 2, "face label {label} has only {votes} votes");
    }
}

#[test]
fn props_sit_on_eligible_vertices() {
    let (backend, report) = run(&small(12), 13);
    let mesh = backend.mesh(report.terrain).unwrap();
    let table = BiomeTable::standard();

    let near = |p: DVec3, jitter: f64, accept: fn(Biome) -> bool| {
        mesh.vertices
            .iter()
            .zip(&report.vertex_labels)
            .filter(|(_, label)| table.get(**label).is_some_and(|d| accept(d.biome)))
            .any(|(v, _)| {
                (v.x - p.x).abs() <= jitter + 1e-9
                    && (v.y - p.y).abs() <= jitter + 1e-9
                    && v.z == p.z
            })
    };

    for tree in &report.trees {
        let trunk = backend.object(tree.trunk).unwrap();
        assert!(near(trunk.transform.translation, 0.1, Biome::hosts_trees));
    }
    for rock in &report.rocks {
        let rock = backend.object(*rock).unwrap();
        assert!(near(rock.transform.translation, 0.3, Biome::hosts_rocks));
    }
}

#[test]
fn water_plane_tracks_lake_elevation() {
    let (backend, report) = run(&small(14), 21);
    let mesh = backend.mesh(report.terrain).unwrap();

    let lake: Vec<f64> = mesh
        .vertices
        .iter()
        .zip(&report.vertex_labels)
        .filter(|(_, l)| **l == RegionLabel(2))
        .map(|(v, _)| v.z)
        .collect();
    let expected = lake.iter().sum::<f64>() / lake.len() as f64 + 0.05;
    assert!((report.dressing.water_level - expected).abs() < 1e-12);

    let water = backend.object(report.dressing.water).unwrap();
    assert_eq!(
        water.kind,
        SceneObjectKind::Primitive(Primitive::Plane { size: 27.0 })
    );
    assert_eq!(water.transform.translation.z, report.dressing.water_level);
}

#[test]
fn camera_and_sun_placement() {
    let (backend, report) = run(&small(4), 3);
    let camera = backend.object(report.dressing.camera).unwrap();
    assert_eq!(
        camera.transform,
        Transform::from_translation_euler_deg(
            DVec3::new(30.0, -30.0, 24.0),
            DVec3::new(60.0, 0.0, 45.0)
        )
    );
    assert_eq!(backend.active_camera(), Some(report.dressing.camera));

    let sun = backend.object(report.dressing.sun).unwrap();
    let SceneObjectKind::Light(light) = sun.kind else {
        panic!("sun is not a light");
    };
    assert_eq!(light.energy, 4.0);
    assert_eq!(sun.transform.translation, DVec3::new(30.0, -30.0, 30.0));
}

#[test]
fn forest_reachable_with_four_clusters() {
    let mut params = small(20);
    params.clustering.k = 4;
    let (_, report) = run(&params, 8);
    assert_eq!(report.cluster_sizes.len(), 4);
    assert!(report.vertex_labels.contains(&RegionLabel(3)));
}

#[test]
fn single_region_has_no_rock_sites() {
    // 3x3 vertices, all grassland.
    let mut params = LandscapeParams {
        size: 2.0,
        subdivisions: 2,
        ..Default::default()
    };
    params.clustering.k = 1;

    let mut backend = RecordingBackend::new();
    let err = run_err(&params, &mut backend);
    assert_eq!(err.stage, Stage::Rocks);
    assert_eq!(
        err.source,
        TerrainError::EmptySelection {
            pass: PropPass::Rocks
        }
    );
    assert_eq!(backend, RecordingBackend::new(), "nothing may be written");
}

#[test]
fn single_region_grid_uses_every_vertex_and_slot_zero() {
    // 3x3 vertices with every label forced to grassland.
    let grid = GridMesh::new(2.0, 2).unwrap();
    let labels = vec![RegionLabel(0); 9];
    let table = BiomeTable::standard();

    assert_eq!(
        eligible_vertices(&labels, &table, Biome::hosts_trees),
        (0..9).collect::<Vec<_>>()
    );
    assert!(eligible_vertices(&labels, &table, Biome::hosts_rocks).is_empty());

    let faces = classify_faces(&grid.faces, &labels).unwrap();
    assert_eq!(faces, vec![RegionLabel(0); 4]);

    let params = ScatterParams {
        tree_count: 500,
        ..Default::default()
    };
    let scatterer = PropScatterer::new(&table, params);
    let sites = scatterer
        .plan_trees(&grid.vertices, &labels, &mut stream_rng(5, RngStream::Trees))
        .unwrap();
    let mut hit = [false; 9];
    for site in sites {
        let source = grid
            .vertices
            .iter()
            .position(|v| (v.x - site.x).abs() <= 0.1 + 1e-9 && (v.y - site.y).abs() <= 0.1 + 1e-9)
            .expect("tree site away from every vertex");
        hit[source] = true;
    }
    assert!(hit.iter().all(|&h| h), "sources drawn: {hit:?}");
}

#[test]
fn too_many_clusters_for_table() {
    let mut params = small(6);
    params.clustering.k = 5;
    let mut backend = RecordingBackend::new();
    let err = run_err(&params, &mut backend);
    assert_eq!(err.stage, Stage::Classify);
    assert_eq!(
        err.source,
        TerrainError::Configuration(ConfigurationError::ClustersExceedBiomes { k: 5, biomes: 4 })
    );
    assert!(backend.meshes().is_empty());
}

#[test]
fn too_few_distinct_points() {
    let mut table = BiomeTable::standard();
    table
        .register(BiomeDef {
            name: "meadow".into(),
            ..BiomeDef::grassland()
        })
        .unwrap();

    let mut params = small(1);
    params.clustering.k = 5;
    let mut backend = RecordingBackend::new();
    let err = generate(&params, &table, &mut backend, 4).unwrap_err();
    assert_eq!(err.stage, Stage::Classify);
    assert_eq!(
        err.source,
        TerrainError::Configuration(ConfigurationError::TooFewDistinctPoints {
            k: 5,
            distinct: 4
        })
    );
    assert_eq!(backend, RecordingBackend::new());
}

#[test]
fn zero_subdivisions_fails_in_grid() {
    let mut backend = RecordingBackend::new();
    let err = run_err(&small(0), &mut backend);
    assert_eq!(err.stage, Stage::Grid);
    assert!(err.is_configuration());
    assert!(backend.meshes().is_empty());
}

#[test]
fn zero_tree_count_is_configuration_error() {
    let mut params = small(6);
    params.scatter.tree_count = 0;
    let mut backend = RecordingBackend::new();
    let err = run_err(&params, &mut backend);
    assert_eq!(err.stage, Stage::Trees);
    assert!(err.is_configuration());
    assert_eq!(backend, RecordingBackend::new());
}

#[test]
fn zero_rock_count_leaves_backend_empty() {
    let mut params = small(5);
    params.scatter.rock_count = 0;
    let mut backend = RecordingBackend::new();
    let err = run_err(&params, &mut backend);
    assert_eq!(err.stage, Stage::Rocks);
    assert_eq!(
        err.source,
        TerrainError::Configuration(ConfigurationError::ZeroCount("rock_count"))
    );
    assert_eq!(backend, RecordingBackend::new());
}

#[test]
fn backend_refusal_names_the_stage() {
    let cases = [
        (PrimitiveKind::Cylinder, Stage::Trees),
        (PrimitiveKind::Cone, Stage::Trees),
        (PrimitiveKind::IcoSphere, Stage::Rocks),
        (PrimitiveKind::Plane, Stage::Dressing),
    ];
    for (kind, stage) in cases {
        let mut backend = RecordingBackend::new().refuse(kind);
        let err = run_err(&small(8), &mut backend);
        assert_eq!(err.stage, stage, "refusing {kind:?}");
        assert!(matches!(
            err.source,
            TerrainError::Backend(BackendError::Rejected { .. })
        ));
        assert!(err.to_string().starts_with(&format!("{stage} stage failed")));
    }
}
