use spiral_galaxy::galaxy::{
    Color, CurrentGalaxy, GalaxyGenerator, GalaxyHandle, GalaxyId, GalaxyParameters,
    ParameterEditor, ParameterField, PointCloud, Scene,
};

#[derive(Default)]
struct CountingScene {
    live: Vec<GalaxyId>,
    attaches: usize,
    releases: usize,
}

impl Scene for CountingScene {
    fn attach(&mut self, handle: &GalaxyHandle) {
        self.attaches += 1;
        self.live.push(handle.id());
    }

    fn detach(&mut self, handle: &GalaxyHandle) {
        self.live.retain(|id| *id != handle.id());
    }

    fn release(&mut self, _handle: GalaxyHandle) {
        self.releases += 1;
    }
}

fn scenario() -> GalaxyParameters {
    GalaxyParameters {
        count: 100,
        radius: 5.0,
        branch_count: 3,
        spin: 1.0,
        randomness: 0.0,
        randomness_power: 3.0,
        inward_color: Color::new(1.0, 0.0, 0.0),
        outward_color: Color::new(0.0, 0.0, 1.0),
        ..Default::default()
    }
}

struct Summary {
    count: usize,
    max_planar_radius: f32,
    min_color: [f32; 3],
    max_color: [f32; 3],
    mean_planar_radius: f32,
}

fn summarize(cloud: &PointCloud) -> Summary {
    let buffers = &cloud.buffers;
    let mut min_color = [f32::MAX; 3];
    let mut max_color = [f32::MIN; 3];
    for color in &buffers.colors {
        for c in 0..3 {
            min_color[c] = min_color[c].min(color[c]);
            max_color[c] = max_color[c].max(color[c]);
        }
    }
    let radii: Vec<f32> = buffers.positions.iter().map(|p| p[0].hypot(p[2])).collect();
    Summary {
        count: buffers.len(),
        max_planar_radius: radii.iter().copied().fold(0.0, f32::max),
        min_color,
        max_color,
        mean_planar_radius: radii.iter().sum::<f32>() / radii.len() as f32,
    }
}

#[test]
fn flat_scenario_lies_on_the_ideal_spiral() {
    let params = scenario();
    let mut generator = GalaxyGenerator::with_seed(2024);
    let mut current = CurrentGalaxy::new();
    let mut scene = CountingScene::default();

    let handle = generator.generate(&params, &mut current, &mut scene).unwrap();
    let buffers = &handle.cloud().buffers;
    assert_eq!(buffers.positions.len(), 100);
    assert_eq!(buffers.colors.len(), 100);

    let mut samples: Vec<(f32, [f32; 3])> = Vec::new();
    for (i, (position, color)) in buffers.positions.iter().zip(&buffers.colors).enumerate() {
        let [x, y, z] = *position;
        assert_eq!(y, 0.0);

        let r = (x * x + z * z).sqrt();
        assert!(r <= params.radius + 1e-4);

        // With no jitter the angle is fully determined by the arm and the radius
        let arms = params.branch_count;
        let branch = (i as u32 % arms) as f32 / arms as f32 * std::f32::consts::TAU;
        let theta = branch + params.spin * r;
        assert!((x - theta.cos() * r).abs() < 1e-3);
        assert!((z - theta.sin() * r).abs() < 1e-3);

        // Color channels encode t = r / radius
        let t = r / params.radius;
        assert!((color[0] - (1.0 - t)).abs() < 1e-4);
        assert!((color[2] - t).abs() < 1e-4);
        samples.push((r, *color));
    }

    samples.sort_by(|a, b| a.0.total_cmp(&b.0));
    for pair in samples.windows(2) {
        if pair[1].0 - pair[0].0 > 1e-3 {
            assert!(pair[1].1[0] < pair[0].1[0]);
            assert!(pair[1].1[2] > pair[0].1[2]);
        }
    }
}

#[test]
fn colors_stay_normalised_for_default_parameters() {
    let params = GalaxyParameters::default();
    let cloud = GalaxyGenerator::with_seed(8).build(&params).unwrap();
    assert_eq!(cloud.len(), params.count as usize);
    for color in &cloud.buffers.colors {
        assert!(color.iter().all(|c| (0.0..=1.0).contains(c)), "{color:?}");
    }
}

#[test]
fn repeated_generation_releases_every_previous_galaxy() {
    let mut generator = GalaxyGenerator::new();
    let mut current = CurrentGalaxy::new();
    let mut scene = CountingScene::default();
    let params = GalaxyParameters {
        count: 1000,
        ..Default::default()
    };

    for _ in 0..5 {
        generator.generate(&params, &mut current, &mut scene).unwrap();
    }

    assert_eq!(scene.attaches, 5);
    assert_eq!(scene.releases, 4);
    assert_eq!(scene.live.len(), 1);
    assert_eq!(current.get().map(GalaxyHandle::id), scene.live.first().copied());
}

#[test]
fn regenerating_identical_parameters_keeps_the_shape() {
    let params = GalaxyParameters {
        count: 20_000,
        ..Default::default()
    };
    let a = summarize(&GalaxyGenerator::new().build(&params).unwrap());
    let b = summarize(&GalaxyGenerator::new().build(&params).unwrap());

    assert_eq!(a.count, b.count);
    let jitter_bound = params.randomness * 2f32.sqrt();
    assert!(a.max_planar_radius <= params.radius + jitter_bound);
    assert!(b.max_planar_radius <= params.radius + jitter_bound);
    // Uniform radius in [0, R): mean planar distance is close to R / 2
    assert!((a.mean_planar_radius - b.mean_planar_radius).abs() < 0.1);
    for c in 0..3 {
        assert!((a.min_color[c] - b.min_color[c]).abs() < 0.01);
        assert!((a.max_color[c] - b.max_color[c]).abs() < 0.01);
    }
}

#[test]
fn unseeded_passes_differ() {
    let params = GalaxyParameters {
        count: 1000,
        ..Default::default()
    };
    let mut generator = GalaxyGenerator::new();
    let first = generator.build(&params).unwrap();
    let second = generator.build(&params).unwrap();
    assert_ne!(first.buffers.positions, second.buffers.positions);
}

#[test]
fn editor_commits_drive_regeneration() {
    let mut editor = ParameterEditor::default();
    let mut generator = GalaxyGenerator::with_seed(4);
    let mut current = CurrentGalaxy::new();
    let mut scene = CountingScene::default();

    editor.select(ParameterField::Count);
    // An edit session of many intermediate values...
    for _ in 0..50 {
        editor.nudge(-10);
    }
    // ...settles into a single regeneration
    let mut regenerations = 0;
    while let Some(params) = editor.commit() {
        generator.generate(&params, &mut current, &mut scene).unwrap();
        regenerations += 1;
    }

    assert_eq!(regenerations, 1);
    assert_eq!(current.get().map(GalaxyHandle::len), Some(50_000));
}
