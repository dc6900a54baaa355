use approx::assert_relative_eq;
use kornia_eigen::umeyama::{umeyama, umeyama3, UmeyamaError, UmeyamaParams};
use kornia_eigen::{Affine3, Vec3};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_points(rng: &mut StdRng, n: usize) -> Vec<Vec3<f64>> {
    (0..n)
        .map(|_| {
            Vec3::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            )
        })
        .collect()
}

fn random_pose(rng: &mut StdRng) -> Affine3<f64> {
    Affine3::from_translation_euler(
        rng.random_range(-5.0..5.0),
        rng.random_range(-5.0..5.0),
        rng.random_range(-5.0..5.0),
        rng.random_range(-3.0..3.0),
        rng.random_range(-1.5..1.5),
        rng.random_range(-3.0..3.0),
    )
}

#[test]
fn umeyama_recovers_random_similarity() -> Result<(), UmeyamaError> {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let src = random_points(&mut rng, 20);
        let pose = random_pose(&mut rng);
        let scale = rng.random_range(0.2..5.0);
        let dst = src
            .iter()
            .map(|&p| pose.linear * p * scale + pose.translation)
            .collect::<Vec<_>>();

        let est = umeyama3(&src, &dst, true)?;
        assert_relative_eq!(est.linear, pose.linear * scale, epsilon = 1e-8);
        assert_relative_eq!(est.translation, pose.translation, epsilon = 1e-8);

        let rigid = umeyama3(&src, &dst, false)?;
        assert!(rigid.rotation_is_orthonormal(1e-9));
        assert_relative_eq!(rigid.linear, pose.linear, epsilon = 1e-8);
    }
    Ok(())
}

#[test]
fn umeyama_noisy_correspondences() -> Result<(), UmeyamaError> {
    let mut rng = StdRng::seed_from_u64(1);
    let src = random_points(&mut rng, 200);
    let pose = random_pose(&mut rng);
    let dst = src
        .iter()
        .map(|&p| {
            let noise = Vec3::new(
                rng.random_range(-1e-3..1e-3),
                rng.random_range(-1e-3..1e-3),
                rng.random_range(-1e-3..1e-3),
            );
            pose.transform_point(p) + noise
        })
        .collect::<Vec<_>>();

    let est = umeyama3(&src, &dst, false)?;
    assert!(est.rotation_is_orthonormal(1e-9));
    assert_relative_eq!(est.linear, pose.linear, epsilon = 1e-2);
    assert_relative_eq!(est.translation, pose.translation, epsilon = 1e-2);
    Ok(())
}

#[test]
fn umeyama_exact_minimum_correspondences() -> Result<(), UmeyamaError> {
    // three non collinear points are enough in 3D
    let src = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    let pose = Affine3::from_translation_euler(0.1, 0.2, 0.3, 0.4, -0.5, 0.6);
    let dst = src.map(|p| pose.transform_point(p));

    let est = umeyama3(&src, &dst, false)?;
    assert_relative_eq!(est.linear, pose.linear, epsilon = 1e-9);
    assert_relative_eq!(est.translation, pose.translation, epsilon = 1e-9);
    Ok(())
}

#[test]
fn umeyama_rank_tolerance_is_configurable() {
    // a very flat triangle: valid with the default tolerance, rejected with a loose one
    let src = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, 1e-3, 0.0]];
    assert!(umeyama(&src, &src, &UmeyamaParams::default()).is_ok());

    let loose = UmeyamaParams {
        rank_tolerance: 1e-4,
        ..Default::default()
    };
    assert!(matches!(
        umeyama(&src, &src, &loose),
        Err(UmeyamaError::DegenerateCorrespondences {
            rank: 1,
            required: 2
        })
    ));
}
