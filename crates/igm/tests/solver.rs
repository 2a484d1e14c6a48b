use std::sync::Arc;

use igm::{
    constraints::{ConstraintSet, ConstraintSystem, JointSelection},
    prelude::*,
};
use kinematics::{Posture, SupportFoot};
use nidhogg::{JointArray, JointBounds, JointId};

const TOLERANCE: f64 = 5e-4;

fn standing_on(support: SupportFoot) -> ModelState {
    ModelState::init(
        support,
        Posture::identity(),
        &JointArray::standard_stance(),
        Arc::new(JointBounds::nao()),
        &NaoKinematics,
    )
}

fn step_targets(state: &ModelState) -> Targets {
    Targets::from_state(state)
        .with_swing_offset(-0.02, 0.01, 0.02, 0.1, 0.1, 0.1)
        .with_com_offset(0.03, 0.02, -0.01)
}

/// Largest remaining constraint error of `state`.
fn residual(state: &ModelState, targets: &Targets, constraints: ConstraintSet) -> f64 {
    let mut system = ConstraintSystem::zeros();
    NaoKinematics.constraint_system(
        state.joints(),
        state.support(),
        state.anchor(),
        targets,
        constraints,
        JointSelection::WholeBody,
        &mut system,
    );
    system.residual.amax()
}

fn assert_hips_coupled(state: &ModelState) {
    let joints = state.joints();
    assert!(
        (joints[JointId::LeftHipYawPitch] - joints[JointId::RightHipYawPitch]).abs() < TOLERANCE
    );
}

#[test]
fn step_on_right_foot() {
    let mut state = standing_on(SupportFoot::Right);
    let targets = step_targets(&state);
    let mut solver = IgmSolver::default();

    let iterations = solver
        .solve(&mut state, &targets, &NaoKinematics)
        .expect("feasible targets should converge");

    assert!((1..=20).contains(&iterations));
    assert_eq!(solver.status(), SolverStatus::Converged { iterations });
    assert!(residual(&state, &targets, ConstraintSet::FULL) < TOLERANCE);
    assert!((state.swing_foot().position() - targets.swing_foot.position()).norm() < TOLERANCE);
    assert!((state.center_of_mass() - targets.center_of_mass).norm() < TOLERANCE);
    assert_hips_coupled(&state);
}

#[test]
fn step_on_left_foot() {
    let mut state = standing_on(SupportFoot::Left);
    let targets = Targets::from_state(&state)
        .with_swing_offset(0.03, -0.01, 0.02, -0.1, 0.1, -0.1)
        .with_com_offset(0.02, -0.02, -0.01);

    let iterations = IgmSolver::default()
        .solve(&mut state, &targets, &NaoKinematics)
        .unwrap();

    assert!(iterations <= 20);
    assert!(residual(&state, &targets, ConstraintSet::FULL) < TOLERANCE);
    assert_hips_coupled(&state);
}

#[test]
fn satisfied_targets_take_a_single_iteration() {
    let mut state = standing_on(SupportFoot::Right);
    let before = *state.joints();
    let targets = Targets::from_state(&state);

    let iterations = IgmSolver::default()
        .solve(&mut state, &targets, &NaoKinematics)
        .unwrap();

    assert_eq!(iterations, 1);
    for (joint, angle) in state.joints().iter() {
        assert!((angle - before[joint]).abs() < TOLERANCE);
    }
}

#[test]
fn solving_twice_is_idempotent() {
    let mut state = standing_on(SupportFoot::Right);
    let targets = step_targets(&state);
    let mut solver = IgmSolver::default();

    solver.solve(&mut state, &targets, &NaoKinematics).unwrap();
    let solution = *state.joints();

    assert_eq!(
        solver.solve(&mut state, &targets, &NaoKinematics).unwrap(),
        1
    );
    for (joint, angle) in state.joints().iter() {
        assert!((angle - solution[joint]).abs() < TOLERANCE);
    }
}

#[test]
fn only_lower_body_is_moved() {
    let mut state = standing_on(SupportFoot::Right);
    let targets = step_targets(&state);

    IgmSolver::default()
        .solve(&mut state, &targets, &NaoKinematics)
        .unwrap();

    let stance = JointArray::standard_stance();
    for (joint, angle) in state.joints().iter() {
        if !joint.is_lower_body() {
            assert_eq!(*angle, stance[joint], "{joint} was moved");
        }
    }
}

#[test]
fn torso_is_free_without_torso_constraint() {
    let mut state = standing_on(SupportFoot::Right);
    let targets = step_targets(&state).with_torso_offset(0.3, 0.3, 0.0);
    let mut solver = IgmSolver::default().with_constraints(ConstraintSet::FOOT_AND_COM);

    let iterations = solver.solve(&mut state, &targets, &NaoKinematics).unwrap();

    assert!(iterations <= 20);
    assert!(residual(&state, &targets, ConstraintSet::FOOT_AND_COM) < TOLERANCE);
    assert_hips_coupled(&state);
}

#[test]
fn infinity_norm() {
    let mut state = standing_on(SupportFoot::Right);
    let targets = step_targets(&state);
    let settings = SolverSettings {
        norm: StepNorm::Infinity,
        ..SolverSettings::default()
    };

    let iterations = IgmSolver::new(settings)
        .solve(&mut state, &targets, &NaoKinematics)
        .unwrap();

    assert!(iterations <= 20);
    assert!(residual(&state, &targets, ConstraintSet::FULL) < TOLERANCE);
}

#[test]
fn whole_body_with_penalty() {
    let mut state = standing_on(SupportFoot::Right);
    let reference = *state.joints();
    let targets = step_targets(&state).with_penalty(IgmConfig::default().penalty(reference));
    let mut solver = IgmSolver::default().with_selection(JointSelection::WholeBody);

    let iterations = solver.solve(&mut state, &targets, &NaoKinematics).unwrap();

    assert!(iterations <= 100);
    assert!(residual(&state, &targets, ConstraintSet::FULL) < 1e-3);
    assert_hips_coupled(&state);

    let arms_moved = JointId::LEFT_ARM
        .into_iter()
        .chain(JointId::RIGHT_ARM)
        .any(|joint| (state.joints()[joint] - reference[joint]).abs() > 1e-6);
    assert!(arms_moved);
}

#[test]
fn lower_body_with_penalty_keeps_arms() {
    let mut state = standing_on(SupportFoot::Left);
    let reference = *state.joints();
    let targets = Targets::from_state(&state)
        .with_com_offset(0.01, -0.01, 0.0)
        .with_penalty(Penalty::new(reference, 0.1));

    let iterations = IgmSolver::default()
        .solve(&mut state, &targets, &NaoKinematics)
        .unwrap();

    assert!(iterations <= 100);
    for joint in JointId::LEFT_ARM.into_iter().chain(JointId::RIGHT_ARM) {
        assert_eq!(state.joints()[joint], reference[joint]);
    }
}

#[test]
fn step_sequence() {
    let mut state = standing_on(SupportFoot::Right);
    let mut solver = IgmSolver::default();

    for _ in 0..3 {
        let targets = Targets::from_state(&state)
            .with_swing_foot_yaw(
                state.swing_foot().position() + nalgebra::Vector3::new(0.04, 0.0, 0.0),
                0.0,
            )
            .with_com_offset(0.02, 0.0, 0.0);
        solver.solve(&mut state, &targets, &NaoKinematics).unwrap();
        assert_eq!(state.check_joint_bounds(), None);

        let measured = *state.joints();
        let error = state.switch_support_foot(&measured, &NaoKinematics);
        assert!(error.norm() < 1e-9);
        assert_eq!(state.anchor().position().z, 0.0);
    }

    assert_eq!(state.support(), SupportFoot::Left);
    assert!(state.anchor().position().x > 0.07);
}
