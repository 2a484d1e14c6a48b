use std::sync::Arc;

use igm::{
    constraints::{ConstraintSet, ConstraintSystem, JointSelection},
    prelude::*,
};
use kinematics::{Posture, SupportFoot};
use nalgebra::{Point3, Rotation3, Vector3};
use nidhogg::{JointArray, JointBounds, JointId};

fn controller(support: SupportFoot, solver: IgmSolver) -> SupportFootController {
    let state = ModelState::init(
        support,
        Posture::identity(),
        &JointArray::standard_stance(),
        Arc::new(JointBounds::nao()),
        &NaoKinematics,
    );
    SupportFootController::new(state, solver, NaoKinematics)
}

#[test]
fn accepted_solution_is_committed() {
    let mut controller = controller(SupportFoot::Right, IgmSolver::default());
    let targets = Targets::from_state(controller.state())
        .with_swing_offset(-0.02, 0.01, 0.02, 0.1, 0.1, 0.1)
        .with_com_offset(0.03, 0.02, -0.01);

    let iterations = controller.solve_step(&targets).unwrap();

    assert!(iterations <= 20);
    assert_eq!(controller.targets(), &targets);
    assert_ne!(controller.state().joints(), &JointArray::standard_stance());
}

#[test]
fn failed_solve_is_rolled_back() {
    let settings = SolverSettings {
        max_iterations: 1,
        ..SolverSettings::default()
    };
    let mut controller = controller(SupportFoot::Left, IgmSolver::new(settings));
    let initial_targets = controller.targets().clone();
    let targets = Targets::from_state(controller.state()).with_com_offset(0.0, 0.03, 0.0);

    let error = controller.solve_step(&targets).unwrap_err();

    assert_eq!(error, SolveError::DidNotConverge { iterations: 1 });
    assert_eq!(controller.state().joints(), &JointArray::standard_stance());
    assert_eq!(controller.targets(), &initial_targets);
    assert_eq!(
        controller.solver().status(),
        SolverStatus::Failed(SolveError::DidNotConverge { iterations: 1 })
    );
}

#[test]
fn finishing_a_step_switches_support() {
    let mut controller = controller(SupportFoot::Right, IgmSolver::default());
    let landing = controller.state().swing_foot().position() + Vector3::new(0.05, 0.0, 0.0);
    let targets = Targets::from_state(controller.state()).with_swing_foot_yaw(landing, 0.0);
    controller.solve_step(&targets).unwrap();

    // the swing foot lands further ahead than planned
    let mut measured = *controller.state().joints();
    measured[JointId::LeftHipPitch] += 0.03;
    let feedback = controller.finish_step(&measured);

    assert_eq!(feedback.support, SupportFoot::Left);
    assert_eq!(feedback.landing_error.z, 0.0);
    assert!(feedback.landing_error.x.abs() > 1e-3);
    assert_eq!(controller.state().support(), SupportFoot::Left);
    assert_eq!(controller.state().joints(), &measured);
    assert_eq!(controller.targets(), &Targets::from_state(controller.state()));
}

/// Provider that places the swing foot slightly above the ground, and moves it with the knee.
struct Hovering;

impl KinematicsProvider for Hovering {
    fn swing_foot_posture(
        &self,
        joints: &JointArray<f64>,
        _: SupportFoot,
        anchor: &Posture,
    ) -> Posture {
        anchor.offset(0.1 * joints[JointId::LeftKneePitch], 0.1, 0.0026, 0.0, 0.0, 0.05)
    }

    fn center_of_mass(&self, _: &JointArray<f64>, _: SupportFoot, anchor: &Posture) -> Point3<f64> {
        Point3::from(anchor.position() + Vector3::new(0.0, 0.05, 0.26))
    }

    fn torso_orientation(
        &self,
        _: &JointArray<f64>,
        _: SupportFoot,
        anchor: &Posture,
    ) -> Rotation3<f64> {
        anchor.orientation()
    }

    fn constraint_system(
        &self,
        _: &JointArray<f64>,
        _: SupportFoot,
        _: &Posture,
        _: &Targets,
        _: ConstraintSet,
        _: JointSelection,
        system: &mut ConstraintSystem,
    ) {
        *system = ConstraintSystem::zeros();
    }
}

#[test]
fn new_anchor_is_on_the_ground() {
    let mut state = ModelState::init(
        SupportFoot::Right,
        Posture::identity(),
        &JointArray::standard_stance(),
        Arc::new(JointBounds::nao()),
        &Hovering,
    );
    assert!((state.swing_foot().position().z - 0.0026).abs() < 1e-12);

    let mut measured = JointArray::standard_stance();
    measured[JointId::LeftKneePitch] += 0.1;
    let error = state.switch_support_foot(&measured, &Hovering);

    assert_eq!(state.anchor().position().z, 0.0);
    assert_eq!(error.z, 0.0);
    assert!((error.x + 0.01).abs() < 1e-12);
    assert!((state.anchor().position().y - 0.1).abs() < 1e-12);
    assert_eq!(state.support(), SupportFoot::Left);

    // the orientation of the landed foot is kept
    let (_, _, yaw) = kinematics::rotation::rotation_to_rpy(&state.anchor().orientation());
    assert!((yaw - 0.05).abs() < 1e-12);
}

#[test]
fn feet_positions_after_switch() {
    let mut state = ModelState::init(
        SupportFoot::Right,
        Posture::identity(),
        &JointArray::standard_stance(),
        Arc::new(JointBounds::nao()),
        &Hovering,
    );
    let measured = JointArray::standard_stance();
    state.switch_support_foot(&measured, &Hovering);

    let feet = state.feet_positions(&measured, &Hovering);
    assert_eq!(feet.left_expected, feet.left_measured);
    assert_eq!(feet.left_expected.z, 0.0);
    assert!((feet.right_expected.z - 0.0026).abs() < 1e-12);
}
