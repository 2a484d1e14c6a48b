//! Walk three steps forward, alternating the support foot.
//!
//! Run with `RUST_LOG=igm=debug` to follow the solver.

use std::{path::Path, sync::Arc};

use igm::prelude::*;
use kinematics::{Posture, SupportFoot};
use miette::Result;
use nalgebra::Vector3;
use nidhogg::JointArray;
use tracing::info;

const STEP_LENGTH: f64 = 0.04;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    miette::set_panic_hook();

    let config_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("config");
    let config = IgmConfig::load_validated(&config_dir, &config_dir.join("overlay/nao"))?;

    let state = ModelState::init(
        SupportFoot::Right,
        Posture::identity(),
        &JointArray::standard_stance(),
        Arc::new(config.bounds()),
        &NaoKinematics,
    );
    let mut controller = SupportFootController::new(state, config.solver(), NaoKinematics);

    for step in 1..=3 {
        let state = controller.state();
        let landing = state.swing_foot().position() + Vector3::new(STEP_LENGTH, 0.0, 0.0);
        let targets = Targets::from_state(state)
            .with_swing_foot_yaw(landing, 0.0)
            .with_com_offset(STEP_LENGTH / 2.0, 0.0, 0.0);

        let iterations = controller.solve_step(&targets)?;

        let measured = *controller.state().joints();
        let feedback = controller.finish_step(&measured);
        info!(
            step,
            iterations,
            support = %feedback.support,
            anchor_x = controller.state().anchor().position().x,
            "step finished"
        );
    }

    Ok(())
}
