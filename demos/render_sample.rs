//! Example demonstrating both render modes on a synthetic sequence.
//!
//! Builds a two-person Human3.6M pose sequence in memory, then saves a
//! whole-frame figure and a single-person figure.

use ndarray::{Array1, Array2};
use pose_viz::{
    FrameRecord, PersonPose, PoseSequence, RenderConfig, Result, SkeletonMeta, render_frame,
    render_person,
};

/// A rough standing pose, offset along x so two persons don't overlap.
fn standing_person(offset_x: f32) -> PersonPose {
    let joints: [[f32; 3]; 17] = [
        [0.0, 0.0, 0.9],    // pelvis
        [-0.1, 0.0, 0.9],   // right hip
        [-0.1, 0.0, 0.5],   // right knee
        [-0.1, 0.0, 0.1],   // right ankle
        [0.1, 0.0, 0.9],    // left hip
        [0.1, 0.0, 0.5],    // left knee
        [0.1, 0.0, 0.1],    // left ankle
        [0.0, 0.0, 1.1],    // spine
        [0.0, 0.0, 1.3],    // thorax
        [0.0, 0.0, 1.45],   // neck base
        [0.0, 0.0, 1.6],    // head
        [0.17, 0.0, 1.3],   // left shoulder
        [0.22, 0.0, 1.05],  // left elbow
        [0.25, 0.0, 0.85],  // left wrist
        [-0.17, 0.0, 1.3],  // right shoulder
        [-0.22, 0.0, 1.05], // right elbow
        [-0.25, 0.0, 0.85], // right wrist
    ];

    let flat: Vec<f32> = joints
        .iter()
        .flat_map(|&[x, y, z]| [x + offset_x, y, z])
        .collect();
    PersonPose {
        keypoints: Array2::from_shape_vec((17, 3), flat).unwrap(),
        scores: Array1::from_elem(17, 0.95),
    }
}

fn main() -> Result<()> {
    let sequence = PoseSequence {
        meta: SkeletonMeta::h36m(),
        frames: vec![FrameRecord {
            instances: vec![standing_person(-0.35), standing_person(0.35)],
        }],
    };

    let figure = render_frame(&sequence, 0, &RenderConfig::full_frame())?;
    figure.save("sample_frame.png", 960)?;
    println!("Saved sample_frame.png ({})", figure.title);

    let figure = render_person(&sequence, 0, 1, &RenderConfig::single_person())?;
    figure.save("sample_person.png", 960)?;
    println!("Saved sample_person.png ({})", figure.title);

    Ok(())
}
