//! Skeleton rendering: pose sequence + frame selection → [`Figure`].
//!
//! Two entry modes share one drawing pipeline. Both validate indices up
//! front and return with no partial figure on failure; the input sequence is
//! never mutated, so a caller may retry with corrected indices against the
//! same loaded sequence.

use crate::config::RenderConfig;
use crate::error::{PoseVizError, Result};
use crate::sequence::{PersonPose, PoseSequence};
use crate::visualizer::Figure;

/// Render every person detected in the given frame into one 3D scene.
///
/// Persons are composed in instance-array order; no inter-person occlusion
/// resolution is performed beyond element draw order.
///
/// # Errors
///
/// Returns [`PoseVizError::IndexOutOfRange`] if `frame_idx` is not a valid
/// frame number for the sequence.
pub fn render_frame(
    sequence: &PoseSequence,
    frame_idx: usize,
    config: &RenderConfig,
) -> Result<Figure> {
    let frame = sequence.frames.get(frame_idx).ok_or_else(|| {
        PoseVizError::IndexOutOfRange(format!(
            "frame {frame_idx} requested, sequence has {} frames",
            sequence.len()
        ))
    })?;

    let mut figure = Figure::new(
        format!("Frame {}", frame_idx + 1),
        config.view_bounds,
        config.aspect_ratio,
    );
    for person in &frame.instances {
        draw_person(&mut figure, sequence, person, config);
    }
    Ok(figure)
}

/// Render a single person from the given frame.
///
/// # Errors
///
/// Returns [`PoseVizError::IndexOutOfRange`] if `frame_idx` or `person_idx`
/// is out of range.
pub fn render_person(
    sequence: &PoseSequence,
    frame_idx: usize,
    person_idx: usize,
    config: &RenderConfig,
) -> Result<Figure> {
    let frame = sequence.frames.get(frame_idx).ok_or_else(|| {
        PoseVizError::IndexOutOfRange(format!(
            "frame {frame_idx} requested, sequence has {} frames",
            sequence.len()
        ))
    })?;
    let person = frame.instances.get(person_idx).ok_or_else(|| {
        PoseVizError::IndexOutOfRange(format!(
            "person {person_idx} requested, frame {frame_idx} has {} instances",
            frame.len()
        ))
    })?;

    let mut figure = Figure::new(
        format!("Frame {}, Person {}", frame_idx + 1, person_idx + 1),
        config.view_bounds,
        config.aspect_ratio,
    );
    draw_person(&mut figure, sequence, person, config);
    Ok(figure)
}

/// Shared per-person drawing pipeline.
///
/// Links are emitted before joints so joints sit visually above connecting
/// lines. A link is drawn only when both endpoint scores exceed the
/// visibility threshold; a joint only when its own score does. Everything
/// below threshold is omitted entirely.
fn draw_person(
    figure: &mut Figure,
    sequence: &PoseSequence,
    person: &PersonPose,
    config: &RenderConfig,
) {
    let t = config.visibility_threshold;
    let meta = &sequence.meta;

    for (link_idx, &(a, b)) in meta.links.iter().enumerate() {
        if person.score(a) > t && person.score(b) > t {
            figure.push_segment(
                person.point(a),
                person.point(b),
                meta.link_colors[link_idx].normalized(),
            );
        }
    }

    for i in 0..person.joint_count() {
        if person.score(i) > t {
            figure.push_marker(person.point(i), meta.joint_colors[i].normalized());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visualizer::Element;

    /// One frame, one person, 3 joints with scores [0.9, 0.1, 0.5].
    fn scenario_artifact(links: &str) -> PoseSequence {
        let json = format!(
            r#"{{
                "meta_info": {{
                    "skeleton_links": {links},
                    "keypoint_colors": {{"__ndarray__": [[255, 0, 0], [0, 255, 0], [0, 0, 255]]}},
                    "skeleton_link_colors": {{"__ndarray__": [[255, 255, 0], [0, 255, 255]]}}
                }},
                "instance_info": [
                    {{"instances": [
                        {{"keypoints": [[0.0, 0.0, 0.5], [0.1, 0.1, 1.0], [0.2, 0.0, 1.5]],
                          "keypoint_scores": [0.9, 0.1, 0.5]}}
                    ]}}
                ]
            }}"#
        );
        PoseSequence::from_json_str(&json).unwrap()
    }

    #[test]
    fn test_scenario_a_threshold_filtering() {
        let seq = scenario_artifact("[[0, 2], [0, 2]]");
        let fig = render_frame(&seq, 0, &RenderConfig::full_frame()).unwrap();

        // Joints 0 and 2 drawn, joint 1 (score 0.1) omitted.
        let markers: Vec<_> = fig.markers().collect();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].position, [0.0, 0.0, 0.5]);
        assert_eq!(markers[1].position, [0.2, 0.0, 1.5]);

        // Both (0, 2) links drawn since both endpoints exceed 0.3.
        assert_eq!(fig.segments().count(), 2);
    }

    #[test]
    fn test_scenario_b_link_omitted_for_low_endpoint() {
        let seq = scenario_artifact("[[0, 2], [0, 1]]");
        let fig = render_frame(&seq, 0, &RenderConfig::full_frame()).unwrap();

        // (0, 1) has endpoint score 0.1 <= 0.3, so only (0, 2) survives.
        let segments: Vec<_> = fig.segments().collect();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start, [0.0, 0.0, 0.5]);
        assert_eq!(segments[0].end, [0.2, 0.0, 1.5]);
    }

    #[test]
    fn test_color_fidelity() {
        let json = r#"{
            "meta_info": {
                "skeleton_links": [[0, 2]],
                "keypoint_colors": {"__ndarray__": [[255, 0, 0], [0, 255, 0], [0, 0, 255]]},
                "skeleton_link_colors": {"__ndarray__": [[255, 255, 0]]}
            },
            "instance_info": [
                {"instances": [
                    {"keypoints": [[0.0, 0.0, 0.5], [0.1, 0.1, 1.0], [0.2, 0.0, 1.5]],
                     "keypoint_scores": [0.9, 0.1, 0.5]}
                ]}
            ]
        }"#;
        let seq = PoseSequence::from_json_str(json).unwrap();

        let fig = render_frame(&seq, 0, &RenderConfig::full_frame()).unwrap();
        let markers: Vec<_> = fig.markers().collect();
        // Joint 0 color is [255, 0, 0] / 255.
        assert_eq!(markers[0].color, [1.0, 0.0, 0.0]);
        // Joint 2 color is [0, 0, 255] / 255.
        assert_eq!(markers[1].color, [0.0, 0.0, 1.0]);
        let segment = fig.segments().next().unwrap();
        assert_eq!(segment.color, [1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_links_drawn_before_points() {
        let seq = scenario_artifact("[[0, 2], [0, 2]]");
        let fig = render_frame(&seq, 0, &RenderConfig::full_frame()).unwrap();

        let first_marker = fig
            .elements
            .iter()
            .position(|e| matches!(e, Element::Marker(_)))
            .unwrap();
        let last_segment = fig
            .elements
            .iter()
            .rposition(|e| matches!(e, Element::Segment(_)))
            .unwrap();
        assert!(last_segment < first_marker);
    }

    #[test]
    fn test_frame_index_out_of_range() {
        let seq = scenario_artifact("[[0, 2], [0, 1]]");
        let err = render_frame(&seq, 1, &RenderConfig::full_frame()).unwrap_err();
        assert!(matches!(err, PoseVizError::IndexOutOfRange(_)));
        assert!(err.to_string().contains("frame 1"));
    }

    #[test]
    fn test_person_index_out_of_range() {
        let seq = scenario_artifact("[[0, 2], [0, 1]]");
        let err = render_person(&seq, 0, 1, &RenderConfig::single_person()).unwrap_err();
        assert!(matches!(err, PoseVizError::IndexOutOfRange(_)));
        assert!(err.to_string().contains("person 1"));
    }

    #[test]
    fn test_titles_are_one_indexed() {
        let seq = scenario_artifact("[[0, 2], [0, 1]]");
        let fig = render_frame(&seq, 0, &RenderConfig::full_frame()).unwrap();
        assert_eq!(fig.title, "Frame 1");

        let fig = render_person(&seq, 0, 0, &RenderConfig::single_person()).unwrap();
        assert_eq!(fig.title, "Frame 1, Person 1");
    }

    #[test]
    fn test_sequence_untouched_after_error() {
        let seq = scenario_artifact("[[0, 2], [0, 1]]");
        let before = seq.frames[0].instances[0].scores.clone();
        let _ = render_frame(&seq, 99, &RenderConfig::full_frame());
        assert_eq!(seq.frames[0].instances[0].scores, before);
        // Retrying with a valid index succeeds without reloading.
        assert!(render_frame(&seq, 0, &RenderConfig::full_frame()).is_ok());
    }

    #[test]
    fn test_custom_threshold_is_honored() {
        let seq = scenario_artifact("[[0, 2], [0, 1]]");
        let config = RenderConfig::full_frame().with_visibility_threshold(0.05);
        let fig = render_frame(&seq, 0, &config).unwrap();
        // All three joints clear a 0.05 cutoff, and both links draw.
        assert_eq!(fig.markers().count(), 3);
        assert_eq!(fig.segments().count(), 2);
    }
}
